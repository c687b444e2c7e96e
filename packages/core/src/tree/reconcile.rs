//! Subtree reconciliation
//!
//! After an operation changes `parent_id` or `pos` on a few nodes, the flat
//! sequence no longer matches the tree those fields describe. Rather than
//! rebuilding the whole document, the reconciler rebuilds only the runs of the
//! parents whose child lists changed and splices them back in place.
//!
//! # Algorithm
//!
//! 1. Locate each parent's run in the modified (not yet reordered) sequence,
//!    using the cached depths, which still describe the old layout.
//! 2. Drop runs nested inside another requested run: rebuilding the outer
//!    parent rebuilds the inner one too.
//! 3. Index the children of every node inside the kept runs, sorted by `pos`.
//!    A node moved between two parents lies in the old parent's run, so both
//!    parents see it.
//! 4. Rebuild each run depth-first from the index, rewriting `depth` and
//!    `has_children` on the way.
//! 5. Splice in one pass: emit each rebuilt run where its old run started and
//!    drop any other occurrence of a rebuilt node.
//!
//! The cost is proportional to the rebuilt runs plus one linear splice.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use tracing::trace;

use crate::models::Node;
use crate::operations::{OutlineError, Result};
use crate::tree::subtree::{index_of, run_from};

/// Rebuild the run of a single parent. See [`reconcile_parents`].
pub fn reconcile(nodes: &[Node], parent: &str) -> Result<Vec<Node>> {
    reconcile_parents(nodes, &[parent])
}

/// Rebuild the runs of every listed parent and splice them back into the sequence.
///
/// Every parent whose child list gained, lost or reordered a node must be
/// listed, including the old parent of a moved node.
///
/// # Errors
///
/// - [`OutlineError::ParentNotFound`] if a listed parent is not in `nodes`
/// - [`OutlineError::CorruptTree`] if the rebuilt sequence would lose or
///   duplicate nodes (cyclic ancestry, or a moved node whose old parent was
///   not listed)
pub fn reconcile_parents(nodes: &[Node], parents: &[&str]) -> Result<Vec<Node>> {
    let mut runs: Vec<Range<usize>> = Vec::with_capacity(parents.len());
    for parent in parents {
        let start = index_of(nodes, parent)
            .ok_or_else(|| OutlineError::parent_not_found(parent.to_string()))?;
        runs.push(run_from(nodes, start));
    }

    runs.sort_by_key(|run| (run.start, std::cmp::Reverse(run.end)));
    runs.dedup_by(|inner, outer| outer.start <= inner.start && inner.end <= outer.end);

    let children = index_children(nodes, &runs);

    let mut rebuilt: Vec<(Range<usize>, Vec<Node>)> = Vec::with_capacity(runs.len());
    let mut rebuilt_keys: HashSet<&str> = HashSet::new();
    for run in runs {
        let root = &nodes[run.start];
        let mut out = Vec::with_capacity(run.len());
        let mut visited = HashSet::new();
        rebuild_run(root, root.depth, &children, &mut visited, &mut out);

        trace!(
            parent = %root.key,
            old_len = run.len(),
            new_len = out.len(),
            "rebuilt parent run"
        );

        rebuilt_keys.extend(visited);
        rebuilt.push((run, out));
    }

    let mut result = Vec::with_capacity(nodes.len());
    let mut pending = rebuilt.into_iter().peekable();
    let mut i = 0;
    while i < nodes.len() {
        let starts_run = pending.peek().map_or(false, |(run, _)| run.start == i);
        if starts_run {
            if let Some((run, out)) = pending.next() {
                result.extend(out);
                i = run.end;
            }
            continue;
        }

        let node = &nodes[i];
        if !rebuilt_keys.contains(node.key.as_str()) {
            result.push(node.clone());
        }
        i += 1;
    }

    if result.len() != nodes.len() {
        return Err(OutlineError::corrupt_tree(format!(
            "reconciling {:?} produced {} nodes from {}",
            parents,
            result.len(),
            nodes.len()
        )));
    }

    Ok(result)
}

/// Children of every node found inside `runs`, keyed by parent, ascending by `pos`
fn index_children<'a>(nodes: &'a [Node], runs: &[Range<usize>]) -> HashMap<&'a str, Vec<&'a Node>> {
    let mut children: HashMap<&str, Vec<&Node>> = HashMap::new();
    for run in runs {
        // the run's own root keeps its place under its parent
        for node in &nodes[run.start + 1..run.end] {
            if let Some(parent) = node.parent_id.as_deref() {
                children.entry(parent).or_default().push(node);
            }
        }
    }
    for list in children.values_mut() {
        // stable: duplicate positions keep their sequence order
        list.sort_by_key(|node| node.pos);
    }
    children
}

fn rebuild_run<'a>(
    node: &'a Node,
    depth: i32,
    children: &HashMap<&str, Vec<&'a Node>>,
    visited: &mut HashSet<&'a str>,
    out: &mut Vec<Node>,
) {
    if !visited.insert(node.key.as_str()) {
        return;
    }

    let kids = children.get(node.key.as_str());
    let mut rebuilt = node.clone();
    rebuilt.depth = depth;
    rebuilt.has_children = kids.map_or(false, |kids| !kids.is_empty());
    out.push(rebuilt);

    for &child in kids.into_iter().flatten() {
        rebuild_run(child, depth + 1, children, visited, out);
    }
}

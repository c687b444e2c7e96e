//! Snapshot checker for outline documents
//!
//! Loads a JSON snapshot, rebuilds the sequence from its records, repairs it
//! with the sanitizer and verifies the order invariant. Optionally runs a
//! seeded random indent/dedent session against the loaded outline and reports
//! the shortest prefix of operations that breaks the flatten/reload round trip.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin outline-check -- outline.json
//! cargo run --bin outline-check -- outline.json --stress 200 --seed 7
//! cargo run --bin outline-check -- outline.json --write
//! ```
//!
//! Log verbosity follows `RUST_LOG`, defaulting to `outline_core=info`.

use anyhow::{bail, Context};
use outline_core::config::OutlineConfig;
use outline_core::db::{flatten, reload, JsonFileSnapshotStore, MemoryStore, Snapshot, SnapshotStore};
use outline_core::logging::init_tracing;
use outline_core::operations::{dedent, indent, Outcome};
use outline_core::tree::sanitize;
use outline_core::Document;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const USAGE: &str = "usage: outline-check <snapshot.json> [--stress N] [--seed S] [--write] [--config config.json]";

struct Args {
    path: String,
    stress: usize,
    seed: u64,
    write: bool,
    config: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        path: String::new(),
        stress: 0,
        seed: 0,
        write: false,
        config: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stress" => {
                parsed.stress = args.next().context(USAGE)?.parse().context("--stress takes a count")?
            }
            "--seed" => parsed.seed = args.next().context(USAGE)?.parse().context("--seed takes an integer")?,
            "--write" => parsed.write = true,
            "--config" => parsed.config = Some(args.next().context(USAGE)?),
            _ if parsed.path.is_empty() && !arg.starts_with("--") => parsed.path = arg,
            _ => bail!("unexpected argument '{}'\n{}", arg, USAGE),
        }
    }

    if parsed.path.is_empty() {
        bail!(USAGE);
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Copy)]
enum Shift {
    Indent(usize),
    Dedent(usize),
}

fn apply(doc: &Document, shift: Shift, max_depth: i32) -> anyhow::Result<Document> {
    let pick = |index: usize| doc.nodes()[1 + index % (doc.len() - 1)].key.clone();
    let root = doc.root_key();
    let outcome = match shift {
        Shift::Indent(i) => indent(doc, &pick(i), root, max_depth)?,
        Shift::Dedent(i) => dedent(doc, &pick(i), root, max_depth)?,
    };
    Ok(match outcome {
        Outcome::Applied(transition) => transition.document,
        Outcome::Refused(_) => doc.clone(),
    })
}

fn survives(start: &Document, shifts: &[Shift], max_depth: i32) -> bool {
    let mut doc = start.clone();
    for &shift in shifts {
        doc = match apply(&doc, shift, max_depth) {
            Ok(doc) => doc,
            Err(_) => return false,
        };
    }
    doc.check_invariants().is_ok()
        && reload(&MemoryStore::new(flatten(doc.nodes())), doc.root_key())
            .map_or(false, |reloaded| reloaded == doc.nodes())
}

/// Shortest failing prefix, assuming the full session fails
fn bisect(start: &Document, shifts: &[Shift], max_depth: i32) -> usize {
    let (mut good, mut bad) = (0, shifts.len());
    while bad - good > 1 {
        let mid = (good + bad) / 2;
        if survives(start, &shifts[..mid], max_depth) {
            good = mid;
        } else {
            bad = mid;
        }
    }
    bad
}

fn stress(doc: &Document, count: usize, seed: u64, max_depth: i32) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let shifts: Vec<Shift> = (0..count)
        .map(|_| {
            let index = rng.gen_range(0..doc.len().max(2));
            if rng.gen_bool(0.5) {
                Shift::Indent(index)
            } else {
                Shift::Dedent(index)
            }
        })
        .collect();

    if survives(doc, &shifts, max_depth) {
        println!("✅ {} random indent/dedent operations round-trip (seed {})", count, seed);
        return true;
    }

    let prefix = bisect(doc, &shifts, max_depth);
    println!("❌ Round trip broken after {} operations (seed {})", prefix, seed);
    for (n, shift) in shifts[..prefix].iter().enumerate() {
        println!("   {:>4}: {:?}", n + 1, shift);
    }
    false
}

fn report(label: &str, doc: &Document) {
    let nodes = doc.nodes();
    let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
    let count = |f: fn(&outline_core::Node) -> bool| nodes.iter().filter(|n| f(n)).count();
    println!("{}", label);
    println!("   nodes:      {}", nodes.len());
    println!("   max depth:  {}", max_depth);
    println!("   collapsed:  {}", count(|n| n.collapsed));
    println!("   completed:  {}", count(|n| n.completed));
    println!("   bookmarked: {}", count(|n| n.bookmarked));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config {}", path))?;
            OutlineConfig::from_json_str(&json)?
        }
        None => OutlineConfig::default(),
    };
    init_tracing(&config.log_filter);

    let store = JsonFileSnapshotStore::new(&args.path);
    let snapshot = match store.load().await? {
        Some(snapshot) => snapshot,
        None => bail!("No snapshot at {}", args.path),
    };
    println!("🔍 Checking {} ({} records)", args.path, snapshot.records.len());

    let reloaded = snapshot.restore()?;
    let unreachable = snapshot.records.len().saturating_sub(reloaded.len());
    if unreachable > 0 {
        println!("⚠️  {} records are not reachable from '{}'", unreachable, snapshot.root_key);
    }

    let stored_ok = Document::from_nodes(reloaded.clone())
        .and_then(|doc| doc.check_invariants())
        .is_ok();
    if stored_ok {
        println!("✅ Stored records satisfy the order invariant");
    } else {
        println!("⚠️  Stored records need repair");
    }

    let repaired = Document::from_nodes(sanitize(&reloaded, &snapshot.root_key)?)?;
    repaired
        .check_invariants()
        .context("sanitized document still violates the order invariant")?;
    report("📋 Sanitized outline", &repaired);

    let mut healthy = true;
    if args.stress > 0 {
        healthy = stress(&repaired, args.stress, args.seed, config.max_depth);
    }

    if args.write {
        store.save(Snapshot::capture(&repaired)).await?;
        println!("💾 Wrote sanitized snapshot to {}", args.path);
    }

    if !healthy {
        std::process::exit(1);
    }
    Ok(())
}

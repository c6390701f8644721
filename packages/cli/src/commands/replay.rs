use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use linq_builder::{BottomAppend, BuilderStore, Mutation, MutationOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON file holding an array of mutations
    pub script: PathBuf,

    /// Snapshot output file (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the snapshot to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Resolve unplaced rows before writing the snapshot
    #[arg(long)]
    pub compact: bool,

    /// Continue past mutations that fail
    #[arg(short, long)]
    pub keep_going: bool,
}

/// Per-script counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub unchanged: usize,
    pub failed: usize,
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let script_path = resolve(cwd, &args.script);
    let mutations = load_script(&script_path)?;

    println!(
        "{} {} ({} mutations)",
        "▶️  Replaying".bright_blue().bold(),
        script_path.display(),
        mutations.len()
    );

    let mut store = BuilderStore::with_options(config.store_options())?;
    let summary = run_script(&mut store, mutations, args.keep_going)?;

    if args.compact && store.compact(&BottomAppend) {
        println!("  {} compacted layout", "✓".green());
    }

    let snapshot_json = serde_json::to_string_pretty(&store.snapshot())?;

    println!();
    println!(
        "{} {} applied, {} unchanged, {} failed",
        "Summary:".bold(),
        summary.applied.to_string().green(),
        summary.unchanged,
        summary.failed.to_string().red()
    );

    if args.stdout {
        println!("{}", snapshot_json);
        return Ok(());
    }

    let out_path = match args.out {
        Some(out) => resolve(cwd, &out),
        None => config.get_out_file(cwd),
    };
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, snapshot_json)?;

    println!("  {} Wrote {}", "✓".green(), out_path.display());
    Ok(())
}

pub fn load_script(path: &Path) -> Result<Vec<Mutation>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutation script {}", path.display()))
}

/// Apply `mutations` in order, printing one line per step
pub fn run_script(
    store: &mut BuilderStore,
    mutations: Vec<Mutation>,
    keep_going: bool,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (step, mutation) in mutations.into_iter().enumerate() {
        let step = step + 1;
        let name = mutation.name();
        debug!(step, op = name, "Applying mutation");

        match store.apply(mutation) {
            Ok(outcome) if outcome.changed => {
                summary.applied += 1;
                println!("  {} {:>3} {}{}", "✓".green(), step, name, describe(&outcome));
            }
            Ok(_) => {
                summary.unchanged += 1;
                println!("  {} {:>3} {}", "·".dimmed(), step, name.dimmed());
            }
            Err(e) => {
                summary.failed += 1;
                eprintln!("  {} {:>3} {} - {}", "✗".red(), step, name, e);
                if !keep_going {
                    return Err(e).with_context(|| format!("Step {} ({}) failed", step, name));
                }
            }
        }
    }

    Ok(summary)
}

fn describe(outcome: &MutationOutcome) -> String {
    match (&outcome.block_id, &outcome.page_id) {
        (Some(block), _) => format!(" → block {}", block),
        (_, Some(page)) => format!(" → page {}", page),
        _ => String::new(),
    }
}

fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linq_builder::WorkspaceSnapshot;

    fn read_snapshot(path: &Path) -> WorkspaceSnapshot {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    const SCRIPT: &str = r#"[
        { "op": "addBlock", "type": "header" },
        { "op": "addBlock", "type": "link" },
        { "op": "removeBlock", "id": "missing" },
        { "op": "setThemeById", "id": "retro-pop" },
        { "op": "undo" }
    ]"#;

    fn args(script: PathBuf, out: Option<PathBuf>) -> ReplayArgs {
        ReplayArgs {
            script,
            out,
            stdout: false,
            compact: true,
            keep_going: false,
        }
    }

    #[test]
    fn test_run_script_counts_steps() {
        let mutations: Vec<Mutation> = serde_json::from_str(SCRIPT).unwrap();
        let mut store = BuilderStore::new();

        let summary = run_script(&mut store, mutations, false).unwrap();
        assert_eq!(
            summary,
            ReplaySummary {
                applied: 4,
                unchanged: 1,
                failed: 0
            }
        );
        assert_eq!(store.blocks().len(), 1);
    }

    #[test]
    fn test_failing_step_stops_unless_keep_going() {
        let script = r#"[
            { "op": "setThemeById", "id": "neon" },
            { "op": "addBlock", "type": "text" }
        ]"#;

        let mut store = BuilderStore::new();
        let mutations: Vec<Mutation> = serde_json::from_str(script).unwrap();
        assert!(run_script(&mut store, mutations, false).is_err());
        assert!(store.blocks().is_empty());

        let mut store = BuilderStore::new();
        let mutations: Vec<Mutation> = serde_json::from_str(script).unwrap();
        let summary = run_script(&mut store, mutations, true).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(store.blocks().len(), 1);
    }

    #[test]
    fn test_replay_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("edits.json"), SCRIPT).unwrap();

        replay(
            args(PathBuf::from("edits.json"), Some(PathBuf::from("out/page.json"))),
            cwd,
        )
        .unwrap();

        let snapshot = read_snapshot(&dir.path().join("out/page.json"));
        assert_eq!(snapshot.pages.len(), 1);

        let page = &snapshot.pages[0];
        assert_eq!(page.current_theme.id, "retro-pop");
        assert_eq!(page.blocks.len(), 1);
        // --compact resolved the appended header
        assert_eq!(page.blocks[0].layout.y, Some(0));
    }

    #[test]
    fn test_replay_uses_config_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("edits.json"), "[]").unwrap();
        fs::write(
            dir.path().join(crate::config::DEFAULT_CONFIG_NAME),
            r#"{ "outFile": "snap.json", "defaultPageName": "Portfolio" }"#,
        )
        .unwrap();

        replay(args(PathBuf::from("edits.json"), None), cwd).unwrap();

        let snapshot = read_snapshot(&dir.path().join("snap.json"));
        assert_eq!(snapshot.pages[0].name, "Portfolio");
    }

    #[test]
    fn test_invalid_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"[{ "op": "explode" }]"#).unwrap();

        assert!(load_script(&path).is_err());
    }
}

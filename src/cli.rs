use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use crate::catalog;
use crate::config::ExtractConfig;
use crate::driver::extract_all;
use crate::metrics;
use crate::remnant::RemnantClass;
use crate::report::write_history;
use crate::source::SnapshotFile;
use crate::util::fmt_elapsed;

#[derive(Parser, Debug)]
#[command(
    name = "snapsieve",
    version,
    about = "Extract compact-remnant histories from N-body HDF5 snapshot archives",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Полный конвейер: каталог -> фильтр по всем снапшотам -> CSV
    Extract {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, value_parser = parse_remnant, default_value = "bh")]
        remnant: RemnantClass,
        /// Target CSV (default: <tag>_history.csv in the working directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Simulation mass unit -> solar masses
        #[arg(long)]
        mass_factor: Option<f64>,
        /// Worker pool size (default: cpus - 2, floored at 1)
        #[arg(long)]
        workers: Option<usize>,
        /// Override the kw code derived from --remnant
        #[arg(long)]
        kw_code: Option<i64>,
        /// Print a machine-readable run summary after the table
        #[arg(long)]
        json: bool,
    },
    /// Упорядоченный список снапшотов архива
    Catalog {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Один снапшот: метка времени, число частиц, гистограмма kw
    Probe {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        key: String,
    },
    /// Сводка по архиву: диапазон индексов и времён
    Status {
        #[arg(long)]
        path: PathBuf,
    },
}

/// Machine-readable tail of an extract run (--json).
#[derive(Debug, Serialize)]
struct RunSummary {
    remnant: RemnantClass,
    kw_code: i64,
    snapshots_cataloged: usize,
    snapshots_scanned: u64,
    snapshots_skipped: u64,
    rows: usize,
    output: Option<String>,
    elapsed_secs: f64,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Extract {
            path,
            remnant,
            out,
            mass_factor,
            workers,
            kw_code,
            json,
        } => {
            let started = Instant::now();

            let mut cfg = ExtractConfig::from_env(path, remnant);
            if let Some(out) = out {
                cfg = cfg.with_output(out);
            }
            if let Some(f) = mass_factor {
                cfg = cfg.with_mass_factor(f);
            }
            if let Some(w) = workers {
                cfg = cfg.with_workers(w);
            }
            if let Some(c) = kw_code {
                cfg = cfg.with_kw_code(c);
            }
            debug!("{}", cfg);

            // Недоступный архив фатален до запуска воркеров.
            let src = SnapshotFile::open(&cfg.input)?;
            let keys = catalog::scan(&src)?;
            // Воркеры открывают собственные read-only хэндлы.
            drop(src);

            if keys.is_empty() {
                println!("No snapshot data found in {}", cfg.input.display());
                return Ok(());
            }

            println!(
                "--- Reading {} snapshot(s) with {} worker(s) ---",
                keys.len(),
                cfg.workers
            );
            let rows = extract_all(&cfg, &keys)?;

            let written = write_history(&cfg.output, cfg.remnant, &rows)?;
            if written > 0 {
                println!(
                    "Total {} records found: {}",
                    cfg.remnant.label(),
                    rows.len()
                );
                println!(
                    "Saved {} row(s) to {} in {}",
                    written,
                    cfg.output.display(),
                    fmt_elapsed(started.elapsed())
                );
            } else {
                println!("No {} records found to save.", cfg.remnant.label());
            }

            if json {
                let m = metrics::snapshot();
                let summary = RunSummary {
                    remnant: cfg.remnant,
                    kw_code: cfg.kw_code,
                    snapshots_cataloged: keys.len(),
                    snapshots_scanned: m.snapshots_scanned,
                    snapshots_skipped: m.snapshots_skipped,
                    rows: rows.len(),
                    output: (written > 0).then(|| cfg.output.display().to_string()),
                    elapsed_secs: started.elapsed().as_secs_f64(),
                };
                let s = serde_json::to_string_pretty(&summary)
                    .unwrap_or_else(|_| "{}".to_string());
                println!("{s}");
            }
        }

        Cmd::Catalog { path, json } => {
            let src = SnapshotFile::open(&path)?;
            let keys = catalog::scan(&src)?;
            if json {
                let names: Vec<&str> = keys.iter().map(|k| k.name.as_str()).collect();
                let s = serde_json::to_string_pretty(&names)
                    .unwrap_or_else(|_| "[]".to_string());
                println!("{s}");
                return Ok(());
            }
            if keys.is_empty() {
                println!("(no snapshots)");
                return Ok(());
            }
            for k in keys {
                println!("{}", k.name);
            }
        }

        Cmd::Probe { path, key } => {
            let src = SnapshotFile::open(&path)?;
            match src.read_snapshot(&key)? {
                None => println!("snapshot '{}' is missing or malformed", key),
                Some(cols) => {
                    println!("snapshot {}", key);
                    println!("  time      = {}", cols.time);
                    println!("  particles = {}", cols.len());
                    let mut hist: BTreeMap<i64, usize> = BTreeMap::new();
                    for &kw in &cols.kw {
                        *hist.entry(kw).or_default() += 1;
                    }
                    for (kw, count) in hist {
                        println!("  kw {:3}    = {}", kw, count);
                    }
                }
            }
        }

        Cmd::Status { path } => {
            let src = SnapshotFile::open(&path)?;
            let keys = catalog::scan(&src)?;
            println!("Archive {}", path.display());
            println!("  snapshots = {}", keys.len());
            if let (Some(first), Some(last)) = (keys.first(), keys.last()) {
                println!("  index     = [{}..{}]", first.index, last.index);
                let t0 = src.read_snapshot(&first.name)?.map(|c| c.time);
                let t1 = src.read_snapshot(&last.name)?.map(|c| c.time);
                match (t0, t1) {
                    (Some(a), Some(b)) => println!("  time      = [{}..{}]", a, b),
                    _ => println!("  time      = (unreadable endpoints)"),
                }
            }
        }
    }
    Ok(())
}

fn parse_remnant(s: &str) -> Result<RemnantClass, String> {
    s.parse::<RemnantClass>().map_err(|e| e.to_string())
}

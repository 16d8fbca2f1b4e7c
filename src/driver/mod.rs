//! Parallel driver: fan the snapshot filter out over a fixed worker pool and
//! concatenate the per-snapshot results.
//!
//! Один юнит = один снапшот; юнит синхронный (open-read-filter-return).
//! Воркеры не делят хэндл архива: каждый юнит открывает свой. Fan-in —
//! обычный collect по submission-порядку; потерь и дублей нет by
//! construction, Err любого юнита валит весь прогон.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;

use crate::catalog::SnapKey;
use crate::config::ExtractConfig;
use crate::consts::PROGRESS_EVERY;
use crate::metrics;
use crate::snapshot::{filter_snapshot, RemnantRow};
use crate::source::SnapshotFile;

/// Process a single catalog entry with its own read-only handle.
/// This is the unit of parallel work; gaps yield an empty Vec.
pub fn process_snapshot(cfg: &ExtractConfig, key: &SnapKey) -> Result<Vec<RemnantRow>> {
    let src = SnapshotFile::open(&cfg.input)?;
    let cols = match src.read_snapshot(&key.name)? {
        Some(cols) => cols,
        None => {
            metrics::record_snapshot_gap();
            return Ok(Vec::new());
        }
    };

    let rows = filter_snapshot(&cols, cfg.kw_code, cfg.mass_factor);
    metrics::record_snapshot_scanned(cols.len(), rows.len());
    debug!("{}: {} of {} particle(s) matched", key.name, rows.len(), cols.len());
    Ok(rows)
}

/// Run the filter over every cataloged snapshot on a pool of
/// `cfg.workers` threads and concatenate all rows.
pub fn extract_all(cfg: &ExtractConfig, keys: &[SnapKey]) -> Result<Vec<RemnantRow>> {
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cfg.workers)
        .build()
        .context("build worker pool")?;

    let total = keys.len();
    let done = AtomicUsize::new(0);

    let per_snapshot: Result<Vec<Vec<RemnantRow>>> = pool.install(|| {
        keys.par_iter()
            .map(|key| {
                let rows = process_snapshot(cfg, key)?;
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                if n % PROGRESS_EVERY == 0 || n == total {
                    info!("processed {}/{} snapshot(s)", n, total);
                }
                Ok(rows)
            })
            .collect()
    });

    let mut all = Vec::new();
    for rows in per_snapshot? {
        all.extend(rows);
    }
    Ok(all)
}

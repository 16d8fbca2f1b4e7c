//! Lightweight global metrics for SnapSieve.
//!
//! Потокобезопасные атомарные счётчики конвейера:
//! - каталог / чтение снапшотов
//! - фильтр (частицы, строки)
//!
//! Счётчики только наблюдают; корректность fan-in от них не зависит.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// ----- Snapshot reads -----
static SNAPSHOTS_SCANNED: AtomicU64 = AtomicU64::new(0);
static SNAPSHOTS_SKIPPED: AtomicU64 = AtomicU64::new(0);

// ----- Filter -----
static PARTICLES_SCANNED: AtomicU64 = AtomicU64::new(0);
static ROWS_EMITTED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    /// Snapshots fully read and filtered.
    pub snapshots_scanned: u64,
    /// Snapshots absorbed as gaps (missing columns, malformed group).
    pub snapshots_skipped: u64,
    /// Particles inspected by the filter.
    pub particles_scanned: u64,
    /// Output rows produced.
    pub rows_emitted: u64,
}

impl MetricsSnapshot {
    /// Matched fraction over everything inspected (0.0 when nothing scanned).
    pub fn match_ratio(&self) -> f64 {
        if self.particles_scanned == 0 {
            0.0
        } else {
            self.rows_emitted as f64 / self.particles_scanned as f64
        }
    }
}

// ----- Recorders -----
pub fn record_snapshot_scanned(particles: usize, rows: usize) {
    SNAPSHOTS_SCANNED.fetch_add(1, Ordering::Relaxed);
    PARTICLES_SCANNED.fetch_add(particles as u64, Ordering::Relaxed);
    ROWS_EMITTED.fetch_add(rows as u64, Ordering::Relaxed);
}

pub fn record_snapshot_gap() {
    SNAPSHOTS_SKIPPED.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        snapshots_scanned: SNAPSHOTS_SCANNED.load(Ordering::Relaxed),
        snapshots_skipped: SNAPSHOTS_SKIPPED.load(Ordering::Relaxed),
        particles_scanned: PARTICLES_SCANNED.load(Ordering::Relaxed),
        rows_emitted: ROWS_EMITTED.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    SNAPSHOTS_SCANNED.store(0, Ordering::Relaxed);
    SNAPSHOTS_SKIPPED.store(0, Ordering::Relaxed);
    PARTICLES_SCANNED.store(0, Ordering::Relaxed);
    ROWS_EMITTED.store(0, Ordering::Relaxed);
}

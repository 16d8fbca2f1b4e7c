//! One snapshot's columnar view plus the filter-and-project core.
//!
//! `filter_snapshot` is the unit of parallel work: a pure function over
//! in-memory columns with no I/O and no shared mutable state, safe to run
//! concurrently for many snapshots at once.

use serde::Serialize;

/// Columnar particle arrays of a single snapshot, plus the snapshot-scoped
/// timestamp. Per-particle columns must all have the same length; a snapshot
/// violating that is treated as malformed and contributes nothing.
#[derive(Clone, Debug, Default)]
pub struct SnapshotColumns {
    /// Timestamp shared by every particle in the snapshot (Myr).
    pub time: f64,
    /// Stellar-evolution type code per particle.
    pub kw: Vec<i64>,
    /// Particle identifier.
    pub id: Vec<i64>,
    /// Mass in simulation units.
    pub m: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub vz: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl SnapshotColumns {
    /// Particle count (length of the per-particle columns).
    pub fn len(&self) -> usize {
        self.kw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kw.is_empty()
    }

    /// All per-particle columns have equal length.
    pub fn is_consistent(&self) -> bool {
        let n = self.kw.len();
        self.id.len() == n
            && self.m.len() == n
            && self.vx.len() == n
            && self.vy.len() == n
            && self.vz.len() == n
            && self.x.len() == n
            && self.y.len() == n
            && self.z.len() == n
    }
}

/// One matched particle at one snapshot instant. Field order here is the
/// column order of the output table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RemnantRow {
    pub time_myr: f64,
    pub id: i64,
    pub mass_msun: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Select the particles whose type code equals `kw_code` and project them
/// into output rows, in original column order.
///
/// - mass is multiplied by `mass_factor`; every other field is carried
///   verbatim, the timestamp from the snapshot scope;
/// - zero matches is a normal outcome (empty Vec);
/// - inconsistent column lengths make the whole snapshot contribute nothing.
pub fn filter_snapshot(cols: &SnapshotColumns, kw_code: i64, mass_factor: f64) -> Vec<RemnantRow> {
    if !cols.is_consistent() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    for i in 0..cols.len() {
        if cols.kw[i] != kw_code {
            continue;
        }
        rows.push(RemnantRow {
            time_myr: cols.time,
            id: cols.id[i],
            mass_msun: cols.m[i] * mass_factor,
            vx: cols.vx[i],
            vy: cols.vy[i],
            vz: cols.vz[i],
            x: cols.x[i],
            y: cols.y[i],
            z: cols.z[i],
        });
    }
    rows
}

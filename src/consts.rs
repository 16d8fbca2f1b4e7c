//! Общие константы архива снапшотов и выгрузки истории.

// -------- Snapshot archive layout --------
/// Top-level groups are named "snap_<N>" with a monotonically assigned N.
pub const SNAP_PREFIX: &str = "snap_";

/// Per-snapshot column datasets.
pub const COL_TIME: &str = "t";
pub const COL_KW: &str = "kw";
pub const COL_ID: &str = "id";
pub const COL_MASS: &str = "m";
pub const COL_VX: &str = "vx";
pub const COL_VY: &str = "vy";
pub const COL_VZ: &str = "vz";
pub const COL_X: &str = "x";
pub const COL_Y: &str = "y";
pub const COL_Z: &str = "z";

// -------- Stellar-evolution type codes --------
// Коды kw по классификации SSE/BSE; нас интересуют только остатки.
pub const KW_NEUTRON_STAR: i64 = 13;
pub const KW_BLACK_HOLE: i64 = 14;

// -------- Unit conversion --------
/// Simulation mass unit -> solar masses (total cluster mass of the runs
/// these tools were written for).
pub const DEFAULT_MASS_FACTOR: f64 = 127_918.2;

// -------- Driver --------
/// Logical CPUs held back from the worker pool (main thread + OS headroom).
pub const WORKER_RESERVE: usize = 2;

/// Emit an info-level progress line every this many completed snapshots.
pub const PROGRESS_EVERY: usize = 100;

//! Centralized run configuration for SnapSieve.
//!
//! Goals:
//! - Single place to collect run parameters instead of scattering constants
//!   over the pipeline (input path, remnant class, kw code, mass factor,
//!   output path, worker count).
//! - from_env() keeps the knobs reachable without flags: SNAPSIEVE_MASS_FACTOR
//!   and SNAPSIEVE_WORKERS override the defaults.
//! - Fluent with_* setters for the CLI and for tests.
//!
//! Defaults:
//! - kw_code derived from the remnant class (13 = NS, 14 = BH)
//! - mass_factor = consts::DEFAULT_MASS_FACTOR
//! - output = "<tag>_history.csv" in the working directory
//! - workers = available_parallelism - WORKER_RESERVE, floored at 1

use std::fmt;
use std::path::PathBuf;

use crate::consts::DEFAULT_MASS_FACTOR;
use crate::remnant::RemnantClass;
use crate::util::auto_workers;

/// Everything one extraction run needs, fixed at invocation.
/// Passed by value into catalog/driver/writer; never read from globals.
#[derive(Clone, Debug)]
pub struct ExtractConfig {
    /// Snapshot archive (HDF5) to read. Opened read-only, once per worker unit.
    pub input: PathBuf,

    /// Remnant class; drives the default kw code and output naming.
    pub remnant: RemnantClass,

    /// Stellar-type code matched against the `kw` column.
    /// Defaults to the class code; overridable for non-standard archives.
    pub kw_code: i64,

    /// Simulation mass unit -> solar masses, applied to matched rows only.
    /// Env: SNAPSIEVE_MASS_FACTOR (default consts::DEFAULT_MASS_FACTOR)
    pub mass_factor: f64,

    /// Target CSV path. Overwritten without confirmation if it exists.
    pub output: PathBuf,

    /// Worker pool size. Always >= 1.
    /// Env: SNAPSIEVE_WORKERS (default cpus - WORKER_RESERVE, floored at 1)
    pub workers: usize,
}

impl ExtractConfig {
    /// Configuration with domain defaults for the given archive and class.
    pub fn new(input: PathBuf, remnant: RemnantClass) -> Self {
        Self {
            input,
            remnant,
            kw_code: remnant.kw_code(),
            mass_factor: DEFAULT_MASS_FACTOR,
            output: PathBuf::from(format!("{}_history.csv", remnant.tag())),
            workers: auto_workers(),
        }
    }

    /// Defaults plus SNAPSIEVE_* environment overrides.
    pub fn from_env(input: PathBuf, remnant: RemnantClass) -> Self {
        let mut cfg = Self::new(input, remnant);

        if let Ok(v) = std::env::var("SNAPSIEVE_MASS_FACTOR") {
            if let Ok(f) = v.trim().parse::<f64>() {
                if f.is_finite() && f > 0.0 {
                    cfg.mass_factor = f;
                }
            }
        }

        if let Ok(v) = std::env::var("SNAPSIEVE_WORKERS") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.workers = n.max(1);
            }
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_kw_code(mut self, code: i64) -> Self {
        self.kw_code = code;
        self
    }

    pub fn with_mass_factor(mut self, factor: f64) -> Self {
        self.mass_factor = factor;
        self
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = path.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

impl fmt::Display for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExtractConfig {{ \
             input: {}, \
             remnant: {}, \
             kw_code: {}, \
             mass_factor: {}, \
             output: {}, \
             workers: {} \
             }}",
            self.input.display(),
            self.remnant,
            self.kw_code,
            self.mass_factor,
            self.output.display(),
            self.workers,
        )
    }
}

//! Read-only access to a snapshot archive (HDF5).
//!
//! The archive holds one top-level group per snapshot; each group carries
//! named columnar datasets (t, kw, id, m, vx, vy, vz, x, y, z). Handles are
//! never shared across workers: whoever needs the file opens its own.
//!
//! Gap policy (uniform for both remnant classes): a member that is not a
//! group, a group missing a required column, mismatched column lengths or an
//! empty `t` make `read_snapshot` return Ok(None) — the snapshot silently
//! contributes nothing. Err is reserved for real read faults, which abort
//! the whole run.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::debug;

use crate::consts::{
    COL_ID, COL_KW, COL_MASS, COL_TIME, COL_VX, COL_VY, COL_VZ, COL_X, COL_Y, COL_Z,
};
use crate::snapshot::SnapshotColumns;

/// Read-only handle onto one snapshot archive.
pub struct SnapshotFile {
    file: hdf5::File,
    path: PathBuf,
}

impl SnapshotFile {
    /// Open the archive read-only. Failure here is fatal for the run.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = hdf5::File::open(&path)
            .map_err(|e| anyhow!("open snapshot archive {}: {}", path.display(), e))?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all top-level members (snapshots and anything else).
    pub fn snapshot_names(&self) -> Result<Vec<String>> {
        self.file
            .member_names()
            .map_err(|e| anyhow!("list snapshots in {}: {}", self.path.display(), e))
    }

    /// Materialize one snapshot's columns. Ok(None) for per-snapshot gaps,
    /// Err only for genuine read faults.
    pub fn read_snapshot(&self, name: &str) -> Result<Option<SnapshotColumns>> {
        let group = match self.file.group(name) {
            Ok(g) => g,
            Err(_) => {
                debug!("{}: not a readable group, skipping", name);
                return Ok(None);
            }
        };

        // `t` хранится как короткий массив; меткой снапшота служит первое
        // значение. Пустой датасет — признак битого снапшота.
        let Some(t) = self.column_f64(&group, name, COL_TIME)? else {
            return Ok(None);
        };
        let Some(&time) = t.first() else {
            debug!("{}: empty '{}' dataset, skipping", name, COL_TIME);
            return Ok(None);
        };

        let Some(kw) = self.column_i64(&group, name, COL_KW)? else {
            return Ok(None);
        };
        let Some(id) = self.column_i64(&group, name, COL_ID)? else {
            return Ok(None);
        };
        let Some(m) = self.column_f64(&group, name, COL_MASS)? else {
            return Ok(None);
        };
        let Some(vx) = self.column_f64(&group, name, COL_VX)? else {
            return Ok(None);
        };
        let Some(vy) = self.column_f64(&group, name, COL_VY)? else {
            return Ok(None);
        };
        let Some(vz) = self.column_f64(&group, name, COL_VZ)? else {
            return Ok(None);
        };
        let Some(x) = self.column_f64(&group, name, COL_X)? else {
            return Ok(None);
        };
        let Some(y) = self.column_f64(&group, name, COL_Y)? else {
            return Ok(None);
        };
        let Some(z) = self.column_f64(&group, name, COL_Z)? else {
            return Ok(None);
        };

        let cols = SnapshotColumns {
            time,
            kw,
            id,
            m,
            vx,
            vy,
            vz,
            x,
            y,
            z,
        };
        if !cols.is_consistent() {
            debug!("{}: mismatched column lengths, skipping", name);
            return Ok(None);
        }
        Ok(Some(cols))
    }

    fn column_f64(&self, group: &hdf5::Group, snap: &str, col: &str) -> Result<Option<Vec<f64>>> {
        let ds = match group.dataset(col) {
            Ok(ds) => ds,
            Err(_) => {
                debug!("{}: missing column '{}', skipping", snap, col);
                return Ok(None);
            }
        };
        let data = ds
            .read_raw::<f64>()
            .map_err(|e| anyhow!("read {}/{} from {}: {}", snap, col, self.path.display(), e))?;
        Ok(Some(data))
    }

    fn column_i64(&self, group: &hdf5::Group, snap: &str, col: &str) -> Result<Option<Vec<i64>>> {
        let ds = match group.dataset(col) {
            Ok(ds) => ds,
            Err(_) => {
                debug!("{}: missing column '{}', skipping", snap, col);
                return Ok(None);
            }
        };
        let data = ds
            .read_raw::<i64>()
            .map_err(|e| anyhow!("read {}/{} from {}: {}", snap, col, self.path.display(), e))?;
        Ok(Some(data))
    }
}

//! Snapshot catalog: which groups of the archive get processed, and in what
//! order.
//!
//! Top-level groups named `snap_<N>` (fixed prefix, all-digit suffix) are
//! selected and ordered ascending by N. Names that carry the prefix but fail
//! the pattern ("snap_", "snap_12a", "snap_final") are excluded from the
//! catalog entirely rather than being processed under a sentinel sort key —
//! a partial match says nothing about where the snapshot belongs on the
//! time axis.

use anyhow::Result;

use crate::consts::SNAP_PREFIX;
use crate::source::SnapshotFile;

/// One catalog entry: the group name as stored plus its parsed index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapKey {
    pub name: String,
    pub index: u64,
}

/// Parse `snap_<N>` into a catalog key; None for anything else.
pub fn parse_snap_key(name: &str) -> Option<SnapKey> {
    let suffix = name.strip_prefix(SNAP_PREFIX)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = suffix.parse::<u64>().ok()?;
    Some(SnapKey {
        name: name.to_string(),
        index,
    })
}

/// Keep the names matching the snapshot pattern and order them numerically.
/// Pure over the name list; the empty result is valid ("nothing to do").
pub fn order_snapshot_keys<I>(names: I) -> Vec<SnapKey>
where
    I: IntoIterator<Item = String>,
{
    let mut keys: Vec<SnapKey> = names
        .into_iter()
        .filter_map(|n| parse_snap_key(&n))
        .collect();
    keys.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
    keys
}

/// Catalog an open archive: enumerate top-level members, select and order.
/// An unreadable archive surfaces as Err before any processing starts.
pub fn scan(src: &SnapshotFile) -> Result<Vec<SnapKey>> {
    Ok(order_snapshot_keys(src.snapshot_names()?))
}

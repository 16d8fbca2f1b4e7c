//! Report writer: flatten the collected rows into one delimited table.
//!
//! Header and field order are fixed; the id column is named after the
//! remnant class ("bh_id" / "ns_id"). An empty collection writes nothing —
//! no header-only files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::remnant::RemnantClass;
use crate::snapshot::RemnantRow;

/// Persist the history table at `path`, overwriting any existing file.
/// Returns the number of data rows written (0 means nothing was written).
pub fn write_history(path: &Path, remnant: RemnantClass, rows: &[RemnantRow]) -> Result<usize> {
    if rows.is_empty() {
        info!("no {} records found, nothing to write", remnant.label());
        return Ok(0);
    }

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "time_myr,{}_id,mass_msun,vx,vy,vz,x,y,z", remnant.tag())
        .with_context(|| format!("write header to {}", path.display()))?;

    for r in rows {
        writeln!(
            w,
            "{},{},{},{},{},{},{},{},{}",
            r.time_myr, r.id, r.mass_msun, r.vx, r.vy, r.vz, r.x, r.y, r.z
        )
        .with_context(|| format!("write row to {}", path.display()))?;
    }

    w.flush().with_context(|| format!("flush {}", path.display()))?;
    info!("wrote {} row(s) to {}", rows.len(), path.display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unique_path(prefix: &str) -> PathBuf {
        let pid = std::process::id();
        let t = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("sstest-{}-{}-{}.csv", prefix, pid, t))
    }

    fn row(id: i64) -> RemnantRow {
        RemnantRow {
            time_myr: 1.5,
            id,
            mass_msun: 12.0,
            vx: 0.0,
            vy: 0.0,
            vz: 0.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[test]
    fn header_is_named_after_remnant_class() -> Result<()> {
        let path = unique_path("header");
        write_history(&path, RemnantClass::NeutronStar, &[row(7)])?;
        let text = std::fs::read_to_string(&path)?;
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("time_myr,ns_id,mass_msun,vx,vy,vz,x,y,z")
        );
        assert_eq!(lines.clone().count(), 1, "one data row expected");
        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn empty_rows_write_no_file() -> Result<()> {
        let path = unique_path("empty");
        let n = write_history(&path, RemnantClass::BlackHole, &[])?;
        assert_eq!(n, 0);
        assert!(!path.exists(), "no header-only file on empty input");
        Ok(())
    }

    #[test]
    fn existing_file_is_overwritten() -> Result<()> {
        let path = unique_path("overwrite");
        std::fs::write(&path, "stale contents\n")?;
        write_history(&path, RemnantClass::BlackHole, &[row(1), row(2)])?;
        let text = std::fs::read_to_string(&path)?;
        assert!(text.starts_with("time_myr,bh_id,"));
        assert_eq!(text.lines().count(), 3);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}

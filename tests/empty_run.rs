//! Пустой прогон завершается успешно и не оставляет файла-огрызка.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use SnapSieve::catalog;
use SnapSieve::config::ExtractConfig;
use SnapSieve::driver::extract_all;
use SnapSieve::remnant::RemnantClass;
use SnapSieve::report::write_history;
use SnapSieve::source::SnapshotFile;

#[test]
fn zero_matches_produce_no_output_file() -> Result<()> {
    let root = unique_root("no-match");
    fs::create_dir_all(&root)?;
    let archive = root.join("snapdata.h5");

    {
        let file = hdf5::File::create(&archive).expect("create archive");
        let g = file.create_group("snap_0").expect("group");
        g.new_dataset_builder()
            .with_data(&[0.0f64][..])
            .create("t")
            .expect("t");
        g.new_dataset_builder()
            .with_data(&[1i64, 2, 3][..])
            .create("kw")
            .expect("kw");
        g.new_dataset_builder()
            .with_data(&[10i64, 20, 30][..])
            .create("id")
            .expect("id");
        g.new_dataset_builder()
            .with_data(&[1.0f64, 1.0, 1.0][..])
            .create("m")
            .expect("m");
        for col in ["vx", "vy", "vz", "x", "y", "z"] {
            g.new_dataset_builder()
                .with_data(&[0.0f64, 0.0, 0.0][..])
                .create(col)
                .expect("column");
        }
    }

    let out = root.join("ns_history.csv");
    let cfg = ExtractConfig::new(archive, RemnantClass::NeutronStar)
        .with_workers(1)
        .with_output(&out);

    let src = SnapshotFile::open(&cfg.input)?;
    let keys = catalog::scan(&src)?;
    drop(src);
    assert_eq!(keys.len(), 1);

    let rows = extract_all(&cfg, &keys)?;
    assert!(rows.is_empty(), "no kw=13 particles in the fixture");

    let written = write_history(&cfg.output, cfg.remnant, &rows)?;
    assert_eq!(written, 0);
    assert!(!out.exists(), "empty run must not create the table");

    Ok(())
}

#[test]
fn archive_without_snapshots_is_a_clean_noop() -> Result<()> {
    let root = unique_root("no-snaps");
    fs::create_dir_all(&root)?;
    let archive = root.join("snapdata.h5");
    {
        let file = hdf5::File::create(&archive).expect("create archive");
        // Посторонняя группа — в каталог не попадает.
        file.create_group("metadata").expect("group");
    }

    let cfg = ExtractConfig::new(archive, RemnantClass::BlackHole).with_workers(1);
    let src = SnapshotFile::open(&cfg.input)?;
    let keys = catalog::scan(&src)?;
    drop(src);
    assert!(keys.is_empty());

    let rows = extract_all(&cfg, &keys)?;
    assert!(rows.is_empty());
    Ok(())
}

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("sstest-{}-{}-{}", prefix, pid, t))
}

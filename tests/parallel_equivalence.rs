//! Пул воркеров не теряет и не дублирует строки: результат параллельного
//! прогона совпадает с последовательным по-снапшотным фильтром.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use SnapSieve::catalog;
use SnapSieve::config::ExtractConfig;
use SnapSieve::driver::{extract_all, process_snapshot};
use SnapSieve::remnant::RemnantClass;
use SnapSieve::snapshot::{RemnantRow, SnapshotColumns};
use SnapSieve::source::SnapshotFile;

const SNAPSHOTS: usize = 24;

#[test]
fn parallel_matches_sequential() -> Result<()> {
    let root = unique_root("par-eq");
    fs::create_dir_all(&root)?;
    let archive = root.join("snapdata.h5");

    let mut rng = oorandom::Rand64::new(0x5eed_cafe);
    {
        let file = hdf5::File::create(&archive).expect("create archive");
        for i in 0..SNAPSHOTS {
            let n = 20 + (rng.rand_u64() % 80) as usize;
            let cols = random_snapshot(&mut rng, n, i as f64 * 0.5);
            write_snapshot(&file, &format!("snap_{}", i), &cols);
        }
    }

    let cfg = ExtractConfig::new(archive, RemnantClass::BlackHole)
        .with_mass_factor(127_918.2)
        .with_workers(4);

    let src = SnapshotFile::open(&cfg.input)?;
    let keys = catalog::scan(&src)?;
    drop(src);
    assert_eq!(keys.len(), SNAPSHOTS);

    let parallel = extract_all(&cfg, &keys)?;

    let mut sequential = Vec::new();
    for key in &keys {
        sequential.extend(process_snapshot(&cfg, key)?);
    }
    assert!(
        !sequential.is_empty(),
        "fixture must contain at least one kw=14 particle"
    );

    // Мультимножества строк должны совпасть точно (одни и те же операции
    // над одними и теми же f64).
    let mut a = parallel;
    let mut b = sequential;
    a.sort_by_key(row_key);
    b.sort_by_key(row_key);
    assert_eq!(a, b);

    Ok(())
}

fn row_key(r: &RemnantRow) -> (u64, i64, u64) {
    (r.time_myr.to_bits(), r.id, r.mass_msun.to_bits())
}

fn random_snapshot(rng: &mut oorandom::Rand64, n: usize, time: f64) -> SnapshotColumns {
    let mut cols = SnapshotColumns {
        time,
        ..Default::default()
    };
    for i in 0..n {
        // kw 0..15: остатки (13/14) попадаются, но не доминируют.
        cols.kw.push((rng.rand_u64() % 16) as i64);
        cols.id.push(i as i64 + 1);
        cols.m.push(rng.rand_float() * 10.0);
        cols.vx.push(rng.rand_float() - 0.5);
        cols.vy.push(rng.rand_float() - 0.5);
        cols.vz.push(rng.rand_float() - 0.5);
        cols.x.push(rng.rand_float() * 100.0);
        cols.y.push(rng.rand_float() * 100.0);
        cols.z.push(rng.rand_float() * 100.0);
    }
    cols
}

fn write_snapshot(file: &hdf5::File, name: &str, cols: &SnapshotColumns) {
    let g = file.create_group(name).expect("create group");
    g.new_dataset_builder()
        .with_data(&[cols.time][..])
        .create("t")
        .expect("t");
    g.new_dataset_builder()
        .with_data(cols.kw.as_slice())
        .create("kw")
        .expect("kw");
    g.new_dataset_builder()
        .with_data(cols.id.as_slice())
        .create("id")
        .expect("id");
    g.new_dataset_builder()
        .with_data(cols.m.as_slice())
        .create("m")
        .expect("m");
    g.new_dataset_builder()
        .with_data(cols.vx.as_slice())
        .create("vx")
        .expect("vx");
    g.new_dataset_builder()
        .with_data(cols.vy.as_slice())
        .create("vy")
        .expect("vy");
    g.new_dataset_builder()
        .with_data(cols.vz.as_slice())
        .create("vz")
        .expect("vz");
    g.new_dataset_builder()
        .with_data(cols.x.as_slice())
        .create("x")
        .expect("x");
    g.new_dataset_builder()
        .with_data(cols.y.as_slice())
        .create("y")
        .expect("y");
    g.new_dataset_builder()
        .with_data(cols.z.as_slice())
        .create("z")
        .expect("z");
}

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("sstest-{}-{}-{}", prefix, pid, t))
}

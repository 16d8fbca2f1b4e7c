#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod config;
pub mod remnant;
pub mod metrics;

// Конвейер: каталог -> source -> фильтр -> driver -> отчёт
pub mod catalog;  // src/catalog.rs: выбор и числовая сортировка ключей snap_<N>
pub mod source;   // src/source/mod.rs: read-only доступ к HDF5-архиву
pub mod snapshot; // src/snapshot/mod.rs: колонки снапшота + чистый фильтр
pub mod driver;   // src/driver/mod.rs: rayon-пул, fan-out/fan-in
pub mod report;   // src/report.rs: CSV-таблица истории

// CLI (подключается бинарём snapsieve)
pub mod cli;

// Утилиты (auto_workers, fmt_elapsed, ...)
pub mod util;

// Удобные реэкспорты
pub use config::ExtractConfig;
pub use remnant::RemnantClass;
pub use catalog::{order_snapshot_keys, parse_snap_key, SnapKey};
pub use snapshot::{filter_snapshot, RemnantRow, SnapshotColumns};
pub use source::SnapshotFile;
pub use driver::{extract_all, process_snapshot};
pub use report::write_history;

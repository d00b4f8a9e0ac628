// shared fixtures for the map benchmarks
use gis_core::MapConfig;

pub const SIZE: usize = 257;
pub const SEED: i64 = 2025;

pub fn bench_config(river_count: usize) -> MapConfig {
    MapConfig {
        size: SIZE,
        river_count,
        ..MapConfig::default()
    }
}

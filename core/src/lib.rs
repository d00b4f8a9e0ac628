// core holds the noise field, terrain classification and river carving
pub mod classify;
pub mod error;
pub mod generate;
pub mod noise_field;
pub mod river;
pub mod rng;
pub mod tile;
pub mod utils;

pub use classify::{BandShares, DEFAULT_SCALE, MAX_SIZE, TerrainClassifier, ThresholdSet};
pub use error::MapError;
pub use generate::{
    DEFAULT_SIZE, GeneratedMap, MapConfig, default_river_count, generate, generate_with,
};
pub use noise_field::NoiseField;
pub use river::{CarveOutcome, Direction, RiverCarver, RiverStart};
pub use rng::TerrainRng;
pub use tile::{Grid, TileType};

// noise source that can be sampled at any continuous 2D point
pub trait NoiseGenerator {
    fn get2(&self, x: f64, y: f64) -> f64;
}

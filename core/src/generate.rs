use rand::Rng;

use crate::classify::{DEFAULT_SCALE, TerrainClassifier, ThresholdSet, check_scale, check_size};
use crate::error::{MapError, Result};
use crate::river::{CarveOutcome, RiverCarver};
use crate::rng::{self, TerrainRng};
use crate::tile::Grid;

pub const DEFAULT_SIZE: usize = 41;

// Phase tag for the side stream behind `default_river_count`
const RIVER_COUNT_PHASE: u64 = 1;

/// Parameters of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub size: usize,
    pub river_count: usize,
    pub scale: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            river_count: 1,
            scale: DEFAULT_SCALE,
        }
    }
}

impl MapConfig {
    /// Validates raw user numbers, which may be negative.
    pub fn new(size: i64, river_count: i64, scale: f64) -> Result<Self> {
        let size = usize::try_from(size)
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| {
                MapError::InvalidConfiguration(format!("map size must be positive, got {size}"))
            })?;
        check_size(size)?;
        let river_count = usize::try_from(river_count).map_err(|_| {
            MapError::InvalidConfiguration(format!(
                "river count must not be negative, got {river_count}"
            ))
        })?;
        check_scale(scale)?;
        Ok(Self {
            size,
            river_count,
            scale,
        })
    }

    pub fn validate(&self) -> Result<()> {
        check_size(self.size)?;
        check_scale(self.scale)
    }
}

/// A finished map plus what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMap {
    pub seed: i64,
    pub grid: Grid,
    pub thresholds: ThresholdSet,
    pub rivers: Vec<CarveOutcome>,
}

/// River count a front-end uses when none is given: 5..=12 up to size 100,
/// scaled with the side length beyond that. Drawn from a side stream of
/// `seed` so it stays reproducible without touching the generation stream.
pub fn default_river_count(seed: i64, size: usize) -> usize {
    let (lo, hi) = if size <= 100 {
        (5, 12)
    } else {
        (size.saturating_mul(5) / 100, size.saturating_mul(12) / 100)
    };
    rng::side_stream(seed, RIVER_COUNT_PHASE).gen_range(lo..=hi)
}

/// Builds a whole map from scratch for `seed`.
pub fn generate(seed: i64, config: &MapConfig) -> Result<GeneratedMap> {
    let mut rng = rng::stream(seed);
    generate_with(&mut rng, seed, config)
}

/// Same as [`generate`] but draws from a caller-owned stream.
/// `seed` is only recorded in the result.
pub fn generate_with(rng: &mut TerrainRng, seed: i64, config: &MapConfig) -> Result<GeneratedMap> {
    config.validate()?;

    let (mut grid, thresholds) = TerrainClassifier::classify_with(rng, config.size, config.scale)?;
    let rivers = RiverCarver::carve_many(&mut grid, rng, config.river_count);

    tracing::info!(
        seed,
        size = config.size,
        rivers = config.river_count,
        aborted = rivers.iter().filter(|o| o.aborted()).count(),
        water_max = thresholds.water_max,
        land_max = thresholds.land_max,
        forest_max = thresholds.forest_max,
        "map.generated"
    );

    Ok(GeneratedMap {
        seed,
        grid,
        thresholds,
        rivers,
    })
}

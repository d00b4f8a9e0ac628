use rand::Rng;

use crate::NoiseGenerator;
use crate::error::{MapError, Result};
use crate::noise_field::NoiseField;
use crate::rng;
use crate::tile::{Grid, TileType};

pub const DEFAULT_SCALE: f64 = 20.0;

/// Largest accepted side length; keeps `size * size` cells addressable and allocatable.
pub const MAX_SIZE: usize = 4096;

/// Upper noise bounds of the Water, Land and Forest bands.
/// Anything at or above `forest_max` falls in the River band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSet {
    pub water_max: f64,
    pub land_max: f64,
    pub forest_max: f64,
}

/// Relative widths of the four noise bands, in percent of [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandShares {
    pub water: f64,
    pub land: f64,
    pub forest: f64,
    pub river: f64,
}

impl ThresholdSet {
    // Each bound comes from a disjoint tenth-step range, so the set is ordered by construction.
    // Draw order (water, land, forest) is part of the reproducible output.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let water_max = rng.gen_range(-4..=-2) as f64 / 10.0;
        let land_max = rng.gen_range(1..=3) as f64 / 10.0;
        let forest_max = rng.gen_range(4..=6) as f64 / 10.0;
        Self {
            water_max,
            land_max,
            forest_max,
        }
    }

    pub fn tile_for(&self, v: f64) -> TileType {
        match v {
            v if v < self.water_max => TileType::Water,
            v if v < self.land_max => TileType::Land,
            v if v < self.forest_max => TileType::Forest,
            _ => TileType::River,
        }
    }

    pub fn band_shares(&self) -> BandShares {
        BandShares {
            water: (self.water_max + 1.0) / 2.0 * 100.0,
            land: (self.land_max - self.water_max) / 2.0 * 100.0,
            forest: (self.forest_max - self.land_max) / 2.0 * 100.0,
            river: (1.0 - self.forest_max) / 2.0 * 100.0,
        }
    }
}

pub(crate) fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(MapError::InvalidConfiguration(
            "map size must be at least 1".into(),
        ));
    }
    if size > MAX_SIZE {
        return Err(MapError::InvalidConfiguration(format!(
            "map size must be at most {MAX_SIZE}, got {size}"
        )));
    }
    Ok(())
}

pub(crate) fn check_scale(scale: f64) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(MapError::InvalidConfiguration(format!(
            "noise scale must be a positive number, got {scale}"
        )));
    }
    Ok(())
}

// Builds the base grid from noise before any river is carved
pub struct TerrainClassifier;

impl TerrainClassifier {
    /// Seeds a fresh stream from `seed` and classifies a `size`×`size` grid.
    pub fn classify(seed: i64, size: usize, scale: f64) -> Result<(Grid, ThresholdSet)> {
        let mut rng = rng::stream(seed);
        Self::classify_with(&mut rng, size, scale)
    }

    /// Classifies using an existing stream: noise seed first, then the three thresholds.
    pub fn classify_with<R: Rng + ?Sized>(
        rng: &mut R,
        size: usize,
        scale: f64,
    ) -> Result<(Grid, ThresholdSet)> {
        check_size(size)?;
        check_scale(scale)?;

        let noise_seed: u64 = rng.gen_range(0..=1000);
        let field = NoiseField::new(noise_seed);
        let thresholds = ThresholdSet::draw(rng);

        let grid = Self::classify_noise(&field, &thresholds, size, scale);

        tracing::debug!(
            noise_seed,
            size,
            water_max = thresholds.water_max,
            land_max = thresholds.land_max,
            forest_max = thresholds.forest_max,
            "terrain.classified"
        );
        Ok((grid, thresholds))
    }

    /// Row-major classification of any noise source sampled at (x / scale, y / scale).
    pub fn classify_noise<N: NoiseGenerator + ?Sized>(
        noise: &N,
        thresholds: &ThresholdSet,
        size: usize,
        scale: f64,
    ) -> Grid {
        let mut grid = Grid::filled(size, TileType::Land);
        for y in 0..size {
            for x in 0..size {
                let v = noise.get2(x as f64 / scale, y as f64 / scale);
                grid[(x, y)] = thresholds.tile_for(v);
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SCALE, MAX_SIZE, TerrainClassifier, ThresholdSet};
    use crate::NoiseGenerator;
    use crate::error::MapError;
    use crate::noise_field::NoiseField;
    use crate::rng;
    use crate::tile::TileType;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn thresholds_ordered_and_in_range() {
        let mut r = rng::stream(3);
        for _ in 0..200 {
            let t = ThresholdSet::draw(&mut r);
            assert!(t.water_max < t.land_max && t.land_max < t.forest_max);
            assert!((-0.4 - 1e-9..=-0.2 + 1e-9).contains(&t.water_max));
            assert!((0.1 - 1e-9..=0.3 + 1e-9).contains(&t.land_max));
            assert!((0.4 - 1e-9..=0.6 + 1e-9).contains(&t.forest_max));
        }
    }

    #[test]
    fn tile_bands() {
        let t = ThresholdSet {
            water_max: -0.3,
            land_max: 0.2,
            forest_max: 0.5,
        };
        assert_eq!(t.tile_for(-0.9), TileType::Water);
        assert_eq!(t.tile_for(-0.3), TileType::Land);
        assert_eq!(t.tile_for(0.0), TileType::Land);
        assert_eq!(t.tile_for(0.2), TileType::Forest);
        assert_eq!(t.tile_for(0.5), TileType::River);
        assert_eq!(t.tile_for(0.99), TileType::River);
    }

    #[test]
    fn band_shares_sum_to_hundred() {
        let t = ThresholdSet {
            water_max: -0.4,
            land_max: 0.1,
            forest_max: 0.6,
        };
        let s = t.band_shares();
        assert!(approx(s.water, 30.0));
        assert!(approx(s.land, 25.0));
        assert!(approx(s.forest, 25.0));
        assert!(approx(s.river, 20.0));
        assert!(approx(s.water + s.land + s.forest + s.river, 100.0));
    }

    #[test]
    fn classify_is_deterministic() {
        let a = TerrainClassifier::classify(42, 17, DEFAULT_SCALE).unwrap();
        let b = TerrainClassifier::classify(42, 17, DEFAULT_SCALE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn classify_origin_is_land() {
        // Noise is exactly zero at (0, 0), which always lies in the Land band
        for seed in [0, 7, 42, -5, 123_456] {
            let (grid, _) = TerrainClassifier::classify(seed, 3, DEFAULT_SCALE).unwrap();
            assert_eq!(grid[(0, 0)], TileType::Land);
        }
    }

    #[test]
    fn classify_rejects_zero_size() {
        let err = TerrainClassifier::classify(1, 0, DEFAULT_SCALE).unwrap_err();
        assert!(matches!(err, MapError::InvalidConfiguration(_)));
    }

    #[test]
    fn classify_rejects_bad_scale() {
        for scale in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(TerrainClassifier::classify(1, 4, scale).is_err());
        }
    }

    #[test]
    fn classify_rejects_oversized_maps() {
        let err = TerrainClassifier::classify(1, MAX_SIZE + 1, DEFAULT_SCALE).unwrap_err();
        assert!(matches!(err, MapError::InvalidConfiguration(_)));
        assert!(TerrainClassifier::classify(1, usize::MAX, DEFAULT_SCALE).is_err());
    }

    // Noise that is the same everywhere
    struct Flat(f64);

    impl NoiseGenerator for Flat {
        fn get2(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn classify_noise_uses_any_generator() {
        let t = ThresholdSet {
            water_max: -0.3,
            land_max: 0.2,
            forest_max: 0.5,
        };
        for (v, tile) in [
            (-0.8, TileType::Water),
            (0.0, TileType::Land),
            (0.3, TileType::Forest),
            (0.7, TileType::River),
        ] {
            let grid = TerrainClassifier::classify_noise(&Flat(v), &t, 4, DEFAULT_SCALE);
            assert_eq!(grid.count(tile), 16);
        }
    }

    #[test]
    fn classify_noise_matches_field_sampling() {
        let field = NoiseField::new(321);
        let t = ThresholdSet {
            water_max: -0.2,
            land_max: 0.1,
            forest_max: 0.4,
        };
        let grid = TerrainClassifier::classify_noise(&field, &t, 12, DEFAULT_SCALE);
        for y in 0..12 {
            for x in 0..12 {
                let v = field.sample(x as i64, y as i64, DEFAULT_SCALE);
                assert_eq!(grid[(x, y)], t.tile_for(v));
            }
        }
    }
}

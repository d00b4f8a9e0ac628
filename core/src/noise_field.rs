use crate::NoiseGenerator;

// Skewing/Unskewing factors for 2D simplex
const SQRT_3: f64 = 1.732_050_807_568_877_293_5;
const F2: f64 = 0.5 * (SQRT_3 - 1.0);
const G2: f64 = (3.0 - SQRT_3) / 6.0;

// Gradient directions for the 2D simplex corners
// Diagonals first, then each axis twice so `hash % 12` stays evenly spread
const GRAD2: [(i8, i8); 12] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (0, 1),
    (0, -1),
];

// Seeded single-octave simplex field sampled at integer grid cells
// The value at (x, y) only depends on the seed and (x / scale, y / scale)
#[derive(Clone)]
pub struct NoiseField {
    seed: u64,
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        // Fisher–Yates over 0..256 driven by a xorshift stream of the seed
        let mut p: Vec<u8> = (0..256).map(|i| i as u8).collect();
        let mut x = seed ^ 0x1234_5678_9ABC_DEF0_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x & 0xFF) as u8
        };
        for i in (1..256).rev() {
            let j = (rng() as usize) % (i + 1);
            p.swap(i, j);
        }
        // Duplicated so corner lookups never wrap
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        Self { seed, perm }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    // Noise for grid cell (x, y) at the given zoom; larger `scale` = smoother terrain
    pub fn sample(&self, x: i64, y: i64, scale: f64) -> f64 {
        self.raw_noise(x as f64 / scale, y as f64 / scale)
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }

    #[inline]
    fn corner(g: (i8, i8), x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t > 0.0 {
            let t_sq = t * t;
            t_sq * t_sq * Self::dot(g, x, y)
        } else {
            0.0
        }
    }

    // Raw 2D simplex noise, roughly [−1.0, +1.0]
    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        // Skew input space to find the simplex cell
        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        // Unskew back to the cell origin
        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = (self.perm[ii + self.perm[jj] as usize] as usize) % 12;
        let gi1 = (self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize) % 12;
        let gi2 = (self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize) % 12;

        let n0 = Self::corner(GRAD2[gi0], x0, y0);
        let n1 = Self::corner(GRAD2[gi1], x1, y1);
        let n2 = Self::corner(GRAD2[gi2], x2, y2);

        70.0 * (n0 + n1 + n2)
    }
}

impl NoiseGenerator for NoiseField {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.raw_noise(x, y)
    }
}

use rand::Rng;
use rand::seq::SliceRandom;

use crate::tile::{Grid, TileType};

/// Unit step of a river walk; both components in {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i64,
    pub dy: i64,
}

impl Direction {
    pub const DOWN: Direction = Direction::new(0, 1);
    pub const UP: Direction = Direction::new(0, -1);
    pub const RIGHT: Direction = Direction::new(1, 0);
    pub const LEFT: Direction = Direction::new(-1, 0);

    // Same order as the edge starts: top flows down, bottom up, left right, right left
    pub const CARDINALS: [Direction; 4] = [
        Direction::DOWN,
        Direction::UP,
        Direction::RIGHT,
        Direction::LEFT,
    ];

    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    pub fn is_vertical(self) -> bool {
        self.dx == 0
    }
}

/// Where a river begins its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverStart {
    Top,
    Bottom,
    Left,
    Right,
    // From an existing Water/River cell somewhere on the map
    Interior,
}

impl RiverStart {
    pub fn is_edge(self) -> bool {
        !matches!(self, RiverStart::Interior)
    }
}

/// Result of one carve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveOutcome {
    /// Walked off the map. `carved` counts cells newly turned into River.
    Exited { carved: usize },
    /// Stopped on a Water cell. Cells carved before it stay River.
    Aborted { carved: usize },
    /// No start cell: an interior start on a map without Water/River cells, or an empty grid.
    NoSource,
}

impl CarveOutcome {
    pub fn aborted(&self) -> bool {
        matches!(self, CarveOutcome::Aborted { .. })
    }

    pub fn carved(&self) -> usize {
        match *self {
            CarveOutcome::Exited { carved } | CarveOutcome::Aborted { carved } => carved,
            CarveOutcome::NoSource => 0,
        }
    }
}

// Equally likely steps of one river: the main direction three times,
// its two diagonal reflections, and two meanders that keep the main axis component
pub fn direction_pool(main: Direction) -> [Direction; 7] {
    let (a, b) = if main.is_vertical() {
        (Direction::new(1, main.dy), Direction::new(-1, main.dy))
    } else {
        (Direction::new(main.dx, 1), Direction::new(main.dx, -1))
    };
    [
        main,
        main,
        main,
        Direction::new(main.dy, main.dx),
        Direction::new(-main.dy, -main.dx),
        a,
        b,
    ]
}

struct RiverWalk {
    x: i64,
    y: i64,
    pool: [Direction; 7],
    start: RiverStart,
}

impl RiverWalk {
    // Start side first, then the position along it (or the wet cell), then the interior direction
    fn begin<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Self> {
        let n = grid.size() as i64;
        if n == 0 {
            return None;
        }
        let (start, x, y, main) = match rng.gen_range(0..=4) {
            0 => {
                let sources = grid.positions(TileType::is_wet);
                let &(x, y) = sources.choose(rng)?;
                let main = Direction::CARDINALS[rng.gen_range(0..Direction::CARDINALS.len())];
                (RiverStart::Interior, x as i64, y as i64, main)
            }
            1 => (RiverStart::Top, rng.gen_range(0..n), 0, Direction::DOWN),
            2 => (RiverStart::Bottom, rng.gen_range(0..n), n - 1, Direction::UP),
            3 => (RiverStart::Left, 0, rng.gen_range(0..n), Direction::RIGHT),
            _ => (RiverStart::Right, n - 1, rng.gen_range(0..n), Direction::LEFT),
        };
        Some(Self {
            x,
            y,
            pool: direction_pool(main),
            start,
        })
    }

    fn run<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> CarveOutcome {
        let mut carved = 0;
        // An interior river may sit on a lake at its first cell, it just never claims it
        let mut at_source = !self.start.is_edge();

        while grid.contains(self.x, self.y) {
            let cell = (self.x as usize, self.y as usize);
            if grid[cell] == TileType::Water {
                if !at_source {
                    return CarveOutcome::Aborted { carved };
                }
            } else if grid[cell] != TileType::River {
                grid[cell] = TileType::River;
                carved += 1;
            }
            at_source = false;

            let step = self.pool[rng.gen_range(0..self.pool.len())];
            self.x += step.dx;
            self.y += step.dy;
        }
        CarveOutcome::Exited { carved }
    }
}

// Random-walk river carving over a classified grid
pub struct RiverCarver;

impl RiverCarver {
    /// Carves a single river in place.
    pub fn carve_one<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> CarveOutcome {
        let Some(mut walk) = RiverWalk::begin(grid, rng) else {
            tracing::debug!("river.no_source");
            return CarveOutcome::NoSource;
        };
        let (sx, sy, start) = (walk.x, walk.y, walk.start);
        let outcome = walk.run(grid, rng);
        tracing::debug!(
            start = ?start,
            sx,
            sy,
            outcome = ?outcome,
            "river.carved"
        );
        outcome
    }

    /// Runs exactly `count` independent carves; aborted ones still use up their slot.
    pub fn carve_many<R: Rng + ?Sized>(
        grid: &mut Grid,
        rng: &mut R,
        count: usize,
    ) -> Vec<CarveOutcome> {
        (0..count).map(|_| Self::carve_one(grid, rng)).collect()
    }
}

use std::ops::{Index, IndexMut};

/// Category of one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Land,
    Forest,
    River,
    Water,
}

impl TileType {
    pub const ALL: [TileType; 4] = [
        TileType::Land,
        TileType::Forest,
        TileType::River,
        TileType::Water,
    ];

    // Cells an interior river may start from
    pub fn is_wet(self) -> bool {
        matches!(self, TileType::River | TileType::Water)
    }
}

/// Square tile map, row-major, indexed as `grid[(x, y)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<TileType>,
}

impl Grid {
    /// Every cell starts as `fill`, so no cell is ever unset.
    pub fn filled(size: usize, fill: TileType) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileType> {
        if x < self.size && y < self.size {
            Some(self.cells[y * self.size + x])
        } else {
            None
        }
    }

    // Signed lookup for walkers that may have stepped off the map
    pub fn get_signed(&self, x: i64, y: i64) -> Option<TileType> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as usize, y as usize)
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        let n = self.size as i64;
        (0..n).contains(&x) && (0..n).contains(&y)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileType]> {
        // chunks_exact(0) panics; an empty grid has no rows anyway
        self.cells.chunks_exact(self.size.max(1))
    }

    pub fn cells(&self) -> &[TileType] {
        &self.cells
    }

    // (x, y) of every cell matching `pred`, row-major
    pub fn positions<F>(&self, pred: F) -> Vec<(usize, usize)>
    where
        F: Fn(TileType) -> bool,
    {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, t)| pred(**t))
            .map(|(i, _)| (i % self.size, i / self.size))
            .collect()
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = TileType;

    fn index(&self, (x, y): (usize, usize)) -> &TileType {
        assert!(
            x < self.size && y < self.size,
            "cell ({x}, {y}) outside {0}x{0} grid",
            self.size
        );
        &self.cells[y * self.size + x]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut TileType {
        assert!(
            x < self.size && y < self.size,
            "cell ({x}, {y}) outside {0}x{0} grid",
            self.size
        );
        &mut self.cells[y * self.size + x]
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, TileType};

    #[test]
    fn grid_indexing_is_row_major() {
        let mut g = Grid::filled(3, TileType::Land);
        g[(2, 0)] = TileType::Water;
        g[(0, 1)] = TileType::Forest;
        assert_eq!(g.cells()[2], TileType::Water);
        assert_eq!(g.cells()[3], TileType::Forest);
        let rows: Vec<_> = g.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], TileType::Forest);
    }

    #[test]
    fn grid_bounds() {
        let g = Grid::filled(4, TileType::Land);
        assert!(g.contains(0, 0));
        assert!(g.contains(3, 3));
        assert!(!g.contains(4, 0));
        assert!(!g.contains(0, -1));
        assert_eq!(g.get_signed(-1, 2), None);
        assert_eq!(g.get(3, 4), None);
    }

    #[test]
    fn grid_positions_and_counts() {
        let mut g = Grid::filled(5, TileType::Land);
        g[(1, 2)] = TileType::Water;
        g[(4, 4)] = TileType::River;
        assert_eq!(g.positions(TileType::is_wet), vec![(1, 2), (4, 4)]);
        assert_eq!(g.count(TileType::Land), 23);
    }

    #[test]
    #[should_panic]
    fn grid_index_out_of_range_panics() {
        let g = Grid::filled(2, TileType::Land);
        let _ = g[(2, 0)];
    }
}

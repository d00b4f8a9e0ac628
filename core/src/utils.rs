use image::{Rgb, RgbImage};
use palette::Srgb;

use crate::tile::{Grid, TileType};

// Colour of a tile in image exports
pub fn tile_color(tile: TileType) -> [u8; 3] {
    let c: Srgb<f32> = match tile {
        TileType::Land => Srgb::new(0.86, 0.78, 0.35),
        TileType::Forest => Srgb::new(0.13, 0.55, 0.13),
        TileType::River => Srgb::new(0.12, 0.45, 0.95),
        TileType::Water => Srgb::new(0.0, 0.2, 0.6),
    };
    let c = c.into_format::<u8>();
    [c.red, c.green, c.blue]
}

// Row-major RGB byte buffer, three bytes per tile
pub fn to_tile_rgb(grid: &Grid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(grid.cells().len() * 3);
    for &t in grid.cells() {
        buf.extend_from_slice(&tile_color(t));
    }
    buf
}

// One pixel per tile, scaled up by `cell_px` so small maps stay visible
pub fn to_tile_image(grid: &Grid, cell_px: u32) -> RgbImage {
    let cell_px = cell_px.max(1);
    let side = grid.size() as u32 * cell_px;
    RgbImage::from_fn(side, side, |px, py| {
        let tile = grid[((px / cell_px) as usize, (py / cell_px) as usize)];
        Rgb(tile_color(tile))
    })
}

#[cfg(test)]
mod tests {
    use super::{tile_color, to_tile_image, to_tile_rgb};
    use crate::tile::{Grid, TileType};

    #[test]
    fn colors_are_distinct() {
        for (i, a) in TileType::ALL.iter().enumerate() {
            for b in &TileType::ALL[i + 1..] {
                assert_ne!(tile_color(*a), tile_color(*b));
            }
        }
    }

    #[test]
    fn rgb_buffer_layout() {
        let mut g = Grid::filled(2, TileType::Land);
        g[(1, 0)] = TileType::Water;
        let buf = to_tile_rgb(&g);
        assert_eq!(buf.len(), 12);
        assert_eq!(&buf[3..6], &tile_color(TileType::Water));
    }

    #[test]
    fn image_is_scaled() {
        let mut g = Grid::filled(3, TileType::Forest);
        g[(2, 2)] = TileType::River;
        let img = to_tile_image(&g, 4);
        assert_eq!(img.dimensions(), (12, 12));
        assert_eq!(img.get_pixel(11, 11).0, tile_color(TileType::River));
        assert_eq!(img.get_pixel(7, 7).0, tile_color(TileType::Forest));
    }
}

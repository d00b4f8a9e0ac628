use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use gis_core::{Grid, TileType};

const BLOCK_GLYPH: char = '■';

/// How one tile appears on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileStyle {
    pub glyph: char,
    pub color: Color,
}

pub fn tile_style(tile: TileType) -> TileStyle {
    match tile {
        TileType::Land => TileStyle {
            glyph: 'L',
            color: Color::Yellow,
        },
        TileType::Forest => TileStyle {
            glyph: 'F',
            color: Color::Green,
        },
        TileType::River => TileStyle {
            glyph: 'R',
            color: Color::Blue,
        },
        TileType::Water => TileStyle {
            glyph: 'W',
            color: Color::Blue,
        },
    }
}

// Letter mode pads every glyph to two columns so the map stays square on screen
fn cell_text(style: TileStyle, block: bool) -> String {
    if block {
        BLOCK_GLYPH.to_string()
    } else {
        format!("{:2}", style.glyph)
    }
}

pub fn clear_screen<W: Write>(out: &mut W) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

pub fn print_grid<W: Write>(out: &mut W, grid: &Grid, block: bool) -> std::io::Result<()> {
    queue!(out, SetAttribute(Attribute::Bold))?;
    for row in grid.rows() {
        // Only emit a colour change when the tile colour changes
        let mut current = None;
        for &tile in row {
            let style = tile_style(tile);
            if current != Some(style.color) {
                queue!(out, SetForegroundColor(style.color))?;
                current = Some(style.color);
            }
            queue!(out, Print(cell_text(style, block)))?;
        }
        queue!(out, Print("\n"))?;
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor, Print("\n"))?;
    out.flush()
}

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use gis_core::{
    GeneratedMap, MapConfig, MapError, default_river_count, generate, utils::to_tile_image,
};
use thiserror::Error;

use crate::render::{clear_screen, print_grid};

const PNG_CELL_PX: u32 = 8;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Map(#[from] MapError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Generate,
    Print,
    Random,
    Data,
    Block,
    Map,
    Seed,
    Png,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "?" | "？" => Command::Help,
            "generate" => Command::Generate,
            "print" => Command::Print,
            "r" => Command::Random,
            "data" => Command::Data,
            "block" => Command::Block,
            "map" => Command::Map,
            "seed" => Command::Seed,
            "png" => Command::Png,
            "quit" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

pub fn time_seed() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Console state: the current seed/size, display mode and last generated map.
pub struct Session {
    seed: i64,
    size: usize,
    scale: f64,
    // Fixed by the user; otherwise derived from seed and size
    rivers: Option<usize>,
    block: bool,
    map: GeneratedMap,
}

impl Session {
    pub fn new(
        seed: i64,
        size: usize,
        scale: f64,
        rivers: Option<usize>,
        block: bool,
    ) -> Result<Self, AppError> {
        let map = build(seed, size, scale, rivers)?;
        Ok(Self {
            seed,
            size,
            scale,
            rivers,
            block,
            map,
        })
    }

    pub fn map(&self) -> &GeneratedMap {
        &self.map
    }

    pub fn block(&self) -> bool {
        self.block
    }

    fn regenerate(&mut self) -> Result<(), AppError> {
        self.map = build(self.seed, self.size, self.scale, self.rivers)?;
        Ok(())
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), AppError> {
        writeln!(out, "GIS Map Maker [version 3.0]")?;
        writeln!(out, "Type '?' for help\n")?;

        loop {
            write!(out, "Command> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(());
            };
            let command = Command::parse(&line);
            if command == Command::Quit {
                writeln!(out, "Bye.")?;
                return Ok(());
            }
            // Bad input and bad sizes are reported, the session carries on
            if let Err(e) = self.handle(command, input, out) {
                tracing::warn!(error = %e, "command failed");
                writeln!(out, "Error: {}\n", e)?;
            }
        }
    }

    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), AppError> {
        match command {
            Command::Help => write_help(out)?,
            Command::Generate => {
                self.regenerate()?;
                writeln!(out, "Map generated!\n")?;
            }
            Command::Print => {
                clear_screen(out)?;
                print_grid(out, &self.map.grid, self.block)?;
            }
            Command::Random => {
                self.seed = time_seed();
                self.regenerate()?;
                clear_screen(out)?;
                print_grid(out, &self.map.grid, self.block)?;
            }
            Command::Data => self.write_data(out)?,
            Command::Block => {
                self.block = !self.block;
                let state = if self.block { "on" } else { "off" };
                writeln!(out, "Block mode: {}\n", state)?;
            }
            Command::Map => {
                write!(out, "New map size ({}): ", self.size)?;
                out.flush()?;
                let size = prompt_int(input, "size")?;
                // Validate before touching the session so a bad size keeps the old map
                let size = MapConfig::new(size, 0, self.scale)?.size;
                self.map = build(self.seed, size, self.scale, self.rivers)?;
                self.size = size;
                writeln!(out, "Size set, map regenerated!\n")?;
            }
            Command::Seed => {
                write!(out, "New seed ({}): ", self.seed)?;
                out.flush()?;
                self.seed = prompt_int(input, "seed")?;
                self.regenerate()?;
                writeln!(out, "Seed set, map regenerated!\n")?;
            }
            Command::Png => {
                let path = PathBuf::from(format!("map_{}.png", self.seed));
                to_tile_image(&self.map.grid, PNG_CELL_PX).save(&path)?;
                writeln!(out, "Saved {}\n", path.display())?;
            }
            Command::Quit => {}
            Command::Unknown => writeln!(out, "Error: unknown command, type '?' for help.\n")?,
        }
        Ok(())
    }

    fn write_data<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let t = self.map.thresholds;
        let shares = t.band_shares();
        writeln!(out, "Map size: {}", self.size)?;
        writeln!(out, "Seed: {}", self.seed)?;
        writeln!(out, "Rivers: {}", self.map.rivers.len())?;
        writeln!(
            out,
            "Water, land, forest, river bounds: ({}, {}, {}, 1)",
            t.water_max, t.land_max, t.forest_max
        )?;
        writeln!(
            out,
            "Bands: water {:.0}%, land {:.0}%, forest {:.0}%, river {:.0}%\n",
            shares.water, shares.land, shares.forest, shares.river
        )
    }
}

fn build(
    seed: i64,
    size: usize,
    scale: f64,
    rivers: Option<usize>,
) -> Result<GeneratedMap, AppError> {
    let config = MapConfig {
        size,
        river_count: rivers.unwrap_or_else(|| default_river_count(seed, size)),
        scale,
    };
    Ok(generate(seed, &config)?)
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn prompt_int<R: BufRead>(input: &mut R, what: &'static str) -> Result<i64, AppError> {
    let line = read_line(input)?.unwrap_or_default();
    line.trim()
        .parse()
        .map_err(|_| AppError::NotAnInteger(what))
}

fn write_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\nHelp:")?;
    writeln!(out, "generate - generate the map")?;
    writeln!(out, "print    - print the map")?;
    writeln!(out, "r        - new random seed, generate and print")?;
    writeln!(out, "data     - show the current parameters")?;
    writeln!(out, "block    - toggle block display mode")?;
    writeln!(out, "map      - set the map size")?;
    writeln!(out, "seed     - set the seed")?;
    writeln!(out, "png      - save the map as map_<seed>.png")?;
    writeln!(out, "quit     - exit\n")
}

#[cfg(test)]
mod tests {
    use super::{Command, Session};
    use std::io::Cursor;

    fn run(session: &mut Session, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        session.run(&mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(Command::parse("  GENERATE \n"), Command::Generate);
        assert_eq!(Command::parse("？"), Command::Help);
        assert_eq!(Command::parse("R"), Command::Random);
        assert_eq!(Command::parse("nope"), Command::Unknown);
    }

    #[test]
    fn block_toggles() {
        let mut s = Session::new(1, 9, 20.0, Some(2), false).unwrap();
        let text = run(&mut s, "block\nquit\n");
        assert!(s.block());
        assert!(text.contains("Block mode: on"));
    }

    #[test]
    fn seed_command_regenerates() {
        let mut s = Session::new(1, 11, 20.0, Some(3), false).unwrap();
        run(&mut s, "seed\n42\nquit\n");
        let expected = Session::new(42, 11, 20.0, Some(3), false).unwrap();
        assert_eq!(s.map(), expected.map());
    }

    #[test]
    fn bad_input_keeps_state() {
        let mut s = Session::new(7, 9, 20.0, Some(1), false).unwrap();
        let before = s.map().clone();
        let text = run(&mut s, "map\nabc\nmap\n0\nseed\nx\nquit\n");
        assert_eq!(s.map(), &before);
        assert!(text.contains("size must be an integer"));
        assert!(text.contains("Invalid configuration"));
        assert!(text.contains("seed must be an integer"));
    }

    #[test]
    fn huge_map_size_is_an_error_not_a_crash() {
        let mut s = Session::new(7, 9, 20.0, Some(1), false).unwrap();
        let before = s.map().clone();
        let text = run(&mut s, "map\n4294967296\nquit\n");
        assert_eq!(s.map(), &before);
        assert!(text.contains("map size must be at most"));
    }

    #[test]
    fn map_command_resizes() {
        let mut s = Session::new(3, 9, 20.0, None, false).unwrap();
        run(&mut s, "map\n15\n");
        assert_eq!(s.map().grid.size(), 15);
    }

    #[test]
    fn unknown_command_hints_help() {
        let mut s = Session::new(3, 5, 20.0, Some(0), false).unwrap();
        let text = run(&mut s, "fly\n");
        assert!(text.contains("unknown command"));
    }
}

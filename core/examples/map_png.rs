use gis_core::{MapConfig, default_river_count, generate, utils::to_tile_image};
use std::path::Path;

fn main() {
    let seed = 2025;
    let size = 129;
    let config = MapConfig {
        size,
        river_count: default_river_count(seed, size),
        ..MapConfig::default()
    };
    let map = match generate(seed, &config) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let img = to_tile_image(&map.grid, 4);
    let path = Path::new("map_2025.png");
    match img.save(path) {
        Ok(()) => println!("Saved {} rivers to {:?}", map.rivers.len(), path),
        Err(e) => eprintln!("Could not save {:?}: {}", path, e),
    }
}

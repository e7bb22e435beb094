//! Puzzle grid model and ingestion

pub mod grid;
pub mod io;

pub use grid::{Cell, GridModel, Position};
pub use io::{create_example_grids, load_grid_from_file, parse_grid_from_string, save_grid_to_file};

//! File I/O operations for puzzle grids
//!
//! Format: one row per line, fields separated by `", "`. A field is a
//! non-negative clue, `_` for an unknown cell, or `T`/`G` for a cell that
//! is already labeled as hazard or safe.

use super::{Cell, GridModel};
use crate::error::GridError;
use anyhow::{Context, Result};
use std::path::Path;

const FIELD_SEPARATOR: &str = ", ";

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<GridModel, GridError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GridError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| GridError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    parse_grid_from_string(&content)
}

/// Parse a grid from its textual representation
///
/// Leading and trailing blank lines are ignored; a blank line between rows
/// is an error.
pub fn parse_grid_from_string(content: &str) -> Result<GridModel, GridError> {
    let lines: Vec<&str> = content.lines().map(str::trim).collect();
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());

    let (Some(first), Some(last)) = (first, last) else {
        return GridModel::new(Vec::new());
    };

    let mut rows = Vec::with_capacity(last - first + 1);
    for (row_idx, line) in lines[first..=last].iter().enumerate() {
        if line.is_empty() {
            return Err(GridError::BlankLine { row: row_idx });
        }

        let row = line
            .split(FIELD_SEPARATOR)
            .enumerate()
            .map(|(col_idx, field)| parse_cell(field, row_idx, col_idx))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    GridModel::new(rows)
}

fn parse_cell(token: &str, row: usize, col: usize) -> Result<Cell, GridError> {
    match token {
        Cell::UNKNOWN_TOKEN => return Ok(Cell::Unknown),
        Cell::HAZARD_TOKEN => return Ok(Cell::Hazard),
        Cell::SAFE_TOKEN => return Ok(Cell::Safe),
        _ => {}
    }

    let invalid = || GridError::InvalidToken {
        row,
        col,
        token: token.to_string(),
    };

    // Plain decimal digits only, with an optional minus sign so negative
    // clues get their own error
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: i64 = token.parse().map_err(|_| invalid())?;
    if value < 0 {
        return Err(GridError::NegativeClue { row, col, value });
    }
    u8::try_from(value).map(Cell::Clue).map_err(|_| invalid())
}

/// Convert a grid to its textual representation
pub fn grid_to_string(grid: &GridModel) -> String {
    grid.to_string()
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &GridModel, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.display()))?;

    Ok(())
}

/// Create example puzzle files for testing
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let samples = [
        ("input_1.txt", "1, _\n_, _\n"),
        (
            "input_2.txt",
            "3, _, 2, _\n_, _, 2, _\n_, 3, 1, _\n",
        ),
        (
            "input_3.txt",
            "2, _, _, 1, _\n_, 5, 4, 2, _\n3, _, _, 2, 1\n3, _, 6, _, 1\n2, _, _, 2, 1\n",
        ),
        ("contradiction.txt", "2, 1\n_, 1\n"),
    ];

    for (name, content) in samples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let grid = parse_grid_from_string("1, _\n_, _\n").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.get(0, 0), Some(Cell::Clue(1)));
        assert_eq!(grid.count(Cell::Unknown), 3);
    }

    #[test]
    fn test_parse_labeled_tokens() {
        let grid = parse_grid_from_string("T, 2\nG, T\n").unwrap();
        assert_eq!(grid.get(0, 0), Some(Cell::Hazard));
        assert_eq!(grid.get(1, 0), Some(Cell::Safe));
        assert!(grid.is_solved());
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            parse_grid_from_string("1, _\n_, -2\n"),
            Err(GridError::NegativeClue { row: 1, col: 1, value: -2 })
        ));
        assert!(matches!(
            parse_grid_from_string("1, X\n"),
            Err(GridError::InvalidToken { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            parse_grid_from_string("1, 999\n"),
            Err(GridError::InvalidToken { .. })
        ));
        assert!(matches!(
            parse_grid_from_string("1, _\n_\n"),
            Err(GridError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_empty_content_is_empty_grid() {
        let grid = parse_grid_from_string("").unwrap();
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.cols(), 0);
    }

    #[test]
    fn test_missing_file_is_distinct() {
        let temp_dir = tempdir().unwrap();
        let result = load_grid_from_file(temp_dir.path().join("absent.txt"));
        assert!(matches!(result, Err(GridError::NotFound(_))));
    }

    #[test]
    fn test_strict_field_format() {
        assert!(matches!(
            parse_grid_from_string("1,_\n"),
            Err(GridError::InvalidToken { row: 0, col: 0, .. })
        ));
        assert!(matches!(
            parse_grid_from_string("+1, _\n"),
            Err(GridError::InvalidToken { row: 0, col: 0, .. })
        ));
        assert!(matches!(
            parse_grid_from_string("1, _\n\n_, _\n"),
            Err(GridError::BlankLine { row: 1 })
        ));

        // Surrounding blank lines and CRLF endings are tolerated
        let grid = parse_grid_from_string("\n1, _\r\n_, _\r\n\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
    }

    #[test]
    fn test_unreadable_path_is_distinct() {
        let temp_dir = tempdir().unwrap();
        let result = load_grid_from_file(temp_dir.path());
        assert!(matches!(result, Err(GridError::Unreadable { .. })));

        let binary = temp_dir.path().join("binary.txt");
        std::fs::write(&binary, [0xff, 0xfe, 0x31]).unwrap();
        assert!(matches!(
            load_grid_from_file(&binary),
            Err(GridError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/grid.txt");

        let original = parse_grid_from_string("2, _, T\nG, _, 1\n").unwrap();
        save_grid_to_file(&original, &file_path).unwrap();

        let loaded = load_grid_from_file(&file_path).unwrap();
        assert_eq!(original, loaded);
        assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "2, _, T\nG, _, 1\n");
    }

    #[test]
    fn test_create_example_grids() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("input_1.txt").exists());
        assert!(temp_dir.path().join("contradiction.txt").exists());

        let grid = load_grid_from_file(temp_dir.path().join("input_3.txt")).unwrap();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 5);
    }
}

//! Grid representation for the gem hunter puzzle

use crate::error::GridError;
use serde::Serialize;
use std::fmt;

/// A `(row, col)` coordinate on the grid
pub type Position = (usize, usize);

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// Number of hazards among the eight surrounding cells
    Clue(u8),
    /// Undetermined cell, backed by a SAT variable during encoding
    Unknown,
    /// Trap
    Hazard,
    /// Gem
    Safe,
}

impl Cell {
    pub const UNKNOWN_TOKEN: &'static str = "_";
    pub const HAZARD_TOKEN: &'static str = "T";
    pub const SAFE_TOKEN: &'static str = "G";

    pub fn is_clue(&self) -> bool {
        matches!(self, Cell::Clue(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Clue(n) => write!(f, "{}", n),
            Cell::Unknown => f.write_str(Self::UNKNOWN_TOKEN),
            Cell::Hazard => f.write_str(Self::HAZARD_TOKEN),
            Cell::Safe => f.write_str(Self::SAFE_TOKEN),
        }
    }
}

/// Rectangular, read-only matrix of cells with precomputed 8-neighborhoods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    #[serde(skip)]
    neighbors: Vec<Vec<Position>>,
}

impl GridModel {
    /// Build a grid from row vectors; every row must have the same length
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: i,
                    found: row.len(),
                    expected: width,
                });
            }
        }

        let cells = rows.into_iter().flatten().collect();
        Ok(Self::from_parts(height, width, cells))
    }

    /// A grid with no rows and no columns
    pub fn empty() -> Self {
        Self::from_parts(0, 0, Vec::new())
    }

    fn from_parts(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        let mut neighbors = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                neighbors.push(Self::compute_neighbors(rows, cols, row, col));
            }
        }

        Self {
            rows,
            cols,
            cells,
            neighbors,
        }
    }

    fn compute_neighbors(rows: usize, cols: usize, row: usize, col: usize) -> Vec<Position> {
        let mut positions = Vec::with_capacity(8);

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let r = row as isize + dr;
                let c = col as isize + dc;

                if r >= 0 && r < rows as isize && c >= 0 && c < cols as isize {
                    positions.push((r as usize, c as usize));
                }
            }
        }

        positions
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Cell at coordinates, `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Neighbor positions (Chebyshev distance 1); empty for out-of-range input
    pub fn neighbors(&self, row: usize, col: usize) -> &[Position] {
        match self.index(row, col) {
            Some(idx) => &self.neighbors[idx],
            None => &[],
        }
    }

    pub fn is_clue(&self, row: usize, col: usize) -> bool {
        self.clue_value(row, col).is_some()
    }

    pub fn clue_value(&self, row: usize, col: usize) -> Option<u8> {
        match self.get(row, col) {
            Some(Cell::Clue(n)) => Some(n),
            _ => None,
        }
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
    }

    /// Positions and cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.positions().zip(self.cells.iter().copied())
    }

    /// Copy of the grid with every cell passed through `f`
    pub fn map_cells<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Position, Cell) -> Cell,
    {
        let cells = self.iter().map(|(pos, cell)| f(pos, cell)).collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
            neighbors: self.neighbors.clone(),
        }
    }

    pub fn count(&self, target: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    /// Number of `Hazard` cells around a position
    pub fn count_surrounding_hazards(&self, row: usize, col: usize) -> usize {
        self.neighbors(row, col)
            .iter()
            .filter(|&&(r, c)| self.get(r, c) == Some(Cell::Hazard))
            .count()
    }

    /// True iff every clue equals the number of hazards around it
    pub fn is_solved(&self) -> bool {
        self.iter().all(|((row, col), cell)| match cell {
            Cell::Clue(n) => self.count_surrounding_hazards(row, col) == n as usize,
            _ => true,
        })
    }

    /// Row vectors, mostly useful for display and tests
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[Cell]>::to_vec).collect()
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let line: Vec<String> = row.iter().map(Cell::to_string).collect();
            writeln!(f, "{}", line.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridModel {
        GridModel::new(vec![
            vec![Cell::Clue(1), Cell::Unknown, Cell::Unknown],
            vec![Cell::Unknown, Cell::Clue(2), Cell::Unknown],
            vec![Cell::Unknown, Cell::Unknown, Cell::Clue(0)],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = sample();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.count(Cell::Unknown), 6);
        assert!(grid.is_clue(1, 1));
        assert_eq!(grid.clue_value(1, 1), Some(2));
        assert_eq!(grid.clue_value(0, 1), None);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = GridModel::new(vec![vec![Cell::Unknown, Cell::Unknown], vec![Cell::Unknown]]);
        assert!(matches!(
            result,
            Err(GridError::RaggedRow { row: 1, found: 1, expected: 2 })
        ));
    }

    #[test]
    fn test_neighbor_counts() {
        let grid = sample();
        assert_eq!(grid.neighbors(1, 1).len(), 8);
        assert_eq!(grid.neighbors(0, 0).len(), 3);
        assert_eq!(grid.neighbors(0, 1).len(), 5);
        assert!(grid.neighbors(5, 5).is_empty());
    }

    #[test]
    fn test_neighbor_symmetry() {
        let grid = GridModel::new(vec![vec![Cell::Unknown; 4]; 3]).unwrap();
        for p in grid.positions() {
            for q in grid.positions() {
                let q_near_p = grid.neighbors(p.0, p.1).contains(&q);
                let p_near_q = grid.neighbors(q.0, q.1).contains(&p);
                assert_eq!(q_near_p, p_near_q, "asymmetric pair {:?} {:?}", p, q);
            }
            assert!(!grid.neighbors(p.0, p.1).contains(&p));
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = GridModel::new(Vec::new()).unwrap();
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.cols(), 0);
        assert!(grid.is_solved());
        assert_eq!(grid, GridModel::empty());
    }

    #[test]
    fn test_is_solved() {
        let solved = GridModel::new(vec![
            vec![Cell::Clue(1), Cell::Hazard],
            vec![Cell::Safe, Cell::Safe],
        ])
        .unwrap();
        assert!(solved.is_solved());

        let unsolved = GridModel::new(vec![
            vec![Cell::Clue(1), Cell::Hazard],
            vec![Cell::Hazard, Cell::Safe],
        ])
        .unwrap();
        assert!(!unsolved.is_solved());
    }

    #[test]
    fn test_map_cells_leaves_source_untouched() {
        let grid = sample();
        let mapped = grid.map_cells(|_, cell| if cell == Cell::Unknown { Cell::Safe } else { cell });
        assert_eq!(grid.count(Cell::Unknown), 6);
        assert_eq!(mapped.count(Cell::Safe), 6);
        assert_eq!(mapped.neighbors(1, 1), grid.neighbors(1, 1));
    }

    #[test]
    fn test_display() {
        let grid = GridModel::new(vec![vec![Cell::Clue(3), Cell::Hazard, Cell::Safe, Cell::Unknown]]).unwrap();
        assert_eq!(grid.to_string(), "3, T, G, _\n");
    }
}

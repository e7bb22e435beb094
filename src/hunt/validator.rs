//! Checking labeled grids against their clues

use crate::grid::{Cell, GridModel, Position};
use std::fmt;

/// Validates labeled grids
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionValidator;

/// Result of solution validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub clues_checked: usize,
    pub violations: Vec<ClueViolation>,
    /// Cells still `Unknown`; they do not affect validity
    pub unresolved_cells: usize,
}

/// A clue whose surrounding hazard count is wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueViolation {
    pub position: Position,
    pub expected: u8,
    pub actual: usize,
}

impl SolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// A grid is solved iff every clue equals the number of hazards around it
    pub fn validate(&self, labeled: &GridModel) -> ValidationResult {
        let mut violations = Vec::new();
        let mut clues_checked = 0;

        for ((row, col), cell) in labeled.iter() {
            if let Cell::Clue(expected) = cell {
                clues_checked += 1;
                let actual = labeled.count_surrounding_hazards(row, col);
                if actual != expected as usize {
                    violations.push(ClueViolation {
                        position: (row, col),
                        expected,
                        actual,
                    });
                }
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            clues_checked,
            violations,
            unresolved_cells: labeled.count(Cell::Unknown),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Clues checked: {}", self.clues_checked)?;
        if self.unresolved_cells > 0 {
            writeln!(f, "  Unresolved cells: {}", self.unresolved_cells)?;
        }
        for violation in &self.violations {
            writeln!(f, "  {}", violation)?;
        }
        Ok(())
    }
}

impl fmt::Display for ClueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clue at ({}, {}) expects {} hazard(s), found {}",
            self.position.0, self.position.1, self.expected, self.actual
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_grid_from_string;

    #[test]
    fn test_valid_grid() {
        let grid = parse_grid_from_string("1, G\nT, G\n").unwrap();
        let result = SolutionValidator::new().validate(&grid);
        assert!(result.is_valid);
        assert_eq!(result.clues_checked, 1);
        assert!(result.violations.is_empty());
        assert_eq!(result.is_valid, grid.is_solved());
    }

    #[test]
    fn test_violations_reported() {
        let grid = parse_grid_from_string("1, T\nT, 3\n").unwrap();
        let result = SolutionValidator::new().validate(&grid);

        assert!(!result.is_valid);
        assert_eq!(
            result.violations,
            vec![
                ClueViolation { position: (0, 0), expected: 1, actual: 2 },
                ClueViolation { position: (1, 1), expected: 3, actual: 2 },
            ]
        );
        assert!(result.to_string().contains("expects 3 hazard(s), found 2"));
    }

    #[test]
    fn test_unresolved_cells_counted() {
        let grid = parse_grid_from_string("0, _\n").unwrap();
        let result = SolutionValidator::new().validate(&grid);
        assert!(result.is_valid);
        assert_eq!(result.unresolved_cells, 1);
    }
}

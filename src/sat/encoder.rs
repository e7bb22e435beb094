//! Translation of a clue grid into CNF

use super::constraints::{exactly_n_clauses, Formula};
use super::VariableMap;
use crate::grid::{Cell, GridModel};
use tracing::debug;

/// Result of one encoding pass
#[derive(Debug, Clone)]
pub struct Encoding {
    pub variables: VariableMap,
    pub formula: Formula,
    pub statistics: EncodingStatistics,
}

impl Encoding {
    /// Number of SAT variables, ids run over `1..=num_vars`
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }
}

/// Walks a grid and emits one exactly-n-of-k constraint per clue
///
/// Every `Unknown` cell becomes a variable, numbered in row-major order.
/// Neighbors already labeled `Hazard` count towards the clue and lower the
/// target over the unknown neighbors; `Safe` and clue neighbors are ignored.
#[derive(Debug, Default)]
pub struct ConstraintEncoder {
    variables: VariableMap,
    formula: Formula,
    statistics: EncodingStatistics,
}

impl ConstraintEncoder {
    /// Encode a grid; each call starts from an empty variable map and formula
    pub fn encode(grid: &GridModel) -> Encoding {
        let mut encoder = Self::default();
        encoder.statistics.rows = grid.rows();
        encoder.statistics.cols = grid.cols();

        encoder.allocate_variables(grid);
        for ((row, col), cell) in grid.iter() {
            if let Cell::Clue(n) = cell {
                encoder.add_clue_constraints(grid, row, col, n);
            }
        }

        encoder.statistics.raw_clauses = encoder.formula.len();
        encoder.statistics.duplicate_clauses = encoder.formula.remove_duplicate_clauses();
        encoder.statistics.clauses = encoder.formula.len();
        encoder.statistics.variables = encoder.variables.len();

        debug!(
            variables = encoder.statistics.variables,
            clauses = encoder.statistics.clauses,
            duplicates = encoder.statistics.duplicate_clauses,
            "encoded grid"
        );

        Encoding {
            variables: encoder.variables,
            formula: encoder.formula,
            statistics: encoder.statistics,
        }
    }

    fn allocate_variables(&mut self, grid: &GridModel) {
        for (pos, cell) in grid.iter() {
            if cell == Cell::Unknown {
                self.variables.allocate(pos);
            }
        }
    }

    fn add_clue_constraints(&mut self, grid: &GridModel, row: usize, col: usize, clue: u8) {
        self.statistics.clues += 1;

        let mut vars = Vec::new();
        let mut fixed_hazards = 0isize;

        for &pos in grid.neighbors(row, col) {
            match grid.get(pos.0, pos.1) {
                Some(Cell::Unknown) => vars.extend(self.variables.variable_of(pos)),
                Some(Cell::Hazard) => fixed_hazards += 1,
                _ => {}
            }
        }

        // A labeled hazard already accounts for one unit of the clue
        let target = clue as isize - fixed_hazards;
        if target < 0 || target as usize > vars.len() {
            debug!(row, col, clue, unknowns = vars.len(), "clue cannot be satisfied");
            self.statistics.contradictions += 1;
        }

        self.formula.extend(exactly_n_clauses(&vars, target));
    }
}

/// Statistics about an encoding pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub rows: usize,
    pub cols: usize,
    pub variables: usize,
    pub clues: usize,
    pub contradictions: usize,
    pub raw_clauses: usize,
    pub duplicate_clauses: usize,
    pub clauses: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Grid size: {}x{}", self.rows, self.cols)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Clues: {}", self.clues)?;
        writeln!(f, "  Clauses: {} ({} generated, {} duplicates removed)",
                 self.clauses, self.raw_clauses, self.duplicate_clauses)?;
        if self.contradictions > 0 {
            writeln!(f, "  Contradictory clues: {}", self.contradictions)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_grid_from_string;
    use crate::sat::Clause;

    #[test]
    fn test_single_clue_scenario() {
        let grid = parse_grid_from_string("1, _\n_, _\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);

        assert_eq!(encoding.num_vars(), 3);
        assert_eq!(encoding.variables.position_of(1), Some((0, 1)));
        assert_eq!(encoding.variables.position_of(2), Some((1, 0)));
        assert_eq!(encoding.variables.position_of(3), Some((1, 1)));

        assert_eq!(
            encoding.formula.clauses(),
            &[
                Clause::new(vec![-1, -2]),
                Clause::new(vec![-1, -3]),
                Clause::new(vec![-2, -3]),
                Clause::new(vec![1, 2, 3]),
            ]
        );
        assert_eq!(encoding.statistics.clues, 1);
        assert_eq!(encoding.statistics.contradictions, 0);
    }

    #[test]
    fn test_variable_bijection() {
        let grid = parse_grid_from_string("2, _, _, 1\n_, 3, _, _\n_, _, _, 0\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);

        assert_eq!(encoding.num_vars(), grid.count(Cell::Unknown));
        for v in 1..=encoding.num_vars() as i32 {
            let pos = encoding.variables.position_of(v).unwrap();
            assert_eq!(grid.get(pos.0, pos.1), Some(Cell::Unknown));
            assert_eq!(encoding.variables.variable_of(pos), Some(v));
        }
    }

    #[test]
    fn test_row_major_allocation() {
        let grid = parse_grid_from_string("_, 1, _\n_, _, 2\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);
        let positions: Vec<_> = encoding.variables.iter().map(|(_, pos)| pos).collect();
        assert_eq!(positions, vec![(0, 0), (0, 2), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_contradiction_appends_empty_clause() {
        let grid = parse_grid_from_string("2, 1\n_, 1\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);

        assert_eq!(encoding.num_vars(), 1);
        assert!(encoding.formula.has_empty_clause());
        assert!(encoding.statistics.contradictions >= 1);
    }

    #[test]
    fn test_clues_are_never_variables() {
        let grid = parse_grid_from_string("1, 1\n1, 1\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);
        assert_eq!(encoding.num_vars(), 0);
        // Every clue has zero unknown neighbors and a target of one
        assert!(encoding.formula.has_empty_clause());
        assert_eq!(encoding.formula.len(), 1);
    }

    #[test]
    fn test_shared_neighbors_are_deduplicated() {
        // Both clues see exactly the same two unknowns
        let grid = parse_grid_from_string("1, _\n1, _\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);

        assert_eq!(encoding.num_vars(), 2);
        assert_eq!(encoding.statistics.raw_clauses, 4);
        assert_eq!(encoding.statistics.duplicate_clauses, 2);
        assert_eq!(encoding.formula.len(), 2);
    }

    #[test]
    fn test_fixed_hazard_lowers_target() {
        let grid = parse_grid_from_string("1, T\n_, _\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);
        assert_eq!(encoding.num_vars(), 2);
        assert_eq!(
            encoding.formula.clauses(),
            &[Clause::new(vec![-1]), Clause::new(vec![-2])]
        );

        let over_full = parse_grid_from_string("0, T\n_, _\n").unwrap();
        assert!(ConstraintEncoder::encode(&over_full).formula.has_empty_clause());
    }

    #[test]
    fn test_encoding_is_pure() {
        let grid = parse_grid_from_string("1, _\n_, _\n").unwrap();
        let first = ConstraintEncoder::encode(&grid);
        let second = ConstraintEncoder::encode(&grid);
        assert_eq!(first.formula, second.formula);
        assert_eq!(first.variables, second.variables);
    }

    #[test]
    fn test_statistics_display() {
        let grid = parse_grid_from_string("1, _\n_, _\n").unwrap();
        let text = ConstraintEncoder::encode(&grid).statistics.to_string();
        assert!(text.contains("Grid size: 2x2"));
        assert!(text.contains("Variables: 3"));
    }
}

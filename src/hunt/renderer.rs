//! Mapping a model back onto the puzzle grid

use crate::config::MissingVariablePolicy;
use crate::error::RenderError;
use crate::grid::{Cell, GridModel};
use crate::sat::{Model, VariableMap};
use tracing::warn;

/// Produces a labeled copy of the grid from a model
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionRenderer {
    policy: MissingVariablePolicy,
}

impl SolutionRenderer {
    pub fn new(policy: MissingVariablePolicy) -> Self {
        Self { policy }
    }

    /// Label every unknown cell `Hazard` or `Safe`; other cells pass through.
    ///
    /// An unknown cell the model does not cover becomes `Safe` or an error,
    /// depending on the policy. The input grid is never modified.
    pub fn apply(
        &self,
        grid: &GridModel,
        variables: &VariableMap,
        model: &Model,
    ) -> Result<GridModel, RenderError> {
        let mut missing = None;

        let labeled = grid.map_cells(|pos, cell| {
            if cell != Cell::Unknown {
                return cell;
            }

            let variable = variables.variable_of(pos);
            match variable.and_then(|v| model.value(v as usize)) {
                Some(true) => Cell::Hazard,
                Some(false) => Cell::Safe,
                None => {
                    if missing.is_none() {
                        missing = Some((variable.unwrap_or(0), pos));
                    }
                    Cell::Safe
                }
            }
        });

        if let Some((variable, (row, col))) = missing {
            match self.policy {
                MissingVariablePolicy::Safe => {
                    warn!(variable, row, col, "model leaves a cell unassigned, labeling it safe");
                }
                MissingVariablePolicy::Reject => {
                    return Err(RenderError::IncompleteModel { variable, row, col });
                }
            }
        }

        Ok(labeled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_grid_from_string;
    use crate::sat::ConstraintEncoder;

    #[test]
    fn test_apply_model() {
        let grid = parse_grid_from_string("1, _\n_, _\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);
        let model = Model::from_values(vec![false, true, false]);

        let labeled = SolutionRenderer::default()
            .apply(&grid, &encoding.variables, &model)
            .unwrap();

        assert_eq!(labeled.to_string(), "1, G\nT, G\n");
        assert!(labeled.is_solved());
        // Source grid untouched
        assert_eq!(grid.count(Cell::Unknown), 3);
    }

    #[test]
    fn test_short_model_defaults_to_safe() {
        let grid = parse_grid_from_string("1, _\n_, _\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);
        let model = Model::from_values(vec![true]);

        let labeled = SolutionRenderer::new(MissingVariablePolicy::Safe)
            .apply(&grid, &encoding.variables, &model)
            .unwrap();
        assert_eq!(labeled.to_string(), "1, T\nG, G\n");
    }

    #[test]
    fn test_short_model_rejected_under_strict_policy() {
        let grid = parse_grid_from_string("1, _\n_, _\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);
        let model = Model::from_values(vec![true]);

        let result = SolutionRenderer::new(MissingVariablePolicy::Reject)
            .apply(&grid, &encoding.variables, &model);
        assert!(matches!(
            result,
            Err(RenderError::IncompleteModel { variable: 2, row: 1, col: 0 })
        ));
    }

    #[test]
    fn test_clues_pass_through() {
        let grid = parse_grid_from_string("0, 0\n0, 0\n").unwrap();
        let encoding = ConstraintEncoder::encode(&grid);
        let labeled = SolutionRenderer::default()
            .apply(&grid, &encoding.variables, &Model::empty())
            .unwrap();
        assert_eq!(labeled, grid);
    }
}

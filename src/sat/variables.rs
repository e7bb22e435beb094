//! Variable management for SAT encoding

use crate::grid::Position;
use std::collections::HashMap;

/// Bijection between unknown grid positions and SAT variable ids
///
/// Ids are dense and start at 1, assigned in the order positions are
/// allocated (the encoder allocates in row-major order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    /// Map from position to SAT variable ID (positive integer)
    by_position: HashMap<Position, i32>,
    /// `positions[id - 1]` is the position of variable `id`
    positions: Vec<Position>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the variable for a position
    pub(crate) fn allocate(&mut self, position: Position) -> i32 {
        if let Some(&id) = self.by_position.get(&position) {
            return id;
        }

        self.positions.push(position);
        let id = self.positions.len() as i32;
        self.by_position.insert(position, id);
        id
    }

    /// Variable id backing a position, if the position is a variable
    pub fn variable_of(&self, position: Position) -> Option<i32> {
        self.by_position.get(&position).copied()
    }

    /// Position of a variable; the sign of a literal is ignored
    pub fn position_of(&self, literal: i32) -> Option<Position> {
        let index = (literal.unsigned_abs() as usize).checked_sub(1)?;
        self.positions.get(index).copied()
    }

    /// Number of variables allocated
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(variable, position)` pairs in ascending variable order
    pub fn iter(&self) -> impl Iterator<Item = (i32, Position)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| (i as i32 + 1, pos))
    }
}

//! CNF building blocks: clauses, formulas and cardinality constraints

use itertools::Itertools;
use std::collections::HashSet;

/// Signed variable reference; positive means "is a hazard"
pub type Literal = i32;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<Literal>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: Literal) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// The clause with no literals, which no assignment satisfies
    pub fn empty() -> Self {
        Self {
            literals: Vec::new(),
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Largest variable id mentioned, 0 for the empty clause
    pub fn max_variable(&self) -> usize {
        self.literals
            .iter()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }

    /// True if some literal holds under `value`, which maps a variable id to its truth value
    pub fn is_satisfied_by<F>(&self, mut value: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        self.literals
            .iter()
            .any(|&lit| value(lit.unsigned_abs() as usize) == (lit > 0))
    }

    /// Order-independent key used for duplicate detection
    fn set_key(&self) -> Vec<Literal> {
        let mut key = self.literals.clone();
        key.sort_unstable();
        key.dedup();
        key
    }
}

/// Conjunction of clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn extend<I: IntoIterator<Item = Clause>>(&mut self, clauses: I) {
        self.clauses.extend(clauses);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// An empty clause makes the whole formula unsatisfiable
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Largest variable id mentioned by any clause
    pub fn max_variable(&self) -> usize {
        self.clauses.iter().map(Clause::max_variable).max().unwrap_or(0)
    }

    /// Drop clauses that are set-equal to an earlier clause, keeping first occurrences in place.
    /// Returns the number of clauses removed.
    pub fn remove_duplicate_clauses(&mut self) -> usize {
        let before = self.clauses.len();
        let mut seen = HashSet::with_capacity(before);
        self.clauses.retain(|clause| seen.insert(clause.set_key()));
        before - self.clauses.len()
    }
}

/// Clauses forcing exactly `n` of `vars` to be true.
///
/// `n` outside `0..=vars.len()` yields a single empty clause. Otherwise
/// "at most n" is expressed as one all-negative clause per `(n + 1)`-subset
/// and "at least n" as one all-positive clause per `(k - n + 1)`-subset,
/// both enumerated in lexicographic order over `vars`.
pub fn exactly_n_clauses(vars: &[i32], n: isize) -> Vec<Clause> {
    let k = vars.len();
    if n < 0 || n as usize > k {
        return vec![Clause::empty()];
    }
    let n = n as usize;

    let mut clauses = Vec::new();

    if n < k {
        clauses.extend(
            vars.iter()
                .combinations(n + 1)
                .map(|combo| Clause::new(combo.into_iter().map(|&var| -var).collect())),
        );
    }

    if n > 0 {
        clauses.extend(
            vars.iter()
                .combinations(k - n + 1)
                .map(|combo| Clause::new(combo.into_iter().copied().collect())),
        );
    }

    clauses
}

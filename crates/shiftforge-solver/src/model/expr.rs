//! Linear expressions over boolean variables.

use super::BoolVar;

/// `sum(coef * var) + constant`.
///
/// # Examples
///
/// ```
/// use shiftforge_solver::{CpModel, LinearExpr};
///
/// let mut model = CpModel::new("expr");
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// let working = model.new_bool_var("working");
///
/// // a + b - working == 0
/// model.add_eq(LinearExpr::sum([a, b]).minus(working), 0);
/// assert_eq!(model.constraint_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(BoolVar, i64)>,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// The unweighted sum of `vars`.
    pub fn sum(vars: impl IntoIterator<Item = BoolVar>) -> Self {
        vars.into_iter().collect()
    }

    /// The weighted sum of `(var, coef)` pairs.
    pub fn weighted_sum(terms: impl IntoIterator<Item = (BoolVar, i64)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }

    pub fn add_term(mut self, var: BoolVar, coef: i64) -> Self {
        self.terms.push((var, coef));
        self
    }

    pub fn plus(self, var: BoolVar) -> Self {
        self.add_term(var, 1)
    }

    pub fn minus(self, var: BoolVar) -> Self {
        self.add_term(var, -1)
    }

    pub fn plus_constant(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    pub fn terms(&self) -> &[(BoolVar, i64)] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub(crate) fn into_parts(self) -> (Vec<(BoolVar, i64)>, i64) {
        (self.terms, self.constant)
    }
}

impl From<BoolVar> for LinearExpr {
    fn from(var: BoolVar) -> Self {
        Self {
            terms: vec![(var, 1)],
            constant: 0,
        }
    }
}

impl FromIterator<BoolVar> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = BoolVar>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(|var| (var, 1)).collect(),
            constant: 0,
        }
    }
}

//! Constraint model: boolean variables, literals, linear expressions and
//! constraints.
//!
//! Every constraint is either a bounded linear sum over boolean variables
//! (`lower <= sum(coef * var) <= upper`) or an implication between two
//! literals. Exactly-one, equality, fixing and inequalities all lower to the
//! linear form.

mod expr;

use std::fmt;

use thiserror::Error;

pub use expr::LinearExpr;

/// A boolean decision variable of one [`CpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoolVar(u32);

impl BoolVar {
    pub(crate) fn from_index(index: usize) -> Self {
        BoolVar(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::ops::Not for BoolVar {
    type Output = Literal;

    /// The negated literal of this variable.
    #[inline]
    fn not(self) -> Literal {
        Literal::negative(self)
    }
}

impl fmt::Display for BoolVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    var: BoolVar,
    negated: bool,
}

impl Literal {
    #[inline]
    pub fn positive(var: BoolVar) -> Self {
        Self {
            var,
            negated: false,
        }
    }

    #[inline]
    pub fn negative(var: BoolVar) -> Self {
        Self { var, negated: true }
    }

    #[inline]
    pub fn var(self) -> BoolVar {
        self.var
    }

    #[inline]
    pub fn is_negated(self) -> bool {
        self.negated
    }

    #[inline]
    pub fn negate(self) -> Self {
        Self {
            var: self.var,
            negated: !self.negated,
        }
    }

    /// The variable value that makes this literal true.
    #[inline]
    pub fn satisfying_value(self) -> bool {
        !self.negated
    }

    /// Evaluates the literal under a variable value.
    #[inline]
    pub fn eval(self, value: bool) -> bool {
        value != self.negated
    }
}

impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        Literal::positive(var)
    }
}

/// A model constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `lower <= sum(coef * var) <= upper`.
    Linear {
        terms: Vec<(BoolVar, i64)>,
        lower: i64,
        upper: i64,
    },
    /// `premise => conclusion`.
    Implication { premise: Literal, conclusion: Literal },
}

impl Constraint {
    /// Variables the constraint mentions, with repetitions.
    pub fn variables(&self) -> Vec<BoolVar> {
        match self {
            Constraint::Linear { terms, .. } => terms.iter().map(|&(var, _)| var).collect(),
            Constraint::Implication {
                premise,
                conclusion,
            } => vec![premise.var(), conclusion.var()],
        }
    }

    /// Checks the constraint against a complete assignment.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        match self {
            Constraint::Linear {
                terms,
                lower,
                upper,
            } => {
                let sum: i64 = terms
                    .iter()
                    .filter(|&&(var, _)| values[var.index()])
                    .map(|&(_, coef)| coef)
                    .sum();
                *lower <= sum && sum <= *upper
            }
            Constraint::Implication {
                premise,
                conclusion,
            } => {
                !premise.eval(values[premise.var().index()])
                    || conclusion.eval(values[conclusion.var().index()])
            }
        }
    }
}

/// Reasons a model is rejected before search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("constraint {constraint} references unknown variable {var}")]
    UnknownVariable { constraint: usize, var: usize },

    #[error("constraint {constraint} has empty bounds [{lower}, {upper}]")]
    EmptyBounds {
        constraint: usize,
        lower: i64,
        upper: i64,
    },

    #[error("constraint {constraint} has coefficients too large to sum")]
    CoefficientOverflow { constraint: usize },

    #[error("decision strategy references unknown variable {var}")]
    UnknownDecisionVariable { var: usize },
}

/// A boolean constraint model.
///
/// Variables are created through the model and are only meaningful for it.
/// Branching follows the decision strategies in insertion order, then every
/// remaining variable in creation order.
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    name: String,
    variable_names: Vec<String>,
    constraints: Vec<Constraint>,
    decision_strategies: Vec<Vec<BoolVar>>,
}

impl CpModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a new boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        let var = BoolVar(self.variable_names.len() as u32);
        self.variable_names.push(name.into());
        var
    }

    pub fn variable_count(&self) -> usize {
        self.variable_names.len()
    }

    pub fn variable_name(&self, var: BoolVar) -> Option<&str> {
        self.variable_names.get(var.index()).map(String::as_str)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn decision_strategies(&self) -> &[Vec<BoolVar>] {
        &self.decision_strategies
    }

    /// Adds `lower <= expr <= upper`.
    pub fn add_linear(&mut self, expr: LinearExpr, lower: i64, upper: i64) {
        let (terms, constant) = expr.into_parts();
        self.constraints.push(Constraint::Linear {
            terms: merge_terms(terms),
            lower: lower.saturating_sub(constant),
            upper: upper.saturating_sub(constant),
        });
    }

    /// Adds `expr == value`.
    pub fn add_eq(&mut self, expr: LinearExpr, value: i64) {
        self.add_linear(expr, value, value);
    }

    /// Adds `expr <= value`.
    pub fn add_le(&mut self, expr: LinearExpr, value: i64) {
        self.add_linear(expr, i64::MIN, value);
    }

    /// Adds `expr >= value`.
    pub fn add_ge(&mut self, expr: LinearExpr, value: i64) {
        self.add_linear(expr, value, i64::MAX);
    }

    /// Adds the constraint that exactly one of `vars` is true.
    pub fn add_exactly_one(&mut self, vars: impl IntoIterator<Item = BoolVar>) {
        self.add_eq(LinearExpr::sum(vars), 1);
    }

    /// Adds `premise => conclusion`.
    pub fn add_implication(&mut self, premise: impl Into<Literal>, conclusion: impl Into<Literal>) {
        self.constraints.push(Constraint::Implication {
            premise: premise.into(),
            conclusion: conclusion.into(),
        });
    }

    /// Fixes a variable to a value.
    pub fn add_fixed(&mut self, var: BoolVar, value: bool) {
        self.add_eq(LinearExpr::from(var), i64::from(value));
    }

    /// Branches on `vars`, in order, before any variable not named by an
    /// earlier strategy.
    pub fn add_decision_strategy(&mut self, vars: impl IntoIterator<Item = BoolVar>) {
        self.decision_strategies.push(vars.into_iter().collect());
    }

    /// Checks that the model is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] found.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.variable_count();
        for (index, constraint) in self.constraints.iter().enumerate() {
            if let Some(var) = constraint.variables().into_iter().find(|v| v.index() >= n) {
                return Err(ModelError::UnknownVariable {
                    constraint: index,
                    var: var.index(),
                });
            }
            if let Constraint::Linear {
                terms,
                lower,
                upper,
            } = constraint
            {
                if lower > upper {
                    return Err(ModelError::EmptyBounds {
                        constraint: index,
                        lower: *lower,
                        upper: *upper,
                    });
                }
                let magnitude = terms
                    .iter()
                    .try_fold(0i64, |acc, &(_, coef)| acc.checked_add(coef.checked_abs()?));
                if magnitude.is_none() {
                    return Err(ModelError::CoefficientOverflow { constraint: index });
                }
            }
        }
        for strategy in &self.decision_strategies {
            if let Some(var) = strategy.iter().find(|v| v.index() >= n) {
                return Err(ModelError::UnknownDecisionVariable { var: var.index() });
            }
        }
        Ok(())
    }

    /// Checks a complete assignment against every constraint.
    ///
    /// Returns false when `values` does not cover every variable.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.variable_count()
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }
}

/// Combines repeated variables into one term and drops zero coefficients,
/// keeping first-occurrence order.
fn merge_terms(terms: Vec<(BoolVar, i64)>) -> Vec<(BoolVar, i64)> {
    let mut merged: Vec<(BoolVar, i64)> = Vec::with_capacity(terms.len());
    for (var, coef) in terms {
        match merged.iter_mut().find(|(v, _)| *v == var) {
            Some((_, existing)) => *existing = existing.saturating_add(coef),
            None => merged.push((var, coef)),
        }
    }
    merged.retain(|&(_, coef)| coef != 0);
    merged
}

#[cfg(test)]
mod tests;

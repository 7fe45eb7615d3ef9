//! Assignment state, trail, propagation and conflict analysis.
//!
//! Every forced value records the rule that forced it. On a conflict those
//! reasons are walked back to the first unique implication point of the
//! current decision level; the resulting clause is learned and the search
//! jumps back to the second-highest level it mentions.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::model::{BoolVar, Constraint, CpModel, Literal};

/// True literals that together violate one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Conflict {
    literals: Vec<Literal>,
}

/// A clause derived from a conflict.
///
/// `clause[0]` is the asserting literal: every other literal is false at
/// `backjump_level`, so after jumping there the clause forces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LearnedClause {
    pub(super) clause: Vec<Literal>,
    pub(super) backjump_level: usize,
}

// Which side of a linear constraint an explanation has to account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Upper,
    Lower,
    Both,
}

#[derive(Debug, Clone, Copy)]
enum Reason {
    Decision,
    Rule { index: usize, bound: Bound },
}

enum Rule<'m> {
    Linear {
        terms: &'m [(BoolVar, i64)],
        lower: i64,
        upper: i64,
    },
    Implication {
        premise: Literal,
        conclusion: Literal,
    },
    // At least one literal is true.
    Clause(Vec<Literal>),
}

enum ClauseState {
    Satisfied,
    Open,
    Unit(Literal),
    Falsified(Vec<Literal>),
}

pub(super) struct SearchState<'m> {
    // Model constraints first, learned clauses after.
    rules: Vec<Rule<'m>>,
    model_rules: usize,
    values: Vec<Option<bool>>,
    level: Vec<usize>,
    reason: Vec<Reason>,
    trail_pos: Vec<usize>,
    // Assigned variables in assignment order.
    trail: Vec<BoolVar>,
    // Trail length at the start of each decision level.
    trail_lim: Vec<usize>,
    // Rule indices per variable.
    watches: Vec<SmallVec<[usize; 8]>>,
    queue: VecDeque<usize>,
    in_queue: Vec<bool>,
    seen: Vec<bool>,
}

impl<'m> SearchState<'m> {
    pub(super) fn new(model: &'m CpModel) -> Self {
        let count = model.variable_count();
        let mut rules = Vec::with_capacity(model.constraint_count());
        let mut watches: Vec<SmallVec<[usize; 8]>> = vec![SmallVec::new(); count];
        for (index, constraint) in model.constraints().iter().enumerate() {
            for var in constraint.variables() {
                let list = &mut watches[var.index()];
                if list.last() != Some(&index) {
                    list.push(index);
                }
            }
            rules.push(match constraint {
                Constraint::Linear {
                    terms,
                    lower,
                    upper,
                } => Rule::Linear {
                    terms: terms.as_slice(),
                    lower: *lower,
                    upper: *upper,
                },
                Constraint::Implication {
                    premise,
                    conclusion,
                } => Rule::Implication {
                    premise: *premise,
                    conclusion: *conclusion,
                },
            });
        }

        Self {
            in_queue: vec![false; rules.len()],
            model_rules: rules.len(),
            rules,
            values: vec![None; count],
            level: vec![0; count],
            reason: vec![Reason::Decision; count],
            trail_pos: vec![0; count],
            trail: Vec::with_capacity(count),
            trail_lim: Vec::new(),
            watches,
            queue: VecDeque::new(),
            seen: vec![false; count],
        }
    }

    #[inline]
    pub(super) fn value(&self, var: BoolVar) -> Option<bool> {
        self.values[var.index()]
    }

    pub(super) fn decision_level(&self) -> usize {
        self.trail_lim.len()
    }

    pub(super) fn learned_count(&self) -> usize {
        self.rules.len() - self.model_rules
    }

    /// Queues every rule, for the root propagation.
    pub(super) fn enqueue_all(&mut self) {
        for index in 0..self.rules.len() {
            self.enqueue(index);
        }
    }

    /// Opens a new decision level and assigns `var`.
    pub(super) fn decide(&mut self, var: BoolVar, value: bool) {
        self.trail_lim.push(self.trail.len());
        self.assign(var, value, Reason::Decision);
    }

    /// Undoes every assignment above `level`.
    pub(super) fn backjump(&mut self, level: usize) {
        if level < self.trail_lim.len() {
            let mark = self.trail_lim[level];
            self.trail_lim.truncate(level);
            while self.trail.len() > mark {
                if let Some(var) = self.trail.pop() {
                    self.values[var.index()] = None;
                }
            }
        }
        self.clear_queue();
    }

    /// Runs queued rules to a fixpoint.
    ///
    /// Returns the number of values forced.
    pub(super) fn propagate(&mut self) -> Result<u64, Conflict> {
        let mut forced = 0;
        while let Some(index) = self.queue.pop_front() {
            self.in_queue[index] = false;
            let result = match self.rules[index] {
                Rule::Linear {
                    terms,
                    lower,
                    upper,
                } => self.propagate_linear(index, terms, lower, upper),
                Rule::Implication {
                    premise,
                    conclusion,
                } => self.propagate_implication(index, premise, conclusion),
                Rule::Clause(_) => self.propagate_clause(index),
            };
            match result {
                Ok(count) => forced += count,
                Err(conflict) => {
                    self.clear_queue();
                    return Err(conflict);
                }
            }
        }
        Ok(forced)
    }

    /// Derives a clause from `conflict` by first-UIP resolution.
    ///
    /// Returns `None` when the conflict holds without any decision, which
    /// proves the model infeasible.
    pub(super) fn analyze(&mut self, conflict: Conflict) -> Option<LearnedClause> {
        let conflict_level = conflict
            .literals
            .iter()
            .map(|lit| self.level[lit.var().index()])
            .max()
            .unwrap_or(0);
        if conflict_level == 0 {
            return None;
        }
        // Resolve at the deepest level the conflict mentions.
        self.backjump(conflict_level);

        let mut clause: Vec<Literal> = Vec::new();
        let mut pending = conflict.literals;
        let mut open = 0usize;
        let mut position = self.trail.len();

        let uip = loop {
            for lit in pending.drain(..) {
                let i = lit.var().index();
                if self.seen[i] || self.level[i] == 0 {
                    continue;
                }
                self.seen[i] = true;
                if self.level[i] == conflict_level {
                    open += 1;
                } else {
                    clause.push(lit.negate());
                }
            }

            let var = loop {
                position -= 1;
                let var = self.trail[position];
                if self.seen[var.index()] {
                    break var;
                }
            };
            self.seen[var.index()] = false;
            open -= 1;
            if open == 0 {
                break var;
            }
            pending = self.explain(var);
        };

        for lit in &clause {
            self.seen[lit.var().index()] = false;
        }
        let backjump_level = clause
            .iter()
            .map(|lit| self.level[lit.var().index()])
            .max()
            .unwrap_or(0);
        clause.insert(0, self.true_literal(uip).negate());

        Some(LearnedClause {
            clause,
            backjump_level,
        })
    }

    /// Jumps back, stores the clause and assigns its asserting literal.
    pub(super) fn learn(&mut self, learned: LearnedClause) {
        self.backjump(learned.backjump_level);
        let mut clause = learned.clause;
        // Watch the asserting literal and the one falsified last.
        let deepest = (1..clause.len()).max_by_key(|&k| self.level[clause[k].var().index()]);
        if let Some(k) = deepest {
            clause.swap(1, k);
        }
        let index = self.rules.len();
        for lit in clause.iter().take(2) {
            self.watches[lit.var().index()].push(index);
        }
        let asserting = clause[0];
        self.rules.push(Rule::Clause(clause));
        self.in_queue.push(false);
        self.assign(
            asserting.var(),
            asserting.satisfying_value(),
            Reason::Rule {
                index,
                bound: Bound::Both,
            },
        );
    }

    /// Returns the assignment once every variable has a value.
    pub(super) fn solution(&self) -> Option<Vec<bool>> {
        self.values.iter().copied().collect()
    }

    fn assign(&mut self, var: BoolVar, value: bool, reason: Reason) {
        let i = var.index();
        debug_assert!(self.values[i].is_none());
        self.values[i] = Some(value);
        self.level[i] = self.decision_level();
        self.reason[i] = reason;
        self.trail_pos[i] = self.trail.len();
        self.trail.push(var);
        for w in 0..self.watches[i].len() {
            let index = self.watches[i][w];
            self.enqueue(index);
        }
    }

    fn enqueue(&mut self, index: usize) {
        if !self.in_queue[index] {
            self.in_queue[index] = true;
            self.queue.push_back(index);
        }
    }

    fn clear_queue(&mut self) {
        for index in self.queue.drain(..) {
            self.in_queue[index] = false;
        }
    }

    fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.var()).map(|v| lit.eval(v))
    }

    // The literal of an assigned variable that currently holds.
    fn true_literal(&self, var: BoolVar) -> Literal {
        match self.value(var) {
            Some(false) => Literal::negative(var),
            _ => Literal::positive(var),
        }
    }

    /// True literals that forced `var`, all assigned before it.
    fn explain(&self, var: BoolVar) -> Vec<Literal> {
        let Reason::Rule { index, bound } = self.reason[var.index()] else {
            return Vec::new();
        };
        match &self.rules[index] {
            Rule::Linear { terms, .. } => {
                let before = self.trail_pos[var.index()];
                self.linear_literals(terms, bound, |other| {
                    other != var && self.trail_pos[other.index()] < before
                })
            }
            Rule::Implication {
                premise,
                conclusion,
            } => {
                if conclusion.var() == var {
                    vec![*premise]
                } else {
                    vec![conclusion.negate()]
                }
            }
            Rule::Clause(literals) => literals
                .iter()
                .filter(|lit| lit.var() != var)
                .map(|lit| lit.negate())
                .collect(),
        }
    }

    // True literals of the assigned terms that push the sum toward `bound`.
    fn linear_literals(
        &self,
        terms: &[(BoolVar, i64)],
        bound: Bound,
        include: impl Fn(BoolVar) -> bool,
    ) -> Vec<Literal> {
        terms
            .iter()
            .filter_map(|&(var, coef)| {
                let value = self.value(var)?;
                let raises_min = (value && coef > 0) || (!value && coef < 0);
                let lowers_max = (value && coef < 0) || (!value && coef > 0);
                let relevant = match bound {
                    Bound::Upper => raises_min,
                    Bound::Lower => lowers_max,
                    Bound::Both => raises_min || lowers_max,
                };
                (relevant && include(var)).then(|| self.true_literal(var))
            })
            .collect()
    }

    fn linear_conflict(&self, terms: &[(BoolVar, i64)], bound: Bound) -> Conflict {
        Conflict {
            literals: self.linear_literals(terms, bound, |_| true),
        }
    }

    fn propagate_linear(
        &mut self,
        index: usize,
        terms: &[(BoolVar, i64)],
        lower: i64,
        upper: i64,
    ) -> Result<u64, Conflict> {
        let (mut min, mut max) = (0i64, 0i64);
        for &(var, coef) in terms {
            match self.value(var) {
                Some(true) => {
                    min += coef;
                    max += coef;
                }
                Some(false) => {}
                None if coef > 0 => max += coef,
                None => min += coef,
            }
        }
        if min > upper {
            return Err(self.linear_conflict(terms, Bound::Upper));
        }
        if max < lower {
            return Err(self.linear_conflict(terms, Bound::Lower));
        }

        let mut forced = 0;
        for &(var, coef) in terms {
            if self.value(var).is_some() {
                continue;
            }
            // Bounds without this term's slack.
            let base_min = min - coef.min(0);
            let base_max = max - coef.max(0);
            let true_over = base_min + coef > upper;
            let true_under = base_max + coef < lower;
            let false_over = base_min > upper;
            let false_under = base_max < lower;
            let (value, bound) = match (true_over || true_under, false_over || false_under) {
                (false, false) => continue,
                (false, true) => (true, if false_over { Bound::Upper } else { Bound::Lower }),
                (true, false) => (false, if true_over { Bound::Upper } else { Bound::Lower }),
                (true, true) => return Err(self.linear_conflict(terms, Bound::Both)),
            };
            let contribution = if value { coef } else { 0 };
            min = base_min + contribution;
            max = base_max + contribution;
            self.assign(var, value, Reason::Rule { index, bound });
            forced += 1;
        }
        Ok(forced)
    }

    fn propagate_implication(
        &mut self,
        index: usize,
        premise: Literal,
        conclusion: Literal,
    ) -> Result<u64, Conflict> {
        let reason = Reason::Rule {
            index,
            bound: Bound::Both,
        };
        match (self.literal_value(premise), self.literal_value(conclusion)) {
            (Some(true), Some(false)) => Err(Conflict {
                literals: vec![premise, conclusion.negate()],
            }),
            (Some(true), None) => {
                self.assign(conclusion.var(), conclusion.satisfying_value(), reason);
                Ok(1)
            }
            (None, Some(false)) => {
                self.assign(premise.var(), !premise.satisfying_value(), reason);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    // Learned clauses keep two watched literals at positions 0 and 1.
    fn propagate_clause(&mut self, index: usize) -> Result<u64, Conflict> {
        let mut literals = match &mut self.rules[index] {
            Rule::Clause(literals) => std::mem::take(literals),
            _ => return Ok(0),
        };
        let state = self.watch_clause(index, &mut literals);
        self.rules[index] = Rule::Clause(literals);

        match state {
            ClauseState::Satisfied | ClauseState::Open => Ok(0),
            ClauseState::Unit(lit) => {
                self.assign(
                    lit.var(),
                    lit.satisfying_value(),
                    Reason::Rule {
                        index,
                        bound: Bound::Both,
                    },
                );
                Ok(1)
            }
            ClauseState::Falsified(literals) => Err(Conflict { literals }),
        }
    }

    // Moves false watches onto non-false literals where possible, then
    // classifies the clause from its two watches.
    fn watch_clause(&mut self, index: usize, literals: &mut [Literal]) -> ClauseState {
        let watched = literals.len().min(2);
        for w in 0..watched {
            if self.literal_value(literals[w]) != Some(false) {
                continue;
            }
            let replacement =
                (2..literals.len()).find(|&k| self.literal_value(literals[k]) != Some(false));
            if let Some(k) = replacement {
                self.watches[literals[w].var().index()].retain(|rule| *rule != index);
                self.watches[literals[k].var().index()].push(index);
                literals.swap(w, k);
            }
        }

        let values: SmallVec<[Option<bool>; 2]> = literals[..watched]
            .iter()
            .map(|&lit| self.literal_value(lit))
            .collect();
        if values.contains(&Some(true)) {
            return ClauseState::Satisfied;
        }
        match values.iter().position(Option::is_none) {
            Some(w) if values.iter().filter(|v| v.is_none()).count() == 1 => {
                ClauseState::Unit(literals[w])
            }
            Some(_) => ClauseState::Open,
            None => ClauseState::Falsified(literals.iter().map(|lit| lit.negate()).collect()),
        }
    }
}

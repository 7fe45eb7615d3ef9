//! Depth-first search with propagation, clause learning and backjumping.

mod state;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shiftforge_config::{EnvironmentMode, SolverConfig, ValueSelectionType};
use tracing::{debug, info, warn};

use crate::model::{BoolVar, CpModel};
use crate::response::{CpSolverResponse, CpSolverStatus};
use crate::scope::SearchScope;
use crate::solver::ConstraintSolver;
use crate::termination::{
    NoTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};

use state::SearchState;

/// Termination assembled from a [`SolverConfig`].
pub type ConfiguredTermination =
    OrTermination<(Option<TimeTermination>, Option<NodeCountTermination>)>;

/// Seed used by reproducible modes when the config names none.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

const PROGRESS_INTERVAL: u64 = 10_000;

/// A propagating depth-first solver with conflict-driven clause learning.
///
/// Each branching decision assigns one variable and propagates to a
/// fixpoint. A conflict is resolved into a learned clause, the search jumps
/// back to the level where that clause becomes unit, and propagation resumes
/// from there. A conflict that needs no decision proves infeasibility. The
/// first complete assignment is returned; with no objective it is reported
/// as [`CpSolverStatus::Optimal`].
///
/// # Example
///
/// ```
/// use shiftforge_config::SolverConfig;
/// use shiftforge_solver::{BacktrackingSolver, ConstraintSolver, CpModel, CpSolverStatus};
///
/// let mut model = CpModel::new("pick");
/// let vars: Vec<_> = (0..4).map(|i| model.new_bool_var(format!("v{i}"))).collect();
/// model.add_exactly_one(vars.iter().copied());
///
/// let solver = BacktrackingSolver::from_config(&SolverConfig::new().with_node_limit(100));
/// let response = solver.solve(&model);
/// assert_eq!(response.status(), CpSolverStatus::Optimal);
/// assert_eq!(vars.iter().filter(|&&v| response.value(v) == Some(true)).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackingSolver<T = NoTermination> {
    termination: T,
    value_selection: ValueSelectionType,
    random_seed: Option<u64>,
    time_limit: Option<Duration>,
}

impl BacktrackingSolver<NoTermination> {
    /// Creates a solver that runs to completion, trying `true` first.
    pub fn new() -> Self {
        Self {
            termination: NoTermination,
            value_selection: ValueSelectionType::MaxValueFirst,
            random_seed: None,
            time_limit: None,
        }
    }
}

impl Default for BacktrackingSolver<NoTermination> {
    fn default() -> Self {
        Self::new()
    }
}

impl BacktrackingSolver<ConfiguredTermination> {
    /// Creates a solver from a config's termination, search and seed settings.
    pub fn from_config(config: &SolverConfig) -> Self {
        let time_limit = config.time_limit();
        let termination = OrTermination::new((
            time_limit.map(TimeTermination::new),
            config.node_limit().map(NodeCountTermination::new),
        ));
        let random_seed = match config.environment_mode {
            EnvironmentMode::NonReproducible => config.random_seed,
            EnvironmentMode::Reproducible | EnvironmentMode::FullAssert => {
                Some(config.random_seed.unwrap_or(DEFAULT_RANDOM_SEED))
            }
        };

        Self {
            termination,
            value_selection: config.search.value_selection,
            random_seed,
            time_limit,
        }
    }
}

impl<T: Termination> BacktrackingSolver<T> {
    /// Replaces the termination condition.
    pub fn with_termination<T2: Termination>(self, termination: T2) -> BacktrackingSolver<T2> {
        BacktrackingSolver {
            termination,
            value_selection: self.value_selection,
            random_seed: self.random_seed,
            time_limit: self.time_limit,
        }
    }

    /// Keeps the current termination and also stops once `extra` fires.
    pub fn with_additional_termination<T2: Termination>(
        self,
        extra: T2,
    ) -> BacktrackingSolver<OrTermination<(T, T2)>> {
        BacktrackingSolver {
            termination: OrTermination::new((self.termination, extra)),
            value_selection: self.value_selection,
            random_seed: self.random_seed,
            time_limit: self.time_limit,
        }
    }

    pub fn with_value_selection(mut self, value_selection: ValueSelectionType) -> Self {
        self.value_selection = value_selection;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn termination(&self) -> &T {
        &self.termination
    }

    fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn first_value(&self, rng: &mut StdRng) -> bool {
        match self.value_selection {
            ValueSelectionType::MaxValueFirst => true,
            ValueSelectionType::MinValueFirst => false,
            ValueSelectionType::Random => rng.random_bool(0.5),
        }
    }

    fn search(&self, model: &CpModel, scope: &mut SearchScope) -> (CpSolverStatus, Vec<bool>) {
        let mut state = SearchState::new(model);
        let order = branching_order(model);
        let mut rng = self.rng();

        state.enqueue_all();
        loop {
            match state.propagate() {
                Ok(forced) => scope.add_propagations(forced),
                Err(conflict) => {
                    scope.increment_conflict_count();
                    match state.analyze(conflict) {
                        Some(learned) => {
                            state.learn(learned);
                            continue;
                        }
                        None => return (CpSolverStatus::Infeasible, Vec::new()),
                    }
                }
            }

            let Some(var) = order.iter().copied().find(|&v| state.value(v).is_none()) else {
                return match state.solution() {
                    Some(values) if model.is_satisfied_by(&values) => {
                        debug!(
                            event = "search_complete",
                            learned_clauses = state.learned_count(),
                        );
                        (CpSolverStatus::Optimal, values)
                    }
                    _ => (CpSolverStatus::Unknown, Vec::new()),
                };
            };

            if self.termination.is_terminated(scope) {
                return (CpSolverStatus::Unknown, Vec::new());
            }
            let value = self.first_value(&mut rng);
            scope.increment_branch_count();
            if scope.branch_count() % PROGRESS_INTERVAL == 0 {
                debug!(
                    event = "search_progress",
                    nodes = scope.branch_count(),
                    depth = state.decision_level(),
                    learned_clauses = state.learned_count(),
                );
            }
            state.decide(var, value);
            scope.record_depth(state.decision_level());
        }
    }
}

impl<T: Termination> ConstraintSolver for BacktrackingSolver<T> {
    fn solve(&self, model: &CpModel) -> CpSolverResponse {
        if let Err(err) = model.validate() {
            warn!(event = "model_invalid", model = model.name(), error = %err);
            return CpSolverResponse::invalid(err);
        }

        info!(
            event = "solve_start",
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            time_limit_ms = self.time_limit.map_or(0, |d| d.as_millis() as u64),
        );

        let mut scope = SearchScope::new();
        let (status, values) = self.search(model, &mut scope);
        let statistics = scope.finish();

        info!(
            event = "solve_end",
            status = %status,
            nodes = statistics.branches,
            conflicts = statistics.conflicts,
            propagations = statistics.propagations,
            duration_ms = statistics.wall_time.as_millis() as u64,
        );

        if status.has_solution() {
            CpSolverResponse::solved(status, values, statistics)
        } else {
            CpSolverResponse::without_solution(status, statistics)
        }
    }

    fn name(&self) -> &'static str {
        "backtracking"
    }
}

/// Decision strategy variables first, in order and without repeats, then
/// every variable in creation order.
fn branching_order(model: &CpModel) -> Vec<BoolVar> {
    let mut seen = vec![false; model.variable_count()];
    let mut order = Vec::with_capacity(model.variable_count());
    let strategies = model.decision_strategies().iter().flatten().copied();
    let all = (0..model.variable_count()).map(BoolVar::from_index);
    for var in strategies.chain(all) {
        if !seen[var.index()] {
            seen[var.index()] = true;
            order.push(var);
        }
    }
    order
}

#[cfg(test)]
mod tests;

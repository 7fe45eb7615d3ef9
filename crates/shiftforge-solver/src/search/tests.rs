use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::*;
use crate::model::{LinearExpr, ModelError};
use crate::termination::ExternalTermination;

fn pigeonhole(pigeons: usize, holes: usize) -> CpModel {
    let mut model = CpModel::new("pigeonhole");
    add_pigeonhole(&mut model, pigeons, holes);
    model
}

fn add_pigeonhole(model: &mut CpModel, pigeons: usize, holes: usize) -> Vec<Vec<BoolVar>> {
    let vars: Vec<Vec<BoolVar>> = (0..pigeons)
        .map(|p| {
            (0..holes)
                .map(|h| model.new_bool_var(format!("p{p}_h{h}")))
                .collect()
        })
        .collect();
    for row in &vars {
        model.add_exactly_one(row.iter().copied());
    }
    for h in 0..holes {
        model.add_le(LinearExpr::sum(vars.iter().map(|row| row[h])), 1);
    }
    vars
}

#[test]
fn test_empty_model_is_optimal() {
    let model = CpModel::new("empty");
    let response = BacktrackingSolver::new().solve(&model);

    assert_eq!(response.status(), CpSolverStatus::Optimal);
    assert!(response.values().is_empty());
}

#[test]
fn test_root_conflict_is_infeasible() {
    let mut model = CpModel::new("root");
    let x = model.new_bool_var("x");
    model.add_fixed(x, true);
    model.add_fixed(x, false);

    let response = BacktrackingSolver::new().solve(&model);
    assert_eq!(response.status(), CpSolverStatus::Infeasible);
    assert_eq!(response.value(x), None);
    assert_eq!(response.statistics().branches, 0);
}

#[test]
fn test_invalid_model_is_reported() {
    let mut model = CpModel::new("invalid");
    let x = model.new_bool_var("x");
    model.add_linear(LinearExpr::from(x), 2, 1);

    let response = BacktrackingSolver::new().solve(&model);
    assert_eq!(response.status(), CpSolverStatus::ModelInvalid);
    assert!(matches!(
        response.invalid_reason(),
        Some(ModelError::EmptyBounds { .. })
    ));
}

#[test]
fn test_implication_propagation() {
    let mut model = CpModel::new("implication");
    let x = model.new_bool_var("x");
    let y = model.new_bool_var("y");
    let z = model.new_bool_var("z");
    model.add_implication(x, y);
    model.add_implication(y, !z);
    model.add_fixed(z, true);

    let response = BacktrackingSolver::new().solve(&model);
    assert_eq!(response.status(), CpSolverStatus::Optimal);
    assert_eq!(response.value(x), Some(false));
    assert_eq!(response.value(y), Some(false));
    assert_eq!(response.value(z), Some(true));
    assert_eq!(response.statistics().branches, 0);
}

#[test]
fn test_pigeonhole_feasible() {
    let model = pigeonhole(4, 4);
    let response = BacktrackingSolver::new().solve(&model);

    assert_eq!(response.status(), CpSolverStatus::Optimal);
    assert!(model.is_satisfied_by(response.values()));
}

#[test]
fn test_pigeonhole_infeasible() {
    let model = pigeonhole(4, 3);
    let response = BacktrackingSolver::new().solve(&model);

    assert_eq!(response.status(), CpSolverStatus::Infeasible);
    assert!(response.statistics().conflicts > 0);
}

#[test]
fn test_conflict_behind_free_choices_is_refuted() {
    let mut model = CpModel::new("late_conflict");
    let mut free = Vec::new();
    for i in 0..40 {
        let a = model.new_bool_var(format!("a{i}"));
        let b = model.new_bool_var(format!("b{i}"));
        model.add_exactly_one([a, b]);
        free.extend([a, b]);
    }
    // 2^40 combinations are branched before the unsatisfiable part.
    model.add_decision_strategy(free);
    add_pigeonhole(&mut model, 5, 4);

    let solver = BacktrackingSolver::new().with_termination(NodeCountTermination::new(200_000));
    let response = solver.solve(&model);

    assert_eq!(response.status(), CpSolverStatus::Infeasible);
    assert!(response.statistics().branches < 200_000);
}

#[test]
fn test_learned_clauses_keep_solutions() {
    let mut model = CpModel::new("late_feasible");
    let mut free = Vec::new();
    for i in 0..20 {
        let a = model.new_bool_var(format!("a{i}"));
        let b = model.new_bool_var(format!("b{i}"));
        model.add_exactly_one([a, b]);
        free.extend([a, b]);
    }
    model.add_decision_strategy(free);
    let holes = add_pigeonhole(&mut model, 5, 5);
    let last = model.new_bool_var("last");
    // Forces the first pigeon out of hole 0, which the max-first order tries first.
    model.add_implication(holes[0][0], last);
    model.add_implication(last, !holes[0][0]);

    let response = BacktrackingSolver::new().solve(&model);
    assert_eq!(response.status(), CpSolverStatus::Optimal);
    assert!(model.is_satisfied_by(response.values()));
    assert!(response.statistics().conflicts > 0);
}

#[test]
fn test_value_selection_orders() {
    let mut model = CpModel::new("free");
    let x = model.new_bool_var("x");

    let max_first = BacktrackingSolver::new().solve(&model);
    assert_eq!(max_first.value(x), Some(true));

    let min_first = BacktrackingSolver::new()
        .with_value_selection(ValueSelectionType::MinValueFirst)
        .solve(&model);
    assert_eq!(min_first.value(x), Some(false));
}

#[test]
fn test_random_selection_is_reproducible_with_seed() {
    let model = pigeonhole(5, 5);
    let solver = BacktrackingSolver::new()
        .with_value_selection(ValueSelectionType::Random)
        .with_random_seed(42);

    let first = solver.solve(&model);
    let second = solver.solve(&model);
    assert_eq!(first.status(), CpSolverStatus::Optimal);
    assert_eq!(first.values(), second.values());
    assert!(model.is_satisfied_by(first.values()));
}

#[test]
fn test_decision_strategy_is_branched_first() {
    let mut model = CpModel::new("strategy");
    let x = model.new_bool_var("x");
    let y = model.new_bool_var("y");
    model.add_exactly_one([x, y]);
    model.add_decision_strategy([y]);

    let response = BacktrackingSolver::new().solve(&model);
    assert_eq!(response.value(y), Some(true));
    assert_eq!(response.value(x), Some(false));
}

#[test]
fn test_node_limit_reports_unknown() {
    let model = pigeonhole(4, 4);
    let solver = BacktrackingSolver::new().with_termination(NodeCountTermination::new(0));

    let response = solver.solve(&model);
    assert_eq!(response.status(), CpSolverStatus::Unknown);
    assert!(!response.has_solution());
}

#[test]
fn test_external_termination_reports_unknown() {
    let flag = Arc::new(AtomicBool::new(true));
    let solver =
        BacktrackingSolver::new().with_termination(ExternalTermination::new(Arc::clone(&flag)));

    let response = solver.solve(&pigeonhole(3, 3));
    assert_eq!(response.status(), CpSolverStatus::Unknown);
}

#[test]
fn test_additional_termination_keeps_configured_limits() {
    let config = SolverConfig::new().with_node_limit(1_000);
    let flag = Arc::new(AtomicBool::new(false));
    let solver = BacktrackingSolver::from_config(&config)
        .with_additional_termination(ExternalTermination::new(Arc::clone(&flag)));

    assert_eq!(solver.solve(&pigeonhole(3, 3)).status(), CpSolverStatus::Optimal);

    flag.store(true, Ordering::SeqCst);
    assert_eq!(solver.solve(&pigeonhole(3, 3)).status(), CpSolverStatus::Unknown);

    let limited = BacktrackingSolver::from_config(&SolverConfig::new().with_node_limit(0))
        .with_additional_termination(ExternalTermination::new(Arc::new(AtomicBool::new(false))));
    assert_eq!(limited.solve(&pigeonhole(3, 3)).status(), CpSolverStatus::Unknown);
}

#[test]
fn test_from_config() {
    let config = SolverConfig::new()
        .with_node_limit(5)
        .with_environment_mode(EnvironmentMode::Reproducible);
    let solver = BacktrackingSolver::from_config(&config);

    assert_eq!(solver.random_seed, Some(DEFAULT_RANDOM_SEED));
    assert!(solver.termination().0 .0.is_none());
    assert_eq!(
        solver.termination().0 .1.as_ref().map(NodeCountTermination::limit),
        Some(5)
    );
}

#[test]
fn test_branching_order_dedupes_strategies() {
    let mut model = CpModel::new("order");
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");
    let c = model.new_bool_var("c");
    model.add_decision_strategy([c, a]);
    model.add_decision_strategy([a, c]);

    assert_eq!(branching_order(&model), vec![c, a, b]);
}

#[test]
fn test_status_codes() {
    assert_eq!(CpSolverStatus::Unknown.code(), 0);
    assert_eq!(CpSolverStatus::ModelInvalid.code(), 1);
    assert_eq!(CpSolverStatus::Feasible.code(), 2);
    assert_eq!(CpSolverStatus::Infeasible.code(), 3);
    assert_eq!(CpSolverStatus::Optimal.code(), 4);
    assert_eq!(CpSolverStatus::Optimal.to_string(), "OPTIMAL");
}

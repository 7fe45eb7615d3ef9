use super::*;

#[test]
fn test_new_bool_var_assigns_sequential_indices() {
    let mut model = CpModel::new("vars");
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");

    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(model.variable_count(), 2);
    assert_eq!(model.variable_name(b), Some("b"));
    assert_eq!(model.name(), "vars");
}

#[test]
fn test_literal_eval() {
    let mut model = CpModel::new("lit");
    let x = model.new_bool_var("x");

    let pos = Literal::from(x);
    let neg = !x;
    assert!(pos.eval(true));
    assert!(!pos.eval(false));
    assert!(neg.eval(false));
    assert!(!neg.eval(true));
    assert_eq!(neg.negate(), pos);
    assert!(!neg.satisfying_value());
}

#[test]
fn test_add_linear_moves_constant_into_bounds() {
    let mut model = CpModel::new("linear");
    let x = model.new_bool_var("x");
    model.add_eq(LinearExpr::from(x).plus_constant(2), 3);

    assert_eq!(
        model.constraints()[0],
        Constraint::Linear {
            terms: vec![(x, 1)],
            lower: 1,
            upper: 1,
        }
    );
}

#[test]
fn test_add_linear_merges_repeated_variables() {
    let mut model = CpModel::new("merge");
    let x = model.new_bool_var("x");
    let y = model.new_bool_var("y");
    model.add_le(LinearExpr::sum([x, y, x]).minus(y), 2);

    match &model.constraints()[0] {
        Constraint::Linear { terms, .. } => assert_eq!(terms, &vec![(x, 2)]),
        other => panic!("unexpected constraint {other:?}"),
    }
}

#[test]
fn test_is_satisfied_by() {
    let mut model = CpModel::new("check");
    let x = model.new_bool_var("x");
    let y = model.new_bool_var("y");
    model.add_exactly_one([x, y]);
    model.add_implication(x, !y);

    assert!(model.is_satisfied_by(&[true, false]));
    assert!(model.is_satisfied_by(&[false, true]));
    assert!(!model.is_satisfied_by(&[true, true]));
    assert!(!model.is_satisfied_by(&[false, false]));
    assert!(!model.is_satisfied_by(&[true]));
}

#[test]
fn test_validate_accepts_well_formed_model() {
    let mut model = CpModel::new("ok");
    let x = model.new_bool_var("x");
    model.add_fixed(x, true);
    model.add_decision_strategy([x]);

    assert_eq!(model.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_foreign_variable() {
    let mut other = CpModel::new("other");
    other.new_bool_var("a");
    let foreign = other.new_bool_var("b");

    let mut model = CpModel::new("model");
    model.new_bool_var("x");
    model.add_fixed(foreign, true);

    assert_eq!(
        model.validate(),
        Err(ModelError::UnknownVariable {
            constraint: 0,
            var: 1
        })
    );
}

#[test]
fn test_validate_rejects_empty_bounds() {
    let mut model = CpModel::new("empty");
    let x = model.new_bool_var("x");
    model.add_linear(LinearExpr::from(x), 1, 0);

    assert!(matches!(
        model.validate(),
        Err(ModelError::EmptyBounds { constraint: 0, .. })
    ));
}

#[test]
fn test_validate_rejects_unknown_decision_variable() {
    let mut other = CpModel::new("other");
    let foreign = other.new_bool_var("a");

    let mut model = CpModel::new("model");
    model.add_decision_strategy([foreign]);

    assert_eq!(
        model.validate(),
        Err(ModelError::UnknownDecisionVariable { var: 0 })
    );
}

#[test]
fn test_validate_rejects_coefficient_overflow() {
    let mut model = CpModel::new("overflow");
    let x = model.new_bool_var("x");
    let y = model.new_bool_var("y");
    model.add_le(LinearExpr::weighted_sum([(x, i64::MAX), (y, i64::MAX)]), 0);

    assert_eq!(
        model.validate(),
        Err(ModelError::CoefficientOverflow { constraint: 0 })
    );
}

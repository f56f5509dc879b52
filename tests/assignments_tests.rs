//! Engine-state unit tests: construction, completion, the structural
//! transition, materialization ranges, and the description query.

use std::rc::Rc;

use theoria::{
    build_default_supplier_registry, Assignments, ConstructSpec, DeclaredNames, ErrorCategory,
    Fixture, ParamSpec, PotentialValue, Value, ValueType,
};

fn engine_for(fixture: Fixture, method: &ConstructSpec) -> Assignments {
    Assignments::all_unassigned(
        method,
        Rc::new(fixture),
        Rc::new(DeclaredNames),
        Rc::new(build_default_supplier_registry()),
    )
}

fn number_param(name: &str) -> ParamSpec {
    ParamSpec::new(name, ValueType::Number)
}

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn initial_state_queues_constructor_params_before_method_params() {
        let fixture = Fixture::new("Calc").with_constructor(
            ConstructSpec::new("Calc", "new")
                .param(number_param("base"))
                .param(number_param("scale")),
        );
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"))
            .param(number_param("c"));

        let engine = engine_for(fixture, &method);

        assert_eq!(engine.assigned_count(), 0);
        assert_eq!(engine.unassigned_count(), 5);
        assert!(!engine.is_complete());
        assert_eq!(engine.next_unassigned().name, "base");
        assert_eq!(engine.next_unassigned().declared_in, "Calc::new");
    }

    #[test]
    fn zero_parameter_theory_starts_complete() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "trivial");

        let engine = engine_for(fixture, &method);
        assert!(engine.is_complete());
        assert_eq!(engine.assigned_count() + engine.unassigned_count(), 0);
    }
}

#[cfg(test)]
mod transition_tests {
    use super::*;

    #[test]
    fn completion_requires_exactly_one_transition_per_parameter() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"));

        let mut engine = engine_for(fixture, &method);
        assert!(!engine.is_complete());

        engine = engine.assign_next(PotentialValue::of("one", Value::Number(1.0)));
        assert!(!engine.is_complete());
        assert_eq!(engine.next_unassigned().name, "b");

        engine = engine.assign_next(PotentialValue::of("two", Value::Number(2.0)));
        assert!(engine.is_complete());
        assert_eq!(engine.assigned_count(), 2);
    }

    #[test]
    fn assign_next_never_mutates_its_receiver() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"));

        let original = engine_for(fixture, &method);
        let advanced = original.assign_next(PotentialValue::of("one", Value::Number(1.0)));

        // The ancestor state stays valid and unchanged.
        assert!(!original.is_complete());
        assert_eq!(original.assigned_count(), 0);
        assert_eq!(original.unassigned_count(), 2);
        assert_eq!(original.next_unassigned().name, "a");

        assert_eq!(advanced.assigned_count(), 1);
        assert_eq!(advanced.next_unassigned().name, "b");
    }

    #[test]
    fn total_parameter_count_is_invariant_across_transitions() {
        let fixture = Fixture::new("Calc")
            .with_constructor(ConstructSpec::new("Calc", "new").param(number_param("base")));
        let method = ConstructSpec::new("Calc", "adds").param(number_param("a"));

        let mut engine = engine_for(fixture, &method);
        let total = engine.assigned_count() + engine.unassigned_count();
        assert_eq!(total, 2);

        engine = engine.assign_next(PotentialValue::of("ten", Value::Number(10.0)));
        assert_eq!(engine.assigned_count() + engine.unassigned_count(), total);

        engine = engine.assign_next(PotentialValue::of("one", Value::Number(1.0)));
        assert_eq!(engine.assigned_count() + engine.unassigned_count(), total);
    }

    #[test]
    #[should_panic(expected = "next_unassigned called on a complete assignment")]
    fn next_unassigned_on_complete_state_is_a_contract_violation() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "trivial");
        let engine = engine_for(fixture, &method);
        let _ = engine.next_unassigned();
    }
}

#[cfg(test)]
mod materialization_tests {
    use super::*;

    fn complete_engine() -> Assignments {
        // One constructor parameter, two method parameters.
        let fixture = Fixture::new("Calc")
            .with_constructor(ConstructSpec::new("Calc", "new").param(number_param("base")));
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"));

        engine_for(fixture, &method)
            .assign_next(PotentialValue::of("ten", Value::Number(10.0)))
            .assign_next(PotentialValue::of("one", Value::Number(1.0)))
            .assign_next(PotentialValue::of("two", Value::Number(2.0)))
    }

    #[test]
    fn arguments_split_at_the_constructor_parameter_count() {
        let engine = complete_engine();

        let ctor = engine.constructor_arguments(false).unwrap();
        assert_eq!(ctor, vec![Value::Number(10.0)]);

        let method = engine.method_arguments(false).unwrap();
        assert_eq!(method, vec![Value::Number(1.0), Value::Number(2.0)]);
    }

    #[test]
    fn absent_constructor_value_fails_only_the_constructor_range() {
        let fixture = Fixture::new("Calc")
            .with_constructor(ConstructSpec::new("Calc", "new").param(number_param("base")));
        let method = ConstructSpec::new("Calc", "adds").param(number_param("a"));

        let engine = engine_for(fixture, &method)
            .assign_next(PotentialValue::absent("missing base"))
            .assign_next(PotentialValue::of("one", Value::Number(1.0)));

        let err = engine.constructor_arguments(false).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.kind.category(), ErrorCategory::Recoverable);
        assert!(err.to_string().contains("missing base"));

        // The method range does not touch the absent candidate.
        assert_eq!(
            engine.method_arguments(false).unwrap(),
            vec![Value::Number(1.0)]
        );
    }

    #[test]
    fn materialization_returns_no_partial_result() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"));

        let engine = engine_for(fixture, &method)
            .assign_next(PotentialValue::of("one", Value::Number(1.0)))
            .assign_next(PotentialValue::absent("gone"));

        assert!(engine.method_arguments(false).is_err());
    }

    #[test]
    fn absent_values_materialize_as_nil_when_nulls_are_allowed() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"));

        let engine = engine_for(fixture, &method)
            .assign_next(PotentialValue::absent("gone"))
            .assign_next(PotentialValue::of("two", Value::Number(2.0)));

        let values = engine.method_arguments(true).unwrap();
        assert_eq!(values, vec![Value::Nil, Value::Number(2.0)]);
    }

    #[test]
    fn deferred_providers_are_not_evaluated_at_assignment_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "adds").param(number_param("a"));

        let evaluations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evaluations);
        let candidate = PotentialValue::deferred("counted", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(Value::Number(7.0))
        });

        let engine = engine_for(fixture, &method).assign_next(candidate);
        assert_eq!(evaluations.load(Ordering::SeqCst), 0);

        let values = engine.method_arguments(false).unwrap();
        assert_eq!(values, vec![Value::Number(7.0)]);
        assert_eq!(evaluations.load(Ordering::SeqCst), 1);
    }
}

#[cfg(test)]
mod description_tests {
    use super::*;

    #[test]
    fn descriptions_come_back_in_assignment_order() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"));

        let engine = engine_for(fixture, &method)
            .assign_next(PotentialValue::of("first", Value::Number(1.0)))
            .assign_next(PotentialValue::of("second", Value::Number(2.0)));

        assert_eq!(engine.argument_descriptions(), vec!["first", "second"]);
    }

    #[test]
    fn descriptions_never_fail_even_for_absent_candidates() {
        let fixture = Fixture::new("Calc");
        let method = ConstructSpec::new("Calc", "adds")
            .param(number_param("a"))
            .param(number_param("b"));

        let partial = engine_for(fixture, &method).assign_next(PotentialValue::absent("gone"));

        // Length tracks the number of assigned candidates, not the total.
        assert_eq!(partial.argument_descriptions(), vec!["gone"]);
    }
}

//! The enumeration engine: a potentially incomplete list of value
//! assignments for a theory method's formal parameters.
//!
//! An [`Assignments`] is an immutable value. The single transition
//! operation, [`Assignments::assign_next`], produces a new state and
//! leaves the receiver untouched, so a driver performs depth-first
//! search over the Cartesian product of per-parameter candidate lists
//! simply by keeping ancestor states alive across recursive calls.
//! The engine itself never enumerates: it only answers completion and
//! next-parameter queries, applies one structural transition at a time,
//! and materializes or describes what has been assigned so far.

use std::rc::Rc;

use im::Vector;

use crate::candidate::PotentialValue;
use crate::errors::TheoryError;
use crate::fixture::{ConstructSpec, Fixture};
use crate::signature::{signatures, ConstructKind, NameResolver, ParamSignature};
use crate::supplier::{AllMembersSupplier, ParameterSupplier, SupplierRegistry};
use crate::value::Value;

/// Immutable assignment state: candidates assigned so far plus the
/// queue of parameters still awaiting one.
///
/// Invariants, per enumeration run:
/// - `assigned_count() + unassigned_count()` is constant and equals the
///   total parameter count (constructor parameters first, then method
///   parameters, each in declaration order).
/// - The first C assigned candidates always correspond to the
///   constructor's parameters, where C is the constructor's parameter
///   count.
#[derive(Clone)]
pub struct Assignments {
    assigned: Vector<PotentialValue>,
    unassigned: Vector<ParamSignature>,
    fixture: Rc<Fixture>,
    resolver: Rc<dyn NameResolver>,
    registry: Rc<SupplierRegistry>,
}

impl Assignments {
    /// Returns a new assignment state for a theory method, with no
    /// parameters assigned: the constructor's parameters followed by
    /// the method's, in declaration order.
    pub fn all_unassigned(
        method: &ConstructSpec,
        fixture: Rc<Fixture>,
        resolver: Rc<dyn NameResolver>,
        registry: Rc<SupplierRegistry>,
    ) -> Self {
        let mut sigs = signatures(fixture.constructor(), ConstructKind::Constructor, &*resolver);
        sigs.extend(signatures(method, ConstructKind::Method, &*resolver));
        Self {
            assigned: Vector::new(),
            unassigned: sigs.into_iter().collect(),
            fixture,
            resolver,
            registry,
        }
    }

    /// True iff every parameter has been assigned a candidate. Once
    /// complete, only materialization and description queries apply;
    /// there is no transition out of a complete state.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// The next parameter awaiting assignment.
    ///
    /// Precondition: `!is_complete()`. Calling this on a complete state
    /// is a contract violation and panics.
    pub fn next_unassigned(&self) -> &ParamSignature {
        self.unassigned
            .front()
            .expect("next_unassigned called on a complete assignment")
    }

    /// Appends `source` for the next unassigned parameter, returning a
    /// new state. Purely structural: the candidate's value is not
    /// evaluated here. The receiver remains valid and unchanged.
    pub fn assign_next(&self, source: PotentialValue) -> Self {
        let mut assigned = self.assigned.clone();
        assigned.push_back(source);
        Self {
            assigned,
            unassigned: self.unassigned.skip(1),
            fixture: Rc::clone(&self.fixture),
            resolver: Rc::clone(&self.resolver),
            registry: Rc::clone(&self.registry),
        }
    }

    /// The ordered candidate list for the next unassigned parameter,
    /// obtained from its resolved supplier.
    ///
    /// Fails only with a fatal supplier-resolution error; failure here
    /// cannot be isolated to a sub-branch because it occurs before any
    /// branch for the parameter exists.
    pub fn potentials_for_next(&self) -> Result<Vec<PotentialValue>, TheoryError> {
        let signature = self.next_unassigned();
        let supplier = self.resolve_supplier(signature)?;
        Ok(supplier.value_sources(signature))
    }

    /// Resolves the supplier for one parameter: the registered custom
    /// strategy when the signature's attribute metadata designates one,
    /// the fixture-scanning default otherwise. Resolution happens once
    /// per parameter, not once per candidate.
    pub fn resolve_supplier(
        &self,
        signature: &ParamSignature,
    ) -> Result<Box<dyn ParameterSupplier>, TheoryError> {
        if let Some(supplied_by) = signature.supplied_by() {
            return self.registry.instantiate(&supplied_by.supplier);
        }
        Ok(Box::new(AllMembersSupplier::new(Rc::clone(&self.fixture))))
    }

    /// Materializes the assigned candidates in `[start, stop)`,
    /// evaluating each deferred provider in assignment order.
    ///
    /// An absent value with `nulls_allowed == false` fails the whole
    /// range with a recoverable could-not-generate error; no partial
    /// result is returned. With `nulls_allowed == true` an absent value
    /// materializes as [`Value::Nil`].
    pub fn actual_values(
        &self,
        start: usize,
        stop: usize,
        nulls_allowed: bool,
    ) -> Result<Vec<Value>, TheoryError> {
        let span = stop.saturating_sub(start);
        let mut values = Vec::with_capacity(span);
        for candidate in self.assigned.iter().skip(start).take(span) {
            match candidate.value() {
                Some(value) => values.push(value),
                None if nulls_allowed => values.push(Value::Nil),
                None => return Err(TheoryError::could_not_generate(candidate.description())),
            }
        }
        Ok(values)
    }

    /// The materialized constructor arguments: the first C assigned
    /// candidates, where C is the constructor's parameter count.
    pub fn constructor_arguments(&self, nulls_allowed: bool) -> Result<Vec<Value>, TheoryError> {
        self.actual_values(0, self.constructor_parameter_count(), nulls_allowed)
    }

    /// The materialized method arguments: everything after the
    /// constructor's parameters.
    pub fn method_arguments(&self, nulls_allowed: bool) -> Result<Vec<Value>, TheoryError> {
        self.actual_values(
            self.constructor_parameter_count(),
            self.assigned.len(),
            nulls_allowed,
        )
    }

    // Recomputed from the constructor's signatures on every call rather
    // than cached at construction, so a name resolver that changes
    // between calls is reflected.
    fn constructor_parameter_count(&self) -> usize {
        signatures(
            self.fixture.constructor(),
            ConstructKind::Constructor,
            &*self.resolver,
        )
        .len()
    }

    /// Each assigned candidate's fixed description, in assignment
    /// order. Descriptions are precomputed, so this never fails, even
    /// for candidates whose values cannot be generated.
    pub fn argument_descriptions(&self) -> Vec<String> {
        self.assigned
            .iter()
            .map(|candidate| candidate.description().to_string())
            .collect()
    }

    /// Number of candidates assigned so far.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Number of parameters still awaiting assignment.
    pub fn unassigned_count(&self) -> usize {
        self.unassigned.len()
    }

    /// The fixture this assignment run introspects.
    pub fn fixture(&self) -> &Rc<Fixture> {
        &self.fixture
    }
}

//! # Theoria: Parameter Suppliers and the Canonical Registry Builder
//!
//! A supplier is a strategy that produces the ordered candidate list for
//! one parameter signature. Custom strategies are selected through
//! attribute metadata by registry id; every other parameter falls back
//! to the default all-members scan of the fixture's data points.
//!
//! Registry Invariant: the supplier registry is a single source of truth.
//! It must be constructed once at the entrypoint and shared by every
//! assignment state of the run. Never construct a local/hidden registry.

use std::collections::HashMap;
use std::rc::Rc;

use crate::candidate::PotentialValue;
use crate::errors::TheoryError;
use crate::fixture::Fixture;
use crate::signature::ParamSignature;
use crate::value::Value;

/// A strategy producing the ordered candidate list for one parameter.
///
/// Implementations must be free of shared mutable state: the same
/// supplier may be consulted for independent search branches.
pub trait ParameterSupplier {
    /// The ordered candidates for `signature`. The order is significant:
    /// drivers try candidates exactly in this order.
    fn value_sources(&self, signature: &ParamSignature) -> Vec<PotentialValue>;
}

impl std::fmt::Debug for dyn ParameterSupplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ParameterSupplier")
    }
}

/// Default strategy: scans the fixture's declared data points, in
/// declaration order, for values the parameter can accept.
///
/// A data point whose value the parameter accepts directly contributes
/// itself. A List data point additionally contributes each
/// type-compatible element, in list order, under an indexed description.
pub struct AllMembersSupplier {
    fixture: Rc<Fixture>,
}

impl AllMembersSupplier {
    pub fn new(fixture: Rc<Fixture>) -> Self {
        Self { fixture }
    }
}

impl ParameterSupplier for AllMembersSupplier {
    fn value_sources(&self, signature: &ParamSignature) -> Vec<PotentialValue> {
        let mut sources = Vec::new();
        for point in self.fixture.data_points() {
            if signature.can_accept(&point.value) {
                sources.push(PotentialValue::of(point.name.clone(), point.value.clone()));
                continue;
            }
            if let Value::List(items) = &point.value {
                for (i, item) in items.iter().enumerate() {
                    if signature.can_accept(item) {
                        sources.push(PotentialValue::of(
                            format!("{}[{}]", point.name, i),
                            item.clone(),
                        ));
                    }
                }
            }
        }
        sources
    }
}

/// Enumerates both boolean values, false first.
pub struct BooleanSupplier;

impl ParameterSupplier for BooleanSupplier {
    fn value_sources(&self, _signature: &ParamSignature) -> Vec<PotentialValue> {
        vec![
            PotentialValue::of("false", Value::Bool(false)),
            PotentialValue::of("true", Value::Bool(true)),
        ]
    }
}

/// Supplies the explicit value list carried in the parameter's
/// attribute payload, in payload order. Values the parameter cannot
/// accept are skipped.
pub struct TestedOnSupplier;

impl ParameterSupplier for TestedOnSupplier {
    fn value_sources(&self, signature: &ParamSignature) -> Vec<PotentialValue> {
        let Some(supplied_by) = signature.supplied_by() else {
            return Vec::new();
        };
        supplied_by
            .payload
            .iter()
            .filter(|value| signature.can_accept(value))
            .map(|value| PotentialValue::of(value.to_string(), value.clone()))
            .collect()
    }
}

/// Fallible no-argument supplier construction. A factory that fails
/// makes the whole enumeration abort: no candidate list can be obtained
/// for its parameter at all.
pub type SupplierFactory = Box<dyn Fn() -> Result<Box<dyn ParameterSupplier>, String>>;

/// Maps declared strategy ids to constructible supplier factories.
#[derive(Default)]
pub struct SupplierRegistry {
    factories: HashMap<String, SupplierFactory>,
}

impl SupplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `id`, replacing any previous binding.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        factory: impl Fn() -> Result<Box<dyn ParameterSupplier>, String> + 'static,
    ) {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Instantiate the supplier registered under `id`.
    ///
    /// Both failure modes here are fatal to the enclosing enumeration:
    /// an unknown id and a failing factory alike leave the parameter
    /// with no obtainable candidate list.
    pub fn instantiate(&self, id: &str) -> Result<Box<dyn ParameterSupplier>, TheoryError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| TheoryError::unknown_supplier(id))?;
        factory().map_err(|reason| TheoryError::supplier_instantiation(id, reason))
    }

    /// Returns true if a factory is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }
}

/// Builds and returns a fully populated supplier registry with all
/// standard strategies registered.
///
/// # Example
/// ```
/// use theoria::supplier::build_default_supplier_registry;
/// let registry = build_default_supplier_registry();
/// assert!(registry.contains("booleans"));
/// ```
pub fn build_default_supplier_registry() -> SupplierRegistry {
    let mut registry = SupplierRegistry::new();
    registry.register("booleans", || Ok(Box::new(BooleanSupplier)));
    registry.register("tested-on", || Ok(Box::new(TestedOnSupplier)));
    registry
}

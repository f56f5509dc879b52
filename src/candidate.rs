//! Potential values: lazily-evaluated candidates for one parameter.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Deferred zero-argument value source. Yields None when no value can
/// be produced for this candidate.
pub type ValueProvider = Arc<dyn Fn() -> Option<Value> + Send + Sync>;

/// A lazily-evaluated candidate value paired with a fixed description.
///
/// The provider is evaluated at most once per materialization call but
/// may run again across call sites; the description is precomputed and
/// never fails, so diagnostic strings stay available even for
/// candidates whose values cannot be generated.
#[derive(Clone)]
pub struct PotentialValue {
    description: String,
    provider: ValueProvider,
}

impl PotentialValue {
    /// A candidate holding an already-computed value.
    pub fn of(description: impl Into<String>, value: Value) -> Self {
        Self {
            description: description.into(),
            provider: Arc::new(move || Some(value.clone())),
        }
    }

    /// A candidate whose value is computed on demand.
    pub fn deferred(
        description: impl Into<String>,
        provider: impl Fn() -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            provider: Arc::new(provider),
        }
    }

    /// A candidate that can never produce a value. Materializing it with
    /// nulls disallowed fails the branch it belongs to.
    pub fn absent(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            provider: Arc::new(|| None),
        }
    }

    /// Evaluate the deferred provider.
    pub fn value(&self) -> Option<Value> {
        (self.provider)()
    }

    /// The fixed human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for PotentialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PotentialValue")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PotentialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

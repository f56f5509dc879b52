//! Test-class model: the declarative description of a theory fixture.
//!
//! A [`Fixture`] plays the role reflection plays in runtime-introspected
//! test frameworks: it declares a constructor parameter list and an
//! ordered set of data points (named candidate values) that the default
//! supplier scans. Fixtures are read-only during a search; suppliers may
//! read them but must never mutate them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::TheoryError;
use crate::value::{Value, ValueType};

/// Attribute metadata designating a custom supplier for one parameter,
/// by registry id, plus an optional payload the supplier may read
/// (e.g. an explicit value list for the `tested-on` strategy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppliedBy {
    pub supplier: String,
    pub payload: Vec<Value>,
}

/// Attribute metadata attached to one formal parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamAttrs {
    pub supplied_by: Option<SuppliedBy>,
}

impl ParamAttrs {
    /// No attributes: the default all-members supplier applies.
    pub fn none() -> Self {
        Self::default()
    }

    /// Designate a custom supplier with no payload.
    pub fn supplied_by(id: impl Into<String>) -> Self {
        Self {
            supplied_by: Some(SuppliedBy {
                supplier: id.into(),
                payload: Vec::new(),
            }),
        }
    }

    /// Designate a custom supplier with a payload value list.
    pub fn supplied_by_with(id: impl Into<String>, payload: Vec<Value>) -> Self {
        Self {
            supplied_by: Some(SuppliedBy {
                supplier: id.into(),
                payload,
            }),
        }
    }
}

/// One formal parameter declaration: an optional declared name (the name
/// resolver falls back to a positional name when absent), a declared
/// type, and attribute metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: Option<String>,
    pub ty: ValueType,
    pub attrs: ParamAttrs,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            attrs: ParamAttrs::none(),
        }
    }

    /// A parameter with no declared name; resolvers produce `arg<N>`.
    pub fn unnamed(ty: ValueType) -> Self {
        Self {
            name: None,
            ty,
            attrs: ParamAttrs::none(),
        }
    }

    pub fn with_attrs(mut self, attrs: ParamAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// A constructor or theory method declaration: an owning fixture name,
/// the construct's own name, and its formal parameters in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstructSpec {
    pub owner: String,
    pub name: String,
    pub params: Vec<ParamSpec>,
}

impl ConstructSpec {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }
}

/// A declared candidate value: a name plus a concrete value. A List
/// value additionally contributes each of its elements as individual
/// candidates for element-typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: Value,
}

/// Errors in the fixture declaration itself. These are construction-time
/// defects, not search-time failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixtureError {
    #[error("duplicate data point '{name}' in fixture '{fixture}'")]
    DuplicateDataPoint { fixture: String, name: String },
    #[error("constructor of fixture '{fixture}' does not belong to it (owner is '{owner}')")]
    ForeignConstructor { fixture: String, owner: String },
}

/// The test class under theory: a constructor declaration plus ordered
/// data points. The shared read-only resource of one enumeration run.
#[derive(Debug, Clone)]
pub struct Fixture {
    name: String,
    constructor: ConstructSpec,
    data_points: Vec<DataPoint>,
}

impl Fixture {
    /// A fixture with a zero-parameter constructor and no data points.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let constructor = ConstructSpec::new(name.clone(), "new");
        Self {
            name,
            constructor,
            data_points: Vec::new(),
        }
    }

    /// Replace the constructor declaration.
    pub fn with_constructor(mut self, constructor: ConstructSpec) -> Self {
        self.constructor = constructor;
        self
    }

    /// Append one data point, preserving declaration order.
    pub fn data_point(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data_points.push(DataPoint {
            name: name.into(),
            value,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constructor(&self) -> &ConstructSpec {
        &self.constructor
    }

    pub fn data_points(&self) -> &[DataPoint] {
        &self.data_points
    }

    /// Validate the declaration. Runners call this once before starting
    /// a search; a failing fixture aborts every theory that uses it.
    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.constructor.owner != self.name {
            return Err(FixtureError::ForeignConstructor {
                fixture: self.name.clone(),
                owner: self.constructor.owner.clone(),
            });
        }
        for (i, point) in self.data_points.iter().enumerate() {
            if self.data_points[..i].iter().any(|p| p.name == point.name) {
                return Err(FixtureError::DuplicateDataPoint {
                    fixture: self.name.clone(),
                    name: point.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<FixtureError> for TheoryError {
    fn from(err: FixtureError) -> Self {
        let fixture = match &err {
            FixtureError::DuplicateDataPoint { fixture, .. } => fixture.clone(),
            FixtureError::ForeignConstructor { fixture, .. } => fixture.clone(),
        };
        TheoryError::invalid_fixture(fixture, err.to_string())
    }
}

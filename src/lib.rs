//! Theoria: a combinatorial theory-testing engine.
//!
//! A theory is a parameterized test executed once per full combination
//! of candidate values for its parameters. This crate enumerates those
//! combinations: per-parameter candidate lists are produced by
//! suppliers, and an immutable [`Assignments`] state walks the
//! Cartesian product depth-first, one structural transition at a time.
//!
//! ## Core concepts
//!
//! - [`Assignments`]: the persistent enumeration state (assigned
//!   candidates plus the queue of unassigned parameters)
//! - [`PotentialValue`]: a deferred, possibly-absent candidate value
//!   with a fixed description
//! - [`ParameterSupplier`]: a strategy producing the ordered candidate
//!   list for one parameter signature
//! - [`TheoryRunner`]: the depth-first driver that executes a theory
//!   per combination and reports the first failing one
//!
//! ## Usage
//!
//! ```rust
//! use theoria::{
//!     ConstructSpec, Fixture, ParamSpec, Theory, TheoryOutcome, TheoryResult, TheoryRunner,
//!     Value, ValueType,
//! };
//!
//! let fixture = Fixture::new("Math")
//!     .data_point("one", Value::Number(1.0))
//!     .data_point("two", Value::Number(2.0));
//!
//! let params = ConstructSpec::new("Math", "positive")
//!     .param(ParamSpec::new("n", ValueType::Number));
//! let theory = Theory::new("positive", params, |_ctor, args| {
//!     match args[0].as_number() {
//!         Some(n) if n > 0.0 => TheoryOutcome::Passed,
//!         _ => TheoryOutcome::Failed("not positive".to_string()),
//!     }
//! });
//!
//! let result = TheoryRunner::new(fixture).run_theory(&theory);
//! assert!(matches!(result, TheoryResult::Pass { combinations: 2, .. }));
//! ```

pub mod assignments;
pub mod candidate;
pub mod errors;
pub mod fixture;
pub mod runner;
pub mod signature;
pub mod supplier;
pub mod value;

pub use assignments::Assignments;
pub use candidate::PotentialValue;
pub use errors::{ErrorCategory, ErrorKind, TheoryError};
pub use fixture::{ConstructSpec, DataPoint, Fixture, FixtureError, ParamAttrs, ParamSpec, SuppliedBy};
pub use runner::{Theory, TheoryConfig, TheoryOutcome, TheoryResult, TheoryRunner};
pub use signature::{signatures, ConstructKind, DeclaredNames, NameResolver, ParamSignature};
pub use supplier::{
    build_default_supplier_registry, AllMembersSupplier, BooleanSupplier, ParameterSupplier,
    SupplierRegistry, TestedOnSupplier,
};
pub use value::{Value, ValueType};

//! Parameter signature extraction and name resolution.
//!
//! Extraction follows this flow:
//! 1. Walk a construct's formal parameters in declaration order
//! 2. Resolve each parameter's display name through a [`NameResolver`]
//! 3. Produce one immutable [`ParamSignature`] per parameter
//!
//! Signatures are built once per construct introspection and compared by
//! identity only within one enumeration run.

use crate::fixture::{ConstructSpec, ParamAttrs, SuppliedBy};
use crate::value::{Value, ValueType};

/// Which kind of construct declared a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructKind {
    Constructor,
    Method,
}

/// Metadata describing one formal parameter: position, declared type,
/// declaring construct, resolved display name, and attribute metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSignature {
    pub position: usize,
    pub ty: ValueType,
    pub construct: ConstructKind,
    /// Name of the declaring construct, e.g. `Calculator::divides`.
    pub declared_in: String,
    /// Human-readable parameter name from the name resolver.
    pub name: String,
    pub attrs: ParamAttrs,
}

impl ParamSignature {
    /// Returns true if this parameter can accept `value`.
    pub fn can_accept(&self, value: &Value) -> bool {
        self.ty.accepts(value)
    }

    /// The custom-supplier designation, if any.
    pub fn supplied_by(&self) -> Option<&SuppliedBy> {
        self.attrs.supplied_by.as_ref()
    }
}

/// Maps a formal parameter to a human-readable display name.
///
/// This is a service seam: resolution may consult sources beyond the
/// declaration (debug info, documentation), so extraction goes through
/// the trait rather than reading the declared name directly.
pub trait NameResolver {
    /// Resolve the name of `construct`'s parameter at `position`, or
    /// None when no name is known.
    fn resolve(&self, construct: &ConstructSpec, position: usize) -> Option<String>;
}

/// Default resolver: uses the declared parameter name when present.
/// Extraction falls back to a positional `arg<N>` name otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredNames;

impl NameResolver for DeclaredNames {
    fn resolve(&self, construct: &ConstructSpec, position: usize) -> Option<String> {
        construct
            .params
            .get(position)
            .and_then(|param| param.name.clone())
    }
}

/// Extracts the ordered signatures of a construct's formal parameters,
/// resolving display names through `resolver`.
pub fn signatures(
    construct: &ConstructSpec,
    kind: ConstructKind,
    resolver: &dyn NameResolver,
) -> Vec<ParamSignature> {
    let declared_in = format!("{}::{}", construct.owner, construct.name);
    construct
        .params
        .iter()
        .enumerate()
        .map(|(position, param)| ParamSignature {
            position,
            ty: param.ty,
            construct: kind,
            declared_in: declared_in.clone(),
            name: resolver
                .resolve(construct, position)
                .unwrap_or_else(|| format!("arg{}", position)),
            attrs: param.attrs.clone(),
        })
        .collect()
}

//! Field type translation.
//!
//! Maps a declared [`TypeExpr`] to a [`Validator`] by structural recursion.
//! Total: shapes without a validator counterpart become [`Validator::Any`].

use crate::ir::{Primitive, TypeExpr};
use crate::validator::Validator;

/// Translate one declared type. `temporal_types` lists reference names that
/// are validated as date-time strings.
pub fn translate(ty: &TypeExpr, temporal_types: &[String]) -> Validator {
    match ty {
        TypeExpr::Primitive(Primitive::String) => Validator::String,
        TypeExpr::Primitive(Primitive::Number) => Validator::Number,
        TypeExpr::Primitive(Primitive::Boolean) => Validator::Boolean,
        TypeExpr::Array(inner) => Validator::Array(Box::new(translate(inner, temporal_types))),
        TypeExpr::Union(members) => Validator::Union(
            members
                .iter()
                .map(|m| translate(m, temporal_types))
                .collect(),
        ),
        TypeExpr::Literal(lit) => Validator::Literal(lit.clone()),
        TypeExpr::Tuple(elements) => Validator::Tuple(
            elements
                .iter()
                .map(|e| translate(e, temporal_types))
                .collect(),
        ),
        TypeExpr::Reference(name) if temporal_types.iter().any(|t| t == name) => {
            Validator::DateTime
        }
        TypeExpr::Reference(_) => Validator::Any,
        TypeExpr::Record => Validator::Record,
        TypeExpr::Unknown => Validator::Any,
    }
}

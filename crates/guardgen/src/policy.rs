//! Field override policy.
//!
//! Decides, per declared field, whether it is dropped (server-managed),
//! forced to a mandatory string, or validated as declared, and whether it is
//! listed as immutable.

use crate::ir::{FieldDeclaration, Primitive};
use crate::translate::translate;
use crate::validator::{Property, Validator};
use serde::{Deserialize, Serialize};

/// A field assigned by the server. Always allowed as optional input, never
/// taken from the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerManagedField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Primitive,
}

/// Resolved policy settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub server_managed: Vec<ServerManagedField>,
    /// Fields that must always be present as strings.
    pub required: Vec<String>,
    /// Reference names validated as date-time strings.
    pub temporal_types: Vec<String>,
}

/// Outcome of the policy for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPolicy {
    /// Server-managed; not emitted from the declaration.
    Excluded,
    /// Listed as immutable; still validated on write by the wrapped rule.
    ImmutableTracked(Box<FieldPolicy>),
    ForcedRequiredString,
    Translated { optional: bool },
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            server_managed: vec![
                ServerManagedField::new("id", Primitive::Number),
                ServerManagedField::new("createdAt", Primitive::String),
                ServerManagedField::new("updatedAt", Primitive::String),
            ],
            required: vec!["title".into(), "category".into()],
            temporal_types: vec!["Date".into()],
        }
    }
}

impl ServerManagedField {
    pub fn new(name: impl Into<String>, ty: Primitive) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// The optional property every schema starts with.
    pub fn property(&self) -> Property {
        let validator = match self.ty {
            Primitive::String => Validator::String,
            Primitive::Number => Validator::Number,
            Primitive::Boolean => Validator::Boolean,
        };
        Property::optional(&self.name, validator)
    }
}

impl Policy {
    pub fn is_server_managed(&self, name: &str) -> bool {
        self.server_managed.iter().any(|f| f.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Decide how one declared field is handled.
    pub fn decide(&self, field: &FieldDeclaration) -> FieldPolicy {
        if self.is_server_managed(&field.name) {
            return FieldPolicy::Excluded;
        }
        let rule = if self.is_required(&field.name) {
            FieldPolicy::ForcedRequiredString
        } else {
            FieldPolicy::Translated {
                optional: field.optional,
            }
        };
        if field.immutable {
            FieldPolicy::ImmutableTracked(Box::new(rule))
        } else {
            rule
        }
    }

    /// The schema property for a declared field, or `None` when excluded.
    pub fn property(&self, field: &FieldDeclaration) -> Option<Property> {
        self.decide(field).property(field, self)
    }

    /// Mandatory string property for a required field.
    pub fn required_property(&self, name: &str) -> Property {
        Property::required(name, Validator::String).with_required_message(required_message(name))
    }
}

impl FieldPolicy {
    pub fn is_immutable(&self) -> bool {
        matches!(self, FieldPolicy::ImmutableTracked(_))
    }

    /// Apply this decision to `field`.
    pub fn property(&self, field: &FieldDeclaration, policy: &Policy) -> Option<Property> {
        match self {
            FieldPolicy::Excluded => None,
            FieldPolicy::ImmutableTracked(rule) => rule.property(field, policy),
            FieldPolicy::ForcedRequiredString => Some(policy.required_property(&field.name)),
            FieldPolicy::Translated { optional } => {
                let validator = translate(&field.ty, &policy.temporal_types);
                Some(if *optional {
                    Property::optional(&field.name, validator)
                } else {
                    Property::required(&field.name, validator)
                })
            }
        }
    }
}

/// "title" -> "Title is required".
fn required_message(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{} is required", first.to_uppercase(), chars.as_str()),
        None => "Required".to_string(),
    }
}

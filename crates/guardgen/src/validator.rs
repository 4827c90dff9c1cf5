//! In-memory validator representation.
//!
//! Translation produces these values; the Zod backend serializes them and
//! [`check`](crate::check) evaluates them natively.

use crate::ir::Literal;
use serde::Serialize;

/// A runtime-checkable validator for one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Validator {
    String,
    Number,
    Boolean,
    /// ISO 8601 date-time string.
    DateTime,
    Array(Box<Validator>),
    /// At least one member must match, tried in order.
    Union(Vec<Validator>),
    Literal(Literal),
    /// Fixed-length array, validated positionally.
    Tuple(Vec<Validator>),
    /// Any object; values are not checked.
    Record,
    Any,
}

/// One property of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub validator: Validator,
    pub optional: bool,
    /// Message reported when the property is missing (defaults to "Required").
    pub required_message: Option<String>,
}

/// A strict object schema for one declared type. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    pub type_name: String,
    pub properties: Vec<Property>,
}

impl Validator {
    /// Whether a missing key satisfies this validator (`z.any()` accepts `undefined`).
    pub fn accepts_missing(&self) -> bool {
        match self {
            Validator::Any => true,
            Validator::Union(members) => members.iter().any(Validator::accepts_missing),
            _ => false,
        }
    }
}

impl Property {
    pub fn required(name: impl Into<String>, validator: Validator) -> Self {
        Self {
            name: name.into(),
            validator,
            optional: false,
            required_message: None,
        }
    }

    pub fn optional(name: impl Into<String>, validator: Validator) -> Self {
        Self {
            optional: true,
            ..Self::required(name, validator)
        }
    }

    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }
}

impl ObjectSchema {
    /// Identifier of the exported schema constant.
    pub fn ident(&self) -> String {
        format!("{}Schema", self.type_name)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl Literal {
    /// The literal as JavaScript source (same text `JSON.stringify` produces).
    pub fn to_js(&self) -> String {
        match self {
            Literal::String(s) => serde_json::Value::from(s.as_str()).to_string(),
            Literal::Number(n) => js_number(*n),
            Literal::Bool(b) => b.to_string(),
            Literal::Null => "null".to_string(),
        }
    }
}

/// `Display` for `f64` drops a trailing `.0` and never uses exponent notation.
fn js_number(n: f64) -> String {
    n.to_string()
}

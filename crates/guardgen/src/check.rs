//! Native evaluation of generated schemas.
//!
//! Mirrors what the emitted Zod guard does at runtime: every violated
//! constraint is reported, with Zod's messages and dotted field paths.

use crate::ir::Literal;
use crate::validator::{ObjectSchema, Validator};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T([01]\d|2[0-3]):[0-5]\d:[0-5]\d(\.\d+)?Z$",
    )
    .expect("valid datetime regex")
});

const INVALID_DATE: &str = "Invalid date format";

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path to the offending value; empty for the input itself.
    pub field: String,
    pub message: String,
}

/// Normalized data on success, every violation on failure.
pub type GuardResult = Result<Value, Vec<Violation>>;

impl ObjectSchema {
    /// Validate `input` against this schema.
    pub fn check(&self, input: &Value) -> GuardResult {
        let mut checker = Checker::default();
        let Some(object) = input.as_object() else {
            checker.report(format!("Expected object, received {}", received(input)));
            return Err(checker.violations);
        };

        let mut data = Map::new();
        for prop in &self.properties {
            checker.path.push(prop.name.clone());
            match object.get(&prop.name) {
                Some(value) => {
                    checker.check(&prop.validator, value);
                    data.insert(prop.name.clone(), value.clone());
                }
                None if prop.optional || prop.validator.accepts_missing() => {}
                None => {
                    let message = prop.required_message.as_deref().unwrap_or("Required");
                    checker.report(message.to_string());
                }
            }
            checker.path.pop();
        }

        let unknown: Vec<String> = object
            .keys()
            .filter(|k| self.property(k).is_none())
            .map(|k| format!("'{}'", k))
            .collect();
        if !unknown.is_empty() {
            checker.report(format!(
                "Unrecognized key(s) in object: {}",
                unknown.join(", ")
            ));
        }

        if checker.violations.is_empty() {
            Ok(Value::Object(data))
        } else {
            Err(checker.violations)
        }
    }
}

#[derive(Default)]
struct Checker {
    path: Vec<String>,
    violations: Vec<Violation>,
    /// A type-level failure was reported. Refinement failures (date format)
    /// leave the result dirty but not aborted, which unions care about.
    aborted: bool,
}

impl Checker {
    fn scoped(&self) -> Self {
        Self {
            path: self.path.clone(),
            ..Self::default()
        }
    }

    fn report(&mut self, message: String) {
        self.aborted = true;
        self.report_dirty(message);
    }

    fn report_dirty(&mut self, message: String) {
        self.violations.push(Violation {
            field: self.path.join("."),
            message,
        });
    }

    fn expected(&mut self, expected: &str, value: &Value) {
        self.report(format!("Expected {}, received {}", expected, received(value)));
    }

    fn check(&mut self, validator: &Validator, value: &Value) {
        match validator {
            Validator::String if !value.is_string() => self.expected("string", value),
            Validator::Number if !value.is_number() => self.expected("number", value),
            Validator::Boolean if !value.is_boolean() => self.expected("boolean", value),
            Validator::DateTime => match value.as_str() {
                Some(s) if DATETIME.is_match(s) => {}
                Some(_) => self.report_dirty(INVALID_DATE.to_string()),
                None => self.expected("string", value),
            },
            Validator::Array(inner) => match value.as_array() {
                Some(items) => self.check_items(items.iter().map(|item| (inner.as_ref(), item))),
                None => self.expected("array", value),
            },
            Validator::Union(members) => {
                // First dirty member wins, as in Zod; otherwise the union is invalid.
                let mut dirty = None;
                for member in members {
                    let mut scratch = self.scoped();
                    scratch.check(member, value);
                    if scratch.violations.is_empty() {
                        return;
                    }
                    if !scratch.aborted && dirty.is_none() {
                        dirty = Some(scratch.violations);
                    }
                }
                match dirty {
                    Some(violations) => self.violations.extend(violations),
                    None => self.report("Invalid input".to_string()),
                }
            }
            Validator::Literal(lit) => {
                let equal = match lit {
                    Literal::String(s) => value.as_str() == Some(s.as_str()),
                    Literal::Number(n) => value.as_f64() == Some(*n),
                    Literal::Bool(b) => value.as_bool() == Some(*b),
                    Literal::Null => value.is_null(),
                };
                if !equal {
                    self.report(format!("Invalid literal value, expected {}", lit.to_js()));
                }
            }
            Validator::Tuple(elements) => {
                let Some(items) = value.as_array() else {
                    return self.expected("array", value);
                };
                if items.len() < elements.len() {
                    self.report(format!(
                        "Array must contain at least {} element(s)",
                        elements.len()
                    ));
                } else if items.len() > elements.len() {
                    self.report(format!(
                        "Array must contain at most {} element(s)",
                        elements.len()
                    ));
                } else {
                    self.check_items(elements.iter().zip(items));
                }
            }
            Validator::Record if !value.is_object() => self.expected("object", value),
            _ => {}
        }
    }

    fn check_items<'v>(&mut self, items: impl Iterator<Item = (&'v Validator, &'v Value)>) {
        for (index, (validator, item)) in items.enumerate() {
            self.path.push(index.to_string());
            self.check(validator, item);
            self.path.pop();
        }
    }
}

/// Zod's name for the type of a JSON value.
fn received(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Zod backend.
//!
//! Emits an ES module with one strict `z.object` schema and one guard
//! function per type, plus the `validators` and `readonlyProperties` tables.

use crate::artifact::{GeneratedArtifact, GuardFunction};
use crate::traits::Backend;
use crate::validator::{ObjectSchema, Property, Validator};
use std::fmt::Write;

/// Static instance of the Zod backend for the registry.
pub static ZOD_BACKEND: ZodBackend = ZodBackend;

pub struct ZodBackend;

impl Backend for ZodBackend {
    fn name(&self) -> &'static str {
        "zod"
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn generate(&self, artifact: &GeneratedArtifact) -> String {
        generate_zod(artifact)
    }
}

/// Serialize the artifact as a Zod ES module.
pub fn generate_zod(artifact: &GeneratedArtifact) -> String {
    let mut out = String::new();
    let source = &artifact.source_name;

    writeln!(
        out,
        "// THIS FILE IS AUTO-GENERATED from {} - DO NOT EDIT DIRECTLY",
        source
    )
    .unwrap();
    writeln!(out, "import z from 'zod';").unwrap();

    for schema in &artifact.schemas {
        out.push('\n');
        write_schema(&mut out, schema, source);
    }

    for guard in &artifact.guards {
        out.push('\n');
        write_guard(&mut out, guard);
    }

    out.push_str("\n// Guard functions keyed by lower-cased type name\n");
    out.push_str("export const validators = {\n");
    for (key, guard) in &artifact.validators {
        writeln!(out, "  {}: {},", quote(key), guard).unwrap();
    }
    out.push_str("};\n");

    out.push_str("\n// Fields that must not change after creation, keyed by lower-cased type name\n");
    out.push_str("export const readonlyProperties = {\n");
    for (key, fields) in &artifact.immutable {
        let fields: Vec<_> = fields.iter().map(|f| quote(f)).collect();
        writeln!(out, "  {}: [{}],", quote(key), fields.join(", ")).unwrap();
    }
    out.push_str("};\n");

    out
}

fn write_schema(out: &mut String, schema: &ObjectSchema, source: &str) {
    writeln!(
        out,
        "// Schema generated from {} {} type",
        source, schema.type_name
    )
    .unwrap();
    writeln!(out, "export const {} = z.object({{", schema.ident()).unwrap();
    for prop in &schema.properties {
        writeln!(out, "  {}: {},", property_key(&prop.name), property_expr(prop)).unwrap();
    }
    out.push_str("}).strict();\n");
}

fn write_guard(out: &mut String, guard: &GuardFunction) {
    writeln!(out, "export function {}(data) {{", guard.name).unwrap();
    writeln!(out, "  const result = {}.safeParse(data);", guard.schema).unwrap();
    out.push_str(
        "  if (result.success) {
    return { valid: true, data: result.data };
  }
  return {
    valid: false,
    errors: result.error.errors.map(err => ({
      field: err.path.join('.'),
      message: err.message,
    })),
  };
}
",
    );
}

fn property_expr(prop: &Property) -> String {
    let expr = match (&prop.validator, &prop.required_message) {
        (Validator::String, Some(message)) => {
            format!("z.string({{ required_error: {} }})", quote(message))
        }
        (validator, _) => zod_expr(validator),
    };
    if prop.optional {
        format!("{}.optional()", expr)
    } else {
        expr
    }
}

/// Zod expression for one validator.
pub fn zod_expr(validator: &Validator) -> String {
    match validator {
        Validator::String => "z.string()".to_string(),
        Validator::Number => "z.number()".to_string(),
        Validator::Boolean => "z.boolean()".to_string(),
        Validator::DateTime => "z.string().datetime(\"Invalid date format\")".to_string(),
        Validator::Array(inner) => format!("z.array({})", zod_expr(inner)),
        Validator::Union(members) => format!("z.union([{}])", join(members)),
        Validator::Literal(lit) => format!("z.literal({})", lit.to_js()),
        Validator::Tuple(elements) => format!("z.tuple([{}])", join(elements)),
        Validator::Record => "z.record(z.any())".to_string(),
        Validator::Any => "z.any()".to_string(),
    }
}

fn join(validators: &[Validator]) -> String {
    validators
        .iter()
        .map(zod_expr)
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Bare identifier when possible, quoted otherwise.
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        name.to_string()
    } else {
        quote(name)
    }
}

//! Generated artifact assembly.
//!
//! Builds the in-memory artifact (schemas, guard functions and the two lookup
//! tables) from extracted declarations. Serialization lives in
//! [`output`](crate::output).

use crate::ir::TypeDeclaration;
use crate::policy::Policy;
use crate::validator::ObjectSchema;
use serde::Serialize;

/// A guard function validating input against one schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuardFunction {
    /// Exported function name (e.g., `validateCourse`).
    pub name: String,
    /// Schema constant it parses with (e.g., `CourseSchema`).
    pub schema: String,
}

/// Everything one generation run emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedArtifact {
    /// File name of the declaration source, for the header.
    pub source_name: String,
    pub schemas: Vec<ObjectSchema>,
    pub guards: Vec<GuardFunction>,
    /// Lower-cased type name -> guard function name.
    pub validators: Vec<(String, String)>,
    /// Lower-cased type name -> immutable field names.
    pub immutable: Vec<(String, Vec<String>)>,
}

impl GeneratedArtifact {
    /// Assemble the artifact for `decls`, in order.
    pub fn build(source_name: impl Into<String>, decls: &[TypeDeclaration], policy: &Policy) -> Self {
        let mut artifact = Self {
            source_name: source_name.into(),
            schemas: Vec::with_capacity(decls.len()),
            guards: Vec::with_capacity(decls.len()),
            validators: Vec::new(),
            immutable: Vec::new(),
        };

        for decl in decls {
            let (schema, immutable) = build_schema(decl, policy);
            let guard = GuardFunction {
                name: format!("validate{}", decl.name),
                schema: schema.ident(),
            };
            let key = decl.table_key();
            if artifact.validators.iter().any(|(k, _)| *k == key) {
                tracing::warn!(
                    key = %key,
                    name = %decl.name,
                    "type name collides with an earlier declaration; later one wins"
                );
            }
            upsert(&mut artifact.validators, key.clone(), guard.name.clone());
            upsert(&mut artifact.immutable, key, immutable);
            artifact.schemas.push(schema);
            artifact.guards.push(guard);
        }

        artifact
    }

    /// Schema behind the guard registered under `key` (case-insensitive).
    pub fn schema_for(&self, key: &str) -> Option<&ObjectSchema> {
        let key = key.to_lowercase();
        let (_, guard_name) = self.validators.iter().find(|(k, _)| *k == key)?;
        let guard = self.guards.iter().rev().find(|g| g.name == *guard_name)?;
        self.schemas.iter().rev().find(|s| s.ident() == guard.schema)
    }

    /// Immutable fields registered under `key` (case-insensitive).
    pub fn immutable_fields(&self, key: &str) -> Option<&[String]> {
        let key = key.to_lowercase();
        self.immutable
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, fields)| fields.as_slice())
    }
}

/// Schema for one declaration plus the names of its immutable fields.
pub fn build_schema(decl: &TypeDeclaration, policy: &Policy) -> (ObjectSchema, Vec<String>) {
    let mut properties: Vec<_> = policy
        .server_managed
        .iter()
        .map(|f| f.property())
        .collect();
    let mut immutable = Vec::new();

    for field in &decl.fields {
        let decision = policy.decide(field);
        if decision.is_immutable() {
            immutable.push(field.name.clone());
        }
        if let Some(prop) = decision.property(field, policy) {
            properties.push(prop);
        }
    }

    for name in &policy.required {
        if !decl.fields.iter().any(|f| f.name == *name) {
            properties.push(policy.required_property(name));
        }
    }

    let schema = ObjectSchema {
        type_name: decl.name.clone(),
        properties,
    };
    (schema, immutable)
}

/// Replace the value under `key` in place, or append.
fn upsert<V>(table: &mut Vec<(String, V)>, key: String, value: V) {
    match table.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => table.push((key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FieldDeclaration, Primitive, TypeExpr};
    use crate::validator::Validator;

    fn course() -> TypeDeclaration {
        TypeDeclaration::new(
            "Course",
            vec![
                FieldDeclaration::required("title", Primitive::String.into()),
                FieldDeclaration::required("price", Primitive::Number.into()),
                FieldDeclaration::optional("description", Primitive::String.into()),
            ],
        )
    }

    fn names(schema: &ObjectSchema) -> Vec<&str> {
        schema.properties.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_property_order() {
        let (schema, immutable) = build_schema(&course(), &Policy::default());
        assert_eq!(
            names(&schema),
            [
                "id",
                "createdAt",
                "updatedAt",
                "title",
                "price",
                "description",
                "category"
            ]
        );
        assert!(immutable.is_empty());
        assert!(schema.property("id").unwrap().optional);
        assert!(!schema.property("category").unwrap().optional);
    }

    #[test]
    fn test_declared_server_fields_are_not_duplicated() {
        let decl = TypeDeclaration::new(
            "Product",
            vec![
                FieldDeclaration::required("id", Primitive::String.into()).readonly(),
                FieldDeclaration::required("createdAt", TypeExpr::Reference("Date".into())),
                FieldDeclaration::required("sku", Primitive::String.into()).readonly(),
            ],
        );
        let (schema, immutable) = build_schema(&decl, &Policy::default());
        assert_eq!(
            names(&schema),
            ["id", "createdAt", "updatedAt", "sku", "title", "category"]
        );
        assert_eq!(schema.property("id").unwrap().validator, Validator::Number);
        assert_eq!(immutable, ["sku"]);
    }

    #[test]
    fn test_tables() {
        let decls = vec![
            course(),
            TypeDeclaration::new(
                "Product",
                vec![FieldDeclaration::required("code", Primitive::String.into()).readonly()],
            ),
        ];
        let artifact = GeneratedArtifact::build("types.ts", &decls, &Policy::default());
        assert_eq!(
            artifact.validators,
            vec![
                ("course".to_string(), "validateCourse".to_string()),
                ("product".to_string(), "validateProduct".to_string()),
            ]
        );
        assert_eq!(artifact.immutable_fields("course"), Some(&[][..]));
        assert_eq!(
            artifact.immutable_fields("Product"),
            Some(&["code".to_string()][..])
        );
        assert_eq!(artifact.schema_for("COURSE").unwrap().type_name, "Course");
        assert!(artifact.schema_for("missing").is_none());
    }

    #[test]
    fn test_colliding_keys_keep_one_entry() {
        let decls = vec![
            TypeDeclaration::new("Item", vec![]),
            TypeDeclaration::new("ITEM", vec![]),
        ];
        let artifact = GeneratedArtifact::build("types.ts", &decls, &Policy::default());
        assert_eq!(artifact.schemas.len(), 2);
        assert_eq!(
            artifact.validators,
            vec![("item".to_string(), "validateITEM".to_string())]
        );
        assert_eq!(artifact.immutable.len(), 1);
        assert_eq!(artifact.schema_for("item").unwrap().type_name, "ITEM");
    }
}

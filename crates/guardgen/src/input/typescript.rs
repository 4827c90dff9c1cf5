//! TypeScript declaration reader.
//!
//! Collects `export type Name = { ... }` aliases from the top level of a
//! TypeScript source file. Interfaces, enums, non-exported aliases and aliases
//! whose value is not an object type are skipped.

use super::ParseError;
use crate::ir::{FieldDeclaration, Literal, Primitive, TypeDeclaration, TypeExpr};
use tree_sitter::{Node, Parser};

/// Parse TypeScript source and extract the exported record type aliases.
pub fn parse_typescript_declarations(source: &str) -> Result<Vec<TypeDeclaration>, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|e| ParseError::Init(format!("tree-sitter init: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or(ParseError::Parse("TypeScript"))?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::warn!("declaration source contains syntax errors; extracting what parsed");
    }

    let ctx = ExtractContext::new(source);
    Ok(ctx.extract_declarations(root))
}

struct ExtractContext<'a> {
    source: &'a str,
}

impl<'a> ExtractContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn extract_declarations(&self, root: Node) -> Vec<TypeDeclaration> {
        let mut decls = Vec::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() != "export_statement" {
                continue;
            }
            let Some(decl) = child.child_by_field_name("declaration") else {
                continue;
            };
            if decl.kind() != "type_alias_declaration" {
                continue;
            }
            if let Some(type_decl) = self.extract_type_alias(decl) {
                tracing::debug!(
                    name = %type_decl.name,
                    fields = type_decl.fields.len(),
                    "extracted record type"
                );
                decls.push(type_decl);
            }
        }
        decls
    }

    fn extract_type_alias(&self, node: Node) -> Option<TypeDeclaration> {
        let name = node.child_by_field_name("name")?;
        let value = node.child_by_field_name("value")?;
        if value.kind() != "object_type" {
            return None;
        }

        let mut fields = Vec::new();
        let mut cursor = value.walk();
        for member in value.named_children(&mut cursor) {
            // method, index and call signatures are not data fields
            if member.kind() == "property_signature" {
                if let Some(field) = self.extract_property_signature(member) {
                    fields.push(field);
                }
            }
        }

        Some(TypeDeclaration::new(self.node_text(name), fields))
    }

    fn extract_property_signature(&self, node: Node) -> Option<FieldDeclaration> {
        let name = node.child_by_field_name("name")?;
        let name = match name.kind() {
            "string" => self.string_content(name),
            _ => self.node_text(name).to_string(),
        };

        let mut optional = false;
        let mut immutable = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.is_named() {
                continue;
            }
            match self.node_text(child) {
                "?" => optional = true,
                "readonly" => immutable = true,
                _ => {}
            }
        }

        let ty = node
            .child_by_field_name("type")
            .and_then(first_named_child)
            .map(|ty| self.extract_type(ty))
            .unwrap_or(TypeExpr::Unknown);

        Some(FieldDeclaration {
            name,
            ty,
            optional,
            immutable,
        })
    }

    fn extract_type(&self, node: Node) -> TypeExpr {
        match node.kind() {
            "predefined_type" => match self.node_text(node) {
                "string" => TypeExpr::Primitive(Primitive::String),
                "number" => TypeExpr::Primitive(Primitive::Number),
                "boolean" => TypeExpr::Primitive(Primitive::Boolean),
                "object" => TypeExpr::Record,
                _ => TypeExpr::Unknown,
            },

            "type_identifier" | "nested_type_identifier" => {
                TypeExpr::Reference(self.node_text(node).to_string())
            }

            // `Array<T>`, `Record<K, V>`: only the head name is kept
            "generic_type" => node
                .child_by_field_name("name")
                .map(|n| TypeExpr::Reference(self.node_text(n).to_string()))
                .unwrap_or(TypeExpr::Unknown),

            "array_type" => {
                let inner = first_named_child(node)
                    .map(|n| self.extract_type(n))
                    .unwrap_or(TypeExpr::Unknown);
                TypeExpr::Array(Box::new(inner))
            }

            "union_type" => {
                let mut members = Vec::new();
                self.flatten_union_type(node, &mut members);
                TypeExpr::Union(members)
            }

            "literal_type" => self.extract_literal_type(node),

            "tuple_type" => {
                let mut cursor = node.walk();
                let elements = node
                    .named_children(&mut cursor)
                    .filter(|n| n.kind() != "comment")
                    .map(|n| self.extract_type(n))
                    .collect();
                TypeExpr::Tuple(elements)
            }

            "parenthesized_type" => first_named_child(node)
                .map(|n| self.extract_type(n))
                .unwrap_or(TypeExpr::Unknown),

            _ => TypeExpr::Unknown,
        }
    }

    fn flatten_union_type(&self, node: Node, out: &mut Vec<TypeExpr>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "union_type" => self.flatten_union_type(child, out),
                "comment" => {}
                _ => out.push(self.extract_type(child)),
            }
        }
    }

    fn extract_literal_type(&self, node: Node) -> TypeExpr {
        let Some(child) = first_named_child(node) else {
            return TypeExpr::Unknown;
        };
        match child.kind() {
            "string" => TypeExpr::Literal(Literal::String(self.string_content(child))),
            "number" | "unary_expression" => {
                let text: String = self
                    .node_text(child)
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                match text.parse::<f64>() {
                    Ok(n) if n.is_finite() => TypeExpr::Literal(Literal::Number(n)),
                    _ => TypeExpr::Unknown,
                }
            }
            "true" => TypeExpr::Literal(Literal::Bool(true)),
            "false" => TypeExpr::Literal(Literal::Bool(false)),
            "null" => TypeExpr::Literal(Literal::Null),
            _ => TypeExpr::Unknown,
        }
    }

    /// Content of a string node with quotes removed and escapes resolved.
    fn string_content(&self, node: Node) -> String {
        let mut out = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "string_fragment" => out.push_str(self.node_text(child)),
                "escape_sequence" => out.push_str(&unescape(self.node_text(child))),
                _ => {}
            }
        }
        out
    }
}

fn first_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|n| n.kind() != "comment")
}

fn unescape(seq: &str) -> String {
    match seq {
        "\\n" => "\n".into(),
        "\\t" => "\t".into(),
        "\\r" => "\r".into(),
        "\\0" => "\0".into(),
        _ => seq.strip_prefix('\\').unwrap_or(seq).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<TypeDeclaration> {
        parse_typescript_declarations(source).unwrap()
    }

    fn field_type(source: &str) -> TypeExpr {
        let decls = parse(&format!("export type T = {{ f: {} }};", source));
        decls[0].fields[0].ty.clone()
    }

    #[test]
    fn test_exported_record_alias() {
        let decls = parse(
            r#"
            export type Course = {
                title: string;
                price: number;
                description?: string;
                readonly code: string;
            };
            "#,
        );
        assert_eq!(decls.len(), 1);
        let decl = &decls[0];
        assert_eq!(decl.name, "Course");
        assert_eq!(decl.fields.len(), 4);
        assert_eq!(decl.fields[0].name, "title");
        assert!(!decl.fields[0].optional);
        assert_eq!(decl.fields[1].ty, TypeExpr::Primitive(Primitive::Number));
        assert!(decl.fields[2].optional);
        assert!(decl.fields[3].immutable);
        assert!(!decl.fields[3].optional);
    }

    #[test]
    fn test_skips_non_exported_and_non_record() {
        let decls = parse(
            r#"
            type Hidden = { a: string };
            export type Id = string;
            export interface Shape { a: string }
            export enum Color { Red }
            export type Visible = { b: number };
            "#,
        );
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Visible");
    }

    #[test]
    fn test_discovery_order() {
        let decls = parse(
            r#"
            export type B = { x: string };
            export type A = { y: string };
            "#,
        );
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_no_exports() {
        assert!(parse("type A = { x: string };").is_empty());
    }

    #[test]
    fn test_quoted_property_name() {
        let decls = parse(r#"export type T = { "unit-price": number };"#);
        assert_eq!(decls[0].fields[0].name, "unit-price");
    }

    #[test]
    fn test_methods_are_not_fields() {
        let decls = parse("export type T = { a: string; run(): void; [key: string]: unknown };");
        assert_eq!(decls[0].fields.len(), 1);
        assert_eq!(decls[0].fields[0].name, "a");
    }

    #[test]
    fn test_primitives() {
        assert_eq!(field_type("string"), TypeExpr::Primitive(Primitive::String));
        assert_eq!(field_type("boolean"), TypeExpr::Primitive(Primitive::Boolean));
        assert_eq!(field_type("object"), TypeExpr::Record);
        assert_eq!(field_type("unknown"), TypeExpr::Unknown);
    }

    #[test]
    fn test_array_and_tuple() {
        assert_eq!(
            field_type("string[]"),
            TypeExpr::Array(Box::new(TypeExpr::Primitive(Primitive::String)))
        );
        assert_eq!(
            field_type("[string, number]"),
            TypeExpr::Tuple(vec![
                TypeExpr::Primitive(Primitive::String),
                TypeExpr::Primitive(Primitive::Number),
            ])
        );
    }

    #[test]
    fn test_union_keeps_order_and_literals() {
        assert_eq!(
            field_type(r#"string | "x" | 3 | -1 | true | null"#),
            TypeExpr::Union(vec![
                TypeExpr::Primitive(Primitive::String),
                TypeExpr::Literal(Literal::String("x".into())),
                TypeExpr::Literal(Literal::Number(3.0)),
                TypeExpr::Literal(Literal::Number(-1.0)),
                TypeExpr::Literal(Literal::Bool(true)),
                TypeExpr::Literal(Literal::Null),
            ])
        );
    }

    #[test]
    fn test_references() {
        assert_eq!(field_type("Date"), TypeExpr::Reference("Date".into()));
        assert_eq!(
            field_type("Array<string>"),
            TypeExpr::Reference("Array".into())
        );
    }

    #[test]
    fn test_parenthesized_and_inline_object() {
        assert_eq!(
            field_type("(string | number)[]"),
            TypeExpr::Array(Box::new(TypeExpr::Union(vec![
                TypeExpr::Primitive(Primitive::String),
                TypeExpr::Primitive(Primitive::Number),
            ])))
        );
        assert_eq!(field_type("{ name: string }"), TypeExpr::Unknown);
    }
}

//! Intermediate representation for extracted declarations.
//!
//! The TypeScript reader normalizes the declaration source to this IR before
//! the policy and translation passes run.

use serde::{Deserialize, Serialize};

/// An exported record type found in the declaration source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Type name (e.g., "Course").
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDeclaration>,
}

/// A property signature inside a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Property name as written (quotes removed).
    pub name: String,
    /// Declared type.
    pub ty: TypeExpr,
    /// Marked with `?`.
    pub optional: bool,
    /// Marked `readonly`.
    pub immutable: bool,
}

/// A declared type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    Primitive(Primitive),
    Array(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    Literal(Literal),
    Tuple(Vec<TypeExpr>),
    /// Named type reference (`Date`, `Owner`, `Array<T>`).
    Reference(String),
    /// The `object` keyword.
    Record,
    /// Anything the reader does not model.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
}

/// A literal type value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Key used in the generated lookup tables.
    pub fn table_key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl FieldDeclaration {
    pub fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            immutable: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            optional: true,
            ..Self::required(name, ty)
        }
    }

    pub fn readonly(mut self) -> Self {
        self.immutable = true;
        self
    }
}

impl From<Primitive> for TypeExpr {
    fn from(p: Primitive) -> Self {
        TypeExpr::Primitive(p)
    }
}

impl From<Literal> for TypeExpr {
    fn from(l: Literal) -> Self {
        TypeExpr::Literal(l)
    }
}

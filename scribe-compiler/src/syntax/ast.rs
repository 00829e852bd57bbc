use serde::{Deserialize, Serialize};

use super::text::SourceText;
use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    RecordStruct,
    Delegate,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
            Self::Delegate => "delegate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
    Destructor,
    Event,
    Indexer,
    Operator,
    EnumMember,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSymbol {
    pub kind: MemberKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
}

/// A declared type, with its members and nested types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub arity: usize,
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberSymbol>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<TypeSymbol>,
    /// Byte offset of the type name in its source.
    #[serde(skip)]
    pub offset: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl TypeSymbol {
    /// Namespace-qualified name, with a `` `N `` suffix for generic arity.
    pub fn full_name(&self) -> String {
        let mut name = match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        };
        if self.arity > 0 {
            name.push_str(&format!("`{}", self.arity));
        }
        name
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.members
            .iter()
            .any(|m| m.kind == MemberKind::Method && m.name == name)
            || self.nested.iter().any(|t| t.has_method(name))
    }
}

/// A parsed source fragment.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub source: SourceText,
    pub usings: Vec<String>,
    pub types: Vec<TypeSymbol>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

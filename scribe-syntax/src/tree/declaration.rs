use super::{Attribute, MemberDeclaration, Modifiers, ParameterList, TypeName};

/// The nominal type kinds the builders produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
        }
    }
}

/// How a namespace wraps its members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamespaceType {
    /// `namespace A { ... }`
    #[default]
    Classic,
    /// `namespace A;` followed by the members.
    FileScoped,
}

/// What follows the declaration head of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    /// `;` directly after the head. Used when the type has no members.
    Terminated,
    /// `{ members }`, with members already in rendering order.
    Braced(Vec<MemberDeclaration>),
}

/// A class or struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub attributes: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub name: String,
    /// Primary constructor parameters; `None` when the head has no list.
    pub parameter_list: Option<ParameterList>,
    pub base_list: Vec<TypeName>,
    pub body: TypeBody,
}

impl TypeDeclaration {
    /// The declaration head without body or terminator, e.g.
    /// `public class Point(int X, int Y) : IShape`.
    pub fn head(&self) -> String {
        let mut head = format!(
            "{}{} {}",
            self.modifiers.prefix(),
            self.kind.keyword(),
            self.name
        );
        if let Some(parameters) = &self.parameter_list {
            head.push_str(&parameters.to_string());
        }
        if !self.base_list.is_empty() {
            let bases: Vec<&str> = self.base_list.iter().map(TypeName::as_str).collect();
            head.push_str(" : ");
            head.push_str(&bases.join(", "));
        }
        head
    }

    pub fn members(&self) -> &[MemberDeclaration] {
        match &self.body {
            TypeBody::Terminated => &[],
            TypeBody::Braced(members) => members,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDeclaration {
    pub name: String,
    pub kind: NamespaceType,
    pub members: Vec<TypeDeclaration>,
}

/// A top-level item of a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceMember {
    Namespace(NamespaceDeclaration),
    Type(TypeDeclaration),
}

/// A whole source file: using directives followed by namespaces or types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub usings: Vec<String>,
    pub members: Vec<NamespaceMember>,
}

impl CompilationUnit {
    /// All type declarations in the unit, in source order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.members.iter().flat_map(|member| match member {
            NamespaceMember::Namespace(ns) => ns.members.as_slice(),
            NamespaceMember::Type(ty) => std::slice::from_ref(ty),
        })
    }
}

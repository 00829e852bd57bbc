//! Syntax tree for type declarations of the target language.
//!
//! Nodes are plain immutable values. Builders assemble them and the
//! [`render`](crate::render) module turns them into source text.

mod declaration;
mod members;
mod modifier;
mod type_name;

pub use declaration::{
    CompilationUnit, NamespaceDeclaration, NamespaceMember, NamespaceType, TypeBody,
    TypeDeclaration, TypeKind,
};
pub use members::{
    Attribute, ConstructorDeclaration, ConstructorInitializer, FieldDeclaration, InitializerKind,
    MemberDeclaration, MemberKind, MethodBody, MethodDeclaration, Parameter, ParameterList,
    ParameterModifier, PropertyBody, PropertyDeclaration, Setter,
};
pub use modifier::{Modifier, Modifiers};
pub use type_name::TypeName;

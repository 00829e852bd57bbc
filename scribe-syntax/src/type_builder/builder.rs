use std::marker::PhantomData;

use crate::{
    generators::{Field, FieldGenerator, ParameterGenerator, Property, PropertyGenerator},
    tree::{
        Attribute, CompilationUnit, ConstructorDeclaration, FieldDeclaration, MethodDeclaration,
        Modifier, Modifiers, NamespaceDeclaration, NamespaceMember, NamespaceType, Parameter,
        TypeBody, TypeDeclaration, TypeKind, TypeName,
    },
};

use super::MemberContainer;

/// Declaration kind selected by a [`TypeBuilder`].
pub trait DeclarationKind {
    const KIND: TypeKind;
}

/// Marker for class declarations.
#[derive(Debug, Clone, Copy)]
pub struct Class;

/// Marker for struct declarations.
#[derive(Debug, Clone, Copy)]
pub struct Struct;

impl DeclarationKind for Class {
    const KIND: TypeKind = TypeKind::Class;
}

impl DeclarationKind for Struct {
    const KIND: TypeKind = TypeKind::Struct;
}

/// Builder for a class declaration.
pub type ClassBuilder = TypeBuilder<Class>;

/// Builder for a struct declaration.
pub type StructBuilder = TypeBuilder<Struct>;

/// Accumulates the declaration of one type and builds it on demand.
///
/// Every `with_*` method consumes the builder and hands it back, so a
/// half-configured builder is never observable from two places. Methods
/// that add members append; methods that set the head (modifiers,
/// attributes, base types, primary constructor, usings) replace.
///
/// [`build`](Self::build) does not consume the builder. Building an
/// unmodified builder twice yields equal trees.
///
/// # Example
///
/// ```
/// use cscribe_syntax::{generators::Field, render::CodeSaver, type_builder::ClassBuilder};
///
/// let unit = ClassBuilder::new("Person", "Models")
///     .with_fields([Field::new("_name", "string")])
///     .build();
///
/// let code = CodeSaver::new().save_code_as_string(&unit);
/// assert!(code.contains("public class Person"));
/// assert!(code.contains("string _name;"));
/// ```
#[derive(Debug, Clone)]
pub struct TypeBuilder<K> {
    name: String,
    namespace: String,
    namespace_type: NamespaceType,
    usings: Vec<String>,
    attributes: Vec<Attribute>,
    modifiers: Modifiers,
    base_types: Vec<TypeName>,
    primary_constructor: Option<Vec<Parameter>>,
    members: MemberContainer,
    kind: PhantomData<K>,
}

impl<K: DeclarationKind> TypeBuilder<K> {
    /// Start a public type named `name`. An empty `namespace` means the type
    /// is emitted without a namespace wrapper.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            namespace_type: NamespaceType::Classic,
            usings: Vec::new(),
            attributes: Vec::new(),
            modifiers: Modifiers::from([Modifier::Public]),
            base_types: Vec::new(),
            primary_constructor: None,
            members: MemberContainer::new(),
            kind: PhantomData,
        }
    }

    /// Choose between a block-scoped and a file-scoped namespace wrapper.
    pub fn with_namespace_type(mut self, namespace_type: NamespaceType) -> Self {
        self.namespace_type = namespace_type;
        self
    }

    pub fn with_usings<S: Into<String>>(mut self, usings: impl IntoIterator<Item = S>) -> Self {
        self.usings = usings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes = attributes.into_iter().collect();
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// Base class and implemented interfaces, in declaration order.
    pub fn with_base_types<T: Into<TypeName>>(
        mut self,
        base_types: impl IntoIterator<Item = T>,
    ) -> Self {
        self.base_types = base_types.into_iter().map(Into::into).collect();
        self
    }

    /// Add fields from semantic descriptions.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        let nodes = fields.into_iter().map(|f| FieldGenerator::create(&f));
        self.members.extend(nodes);
        self
    }

    /// Add already-built field nodes.
    pub fn with_field_declarations(
        mut self,
        fields: impl IntoIterator<Item = FieldDeclaration>,
    ) -> Self {
        self.members.extend(fields);
        self
    }

    /// Add already-built constructor nodes.
    pub fn with_constructors(
        mut self,
        constructors: impl IntoIterator<Item = ConstructorDeclaration>,
    ) -> Self {
        self.members.extend(constructors);
        self
    }

    pub fn with_properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        let nodes = properties.into_iter().map(|p| PropertyGenerator::create(&p));
        self.members.extend(nodes);
        self
    }

    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodDeclaration>) -> Self {
        self.members.extend(methods);
        self
    }

    /// Set the primary constructor parameters. Replaces any earlier list and
    /// changes only the declaration head, never the body.
    pub fn with_primary_constructor(
        mut self,
        parameters: impl IntoIterator<Item = Parameter>,
    ) -> Self {
        self.primary_constructor = Some(parameters.into_iter().collect());
        self
    }

    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }

    /// Build the type wrapped in its namespace (if any) as a compilation unit.
    pub fn build(&self) -> CompilationUnit {
        let declaration = self.build_type();
        let member = if self.namespace.is_empty() {
            NamespaceMember::Type(declaration)
        } else {
            NamespaceMember::Namespace(NamespaceDeclaration {
                name: self.namespace.clone(),
                kind: self.namespace_type,
                members: vec![declaration],
            })
        };

        tracing::trace!(
            name = %self.name,
            kind = K::KIND.keyword(),
            members = self.members.len(),
            "built type declaration"
        );

        CompilationUnit {
            usings: self.usings.clone(),
            members: vec![member],
        }
    }

    /// Build only the type declaration, without namespace or usings.
    pub fn build_type(&self) -> TypeDeclaration {
        // A primary constructor only touches the head; an empty list is
        // treated as absent.
        let parameter_list = self
            .primary_constructor
            .as_deref()
            .filter(|parameters| !parameters.is_empty())
            .map(ParameterGenerator::create);

        // Members force a braced body even after a parameter list. Without
        // members the head is terminated, primary constructor or not.
        let body = if self.has_members() {
            TypeBody::Braced(self.members.ordered().cloned().collect())
        } else {
            TypeBody::Terminated
        };

        TypeDeclaration {
            kind: K::KIND,
            attributes: self.attributes.clone(),
            modifiers: self.modifiers.clone(),
            name: self.name.clone(),
            parameter_list,
            base_list: self.base_types.clone(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{ConstructorBuilder, MethodBuilder},
        tree::MemberKind,
    };

    #[test]
    fn test_empty_builder_is_terminated() {
        let decl = ClassBuilder::new("TestClass", "test").build_type();
        assert_eq!(decl.body, TypeBody::Terminated);
        assert_eq!(decl.kind, TypeKind::Class);
        assert_eq!(decl.modifiers.to_string(), "public");
    }

    #[test]
    fn test_primary_constructor_without_members_is_terminated() {
        let decl = StructBuilder::new("Point", "")
            .with_primary_constructor([Parameter::new("X", "int"), Parameter::new("Y", "int")])
            .build_type();
        assert_eq!(decl.body, TypeBody::Terminated);
        assert_eq!(decl.parameter_list.unwrap().len(), 2);
    }

    #[test]
    fn test_empty_primary_constructor_is_absent() {
        let decl = ClassBuilder::new("A", "")
            .with_primary_constructor([])
            .build_type();
        assert_eq!(decl.parameter_list, None);
    }

    #[test]
    fn test_primary_constructor_replaces() {
        let decl = ClassBuilder::new("A", "")
            .with_primary_constructor([Parameter::new("a", "int")])
            .with_primary_constructor([Parameter::new("b", "string")])
            .build_type();
        let params = decl.parameter_list.unwrap();
        assert_eq!(params.to_string(), "(string b)");
    }

    #[test]
    fn test_members_are_braced_in_group_order() {
        let decl = ClassBuilder::new("Person", "")
            .with_methods([MethodBuilder::new("Greet").build()])
            .with_constructors([ConstructorBuilder::new("Person").build()])
            .with_fields([Field::new("_a", "int")])
            .with_properties([Property::auto("Name", "string")])
            .with_field_declarations([FieldDeclaration::new("int", "_b")])
            .build_type();

        let kinds: Vec<MemberKind> = decl.members().iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            [
                MemberKind::Field,
                MemberKind::Field,
                MemberKind::Constructor,
                MemberKind::Method,
                MemberKind::Property,
            ]
        );
        assert_eq!(decl.members()[1].name(), "_b");
    }

    #[test]
    fn test_head_settings_replace() {
        let decl = ClassBuilder::new("Repo", "")
            .with_modifiers([Modifier::Public])
            .with_modifiers([Modifier::Internal, Modifier::Sealed])
            .with_base_types(["BaseRepo"])
            .with_base_types(["IRepo", "IDisposable"])
            .build_type();
        assert_eq!(decl.modifiers.to_string(), "internal sealed");
        assert_eq!(decl.head(), "internal sealed class Repo : IRepo, IDisposable");
    }

    #[test]
    fn test_namespace_wrapping() {
        let unit = ClassBuilder::new("A", "").build();
        assert!(matches!(unit.members[..], [NamespaceMember::Type(_)]));

        let unit = StructBuilder::new("A", "Geo")
            .with_namespace_type(NamespaceType::FileScoped)
            .with_usings(["System"])
            .build();
        let NamespaceMember::Namespace(ns) = &unit.members[0] else {
            panic!("expected namespace");
        };
        assert_eq!(ns.kind, NamespaceType::FileScoped);
        assert_eq!(ns.members[0].kind, TypeKind::Struct);
        assert_eq!(unit.usings, ["System"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = ClassBuilder::new("A", "ns").with_fields([Field::new("x", "int")]);
        assert_eq!(builder.build(), builder.build());
    }
}

//! Generate operation - one type declaration from command-line parts.

use std::str::FromStr;

use cscribe_core::is_identifier;
use cscribe_syntax::{
    generators::{Field, Property},
    tree::{CompilationUnit, NamespaceType, Parameter},
    type_builder::{ClassBuilder, DeclarationKind, StructBuilder, TypeBuilder},
};
use eyre::{Result, bail};

/// A `name:type` pair as written on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub ty: String,
}

impl FromStr for Member {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, ty) = s
            .split_once(':')
            .ok_or_else(|| format!("expected 'name:type', got '{s}'"))?;
        let (name, ty) = (name.trim(), ty.trim());
        if name.is_empty() || ty.is_empty() {
            return Err(format!("expected 'name:type', got '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            ty: ty.to_string(),
        })
    }
}

/// Everything needed to declare one class or struct.
#[derive(Debug, Clone, Default)]
pub struct TypeSpec {
    pub name: String,
    pub namespace: String,
    pub is_struct: bool,
    pub file_scoped: bool,
    pub usings: Vec<String>,
    pub base_types: Vec<String>,
    pub fields: Vec<Member>,
    pub properties: Vec<Member>,
    pub primary: Vec<Member>,
}

/// Build the compilation unit for `spec`.
///
/// Field names are escaped when they collide with keywords; the type name is
/// not and must already be a valid identifier.
pub fn generate(spec: &TypeSpec) -> Result<CompilationUnit> {
    if !is_identifier(&spec.name) {
        bail!("'{}' is not a valid type name", spec.name);
    }

    let unit = if spec.is_struct {
        configure(StructBuilder::new(&spec.name, &spec.namespace), spec).build()
    } else {
        configure(ClassBuilder::new(&spec.name, &spec.namespace), spec).build()
    };
    tracing::debug!(name = %spec.name, is_struct = spec.is_struct, "generated type");
    Ok(unit)
}

fn configure<K: DeclarationKind>(builder: TypeBuilder<K>, spec: &TypeSpec) -> TypeBuilder<K> {
    let namespace_type = if spec.file_scoped {
        NamespaceType::FileScoped
    } else {
        NamespaceType::Classic
    };

    let builder = builder
        .with_namespace_type(namespace_type)
        .with_usings(spec.usings.iter().cloned())
        .with_base_types(spec.base_types.iter().map(String::as_str))
        .with_fields(spec.fields.iter().map(|m| Field::new(&m.name, m.ty.as_str())))
        .with_properties(
            spec.properties
                .iter()
                .map(|m| Property::auto(&m.name, m.ty.as_str())),
        );

    if spec.primary.is_empty() {
        builder
    } else {
        builder.with_primary_constructor(
            spec.primary
                .iter()
                .map(|m| Parameter::new(&m.name, m.ty.as_str())),
        )
    }
}

#[cfg(test)]
mod tests {
    use cscribe_syntax::{CodeSaver, testing::remove_whitespace};

    use super::*;

    fn render(spec: &TypeSpec) -> String {
        CodeSaver::new().save_code_as_string(&generate(spec).unwrap())
    }

    #[test]
    fn test_member_from_str() {
        let member: Member = "count : int".parse().unwrap();
        assert_eq!(member.name, "count");
        assert_eq!(member.ty, "int");

        let generic: Member = "items:List<string>".parse().unwrap();
        assert_eq!(generic.ty, "List<string>");

        assert!("count".parse::<Member>().is_err());
        assert!(":int".parse::<Member>().is_err());
    }

    #[test]
    fn test_generate_empty_class() {
        let spec = TypeSpec {
            name: "TestClass".into(),
            namespace: "test".into(),
            ..Default::default()
        };
        assert_eq!(
            remove_whitespace(&render(&spec)),
            remove_whitespace("namespace test { public class TestClass; }")
        );
    }

    #[test]
    fn test_generate_struct_with_members() {
        let spec = TypeSpec {
            name: "Point".into(),
            namespace: "Geometry".into(),
            is_struct: true,
            file_scoped: true,
            fields: vec!["x:int".parse().unwrap(), "class:string".parse().unwrap()],
            properties: vec!["Label:string".parse().unwrap()],
            ..Default::default()
        };
        let code = render(&spec);
        assert!(code.starts_with("namespace Geometry;\n"));
        assert!(code.contains("public struct Point"));
        assert!(code.contains("int x;"));
        assert!(code.contains("string @class;"));
        assert!(code.contains("public string Label { get; set; }"));
    }

    #[test]
    fn test_generate_primary_constructor_and_bases() {
        let spec = TypeSpec {
            name: "Person".into(),
            base_types: vec!["Entity".into(), "IComparable".into()],
            primary: vec!["name:string".parse().unwrap()],
            ..Default::default()
        };
        let code = render(&spec);
        assert!(code.contains("public class Person(string name) : Entity, IComparable;"));
    }

    #[test]
    fn test_generate_rejects_bad_type_name() {
        let spec = TypeSpec {
            name: "1Thing".into(),
            ..Default::default()
        };
        assert!(generate(&spec).is_err());
    }
}

//! [`Renderable`] implementations for tree nodes.

use super::FormatOptions;
use crate::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    tree::{
        Attribute, CompilationUnit, ConstructorDeclaration, FieldDeclaration, MemberDeclaration,
        MemberKind, MethodBody, MethodDeclaration, NamespaceDeclaration, NamespaceMember,
        NamespaceType, PropertyBody, PropertyDeclaration, TypeBody, TypeDeclaration,
    },
};

/// Render a node to source text.
pub fn render(node: &impl Renderable, options: &FormatOptions) -> String {
    let mut builder = CodeBuilder::new(options.indentation);
    builder.emit(node, options);
    builder.build()
}

fn attribute_lines(attributes: &[Attribute]) -> impl Iterator<Item = CodeFragment> + '_ {
    attributes.iter().map(|a| CodeFragment::line(a.to_string()))
}

/// Join groups of fragments with blank lines.
fn separated(groups: impl IntoIterator<Item = Vec<CodeFragment>>) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    for (i, group) in groups.into_iter().enumerate() {
        if i > 0 {
            fragments.push(CodeFragment::Blank);
        }
        fragments.extend(group);
    }
    fragments
}

impl Renderable for CompilationUnit {
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .usings
            .iter()
            .map(|u| CodeFragment::line(format!("using {u};")))
            .collect();
        if !fragments.is_empty() && !self.members.is_empty() {
            fragments.push(CodeFragment::Blank);
        }
        fragments.extend(separated(
            self.members.iter().map(|m| m.to_fragments(options)),
        ));
        fragments
    }
}

impl Renderable for NamespaceMember {
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment> {
        match self {
            Self::Namespace(ns) => ns.to_fragments(options),
            Self::Type(ty) => ty.to_fragments(options),
        }
    }
}

impl Renderable for NamespaceDeclaration {
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment> {
        let types = separated(self.members.iter().map(|t| t.to_fragments(options)));
        match self.kind {
            NamespaceType::Classic => vec![CodeFragment::braced(
                format!("namespace {}", self.name),
                types,
                options.new_lines_for_braces_in_types,
            )],
            NamespaceType::FileScoped => {
                let mut fragments = vec![CodeFragment::line(format!("namespace {};", self.name))];
                if !types.is_empty() {
                    fragments.push(CodeFragment::Blank);
                    fragments.extend(types);
                }
                fragments
            }
        }
    }
}

impl Renderable for TypeDeclaration {
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = attribute_lines(&self.attributes).collect();
        match &self.body {
            TypeBody::Terminated => fragments.push(CodeFragment::line(format!("{};", self.head()))),
            TypeBody::Braced(members) => fragments.push(CodeFragment::braced(
                self.head(),
                member_fragments(members, options),
                options.new_lines_for_braces_in_types,
            )),
        }
        fragments
    }
}

fn member_fragments(members: &[MemberDeclaration], options: &FormatOptions) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    let mut previous: Option<MemberKind> = None;
    for member in members {
        let both_fields = previous == Some(MemberKind::Field) && member.kind() == MemberKind::Field;
        if previous.is_some() && options.blank_line_between_members && !both_fields {
            fragments.push(CodeFragment::Blank);
        }
        fragments.extend(member.to_fragments(options));
        previous = Some(member.kind());
    }
    fragments
}

impl Renderable for MemberDeclaration {
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment> {
        match self {
            Self::Field(node) => node.to_fragments(options),
            Self::Constructor(node) => node.to_fragments(options),
            Self::Property(node) => node.to_fragments(options),
            Self::Method(node) => node.to_fragments(options),
        }
    }
}

impl Renderable for FieldDeclaration {
    fn to_fragments(&self, _options: &FormatOptions) -> Vec<CodeFragment> {
        let mut line = format!("{}{} {}", self.modifiers.prefix(), self.ty, self.name);
        if let Some(initializer) = &self.initializer {
            line.push_str(" = ");
            line.push_str(initializer);
        }
        line.push(';');
        attribute_lines(&self.attributes)
            .chain([CodeFragment::Line(line)])
            .collect()
    }
}

impl Renderable for PropertyDeclaration {
    fn to_fragments(&self, _options: &FormatOptions) -> Vec<CodeFragment> {
        let head = format!("{}{} {}", self.modifiers.prefix(), self.ty, self.name);
        let line = match &self.body {
            PropertyBody::Auto { setter } => {
                let mut line = match setter {
                    Some(setter) => format!("{head} {{ get; {} }}", setter.as_str()),
                    None => format!("{head} {{ get; }}"),
                };
                if let Some(initializer) = &self.initializer {
                    line.push_str(&format!(" = {initializer};"));
                }
                line
            }
            PropertyBody::Expression(expression) => format!("{head} => {expression};"),
        };
        attribute_lines(&self.attributes)
            .chain([CodeFragment::Line(line)])
            .collect()
    }
}

fn statements(lines: &[String]) -> Vec<CodeFragment> {
    lines.iter().map(|l| CodeFragment::line(l.as_str())).collect()
}

impl Renderable for ConstructorDeclaration {
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment> {
        let mut head = format!("{}{}{}", self.modifiers.prefix(), self.name, self.parameters);
        if let Some(initializer) = &self.initializer {
            head.push_str(&format!(" : {initializer}"));
        }
        attribute_lines(&self.attributes)
            .chain([CodeFragment::braced(
                head,
                statements(&self.body),
                options.new_lines_for_braces_in_methods,
            )])
            .collect()
    }
}

impl Renderable for MethodDeclaration {
    fn to_fragments(&self, options: &FormatOptions) -> Vec<CodeFragment> {
        let type_parameters = if self.type_parameters.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_parameters.join(", "))
        };
        let head = format!(
            "{}{} {}{}{}",
            self.modifiers.prefix(),
            self.return_type,
            self.name,
            type_parameters,
            self.parameters
        );
        let body = match &self.body {
            MethodBody::Block(lines) => CodeFragment::braced(
                head,
                statements(lines),
                options.new_lines_for_braces_in_methods,
            ),
            MethodBody::Expression(expression) => CodeFragment::line(format!("{head} => {expression};")),
            MethodBody::None => CodeFragment::line(format!("{head};")),
        };
        attribute_lines(&self.attributes).chain([body]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{ConstructorBuilder, Field, MethodBuilder, Property},
        render::FormatOption,
        tree::{Modifier, Parameter, Setter},
        type_builder::{ClassBuilder, StructBuilder},
    };

    #[test]
    fn test_empty_class_in_namespace() {
        let unit = ClassBuilder::new("TestClass", "test").build();
        let code = render(&unit, &FormatOptions::default());
        insta::assert_snapshot!(code, @r"
        namespace test
        {
            public class TestClass;
        }
        ");
    }

    #[test]
    fn test_file_scoped_namespace_with_usings() {
        let unit = StructBuilder::new("Point", "Geometry")
            .with_namespace_type(NamespaceType::FileScoped)
            .with_usings(["System"])
            .with_primary_constructor([Parameter::new("X", "int"), Parameter::new("Y", "int")])
            .build();
        let code = render(&unit, &FormatOptions::default());
        assert_eq!(
            code,
            "using System;\n\nnamespace Geometry;\n\npublic struct Point(int X, int Y);\n"
        );
    }

    #[test]
    fn test_class_with_members() {
        let unit = ClassBuilder::new("Person", "")
            .with_base_types(["IPerson"])
            .with_fields([
                Field::new("_name", "string").modifiers([Modifier::Private, Modifier::Readonly]),
                Field::new("_age", "int").modifiers([Modifier::Private]),
            ])
            .with_constructors([ConstructorBuilder::new("Person")
                .with_parameters([Parameter::new("name", "string")])
                .with_body_lines(["_name = name;"])
                .build()])
            .with_properties([Property::computed("Name", "string", "_name")])
            .build();
        let code = render(&unit, &FormatOptions::default());
        insta::assert_snapshot!(code, @r"
        public class Person : IPerson
        {
            private readonly string _name;
            private int _age;

            public Person(string name)
            {
                _name = name;
            }

            public string Name => _name;
        }
        ");
    }

    #[test]
    fn test_same_line_braces() {
        let unit = ClassBuilder::new("TestClass", "test")
            .with_methods([MethodBuilder::new("MyMethod").build()])
            .build();
        let options = FormatOptions::with_overrides([
            FormatOption::NewLinesForBracesInTypes(false),
            FormatOption::NewLinesForBracesInMethods(false),
        ]);
        assert_eq!(
            render(&unit, &options),
            "namespace test {\n    public class TestClass {\n        void MyMethod() {\n        }\n    }\n}\n"
        );
    }

    #[test]
    fn test_method_bodies() {
        let abstract_method = MethodBuilder::new("Area")
            .with_modifiers([Modifier::Public, Modifier::Abstract])
            .with_return_type("double")
            .without_body()
            .build();
        let generic = MethodBuilder::new("Map")
            .with_type_parameters(["T"])
            .with_return_type("T")
            .with_parameters([Parameter::new("value", "T")])
            .with_expression_body("value")
            .build();
        let options = FormatOptions::default();

        assert_eq!(
            render(&MemberDeclaration::from(abstract_method), &options),
            "public abstract double Area();\n"
        );
        assert_eq!(
            render(&MemberDeclaration::from(generic), &options),
            "T Map<T>(T value) => value;\n"
        );
    }

    #[test]
    fn test_property_and_attributes() {
        let property = crate::generators::PropertyGenerator::create(
            &Property::auto("Id", "int")
                .setter(Some(Setter::Init))
                .attribute(Attribute::new("Key"))
                .initializer("1"),
        );
        assert_eq!(
            render(&property, &FormatOptions::default()),
            "[Key]\npublic int Id { get; init; } = 1;\n"
        );
    }

    #[test]
    fn test_constructor_initializer_and_tab_indent() {
        let ctor = ConstructorBuilder::new("Child")
            .with_parameters([Parameter::new("id", "int")])
            .with_base_initializer(["id"])
            .with_body_lines(["Init();"])
            .build();
        let options = FormatOptions::with_overrides([FormatOption::Indentation(
            crate::builder::Indent::Tab,
        )]);
        assert_eq!(
            render(&ctor, &options),
            "public Child(int id) : base(id)\n{\n\tInit();\n}\n"
        );
    }
}

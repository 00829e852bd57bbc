//! Member nodes: everything that can appear inside a type body.

use std::fmt;

use super::{Modifiers, TypeName};

/// An attribute, rendered as `[Name]` or `[Name(arg, ...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub arguments: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn arg(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "[{}({})]", self.name, self.arguments.join(", "))
        }
    }
}

/// Modifier placed before a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterModifier {
    Ref,
    Out,
    In,
    Params,
    This,
}

impl ParameterModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ref => "ref",
            Self::Out => "out",
            Self::In => "in",
            Self::Params => "params",
            Self::This => "this",
        }
    }
}

/// A single parameter of a method, constructor or primary constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeName,
    pub modifier: Option<ParameterModifier>,
    pub default: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifier: None,
            default: None,
            attributes: Vec::new(),
        }
    }

    pub fn modifier(mut self, modifier: ParameterModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Default value expression, rendered as `= value`.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in &self.attributes {
            write!(f, "{attribute} ")?;
        }
        if let Some(modifier) = self.modifier {
            write!(f, "{} ", modifier.as_str())?;
        }
        write!(f, "{} {}", self.ty, self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// A parenthesized parameter list, rendered as `(int a, string b)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList(pub Vec<Parameter>);

impl ParameterList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, parameter) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}

/// `Type name = initializer;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub ty: TypeName,
    pub name: String,
    pub initializer: Option<String>,
}

impl FieldDeclaration {
    pub fn new(ty: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Modifiers::new(),
            ty: ty.into(),
            name: name.into(),
            initializer: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl Into<Modifiers>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }
}

/// Accessor of an auto-property that can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setter {
    Set,
    PrivateSet,
    Init,
}

impl Setter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Set => "set;",
            Self::PrivateSet => "private set;",
            Self::Init => "init;",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyBody {
    /// `{ get; set; }`; a missing setter makes the property get-only.
    Auto { setter: Option<Setter> },
    /// `=> expression;`
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub ty: TypeName,
    pub name: String,
    pub body: PropertyBody,
    /// Only meaningful for auto-properties.
    pub initializer: Option<String>,
}

/// Which constructor a `: base(...)` / `: this(...)` initializer chains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializerKind {
    Base,
    This,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorInitializer {
    pub kind: InitializerKind,
    pub arguments: Vec<String>,
}

impl fmt::Display for ConstructorInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.kind {
            InitializerKind::Base => "base",
            InitializerKind::This => "this",
        };
        write!(f, "{keyword}({})", self.arguments.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub name: String,
    pub parameters: ParameterList,
    pub initializer: Option<ConstructorInitializer>,
    /// Statements, one per line.
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    /// `{ statements }`
    Block(Vec<String>),
    /// `=> expression;`
    Expression(String),
    /// `;` (abstract, partial or interface methods)
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub return_type: TypeName,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub parameters: ParameterList,
    pub body: MethodBody,
}

/// Kind tag of a member, used to group members inside a type body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Constructor,
    Property,
    Method,
}

/// A member fragment: one already-built member node tagged by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDeclaration {
    Field(FieldDeclaration),
    Constructor(ConstructorDeclaration),
    Property(PropertyDeclaration),
    Method(MethodDeclaration),
}

impl MemberDeclaration {
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Field(_) => MemberKind::Field,
            Self::Constructor(_) => MemberKind::Constructor,
            Self::Property(_) => MemberKind::Property,
            Self::Method(_) => MemberKind::Method,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Field(f) => &f.name,
            Self::Constructor(c) => &c.name,
            Self::Property(p) => &p.name,
            Self::Method(m) => &m.name,
        }
    }
}

impl From<FieldDeclaration> for MemberDeclaration {
    fn from(node: FieldDeclaration) -> Self {
        Self::Field(node)
    }
}

impl From<ConstructorDeclaration> for MemberDeclaration {
    fn from(node: ConstructorDeclaration) -> Self {
        Self::Constructor(node)
    }
}

impl From<PropertyDeclaration> for MemberDeclaration {
    fn from(node: PropertyDeclaration) -> Self {
        Self::Property(node)
    }
}

impl From<MethodDeclaration> for MemberDeclaration {
    fn from(node: MethodDeclaration) -> Self {
        Self::Method(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_display() {
        let p = Parameter::new("values", TypeName::array(TypeName::int()))
            .modifier(ParameterModifier::Params);
        assert_eq!(p.to_string(), "params int[] values");

        let p = Parameter::new("retries", "int").default_value("3");
        assert_eq!(p.to_string(), "int retries = 3");
    }

    #[test]
    fn test_parameter_list_display() {
        let list = ParameterList(vec![
            Parameter::new("x", "int"),
            Parameter::new("name", "string").attribute(Attribute::new("NotNull")),
        ]);
        assert_eq!(list.to_string(), "(int x, [NotNull] string name)");
        assert_eq!(ParameterList::default().to_string(), "()");
    }

    #[test]
    fn test_attribute_display() {
        assert_eq!(Attribute::new("Serializable").to_string(), "[Serializable]");
        assert_eq!(
            Attribute::new("Obsolete").arg("\"use Bar\"").arg("true").to_string(),
            "[Obsolete(\"use Bar\", true)]"
        );
    }

    #[test]
    fn test_member_kind() {
        let member: MemberDeclaration = FieldDeclaration::new("int", "_count").into();
        assert_eq!(member.kind(), MemberKind::Field);
        assert_eq!(member.name(), "_count");
    }
}

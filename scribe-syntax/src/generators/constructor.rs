use crate::{
    generators::ParameterGenerator,
    tree::{
        Attribute, ConstructorDeclaration, ConstructorInitializer, InitializerKind, Modifier,
        Parameter,
    },
};

/// Builder for constructor declarations.
///
/// ```
/// use cscribe_syntax::{generators::ConstructorBuilder, tree::Parameter};
///
/// let ctor = ConstructorBuilder::new("Person")
///     .with_parameters([Parameter::new("name", "string")])
///     .with_body_lines(["Name = name;"])
///     .build();
/// assert_eq!(ctor.body, ["Name = name;"]);
/// ```
#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    type_name: String,
    modifiers: Vec<Modifier>,
    attributes: Vec<Attribute>,
    parameters: Vec<Parameter>,
    initializer: Option<ConstructorInitializer>,
    body: Vec<String>,
}

impl ConstructorBuilder {
    /// A public, parameterless constructor for `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            modifiers: vec![Modifier::Public],
            attributes: Vec::new(),
            parameters: Vec::new(),
            initializer: None,
            body: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes = attributes.into_iter().collect();
        self
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }

    /// Chain to a base class constructor: `: base(args)`.
    pub fn with_base_initializer<S: Into<String>>(
        mut self,
        arguments: impl IntoIterator<Item = S>,
    ) -> Self {
        self.initializer = Some(ConstructorInitializer {
            kind: InitializerKind::Base,
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Chain to another constructor of the same type: `: this(args)`.
    pub fn with_this_initializer<S: Into<String>>(
        mut self,
        arguments: impl IntoIterator<Item = S>,
    ) -> Self {
        self.initializer = Some(ConstructorInitializer {
            kind: InitializerKind::This,
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_body_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.body.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn build(&self) -> ConstructorDeclaration {
        ConstructorDeclaration {
            attributes: self.attributes.clone(),
            modifiers: self.modifiers.iter().copied().collect(),
            name: self.type_name.clone(),
            parameters: ParameterGenerator::create(&self.parameters),
            initializer: self.initializer.clone(),
            body: self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_initializer() {
        let ctor = ConstructorBuilder::new("Derived")
            .with_modifiers([Modifier::Protected])
            .with_parameters([Parameter::new("id", "int")])
            .with_base_initializer(["id"])
            .build();

        assert_eq!(ctor.modifiers.to_string(), "protected");
        assert_eq!(ctor.initializer.unwrap().to_string(), "base(id)");
        assert_eq!(ctor.parameters.len(), 1);
    }

    #[test]
    fn test_this_initializer_replaces_base() {
        let ctor = ConstructorBuilder::new("A")
            .with_base_initializer(["1"])
            .with_this_initializer(["0", "null"])
            .build();
        assert_eq!(ctor.initializer.unwrap().to_string(), "this(0, null)");
    }
}

use crate::{
    generators::ParameterGenerator,
    tree::{Attribute, MethodBody, MethodDeclaration, Modifier, Parameter, TypeName},
};

/// Builder for method declarations. Defaults to `void Name() { }`.
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    name: String,
    modifiers: Vec<Modifier>,
    attributes: Vec<Attribute>,
    return_type: TypeName,
    type_parameters: Vec<String>,
    parameters: Vec<Parameter>,
    body: MethodBody,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            return_type: TypeName::void(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            body: MethodBody::Block(Vec::new()),
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

    pub fn with_return_type(mut self, ty: impl Into<TypeName>) -> Self {
        self.return_type = ty.into();
        self
    }

    pub fn with_type_parameters<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.type_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }

    /// Append statements to a block body. Switches an expression-bodied or
    /// body-less method back to a block body.
    pub fn with_body_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        let lines = lines.into_iter().map(Into::into);
        match &mut self.body {
            MethodBody::Block(body) => body.extend(lines),
            _ => self.body = MethodBody::Block(lines.collect()),
        }
        self
    }

    /// `=> expression;`
    pub fn with_expression_body(mut self, expression: impl Into<String>) -> Self {
        self.body = MethodBody::Expression(expression.into());
        self
    }

    /// Terminate the signature with `;`.
    pub fn without_body(mut self) -> Self {
        self.body = MethodBody::None;
        self
    }

    pub fn build(&self) -> MethodDeclaration {
        MethodDeclaration {
            attributes: self.attributes.clone(),
            modifiers: self.modifiers.iter().copied().collect(),
            return_type: self.return_type.clone(),
            name: self.name.clone(),
            type_parameters: self.type_parameters.clone(),
            parameters: ParameterGenerator::create(&self.parameters),
            body: self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let method = MethodBuilder::new("MyMethod").build();
        assert_eq!(method.return_type, TypeName::void());
        assert!(method.modifiers.is_empty());
        assert_eq!(method.body, MethodBody::Block(Vec::new()));
    }

    #[test]
    fn test_body_switching() {
        let method = MethodBuilder::new("Get")
            .with_expression_body("42")
            .with_body_lines(["return 42;"])
            .build();
        assert_eq!(method.body, MethodBody::Block(vec!["return 42;".into()]));

        let method = MethodBuilder::new("Run")
            .with_modifiers([Modifier::Abstract, Modifier::Public])
            .without_body()
            .build();
        assert_eq!(method.body, MethodBody::None);
        assert_eq!(method.modifiers.to_string(), "public abstract");
    }
}

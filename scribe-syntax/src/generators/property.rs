use cscribe_core::escape_identifier;

use crate::tree::{Attribute, Modifier, PropertyBody, PropertyDeclaration, Setter, TypeName};

/// Semantic description of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: TypeName,
    pub modifiers: Vec<Modifier>,
    pub attributes: Vec<Attribute>,
    pub body: PropertyBody,
    pub initializer: Option<String>,
}

impl Property {
    /// A `{ get; set; }` auto-property.
    pub fn auto(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: vec![Modifier::Public],
            attributes: Vec::new(),
            body: PropertyBody::Auto {
                setter: Some(Setter::Set),
            },
            initializer: None,
        }
    }

    /// A `=> expression;` property.
    pub fn computed(
        name: impl Into<String>,
        ty: impl Into<TypeName>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            body: PropertyBody::Expression(expression.into()),
            ..Self::auto(name, ty)
        }
    }

    pub fn setter(mut self, setter: Option<Setter>) -> Self {
        if let PropertyBody::Auto { setter: current } = &mut self.body {
            *current = setter;
        }
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn initializer(mut self, expression: impl Into<String>) -> Self {
        self.initializer = Some(expression.into());
        self
    }
}

pub struct PropertyGenerator;

impl PropertyGenerator {
    pub fn create(property: &Property) -> PropertyDeclaration {
        let initializer = match property.body {
            PropertyBody::Auto { .. } => property.initializer.clone(),
            PropertyBody::Expression(_) => None,
        };
        PropertyDeclaration {
            attributes: property.attributes.clone(),
            modifiers: property.modifiers.iter().copied().collect(),
            ty: property.ty.clone(),
            name: escape_identifier(&property.name),
            body: property.body.clone(),
            initializer,
        }
    }
}

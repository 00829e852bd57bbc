use cscribe_core::escape_identifier;

use crate::tree::{Attribute, FieldDeclaration, Modifier, Modifiers, TypeName};

/// Semantic description of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeName,
    pub modifiers: Vec<Modifier>,
    pub attributes: Vec<Attribute>,
    pub initializer: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            initializer: None,
        }
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

pub struct FieldGenerator;

impl FieldGenerator {
    pub fn create(field: &Field) -> FieldDeclaration {
        FieldDeclaration {
            attributes: field.attributes.clone(),
            modifiers: field.modifiers.iter().copied().collect::<Modifiers>(),
            ty: field.ty.clone(),
            name: escape_identifier(&field.name),
            initializer: field.initializer.clone(),
        }
    }
}

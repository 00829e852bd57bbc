use cscribe_core::escape_identifier;

use crate::tree::{Parameter, ParameterList};

pub struct ParameterGenerator;

impl ParameterGenerator {
    /// Build a parameter list, escaping keyword parameter names.
    pub fn create(parameters: &[Parameter]) -> ParameterList {
        ParameterList(
            parameters
                .iter()
                .map(|p| Parameter {
                    name: escape_identifier(&p.name),
                    ..p.clone()
                })
                .collect(),
        )
    }
}

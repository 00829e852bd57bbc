//! Leaf generators: direct translations from semantic descriptions to
//! tree nodes.
//!
//! Generators escape identifiers that collide with reserved keywords but
//! perform no other validation.

mod constructor;
mod field;
mod method;
mod parameter;
mod property;

pub use constructor::ConstructorBuilder;
pub use field::{Field, FieldGenerator};
pub use method::MethodBuilder;
pub use parameter::ParameterGenerator;
pub use property::{Property, PropertyGenerator};

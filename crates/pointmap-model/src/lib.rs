//! Class model for pointmap.
//!
//! Describes what the mapper may know about a class (its properties, methods
//! and parameters) and how it talks to live objects.

pub mod class;
pub mod error;
pub mod ids;
pub mod instance;
pub mod naming;
pub mod registry;

pub use class::{
    ClassDescriptor, MethodDescriptor, ParameterDescriptor, PropertyDescriptor, Visibility,
};
pub use error::{ModelError, Result};
pub use ids::{ClassName, PATH_SEPARATOR, is_identifier};
pub use instance::{Instance, Record, Value};
pub use registry::{ClassIntrospector, ClassRegistry};

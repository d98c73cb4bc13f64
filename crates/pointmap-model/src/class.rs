//! Structured class descriptors.
//!
//! A [`ClassDescriptor`] is what the mapper knows about a class: its
//! properties, its methods, and each method's parameter list. Member order is
//! declaration order and is significant for path-finding. Descriptors are
//! plain data and (de)serialize from a JSON schema:
//!
//! ```json
//! {
//!   "name": "app::Obj",
//!   "properties": [{ "name": "a" }],
//!   "methods": [
//!     { "name": "__construct", "parameters": [{ "name": "a" }] },
//!     { "name": "getA" }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::member_name;
use crate::naming::CONSTRUCTOR;
use crate::{ClassName, ModelError};

/// Member visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

/// A declared property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
}

impl PropertyDescriptor {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
        }
    }
}

/// A declared method parameter. Its position is its index in
/// [`MethodDescriptor::parameters`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    /// Parameter has a default value and may be omitted.
    #[serde(default)]
    pub optional: bool,
}

impl ParameterDescriptor {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
        }
    }
}

/// A declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl MethodDescriptor {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }

    /// Number of parameters without a default value.
    pub fn required_parameters(&self) -> usize {
        self.parameters.iter().filter(|p| !p.optional).count()
    }

    /// Public and callable without arguments.
    pub fn is_readable(&self) -> bool {
        self.visibility.is_public() && self.required_parameters() == 0
    }

    /// Zero-based position of the named parameter.
    pub fn position_of(&self, parameter: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == parameter)
    }
}

/// Everything the mapper may inspect about one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: ClassName,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Instances accept properties the class does not declare.
    #[serde(default)]
    pub dynamic_properties: bool,
}

impl ClassDescriptor {
    pub fn new(name: ClassName) -> Self {
        Self {
            name,
            properties: Vec::new(),
            methods: Vec::new(),
            dynamic_properties: false,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_dynamic_properties(mut self, enable: bool) -> Self {
        self.dynamic_properties = enable;
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn constructor(&self) -> Option<&MethodDescriptor> {
        self.method(CONSTRUCTOR)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn public_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.visibility.is_public())
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| m.visibility.is_public())
    }

    /// Checks member names and rejects duplicates.
    pub fn validate(&self) -> Result<(), ModelError> {
        let duplicate = |member: &str| ModelError::DuplicateMember {
            class: self.name.clone(),
            member: member.to_string(),
        };

        let mut seen = BTreeSet::new();
        for property in &self.properties {
            member_name(&property.name)?;
            if !seen.insert(property.name.as_str()) {
                return Err(duplicate(&property.name));
            }
        }

        let mut seen = BTreeSet::new();
        for method in &self.methods {
            member_name(&method.name)?;
            if !seen.insert(method.name.as_str()) {
                return Err(duplicate(&method.name));
            }
            let mut params = BTreeSet::new();
            for parameter in &method.parameters {
                member_name(&parameter.name)?;
                if !params.insert(parameter.name.as_str()) {
                    return Err(duplicate(&format!("{}().${}", method.name, parameter.name)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj() -> ClassDescriptor {
        ClassDescriptor::new(ClassName::new("Obj").unwrap())
            .with_property(PropertyDescriptor::public("a"))
            .with_method(
                MethodDescriptor::public(CONSTRUCTOR).with_parameter(ParameterDescriptor::required("a")),
            )
            .with_method(MethodDescriptor::public("getA"))
            .with_method(
                MethodDescriptor::public("format")
                    .with_parameter(ParameterDescriptor::optional("pattern")),
            )
    }

    #[test]
    fn lookups() {
        let class = obj();
        assert!(class.has_property("a"));
        assert!(class.constructor().is_some());
        assert_eq!(class.method("getA").map(MethodDescriptor::is_readable), Some(true));
        assert_eq!(class.method("format").map(MethodDescriptor::is_readable), Some(true));
        assert_eq!(class.constructor().map(MethodDescriptor::is_readable), Some(false));
        assert_eq!(class.constructor().and_then(|m| m.position_of("a")), Some(0));
    }

    #[test]
    fn validate_rejects_duplicates() {
        let class = obj().with_property(PropertyDescriptor::public("a"));
        assert!(matches!(
            class.validate(),
            Err(ModelError::DuplicateMember { member, .. }) if member == "a"
        ));
        assert!(obj().validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let class: ClassDescriptor = serde_json::from_str(
            r#"{"name":"app::Obj","properties":[{"name":"a","visibility":"private"}],
                "methods":[{"name":"setA","parameters":[{"name":"a"}]}]}"#,
        )
        .unwrap();
        assert_eq!(class.name.as_str(), "app::Obj");
        assert_eq!(class.properties[0].visibility, Visibility::Private);
        assert_eq!(class.methods[0].visibility, Visibility::Public);
        assert!(!class.methods[0].parameters[0].optional);
        assert!(!class.dynamic_properties);
    }
}

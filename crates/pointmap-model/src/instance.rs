//! Runtime object protocol.
//!
//! The mapper moves [`Value`]s between objects through the [`Instance`]
//! trait. [`Record`] is a generic implementation backed by a
//! [`ClassDescriptor`]: a property bag whose accessor-shaped methods
//! (`getX`, `setX`, `update`, `__construct`) read and write its properties.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::naming::{CONSTRUCTOR, UPDATE, getter_property, setter_property};
use crate::{ClassDescriptor, ClassName, MethodDescriptor, ModelError};

/// A value in transit.
pub type Value = serde_json::Value;

/// An object the mapper can read from and write to.
pub trait Instance: fmt::Debug {
    fn class_name(&self) -> &ClassName;

    fn property(&self, name: &str) -> Result<Value, ModelError>;

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ModelError>;

    /// Calls a method that takes no arguments.
    fn read(&self, method: &str) -> Result<Value, ModelError>;

    /// Calls a method with positional arguments.
    fn invoke(&mut self, method: &str, args: Vec<Value>) -> Result<Value, ModelError>;
}

/// Generic instance of a described class.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    class: Arc<ClassDescriptor>,
    properties: IndexMap<String, Value>,
}

impl Record {
    /// Creates a record with every declared property set to null.
    pub fn new(class: Arc<ClassDescriptor>) -> Self {
        let properties = class
            .properties
            .iter()
            .map(|p| (p.name.clone(), Value::Null))
            .collect();
        Self { class, properties }
    }

    /// Runs the class constructor: each argument is stored in the property
    /// named like its parameter.
    pub fn construct(class: Arc<ClassDescriptor>, args: Vec<Value>) -> Result<Self, ModelError> {
        let mut record = Self::new(Arc::clone(&class));
        match class.constructor() {
            Some(constructor) => {
                for (name, value) in bind_arguments(&class.name, constructor, args)? {
                    record.set_property(&name, value)?;
                }
            }
            None if !args.is_empty() => {
                return Err(ModelError::TooManyArguments {
                    class: class.name.clone(),
                    method: CONSTRUCTOR.to_string(),
                    expected: 0,
                    given: args.len(),
                });
            }
            None => {}
        }
        Ok(record)
    }

    /// Builds a record from a JSON object of property values.
    pub fn from_json(class: Arc<ClassDescriptor>, value: &Value) -> Result<Self, ModelError> {
        let mut record = Self::new(class);
        if let Value::Object(fields) = value {
            for (name, field) in fields {
                record.set_property(name, field.clone())?;
            }
        }
        Ok(record)
    }

    pub fn descriptor(&self) -> &ClassDescriptor {
        &self.class
    }

    /// Property values as a JSON object, in declaration order.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.properties
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }

    fn unknown_property(&self, name: &str) -> ModelError {
        ModelError::UnknownProperty {
            class: self.class.name.clone(),
            property: name.to_string(),
        }
    }

    fn method(&self, name: &str) -> Result<&MethodDescriptor, ModelError> {
        self.class
            .method(name)
            .ok_or_else(|| ModelError::UnknownMethod {
                class: self.class.name.clone(),
                method: name.to_string(),
            })
    }

    fn unsupported(&self, method: &str) -> ModelError {
        ModelError::UnsupportedMethod {
            class: self.class.name.clone(),
            method: method.to_string(),
        }
    }
}

impl Instance for Record {
    fn class_name(&self) -> &ClassName {
        &self.class.name
    }

    fn property(&self, name: &str) -> Result<Value, ModelError> {
        self.properties
            .get(name)
            .cloned()
            .ok_or_else(|| self.unknown_property(name))
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        if !self.class.has_property(name) && !self.class.dynamic_properties {
            return Err(self.unknown_property(name));
        }
        self.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn read(&self, method: &str) -> Result<Value, ModelError> {
        let descriptor = self.method(method)?;
        match getter_property(&descriptor.name) {
            Some(property) => self.property(&property),
            None => Err(self.unsupported(method)),
        }
    }

    fn invoke(&mut self, method: &str, args: Vec<Value>) -> Result<Value, ModelError> {
        let descriptor = self.method(method)?.clone();
        if descriptor.is_constructor() {
            return Err(self.unsupported(method));
        }
        if let Some(property) = setter_property(&descriptor.name) {
            let mut bound = bind_arguments(&self.class.name, &descriptor, args)?;
            let index = match bound.iter().position(|(name, _)| *name == property) {
                Some(index) => Some(index),
                None if bound.len() == 1 => Some(0),
                None if bound.is_empty() => None,
                None => return Err(self.unsupported(method)),
            };
            let value = index.map_or(Value::Null, |index| bound.swap_remove(index).1);
            self.set_property(&property, value)?;
            return Ok(Value::Null);
        }
        if descriptor.name == UPDATE {
            for (name, value) in bind_arguments(&self.class.name, &descriptor, args)? {
                self.set_property(&name, value)?;
            }
            return Ok(Value::Null);
        }
        if descriptor.parameters.is_empty() && args.is_empty() {
            return self.read(method);
        }
        Err(self.unsupported(method))
    }
}

/// Pairs positional arguments with parameter names, filling omitted
/// optional parameters with null.
fn bind_arguments(
    class: &ClassName,
    method: &MethodDescriptor,
    args: Vec<Value>,
) -> Result<Vec<(String, Value)>, ModelError> {
    if args.len() > method.parameters.len() {
        return Err(ModelError::TooManyArguments {
            class: class.clone(),
            method: method.name.clone(),
            expected: method.parameters.len(),
            given: args.len(),
        });
    }
    let mut args = args.into_iter();
    let mut bound = Vec::with_capacity(method.parameters.len());
    for parameter in &method.parameters {
        match args.next() {
            Some(value) => bound.push((parameter.name.clone(), value)),
            None if parameter.optional => bound.push((parameter.name.clone(), Value::Null)),
            None => {
                return Err(ModelError::MissingArgument {
                    class: class.clone(),
                    method: method.name.clone(),
                    parameter: parameter.name.clone(),
                });
            }
        }
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ParameterDescriptor, PropertyDescriptor};

    fn obj() -> Arc<ClassDescriptor> {
        Arc::new(
            ClassDescriptor::new(ClassName::new("Obj").unwrap())
                .with_property(PropertyDescriptor::public("a"))
                .with_property(PropertyDescriptor::public("b"))
                .with_method(
                    MethodDescriptor::public(CONSTRUCTOR)
                        .with_parameter(ParameterDescriptor::required("a")),
                )
                .with_method(MethodDescriptor::public("getA"))
                .with_method(MethodDescriptor::public("getB"))
                .with_method(
                    MethodDescriptor::public("setB")
                        .with_parameter(ParameterDescriptor::required("b")),
                )
                .with_method(
                    MethodDescriptor::public(UPDATE)
                        .with_parameter(ParameterDescriptor::required("a"))
                        .with_parameter(ParameterDescriptor::optional("b")),
                ),
        )
    }

    #[test]
    fn construct_and_accessors() {
        let mut record = Record::construct(obj(), vec![json!(1)]).unwrap();
        assert_eq!(record.read("getA").unwrap(), json!(1));
        assert_eq!(record.read("getB").unwrap(), Value::Null);

        record.invoke("setB", vec![json!(11)]).unwrap();
        assert_eq!(record.property("b").unwrap(), json!(11));
        assert_eq!(record.to_json(), json!({"a": 1, "b": 11}));
    }

    #[test]
    fn construct_requires_arguments() {
        let err = Record::construct(obj(), vec![]).unwrap_err();
        assert!(matches!(err, ModelError::MissingArgument { parameter, .. } if parameter == "a"));

        let err = Record::construct(obj(), vec![json!(1), json!(2)]).unwrap_err();
        assert!(matches!(err, ModelError::TooManyArguments { expected: 1, given: 2, .. }));
    }

    #[test]
    fn update_fills_optional_parameters() {
        let mut record = Record::construct(obj(), vec![json!(1)]).unwrap();
        record.invoke("setB", vec![json!(5)]).unwrap();
        record.invoke(UPDATE, vec![json!(7)]).unwrap();
        assert_eq!(record.to_json(), json!({"a": 7, "b": null}));
    }

    #[test]
    fn setter_writes_the_parameter_named_after_its_property() {
        let class = Arc::new(
            ClassDescriptor::new(ClassName::new("T").unwrap())
                .with_property(PropertyDescriptor::public("b"))
                .with_method(
                    MethodDescriptor::public("setB")
                        .with_parameter(ParameterDescriptor::optional("flag"))
                        .with_parameter(ParameterDescriptor::required("b")),
                )
                .with_method(
                    MethodDescriptor::public("setValue")
                        .with_parameter(ParameterDescriptor::required("amount")),
                )
                .with_dynamic_properties(true),
        );
        let mut record = Record::new(class);
        record.invoke("setB", vec![Value::Null, json!(42)]).unwrap();
        assert_eq!(record.property("b").unwrap(), json!(42));

        record.invoke("setValue", vec![json!(7)]).unwrap();
        assert_eq!(record.property("value").unwrap(), json!(7));
    }

    #[test]
    fn undeclared_members_fail() {
        let mut record = Record::new(obj());
        assert!(matches!(
            record.set_property("c", json!(1)),
            Err(ModelError::UnknownProperty { .. })
        ));
        assert!(matches!(record.read("getC"), Err(ModelError::UnknownMethod { .. })));
        assert!(matches!(
            record.invoke(CONSTRUCTOR, vec![json!(1)]),
            Err(ModelError::UnsupportedMethod { .. })
        ));
    }

    #[test]
    fn dynamic_classes_accept_new_properties() {
        let class = Arc::new(
            ClassDescriptor::new(ClassName::new("Bag").unwrap()).with_dynamic_properties(true),
        );
        let record = Record::from_json(class, &json!({"x": 1, "y": "two"})).unwrap();
        assert_eq!(record.property("y").unwrap(), json!("two"));
        assert_eq!(record.to_json(), json!({"x": 1, "y": "two"}));
    }
}

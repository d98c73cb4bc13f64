//! FQN parsing and point validation.

use std::fmt;
use std::sync::Arc;

use pointmap_model::{ClassDescriptor, ClassIntrospector, ClassName, is_identifier};

use crate::error::{MapError, PointErrorReason, Result};
use crate::point::{
    MethodPoint, ParameterPoint, ParsedFqn, Point, PropertyPoint, method_fqn, parameter_fqn,
    property_fqn,
};

/// Creates validated [`Point`]s from FQN strings or from their parts.
///
/// Every lookup goes through the [`ClassIntrospector`]; the factory holds no
/// other state and may be cloned freely.
#[derive(Clone)]
pub struct PointFactory {
    introspector: Arc<dyn ClassIntrospector>,
}

impl fmt::Debug for PointFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointFactory").finish_non_exhaustive()
    }
}

impl PointFactory {
    /// Identity reported in errors.
    pub const NAME: &'static str = "PointFactory";

    pub fn new(introspector: Arc<dyn ClassIntrospector>) -> Self {
        Self { introspector }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn introspector(&self) -> &Arc<dyn ClassIntrospector> {
        &self.introspector
    }

    /// Parses `Class.method().$parameter`, `Class.method()` or
    /// `Class.$property` and checks that the member exists.
    pub fn create_point(&self, fqn: &str) -> Result<Point> {
        let parsed = ParsedFqn::parse(fqn)
            .ok_or_else(|| MapError::invalid_point(fqn, Self::NAME, PointErrorReason::Syntax))?;
        let point: Point = match parsed {
            ParsedFqn::Property { class, property } => {
                self.property_point(&class, &property)?.into()
            }
            ParsedFqn::Method { class, method } => self.method_point(&class, &method)?.into(),
            ParsedFqn::Parameter {
                class,
                method,
                parameter,
            } => self.parameter_point(&class, &method, &parameter)?.into(),
        };
        Ok(point)
    }

    /// A declared public property.
    pub fn property_point(&self, class: &ClassName, property: &str) -> Result<PropertyPoint> {
        let fqn = property_fqn(class, property);
        let descriptor = self.class(class, &fqn)?;
        let declared = descriptor
            .property(property)
            .ok_or_else(|| self.error(&fqn, PointErrorReason::PropertyNotFound))?;
        if !declared.visibility.is_public() {
            return Err(self.error(&fqn, PointErrorReason::NotPublic));
        }
        Ok(PropertyPoint::new(class.clone(), property, false))
    }

    /// A property on `class` whether or not the class declares it. A declared
    /// property must still be public.
    pub fn dynamic_property_point(
        &self,
        class: &ClassName,
        property: &str,
    ) -> Result<PropertyPoint> {
        let fqn = property_fqn(class, property);
        if !is_identifier(property) {
            return Err(self.error(&fqn, PointErrorReason::Syntax));
        }
        let descriptor = self.class(class, &fqn)?;
        if descriptor.has_property(property) {
            return self.property_point(class, property);
        }
        Ok(PropertyPoint::new(class.clone(), property, true))
    }

    /// A public method callable without arguments.
    pub fn method_point(&self, class: &ClassName, method: &str) -> Result<MethodPoint> {
        let fqn = method_fqn(class, method);
        let descriptor = self.class(class, &fqn)?;
        let declared = descriptor
            .method(method)
            .ok_or_else(|| self.error(&fqn, PointErrorReason::MethodNotFound))?;
        if !declared.visibility.is_public() {
            return Err(self.error(&fqn, PointErrorReason::NotPublic));
        }
        if !declared.is_readable() {
            return Err(self.error(&fqn, PointErrorReason::NotReadable));
        }
        Ok(MethodPoint::new(class.clone(), method))
    }

    /// A parameter of a public method.
    pub fn parameter_point(
        &self,
        class: &ClassName,
        method: &str,
        parameter: &str,
    ) -> Result<ParameterPoint> {
        let fqn = parameter_fqn(class, method, parameter);
        let descriptor = self.class(class, &fqn)?;
        let declared = descriptor
            .method(method)
            .ok_or_else(|| self.error(&fqn, PointErrorReason::MethodNotFound))?;
        if !declared.visibility.is_public() {
            return Err(self.error(&fqn, PointErrorReason::NotPublic));
        }
        let position = declared
            .position_of(parameter)
            .ok_or_else(|| self.error(&fqn, PointErrorReason::ParameterNotFound))?;
        Ok(ParameterPoint::new(
            class.clone(),
            method,
            parameter,
            position,
        ))
    }

    fn class(&self, class: &ClassName, fqn: &str) -> Result<Arc<ClassDescriptor>> {
        self.introspector
            .describe(class)
            .ok_or_else(|| self.error(fqn, PointErrorReason::ClassNotFound))
    }

    fn error(&self, fqn: &str, reason: PointErrorReason) -> MapError {
        MapError::invalid_point(fqn, Self::NAME, reason)
    }
}

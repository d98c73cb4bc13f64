//! Addressable value locations on a class.
//!
//! Every point has a canonical FQN:
//!
//! ```text
//! property-fqn   = class-fqn "." "$" member-name       app::User.$name
//! method-fqn     = class-fqn "." member-name "()"      app::User.getName()
//! parameter-fqn  = method-fqn "." "$" parameter-name   app::User.setName().$name
//! ```
//!
//! Points are only created by [`crate::PointFactory`], which checks that the
//! addressed member exists, so a `Point` value is always valid.

use std::fmt;

use pointmap_model::{ClassName, is_identifier};

const VALUE_MARKER: &str = ".$";
const CALL_MARKER: &str = "()";

pub fn property_fqn(class: &ClassName, property: &str) -> String {
    format!("{class}{VALUE_MARKER}{property}")
}

pub fn method_fqn(class: &ClassName, method: &str) -> String {
    format!("{class}.{method}{CALL_MARKER}")
}

pub fn parameter_fqn(class: &ClassName, method: &str, parameter: &str) -> String {
    format!("{}{VALUE_MARKER}{parameter}", method_fqn(class, method))
}

/// Which of the three grammars an FQN uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Property,
    Method,
    Parameter,
}

impl PointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointKind::Property => "property",
            PointKind::Method => "method",
            PointKind::Parameter => "parameter",
        }
    }

    /// Can be read from.
    pub fn is_source(&self) -> bool {
        matches!(self, PointKind::Property | PointKind::Method)
    }

    /// Can be written to.
    pub fn is_target(&self) -> bool {
        matches!(self, PointKind::Property | PointKind::Parameter)
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntactic decomposition of an FQN, before any class lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedFqn {
    Property {
        class: ClassName,
        property: String,
    },
    Method {
        class: ClassName,
        method: String,
    },
    Parameter {
        class: ClassName,
        method: String,
        parameter: String,
    },
}

impl ParsedFqn {
    /// Splits an FQN, most specific grammar first. Returns `None` when no
    /// grammar matches.
    pub(crate) fn parse(fqn: &str) -> Option<Self> {
        if let Some((head, parameter)) = fqn.rsplit_once(VALUE_MARKER) {
            if let Some(callee) = head.strip_suffix(CALL_MARKER) {
                let (class, method) = split_member(callee)?;
                return is_identifier(parameter).then(|| ParsedFqn::Parameter {
                    class,
                    method,
                    parameter: parameter.to_string(),
                });
            }
        }
        if let Some(callee) = fqn.strip_suffix(CALL_MARKER) {
            let (class, method) = split_member(callee)?;
            return Some(ParsedFqn::Method { class, method });
        }
        let (class, property) = fqn.rsplit_once(VALUE_MARKER)?;
        if !is_identifier(property) {
            return None;
        }
        let class = class_part(class)?;
        Some(ParsedFqn::Property {
            class,
            property: property.to_string(),
        })
    }
}

fn split_member(callee: &str) -> Option<(ClassName, String)> {
    let (class, member) = callee.rsplit_once('.')?;
    if !is_identifier(member) {
        return None;
    }
    Some((class_part(class)?, member.to_string()))
}

/// Class segment of an FQN; surrounding whitespace is not tolerated.
fn class_part(raw: &str) -> Option<ClassName> {
    ClassName::new(raw).ok().filter(|class| class.as_str() == raw)
}

/// A property, readable and writable. Dynamic property points address a
/// property the class does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPoint {
    fqn: String,
    class: ClassName,
    name: String,
    dynamic: bool,
}

impl PropertyPoint {
    pub(crate) fn new(class: ClassName, name: impl Into<String>, dynamic: bool) -> Self {
        let name = name.into();
        Self {
            fqn: property_fqn(&class, &name),
            class,
            name,
            dynamic,
        }
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn class_name(&self) -> &ClassName {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }
}

/// A public method callable without arguments; read-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodPoint {
    fqn: String,
    class: ClassName,
    name: String,
}

impl MethodPoint {
    pub(crate) fn new(class: ClassName, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            fqn: method_fqn(&class, &name),
            class,
            name,
        }
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn class_name(&self) -> &ClassName {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A parameter of a constructor or mutator; write-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterPoint {
    fqn: String,
    class: ClassName,
    method: String,
    name: String,
    position: usize,
}

impl ParameterPoint {
    pub(crate) fn new(
        class: ClassName,
        method: impl Into<String>,
        name: impl Into<String>,
        position: usize,
    ) -> Self {
        let method = method.into();
        let name = name.into();
        Self {
            fqn: parameter_fqn(&class, &method, &name),
            class,
            method,
            name,
            position,
        }
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn class_name(&self) -> &ClassName {
        &self.class
    }

    pub fn method_name(&self) -> &str {
        &self.method
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based index among the method's declared parameters.
    pub fn position(&self) -> usize {
        self.position
    }

    /// FQN of the method owning this parameter.
    pub fn method_fqn(&self) -> String {
        method_fqn(&self.class, &self.method)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Point {
    Property(PropertyPoint),
    Method(MethodPoint),
    Parameter(ParameterPoint),
}

impl Point {
    pub fn kind(&self) -> PointKind {
        match self {
            Point::Property(_) => PointKind::Property,
            Point::Method(_) => PointKind::Method,
            Point::Parameter(_) => PointKind::Parameter,
        }
    }

    pub fn fqn(&self) -> &str {
        match self {
            Point::Property(point) => point.fqn(),
            Point::Method(point) => point.fqn(),
            Point::Parameter(point) => point.fqn(),
        }
    }

    pub fn class_name(&self) -> &ClassName {
        match self {
            Point::Property(point) => point.class_name(),
            Point::Method(point) => point.class_name(),
            Point::Parameter(point) => point.class_name(),
        }
    }

    /// Property, method or parameter name.
    pub fn name(&self) -> &str {
        match self {
            Point::Property(point) => point.name(),
            Point::Method(point) => point.name(),
            Point::Parameter(point) => point.name(),
        }
    }

    pub fn is_source(&self) -> bool {
        self.kind().is_source()
    }

    pub fn is_target(&self) -> bool {
        self.kind().is_target()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fqn())
    }
}

impl From<PropertyPoint> for Point {
    fn from(point: PropertyPoint) -> Self {
        Point::Property(point)
    }
}

impl From<MethodPoint> for Point {
    fn from(point: MethodPoint) -> Self {
        Point::Method(point)
    }
}

impl From<ParameterPoint> for Point {
    fn from(point: ParameterPoint) -> Self {
        Point::Parameter(point)
    }
}

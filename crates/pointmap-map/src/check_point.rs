//! Hooks that see a value while it travels along a route.
//!
//! A [`CheckPoint`] may replace the value, decline with
//! [`crate::MapError::NotSupportedContext`] (the value passes through unchanged), or
//! drop it with [`crate::MapError::SkipRoute`]. Any other error aborts the mapping.
//! Route check-points run first, in declaration order, then the map's
//! filters.

use std::fmt;
use std::sync::Arc;

use pointmap_model::{ClassName, Instance, Value};

use crate::error::{ErrorKind, Result};
use crate::route::Route;

/// What a check-point can see besides the value.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    pub source: &'a dyn Instance,
    pub target_class: &'a ClassName,
}

pub trait CheckPoint: Send + Sync {
    /// Stable identity, used in errors, equality and logs.
    fn name(&self) -> &str;

    fn control(&self, value: Value, route: &Route, context: &MappingContext<'_>) -> Result<Value>;
}

type ControlFn = dyn Fn(Value, &Route, &MappingContext<'_>) -> Result<Value> + Send + Sync;

/// A check-point backed by a closure.
pub struct FnCheckPoint {
    name: String,
    control: Box<ControlFn>,
}

impl FnCheckPoint {
    pub fn new<F>(name: impl Into<String>, control: F) -> Self
    where
        F: Fn(Value, &Route, &MappingContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            control: Box::new(control),
        }
    }
}

impl fmt::Debug for FnCheckPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCheckPoint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl CheckPoint for FnCheckPoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn control(&self, value: Value, route: &Route, context: &MappingContext<'_>) -> Result<Value> {
        (self.control)(value, route, context)
    }
}

/// Ordered, immutable list of check-points. Cloning shares the check-points.
#[derive(Clone, Default)]
pub struct CheckPointCollection {
    items: Vec<Arc<dyn CheckPoint>>,
}

impl CheckPointCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new collection with `check_point` appended.
    #[must_use]
    pub fn with(&self, check_point: Arc<dyn CheckPoint>) -> Self {
        let mut items = self.items.clone();
        items.push(check_point);
        Self { items }
    }

    /// Returns a new collection with `other` appended.
    #[must_use]
    pub fn with_all(&self, other: &CheckPointCollection) -> Self {
        let mut items = self.items.clone();
        items.extend(other.items.iter().cloned());
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CheckPoint>> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|c| c.name()).collect()
    }

    /// Runs every check-point in order. Returns `None` when one of them
    /// skips the route.
    pub fn apply(
        &self,
        value: Value,
        route: &Route,
        context: &MappingContext<'_>,
    ) -> Result<Option<Value>> {
        let mut value = value;
        for check_point in &self.items {
            match check_point.control(value.clone(), route, context) {
                Ok(controlled) => value = controlled,
                Err(err) => match err.kind() {
                    ErrorKind::NotSupportedContext => {
                        tracing::trace!(
                            check_point = check_point.name(),
                            route = route.fqn(),
                            "Check-point passed value through"
                        );
                    }
                    ErrorKind::Skip => {
                        tracing::debug!(
                            check_point = check_point.name(),
                            route = route.fqn(),
                            "Check-point skipped route"
                        );
                        return Ok(None);
                    }
                    _ => return Err(err),
                },
            }
        }
        Ok(Some(value))
    }
}

impl fmt::Debug for CheckPointCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl PartialEq for CheckPointCollection {
    fn eq(&self, other: &Self) -> bool {
        self.names() == other.names()
    }
}

impl FromIterator<Arc<dyn CheckPoint>> for CheckPointCollection {
    fn from_iter<I: IntoIterator<Item = Arc<dyn CheckPoint>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

//! Validated source-to-target pairings.

use std::fmt;

use crate::check_point::CheckPointCollection;
use crate::error::{MapError, Result};
use crate::factory::PointFactory;
use crate::point::Point;

/// Separator between the two point FQNs of a route FQN.
pub const ROUTE_SEPARATOR: &str = " -> ";

/// One source point feeding one target point.
///
/// The source is always readable (property or method) and the target always
/// writable (property or parameter); [`Route::new`] refuses anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    fqn: String,
    source: Point,
    target: Point,
    check_points: CheckPointCollection,
}

impl Route {
    pub fn new(source: Point, target: Point, check_points: CheckPointCollection) -> Result<Self> {
        if !source.is_source() {
            return Err(MapError::InvalidSource {
                fqn: source.fqn().to_string(),
            });
        }
        if !target.is_target() {
            return Err(MapError::InvalidTarget {
                fqn: target.fqn().to_string(),
            });
        }
        Ok(Self {
            fqn: format!("{}{ROUTE_SEPARATOR}{}", source.fqn(), target.fqn()),
            source,
            target,
            check_points,
        })
    }

    /// `source.fqn -> target.fqn`, the route's identity.
    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn source(&self) -> &Point {
        &self.source
    }

    pub fn target(&self) -> &Point {
        &self.target
    }

    pub fn check_points(&self) -> &CheckPointCollection {
        &self.check_points
    }

    /// Same points, different check-points.
    #[must_use]
    pub fn with_check_points(&self, check_points: CheckPointCollection) -> Self {
        Self {
            check_points,
            ..self.clone()
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqn)
    }
}

/// Builds routes from FQN strings through a [`PointFactory`].
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    factory: PointFactory,
}

impl RouteBuilder {
    pub fn new(factory: PointFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &PointFactory {
        &self.factory
    }

    /// Parses both FQNs and pairs them. Fails without side effects if either
    /// point is invalid or has the wrong capability.
    pub fn build_route(
        &self,
        source_fqn: &str,
        target_fqn: &str,
        check_points: CheckPointCollection,
    ) -> Result<Route> {
        let source = self.factory.create_point(source_fqn)?;
        let target = self.factory.create_point(target_fqn)?;
        Route::new(source, target, check_points)
    }

    pub fn build_route_from_points(
        &self,
        source: Point,
        target: Point,
        check_points: CheckPointCollection,
    ) -> Result<Route> {
        Route::new(source, target, check_points)
    }
}

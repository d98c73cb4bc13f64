//! Route resolution across explicit routes and path-finders.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use pointmap_model::{ClassIntrospector, ClassName, Instance};

use crate::check_point::{CheckPoint, CheckPointCollection};
use crate::collection::RouteCollection;
use crate::error::{MapError, Result};
use crate::factory::PointFactory;
use crate::path_finder::{
    DeclaredTargetPolicy, DynamicSourceToStaticTargetPathFinder, PathFinder,
    StaticPathFinder, StaticSourceToDynamicTargetPathFinder,
};
use crate::route::{Route, RouteBuilder};

/// Priority used when a path-finder is registered without one.
pub const DEFAULT_PRIORITY: i32 = 0;

#[derive(Clone)]
struct RegisteredPathFinder {
    finder: Arc<dyn PathFinder>,
    priority: i32,
    order: usize,
}

/// Immutable set of mapping rules between classes.
///
/// Explicit routes always win; path-finders fill in the target points that
/// no explicit route writes, highest priority first.
#[derive(Clone)]
pub struct Map {
    path_finders: Vec<RegisteredPathFinder>,
    routes: RouteCollection,
    filters: CheckPointCollection,
}

impl Map {
    /// Resolves every route from `source` to `target`.
    ///
    /// Explicit routes come first in declaration order, then the guessed
    /// routes of each path-finder. A target point already written by an
    /// earlier route is not proposed again.
    pub fn routes(&self, source: &ClassName, target: &ClassName) -> Result<RouteCollection> {
        let explicit = self.routes.between(source, target);
        let mut claimed: HashSet<String> = explicit
            .iter()
            .map(|route| route.target().fqn().to_string())
            .collect();
        let mut resolved: Vec<Route> = explicit.into_iter().collect();

        for registered in self.ordered_path_finders() {
            let strategy = registered.finder.name();
            let guessed = registered.finder.routes(source, target).map_err(|err| {
                MapError::PathFinderFailed {
                    strategy: strategy.to_string(),
                    source: Box::new(err),
                }
            })?;
            let mut accepted = 0usize;
            for route in guessed {
                if claimed.insert(route.target().fqn().to_string()) {
                    accepted += 1;
                    resolved.push(route);
                } else {
                    tracing::trace!(
                        strategy,
                        route = route.fqn(),
                        "Target point already routed"
                    );
                }
            }
            tracing::debug!(
                strategy,
                priority = registered.priority,
                accepted,
                "Applied path-finder"
            );
        }

        tracing::debug!(
            source = %source,
            target = %target,
            routes = resolved.len(),
            "Resolved routes"
        );
        Ok(resolved.into_iter().collect())
    }

    /// [`Self::routes`] for the class of a live source object.
    pub fn routes_for(&self, source: &dyn Instance, target: &ClassName) -> Result<RouteCollection> {
        self.routes(source.class_name(), target)
    }

    /// Explicit routes, across all class pairs.
    pub fn explicit_routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Check-points applied to every route after its own.
    pub fn filters(&self) -> &CheckPointCollection {
        &self.filters
    }

    /// Path-finder names with their priorities, in resolution order.
    pub fn path_finders(&self) -> Vec<(&str, i32)> {
        self.ordered_path_finders()
            .into_iter()
            .map(|registered| (registered.finder.name(), registered.priority))
            .collect()
    }

    fn ordered_path_finders(&self) -> Vec<&RegisteredPathFinder> {
        let mut ordered: Vec<&RegisteredPathFinder> = self.path_finders.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.order.cmp(&b.order)));
        ordered
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("path_finders", &self.path_finders())
            .field("routes", &self.routes.fqns())
            .field("filters", &self.filters)
            .finish()
    }
}

/// Fluent, copy-on-write builder for [`Map`].
///
/// Every method leaves `self` untouched and returns a new builder, so a
/// partially configured builder can be shared as a template.
#[derive(Clone)]
pub struct MapBuilder {
    route_builder: RouteBuilder,
    path_finders: Vec<RegisteredPathFinder>,
    routes: RouteCollection,
    filters: CheckPointCollection,
}

impl MapBuilder {
    pub fn new(introspector: Arc<dyn ClassIntrospector>) -> Self {
        Self {
            route_builder: RouteBuilder::new(PointFactory::new(introspector)),
            path_finders: Vec::new(),
            routes: RouteCollection::new(),
            filters: CheckPointCollection::new(),
        }
    }

    pub fn factory(&self) -> &PointFactory {
        self.route_builder.factory()
    }

    pub fn route_builder(&self) -> &RouteBuilder {
        &self.route_builder
    }

    #[must_use]
    pub fn add_route(&self, route: Route) -> Self {
        Self {
            routes: self.routes.with_route(route),
            ..self.clone()
        }
    }

    /// Parses and adds one explicit route.
    pub fn add_route_fqn(
        &self,
        source_fqn: &str,
        target_fqn: &str,
        check_points: CheckPointCollection,
    ) -> Result<Self> {
        let route = self
            .route_builder
            .build_route(source_fqn, target_fqn, check_points)?;
        Ok(self.add_route(route))
    }

    #[must_use]
    pub fn add_routes(&self, routes: &RouteCollection) -> Self {
        Self {
            routes: self.routes.with_routes(routes),
            ..self.clone()
        }
    }

    /// Registers a path-finder. `None` means [`DEFAULT_PRIORITY`].
    #[must_use]
    pub fn add_path_finder(&self, finder: Arc<dyn PathFinder>, priority: Option<i32>) -> Self {
        let mut path_finders = self.path_finders.clone();
        path_finders.push(RegisteredPathFinder {
            finder,
            priority: priority.unwrap_or(DEFAULT_PRIORITY),
            order: self.path_finders.len(),
        });
        Self {
            path_finders,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn add_static_path_finder(&self, routes: RouteCollection, priority: Option<i32>) -> Self {
        self.add_path_finder(Arc::new(StaticPathFinder::new(routes)), priority)
    }

    #[must_use]
    pub fn add_static_source_to_dynamic_target_path_finder(&self, priority: Option<i32>) -> Self {
        self.add_static_source_to_dynamic_target_path_finder_with(
            DeclaredTargetPolicy::default(),
            priority,
        )
    }

    #[must_use]
    pub fn add_static_source_to_dynamic_target_path_finder_with(
        &self,
        policy: DeclaredTargetPolicy,
        priority: Option<i32>,
    ) -> Self {
        let finder =
            StaticSourceToDynamicTargetPathFinder::with_policy(self.factory().clone(), policy);
        self.add_path_finder(Arc::new(finder), priority)
    }

    #[must_use]
    pub fn add_dynamic_source_to_static_target_path_finder(&self, priority: Option<i32>) -> Self {
        let finder = DynamicSourceToStaticTargetPathFinder::new(self.factory().clone());
        self.add_path_finder(Arc::new(finder), priority)
    }

    /// Adds a check-point applied to every route of the map.
    #[must_use]
    pub fn add_filter(&self, filter: Arc<dyn CheckPoint>) -> Self {
        Self {
            filters: self.filters.with(filter),
            ..self.clone()
        }
    }

    pub fn build(&self) -> Map {
        Map {
            path_finders: self.path_finders.clone(),
            routes: self.routes.clone(),
            filters: self.filters.clone(),
        }
    }
}

impl fmt::Debug for MapBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapBuilder")
            .field("path_finders", &self.path_finders.len())
            .field("routes", &self.routes.fqns())
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pointmap_model::{ClassDescriptor, ClassRegistry, MethodDescriptor, PropertyDescriptor};

    use super::*;
    use crate::error::ErrorKind;
    use crate::path_finder::NoPathFinder;

    struct Failing;

    impl PathFinder for Failing {
        fn name(&self) -> &str {
            "Failing"
        }

        fn routes(&self, source: &ClassName, _target: &ClassName) -> Result<RouteCollection> {
            Err(MapError::Model(pointmap_model::ModelError::ClassNotFound(
                source.clone(),
            )))
        }
    }

    fn builder() -> MapBuilder {
        let s = ClassDescriptor::new(ClassName::new("S").unwrap())
            .with_property(PropertyDescriptor::public("x"))
            .with_property(PropertyDescriptor::public("y"))
            .with_method(MethodDescriptor::public("getX"));
        let t = ClassDescriptor::new(ClassName::new("T").unwrap())
            .with_property(PropertyDescriptor::public("x"))
            .with_property(PropertyDescriptor::public("y"));
        let registry = ClassRegistry::from_descriptors([s, t]).unwrap();
        MapBuilder::new(Arc::new(registry))
    }

    fn pair() -> (ClassName, ClassName) {
        (ClassName::new("S").unwrap(), ClassName::new("T").unwrap())
    }

    #[test]
    fn builder_is_copy_on_write() {
        let base = builder();
        let with_route = base
            .add_route_fqn("S.$y", "T.$x", CheckPointCollection::new())
            .unwrap();
        let (s, t) = pair();
        assert!(base.build().routes(&s, &t).unwrap().is_empty());
        assert_eq!(with_route.build().routes(&s, &t).unwrap().len(), 1);
    }

    #[test]
    fn explicit_routes_beat_guesses() {
        let map = builder()
            .add_dynamic_source_to_static_target_path_finder(None)
            .add_route_fqn("S.$y", "T.$x", CheckPointCollection::new())
            .unwrap()
            .build();
        let (s, t) = pair();
        let routes = map.routes(&s, &t).unwrap();
        assert_eq!(routes.fqns(), vec!["S.$y -> T.$x", "S.$y -> T.$y"]);
    }

    #[test]
    fn priorities_order_path_finders() {
        let (s, t) = pair();
        let factory = builder().factory().clone();
        let route = |source: &str| {
            RouteBuilder::new(factory.clone())
                .build_route(source, "T.$x", CheckPointCollection::new())
                .unwrap()
        };
        let low: RouteCollection = [route("S.$x")].into_iter().collect();
        let high: RouteCollection = [route("S.$y")].into_iter().collect();

        let map = builder()
            .add_static_path_finder(low, None)
            .add_static_path_finder(high, Some(5))
            .add_path_finder(Arc::new(NoPathFinder), Some(5))
            .build();
        assert_eq!(
            map.path_finders(),
            vec![("StaticPathFinder", 5), ("NoPathFinder", 5), ("StaticPathFinder", 0)]
        );
        assert_eq!(map.routes(&s, &t).unwrap().fqns(), vec!["S.$y -> T.$x"]);
    }

    #[test]
    fn path_finder_failures_are_wrapped() {
        let (s, t) = pair();
        let err = builder()
            .add_path_finder(Arc::new(Failing), None)
            .build()
            .routes(&s, &t)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(matches!(err, MapError::PathFinderFailed { ref strategy, .. } if strategy == "Failing"));
    }

    #[test]
    fn resolution_is_repeatable() {
        let map = builder()
            .add_dynamic_source_to_static_target_path_finder(None)
            .add_static_source_to_dynamic_target_path_finder(Some(-1))
            .build();
        let (s, t) = pair();
        let first = map.routes(&s, &t).unwrap();
        assert_eq!(first, map.routes(&s, &t).unwrap());
        assert_eq!(first, map.clone().routes(&s, &t).unwrap());
    }
}

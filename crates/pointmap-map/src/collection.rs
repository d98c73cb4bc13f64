//! Keyed, ordered route sets.

use indexmap::IndexMap;
use pointmap_model::ClassName;

use crate::route::Route;

/// Routes keyed by route FQN, in insertion order.
///
/// Collections are values: every "modifying" method returns a new
/// collection. A route whose FQN is already present replaces the earlier one
/// in its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCollection {
    routes: IndexMap<String, Route>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_route(&self, route: Route) -> Self {
        let mut routes = self.routes.clone();
        routes.insert(route.fqn().to_string(), route);
        Self { routes }
    }

    #[must_use]
    pub fn with_routes(&self, other: &RouteCollection) -> Self {
        let mut routes = self.routes.clone();
        for route in other.iter() {
            routes.insert(route.fqn().to_string(), route.clone());
        }
        Self { routes }
    }

    /// Returns a copy without the route named `fqn`.
    #[must_use]
    pub fn without(&self, fqn: &str) -> Self {
        let mut routes = self.routes.clone();
        routes.shift_remove(fqn);
        Self { routes }
    }

    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Route) -> bool,
    {
        self.iter().filter(|route| predicate(route)).cloned().collect()
    }

    /// Routes reading from `source` and writing to `target`.
    #[must_use]
    pub fn between(&self, source: &ClassName, target: &ClassName) -> Self {
        self.filter(|route| {
            route.source().class_name() == source && route.target().class_name() == target
        })
    }

    pub fn get(&self, fqn: &str) -> Option<&Route> {
        self.routes.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.routes.contains_key(fqn)
    }

    /// First route writing to the given target point.
    pub fn by_target(&self, target_fqn: &str) -> Option<&Route> {
        self.iter().find(|route| route.target().fqn() == target_fqn)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn fqns(&self) -> Vec<&str> {
        self.routes.keys().map(String::as_str).collect()
    }
}

impl FromIterator<Route> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        let mut routes = IndexMap::new();
        for route in iter {
            routes.insert(route.fqn().to_string(), route);
        }
        Self { routes }
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a Route;
    type IntoIter = indexmap::map::Values<'a, String, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.values()
    }
}

impl IntoIterator for RouteCollection {
    type Item = Route;
    type IntoIter = indexmap::map::IntoValues<String, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_values()
    }
}

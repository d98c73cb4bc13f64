use pointmap_model::ClassName;

use super::PathFinder;
use crate::collection::RouteCollection;
use crate::error::Result;

/// Returns pre-declared routes whose point classes match the requested pair
/// exactly. Never guesses.
#[derive(Debug, Clone, Default)]
pub struct StaticPathFinder {
    routes: RouteCollection,
}

impl StaticPathFinder {
    pub fn new(routes: RouteCollection) -> Self {
        Self { routes }
    }

    pub fn declared(&self) -> &RouteCollection {
        &self.routes
    }
}

impl PathFinder for StaticPathFinder {
    fn name(&self) -> &str {
        "StaticPathFinder"
    }

    fn routes(&self, source: &ClassName, target: &ClassName) -> Result<RouteCollection> {
        Ok(self.routes.between(source, target))
    }
}

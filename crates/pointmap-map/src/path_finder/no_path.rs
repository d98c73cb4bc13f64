use pointmap_model::ClassName;

use super::PathFinder;
use crate::collection::RouteCollection;
use crate::error::Result;

/// Finds nothing; only explicit routes apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPathFinder;

impl PathFinder for NoPathFinder {
    fn name(&self) -> &str {
        "NoPathFinder"
    }

    fn routes(&self, _source: &ClassName, _target: &ClassName) -> Result<RouteCollection> {
        Ok(RouteCollection::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_empty() {
        let class = ClassName::new("Obj").unwrap();
        assert!(NoPathFinder.routes(&class, &class).unwrap().is_empty());
    }
}

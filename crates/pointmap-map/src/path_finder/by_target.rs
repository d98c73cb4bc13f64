use pointmap_model::naming::{UPDATE, getter_name, setter_property};
use pointmap_model::{ClassDescriptor, ClassName, MethodDescriptor};

use super::PathFinder;
use crate::check_point::CheckPointCollection;
use crate::collection::RouteCollection;
use crate::error::Result;
use crate::factory::PointFactory;
use crate::point::Point;
use crate::route::Route;

/// Guesses routes from the target's point of view.
///
/// Every value the target can receive is visited in declaration order:
/// parameters of the constructor, of `set<Name>` methods and of `update`,
/// then public properties. For a receiver called `name` the source is
/// searched for a readable `get<Name>()` first, then for a public property
/// `name`. Receivers without a match get no route.
#[derive(Debug, Clone)]
pub struct DynamicSourceToStaticTargetPathFinder {
    factory: PointFactory,
}

impl DynamicSourceToStaticTargetPathFinder {
    pub fn new(factory: PointFactory) -> Self {
        Self { factory }
    }

    fn source_point(&self, source: &ClassDescriptor, name: &str) -> Result<Option<Point>> {
        let getter = getter_name(name);
        if source.method(&getter).is_some_and(MethodDescriptor::is_readable) {
            return Ok(Some(self.factory.method_point(&source.name, &getter)?.into()));
        }
        if source
            .property(name)
            .is_some_and(|property| property.visibility.is_public())
        {
            return Ok(Some(self.factory.property_point(&source.name, name)?.into()));
        }
        Ok(None)
    }
}

fn receives_values(method: &MethodDescriptor) -> bool {
    method.is_constructor() || method.name == UPDATE || setter_property(&method.name).is_some()
}

impl PathFinder for DynamicSourceToStaticTargetPathFinder {
    fn name(&self) -> &str {
        "DynamicSourceToStaticTargetPathFinder"
    }

    fn routes(&self, source: &ClassName, target: &ClassName) -> Result<RouteCollection> {
        let introspector = self.factory.introspector();
        let source_class = introspector.require(source)?;
        let target_class = introspector.require(target)?;

        let mut routes = Vec::new();
        for method in target_class.public_methods().filter(|m| receives_values(m)) {
            for parameter in &method.parameters {
                let Some(from) = self.source_point(&source_class, &parameter.name)? else {
                    continue;
                };
                let to = self
                    .factory
                    .parameter_point(target, &method.name, &parameter.name)?;
                routes.push(Route::new(from, to.into(), CheckPointCollection::new())?);
            }
        }
        for property in target_class.public_properties() {
            let Some(from) = self.source_point(&source_class, &property.name)? else {
                continue;
            };
            let to = self.factory.property_point(target, &property.name)?;
            routes.push(Route::new(from, to.into(), CheckPointCollection::new())?);
        }

        tracing::debug!(
            source = %source,
            target = %target,
            routes = routes.len(),
            "Guessed routes from target receivers"
        );
        Ok(routes.into_iter().collect())
    }
}

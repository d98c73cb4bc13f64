use std::collections::BTreeSet;

use pointmap_model::naming::getter_property;
use pointmap_model::{ClassName, is_identifier};
use serde::{Deserialize, Serialize};

use super::PathFinder;
use crate::check_point::CheckPointCollection;
use crate::collection::RouteCollection;
use crate::error::Result;
use crate::factory::PointFactory;
use crate::point::Point;
use crate::route::Route;

/// What the source-driven guesser does when the target already declares a
/// property with the candidate name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredTargetPolicy {
    /// Leave declared properties to explicit routes and other strategies.
    #[default]
    Skip,
    /// Route to the declared property when it is public.
    Include,
}

/// Guesses routes from the source's point of view ("overloaded" target).
///
/// Readable `get<Name>()` methods, then public properties, of the source each
/// propose a property on the target named after them (`getFirstName` ->
/// `firstName`). The target property need not exist; such routes address a
/// dynamic property.
#[derive(Debug, Clone)]
pub struct StaticSourceToDynamicTargetPathFinder {
    factory: PointFactory,
    policy: DeclaredTargetPolicy,
}

impl StaticSourceToDynamicTargetPathFinder {
    pub fn new(factory: PointFactory) -> Self {
        Self::with_policy(factory, DeclaredTargetPolicy::default())
    }

    pub fn with_policy(factory: PointFactory, policy: DeclaredTargetPolicy) -> Self {
        Self { factory, policy }
    }

    pub fn policy(&self) -> DeclaredTargetPolicy {
        self.policy
    }
}

impl PathFinder for StaticSourceToDynamicTargetPathFinder {
    fn name(&self) -> &str {
        "StaticSourceToDynamicTargetPathFinder"
    }

    fn routes(&self, source: &ClassName, target: &ClassName) -> Result<RouteCollection> {
        let introspector = self.factory.introspector();
        let source_class = introspector.require(source)?;
        let target_class = introspector.require(target)?;

        let mut candidates: Vec<(Point, String)> = Vec::new();
        for method in source_class.public_methods() {
            if !method.is_readable() {
                continue;
            }
            if let Some(name) = getter_property(&method.name) {
                candidates.push((self.factory.method_point(source, &method.name)?.into(), name));
            }
        }
        for property in source_class.public_properties() {
            candidates.push((
                self.factory.property_point(source, &property.name)?.into(),
                property.name.clone(),
            ));
        }

        let mut claimed = BTreeSet::new();
        let mut routes = Vec::new();
        for (from, name) in candidates {
            if !is_identifier(&name) {
                tracing::trace!(
                    source = from.fqn(),
                    candidate = %name,
                    "Skipping candidate that is not a property name"
                );
                continue;
            }
            if !claimed.insert(name.clone()) {
                continue;
            }
            let to = match target_class.property(&name) {
                Some(declared) => {
                    if self.policy == DeclaredTargetPolicy::Skip
                        || !declared.visibility.is_public()
                    {
                        tracing::trace!(
                            target = %target,
                            property = %name,
                            "Skipping declared target property"
                        );
                        continue;
                    }
                    self.factory.property_point(target, &name)?
                }
                None => self.factory.dynamic_property_point(target, &name)?,
            };
            routes.push(Route::new(from, to.into(), CheckPointCollection::new())?);
        }

        tracing::debug!(
            source = %source,
            target = %target,
            policy = ?self.policy,
            routes = routes.len(),
            "Guessed routes from source accessors"
        );
        Ok(routes.into_iter().collect())
    }
}

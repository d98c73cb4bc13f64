//! Executes resolved routes against live objects.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use pointmap_model::naming::CONSTRUCTOR;
use pointmap_model::{ClassIntrospector, ClassName, Instance, ModelError, Record, Value};

use crate::check_point::MappingContext;
use crate::error::{MapError, Result};
use crate::map::Map;
use crate::point::Point;
use crate::route::Route;

/// Arguments collected for one method call, keyed by parameter position.
#[derive(Debug, Default)]
struct PendingCall {
    first_route: Option<String>,
    args: BTreeMap<usize, Value>,
}

impl PendingCall {
    fn push(&mut self, route: &Route, position: usize, value: Value) {
        if self.first_route.is_none() {
            self.first_route = Some(route.fqn().to_string());
        }
        self.args.insert(position, value);
    }

    fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Positional arguments up to the last routed parameter. Gaps are null;
    /// trailing parameters are left to the callee's defaults.
    fn into_args(self) -> Vec<Value> {
        let len = self.args.keys().next_back().map_or(0, |last| last + 1);
        let mut args = vec![Value::Null; len];
        for (position, value) in self.args {
            if let Some(slot) = args.get_mut(position) {
                *slot = value;
            }
        }
        args
    }
}

/// Values read from the source, sorted by how they reach the target.
#[derive(Debug, Default)]
struct Plan {
    constructor: PendingCall,
    calls: IndexMap<String, PendingCall>,
    properties: Vec<(String, String, Value)>,
}

/// Copies values from a source object to a target along a [`Map`]'s routes.
#[derive(Clone)]
pub struct Mapper {
    map: Map,
    introspector: Arc<dyn ClassIntrospector>,
}

impl Mapper {
    pub fn new(map: Map, introspector: Arc<dyn ClassIntrospector>) -> Self {
        Self { map, introspector }
    }

    pub fn map_definition(&self) -> &Map {
        &self.map
    }

    /// Builds a new `target` object from `source`.
    ///
    /// Constructor-parameter routes feed the constructor; the remaining
    /// routes are applied to the constructed record: one call per mutator
    /// method, then property writes.
    pub fn map(&self, source: &dyn Instance, target: &ClassName) -> Result<Record> {
        let span = tracing::info_span!("map", source = %source.class_name(), target = %target);
        let _guard = span.enter();

        let class = self.introspector.require(target)?;
        let mut plan = self.plan(source, target)?;
        let constructor = std::mem::take(&mut plan.constructor);
        let route = constructor.first_route.clone();
        let mut record =
            Record::construct(class, constructor.into_args()).map_err(|err| call_failed(route, err))?;
        apply(&mut record, plan)?;
        tracing::debug!("Mapped record");
        Ok(record)
    }

    /// Maps `source` onto an existing object. Constructor routes are ignored.
    pub fn map_into(&self, source: &dyn Instance, target: &mut dyn Instance) -> Result<()> {
        let target_class = target.class_name().clone();
        let span =
            tracing::info_span!("map_into", source = %source.class_name(), target = %target_class);
        let _guard = span.enter();

        let mut plan = self.plan(source, &target_class)?;
        let constructor = std::mem::take(&mut plan.constructor);
        if !constructor.is_empty() {
            tracing::debug!(
                ignored = constructor.args.len(),
                "Target already constructed, skipping constructor routes"
            );
        }
        apply(target, plan)
    }

    fn plan(&self, source: &dyn Instance, target: &ClassName) -> Result<Plan> {
        let routes = self.map.routes_for(source, target)?;
        let context = MappingContext {
            source,
            target_class: target,
        };
        let mut plan = Plan::default();
        for route in &routes {
            let Some(value) = self
                .transfer(route, &context)
                .map_err(|err| route_failed(route, err))?
            else {
                continue;
            };
            match route.target() {
                Point::Parameter(parameter) if parameter.method_name() == CONSTRUCTOR => {
                    plan.constructor.push(route, parameter.position(), value);
                }
                Point::Parameter(parameter) => {
                    plan.calls
                        .entry(parameter.method_name().to_string())
                        .or_default()
                        .push(route, parameter.position(), value);
                }
                Point::Property(property) => {
                    plan.properties.push((
                        route.fqn().to_string(),
                        property.name().to_string(),
                        value,
                    ));
                }
                Point::Method(method) => {
                    return Err(MapError::InvalidTarget {
                        fqn: method.fqn().to_string(),
                    });
                }
            }
        }
        Ok(plan)
    }

    /// Reads the source value of `route` and runs it through the route's
    /// check-points, then the map's filters. `None` means skipped.
    fn transfer(&self, route: &Route, context: &MappingContext<'_>) -> Result<Option<Value>> {
        let value = match route.source() {
            Point::Property(property) => context.source.property(property.name())?,
            Point::Method(method) => context.source.read(method.name())?,
            Point::Parameter(parameter) => {
                return Err(MapError::InvalidSource {
                    fqn: parameter.fqn().to_string(),
                });
            }
        };
        tracing::trace!(route = route.fqn(), %value, "Read source value");
        let Some(value) = route.check_points().apply(value, route, context)? else {
            return Ok(None);
        };
        self.map.filters().apply(value, route, context)
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("map", &self.map)
            .finish_non_exhaustive()
    }
}

fn apply(target: &mut dyn Instance, plan: Plan) -> Result<()> {
    for (method, call) in plan.calls {
        let route = call.first_route.clone();
        target
            .invoke(&method, call.into_args())
            .map_err(|err| call_failed(route, err))?;
    }
    for (route, property, value) in plan.properties {
        target
            .set_property(&property, value)
            .map_err(|err| call_failed(Some(route), err))?;
    }
    Ok(())
}

fn route_failed(route: &Route, err: MapError) -> MapError {
    MapError::RouteFailed {
        route: route.fqn().to_string(),
        source: Box::new(err),
    }
}

fn call_failed(route: Option<String>, err: ModelError) -> MapError {
    match route {
        Some(route) => MapError::RouteFailed {
            route,
            source: Box::new(err.into()),
        },
        None => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use pointmap_model::{
        ClassDescriptor, ClassRegistry, MethodDescriptor, ParameterDescriptor, PropertyDescriptor,
    };
    use serde_json::json;

    use super::*;
    use crate::check_point::{CheckPoint, CheckPointCollection, FnCheckPoint};
    use crate::error::ErrorKind;
    use crate::map::MapBuilder;

    fn registry() -> Arc<ClassRegistry> {
        let source = ClassDescriptor::new(ClassName::new("S").unwrap())
            .with_property(PropertyDescriptor::public("x"))
            .with_property(PropertyDescriptor::public("y"))
            .with_property(PropertyDescriptor::public("z"))
            .with_method(MethodDescriptor::public("getX"));
        let target = ClassDescriptor::new(ClassName::new("T").unwrap())
            .with_property(PropertyDescriptor::public("x"))
            .with_property(PropertyDescriptor::public("y"))
            .with_property(PropertyDescriptor::public("z"))
            .with_method(
                MethodDescriptor::public("__construct")
                    .with_parameter(ParameterDescriptor::required("x")),
            )
            .with_method(
                MethodDescriptor::public("setZ")
                    .with_parameter(ParameterDescriptor::optional("flag"))
                    .with_parameter(ParameterDescriptor::required("z")),
            )
            .with_method(
                MethodDescriptor::public("update")
                    .with_parameter(ParameterDescriptor::optional("y"))
                    .with_parameter(ParameterDescriptor::optional("z")),
            );
        Arc::new(ClassRegistry::from_descriptors([source, target]).unwrap())
    }

    fn source(registry: &ClassRegistry) -> Record {
        let class = Arc::new(registry.get(&ClassName::new("S").unwrap()).unwrap().clone());
        Record::from_json(class, &json!({"x": 1, "y": 2, "z": 3})).unwrap()
    }

    fn target() -> ClassName {
        ClassName::new("T").unwrap()
    }

    #[test]
    fn routes_feed_constructor_then_mutators() {
        let registry = registry();
        let map = MapBuilder::new(registry.clone())
            .add_route_fqn("S.getX()", "T.__construct().$x", CheckPointCollection::new())
            .unwrap()
            .add_route_fqn("S.$z", "T.update().$z", CheckPointCollection::new())
            .unwrap()
            .build();
        let record = Mapper::new(map, registry.clone())
            .map(&source(&registry), &target())
            .unwrap();
        assert_eq!(record.to_json(), json!({"x": 1, "y": null, "z": 3}));
    }

    #[test]
    fn setter_value_lands_on_its_own_parameter() {
        let registry = registry();
        let map = MapBuilder::new(registry.clone())
            .add_route_fqn("S.getX()", "T.__construct().$x", CheckPointCollection::new())
            .unwrap()
            .add_route_fqn("S.$y", "T.setZ().$z", CheckPointCollection::new())
            .unwrap()
            .build();
        let record = Mapper::new(map, registry.clone())
            .map(&source(&registry), &target())
            .unwrap();
        assert_eq!(record.to_json(), json!({"x": 1, "y": null, "z": 2}));
    }

    #[test]
    fn check_points_and_filters_run_in_order() {
        let registry = registry();
        let double: Arc<dyn CheckPoint> = Arc::new(FnCheckPoint::new("double", |value, _, _| {
            Ok(json!(value.as_i64().unwrap_or_default() * 2))
        }));
        let decline: Arc<dyn CheckPoint> = Arc::new(FnCheckPoint::new("decline", |_, route, _| {
            Err(MapError::NotSupportedContext {
                handler: "decline".to_string(),
                route: route.fqn().to_string(),
            })
        }));
        let plus_one: Arc<dyn CheckPoint> = Arc::new(FnCheckPoint::new("plus_one", |value, _, _| {
            Ok(json!(value.as_i64().unwrap_or_default() + 1))
        }));
        let map = MapBuilder::new(registry.clone())
            .add_route_fqn(
                "S.getX()",
                "T.__construct().$x",
                CheckPointCollection::new().with(double).with(decline),
            )
            .unwrap()
            .add_route_fqn("S.$y", "T.$y", CheckPointCollection::new())
            .unwrap()
            .add_filter(plus_one)
            .build();
        let record = Mapper::new(map, registry.clone())
            .map(&source(&registry), &target())
            .unwrap();
        assert_eq!(record.to_json(), json!({"x": 3, "y": 3, "z": null}));
    }

    #[test]
    fn skipped_routes_leave_target_untouched() {
        let registry = registry();
        let skip: Arc<dyn CheckPoint> = Arc::new(FnCheckPoint::new("skip", |_, route, _| {
            Err(MapError::SkipRoute {
                handler: "skip".to_string(),
                route: route.fqn().to_string(),
            })
        }));
        let map = MapBuilder::new(registry.clone())
            .add_route_fqn("S.$y", "T.$y", CheckPointCollection::new().with(skip))
            .unwrap()
            .add_route_fqn("S.$z", "T.$z", CheckPointCollection::new())
            .unwrap()
            .build();
        let class = Arc::new(registry.get(&target()).unwrap().clone());
        let mut existing = Record::construct(class, vec![json!(9)]).unwrap();
        existing.set_property("y", json!("keep")).unwrap();

        Mapper::new(map, registry.clone())
            .map_into(&source(&registry), &mut existing)
            .unwrap();
        assert_eq!(existing.to_json(), json!({"x": 9, "y": "keep", "z": 3}));
    }

    #[test]
    fn check_point_errors_name_the_route() {
        let registry = registry();
        let broken: Arc<dyn CheckPoint> = Arc::new(FnCheckPoint::new("broken", |_, _, _| {
            Err(MapError::InvalidConfig("nope".to_string()))
        }));
        let map = MapBuilder::new(registry.clone())
            .add_route_fqn("S.getX()", "T.__construct().$x", CheckPointCollection::new().with(broken))
            .unwrap()
            .build();
        let err = Mapper::new(map, registry.clone())
            .map(&source(&registry), &target())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(matches!(
            err,
            MapError::RouteFailed { ref route, .. } if route == "S.getX() -> T.__construct().$x"
        ));
    }

    #[test]
    fn missing_constructor_arguments_fail() {
        let registry = registry();
        let map = MapBuilder::new(registry.clone()).build();
        let err = Mapper::new(map, registry.clone())
            .map(&source(&registry), &target())
            .unwrap_err();
        assert!(matches!(err, MapError::Model(ModelError::MissingArgument { .. })));
    }
}

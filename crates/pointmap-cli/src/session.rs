//! Loaded schema plus map, shared by the subcommands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use pointmap_map::{Map, MapConfig, Mapper, PathFinderDecl, PathFinderKind, Point};
use pointmap_model::{ClassIntrospector, ClassName, ClassRegistry, Record, Value};
use serde::{Deserialize, Serialize};

/// A source object read from disk: its class and property values.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRecord {
    pub class: ClassName,
    #[serde(default)]
    pub properties: Value,
}

/// One resolved route, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRow {
    pub source: String,
    pub source_kind: &'static str,
    pub target: String,
    pub target_kind: &'static str,
    pub check_points: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    registry: Arc<ClassRegistry>,
    map: Map,
}

impl Session {
    /// Reads the class schema and, if given, the map configuration. Without
    /// a configuration only the target-driven guesser is active.
    pub fn load(schema: &Path, config: Option<&Path>) -> Result<Self> {
        let registry = ClassRegistry::load(schema)
            .with_context(|| format!("load class schema {}", schema.display()))?;
        let config = match config {
            Some(path) => MapConfig::load(path)
                .with_context(|| format!("load map configuration {}", path.display()))?,
            None => default_config(),
        };
        Self::new(registry, &config)
    }

    pub fn new(registry: ClassRegistry, config: &MapConfig) -> Result<Self> {
        let registry = Arc::new(registry);
        let introspector: Arc<dyn ClassIntrospector> = registry.clone();
        let map = config
            .builder(introspector)
            .context("build map from configuration")?
            .build();
        Ok(Self { registry, map })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn route_rows(&self, source: &ClassName, target: &ClassName) -> Result<Vec<RouteRow>> {
        let routes = self
            .map
            .routes(source, target)
            .with_context(|| format!("resolve routes from {source} to {target}"))?;
        Ok(routes
            .iter()
            .map(|route| RouteRow {
                source: route.source().fqn().to_string(),
                source_kind: kind_label(route.source()),
                target: route.target().fqn().to_string(),
                target_kind: kind_label(route.target()),
                check_points: route
                    .check_points()
                    .names()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect())
    }

    /// Maps an input record onto a new instance of `target` and returns the
    /// result's properties.
    pub fn map_input(&self, input: &InputRecord, target: &ClassName) -> Result<Value> {
        let class = self
            .registry
            .require(&input.class)
            .with_context(|| format!("input class {}", input.class))?;
        let source = Record::from_json(class, &input.properties)
            .with_context(|| format!("build {} from input", input.class))?;
        let mapper = Mapper::new(self.map.clone(), self.registry.clone());
        let record = mapper
            .map(&source, target)
            .with_context(|| format!("map {} to {target}", input.class))?;
        Ok(record.to_json())
    }
}

pub fn read_input(path: &Path) -> Result<InputRecord> {
    let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let input: InputRecord =
        serde_json::from_str(&json).with_context(|| format!("parse {}", path.display()))?;
    if !input.properties.is_object() && !input.properties.is_null() {
        return Err(anyhow!(
            "{}: \"properties\" must be a JSON object",
            path.display()
        ));
    }
    Ok(input)
}

fn default_config() -> MapConfig {
    MapConfig {
        path_finders: vec![PathFinderDecl {
            kind: PathFinderKind::DynamicSourceToStaticTarget,
            priority: None,
            routes: Vec::new(),
        }],
        ..MapConfig::default()
    }
}

fn kind_label(point: &Point) -> &'static str {
    if let Point::Property(property) = point {
        if property.is_dynamic() {
            return "dynamic property";
        }
    }
    point.kind().as_str()
}

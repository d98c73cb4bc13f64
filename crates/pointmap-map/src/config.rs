//! JSON map definitions.
//!
//! ```json
//! {
//!   "routes": [{ "source": "app::A.getX()", "target": "app::B.$x" }],
//!   "path_finders": [{ "kind": "dynamic_source_to_static_target", "priority": 10 }],
//!   "declared_targets": "skip"
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use pointmap_model::ClassIntrospector;
use serde::{Deserialize, Serialize};

use crate::check_point::CheckPointCollection;
use crate::collection::RouteCollection;
use crate::error::{MapError, Result};
use crate::map::MapBuilder;
use crate::path_finder::{DeclaredTargetPolicy, NoPathFinder};
use crate::route::RouteBuilder;

/// One explicit route, as a pair of point FQNs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecl {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathFinderKind {
    None,
    Static,
    StaticSourceToDynamicTarget,
    DynamicSourceToStaticTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathFinderDecl {
    pub kind: PathFinderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Only meaningful for [`PathFinderKind::Static`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteDecl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub routes: Vec<RouteDecl>,
    pub path_finders: Vec<PathFinderDecl>,
    pub declared_targets: DeclaredTargetPolicy,
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            routes = config.routes.len(),
            path_finders = config.path_finders.len(),
            "Loaded map configuration"
        );
        Ok(config)
    }

    /// Turns the declarations into a builder. Every FQN is resolved against
    /// `introspector`; the first invalid one aborts.
    pub fn builder(&self, introspector: Arc<dyn ClassIntrospector>) -> Result<MapBuilder> {
        let mut builder = MapBuilder::new(introspector);
        for decl in &self.routes {
            builder = builder
                .add_route_fqn(&decl.source, &decl.target, CheckPointCollection::new())
                .map_err(|err| invalid_route(decl, &err))?;
        }
        for finder in &self.path_finders {
            if finder.kind != PathFinderKind::Static && !finder.routes.is_empty() {
                return Err(MapError::InvalidConfig(format!(
                    "path-finder {:?} does not take routes",
                    finder.kind
                )));
            }
            builder = match finder.kind {
                PathFinderKind::None => {
                    builder.add_path_finder(Arc::new(NoPathFinder), finder.priority)
                }
                PathFinderKind::Static => {
                    let routes = static_routes(builder.route_builder(), &finder.routes)?;
                    builder.add_static_path_finder(routes, finder.priority)
                }
                PathFinderKind::StaticSourceToDynamicTarget => builder
                    .add_static_source_to_dynamic_target_path_finder_with(
                        self.declared_targets,
                        finder.priority,
                    ),
                PathFinderKind::DynamicSourceToStaticTarget => {
                    builder.add_dynamic_source_to_static_target_path_finder(finder.priority)
                }
            };
        }
        Ok(builder)
    }
}

fn static_routes(builder: &RouteBuilder, decls: &[RouteDecl]) -> Result<RouteCollection> {
    decls
        .iter()
        .map(|decl| {
            builder
                .build_route(&decl.source, &decl.target, CheckPointCollection::new())
                .map_err(|err| invalid_route(decl, &err))
        })
        .collect()
}

fn invalid_route(decl: &RouteDecl, err: &MapError) -> MapError {
    MapError::InvalidConfig(format!("route {} -> {}: {err}", decl.source, decl.target))
}

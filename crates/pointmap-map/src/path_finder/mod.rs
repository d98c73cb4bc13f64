//! Route discovery strategies.
//!
//! A [`PathFinder`] proposes routes between a source class and a target
//! class. Implementations are pure: the same pair always yields the same
//! collection and nothing is remembered between calls.

mod by_source;
mod by_target;
mod no_path;
mod static_routes;

pub use by_source::{DeclaredTargetPolicy, StaticSourceToDynamicTargetPathFinder};
pub use by_target::DynamicSourceToStaticTargetPathFinder;
pub use no_path::NoPathFinder;
pub use static_routes::StaticPathFinder;

use pointmap_model::ClassName;

use crate::collection::RouteCollection;
use crate::error::Result;

pub trait PathFinder: Send + Sync {
    /// Strategy identity, used for precedence and in errors.
    fn name(&self) -> &str;

    fn routes(&self, source: &ClassName, target: &ClassName) -> Result<RouteCollection>;
}

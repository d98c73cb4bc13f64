//! Route resolution and mapping for pointmap.
//!
//! A [`Point`] addresses a readable or writable location on a class, a
//! [`Route`] pairs a source point with a target point, and a [`Map`] combines
//! explicit routes with [`PathFinder`] strategies that guess the rest.
//! [`Mapper`] carries values along the resolved routes.

pub mod check_point;
pub mod collection;
pub mod config;
pub mod error;
pub mod factory;
pub mod map;
pub mod mapper;
pub mod path_finder;
pub mod point;
pub mod route;

pub use check_point::{CheckPoint, CheckPointCollection, FnCheckPoint, MappingContext};
pub use collection::RouteCollection;
pub use config::{MapConfig, PathFinderDecl, PathFinderKind, RouteDecl};
pub use error::{ErrorKind, MapError, PointErrorReason, Result};
pub use factory::PointFactory;
pub use map::{DEFAULT_PRIORITY, Map, MapBuilder};
pub use mapper::Mapper;
pub use path_finder::{
    DeclaredTargetPolicy, DynamicSourceToStaticTargetPathFinder, NoPathFinder, PathFinder,
    StaticPathFinder, StaticSourceToDynamicTargetPathFinder,
};
pub use point::{
    MethodPoint, ParameterPoint, Point, PointKind, PropertyPoint, method_fqn, parameter_fqn,
    property_fqn,
};
pub use route::{ROUTE_SEPARATOR, Route, RouteBuilder};

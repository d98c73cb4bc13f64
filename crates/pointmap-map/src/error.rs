//! Error types for route resolution and mapping.

use std::fmt;

use pointmap_model::ModelError;
use thiserror::Error;

/// Abstract classification of a [`MapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input: malformed FQN, unknown member, wrong point role, bad config.
    InvalidArgument,
    /// A valid request that could not be carried out.
    InvalidOperation,
    /// A check-point declined the current route; the value passes through.
    NotSupportedContext,
    /// A check-point dropped the value for the current route.
    Skip,
}

/// Why the point factory rejected an FQN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointErrorReason {
    Syntax,
    ClassNotFound,
    MethodNotFound,
    PropertyNotFound,
    ParameterNotFound,
    NotPublic,
    /// The method requires arguments and cannot be read from.
    NotReadable,
}

impl PointErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "not a property, method or parameter FQN",
            Self::ClassNotFound => "class not found",
            Self::MethodNotFound => "method not found",
            Self::PropertyNotFound => "property not found",
            Self::ParameterNotFound => "parameter not found",
            Self::NotPublic => "member is not public",
            Self::NotReadable => "method requires arguments",
        }
    }
}

impl fmt::Display for PointErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("{factory} cannot create point {fqn:?}: {reason}")]
    InvalidPoint {
        fqn: String,
        factory: &'static str,
        reason: PointErrorReason,
    },
    #[error("{fqn} cannot be used as a route source")]
    InvalidSource { fqn: String },
    #[error("{fqn} cannot be used as a route target")]
    InvalidTarget { fqn: String },
    #[error("invalid map configuration: {0}")]
    InvalidConfig(String),
    #[error("map configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("path-finder {strategy} failed: {source}")]
    PathFinderFailed {
        strategy: String,
        #[source]
        source: Box<MapError>,
    },
    #[error("route {route} failed: {source}")]
    RouteFailed {
        route: String,
        #[source]
        source: Box<MapError>,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{handler} does not support route {route}")]
    NotSupportedContext { handler: String, route: String },
    #[error("{handler} skipped route {route}")]
    SkipRoute { handler: String, route: String },
}

impl MapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPoint { .. }
            | Self::InvalidSource { .. }
            | Self::InvalidTarget { .. }
            | Self::InvalidConfig(_)
            | Self::Json(_) => ErrorKind::InvalidArgument,
            Self::Io(_)
            | Self::PathFinderFailed { .. }
            | Self::RouteFailed { .. }
            | Self::Model(_) => ErrorKind::InvalidOperation,
            Self::NotSupportedContext { .. } => ErrorKind::NotSupportedContext,
            Self::SkipRoute { .. } => ErrorKind::Skip,
        }
    }

    pub(crate) fn invalid_point(
        fqn: impl Into<String>,
        factory: &'static str,
        reason: PointErrorReason,
    ) -> Self {
        Self::InvalidPoint {
            fqn: fqn.into(),
            factory,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let err = MapError::invalid_point("X.$y", "PointFactory", PointErrorReason::ClassNotFound);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            err.to_string(),
            "PointFactory cannot create point \"X.$y\": class not found"
        );

        let wrapped = MapError::PathFinderFailed {
            strategy: "StaticPathFinder".to_string(),
            source: Box::new(err),
        };
        assert_eq!(wrapped.kind(), ErrorKind::InvalidOperation);
        assert!(wrapped.to_string().starts_with("path-finder StaticPathFinder failed"));

        let declined = MapError::NotSupportedContext {
            handler: "trim".to_string(),
            route: "A.$a -> B.$b".to_string(),
        };
        assert_eq!(declined.kind(), ErrorKind::NotSupportedContext);
    }
}

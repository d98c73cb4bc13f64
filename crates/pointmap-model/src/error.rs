use thiserror::Error;

use crate::ClassName;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid class name: {0:?}")]
    InvalidClassName(String),
    #[error("invalid member name: {0:?}")]
    InvalidMemberName(String),
    #[error("class {class} declares member {member:?} twice")]
    DuplicateMember { class: ClassName, member: String },
    #[error("class {0} is registered twice")]
    DuplicateClass(ClassName),
    #[error("class not found: {0}")]
    ClassNotFound(ClassName),
    #[error("{class} has no property {property:?}")]
    UnknownProperty { class: ClassName, property: String },
    #[error("{class} has no method {method:?}")]
    UnknownMethod { class: ClassName, method: String },
    #[error("{class}::{method} cannot be invoked on a record")]
    UnsupportedMethod { class: ClassName, method: String },
    #[error("{class}::{method} expects at most {expected} argument(s), got {given}")]
    TooManyArguments {
        class: ClassName,
        method: String,
        expected: usize,
        given: usize,
    },
    #[error("{class}::{method} is missing required argument {parameter:?}")]
    MissingArgument {
        class: ClassName,
        method: String,
        parameter: String,
    },
    #[error("schema error: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;

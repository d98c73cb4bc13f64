//! CLI library components for pointmap.

pub mod logging;
pub mod session;

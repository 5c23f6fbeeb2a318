//! Infrastructure layer - Allocation engine implementations

pub mod allocation;
pub mod logging;
pub mod observability;
pub mod services;

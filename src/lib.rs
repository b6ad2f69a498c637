//! Building-speed estimation for a settlers-style resource game.
//!
//! Exposes the resource model, income model, estimators, and build plans
//! for use by the command-line tools, integration tests, and benchmarks.

pub mod calibrate;
pub mod config;
pub mod estimate;
pub mod income;
pub mod logging;
pub mod plan;
pub mod resources;

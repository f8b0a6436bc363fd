pub mod config;
pub mod crds;
pub mod date_time;
pub mod error;
pub mod model;
pub mod resources;
pub mod telemetry;
pub mod utils;

pub mod stats;
pub mod telemetry;

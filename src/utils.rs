pub mod date;
pub mod ddb;
pub mod telemetry;

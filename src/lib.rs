pub mod db;
pub mod pagination;
pub mod quiz;
pub mod search;
pub mod server;
pub mod settings;
pub mod telemetry;

// Frameworks layer: configuration, database wiring and server bootstrap.

pub mod config;
pub mod db;
pub mod server;

// Domain layer: entities, errors, ports and password hashing.

pub mod entities;
pub mod errors;
pub mod password;
pub mod ports;

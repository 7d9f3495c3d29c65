// Outbound HTTP clients for neighbouring services.

pub mod api;

// Interface adapters: HTTP routes, handlers, DTOs and storage adapters.

pub mod auth;
pub mod handlers;
pub mod postgres;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod xml;

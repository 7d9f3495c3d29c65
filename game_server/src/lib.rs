pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::http_port;
pub use frameworks::server::{app, build_state, run, run_with_config};
pub use interface_adapters::state::AppState;

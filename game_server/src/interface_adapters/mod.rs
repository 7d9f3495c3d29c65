// Interface adapters: wire protocol, outbound clients and network handling.

pub mod clients;
pub mod http;
pub mod net;
pub mod protocol;
pub mod state;

// Adapters layer: concrete implementations for external systems (http api, stdio transport).

pub mod http;
pub mod stdio;

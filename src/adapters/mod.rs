// Adapters layer: concrete implementations of the page and band source ports.

pub mod dom;
pub mod http;

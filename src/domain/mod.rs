// Domain layer: models, the element tree written into pages, and the ports the core talks to.

pub mod model;
pub mod node;
pub mod ports;

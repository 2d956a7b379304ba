// Domain layer: API resource models and ports (interfaces).

pub mod model;
pub mod ports;

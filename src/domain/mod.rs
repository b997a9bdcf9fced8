// Domain layer: canonical tracking models and ports (interfaces).

pub mod model;
pub mod ports;

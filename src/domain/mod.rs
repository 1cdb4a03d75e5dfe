// Domain layer: response models and the ports the checker talks through.

pub mod model;
pub mod ports;

// Domain layer: shop and schedule models plus the ports the client depends on.

pub mod model;
pub mod ports;

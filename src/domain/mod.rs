// Domain layer: calculation models and the ports the batch pipeline runs against.

pub mod model;
pub mod ports;

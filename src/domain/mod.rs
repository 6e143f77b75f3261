// Domain layer: the event model and the ports (interfaces) the core is written against.

pub mod model;
pub mod ports;

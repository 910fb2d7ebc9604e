// Domain layer: the consultation record, select options and the ports the
// handler depends on. No HTTP framework types in here.

pub mod model;
pub mod options;
pub mod ports;

// Domain layer: DTOs mirroring the remote JSON shapes and the API port.

pub mod model;
pub mod ports;

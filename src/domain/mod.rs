// Domain layer: employee models, retry/transport settings and ports (Transport, ConfigProvider).

pub mod model;
pub mod ports;

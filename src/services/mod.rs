mod container_service;
mod system_service;

pub use container_service::ContainerService;
pub use system_service::SystemService;

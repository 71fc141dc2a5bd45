mod container;
pub mod traits;

pub use container::{
    Container, Image, STATE_RUNNING, STATE_VOCABULARY, SystemStatus, canonical_state,
};
pub use traits::{AvailabilityProbe, CommandExecutor, ContainerRuntime};

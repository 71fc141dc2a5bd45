pub mod runtime;
pub mod setup;
pub mod system;

pub use runtime::{Runtime, RuntimeAction};
pub use system::SystemAction;

pub mod config;
pub mod error;
pub mod rng;

pub use config::{config, set_config, ForgeConfig};
pub use error::{ForgeError, Result};

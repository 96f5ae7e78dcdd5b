pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::{engine::SubsEngine, pipeline::SubscribePipeline};
pub use crate::domain::model::{SubscriptionBundle, SubscriptionSet};
pub use crate::utils::error::{Result, SubsError};

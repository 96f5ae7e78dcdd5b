pub mod aggregate;
pub mod endpoint;
pub mod engine;
pub mod inbound;
pub mod pipeline;
pub mod resolver;
pub mod transport;

pub use crate::domain::model::{SourceData, SubscriptionBundle, SubscriptionSet};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

pub mod client;
pub mod orchestrator;

pub use crate::domain::model::{Coordinates, PassList, PassRecord};
pub use crate::domain::ports::{ConfigProvider, FlyoverSource};
pub use crate::utils::error::Result;

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::{SpotterSettings, TomlConfig};

pub use crate::core::{
    client::IssClient,
    orchestrator::{next_iss_times_for_my_location, LookupStage},
};
pub use domain::model::{Coordinates, PassList, PassRecord};
pub use domain::ports::{ConfigProvider, FlyoverSource};
pub use utils::error::{Result, SpotterError};

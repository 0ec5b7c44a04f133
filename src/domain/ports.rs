use crate::domain::model::{Coordinates, PassList};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn ip_endpoint(&self) -> &str;
    fn geolocation_endpoint(&self) -> &str;
    fn flyover_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> &str;
}

/// The three single-lookup resolvers chained by the orchestrator.
#[async_trait]
pub trait FlyoverSource: Send + Sync {
    async fn fetch_my_ip(&self) -> Result<String>;
    async fn fetch_coords_by_ip(&self, ip: &str) -> Result<Coordinates>;
    async fn fetch_iss_flyover_times(&self, coords: &Coordinates) -> Result<PassList>;
}

use crate::domain::model::PassList;
use crate::domain::ports::FlyoverSource;
use crate::utils::error::Result;
use std::fmt;

/// Where a lookup chain currently stands. Used for log context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    AwaitingIp,
    AwaitingCoords,
    AwaitingPasses,
    Done,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStage::AwaitingIp => "awaiting IP",
            LookupStage::AwaitingCoords => "awaiting coordinates",
            LookupStage::AwaitingPasses => "awaiting passes",
            LookupStage::Done => "done",
        };
        f.write_str(name)
    }
}

fn log_failure<T>(stage: LookupStage, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::warn!("❌ Lookup chain failed while {}: {}", stage, e);
    }
    result
}

/// Resolves IP, then coordinates, then upcoming passes. The first error is
/// returned unchanged and nothing after it is requested.
pub async fn next_iss_times_for_my_location<S>(source: &S) -> Result<PassList>
where
    S: FlyoverSource + ?Sized,
{
    let mut stage = LookupStage::AwaitingIp;
    tracing::info!("🛰️ Looking up public IP");
    let ip = log_failure(stage, source.fetch_my_ip().await)?;

    stage = LookupStage::AwaitingCoords;
    tracing::info!("📍 Geolocating IP {}", ip);
    let coords = log_failure(stage, source.fetch_coords_by_ip(&ip).await)?;

    stage = LookupStage::AwaitingPasses;
    tracing::info!(
        "🔭 Fetching passes for ({}, {})",
        coords.latitude,
        coords.longitude
    );
    let passes = log_failure(stage, source.fetch_iss_flyover_times(&coords).await)?;

    stage = LookupStage::Done;
    tracing::debug!("Lookup chain {} with {} passes", stage, passes.len());
    Ok(passes)
}

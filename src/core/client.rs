use crate::core::orchestrator;
use crate::domain::model::{Coordinates, PassList, PassRecord};
use crate::domain::ports::{ConfigProvider, FlyoverSource};
use crate::utils::error::{Result, SpotterError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

const FLYOVER_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    success: Option<bool>,
    message: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FlyoverResponse {
    message: Option<String>,
    response: Option<Vec<PassRecord>>,
}

/// HTTP-backed resolvers. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct IssClient {
    client: Client,
    ip_endpoint: Url,
    geolocation_endpoint: Url,
    flyover_endpoint: Url,
}

impl IssClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| SpotterError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            ip_endpoint: parse_endpoint(config.ip_endpoint())?,
            geolocation_endpoint: parse_endpoint(config.geolocation_endpoint())?,
            flyover_endpoint: parse_endpoint(config.flyover_endpoint())?,
        })
    }

    /// Convenience wrapper around [`orchestrator::next_iss_times_for_my_location`].
    pub async fn next_iss_times_for_my_location(&self) -> Result<PassList> {
        orchestrator::next_iss_times_for_my_location(self).await
    }

    fn geolocation_url(&self, ip: &str) -> Result<Url> {
        let mut url = self.geolocation_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| SpotterError::InvalidEndpoint {
                url: self.geolocation_endpoint.to_string(),
                reason: "URL cannot take a path segment".to_string(),
            })?
            .pop_if_empty()
            .push(ip);
        Ok(url)
    }

    fn flyover_url(&self, coords: &Coordinates) -> Url {
        let mut url = self.flyover_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lat", &coords.latitude.to_string())
            .append_pair("lon", &coords.longitude.to_string());
        url
    }

    /// Sends the GET and returns the raw body of a 2xx response.
    async fn get_body(&self, url: &Url, lookup: &'static str) -> Result<String> {
        let host = url.host_str().unwrap_or("unknown host").to_string();

        tracing::debug!("Requesting {} from: {}", lookup, url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SpotterError::transport(host.clone(), e))?;

        let status = response.status();
        tracing::debug!("{} response status: {}", lookup, status);

        let body = response
            .text()
            .await
            .map_err(|e| SpotterError::transport(host, e))?;

        if !status.is_success() {
            return Err(SpotterError::HttpStatus {
                status: status.as_u16(),
                lookup,
                body,
            });
        }

        Ok(body)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint).map_err(|e| SpotterError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })
}

fn parse_payload<T: DeserializeOwned>(url: &Url, body: &str, expected: &'static str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| SpotterError::MissingPayload {
        url: url.to_string(),
        expected,
        reason: e.to_string(),
    })
}

#[async_trait]
impl FlyoverSource for IssClient {
    async fn fetch_my_ip(&self) -> Result<String> {
        let url = &self.ip_endpoint;
        let body = self.get_body(url, "IP").await?;
        let payload: IpResponse = parse_payload(url, &body, "an IP address")?;

        match payload.ip {
            Some(ip) if !ip.trim().is_empty() => Ok(ip),
            _ => Err(SpotterError::MissingPayload {
                url: url.to_string(),
                expected: "an IP address",
                reason: "response has no `ip` value".to_string(),
            }),
        }
    }

    async fn fetch_coords_by_ip(&self, ip: &str) -> Result<Coordinates> {
        let url = self.geolocation_url(ip)?;
        let body = self.get_body(&url, "coordinates").await?;
        let payload: GeolocationResponse = parse_payload(&url, &body, "coordinates")?;

        if payload.success == Some(false) {
            return Err(SpotterError::InvalidAddress {
                ip: ip.to_string(),
                message: payload
                    .message
                    .unwrap_or_else(|| "Invalid IP address".to_string()),
            });
        }

        match (payload.latitude, payload.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
            _ => Err(SpotterError::MissingPayload {
                url: url.to_string(),
                expected: "coordinates",
                reason: "response is missing latitude or longitude".to_string(),
            }),
        }
    }

    async fn fetch_iss_flyover_times(&self, coords: &Coordinates) -> Result<PassList> {
        let url = self.flyover_url(coords);
        let body = self.get_body(&url, "ISS flyover times").await?;
        let payload: FlyoverResponse = parse_payload(&url, &body, "ISS flyover times")?;

        if payload.message.as_deref() != Some(FLYOVER_SUCCESS) {
            return Err(SpotterError::FlyoverStatus {
                message: payload
                    .message
                    .unwrap_or_else(|| "no status message".to_string()),
                latitude: coords.latitude,
                longitude: coords.longitude,
            });
        }

        payload.response.ok_or_else(|| SpotterError::MissingPayload {
            url: url.to_string(),
            expected: "ISS flyover times",
            reason: "response has no `response` array".to_string(),
        })
    }
}

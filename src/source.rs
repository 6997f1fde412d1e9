use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::fallback;
use crate::models::{AlertRecord, HazardSnapshot, SystemStatus};

pub trait Feed: Send + Sync + 'static {
    type Payload: DeserializeOwned + Clone + Send + Sync + 'static;

    const NAME: &'static str;
    const PATH: &'static str;

    fn fallback() -> Self::Payload;
}

/// Current detection. `null` from the backend means all clear.
pub struct DetectFeed;

impl Feed for DetectFeed {
    type Payload = Option<HazardSnapshot>;

    const NAME: &'static str = "detect";
    const PATH: &'static str = "/detect";

    fn fallback() -> Self::Payload {
        fallback::detection()
    }
}

pub struct AlertsFeed;

impl Feed for AlertsFeed {
    type Payload = Vec<AlertRecord>;

    const NAME: &'static str = "alerts";
    const PATH: &'static str = "/alerts";

    fn fallback() -> Self::Payload {
        fallback::alerts()
    }
}

pub struct StatusFeed;

impl Feed for StatusFeed {
    type Payload = SystemStatus;

    const NAME: &'static str = "status";
    const PATH: &'static str = "/status";

    fn fallback() -> Self::Payload {
        fallback::system_status()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("backend answered {0}")]
    Status(StatusCode),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AcquisitionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AcquisitionError::Timeout
        } else {
            AcquisitionError::Transport(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub use_fallback_on_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Acquired<T> {
    pub payload: T,
    pub origin: Origin,
}

pub struct DataSource<F: Feed> {
    client: reqwest::Client,
    url: Arc<str>,
    policy: FallbackPolicy,
    _feed: PhantomData<fn() -> F>,
}

impl<F: Feed> Clone for DataSource<F> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            url: Arc::clone(&self.url),
            policy: self.policy,
            _feed: PhantomData,
        }
    }
}

impl<F: Feed> DataSource<F> {
    pub fn new(client: reqwest::Client, url: impl Into<Arc<str>>, policy: FallbackPolicy) -> Self {
        Self {
            client,
            url: url.into(),
            policy,
            _feed: PhantomData,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(
            settings.http_client()?,
            settings.endpoint(F::PATH),
            settings.fallback_policy(),
        ))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<F::Payload, AcquisitionError> {
        let response = self.client.get(&*self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn acquire(&self) -> Result<Acquired<F::Payload>, AcquisitionError> {
        match self.fetch().await {
            Ok(payload) => Ok(Acquired {
                payload,
                origin: Origin::Live,
            }),
            Err(err) => {
                tracing::warn!(feed = F::NAME, url = %self.url, error = %err, "acquisition failed");
                if !self.policy.use_fallback_on_error {
                    return Err(err);
                }

                tracing::debug!(feed = F::NAME, "serving fallback dataset");
                Ok(Acquired {
                    payload: F::fallback(),
                    origin: Origin::Fallback,
                })
            }
        }
    }
}

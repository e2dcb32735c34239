use crate::error::HandoffError;
use crate::types::ProjectTarget;
use backon::{ExponentialBuilder, Retryable};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::{error, info};
use url::Url;

const APIKEY_HEADER: HeaderName = HeaderName::from_static("apikey");

fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// HTTP client bound to one project. Only used to check that the REST gateway answers.
pub struct SupabaseApi {
    client: reqwest::Client,
    rest_url: Url,
    retry_policy: ExponentialBuilder,
}

impl SupabaseApi {
    pub fn new(target: &ProjectTarget, proxy: Option<&str>) -> Result<Self, HandoffError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("sql-handoff/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .default_headers(auth_headers(&target.credential.key)?);
        if let Some(raw) = proxy.map(str::trim).filter(|p| !p.is_empty()) {
            let proxy_url = Url::parse(raw).map_err(HandoffError::InvalidProxy)?;
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            rest_url: rest_url(&target.endpoint)?,
            retry_policy: default_retry_policy(),
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: ExponentialBuilder) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    /// GET the REST root. 5xx responses, refused connections and timeouts are retried;
    /// any other non-success status is returned as `UpstreamStatus`.
    pub async fn probe(&self) -> Result<StatusCode, HandoffError> {
        let resp = (|| async {
            let resp = self.client.get(self.rest_url.clone()).send().await?;
            if resp.status().is_server_error() {
                let status = resp.status();
                error!("Supabase server error (will retry): {}", status);
                return Err(HandoffError::UpstreamStatus(status));
            }
            Ok::<_, HandoffError>(resp)
        })
        .retry(self.retry_policy.clone())
        .when(HandoffError::is_transient)
        .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HandoffError::UpstreamStatus(status));
        }
        info!(url = %self.rest_url, %status, "Supabase REST endpoint reachable");
        Ok(status)
    }
}

fn auth_headers(key: &str) -> Result<HeaderMap, HandoffError> {
    let mut headers = HeaderMap::new();
    let mut apikey = HeaderValue::from_str(key).map_err(|_| HandoffError::InvalidCredential)?;
    apikey.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
        .map_err(|_| HandoffError::InvalidCredential)?;
    bearer.set_sensitive(true);
    headers.insert(APIKEY_HEADER, apikey);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// `<endpoint>/rest/v1/`, keeping any path prefix of a self-hosted gateway.
fn rest_url(endpoint: &Url) -> Result<Url, HandoffError> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("rest/v1/")?)
}

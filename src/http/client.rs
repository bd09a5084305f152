use crate::config::ScraperSettings;
use crate::errors::AcquisitionError;
use crate::rate_limiter::RateLimiter;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// HTTP client with built-in pacing between requests
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(settings: &ScraperSettings) -> Result<Self, AcquisitionError> {
        let client = Self::build_client(&settings.user_agent, settings.timeout_secs)?;
        let rate_limiter = RateLimiter::new(settings.rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetch a page body; any transport failure or non-2xx status is an error
    pub async fn get_text(&mut self, url: &str) -> Result<String, AcquisitionError> {
        self.rate_limiter.wait().await;
        let response = self.send_get_request(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| http_error(url, source))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, AcquisitionError> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|source| http_error("<client builder>", source))
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response, AcquisitionError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| http_error(url, source))
    }
}

fn http_error(url: &str, source: reqwest::Error) -> AcquisitionError {
    AcquisitionError::Http {
        url: url.to_string(),
        source,
    }
}

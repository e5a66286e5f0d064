// src/core/net.rs
// Blocking JSON GET over reqwest. One client per run.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::consts::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use crate::config::options::CollectOptions;
use crate::error::RequestError;

#[derive(Clone, Debug)]
pub struct Http {
    client: Client,
    attempts: u32,
    backoff: Duration,
}

impl Http {
    pub fn new(opts: &CollectOptions) -> Result<Self, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(opts.timeout)
            .build()
            .map_err(RequestError::Client)?;

        Ok(Self { client, attempts: opts.attempts.max(1), backoff: opts.retry_backoff })
    }

    /// GET `url?query` and decode the body as JSON.
    /// Retries network and status failures up to `attempts` times; the last
    /// failure is returned. A body that is not JSON is not retried.
    pub fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, RequestError> {
        let mut attempt = 1;
        loop {
            match self.get_once(url, query) {
                Ok(v) => return Ok(v),
                Err(e @ RequestError::Payload { .. }) => return Err(e),
                Err(e) if attempt >= self.attempts => return Err(e),
                Err(e) => {
                    tracing::warn!(url, attempt, error = %e, "request failed, retrying");
                    thread::sleep(self.backoff * attempt);
                    attempt += 1;
                }
            }
        }
    }

    fn get_once(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, RequestError> {
        tracing::debug!(url, ?query, "GET");
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|source| RequestError::Network { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp
            .text()
            .map_err(|source| RequestError::Network { url: s!(url), source })?;
        serde_json::from_str(&body).map_err(|e| RequestError::payload(url, e.to_string()))
    }
}

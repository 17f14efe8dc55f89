//! libcurl-backed [`Transport`].

use anyhow::{Context, Result};
use std::time::Duration;

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::HttpConfig;

/// Blocking transport; one `Easy` handle per request, run in the calling thread.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    user_agent: String,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl CurlTransport {
    pub fn new(cfg: &HttpConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl Transport for CurlTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&req.url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        if let Some(d) = self.connect_timeout {
            easy.connect_timeout(d)?;
        }
        if let Some(d) = self.timeout {
            easy.timeout(d)?;
        }

        match req.method {
            Method::Get => easy.get(true)?,
            Method::Post => {
                easy.post(true)?;
                easy.post_fields_copy(req.body.as_deref().unwrap_or_default())?;
            }
            Method::Put => {
                easy.custom_request("PUT")?;
                easy.post_fields_copy(req.body.as_deref().unwrap_or_default())?;
            }
        }

        let mut list = curl::easy::List::new();
        for (k, v) in &req.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        // Suppress `Expect: 100-continue` on request bodies.
        list.append("Expect:")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .with_context(|| format!("{} {} failed", req.method, req.url))?;
        }

        let status = easy.response_code().context("no response code")?;
        tracing::debug!(method = %req.method, url = %req.url, status, bytes = body.len(), "http exchange");
        Ok(HttpResponse { status, body })
    }
}

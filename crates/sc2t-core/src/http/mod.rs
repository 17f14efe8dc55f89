//! Blocking HTTP transport.
//!
//! Scraper, metadata extraction and the list-service client all go through the
//! [`Transport`] trait, so tests can script responses without a socket. The
//! production implementation is [`CurlTransport`] (libcurl via the `curl` crate).

mod curl_transport;

pub use curl_transport::CurlTransport;

use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
        }
    }
}

/// One outgoing request. Headers are kept in insertion order.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            ..Self::get(url)
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Case-insensitive header lookup (first match).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body. Non-2xx statuses are not errors at this layer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossy on invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes a request and returns the response, whatever its status.
///
/// `Err` means the exchange itself failed (DNS, connect, TLS, timeout).
pub trait Transport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(req)
    }
}

/// GET `url` and return the body text, failing on non-2xx.
pub fn get_text<T: Transport + ?Sized>(transport: &T, url: &str) -> Result<String> {
    let resp = transport.execute(&HttpRequest::get(url))?;
    if !resp.is_success() {
        anyhow::bail!("GET {} returned HTTP {}", url, resp.status);
    }
    Ok(resp.text())
}

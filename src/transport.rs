//! The HTTP exchange behind [`Client`](crate::Client).
//!
//! The client only needs "send a GET, give me status and body". That seam is the
//! [`Transport`] trait so tests and callers with their own HTTP stack can plug in.

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::time::Duration;

use crate::error::{Error, Result};

/// A fully rendered GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub basic_auth: Option<(String, String)>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            basic_auth: None,
            timeout: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can exchange an [`HttpRequest`] for an [`HttpResponse`].
///
/// Implementations must return `Ok` for any response that arrived, whatever its
/// status; status handling belongs to the client.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Mutation applied to every outgoing request before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestDecorator {
    BasicAuth { username: String, password: String },
    Header { name: String, value: String },
}

impl RequestDecorator {
    pub(crate) fn apply(&self, req: &mut HttpRequest) {
        match self {
            RequestDecorator::BasicAuth { username, password } => {
                req.basic_auth = Some((username.clone(), password.clone()));
            }
            RequestDecorator::Header { name, value } => {
                req.headers.push((name.clone(), value.clone()));
            }
        }
    }
}

/// Default transport backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    pub fn new(verify: bool) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("meteomatics-rs/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("meteomatics-rs")),
        );

        let mut builder = HttpClient::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(330));

        if !verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    pub fn from_client(http: HttpClient) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| Error::InvalidRequest(format!("header name {}: {}", k, e)))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| Error::InvalidRequest(format!("value of header {}: {}", k, e)))?;
            headers.insert(name, value);
        }

        let mut req = self.http.get(&request.url).headers(headers);
        if let Some((u, p)) = &request.basic_auth {
            req = req.basic_auth(u, Some(p));
        }
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT, AUTHORIZATION};

    #[test]
    fn decorators_modify_request() {
        let mut req = HttpRequest::get("http://x");
        req.headers.push((ACCEPT.as_str().to_string(), "text/csv".to_string()));
        RequestDecorator::BasicAuth {
            username: "user".into(),
            password: "secret".into(),
        }
        .apply(&mut req);
        RequestDecorator::Header {
            name: AUTHORIZATION.as_str().to_string(),
            value: "Bearer abc".into(),
        }
        .apply(&mut req);

        assert_eq!(req.basic_auth, Some(("user".into(), "secret".into())));
        assert_eq!(req.header("accept"), Some("text/csv"));
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn success_range() {
        let ok = HttpResponse {
            status: 204,
            body: vec![],
        };
        let redirect = HttpResponse {
            status: 300,
            body: vec![],
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn invalid_header_is_rejected_before_sending() {
        let transport = ReqwestTransport::new(true).unwrap();
        let mut req = HttpRequest::get("http://127.0.0.1:9/");
        req.headers.push(("bad header".into(), "x".into()));
        let err = transport.execute(&req).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)), "{:?}", err);
        assert!(err.to_string().contains("bad header"));
    }
}

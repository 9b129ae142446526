use reqwest::header::ACCEPT;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::load_config;
use crate::csv::{
    CsvRegionResponse, CsvResponse, CsvRouteResponse, parse_csv, parse_csv_region,
    parse_csv_route,
};
use crate::error::{Error, Result};
use crate::format::Format;
use crate::json::{JsonResponse, JsonRouteResponse, parse_json, parse_json_route};
use crate::location::LocationSpec;
use crate::options::RequestOptions;
use crate::parameter::ParameterSpec;
use crate::time::TimeSpec;
use crate::transport::{HttpRequest, RequestDecorator, ReqwestTransport, Transport};
use crate::util::{append_query, urljoin};

pub const DEFAULT_BASE_URL: &str = "https://api.meteomatics.com";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API URL, typically `https://api.meteomatics.com`.
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Whether to verify TLS certificates.
    pub verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            username: None,
            password: None,
            verify: true,
        }
    }
}

/// Meteomatics API client.
///
/// Holds only read-only configuration, so one instance can serve any number of
/// concurrent calls.
#[derive(Clone)]
pub struct Client {
    url: String,
    timeout: Option<Duration>,
    decorators: Vec<RequestDecorator>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("decorators", &self.decorators.len())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client using environment variables and/or `.meteomaticsrc`.
    ///
    /// This is equivalent to `Client::from_parts(None, None, None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::from_parts(None, None, None, None)
    }

    /// Creates a client using (in order of precedence):
    /// - explicit `url`/`username`/`password` arguments
    /// - environment variables `METEOMATICS_URL` / `METEOMATICS_USERNAME` / `METEOMATICS_PASSWORD`
    /// - config file from `METEOMATICS_RC` or `.meteomaticsrc`
    pub fn from_parts(
        url: Option<String>,
        username: Option<String>,
        password: Option<String>,
        verify: Option<bool>,
    ) -> Result<Self> {
        let cfg = load_config(url, username, password, verify)?;
        Self::new(cfg)
    }

    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(cfg.verify)?;
        let mut client = Self::from_transport(transport).with_base_url(cfg.url);
        if let (Some(u), Some(p)) = (cfg.username, cfg.password) {
            client = client.with_basic_auth(u, p);
        }
        Ok(client)
    }

    /// A client talking to [`DEFAULT_BASE_URL`] through `transport`.
    pub fn from_transport(transport: impl Transport + 'static) -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            decorators: Vec::new(),
            transport: Arc::new(transport),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.decorators.push(RequestDecorator::BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.decorators.push(RequestDecorator::Header {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Client-side deadline for each exchange, passed to the transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.url
    }

    /// Renders the full request URL without sending anything.
    pub fn url_for(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        format: Format,
        options: Option<&RequestOptions>,
    ) -> String {
        // Segments go out unescaped; the service grammar needs `:`, `,`, `+` and `_` verbatim.
        let path = format!("{}/{}/{}/{}", time, parameter, location, format);
        let url = urljoin(&self.url, &path);
        append_query(&url, options.and_then(|o| o.query_string()).as_deref())
    }

    /// Performs a raw request. Interpreting the returned bytes is up to the caller.
    pub fn request(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        format: Format,
        options: Option<&RequestOptions>,
    ) -> Result<Vec<u8>> {
        let url = self.url_for(time, parameter, location, format, options);

        let mut req = HttpRequest::get(&url);
        req.headers
            .push((ACCEPT.as_str().to_string(), format.content_type().to_string()));
        req.timeout = self.timeout;
        for d in &self.decorators {
            d.apply(&mut req);
        }

        log::debug!("GET {}", url);
        let resp = self.transport.execute(&req)?;
        if !resp.is_success() {
            log::warn!("{} answered HTTP {}", url, resp.status);
            return Err(Error::http(&url, resp.status, resp.body));
        }

        log::debug!("received {} byte(s)", resp.body.len());
        Ok(resp.body)
    }

    /// Time series for one or more locations as CSV.
    pub fn csv_request(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        options: Option<&RequestOptions>,
    ) -> Result<CsvResponse> {
        let data = self.request(time, parameter, location, Format::Csv, options)?;
        parse_csv(&data)
    }

    /// One parameter at one time over a grid (`RectangleN`/`RectangleRes`) as CSV.
    pub fn csv_region_request(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        options: Option<&RequestOptions>,
    ) -> Result<CsvRegionResponse> {
        let data = self.request(time, parameter, location, Format::Csv, options)?;
        parse_csv_region(&data)
    }

    /// Route request as CSV; `route=true` is always sent.
    pub fn csv_route_request(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        options: Option<&RequestOptions>,
    ) -> Result<CsvRouteResponse> {
        let options = route_options(options);
        let data = self.request(time, parameter, location, Format::Csv, Some(&options))?;
        parse_csv_route(&data)
    }

    pub fn json_request(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        options: Option<&RequestOptions>,
    ) -> Result<JsonResponse> {
        let data = self.request(time, parameter, location, Format::Json, options)?;
        parse_json(&data)
    }

    /// Route request as JSON; `route=true` is always sent.
    pub fn json_route_request(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        options: Option<&RequestOptions>,
    ) -> Result<JsonRouteResponse> {
        let options = route_options(options);
        let data = self.request(time, parameter, location, Format::Json, Some(&options))?;
        parse_json_route(&data)
    }

    /// PNG image bytes, returned as received.
    pub fn png_request(
        &self,
        time: &TimeSpec,
        parameter: &ParameterSpec,
        location: &LocationSpec,
        options: Option<&RequestOptions>,
    ) -> Result<Vec<u8>> {
        self.request(time, parameter, location, Format::Png, options)
    }
}

fn route_options(options: Option<&RequestOptions>) -> RequestOptions {
    options.cloned().unwrap_or_default().with_route(true)
}

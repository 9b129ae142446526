use url::form_urlencoded;

const DEFAULT_TEMPORAL_INTERPOLATION: &str = "best";
const DEFAULT_ENS_SELECT: &str = "member:0";
const DEFAULT_TIMEOUT_SECS: u32 = 300;

/// Per-request query options. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Model or source override, e.g. `mix` or `ecmwf-ifs`.
    pub source: Option<String>,
    pub temporal_interpolation: Option<String>,
    /// Ensemble member selection, e.g. `member:1-5`.
    pub ens_select: Option<String>,
    pub cluster_select: Option<String>,
    /// Server-side timeout in seconds.
    pub timeout: Option<u32>,
    /// Associate each location with one time instead of the full cross product.
    pub route: bool,
}

impl RequestOptions {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_temporal_interpolation(mut self, mode: impl Into<String>) -> Self {
        self.temporal_interpolation = Some(mode.into());
        self
    }

    pub fn with_ens_select(mut self, expr: impl Into<String>) -> Self {
        self.ens_select = Some(expr.into());
        self
    }

    pub fn with_cluster_select(mut self, expr: impl Into<String>) -> Self {
        self.cluster_select = Some(expr.into());
        self
    }

    pub fn with_timeout(mut self, secs: u32) -> Self {
        self.timeout = Some(secs);
        self
    }

    pub fn with_route(mut self, route: bool) -> Self {
        self.route = route;
        self
    }

    /// Key/value pairs that differ from the service defaults, sorted by key.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut v = Vec::new();
        if let Some(s) = self.cluster_select.as_deref().filter(|s| !s.is_empty()) {
            v.push(("cluster_select", s.to_string()));
        }
        if let Some(s) = self
            .ens_select
            .as_deref()
            .filter(|s| !s.is_empty() && *s != DEFAULT_ENS_SELECT)
        {
            v.push(("ens_select", s.to_string()));
        }
        if self.route {
            v.push(("route", "true".to_string()));
        }
        if let Some(s) = self.source.as_deref().filter(|s| !s.is_empty()) {
            v.push(("source", s.to_string()));
        }
        if let Some(s) = self
            .temporal_interpolation
            .as_deref()
            .filter(|s| !s.is_empty() && *s != DEFAULT_TEMPORAL_INTERPOLATION)
        {
            v.push(("temporal_interpolation", s.to_string()));
        }
        if let Some(t) = self.timeout.filter(|t| *t != DEFAULT_TIMEOUT_SECS) {
            v.push(("timeout", t.to_string()));
        }
        v
    }

    /// Form-encoded query string, or `None` when nothing needs to be sent.
    pub fn query_string(&self) -> Option<String> {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return None;
        }
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &pairs {
            ser.append_pair(k, v);
        }
        Some(ser.finish())
    }
}

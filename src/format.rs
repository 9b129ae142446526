use std::fmt;

/// Output format, the last path segment. Each format fixes the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Grads,
    Csv,
    Html,
    HtmlMap,
    Json,
    NetCdf,
    Png,
    Xml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Grads => "grads",
            Format::Csv => "csv",
            Format::Html => "html",
            Format::HtmlMap => "html-map",
            Format::Json => "json",
            Format::NetCdf => "netcdf",
            Format::Png => "png",
            Format::Xml => "xml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Grads => "application/grads",
            Format::Csv => "application/csv",
            Format::Html => "text/html",
            Format::HtmlMap => "application/html-map",
            Format::Json => "application/json",
            Format::NetCdf => "application/netcdf",
            Format::Png => "image/png",
            Format::Xml => "application/xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_content_types() {
        assert_eq!(Format::Csv.to_string(), "csv");
        assert_eq!(Format::HtmlMap.as_str(), "html-map");
        assert_eq!(Format::Json.content_type(), "application/json");
        assert_eq!(Format::Png.content_type(), "image/png");
    }
}

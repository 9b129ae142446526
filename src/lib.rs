//! A small Rust client for the Meteomatics weather API.
//!
//! Every request is a single GET of the form
//! `<base>/<time>/<parameter>/<location>/<format>[?options]`. This crate renders
//! each segment from typed values ([`TimeSpec`], [`ParameterSpec`],
//! [`LocationSpec`], [`Format`]) and decodes CSV and JSON answers into plain
//! structs.
//!
//! ## Quick start
//! - Configure credentials via environment variables (`METEOMATICS_USERNAME`,
//!   `METEOMATICS_PASSWORD`, optionally `METEOMATICS_URL`) or a `.meteomaticsrc`
//!   file (current directory or home directory).
//! - Call one of the typed requests, e.g. [`Client::csv_request`].
//!
//! ```no_run
//! use chrono::TimeDelta;
//! use meteomatics::{Client, Level, Parameter, Point, TimeSpec, Units};
//!
//! fn main() -> meteomatics::Result<()> {
//!     let client = Client::from_env()?;
//!     let time = TimeSpec::List(vec![TimeSpec::Now, TimeDelta::hours(1).into()]);
//!     let parameter = Parameter::new("t", Units::Celsius).level(Level::Meters(2));
//!     let location = Point::new(47.423336, 9.377225);
//!
//!     let cr = client.csv_request(&time, &parameter.into(), &location.into(), None)?;
//!     for row in &cr.rows {
//!         println!("{} {:?}", row.valid_date, row.values);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod client;
mod config;
mod csv;
mod error;
mod format;
mod interval;
mod json;
mod level;
mod location;
mod options;
mod parameter;
mod time;
mod transport;
mod units;
mod util;

pub use client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use csv::{
    CsvRegionResponse, CsvResponse, CsvRouteResponse, CsvRouteRow, CsvRow, parse_csv,
    parse_csv_region, parse_csv_route,
};
pub use error::{BoxError, Error, Result};
pub use format::Format;
pub use interval::Interval;
pub use json::{
    JsonCoordinate, JsonData, JsonDateValue, JsonParameterValue, JsonResponse, JsonRoutePoint,
    JsonRouteResponse, parse_json, parse_json_route,
};
pub use level::Level;
pub use location::{
    Line, LocationSpec, Point, Polyline, PolylineSegment, Postal, RectangleN, RectangleRes, Region,
};
pub use options::RequestOptions;
pub use parameter::{Parameter, ParameterSpec, PrecipType, names};
pub use time::TimeSpec;
pub use transport::{HttpRequest, HttpResponse, RequestDecorator, ReqwestTransport, Transport};
pub use units::Units;

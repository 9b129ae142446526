//! Location segment of a request path.

use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{}` on f64 is the shortest representation that round-trips.
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// `n` equidistant points from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub n: u32,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}:{}", self.start, self.end, self.n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineSegment {
    pub end: Point,
    pub n: u32,
}

/// Consecutive lines, each segment starting where the previous one ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub start: Point,
    pub segments: Vec<PolylineSegment>,
}

impl Polyline {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn to(mut self, end: Point, n: u32) -> Self {
        self.segments.push(PolylineSegment { end, n });
        self
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.segments.split_first() else {
            return write!(f, "{}", self.start);
        };
        let line = Line {
            start: self.start,
            end: first.end,
            n: first.n,
        };
        write!(f, "{}", line)?;
        for s in rest {
            write!(f, "+{}:{}", s.end, s.n)?;
        }
        Ok(())
    }
}

/// A grid of `n_lon` x `n_lat` points spanning `min`..`max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleN {
    pub min: Point,
    pub max: Point,
    pub n_lon: u32,
    pub n_lat: u32,
}

impl fmt::Display for RectangleN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Upper-left corner first, then lower-right; width before height.
        write!(
            f,
            "{},{}_{},{}:{}x{}",
            self.max.lat, self.min.lon, self.min.lat, self.max.lon, self.n_lon, self.n_lat
        )
    }
}

/// A grid spanning `min`..`max` with a fixed spacing in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleRes {
    pub min: Point,
    pub max: Point,
    pub res_lat: f64,
    pub res_lon: f64,
}

impl fmt::Display for RectangleRes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}_{},{}:{},{}",
            self.max.lat, self.min.lon, self.min.lat, self.max.lon, self.res_lat, self.res_lon
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postal {
    pub country_code: String,
    pub zip_code: String,
}

impl Postal {
    pub fn new(country_code: impl Into<String>, zip_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            zip_code: zip_code.into(),
        }
    }
}

impl fmt::Display for Postal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "postal_{}{}", self.country_code, self.zip_code)
    }
}

/// Predefined areas known to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    World,
    Global,
    Africa,
    Asia,
    Australia,
    Europe,
    NorthAmerica,
    SouthAmerica,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::World => "world",
            Region::Global => "global",
            Region::Africa => "africa",
            Region::Asia => "asia",
            Region::Australia => "australia",
            Region::Europe => "europe",
            Region::NorthAmerica => "north-america",
            Region::SouthAmerica => "south-america",
        }
    }
}

/// Everything that can go in the location segment.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSpec {
    Raw(String),
    Region(Region),
    Point(Point),
    Points(Vec<Point>),
    Line(Line),
    Polyline(Polyline),
    RectangleN(RectangleN),
    RectangleRes(RectangleRes),
    Postal(Postal),
    List(Vec<LocationSpec>),
}

impl fmt::Display for LocationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSpec::Raw(s) => f.write_str(s),
            LocationSpec::Region(r) => f.write_str(r.as_str()),
            LocationSpec::Point(p) => write!(f, "{}", p),
            LocationSpec::Points(points) => join_plus(f, points),
            LocationSpec::Line(l) => write!(f, "{}", l),
            LocationSpec::Polyline(p) => write!(f, "{}", p),
            LocationSpec::RectangleN(r) => write!(f, "{}", r),
            LocationSpec::RectangleRes(r) => write!(f, "{}", r),
            LocationSpec::Postal(p) => write!(f, "{}", p),
            LocationSpec::List(items) => join_plus(f, items),
        }
    }
}

fn join_plus<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str("+")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

macro_rules! location_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for LocationSpec {
                fn from(v: $ty) -> Self {
                    LocationSpec::$variant(v)
                }
            }
        )*
    };
}

location_from!(
    Region(Region),
    Point(Point),
    Points(Vec<Point>),
    Line(Line),
    Polyline(Polyline),
    RectangleN(RectangleN),
    RectangleRes(RectangleRes),
    Postal(Postal),
    List(Vec<LocationSpec>),
);

impl From<&str> for LocationSpec {
    fn from(s: &str) -> Self {
        LocationSpec::Raw(s.to_string())
    }
}

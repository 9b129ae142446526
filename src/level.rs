use std::fmt;

/// Vertical level of a parameter, e.g. `2m` above ground or `500hPa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Centimeters(i32),
    Meters(i32),
    Hectopascals(i32),
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Centimeters(n) => write!(f, "{}cm", n),
            Level::Meters(n) => write!(f, "{}m", n),
            Level::Hectopascals(n) => write!(f, "{}hPa", n),
        }
    }
}

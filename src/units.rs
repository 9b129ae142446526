use std::fmt;

/// Unit code appended to a parameter after the `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Units {
    Beaufort,
    Celsius,
    Degrees,
    Fahrenheit,
    GramsPerCubicMeter,
    Hectopascals,
    Index,
    Joules,
    JoulesPerKilogram,
    Kelvin,
    KilometersPerHour,
    KilogramsPerCubicMeter,
    Knots,
    Meters,
    Millimeters,
    MetersPerSecond,
    Octas,
    Percentage,
    Pascals,
    WattsPerSquareMeter,
    WattHoursPerSquareMeter,
    WattSecondsPerSquareMeter,
    /// Any code the enum does not list, passed through verbatim.
    Custom(String),
}

impl Units {
    pub fn as_str(&self) -> &str {
        match self {
            Units::Beaufort => "bft",
            Units::Celsius => "C",
            Units::Degrees => "d",
            Units::Fahrenheit => "F",
            Units::GramsPerCubicMeter => "gm3",
            Units::Hectopascals => "hPa",
            Units::Index => "idx",
            Units::Joules => "J",
            Units::JoulesPerKilogram => "JKg",
            Units::Kelvin => "K",
            Units::KilometersPerHour => "kmh",
            Units::KilogramsPerCubicMeter => "kgm3",
            Units::Knots => "kn",
            Units::Meters => "m",
            Units::Millimeters => "mm",
            Units::MetersPerSecond => "ms",
            Units::Octas => "octas",
            Units::Percentage => "p",
            Units::Pascals => "Pa",
            Units::WattsPerSquareMeter => "W",
            Units::WattHoursPerSquareMeter => "Wh",
            Units::WattSecondsPerSquareMeter => "Ws",
            Units::Custom(s) => s,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Units {
    fn from(s: &str) -> Self {
        Units::Custom(s.to_string())
    }
}

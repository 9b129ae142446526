//! Parameter segment of a request path: `<name>[_<level>][_<interval>]:<units>`.

use std::fmt;

use crate::interval::Interval;
use crate::level::Level;
use crate::units::Units;

/// Parameter names commonly combined with a [`Level`], [`Interval`] and [`Units`].
pub mod names {
    pub const TEMPERATURE: &str = "t";
    pub const TEMPERATURE_MEAN: &str = "t_mean";
    pub const TEMPERATURE_MAX: &str = "t_max";
    pub const TEMPERATURE_MIN: &str = "t_min";
    pub const DEW_POINT: &str = "dew_point";
    pub const RELATIVE_HUMIDITY: &str = "relative_humidity";
    pub const PRECIPITATION: &str = "precip";
    pub const PRECIPITATION_TYPE: &str = "precip_type";
    pub const WIND_SPEED: &str = "wind_speed";
    pub const WIND_DIRECTION: &str = "wind_dir";
    pub const WIND_GUSTS: &str = "wind_gusts";
    pub const MSL_PRESSURE: &str = "msl_pressure";
    pub const PRESSURE: &str = "pressure";
    pub const GEOPOTENTIAL_HEIGHT: &str = "geopotential_height";
    pub const TOTAL_CLOUD_COVER: &str = "total_cloud_cover";
    pub const GLOBAL_RADIATION: &str = "global_rad";
    pub const SUNSHINE_DURATION: &str = "sunshine_duration";
    pub const WEATHER_SYMBOL: &str = "weather_symbol";
}

/// A structured parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub level: Option<Level>,
    pub interval: Option<Interval>,
    pub units: Units,
}

impl Parameter {
    pub fn new(name: impl Into<String>, units: Units) -> Self {
        Self {
            name: name.into(),
            level: None,
            interval: None,
            units,
        }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for part in [
            self.level.map(|l| l.to_string()),
            self.interval.map(|i| i.to_string()),
        ]
        .into_iter()
        .flatten()
        {
            if !part.is_empty() {
                write!(f, "_{}", part)?;
            }
        }
        write!(f, ":{}", self.units)
    }
}

/// Everything that can go in the parameter segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSpec {
    Raw(String),
    Parameter(Parameter),
    List(Vec<ParameterSpec>),
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterSpec::Raw(s) => f.write_str(s),
            ParameterSpec::Parameter(p) => write!(f, "{}", p),
            ParameterSpec::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Parameter> for ParameterSpec {
    fn from(p: Parameter) -> Self {
        ParameterSpec::Parameter(p)
    }
}

impl From<&str> for ParameterSpec {
    fn from(s: &str) -> Self {
        ParameterSpec::Raw(s.to_string())
    }
}

impl From<Vec<Parameter>> for ParameterSpec {
    fn from(v: Vec<Parameter>) -> Self {
        ParameterSpec::List(v.into_iter().map(ParameterSpec::Parameter).collect())
    }
}

/// Value of a `precip_type:idx` series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrecipType {
    None = 0,
    Rain = 1,
    RainAndSnowMixed = 2,
    Snow = 3,
    Sleet = 4,
    FreezingRain = 5,
}

impl PrecipType {
    /// Maps a decoded series value back to the enumeration; non-integral or
    /// unknown codes yield `None`.
    pub fn from_value(v: f64) -> Option<Self> {
        if v.fract() != 0.0 {
            return None;
        }
        match v as i64 {
            0 => Some(PrecipType::None),
            1 => Some(PrecipType::Rain),
            2 => Some(PrecipType::RainAndSnowMixed),
            3 => Some(PrecipType::Snow),
            4 => Some(PrecipType::Sleet),
            5 => Some(PrecipType::FreezingRain),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::names::*;
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn raw_passes_through() {
        assert_eq!(ParameterSpec::from("t_2m:C").to_string(), "t_2m:C");
    }

    #[test]
    fn structured() {
        let cases = [
            (
                Parameter::new(TEMPERATURE, Units::Celsius).level(Level::Meters(2)),
                "t_2m:C",
            ),
            (
                Parameter::new(TEMPERATURE_MEAN, Units::Kelvin)
                    .level(Level::Hectopascals(500))
                    .interval(Interval::new(TimeDelta::hours(6))),
                "t_mean_500hPa_6h:K",
            ),
            (
                Parameter::new(RELATIVE_HUMIDITY, Units::Percentage)
                    .level(Level::Hectopascals(1000)),
                "relative_humidity_1000hPa:p",
            ),
            (
                Parameter::new(PRECIPITATION, Units::Millimeters).interval(Interval::H_1),
                "precip_1h:mm",
            ),
            (
                Parameter::new(PRECIPITATION, Units::Millimeters).interval(Interval::MIN_10),
                "precip_10min:mm",
            ),
            (
                Parameter::new(PRECIPITATION_TYPE, Units::Index),
                "precip_type:idx",
            ),
        ];
        for (p, expected) in cases {
            assert_eq!(ParameterSpec::from(p).to_string(), expected);
        }
    }

    #[test]
    fn list_is_comma_joined() {
        let spec = ParameterSpec::from(vec![
            Parameter::new(TEMPERATURE, Units::Celsius).level(Level::Meters(2)),
            Parameter::new(PRECIPITATION, Units::Millimeters).interval(Interval::H_1),
        ]);
        assert_eq!(spec.to_string(), "t_2m:C,precip_1h:mm");

        let spec = ParameterSpec::List(vec![
            "wind_speed_10m:ms".into(),
            "msl_pressure:hPa".into(),
        ]);
        assert_eq!(spec.to_string(), "wind_speed_10m:ms,msl_pressure:hPa");
    }

    #[test]
    fn custom_units() {
        let p = Parameter::new("snow_depth", Units::from("cm"));
        assert_eq!(p.to_string(), "snow_depth:cm");
    }

    #[test]
    fn precip_type_from_value() {
        assert_eq!(PrecipType::from_value(0.0), Some(PrecipType::None));
        assert_eq!(PrecipType::from_value(3.0), Some(PrecipType::Snow));
        assert_eq!(PrecipType::from_value(5.0), Some(PrecipType::FreezingRain));
        assert_eq!(PrecipType::from_value(6.0), None);
        assert_eq!(PrecipType::from_value(1.5), None);
        assert_eq!(PrecipType::from_value(-1.0), None);
    }
}

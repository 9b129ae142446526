//! Decoders for the service's `;`-separated CSV output.
//!
//! All three layouts are read line by line in a single pass. Any deviation from
//! the expected layout fails the whole decode with [`Error::CsvParse`].

use chrono::{DateTime, NaiveDateTime, Utc};
use std::str::Lines;

use crate::error::{Error, Result};

const SEP: char = ';';
const REGION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub valid_date: DateTime<Utc>,
    pub values: Vec<f64>,
}

/// Time series for one location: one row per time, one value per parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvResponse {
    pub parameters: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// One parameter at one time over a lat/lon grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRegionResponse {
    pub valid_date: DateTime<Utc>,
    pub parameter: String,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    /// `values[lat_index][lon_index]`
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvRouteRow {
    pub lat: f64,
    pub lon: f64,
    pub valid_date: DateTime<Utc>,
    pub values: Vec<f64>,
}

/// Route series: each row pairs one location with one time.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRouteResponse {
    pub parameters: Vec<String>,
    pub rows: Vec<CsvRouteRow>,
}

impl CsvResponse {
    /// Values of one parameter across all rows.
    ///
    /// `None` when the parameter is unknown or a row has no value for it.
    pub fn column(&self, parameter: &str) -> Option<Vec<f64>> {
        let idx = self.parameters.iter().position(|p| p == parameter)?;
        self.rows.iter().map(|r| r.values.get(idx).copied()).collect()
    }
}

impl CsvRegionResponse {
    pub fn value_at(&self, lat_index: usize, lon_index: usize) -> Option<f64> {
        self.values.get(lat_index)?.get(lon_index).copied()
    }
}

pub fn parse_csv(data: &[u8]) -> Result<CsvResponse> {
    let mut lines = lines(data)?;

    let header: Vec<&str> = lines.next().ok_or(Error::CsvParse)?.split(SEP).collect();
    if header[0] != "validdate" {
        return Err(Error::CsvParse);
    }
    let cols = header.len();
    let parameters = header[1..].iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for line in lines {
        let record: Vec<&str> = line.split(SEP).collect();
        if record.len() != cols {
            return Err(Error::CsvParse);
        }
        rows.push(CsvRow {
            valid_date: parse_rfc3339(record[0])?,
            values: parse_floats(&record[1..])?,
        });
    }

    log::debug!("decoded {} csv row(s)", rows.len());
    Ok(CsvResponse { parameters, rows })
}

pub fn parse_csv_region(data: &[u8]) -> Result<CsvRegionResponse> {
    let mut lines = lines(data)?;

    let valid_date = scan_row(&mut lines, "validdate")?;
    let valid_date = NaiveDateTime::parse_from_str(valid_date, REGION_DATE_FORMAT)
        .map_err(|_| Error::CsvParse)?
        .and_utc();

    let parameter = scan_row(&mut lines, "parameter")?.to_string();

    let header: Vec<&str> = lines.next().ok_or(Error::CsvParse)?.split(SEP).collect();
    if header[0] != "data" {
        return Err(Error::CsvParse);
    }
    let cols = header.len();
    let lons = parse_floats(&header[1..])?;

    let mut lats = Vec::new();
    let mut values = Vec::new();
    for line in lines {
        let record: Vec<&str> = line.split(SEP).collect();
        if record.len() != cols {
            return Err(Error::CsvParse);
        }
        lats.push(parse_float(record[0])?);
        values.push(parse_floats(&record[1..])?);
    }

    log::debug!("decoded {}x{} csv region", lats.len(), lons.len());
    Ok(CsvRegionResponse {
        valid_date,
        parameter,
        lats,
        lons,
        values,
    })
}

pub fn parse_csv_route(data: &[u8]) -> Result<CsvRouteResponse> {
    let mut lines = lines(data)?;

    let header: Vec<&str> = lines.next().ok_or(Error::CsvParse)?.split(SEP).collect();
    if header.len() < 3 || header[..3] != ["lat", "lon", "validdate"] {
        return Err(Error::CsvParse);
    }
    let cols = header.len();
    let parameters = header[3..].iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for line in lines {
        let record: Vec<&str> = line.split(SEP).collect();
        if record.len() != cols {
            return Err(Error::CsvParse);
        }
        rows.push(CsvRouteRow {
            lat: parse_float(record[0])?,
            lon: parse_float(record[1])?,
            valid_date: parse_rfc3339(record[2])?,
            values: parse_floats(&record[3..])?,
        });
    }

    log::debug!("decoded {} csv route row(s)", rows.len());
    Ok(CsvRouteResponse { parameters, rows })
}

fn lines(data: &[u8]) -> Result<Lines<'_>> {
    std::str::from_utf8(data)
        .map(str::lines)
        .map_err(|_| Error::CsvParse)
}

/// Reads a `<name>;<value>` line and returns the value.
fn scan_row<'a>(lines: &mut Lines<'a>, name: &str) -> Result<&'a str> {
    let line = lines.next().ok_or(Error::CsvParse)?;
    match line.split_once(SEP) {
        Some((k, v)) if k == name && !v.contains(SEP) => Ok(v),
        _ => Err(Error::CsvParse),
    }
}

fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| Error::CsvParse)
}

fn parse_float(s: &str) -> Result<f64> {
    s.parse::<f64>().map_err(|_| Error::CsvParse)
}

fn parse_floats(cells: &[&str]) -> Result<Vec<f64>> {
    cells.iter().map(|c| parse_float(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SERIES: &str = "validdate;t_2m:C;relative_humidity_2m:p\n\
        2016-01-20T13:35:00Z;-0.829;99.2\n\
        2016-01-20T16:35:00Z;-1.574;99.3\n\
        2016-01-20T19:35:00Z;-2.167;99\n\
        2016-01-20T22:35:00Z;-2.367;98.6\n\
        2016-01-21T01:35:00Z;-3.162;95.5\n\
        2016-01-21T04:35:00Z;-3.893;75.1\n\
        2016-01-21T07:35:00Z;-4.625;79.3\n\
        2016-01-21T10:35:00Z;-5.357;100\n\
        2016-01-21T13:35:00Z;-6.088;100\n";

    const REGION: &str = "validdate;2016-12-19 12:00:00\n\
        parameter;t_2m:C\n\
        data;-180;-140;-100;-60;-20;20;60;100;140;180\n\
        90;-15.286;-15.286;-15.286;-15.286;-15.286;-15.286;-15.286;-15.286;-15.286;-15.286\n\
        70;-8.161;-16.942;-24.255;-16.692;-0.567;7.3;-22.192;-38.973;-22.411;-8.036\n\
        50;2.8;7.1;-6.098;-9.755;9;0.963;-9.348;-15.13;-19.973;2.8\n\
        30;20.7;18.8;-5.755;22.1;18.2;16.6;12.5;-3.848;18.2;20.7\n\
        10;26.4;26;26.8;27.4;26.7;34.8;26.7;27.8;27.2;26.4\n\
        -10;27.1;27;22.5;22.7;24.6;27.4;27.3;27.2;27.9;27.4\n\
        -30;21.7;21.9;20.1;22.8;19.7;34.2;22.9;18.7;25.2;21.6\n\
        -50;9.7;9.3;8.1;12.2;4.1;1.7;3.7;7.9;8.8;9.7\n\
        -70;-1.505;-0.348;-3.13;0.308;-2.036;-2.411;-18.348;-16.411;-25.317;-1.473\n\
        -90;-25.63;-25.63;-25.63;-25.63;-25.63;-25.63;-25.63;-25.63;-25.63;-25.63\n";

    const ROUTE: &str = "lat;lon;validdate;t_2m:C;precip_1h:mm\n\
        47.4239;9.3748;2018-10-23T15:47:46Z;10.9;0.02\n\
        47.3828;8.5307;2018-10-23T16:47:46Z;12.5;0.00\n\
        47.5577;7.5936;2018-10-23T17:47:46Z;13.0;0.00\n";

    #[test]
    fn series() {
        let cr = parse_csv(SERIES.as_bytes()).unwrap();
        assert_eq!(cr.parameters, vec!["t_2m:C", "relative_humidity_2m:p"]);
        assert_eq!(cr.rows.len(), 9);
        assert!(cr.rows.iter().all(|r| r.values.len() == 2));
        assert_eq!(
            cr.rows[0].valid_date,
            Utc.with_ymd_and_hms(2016, 1, 20, 13, 35, 0).unwrap()
        );
        assert_eq!(cr.rows[0].values, vec![-0.829, 99.2]);
        assert_eq!(
            cr.rows[8].valid_date,
            Utc.with_ymd_and_hms(2016, 1, 21, 13, 35, 0).unwrap()
        );
        assert_eq!(cr.rows[8].values, vec![-6.088, 100.0]);
        assert_eq!(cr.column("relative_humidity_2m:p").unwrap()[2], 99.0);
        assert_eq!(cr.column("missing"), None);
    }

    #[test]
    fn column_of_hand_built_response_with_short_row() {
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut cr = CsvResponse {
            parameters: vec!["t_2m:C".into(), "precip_1h:mm".into()],
            rows: vec![
                CsvRow {
                    valid_date: date,
                    values: vec![1.5, 0.2],
                },
                CsvRow {
                    valid_date: date,
                    values: vec![2.5],
                },
            ],
        };
        assert_eq!(cr.column("t_2m:C"), Some(vec![1.5, 2.5]));
        assert_eq!(cr.column("precip_1h:mm"), None);

        cr.rows[1].values.push(0.0);
        assert_eq!(cr.column("precip_1h:mm"), Some(vec![0.2, 0.0]));
    }

    #[test]
    fn series_header_only() {
        let cr = parse_csv(b"validdate;t_2m:C\n").unwrap();
        assert_eq!(cr.parameters, vec!["t_2m:C"]);
        assert!(cr.rows.is_empty());
    }

    #[test]
    fn series_crlf() {
        let cr = parse_csv(b"validdate;t_2m:C\r\n2020-01-01T00:00:00Z;1.5\r\n").unwrap();
        assert_eq!(cr.rows[0].values, vec![1.5]);
    }

    #[test]
    fn series_errors() {
        let bad: [&[u8]; 6] = [
            b"",
            b"date;t_2m:C\n2016-01-20T13:35:00Z;1\n",
            b"validdate;t_2m:C\n2016-01-20T13:35:00Z;1;2\n",
            b"validdate;t_2m:C\n2016-01-20 13:35:00;1\n",
            b"validdate;t_2m:C\n2016-01-20T13:35:00Z;abc\n",
            b"validdate;t_2m:C\n\xff\n",
        ];
        for data in bad {
            assert!(matches!(parse_csv(data), Err(Error::CsvParse)));
        }
    }

    #[test]
    fn region() {
        let crr = parse_csv_region(REGION.as_bytes()).unwrap();
        assert_eq!(
            crr.valid_date,
            Utc.with_ymd_and_hms(2016, 12, 19, 12, 0, 0).unwrap()
        );
        assert_eq!(crr.parameter, "t_2m:C");
        assert_eq!(
            crr.lons,
            vec![-180.0, -140.0, -100.0, -60.0, -20.0, 20.0, 60.0, 100.0, 140.0, 180.0]
        );
        assert_eq!(
            crr.lats,
            vec![90.0, 70.0, 50.0, 30.0, 10.0, -10.0, -30.0, -50.0, -70.0, -90.0]
        );
        assert_eq!(crr.values.len(), 10);
        assert!(crr.values.iter().all(|row| row.len() == 10));
        assert_eq!(crr.values[0][0], -15.286);
        assert_eq!(crr.values[0][9], -15.286);
        assert_eq!(crr.values[1][1], -16.942);
        assert_eq!(crr.values[9][0], -25.63);
        assert_eq!(crr.value_at(9, 9), Some(-25.63));
        assert_eq!(crr.value_at(10, 0), None);
    }

    #[test]
    fn region_errors() {
        let missing_data = REGION.replace("data;", "lons;");
        let bad_date = REGION.replace("2016-12-19 12:00:00", "2016-12-19T12:00:00Z");
        let wrong_width = REGION.replace("90;-15.286;", "90;");
        let extra_cell = REGION.replace("parameter;t_2m:C", "parameter;t_2m:C;x");
        for data in [
            "",
            "validdate;2016-12-19 12:00:00\n",
            missing_data.as_str(),
            bad_date.as_str(),
            wrong_width.as_str(),
            extra_cell.as_str(),
        ] {
            assert!(matches!(parse_csv_region(data.as_bytes()), Err(Error::CsvParse)));
        }
    }

    #[test]
    fn route() {
        let crr = parse_csv_route(ROUTE.as_bytes()).unwrap();
        assert_eq!(crr.parameters, vec!["t_2m:C", "precip_1h:mm"]);
        assert_eq!(crr.rows.len(), 3);
        assert_eq!(crr.rows[0].lat, 47.4239);
        assert_eq!(crr.rows[0].lon, 9.3748);
        assert_eq!(
            crr.rows[0].valid_date,
            Utc.with_ymd_and_hms(2018, 10, 23, 15, 47, 46).unwrap()
        );
        assert_eq!(crr.rows[0].values, vec![10.9, 0.02]);
        assert_eq!(crr.rows[2].values, vec![13.0, 0.0]);
    }

    #[test]
    fn route_errors() {
        for data in [
            "",
            "lat;lon\n",
            "validdate;t_2m:C\n2016-01-20T13:35:00Z;1\n",
            "lat;lon;validdate;t_2m:C\n47.4;9.3;2018-10-23T15:47:46Z\n",
            "lat;lon;validdate;t_2m:C\nnorth;9.3;2018-10-23T15:47:46Z;1\n",
        ] {
            assert!(matches!(parse_csv_route(data.as_bytes()), Err(Error::CsvParse)));
        }
    }
}

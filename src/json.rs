use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};

const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonDateValue {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// Values of one parameter at one coordinate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonCoordinate {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default, alias = "stationID")]
    pub station_id: Option<String>,
    #[serde(default)]
    pub dates: Vec<JsonDateValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonData {
    pub parameter: String,
    #[serde(default)]
    pub coordinates: Vec<JsonCoordinate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonResponse {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub date_generated: Option<DateTime<Utc>>,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<JsonData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonParameterValue {
    pub parameter: String,
    pub value: f64,
}

/// One point of a route with all requested parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRoutePoint {
    pub lat: f64,
    pub lon: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub parameters: Vec<JsonParameterValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRouteResponse {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub date_generated: Option<DateTime<Utc>>,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<JsonRoutePoint>,
}

pub fn parse_json(data: &[u8]) -> Result<JsonResponse> {
    let resp: JsonResponse = serde_json::from_slice(data)?;
    check_status(&resp.status, &resp.message)?;
    log::debug!("decoded json response with {} parameter(s)", resp.data.len());
    Ok(resp)
}

pub fn parse_json_route(data: &[u8]) -> Result<JsonRouteResponse> {
    let resp: JsonRouteResponse = serde_json::from_slice(data)?;
    check_status(&resp.status, &resp.message)?;
    log::debug!("decoded json route with {} point(s)", resp.data.len());
    Ok(resp)
}

fn check_status(status: &str, message: &Option<String>) -> Result<()> {
    if status == STATUS_OK {
        return Ok(());
    }
    log::warn!("service returned status {}", status);
    Err(Error::Service {
        status: status.to_string(),
        message: message.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXAMPLE: &str = r#"{
        "version": "3.0",
        "user": "username",
        "dateGenerated": "2019-06-10T16:03:40Z",
        "status": "OK",
        "data": [
            {
                "parameter": "t_2m:C",
                "coordinates": [
                    {
                        "station_id": "postal_CH9000",
                        "dates": [
                            { "date": "2019-06-10T16:03:40Z", "value": 15.6 }
                        ]
                    }
                ]
            }
        ]
    }"#;

    const ROUTE: &str = r#"{
        "version": "3.0",
        "user": "username",
        "dateGenerated": "2019-06-10T16:03:40Z",
        "status": "OK",
        "data": [
            {
                "lat": 47.4239,
                "lon": 9.3748,
                "date": "2018-10-23T15:47:46Z",
                "parameters": [
                    { "parameter": "t_2m:C", "value": 10.9 },
                    { "parameter": "precip_1h:mm", "value": 0.02 }
                ]
            },
            {
                "lat": 47.3828,
                "lon": 8.5307,
                "date": "2018-10-23T16:47:46Z",
                "parameters": [
                    { "parameter": "t_2m:C", "value": 12.5 },
                    { "parameter": "precip_1h:mm", "value": 0 }
                ]
            }
        ]
    }"#;

    #[test]
    fn series() {
        let jr = parse_json(EXAMPLE.as_bytes()).unwrap();
        let generated = Utc.with_ymd_and_hms(2019, 6, 10, 16, 3, 40).unwrap();
        assert_eq!(jr.version, "3.0");
        assert_eq!(jr.user, "username");
        assert_eq!(jr.date_generated, Some(generated));
        assert_eq!(jr.status, "OK");
        assert_eq!(jr.data.len(), 1);
        assert_eq!(jr.data[0].parameter, "t_2m:C");
        let coord = &jr.data[0].coordinates[0];
        assert_eq!(coord.station_id.as_deref(), Some("postal_CH9000"));
        assert_eq!(coord.lat, None);
        assert_eq!(coord.dates.len(), 1);
        assert_eq!(coord.dates[0].date, generated);
        assert_eq!(coord.dates[0].value, 15.6);
    }

    #[test]
    fn coordinates_by_lat_lon() {
        let doc = r#"{"status":"OK","data":[{"parameter":"t_2m:C","coordinates":
            [{"lat":47.5,"lon":8,"dates":[{"date":"2020-01-01T00:00:00Z","value":-1}]}]}]}"#;
        let jr = parse_json(doc.as_bytes()).unwrap();
        let coord = &jr.data[0].coordinates[0];
        assert_eq!((coord.lat, coord.lon), (Some(47.5), Some(8.0)));
        assert_eq!(coord.station_id, None);
    }

    #[test]
    fn route() {
        let jr = parse_json_route(ROUTE.as_bytes()).unwrap();
        assert_eq!(jr.data.len(), 2);
        assert_eq!(jr.data[0].lat, 47.4239);
        assert_eq!(
            jr.data[1].date,
            Utc.with_ymd_and_hms(2018, 10, 23, 16, 47, 46).unwrap()
        );
        assert_eq!(jr.data[0].parameters[1].parameter, "precip_1h:mm");
        assert_eq!(jr.data[1].parameters[1].value, 0.0);
    }

    #[test]
    fn non_ok_status_is_an_error() {
        let doc = r#"{
            "status": "error",
            "message": "Not enough data outside temporal and/or spatial domain"
        }"#;
        let err = parse_json(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Service { ref status, .. } if status == "error"));
        assert!(
            err.to_string()
                .starts_with("Not enough data outside temporal and/or spatial domain")
        );

        // Otherwise complete documents are rejected too.
        let doc = EXAMPLE.replace(r#""status": "OK""#, r#""status": "PARTIAL""#);
        let err = parse_json(doc.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "PARTIAL");

        let doc = ROUTE.replace(r#""status": "OK""#, r#""status": "FAILED""#);
        assert!(matches!(parse_json_route(doc.as_bytes()), Err(Error::Service { .. })));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(parse_json(b"not json"), Err(Error::Json(_))));
        assert!(matches!(parse_json(b"{}"), Err(Error::Json(_))));
        assert!(matches!(
            parse_json_route(br#"{"status":"OK","data":[{"lat":1}]}"#),
            Err(Error::Json(_))
        ));
    }
}

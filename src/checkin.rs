//! Geotagged check-ins and visit marking.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::model::{Day, Place};

/// A check-in counts for places within this radius.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 1.0;

/// Check-ins are kept in UTC and shown in Taiwan time (UTC+8, no DST).
pub const LOCAL_UTC_OFFSET_SECS: i32 = 8 * 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub latitude: f64,
    pub longitude: f64,
    /// When the client reported the check-in. Serialized as RFC 3339.
    pub timestamp: DateTime<Utc>,
}

impl CheckIn {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Build a check-in from a client-reported RFC 3339 timestamp, such as
    /// `2024-05-01T10:00:00.000Z`.
    pub fn from_report(latitude: f64, longitude: f64, timestamp: &str) -> Result<Self> {
        Ok(Self::new(latitude, longitude, parse_timestamp(timestamp)?))
    }

    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// The check-in time at UTC+8.
    pub fn local_time(&self) -> DateTime<FixedOffset> {
        self.timestamp.with_timezone(&local_offset())
    }

    /// [`Self::local_time`] rendered as RFC 3339, e.g. `2024-05-01T18:00:00+08:00`.
    pub fn local_timestamp(&self) -> String {
        self.local_time().to_rfc3339()
    }
}

fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(LOCAL_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|time| time.with_timezone(&Utc))
        .map_err(|err| PlannerError::InvalidCheckIn {
            message: format!("timestamp {raw:?}: {err}"),
        })
}

/// Ellipsoidal (WGS-84) distance between two `(lat, lng)` points, in km.
pub fn geodesic_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let from = Point::new(from.1, from.0);
    let to = Point::new(to.1, to.0);
    Geodesic.distance(from, to) / 1000.0
}

/// Whether `checkin` lies within `radius_km` of `place`.
pub fn is_nearby(place: &Place, checkin: &CheckIn, radius_km: f64) -> bool {
    geodesic_km(place.location(), checkin.location()) <= radius_km
}

/// Flag every place of `day` near `checkin` as visited. Returns how many matched.
pub fn mark_visited(day: &mut Day, checkin: &CheckIn, radius_km: f64) -> usize {
    let mut marked = 0;
    for place in day.places.iter_mut() {
        if is_nearby(place, checkin, radius_km) {
            place.visited = Some(true);
            marked += 1;
        }
    }
    marked
}

/// A user's check-in history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckInLog {
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub checkins: Vec<CheckIn>,
}

impl CheckInLog {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, checkin: CheckIn) {
        self.checkins.push(checkin);
    }

    /// Most recently recorded check-in.
    pub fn latest(&self) -> Option<&CheckIn> {
        self.checkins.last()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::*;
    use crate::haversine::haversine_km;

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    #[test]
    fn test_is_nearby_within_radius() {
        let place = Place::new("Taipei 101", 25.0340, 121.5645);
        // ~330 m north
        let close = CheckIn::new(25.0370, 121.5645, at("2024-05-01T10:00:00Z"));
        // ~5 km west
        let far = CheckIn::new(25.0340, 121.5150, at("2024-05-01T10:00:00Z"));

        assert!(is_nearby(&place, &close, DEFAULT_NEARBY_RADIUS_KM));
        assert!(!is_nearby(&place, &far, DEFAULT_NEARBY_RADIUS_KM));
    }

    #[test]
    fn test_is_nearby_uses_ellipsoid_at_the_boundary() {
        let place = Place::new("Marker", 25.0, 121.5);
        // Due north: ~999.2 m on WGS-84, ~1003 m on the 6371 km sphere.
        let inside = CheckIn::new(25.00902, 121.5, at("2024-05-01T10:00:00Z"));
        // ~1008 m on WGS-84.
        let outside = CheckIn::new(25.0091, 121.5, at("2024-05-01T10:00:00Z"));

        assert!(haversine_km(place.location(), inside.location()) > DEFAULT_NEARBY_RADIUS_KM);
        assert!(is_nearby(&place, &inside, DEFAULT_NEARBY_RADIUS_KM));
        assert!(!is_nearby(&place, &outside, DEFAULT_NEARBY_RADIUS_KM));
    }

    #[test]
    fn test_mark_visited_only_touches_nearby_places() {
        let mut day = Day::new(vec![
            Place::new("Taipei 101", 25.0340, 121.5645),
            Place::new("Longshan Temple", 25.0372, 121.4999),
        ]);
        let checkin = CheckIn::new(25.0335, 121.5650, at("2024-05-01T10:00:00Z"));

        assert_eq!(mark_visited(&mut day, &checkin, DEFAULT_NEARBY_RADIUS_KM), 1);
        assert_eq!(day.places[0].visited, Some(true));
        assert_eq!(day.places[1].visited, None);
    }

    #[test]
    fn test_report_with_fractional_seconds() {
        let checkin = CheckIn::from_report(25.0, 121.5, "2024-05-01T10:00:00.250Z").unwrap();
        assert_eq!(checkin.timestamp.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_malformed_timestamp_is_rejected() {
        for raw in ["yesterday", "2024-05-01 10:00", "2024-13-01T10:00:00Z", ""] {
            let err = CheckIn::from_report(25.0, 121.5, raw).unwrap_err();
            assert!(matches!(err, PlannerError::InvalidCheckIn { .. }), "{raw:?}");
            assert_eq!(err.http_status(), 400);
        }

        let json = r#"{"latitude": 25.0, "longitude": 121.5, "timestamp": "not a time"}"#;
        assert!(serde_json::from_str::<CheckIn>(json).is_err());
    }

    #[test]
    fn test_local_time_is_utc_plus_eight() {
        let checkin = CheckIn::from_report(25.0, 121.5, "2024-05-01T10:00:00Z").unwrap();
        assert_eq!(checkin.local_timestamp(), "2024-05-01T18:00:00+08:00");

        // Late UTC evening is already the next morning locally.
        let late = CheckIn::from_report(25.0, 121.5, "2024-05-01T20:30:00Z").unwrap();
        let local = late.local_time();
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(local.hour(), 4);
        assert_eq!(local, late.timestamp);
    }

    #[test]
    fn test_timestamp_round_trips_through_json() {
        let checkin = CheckIn::new(25.0, 121.5, at("2024-05-01T10:00:00Z"));
        let json = serde_json::to_value(&checkin).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01T10:00:00Z");
        let back: CheckIn = serde_json::from_value(json).unwrap();
        assert_eq!(back, checkin);
    }

    #[test]
    fn test_log_latest_is_last_recorded() {
        let mut log = CheckInLog::new("U123", "Jie");
        assert!(log.latest().is_none());

        log.record(CheckIn::new(25.0, 121.5, at("2024-05-01T09:00:00Z")));
        log.record(CheckIn::new(25.1, 121.6, at("2024-05-01T11:00:00Z")));

        assert_eq!(log.latest().unwrap().timestamp, at("2024-05-01T11:00:00Z"));
    }
}

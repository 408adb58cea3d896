use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

/// Maximum length of a forecast `dayDate` string (`YYYY-MM-DD`).
pub const DAY_DATE_LEN: usize = 10;

/// Latest observed conditions for the queried location.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurrentWeather {
    /// Observation timestamp, epoch milliseconds.
    pub time: i64,
    pub icon: i32,
    pub icon_v2: i32,
    /// Air temperature in °C.
    pub temperature: f32,
}

impl CurrentWeather {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time).single()
    }
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ForecastEntry {
    /// Calendar date, `YYYY-MM-DD`, truncated to [`DAY_DATE_LEN`] bytes.
    pub day_date: String,
    pub icon_day: i32,
    pub icon_day_v2: i32,
    pub temperature_max: f32,
    pub temperature_min: f32,
    /// Expected precipitation in mm, with its min/max range.
    pub precipitation: f32,
    pub precipitation_min: f32,
    pub precipitation_max: f32,
}

impl ForecastEntry {
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.day_date, "%Y-%m-%d").ok()
    }
}

/// Time-series data backing the weather graphs.
///
/// The upstream payload carries 23 named series; only `precipitation10m` is
/// materialized here. Extracting another series is one extra call in
/// [`crate::extract::graph`] plus a field on this struct.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherGraph {
    /// Start of the full-resolution series, epoch milliseconds.
    pub start: i64,
    /// Start of the low-resolution series, epoch milliseconds.
    pub start_low_resolution: i64,
    /// Precipitation in mm per 10-minute slot.
    pub precipitation10m: Vec<f32>,
}

impl WeatherGraph {
    fn release(&mut self) {
        self.precipitation10m = Vec::new();
    }
}

/// Full result of a `plzDetail` query.
///
/// Owns all of its data; dropping the report frees everything. [`release`]
/// exists for callers that want to empty a report while keeping the value
/// around for reuse.
///
/// [`release`]: WeatherReport::release
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastEntry>,
    pub graph: WeatherGraph,
}

impl WeatherReport {
    /// Drop all owned sequences, leaving an empty report. Idempotent.
    pub fn release(&mut self) {
        self.forecast = Vec::new();
        self.graph.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_empties_report_and_is_idempotent() {
        let mut report = WeatherReport {
            forecast: vec![ForecastEntry::default(); 7],
            graph: WeatherGraph {
                start: 1,
                start_low_resolution: 2,
                precipitation10m: vec![0.0; 144],
            },
            ..WeatherReport::default()
        };

        report.release();
        assert_eq!(report.forecast.len(), 0);
        assert_eq!(report.graph.precipitation10m.len(), 0);

        // Second release is a no-op.
        report.release();
        assert_eq!(report.forecast.len(), 0);
        assert_eq!(report.graph.precipitation10m.len(), 0);
    }

    #[test]
    fn release_on_never_populated_report_is_safe() {
        let mut report = WeatherReport::default();
        report.release();
        assert!(report.forecast.is_empty());
    }

    #[test]
    fn observed_at_converts_epoch_millis() {
        let current = CurrentWeather {
            time: 1_716_804_600_000,
            ..CurrentWeather::default()
        };
        let observed = current.observed_at().expect("valid timestamp");
        assert_eq!(observed.timestamp(), 1_716_804_600);
    }

    #[test]
    fn forecast_day_parses_iso_date() {
        let entry = ForecastEntry {
            day_date: "2024-05-27".to_string(),
            ..ForecastEntry::default()
        };
        let day = entry.day().expect("valid date");
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 5, 27).unwrap());

        let bad = ForecastEntry::default();
        assert!(bad.day().is_none());
    }
}

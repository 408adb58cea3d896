//! Extraction of domain structures from the validated JSON tree.
//!
//! Deliberately lenient per field: a value of the wrong type leaves the
//! destination at its zero default and extraction continues. The schema
//! validator runs first and is the only thing standing between a drifted
//! upstream schema and a silently zeroed report.

use serde_json::{Map, Value};

use crate::model::{CurrentWeather, DAY_DATE_LEN, ForecastEntry, WeatherGraph};

pub fn current_weather(obj: &Map<String, Value>) -> CurrentWeather {
    let mut current = CurrentWeather::default();

    if let Some(v) = obj.get("time").and_then(as_i64) {
        current.time = v;
    }
    if let Some(v) = obj.get("icon").and_then(as_i32) {
        current.icon = v;
    }
    if let Some(v) = obj.get("iconV2").and_then(as_i32) {
        current.icon_v2 = v;
    }
    if let Some(v) = obj.get("temperature").and_then(as_f32) {
        current.temperature = v;
    }

    current
}

/// One entry per array element, in order. An element that is not an object
/// stays fully zeroed rather than being dropped, so the entry count always
/// matches the array length.
pub fn forecast(array: &[Value]) -> Vec<ForecastEntry> {
    array
        .iter()
        .map(|element| {
            let mut entry = ForecastEntry::default();
            let Some(obj) = element.as_object() else {
                return entry;
            };

            if let Some(v) = obj.get("dayDate").and_then(Value::as_str) {
                entry.day_date = truncate_to(v, DAY_DATE_LEN);
            }
            if let Some(v) = obj.get("iconDay").and_then(as_i32) {
                entry.icon_day = v;
            }
            if let Some(v) = obj.get("iconDayV2").and_then(as_i32) {
                entry.icon_day_v2 = v;
            }
            if let Some(v) = obj.get("temperatureMax").and_then(as_f32) {
                entry.temperature_max = v;
            }
            if let Some(v) = obj.get("temperatureMin").and_then(as_f32) {
                entry.temperature_min = v;
            }
            if let Some(v) = obj.get("precipitation").and_then(as_f32) {
                entry.precipitation = v;
            }
            if let Some(v) = obj.get("precipitationMin").and_then(as_f32) {
                entry.precipitation_min = v;
            }
            if let Some(v) = obj.get("precipitationMax").and_then(as_f32) {
                entry.precipitation_max = v;
            }

            entry
        })
        .collect()
}

pub fn graph(obj: &Map<String, Value>) -> WeatherGraph {
    let mut graph = WeatherGraph::default();

    if let Some(v) = obj.get("start").and_then(as_i64) {
        graph.start = v;
    }
    if let Some(v) = obj.get("startLowResolution").and_then(as_i64) {
        graph.start_low_resolution = v;
    }
    if let Some(array) = obj.get("precipitation10m").and_then(Value::as_array) {
        graph.precipitation10m = float_series(array);
    }
    // Further series follow the same pattern when a field is added for them.

    graph
}

/// Sized to the array length; non-numeric elements stay 0.0 instead of
/// aborting the whole series.
fn float_series(array: &[Value]) -> Vec<f32> {
    array.iter().map(|v| as_f32(v).unwrap_or(0.0)).collect()
}

// Integer fields occasionally arrive with a fractional part; truncate instead
// of rejecting, so `as_i64` gets a float fallback.
fn as_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

fn as_i32(value: &Value) -> Option<i32> {
    as_i64(value).map(|v| v as i32)
}

fn as_f32(value: &Value) -> Option<f32> {
    value.as_f64().map(|f| f as f32)
}

/// Byte-capacity truncation that never splits a UTF-8 character.
fn truncate_to(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::plz_detail_document;
    use serde_json::json;

    #[test]
    fn current_weather_is_fully_populated() {
        let doc = plz_detail_document();
        let current = current_weather(doc["currentWeather"].as_object().unwrap());

        assert_eq!(current.time, 1_716_804_600_000);
        assert_eq!(current.icon, 2);
        assert_eq!(current.icon_v2, 2);
        assert!((current.temperature - 18.4).abs() < 1e-5);
    }

    #[test]
    fn wrong_typed_field_keeps_zero_default() {
        let obj = json!({
            "time": "not a number",
            "icon": 3,
            "iconV2": 3,
            "temperature": "18.4",
        });
        let current = current_weather(obj.as_object().unwrap());

        assert_eq!(current.time, 0);
        assert_eq!(current.icon, 3);
        assert_eq!(current.temperature, 0.0);
    }

    #[test]
    fn integer_fields_truncate_fractional_numbers() {
        let obj = json!({"time": 1716804600000.9f64, "icon": 3.7, "iconV2": -1.2, "temperature": 1});
        let current = current_weather(obj.as_object().unwrap());

        assert_eq!(current.time, 1_716_804_600_000);
        assert_eq!(current.icon, 3);
        assert_eq!(current.icon_v2, -1);
        assert_eq!(current.temperature, 1.0);
    }

    #[test]
    fn forecast_entries_follow_array_order() {
        let doc = plz_detail_document();
        let entries = forecast(doc["forecast"].as_array().unwrap());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day_date, "2024-05-27");
        assert_eq!(entries[1].day_date, "2024-05-28");
        assert!((entries[1].precipitation - 6.3).abs() < 1e-5);
        assert!(entries.iter().all(|e| e.temperature_max >= e.temperature_min));
    }

    #[test]
    fn empty_forecast_extracts_to_zero_entries() {
        let entries = forecast(&[]);
        assert!(entries.is_empty());
    }

    #[test]
    fn non_object_forecast_element_stays_zeroed() {
        let array = vec![json!(42), json!({"dayDate": "2024-05-27"})];
        let entries = forecast(&array);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day_date, "");
        assert_eq!(entries[0].temperature_max, 0.0);
        assert_eq!(entries[1].day_date, "2024-05-27");
    }

    #[test]
    fn day_date_is_truncated_to_ten_bytes() {
        let array = vec![json!({"dayDate": "2024-05-27T00:00:00+02:00"})];
        let entries = forecast(&array);
        assert_eq!(entries[0].day_date, "2024-05-27");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_to("zürichberg", 4), "zür");
        assert_eq!(truncate_to("short", 10), "short");
    }

    #[test]
    fn graph_extracts_timestamps_and_precipitation_series() {
        let doc = plz_detail_document();
        let graph = graph(doc["graph"].as_object().unwrap());

        assert_eq!(graph.start, 1_716_800_400_000);
        assert_eq!(graph.start_low_resolution, 1_716_768_000_000);
        assert_eq!(graph.precipitation10m, vec![0.0, 0.1, 0.3, 1.2]);
    }

    #[test]
    fn non_numeric_series_elements_are_left_zero() {
        let array = vec![json!(0.5), json!("n/a"), json!(1.5), json!(null)];
        let series = float_series(&array);
        assert_eq!(series, vec![0.5, 0.0, 1.5, 0.0]);
    }
}

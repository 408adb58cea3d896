//! Upfront schema validation of the `plzDetail` payload.
//!
//! The extractor is deliberately lenient: a field of the wrong type is left at
//! its zero default rather than failing the query. This module is the sole
//! gate against silently returning a half-populated report when the upstream
//! schema changes, so it checks every key the extractor depends on before any
//! extraction runs. All-or-nothing: the first violation fails the whole
//! document.

use serde_json::{Map, Value};

use crate::error::MeteoSwissError;

const CURRENT_WEATHER_KEYS: &[&str] = &["time", "icon", "iconV2", "temperature"];

const FORECAST_KEYS: &[&str] = &[
    "dayDate",
    "iconDay",
    "iconDayV2",
    "temperatureMax",
    "temperatureMin",
    "precipitation",
    "precipitationMin",
    "precipitationMax",
];

/// Every named time series under `graph`. All must be present and
/// array-typed; element contents are not checked. Only `precipitation10m` is
/// extracted today, but validating the full set keeps schema drift loud.
pub(crate) const GRAPH_SERIES_KEYS: &[&str] = &[
    "precipitation10m",
    "precipitationMin10m",
    "precipitationMax10m",
    "weatherIcon3h",
    "weatherIcon3hV2",
    "windDirection3h",
    "windSpeed3h",
    "sunrise",
    "sunset",
    "temperatureMin1h",
    "temperatureMax1h",
    "temperatureMean1h",
    "precipitation1h",
    "precipitationMin1h",
    "precipitationMax1h",
    "windSpeed1h",
    "windSpeed1hq10",
    "windSpeed1hq90",
    "gustSpeed1h",
    "gustSpeed1hq10",
    "gustSpeed1hq90",
    "sunshine1h",
    "precipitationProbability3h",
];

/// Check that `root` contains every field the extractor reads.
///
/// Pure over the tree; validating the same document twice yields the same
/// result.
pub fn validate(root: &Value) -> Result<(), MeteoSwissError> {
    let root_obj = root.as_object().ok_or(MeteoSwissError::NotAnObject)?;

    let current = require_object(root_obj, "currentWeather")?;
    for key in CURRENT_WEATHER_KEYS {
        require(current, key)?;
    }

    let forecast = require_array(root_obj, "forecast")?;
    for element in forecast {
        let entry = element
            .as_object()
            .ok_or_else(|| MeteoSwissError::MissingKey("forecast".to_string()))?;
        for key in FORECAST_KEYS {
            require(entry, key)?;
        }
    }

    // Presence only, no element schema.
    require_array(root_obj, "warnings")?;
    require_array(root_obj, "warningsOverview")?;

    let graph = require_object(root_obj, "graph")?;
    require(graph, "start")?;
    require(graph, "startLowResolution")?;
    for key in GRAPH_SERIES_KEYS {
        require_array(graph, key)?;
    }

    Ok(())
}

fn require<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, MeteoSwissError> {
    obj.get(key)
        .ok_or_else(|| MeteoSwissError::MissingKey(key.to_string()))
}

fn require_object<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Map<String, Value>, MeteoSwissError> {
    require(obj, key)?
        .as_object()
        .ok_or_else(|| MeteoSwissError::MissingKey(key.to_string()))
}

fn require_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Vec<Value>, MeteoSwissError> {
    require(obj, key)?
        .as_array()
        .ok_or_else(|| MeteoSwissError::MissingKey(key.to_string()))
}

//! Shared fixture: a structurally complete `plzDetail` document.

use serde_json::{Value, json};

use crate::validate::GRAPH_SERIES_KEYS;

pub(crate) fn plz_detail_document() -> Value {
    let mut doc = json!({
        "currentWeather": {
            "time": 1_716_804_600_000i64,
            "icon": 2,
            "iconV2": 2,
            "temperature": 18.4,
        },
        "forecast": [
            {
                "dayDate": "2024-05-27",
                "iconDay": 1,
                "iconDayV2": 1,
                "temperatureMax": 24.0,
                "temperatureMin": 12.5,
                "precipitation": 0.0,
                "precipitationMin": 0.0,
                "precipitationMax": 0.4,
            },
            {
                "dayDate": "2024-05-28",
                "iconDay": 5,
                "iconDayV2": 5,
                "temperatureMax": 19.8,
                "temperatureMin": 11.0,
                "precipitation": 6.3,
                "precipitationMin": 2.1,
                "precipitationMax": 11.9,
            },
        ],
        "warnings": [],
        "warningsOverview": [],
        "graph": {
            "start": 1_716_800_400_000i64,
            "startLowResolution": 1_716_768_000_000i64,
        },
    });

    let graph = doc["graph"].as_object_mut().unwrap();
    for key in GRAPH_SERIES_KEYS {
        graph.insert((*key).to_string(), json!([0.0, 0.2, 1.5]));
    }
    doc["graph"]["precipitation10m"] = json!([0.0, 0.1, 0.3, 1.2]);

    doc
}

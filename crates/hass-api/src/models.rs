// Typed models for Home Assistant REST API payloads.
//
// Wire names are snake_case (`entity_id`, `time_fired`, ...). Unknown
// fields are ignored on input; optional fields are omitted on output.
// All models are plain immutable values: construct once, never mutate.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::timestamp;

/// Response from `GET /api/`, confirming the API is up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub message: String,
    #[serde(default)]
    pub version: String,
}

/// The state of one entity, as returned by `/api/states` and
/// `/api/states/{entity_id}`.
///
/// ```json
/// {"entity_id":"light.living_room","state":"on",
///  "attributes":{"friendly_name":"Living Room"},
///  "last_changed":"2025-03-25T04:50:56.076866+00:00", ...}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    /// Entity attributes, schema varies per domain.
    #[serde(default)]
    pub attributes: Value,
    #[serde(with = "timestamp::iso_fixed")]
    pub last_changed: DateTime<FixedOffset>,
    #[serde(with = "timestamp::iso_fixed")]
    pub last_updated: DateTime<FixedOffset>,
    /// Absent on servers predating the `last_reported` field.
    #[serde(
        default,
        with = "timestamp::iso_fixed_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_reported: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub context: serde_json::Map<String, Value>,
}

/// A fired event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    #[serde(default)]
    pub event_data: Value,
    #[serde(default)]
    pub origin: String,
    #[serde(with = "timestamp::iso_fixed")]
    pub time_fired: DateTime<FixedOffset>,
    #[serde(default)]
    pub context: serde_json::Map<String, Value>,
}

/// A remotely invocable service, as listed under `/api/services`.
///
/// `domain` and `service` are not part of the wire payload for the
/// per-domain listing (they are the map keys); they default to empty
/// strings when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: HashMap<String, ServiceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ServiceTarget>,
}

/// One input field of a service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceField {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
}

/// What a service call can be targeted at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_registry_entry_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_registry_entry_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_registry_entry_id: Option<bool>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{EntityState, Event, Service};

    #[test]
    fn entity_state_round_trips() {
        let raw = json!({
            "entity_id": "binary_sensor.refrigerator_door",
            "state": "off",
            "attributes": {"device_class": "opening", "friendly_name": "Refrigerator Door"},
            "last_changed": "2025-03-25T04:50:56.076866+00:00",
            "last_updated": "2025-03-25T04:50:56.076866+00:00",
            "last_reported": "2025-03-25T04:50:56.076866+00:00",
            "context": {"id": "01JQ5T7AYC7V1XG9VT1ASQS3M5", "parent_id": null, "user_id": null}
        });

        let state: EntityState = serde_json::from_value(raw).unwrap();
        assert_eq!(state.entity_id, "binary_sensor.refrigerator_door");
        assert_eq!(state.state, "off");
        assert_eq!(state.attributes["device_class"], "opening");

        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: EntityState = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn entity_state_tolerates_missing_last_reported_and_unknown_fields() {
        let raw = json!({
            "entity_id": "light.living_room",
            "state": "on",
            "attributes": {},
            "last_changed": "2025-03-25T04:50:56.076866+00:00",
            "last_updated": "2025-03-25T04:50:56.076866+00:00",
            "some_future_field": 42
        });

        let state: EntityState = serde_json::from_value(raw).unwrap();
        assert!(state.last_reported.is_none());
        assert!(state.context.is_empty());
    }

    #[test]
    fn event_round_trips() {
        let raw = json!({
            "event_type": "state_changed",
            "event_data": {"entity_id": "light.living_room", "new_state": "on"},
            "origin": "LOCAL",
            "time_fired": "2025-03-25T04:50:56.076866+00:00",
            "context": {"id": "01JQ5T7AYC7V1XG9VT1ASQS3M5", "parent_id": null, "user_id": null}
        });

        let event: Event = serde_json::from_value(raw).unwrap();
        assert_eq!(event.event_type, "state_changed");
        assert_eq!(event.origin, "LOCAL");
        assert_eq!(event.event_data["entity_id"], "light.living_room");
        assert_eq!(event.time_fired.timestamp_subsec_micros(), 76_866);

        let encoded = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn service_decodes_fields_and_target() {
        let raw = json!({
            "description": "Turn on a light",
            "fields": {
                "brightness": {
                    "description": "Brightness 0..255",
                    "type": "integer",
                    "required": false,
                    "min": 0,
                    "max": 255
                }
            },
            "target": {"entity": true}
        });

        let service: Service = serde_json::from_value(raw).unwrap();
        assert_eq!(service.description, "Turn on a light");
        assert!(service.domain.is_empty());
        let field = &service.fields["brightness"];
        assert_eq!(field.field_type, "integer");
        assert_eq!(field.required, Some(false));
        assert_eq!(service.target.unwrap().entity, Some(true));
    }
}

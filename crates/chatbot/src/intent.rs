//! Classified intents and the entities extracted alongside them.

use std::collections::HashMap;

use chrono::FixedOffset;
use serde::Deserialize;

use crate::day::LocalDay;

/// The request categories the bot can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Who is in a channel.
    GetUsers,
    /// Which members of a channel never posted to it.
    GetUsersNegation,
    /// Who posted the most to a channel.
    GetHighestPoster,
    /// When the caller last posted.
    GetPostTime,
    /// How many times the caller posted to a channel.
    GetPostCount,
    /// Missing or unrecognised intent.
    Unknown,
}

const INTENT_TABLE: &[(&str, Intent)] = &[
    ("get_users", Intent::GetUsers),
    ("get_users_negation", Intent::GetUsersNegation),
    ("get_highest_poster", Intent::GetHighestPoster),
    ("get_post_time", Intent::GetPostTime),
    ("get_post_count", Intent::GetPostCount),
];

impl Intent {
    /// Look up an intent by the classifier's identifier. Unmatched names map to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        INTENT_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, intent)| *intent)
            .unwrap_or(Intent::Unknown)
    }

    /// The classifier identifier, `None` for `Unknown`.
    pub fn name(&self) -> Option<&'static str> {
        INTENT_TABLE
            .iter()
            .find(|(_, intent)| intent == self)
            .map(|(name, _)| *name)
    }

    pub fn as_str(&self) -> &'static str {
        self.name().unwrap_or("unknown")
    }
}

/// One extracted value as returned by the classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityValue {
    pub value: serde_json::Value,
}

/// Raw classifier output: `{intent, entities: {key: [{value}]}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierPayload {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub entities: HashMap<String, Vec<EntityValue>>,
}

impl ClassifierPayload {
    /// First value recorded for `key`, trimmed, if it is a non-empty string.
    pub fn first_value(&self, key: &str) -> Option<String> {
        self.entities
            .get(key)?
            .first()?
            .value
            .as_str()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// The intent identifier, preferring the top-level field over the `intent` entity.
    pub fn intent_name(&self) -> Option<String> {
        self.intent
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| self.first_value("intent"))
    }
}

/// A `datetime` entity after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateEntity {
    Day(LocalDay),
    Unparseable(String),
}

/// Typed entities handed to the query handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities {
    pub channel: Option<String>,
    pub datetime: Option<DateEntity>,
}

/// A validated request: exactly one intent plus its entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotRequest {
    pub intent: Intent,
    /// Identifier as the classifier sent it, kept for logging.
    pub raw_intent: Option<String>,
    pub entities: Entities,
}

impl BotRequest {
    /// Validate a classifier payload. Naive datetimes are read in `local`.
    pub fn from_payload(payload: &ClassifierPayload, local: FixedOffset) -> Self {
        let raw_intent = payload.intent_name();
        let intent = raw_intent
            .as_deref()
            .map(Intent::from_name)
            .unwrap_or(Intent::Unknown);

        let datetime = payload.first_value("datetime").map(|value| {
            match LocalDay::parse(&value, local) {
                Some(day) => DateEntity::Day(day),
                None => DateEntity::Unparseable(value),
            }
        });

        Self {
            intent,
            raw_intent,
            entities: Entities {
                channel: payload.first_value("channel"),
                datetime,
            },
        }
    }

    pub fn new(intent: Intent, entities: Entities) -> Self {
        Self {
            intent,
            raw_intent: intent.name().map(str::to_string),
            entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ClassifierPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn every_table_entry_round_trips_through_its_name() {
        for (name, intent) in INTENT_TABLE {
            assert_eq!(Intent::from_name(name), *intent);
            assert_eq!(intent.name(), Some(*name));
        }
        assert_eq!(Intent::Unknown.name(), None);
    }

    #[test]
    fn unmatched_names_are_unknown() {
        assert_eq!(Intent::from_name("get_weather"), Intent::Unknown);
        assert_eq!(Intent::from_name("GET_USERS"), Intent::Unknown);
        assert_eq!(Intent::from_name(""), Intent::Unknown);
    }

    #[test]
    fn intent_is_read_from_entities_when_not_top_level() {
        let payload = payload(json!({
            "_text": "who is in general",
            "entities": {
                "intent": [{"value": "get_users", "confidence": 0.98}],
                "channel": [{"value": " general ", "type": "value"}]
            }
        }));

        let request = BotRequest::from_payload(&payload, FixedOffset::east_opt(0).unwrap());
        assert_eq!(request.intent, Intent::GetUsers);
        assert_eq!(request.entities.channel.as_deref(), Some("general"));
        assert_eq!(request.entities.datetime, None);
    }

    #[test]
    fn top_level_intent_wins() {
        let payload = payload(json!({
            "intent": "get_post_count",
            "entities": { "intent": [{"value": "get_users"}] }
        }));

        let request = BotRequest::from_payload(&payload, FixedOffset::east_opt(0).unwrap());
        assert_eq!(request.intent, Intent::GetPostCount);
    }

    #[test]
    fn absent_intent_is_unknown() {
        let request = BotRequest::from_payload(
            &payload(json!({ "entities": {} })),
            FixedOffset::east_opt(0).unwrap(),
        );
        assert_eq!(request.intent, Intent::Unknown);
        assert_eq!(request.raw_intent, None);
    }

    #[test]
    fn blank_and_non_string_values_are_ignored() {
        let payload = payload(json!({
            "entities": {
                "channel": [{"value": "   "}],
                "datetime": [{"value": {"from": "2024-03-14"}}]
            }
        }));

        assert_eq!(payload.first_value("channel"), None);
        assert_eq!(payload.first_value("datetime"), None);
    }

    #[test]
    fn datetime_is_validated_once() {
        let local = FixedOffset::east_opt(0).unwrap();
        let good = BotRequest::from_payload(
            &payload(json!({ "entities": { "datetime": [{"value": "2024-03-14T00:00:00.000-07:00"}] } })),
            local,
        );
        assert!(matches!(good.entities.datetime, Some(DateEntity::Day(_))));

        let bad = BotRequest::from_payload(
            &payload(json!({ "entities": { "datetime": [{"value": "next blursday"}] } })),
            local,
        );
        assert_eq!(
            bad.entities.datetime,
            Some(DateEntity::Unparseable("next blursday".to_string()))
        );
    }
}

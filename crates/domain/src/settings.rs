//! Settings — the free-form configuration document shared with clients.

use serde::{Deserialize, Serialize};

/// Opaque JSON configuration stored alongside users and automations.
///
/// The hub never interprets `data`; it only persists and serves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_null_data() {
        assert!(Settings::default().data.is_null());
    }

    #[test]
    fn should_deserialize_document_without_data_field() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn should_preserve_arbitrary_payload() {
        let json = serde_json::json!({"data": {"rooms": ["kitchen", "garage"], "poll": 30}});
        let settings: Settings = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&settings).unwrap(), json);
    }
}

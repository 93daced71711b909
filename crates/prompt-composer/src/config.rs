//! Host Configuration
//!
//! The configuration object supplied by the host. Parsing is lenient: broken
//! group or item data degrades to an empty state with a warning and never
//! fails the composition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ComposeError, ComposeResult};
use crate::model::ItemDescriptor;

/// Movement threshold in pixels before a press becomes a drag
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;

/// Which input technology drives drag sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Synthetic pointer tracking (down/move/up)
    #[default]
    Pointer,
    /// Platform drag events (dragstart/dragover/drop)
    Native,
}

/// One group of source items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDescriptor {
    pub group_label: String,
    #[serde(default = "default_true")]
    pub default_expanded: bool,
    /// Optional icon markup shown before the label
    #[serde(default)]
    pub group_icon: Option<String>,
    #[serde(default)]
    pub buttons: Vec<ItemDescriptor>,
}

/// Complete host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default)]
    pub button_groups: Vec<GroupDescriptor>,
    /// Suggestions keyed by item label
    #[serde(default)]
    pub autocomplete_tags: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub transport: TransportKind,
    #[serde(default = "default_threshold")]
    pub drag_threshold_px: f64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    DEFAULT_DRAG_THRESHOLD_PX
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            button_groups: Vec::new(),
            autocomplete_tags: BTreeMap::new(),
            transport: TransportKind::default(),
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            log_level: default_log_level(),
        }
    }
}

impl HostConfig {
    /// Build a configuration from an arbitrary JSON value.
    ///
    /// Every field is read independently so one malformed entry only drops
    /// that entry.
    pub fn from_value(value: &Value) -> Self {
        let mut config = HostConfig::default();
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                tracing::warn!(component = "Config", "host configuration is not an object, using defaults");
            }
            return config;
        };

        match obj.get("buttonGroups") {
            Some(groups) => match parse_groups(groups) {
                Ok(groups) => config.button_groups = groups,
                Err(e) => tracing::warn!(component = "Config", error = %e, "ignoring buttonGroups"),
            },
            None => tracing::debug!(component = "Config", "no buttonGroups configured"),
        }

        if let Some(tags) = obj.get("autocompleteTags") {
            match serde_json::from_value::<BTreeMap<String, Vec<String>>>(tags.clone()) {
                Ok(tags) => config.autocomplete_tags = tags,
                Err(e) => tracing::warn!(component = "Config", error = %e, "ignoring autocompleteTags"),
            }
        }

        if let Some(transport) = obj.get("transport") {
            match serde_json::from_value::<TransportKind>(transport.clone()) {
                Ok(kind) => config.transport = kind,
                Err(e) => tracing::warn!(component = "Config", error = %e, "unknown transport, using pointer"),
            }
        }

        if let Some(threshold) = obj.get("dragThresholdPx").and_then(Value::as_f64) {
            if threshold.is_finite() && threshold >= 0.0 {
                config.drag_threshold_px = threshold;
            }
        }

        if let Some(level) = obj.get("logLevel").and_then(Value::as_str) {
            config.log_level = level.to_string();
        }

        config
    }
}

/// Parse the `buttonGroups` sequence, filling in default labels.
pub fn parse_groups(value: &Value) -> ComposeResult<Vec<GroupDescriptor>> {
    let groups = value
        .as_array()
        .ok_or_else(|| ComposeError::InvalidConfig("buttonGroups is not an array".to_string()))?;

    let mut result = Vec::with_capacity(groups.len());
    for (idx, group) in groups.iter().enumerate() {
        let Some(obj) = group.as_object() else {
            tracing::warn!(component = "Config", index = idx, "skipping group that is not an object");
            continue;
        };

        let group_label = obj
            .get("groupLabel")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Group {}", idx));

        let default_expanded = obj
            .get("defaultExpanded")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        let group_icon = obj
            .get("groupIcon")
            .and_then(Value::as_str)
            .map(str::to_string);

        let buttons = match obj.get("buttons") {
            Some(Value::Array(buttons)) => buttons
                .iter()
                .enumerate()
                .filter_map(|(b_idx, button)| parse_item(button, b_idx, &group_label))
                .collect(),
            Some(_) => {
                tracing::warn!(component = "Config", group = %group_label, "buttons is not an array");
                Vec::new()
            }
            None => Vec::new(),
        };

        result.push(GroupDescriptor {
            group_label,
            default_expanded,
            group_icon,
            buttons,
        });
    }
    Ok(result)
}

fn parse_item(value: &Value, idx: usize, group_label: &str) -> Option<ItemDescriptor> {
    let Some(obj) = value.as_object() else {
        tracing::warn!(component = "Config", group = %group_label, index = idx, "skipping button that is not an object");
        return None;
    };
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some(ItemDescriptor {
        label: text("label").unwrap_or_else(|| format!("Button {}", idx)),
        group_label: group_label.to_string(),
        param_name: text("paramName"),
        prompt_name: text("promptName"),
        query_name: text("queryName"),
        data_item: text("dataItem"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_groups() {
        let config = HostConfig::from_value(&json!({
            "buttonGroups": [
                {
                    "groupLabel": "Cars",
                    "defaultExpanded": false,
                    "buttons": [{ "label": "Audi", "paramName": "P_Brand" }]
                }
            ],
            "autocompleteTags": { "Audi": ["A4", "A6"] }
        }));

        assert_eq!(config.button_groups.len(), 1);
        let group = &config.button_groups[0];
        assert_eq!(group.group_label, "Cars");
        assert!(!group.default_expanded);
        assert_eq!(group.buttons[0].label, "Audi");
        assert_eq!(group.buttons[0].group_label, "Cars");
        assert_eq!(group.buttons[0].param_name.as_deref(), Some("P_Brand"));
        assert_eq!(config.autocomplete_tags["Audi"], ["A4", "A6"]);
        assert!(!config.autocomplete_tags.contains_key("BMW"));
    }

    #[test]
    fn test_missing_labels_get_defaults() {
        let groups = parse_groups(&json!([{ "buttons": [{}, { "label": "" }] }])).unwrap();
        assert_eq!(groups[0].group_label, "Group 0");
        assert!(groups[0].default_expanded);
        assert_eq!(groups[0].buttons[0].label, "Button 0");
        assert_eq!(groups[0].buttons[1].label, "Button 1");
    }

    #[test]
    fn test_button_groups_not_array_is_invalid() {
        let err = parse_groups(&json!({ "groupLabel": "Cars" })).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidConfig(_)));

        let config = HostConfig::from_value(&json!({ "buttonGroups": "Cars" }));
        assert!(config.button_groups.is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let groups = parse_groups(&json!([
            42,
            { "groupLabel": "Fruit", "buttons": "Apple" },
            { "groupLabel": "Cars", "buttons": [7, { "label": "Audi" }] }
        ]))
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert!(groups[0].buttons.is_empty());
        assert_eq!(groups[1].buttons.len(), 1);
        assert_eq!(groups[1].buttons[0].label, "Audi");
    }

    #[test]
    fn test_transport_and_threshold() {
        let config = HostConfig::from_value(&json!({
            "transport": "native",
            "dragThresholdPx": 12,
            "logLevel": "debug"
        }));
        assert_eq!(config.transport, TransportKind::Native);
        assert_eq!(config.drag_threshold_px, 12.0);
        assert_eq!(config.log_level, "debug");

        let config = HostConfig::from_value(&json!({ "transport": "telepathy", "dragThresholdPx": -1 }));
        assert_eq!(config.transport, TransportKind::Pointer);
        assert_eq!(config.drag_threshold_px, DEFAULT_DRAG_THRESHOLD_PX);
    }

    #[test]
    fn test_non_object_config_uses_defaults() {
        assert_eq!(HostConfig::from_value(&json!(null)), HostConfig::default());
        assert_eq!(HostConfig::from_value(&json!([1, 2])), HostConfig::default());
    }
}

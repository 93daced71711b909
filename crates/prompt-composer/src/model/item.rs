//! Item Descriptors and Drag Payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ComposeResult;

/// Static definition of one draggable source option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub label: String,
    #[serde(default)]
    pub group_label: String,
    /// Host parameter the card value is reported under
    #[serde(default)]
    pub param_name: Option<String>,
    #[serde(default)]
    pub prompt_name: Option<String>,
    #[serde(default)]
    pub query_name: Option<String>,
    #[serde(default)]
    pub data_item: Option<String>,
}

impl ItemDescriptor {
    pub fn new(label: impl Into<String>, group_label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            group_label: group_label.into(),
            param_name: None,
            prompt_name: None,
            query_name: None,
            data_item: None,
        }
    }

    pub fn with_param(mut self, param_name: impl Into<String>) -> Self {
        self.param_name = Some(param_name.into());
        self
    }

    /// Field that identifies a card on the board
    pub fn key(&self) -> &str {
        &self.label
    }
}

/// Snapshot of an item carried by one drag session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub item: ItemDescriptor,
    /// Flat index of the item across all groups
    pub source_index: usize,
    pub created_at: DateTime<Utc>,
}

impl DragPayload {
    /// Copies the descriptor so later source changes cannot reach the session.
    pub fn new(item: &ItemDescriptor, source_index: usize) -> Self {
        Self {
            item: item.clone(),
            source_index,
            created_at: Utc::now(),
        }
    }

    pub fn key(&self) -> &str {
        self.item.key()
    }

    /// JSON text placed on a native drag's data transfer
    pub fn to_transfer_data(&self) -> ComposeResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_a_snapshot() {
        let mut item = ItemDescriptor::new("Audi", "Cars").with_param("P_Brand");
        let payload = DragPayload::new(&item, 3);
        item.label = "BMW".to_string();

        assert_eq!(payload.key(), "Audi");
        assert_eq!(payload.source_index, 3);
    }

    #[test]
    fn test_transfer_data_uses_camel_case() {
        let item = ItemDescriptor::new("Audi", "Cars").with_param("P_Brand");
        let data = DragPayload::new(&item, 0).to_transfer_data().unwrap();

        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["item"]["label"], "Audi");
        assert_eq!(value["item"]["paramName"], "P_Brand");
        assert_eq!(value["sourceIndex"], 0);
        assert!(value["createdAt"].is_string());
    }
}

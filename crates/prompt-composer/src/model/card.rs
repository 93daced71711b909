//! Card Entity
//!
//! A target slot materialized from a dropped item, holding the value the
//! user typed for it.

use serde::{Deserialize, Serialize};

use super::item::ItemDescriptor;
use super::parameter::{Parameter, ParameterValue};

/// Identifier of a card within one board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub source_config: ItemDescriptor,
    pub current_value: String,
}

impl Card {
    pub fn new(id: CardId, source_config: ItemDescriptor) -> Self {
        Self {
            id,
            source_config,
            current_value: String::new(),
        }
    }

    pub fn key(&self) -> &str {
        self.source_config.key()
    }

    /// Header text, falling back when the descriptor has no label
    pub fn header(&self) -> &str {
        if self.source_config.label.is_empty() {
            "Unnamed Prompt"
        } else {
            &self.source_config.label
        }
    }

    /// The parameter this card contributes, if any.
    ///
    /// Requires both a non-blank value and a parameter name.
    pub fn to_parameter(&self) -> Option<Parameter> {
        let value = self.current_value.trim();
        let name = self.source_config.param_name.as_deref()?;
        if value.is_empty() || name.is_empty() {
            return None;
        }
        Some(Parameter {
            parameter: name.to_string(),
            values: vec![ParameterValue {
                use_value: value.to_string(),
            }],
        })
    }
}

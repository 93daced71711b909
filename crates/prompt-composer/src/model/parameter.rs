//! Host Parameters
//!
//! The normalized payload handed back to the host:
//! `[{ "parameter": "P_Brand", "values": [{ "use": "A4" }] }]`.

use serde::{Deserialize, Serialize};

use super::card::Card;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValue {
    #[serde(rename = "use")]
    pub use_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub parameter: String,
    pub values: Vec<ParameterValue>,
}

impl Parameter {
    pub fn single(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            values: vec![ParameterValue {
                use_value: value.into(),
            }],
        }
    }
}

/// Reduce cards to parameters, keeping card order and skipping cards that
/// contribute nothing.
pub fn reduce_parameters<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<Parameter> {
    cards.into_iter().filter_map(Card::to_parameter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardId, ItemDescriptor};
    use serde_json::json;

    #[test]
    fn test_serializes_to_host_shape() {
        let params = vec![Parameter::single("P_Brand", "A4")];
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!([{ "parameter": "P_Brand", "values": [{ "use": "A4" }] }])
        );
    }

    #[test]
    fn test_reduce_keeps_card_order() {
        let mut cards = Vec::new();
        for (i, (label, param, value)) in [
            ("Color", Some("P_Color"), "Red"),
            ("Audi", Some("P_Brand"), ""),
            ("Notes", None, "ignored"),
            ("Year", Some("P_Year"), "2020"),
        ]
        .into_iter()
        .enumerate()
        {
            let mut item = ItemDescriptor::new(label, "Group");
            item.param_name = param.map(str::to_string);
            let mut card = Card::new(CardId(i as u32), item);
            card.current_value = value.to_string();
            cards.push(card);
        }

        assert_eq!(
            reduce_parameters(&cards),
            vec![Parameter::single("P_Color", "Red"), Parameter::single("P_Year", "2020")]
        );
    }
}

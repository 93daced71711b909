//! Target Board
//!
//! The ordered collection of cards created from drops, and the reduction of
//! those cards to the host parameter payload.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::autocomplete;
use crate::component::Component;
use crate::config::HostConfig;
use crate::error::ComposeResult;
use crate::lifecycle::{ComponentState, Lifecycle};
use crate::model::{reduce_parameters, Card, CardId, DragPayload, Parameter};
use crate::surface::{BoardView, CardView, SurfaceRef};

const COMPONENT: &str = "TargetBoard";

/// Why a drop did not produce a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// A card with the same key is already on the board
    Duplicate,
    /// The board is not ready, or already destroyed
    NotReady,
}

/// Something a drag session can deliver its payload to
pub trait DropTarget {
    /// Materialize a card for the payload. Nothing is mutated on rejection.
    fn accept_drop(&mut self, payload: DragPayload) -> Result<Card, DropRejection>;
}

pub struct TargetBoard {
    lifecycle: Lifecycle,
    cards: Vec<Card>,
    next_id: u32,
    /// Suggestions keyed by item label
    autocomplete: BTreeMap<String, Vec<String>>,
    surface: Option<SurfaceRef>,
}

impl Default for TargetBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetBoard {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(COMPONENT),
            cards: Vec::new(),
            next_id: 1,
            autocomplete: BTreeMap::new(),
            surface: None,
        }
    }

    /// Cards in creation order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cards.iter().any(|c| c.key() == key)
    }

    /// Returns `None` without mutating anything when the drop is rejected
    pub fn add_card(&mut self, payload: DragPayload) -> Option<Card> {
        self.try_add_card(payload).ok()
    }

    pub fn try_add_card(&mut self, payload: DragPayload) -> Result<Card, DropRejection> {
        if !self.lifecycle.state().is_ready() {
            tracing::warn!(component = COMPONENT, state = ?self.lifecycle.state(), "board not ready, drop ignored");
            return Err(DropRejection::NotReady);
        }
        if self.contains_key(payload.key()) {
            tracing::info!(component = COMPONENT, key = payload.key(), "card already on board, drop rejected");
            return Err(DropRejection::Duplicate);
        }

        let card = Card::new(CardId(self.next_id), payload.item);
        self.next_id += 1;
        tracing::info!(component = COMPONENT, id = card.id.0, key = card.key(), "card added");
        self.cards.push(card.clone());

        match &self.surface {
            Some(surface) => surface.draw_target_board(self.view()),
            None => tracing::debug!(component = COMPONENT, "no surface yet, card will render on next render()"),
        }
        Ok(card)
    }

    /// Store the user's input for a card. Returns false for an unknown id.
    pub fn set_card_value(&mut self, id: CardId, value: &str) -> bool {
        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if card.current_value == value {
            return true;
        }
        card.current_value = value.to_string();
        if let Some(surface) = &self.surface {
            surface.draw_target_board(self.view());
        }
        true
    }

    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let idx = self.cards.iter().position(|c| c.id == id)?;
        let card = self.cards.remove(idx);
        tracing::info!(component = COMPONENT, id = id.0, key = card.key(), "card removed");
        if let Some(surface) = &self.surface {
            surface.draw_target_board(self.view());
        }
        Some(card)
    }

    /// Drop every card. Used during teardown.
    pub fn remove_all(&mut self) {
        self.cards.clear();
    }

    /// Suggestions for a card's current input
    pub fn suggestions(&self, id: CardId, input: &str) -> Vec<String> {
        self.card(id)
            .and_then(|card| self.autocomplete.get(card.key()))
            .map(|candidates| autocomplete::suggest(candidates, input))
            .unwrap_or_default()
    }

    pub fn complete(&self, id: CardId, input: &str) -> Option<String> {
        let card = self.card(id)?;
        autocomplete::complete(self.autocomplete.get(card.key())?, input)
    }

    /// Pure reduction of the current cards, in creation order
    pub fn collect_parameters(&self) -> Vec<Parameter> {
        reduce_parameters(&self.cards)
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    id: card.id,
                    header: card.header().to_string(),
                    value: card.current_value.clone(),
                    has_suggestions: self.autocomplete.contains_key(card.key()),
                })
                .collect(),
        }
    }
}

impl DropTarget for TargetBoard {
    fn accept_drop(&mut self, payload: DragPayload) -> Result<Card, DropRejection> {
        self.try_add_card(payload)
    }
}

#[async_trait(?Send)]
impl Component for TargetBoard {
    fn name(&self) -> &'static str {
        COMPONENT
    }

    fn state(&self) -> ComponentState {
        self.lifecycle.state()
    }

    async fn initialize(&mut self, config: &HostConfig) -> ComposeResult<()> {
        self.lifecycle.transition(ComponentState::Initializing)?;
        self.autocomplete = config.autocomplete_tags.clone();
        tracing::info!(
            component = COMPONENT,
            autocomplete_keys = self.autocomplete.len(),
            "initialized"
        );
        self.lifecycle.transition(ComponentState::Ready)
    }

    fn render(&mut self, surface: &SurfaceRef) -> ComposeResult<()> {
        self.lifecycle.transition(ComponentState::Rendered)?;
        self.surface = Some(surface.clone());
        surface.draw_target_board(self.view());
        Ok(())
    }

    fn destroy(&mut self) {
        if self.lifecycle.state() == ComponentState::Destroyed {
            return;
        }
        self.remove_all();
        self.autocomplete.clear();
        self.surface = None;
        let _ = self.lifecycle.transition(ComponentState::Destroyed);
        tracing::info!(component = COMPONENT, "destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemDescriptor;
    use crate::testing::{block_on, RecordingSurface};
    use serde_json::json;

    fn payload(label: &str, param: Option<&str>) -> DragPayload {
        let mut item = ItemDescriptor::new(label, "Cars");
        item.param_name = param.map(str::to_string);
        DragPayload::new(&item, 0)
    }

    fn ready_board() -> TargetBoard {
        let config = HostConfig::from_value(&json!({
            "autocompleteTags": { "Audi": ["A3", "A4", "A6"] }
        }));
        let mut board = TargetBoard::new();
        block_on(board.initialize(&config)).unwrap();
        board
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let mut board = ready_board();
        let first = board.add_card(payload("Audi", Some("P_Brand"))).unwrap();
        assert_eq!(first.id, CardId(1));

        assert!(board.add_card(payload("Audi", Some("P_Other"))).is_none());
        assert_eq!(board.cards().len(), 1);
        assert_eq!(board.cards()[0].source_config.param_name.as_deref(), Some("P_Brand"));
    }

    #[test]
    fn test_add_before_render_defers_drawing() {
        let mut board = ready_board();
        board.add_card(payload("Audi", None)).unwrap();
        board.add_card(payload("BMW", None)).unwrap();

        let surface = RecordingSurface::new();
        board.render(&surface.handle()).unwrap();
        assert_eq!(surface.board_draws(), 1);
        let view = surface.last_board().unwrap();
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.cards[0].header, "Audi");
        assert!(view.cards[0].has_suggestions);
        assert!(!view.cards[1].has_suggestions);
    }

    #[test]
    fn test_add_after_render_draws_immediately() {
        let mut board = ready_board();
        let surface = RecordingSurface::new();
        board.render(&surface.handle()).unwrap();

        board.add_card(payload("Audi", None)).unwrap();
        assert_eq!(surface.board_draws(), 2);
        assert_eq!(surface.last_board().unwrap().cards.len(), 1);
    }

    #[test]
    fn test_add_before_initialize_is_ignored() {
        let mut board = TargetBoard::new();
        assert!(board.add_card(payload("Audi", None)).is_none());
        assert!(board.cards().is_empty());
    }

    #[test]
    fn test_rejection_reasons() {
        let mut board = TargetBoard::new();
        assert_eq!(board.accept_drop(payload("Audi", None)), Err(DropRejection::NotReady));

        let mut board = ready_board();
        assert!(board.accept_drop(payload("Audi", None)).is_ok());
        assert_eq!(board.accept_drop(payload("Audi", None)), Err(DropRejection::Duplicate));

        board.destroy();
        assert_eq!(board.accept_drop(payload("BMW", None)), Err(DropRejection::NotReady));
        assert!(board.cards().is_empty());
    }

    #[test]
    fn test_collect_parameters() {
        let mut board = ready_board();
        let audi = board.add_card(payload("Audi", Some("P_Brand"))).unwrap();
        let color = board.add_card(payload("Color", Some("P_Color"))).unwrap();
        board.add_card(payload("Notes", None)).unwrap();

        assert!(board.collect_parameters().is_empty());

        assert!(board.set_card_value(color.id, "Red"));
        assert!(board.set_card_value(audi.id, "A4"));
        assert_eq!(
            board.collect_parameters(),
            vec![Parameter::single("P_Brand", "A4"), Parameter::single("P_Color", "Red")]
        );
        assert!(!board.set_card_value(CardId(99), "x"));
    }

    #[test]
    fn test_remove_card_frees_key() {
        let mut board = ready_board();
        let audi = board.add_card(payload("Audi", None)).unwrap();
        assert_eq!(board.remove_card(audi.id).map(|c| c.id), Some(audi.id));
        assert!(board.remove_card(audi.id).is_none());

        let again = board.add_card(payload("Audi", None)).unwrap();
        assert_ne!(again.id, audi.id);
    }

    #[test]
    fn test_suggestions_by_label() {
        let mut board = ready_board();
        let audi = board.add_card(payload("Audi", None)).unwrap();
        let bmw = board.add_card(payload("BMW", None)).unwrap();

        assert_eq!(board.suggestions(audi.id, "a"), vec!["A3", "A4", "A6"]);
        assert_eq!(board.complete(audi.id, "a6"), None);
        assert_eq!(board.complete(audi.id, "a"), Some("A3".to_string()));
        assert!(board.suggestions(bmw.id, "a").is_empty());
    }

    #[test]
    fn test_destroy_clears_cards() {
        let mut board = ready_board();
        board.add_card(payload("Audi", Some("P_Brand"))).unwrap();
        board.destroy();
        board.destroy();
        assert!(board.cards().is_empty());
        assert!(board.collect_parameters().is_empty());
        assert!(board.add_card(payload("BMW", None)).is_none());
    }
}

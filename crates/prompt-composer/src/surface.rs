//! Render Surface
//!
//! Components draw view models into a [`Surface`]; the UI decides how they
//! look. The surface also reports where the drop area currently sits so the
//! transfer controller can hit-test releases.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::CardId;

/// A point in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Laid out with real dimensions
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

/// One draggable entry of an expanded group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub label: String,
    pub group_index: usize,
    pub item_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroupContent {
    Items(Vec<ItemView>),
    /// Expanded but the group has no buttons
    NoItems,
    Collapsed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub label: String,
    pub icon: Option<String>,
    pub expanded: bool,
    pub content: GroupContent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SourceListView {
    /// Placeholder shown when no groups are configured
    #[default]
    Empty,
    Groups(Vec<GroupView>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub header: String,
    pub value: String,
    pub has_suggestions: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub cards: Vec<CardView>,
}

/// Where components draw themselves
pub trait Surface {
    fn draw_source_list(&self, view: SourceListView);

    fn draw_target_board(&self, view: BoardView);

    /// Current bounds of the drop area, `None` while it is not laid out
    fn drop_zone_bounds(&self) -> Option<Rect>;

    /// Toggle the hover affordance on the drop area
    fn set_drop_hover(&self, hovering: bool);

    /// Remove everything this surface shows
    fn clear(&self);
}

pub type SurfaceRef = Rc<dyn Surface>;

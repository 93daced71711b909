//! UI Components

mod card_editor;
mod source_pane;
mod target_pane;

pub use card_editor::CardEditor;
pub use source_pane::SourcePane;
pub use target_pane::TargetPane;

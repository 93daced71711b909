//! Composition Models
//!
//! Value types shared by the source list, the target board and the transfer
//! controller.

mod card;
mod item;
mod parameter;

pub use card::{Card, CardId};
pub use item::{DragPayload, ItemDescriptor};
pub use parameter::{reduce_parameters, Parameter, ParameterValue};

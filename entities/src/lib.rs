#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placeable entities and the per-frame action vocabulary.
//!
//! Towers are drawn, positioned, activated and priced through the object-safe
//! [`Placeable`] trait so the placement controller never matches on concrete
//! tower types. Action producers (the purchase menu and every placed tower)
//! translate [`FrameInput`](tower_defense_core::FrameInput) into [`Action`]
//! values that the controller resolves within the same frame.

mod catalog;
mod placeable;
mod placed;
mod tower;

pub use catalog::TowerCatalog;
pub use placeable::Placeable;
pub use placed::PlacedTower;
pub use tower::{GreenTower, Tower};

use tower_defense_core::TowerId;

/// Discrete intent emitted by an action producer for the current frame.
#[derive(Debug)]
pub enum Action {
    /// Start positioning a freshly purchased entity under the pointer.
    ///
    /// The entity travels by value: the controller becomes its only owner.
    RequestFollow(Box<dyn Placeable>),
    /// Try to place the entity currently following the pointer.
    RequestPlace,
    /// A placed tower was clicked and should show its range.
    EntitySelected(TowerId),
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RequestFollow(_) => "request_follow",
            Self::RequestPlace => "request_place",
            Self::EntitySelected(_) => "entity_selected",
        }
    }
}

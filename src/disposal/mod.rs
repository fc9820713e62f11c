//! Item disposal sequencing
//!
//! Drops eligible items in a hand-like serpentine sweep, deliberately
//! skipping a few on the first pass and collecting them afterwards.

pub mod layout;
pub mod sequencer;

use serde::{Deserialize, Serialize};

pub use layout::SlotLayout;
pub use sequencer::{DropCycle, DropPhase};

/// Identity of one item instance: the slot it occupies and what it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub slot: usize,
    pub item_id: u32,
}

/// An item sitting in an inventory slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotItem {
    /// Slot index in the grid
    pub slot: usize,
    /// Item type id
    pub item_id: u32,
}

impl SlotItem {
    pub const fn new(slot: usize, item_id: u32) -> Self {
        Self { slot, item_id }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey {
            slot: self.slot,
            item_id: self.item_id,
        }
    }
}

/// Live inventory snapshot provider
pub trait InventorySource {
    fn items(&self) -> Vec<SlotItem>;
}

impl<F: Fn() -> Vec<SlotItem>> InventorySource for F {
    fn items(&self) -> Vec<SlotItem> {
        self()
    }
}

/// Receives queued drop actions
pub trait DropSink {
    fn queue_drop(&mut self, item: &SlotItem);
}

impl DropSink for Vec<SlotItem> {
    fn queue_drop(&mut self, item: &SlotItem) {
        self.push(*item);
    }
}

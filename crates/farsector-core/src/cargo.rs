//! Slot-based cargo bays.
//!
//! A bay is a row of identical slots. Each slot holds at most one kind
//! of resource, up to the per-slot capacity; a slot drained to zero
//! forgets its resource and becomes free for anything. `give` and `take`
//! move as much as fits and report the amount actually moved, so callers
//! never have to pre-check space.

use serde::{Deserialize, Serialize};

use crate::catalog::ResourceId;

/// One cargo slot. `resource` is `None` exactly when `quantity` is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoSlot {
    pub resource: Option<ResourceId>,
    pub quantity: u32,
}

impl CargoSlot {
    fn empty() -> Self {
        Self {
            resource: None,
            quantity: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoBay {
    slots: Vec<CargoSlot>,
    slot_capacity: u32,
}

impl CargoBay {
    pub fn new(slot_count: u32, slot_capacity: u32) -> Self {
        Self {
            slots: vec![CargoSlot::empty(); slot_count as usize],
            slot_capacity,
        }
    }

    pub fn slot_capacity(&self) -> u32 {
        self.slot_capacity
    }

    pub fn total_capacity(&self) -> u32 {
        self.slot_capacity * self.slots.len() as u32
    }

    /// Units of `resource` currently held, across all slots.
    pub fn quantity_of(&self, resource: ResourceId) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.resource == Some(resource))
            .map(|slot| slot.quantity)
            .sum()
    }

    /// Units of `resource` the bay could still accept: headroom in the
    /// slots already carrying it, plus every empty slot.
    pub fn free_space_for(&self, resource: ResourceId) -> u32 {
        self.slots
            .iter()
            .map(|slot| match slot.resource {
                Some(held) if held == resource => self.slot_capacity - slot.quantity,
                Some(_) => 0,
                None => self.slot_capacity,
            })
            .sum()
    }

    /// Store up to `quantity` units, topping up matching slots before
    /// claiming empty ones. Returns the amount actually stored.
    pub fn give(&mut self, resource: ResourceId, quantity: u32) -> u32 {
        let mut remaining = quantity;

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.resource == Some(resource) {
                let added = (self.slot_capacity - slot.quantity).min(remaining);
                slot.quantity += added;
                remaining -= added;
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.resource.is_none() {
                let added = self.slot_capacity.min(remaining);
                slot.resource = Some(resource);
                slot.quantity = added;
                remaining -= added;
            }
        }

        quantity - remaining
    }

    /// Remove up to `quantity` units, freeing slots drained to zero.
    /// Returns the amount actually removed.
    pub fn take(&mut self, resource: ResourceId, quantity: u32) -> u32 {
        let mut remaining = quantity;

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.resource == Some(resource) {
                let removed = slot.quantity.min(remaining);
                slot.quantity -= removed;
                remaining -= removed;
                if slot.quantity == 0 {
                    slot.resource = None;
                }
            }
        }

        quantity - remaining
    }
}

//! Inventory
//!
//! Ordered item stacks (display order = pickup order) with one optional
//! active slot. Counts are always positive: taking the last unit of an
//! item deletes its stack.

use serde::{Deserialize, Serialize};
use super::feature::BerryColor;

/// Everything the player can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Wood,
    Stone,
    Cactus,
    Berries(BerryColor),
    Shovel,
    Spear,
}

impl ItemKind {
    /// Rare loot rolled instead of a feature's native drop
    pub const WEAPONS: [ItemKind; 2] = [ItemKind::Shovel, ItemKind::Spear];

    pub fn is_weapon(self) -> bool {
        matches!(self, ItemKind::Shovel | ItemKind::Spear)
    }

    /// Can be eaten with the secondary action
    pub fn is_edible(self) -> bool {
        matches!(self, ItemKind::Berries(_))
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Wood => "Wood",
            ItemKind::Stone => "Stone",
            ItemKind::Cactus => "Cactus",
            ItemKind::Berries(BerryColor::Blue) => "Blueberries",
            ItemKind::Berries(BerryColor::Orange) => "Orange berries",
            ItemKind::Berries(BerryColor::Purple) => "Purple berries",
            ItemKind::Berries(BerryColor::Red) => "Red berries",
            ItemKind::Berries(BerryColor::Yellow) => "Yellow berries",
            ItemKind::Shovel => "Shovel",
            ItemKind::Spear => "Spear",
        }
    }
}

/// A stack of identical items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
    /// Index into `stacks`
    active: Option<usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` units, stacking onto an existing entry or appending a new one.
    pub fn add_item(&mut self, kind: ItemKind, count: u32) {
        if count == 0 {
            return;
        }
        match self.stacks.iter_mut().find(|s| s.kind == kind) {
            Some(stack) => stack.count += count,
            None => self.stacks.push(ItemStack { kind, count }),
        }
    }

    /// Remove `count` units of `kind`.
    ///
    /// Asking for more than is held leaves the inventory untouched and
    /// returns false. Taking the last unit deletes the stack and, if it was
    /// active, clears the selection.
    pub fn remove_item(&mut self, kind: ItemKind, count: u32) -> bool {
        let Some(idx) = self.stacks.iter().position(|s| s.kind == kind) else {
            return false;
        };
        if count == 0 || count > self.stacks[idx].count {
            return false;
        }

        self.stacks[idx].count -= count;
        if self.stacks[idx].count == 0 {
            self.stacks.remove(idx);
            self.active = match self.active {
                Some(a) if a == idx => None,
                // Later stacks shift down one slot
                Some(a) if a > idx => Some(a - 1),
                other => other,
            };
        }
        true
    }

    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.stacks
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.count)
            .unwrap_or(0)
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Select a slot. Empty slots can't be selected; returns whether the selection changed.
    pub fn set_active(&mut self, slot: usize) -> bool {
        if slot >= self.stacks.len() || self.active == Some(slot) {
            return false;
        }
        self.active = Some(slot);
        true
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.active
    }

    /// The currently selected stack
    pub fn active(&self) -> Option<&ItemStack> {
        self.active.and_then(|idx| self.stacks.get(idx))
    }

    pub fn active_item(&self) -> Option<ItemKind> {
        self.active().map(|s| s.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_stacks_in_order() {
        let mut inv = Inventory::new();
        inv.add_item(ItemKind::Wood, 1);
        inv.add_item(ItemKind::Stone, 2);
        inv.add_item(ItemKind::Wood, 3);

        assert_eq!(inv.len(), 2);
        assert_eq!(inv.stacks()[0], ItemStack { kind: ItemKind::Wood, count: 4 });
        assert_eq!(inv.stacks()[1].kind, ItemKind::Stone);
    }

    #[test]
    fn test_remove_more_than_held_is_noop() {
        let mut inv = Inventory::new();
        inv.add_item(ItemKind::Stone, 2);
        assert!(!inv.remove_item(ItemKind::Stone, 3));
        assert_eq!(inv.count_of(ItemKind::Stone), 2);
        assert!(!inv.remove_item(ItemKind::Wood, 1));
    }

    #[test]
    fn test_remove_last_unit_clears_active() {
        let mut inv = Inventory::new();
        inv.add_item(ItemKind::Berries(BerryColor::Red), 1);
        assert!(inv.set_active(0));
        assert!(inv.remove_item(ItemKind::Berries(BerryColor::Red), 1));
        assert!(inv.is_empty());
        assert_eq!(inv.active_item(), None);
    }

    #[test]
    fn test_active_follows_shifted_stack() {
        let mut inv = Inventory::new();
        inv.add_item(ItemKind::Wood, 1);
        inv.add_item(ItemKind::Spear, 1);
        inv.set_active(1);

        inv.remove_item(ItemKind::Wood, 1);
        assert_eq!(inv.active_slot(), Some(0));
        assert_eq!(inv.active_item(), Some(ItemKind::Spear));
    }

    #[test]
    fn test_set_active_bounds() {
        let mut inv = Inventory::new();
        assert!(!inv.set_active(0));
        inv.add_item(ItemKind::Wood, 1);
        assert!(inv.set_active(0));
        assert!(!inv.set_active(0));
        assert!(!inv.set_active(5));
        assert_eq!(inv.active_slot(), Some(0));
    }
}

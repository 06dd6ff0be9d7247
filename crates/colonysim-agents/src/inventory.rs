//! Inventory operations for agents.
//!
//! Each agent carries items subject to a unit-count capacity. This module
//! provides add/remove/query helpers with checked arithmetic -- no silent
//! overflows, no panics. Grounded algorithmically on the teacher's
//! `inventory.rs` (same operation set: `total_weight`, `is_overloaded`,
//! `has_resource`, `add_resource`, `remove_resource`, `drain_all`),
//! re-keyed on [`Kind`] instead of a closed `Resource` enum per this
//! crate's open item-vocabulary decision.

use colonysim_types::Kind;

use crate::components::InventoryComponent;
use crate::error::AgentError;

/// Total item count held, summed across all kinds.
///
/// Returns `None` if the sum overflows `u32`.
#[must_use]
pub fn total_count(inventory: &InventoryComponent) -> Option<u32> {
    let mut total: u32 = 0;
    for qty in inventory.items.values() {
        total = total.checked_add(*qty)?;
    }
    Some(total)
}

/// Whether the inventory's current load is at or over capacity.
#[must_use]
pub fn is_full(inventory: &InventoryComponent) -> bool {
    total_count(inventory).is_none_or(|total| total >= inventory.capacity)
}

/// Whether the inventory holds at least `amount` of `kind`.
#[must_use]
pub fn has_item(inventory: &InventoryComponent, kind: &Kind, amount: u32) -> bool {
    inventory.items.get(kind).copied().unwrap_or(0) >= amount
}

/// Add `amount` units of `kind` to the inventory.
///
/// Fails if the addition would exceed capacity or overflow `u32`. Per
/// §7's "resource exhaustion" policy, the caller is expected to log and
/// discard on `Err` rather than propagate it further.
pub fn add_item(inventory: &mut InventoryComponent, kind: Kind, amount: u32) -> Result<(), AgentError> {
    let current_load = total_count(inventory).ok_or(AgentError::ArithmeticOverflow {
        context: "total_count overflow in add_item",
    })?;

    let new_load = current_load.checked_add(amount).ok_or_else(|| AgentError::InventoryOverflow {
        kind: kind.clone(),
        attempted: amount,
        current_load,
        capacity: inventory.capacity,
    })?;

    if new_load > inventory.capacity {
        return Err(AgentError::InventoryOverflow {
            kind,
            attempted: amount,
            current_load,
            capacity: inventory.capacity,
        });
    }

    let entry = inventory.items.entry(kind).or_insert(0);
    *entry = entry.checked_add(amount).ok_or(AgentError::ArithmeticOverflow {
        context: "individual item quantity overflow",
    })?;

    Ok(())
}

/// Remove `amount` units of `kind` from the inventory.
///
/// Fails if the agent does not hold enough. Removes the key entirely when
/// the remaining quantity reaches zero.
pub fn remove_item(inventory: &mut InventoryComponent, kind: &Kind, amount: u32) -> Result<(), AgentError> {
    let current = inventory.items.get(kind).copied().unwrap_or(0);
    if current < amount {
        return Err(AgentError::InsufficientItem { kind: kind.clone(), requested: amount, available: current });
    }

    let remaining = current.checked_sub(amount).ok_or(AgentError::ArithmeticOverflow {
        context: "subtraction underflow in remove_item",
    })?;

    if remaining == 0 {
        inventory.items.remove(kind);
    } else {
        inventory.items.insert(kind.clone(), remaining);
    }

    Ok(())
}

/// The first item kind present in the inventory (by its `Kind`'s string
/// ordering), used by the `drop` action to pick "the first item kind".
#[must_use]
pub fn first_item_kind(inventory: &InventoryComponent) -> Option<Kind> {
    inventory.items.keys().next().cloned()
}

/// Drain every item from the inventory, returning it as a standalone map.
/// Used when an agent's belongings spill onto the ground.
pub fn drain_all(inventory: &mut InventoryComponent) -> std::collections::BTreeMap<Kind, u32> {
    std::mem::take(&mut inventory.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> InventoryComponent {
        InventoryComponent { items: std::collections::BTreeMap::new(), capacity: 50 }
    }

    #[test]
    fn total_count_empty_is_zero() {
        assert_eq!(total_count(&empty()), Some(0));
    }

    #[test]
    fn add_item_stacks() {
        let mut inv = empty();
        add_item(&mut inv, Kind::new("log"), 10).expect("add ok");
        add_item(&mut inv, Kind::new("log"), 5).expect("add ok");
        assert_eq!(inv.items.get(&Kind::new("log")).copied(), Some(15));
    }

    #[test]
    fn add_item_exceeds_capacity() {
        let mut inv = InventoryComponent { items: std::collections::BTreeMap::new(), capacity: 10 };
        add_item(&mut inv, Kind::new("log"), 8).expect("add ok");
        let result = add_item(&mut inv, Kind::new("stone"), 5);
        assert!(result.is_err());
        assert_eq!(inv.items.get(&Kind::new("stone")), None);
    }

    #[test]
    fn remove_item_clears_key_at_zero() {
        let mut inv = empty();
        add_item(&mut inv, Kind::new("log"), 3).expect("add ok");
        remove_item(&mut inv, &Kind::new("log"), 3).expect("remove ok");
        assert_eq!(inv.items.get(&Kind::new("log")), None);
    }

    #[test]
    fn remove_item_insufficient_errors() {
        let mut inv = empty();
        add_item(&mut inv, Kind::new("log"), 1).expect("add ok");
        assert!(remove_item(&mut inv, &Kind::new("log"), 5).is_err());
    }

    #[test]
    fn has_item_checks_threshold() {
        let mut inv = empty();
        add_item(&mut inv, Kind::new("log"), 4).expect("add ok");
        assert!(has_item(&inv, &Kind::new("log"), 4));
        assert!(!has_item(&inv, &Kind::new("log"), 5));
    }

    #[test]
    fn drain_all_empties_inventory() {
        let mut inv = empty();
        add_item(&mut inv, Kind::new("log"), 3).expect("add ok");
        let dropped = drain_all(&mut inv);
        assert_eq!(dropped.get(&Kind::new("log")).copied(), Some(3));
        assert!(inv.items.is_empty());
    }

    #[test]
    fn first_item_kind_of_empty_is_none() {
        assert_eq!(first_item_kind(&empty()), None);
    }
}

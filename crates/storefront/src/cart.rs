//! The session cart.
//!
//! Each cart item is a copy of the vehicle taken at add-time. The cart lives
//! in the browser session and is discarded with it; checkout snapshots it
//! into a [`motorstand_core::Reservation`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use motorstand_core::{Vehicle, VehicleId};

/// Returned when a vehicle is added twice.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("vehicle is already in the cart")]
pub struct DuplicateItem;

/// The set of vehicles a visitor intends to reserve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Vehicle>,
}

impl Cart {
    /// Add a vehicle copy, enforcing uniqueness by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateItem`] (and leaves the cart unchanged) when a
    /// vehicle with the same id is already present.
    pub fn add(&mut self, vehicle: Vehicle) -> Result<(), DuplicateItem> {
        if self.items.iter().any(|v| v.id == vehicle.id) {
            return Err(DuplicateItem);
        }
        self.items.push(vehicle);
        Ok(())
    }

    /// Drop the item with the given id, if present.
    pub fn remove(&mut self, id: VehicleId) {
        self.items.retain(|v| v.id != id);
    }

    /// The current items, in add order.
    #[must_use]
    pub fn items(&self) -> &[Vehicle] {
        &self.items
    }

    /// Move the items out, leaving the cart empty (checkout).
    pub fn take_items(&mut self) -> Vec<Vehicle> {
        std::mem::take(&mut self.items)
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: i64) -> Vehicle {
        Vehicle {
            id: VehicleId::new(id),
            model: format!("Model {id}"),
            year: "2022".to_string(),
            description: String::new(),
            photo_url: String::new(),
        }
    }

    #[test]
    fn test_add_rejects_duplicate_and_leaves_cart_unchanged() {
        let mut cart = Cart::default();
        cart.add(vehicle(1)).expect("first add");

        let result = cart.add(vehicle(1));

        assert_eq!(result, Err(DuplicateItem));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items(), &[vehicle(1)]);
    }

    #[test]
    fn test_remove_filters_by_id() {
        let mut cart = Cart::default();
        cart.add(vehicle(1)).expect("add");
        cart.add(vehicle(2)).expect("add");

        cart.remove(VehicleId::new(1));

        assert_eq!(cart.items(), &[vehicle(2)]);

        // Removing an absent id is a no-op.
        cart.remove(VehicleId::new(42));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_take_items_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add(vehicle(1)).expect("add");
        cart.add(vehicle(2)).expect("add");

        let items = cart.take_items();

        assert_eq!(items, vec![vehicle(1), vehicle(2)]);
        assert!(cart.is_empty());
    }
}

//! Reservation records produced by cart checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Vehicle;

/// An immutable snapshot of a confirmed cart.
///
/// Reservations are append-only: once created they are never mutated, and
/// the item list is a copy of the cart at confirmation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<Vehicle>,
}

impl Reservation {
    /// Snapshot a confirmed cart into a new reservation.
    #[must_use]
    pub fn new(customer_name: String, customer_email: String, items: Vec<Vehicle>) -> Self {
        Self {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            customer_name,
            customer_email,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VehicleId;

    #[test]
    fn test_new_snapshots_items() {
        let items = vec![Vehicle {
            id: VehicleId::new(1),
            model: "Jazz".to_string(),
            year: "2020".to_string(),
            description: String::new(),
            photo_url: String::new(),
        }];

        let reservation =
            Reservation::new("Rui".to_string(), "rui@example.com".to_string(), items.clone());

        assert_eq!(reservation.customer_name, "Rui");
        assert_eq!(reservation.customer_email, "rui@example.com");
        assert_eq!(reservation.items, items);
    }

    #[test]
    fn test_new_reservations_get_distinct_ids() {
        let a = Reservation::new("A".to_string(), "a@example.com".to_string(), vec![]);
        let b = Reservation::new("B".to_string(), "b@example.com".to_string(), vec![]);
        assert_ne!(a.id, b.id);
    }
}

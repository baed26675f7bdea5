//! The append-only reservation log.

use tokio::sync::RwLock;

use motorstand_core::Reservation;

/// Reservations confirmed during this process lifetime.
///
/// Append-only: entries are never edited or removed, and the log is
/// discarded on restart.
#[derive(Debug, Default)]
pub struct ReservationLog {
    reservations: RwLock<Vec<Reservation>>,
}

impl ReservationLog {
    /// Record a confirmed reservation.
    pub async fn append(&self, reservation: Reservation) {
        self.reservations.write().await.push(reservation);
    }

    /// Clone the log, newest first, for the backoffice dashboard.
    pub async fn snapshot(&self) -> Vec<Reservation> {
        let mut reservations = self.reservations.read().await.clone();
        reservations.reverse();
        reservations
    }

    /// Number of reservations recorded.
    pub async fn len(&self) -> usize {
        self.reservations.read().await.len()
    }

    /// Whether any reservation has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.reservations.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_preserves_older_entries() {
        let log = ReservationLog::default();
        log.append(Reservation::new(
            "Ana".to_string(),
            "ana@example.com".to_string(),
            vec![],
        ))
        .await;
        log.append(Reservation::new(
            "Rui".to_string(),
            "rui@example.com".to_string(),
            vec![],
        ))
        .await;

        let snapshot = log.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        // Newest first.
        assert_eq!(snapshot[0].customer_name, "Rui");
        assert_eq!(snapshot[1].customer_name, "Ana");
    }
}

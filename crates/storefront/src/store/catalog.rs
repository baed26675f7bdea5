//! The in-memory vehicle catalog.

use tokio::sync::RwLock;

use motorstand_core::{Vehicle, VehicleDraft, VehicleId};

/// In-memory mirror of the vehicle sheet.
///
/// Filled once at startup from the remote list call, then patched after each
/// successful mutation so the storefront never needs a full reload. Mutation
/// goes through the methods below only.
#[derive(Debug, Default)]
pub struct CatalogStore {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl CatalogStore {
    /// Replace the whole collection (startup sync).
    pub async fn replace_all(&self, vehicles: Vec<Vehicle>) {
        *self.vehicles.write().await = vehicles;
    }

    /// Clone the current collection for rendering.
    pub async fn snapshot(&self) -> Vec<Vehicle> {
        self.vehicles.read().await.clone()
    }

    /// Look up one vehicle by id.
    pub async fn find(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    /// Append a newly created vehicle.
    pub async fn insert(&self, vehicle: Vehicle) {
        self.vehicles.write().await.push(vehicle);
    }

    /// Merge submitted fields into the record with the given id.
    ///
    /// Returns `false` when no record matches; every other record is left
    /// untouched either way.
    pub async fn apply_update(&self, id: VehicleId, draft: &VehicleDraft) -> bool {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.iter_mut().find(|v| v.id == id) {
            Some(vehicle) => {
                vehicle.apply(draft);
                true
            }
            None => false,
        }
    }

    /// Drop the record with the given id. Returns `false` when absent.
    pub async fn remove(&self, id: VehicleId) -> bool {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        vehicles.len() != before
    }

    /// Number of vehicles currently held.
    pub async fn len(&self) -> usize {
        self.vehicles.read().await.len()
    }

    /// Whether the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.vehicles.read().await.is_empty()
    }
}

/// Filter vehicles by case-insensitive substring match on the model name.
///
/// An empty query matches everything.
#[must_use]
pub fn search(vehicles: &[Vehicle], query: &str) -> Vec<Vehicle> {
    let needle = query.to_lowercase();
    vehicles
        .iter()
        .filter(|v| v.model.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn vehicle(id: i64, model: &str) -> Vehicle {
        Vehicle {
            id: VehicleId::new(id),
            model: model.to_string(),
            year: "2020".to_string(),
            description: format!("{model} description"),
            photo_url: format!("https://img.example/{id}.jpg"),
        }
    }

    async fn store_with(models: &[(i64, &str)]) -> CatalogStore {
        let store = CatalogStore::default();
        store
            .replace_all(models.iter().map(|(id, m)| vehicle(*id, m)).collect())
            .await;
        store
    }

    #[tokio::test]
    async fn test_apply_update_changes_exactly_the_submitted_fields() {
        let store = store_with(&[(1, "Civic"), (2, "Accord")]).await;
        let draft = VehicleDraft {
            model: "Civic Type R".to_string(),
            year: "2024".to_string(),
            description: "Hot hatch".to_string(),
            photo_url: "https://img.example/typer.jpg".to_string(),
        };

        assert!(store.apply_update(VehicleId::new(1), &draft).await);

        let updated = store.find(VehicleId::new(1)).await.unwrap();
        assert_eq!(updated.model, "Civic Type R");
        assert_eq!(updated.year, "2024");
        assert_eq!(updated.description, "Hot hatch");
        assert_eq!(updated.photo_url, "https://img.example/typer.jpg");

        // The other record is byte-for-byte unchanged.
        let other = store.find(VehicleId::new(2)).await.unwrap();
        assert_eq!(other, vehicle(2, "Accord"));
    }

    #[tokio::test]
    async fn test_apply_update_unknown_id_is_a_noop() {
        let store = store_with(&[(1, "Civic")]).await;
        let draft = VehicleDraft::default();

        assert!(!store.apply_update(VehicleId::new(99), &draft).await);
        assert_eq!(store.find(VehicleId::new(1)).await.unwrap(), vehicle(1, "Civic"));
    }

    #[tokio::test]
    async fn test_remove_drops_only_the_given_id() {
        let store = store_with(&[(1, "Civic"), (2, "Accord"), (3, "Jazz")]).await;

        assert!(store.remove(VehicleId::new(2)).await);
        assert!(!store.remove(VehicleId::new(2)).await);

        let remaining = store.snapshot().await;
        let ids: Vec<i64> = remaining.iter().map(|v| v.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(remaining[0], vehicle(1, "Civic"));
        assert_eq!(remaining[1], vehicle(3, "Jazz"));
    }

    #[tokio::test]
    async fn test_insert_appends() {
        let store = store_with(&[(1, "Civic")]).await;
        store.insert(vehicle(9, "NSX")).await;

        assert_eq!(store.len().await, 2);
        assert_eq!(store.find(VehicleId::new(9)).await.unwrap().model, "NSX");
    }

    #[test]
    fn test_search_is_case_insensitive_substring_on_model() {
        let vehicles: Vec<Vehicle> = [(1, "Civic"), (2, "Accord"), (3, "civic type r")]
            .iter()
            .map(|(id, m)| vehicle(*id, m))
            .collect();

        let hits = search(&vehicles, "CIV");
        let ids: Vec<i64> = hits.iter().map(|v| v.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);

        // Every hit actually contains the needle; every miss does not.
        for v in &vehicles {
            let matches = v.model.to_lowercase().contains("civ");
            assert_eq!(hits.iter().any(|h| h.id == v.id), matches);
        }
    }

    #[test]
    fn test_search_empty_query_matches_everything() {
        let vehicles: Vec<Vehicle> = [(1, "Civic"), (2, "Accord")]
            .iter()
            .map(|(id, m)| vehicle(*id, m))
            .collect();

        assert_eq!(search(&vehicles, "").len(), 2);
    }
}

//! The canonical vehicle record.
//!
//! The sheet API stores vehicles under inconsistent column spellings; the
//! storefront's sheet layer normalizes those on ingress/egress. Everything
//! else in the system works with this canonical shape only.

use serde::{Deserialize, Serialize};

use crate::types::VehicleId;

/// A vehicle in the dealership catalog.
///
/// The identifier is assigned by the remote catalog store on creation and is
/// stable afterwards; it is the sole key used for lookup, edit, and deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Model name, e.g. "Civic Type R".
    pub model: String,
    /// Model year. The sheet round-trips this as text, so we keep it as-is.
    pub year: String,
    pub description: String,
    pub photo_url: String,
}

impl Vehicle {
    /// Merge the fields of a submitted draft into this record.
    ///
    /// The identifier is untouched; every draft field overwrites the
    /// corresponding record field. Used after a successful remote update to
    /// patch the in-memory catalog without a full reload.
    pub fn apply(&mut self, draft: &VehicleDraft) {
        self.model = draft.model.clone();
        self.year = draft.year.clone();
        self.description = draft.description.clone();
        self.photo_url = draft.photo_url.clone();
    }
}

/// The field set submitted by the inventory form.
///
/// Used both as the create payload (the store assigns the id) and as the
/// update payload for an existing id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub model: String,
    pub year: String,
    pub description: String,
    pub photo_url: String,
}

impl VehicleDraft {
    /// Promote a draft to a full record once the store has assigned an id.
    #[must_use]
    pub fn into_vehicle(self, id: VehicleId) -> Vehicle {
        Vehicle {
            id,
            model: self.model,
            year: self.year,
            description: self.description,
            photo_url: self.photo_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> Vehicle {
        Vehicle {
            id: VehicleId::new(3),
            model: "Prelude".to_string(),
            year: "1998".to_string(),
            description: "Coupe".to_string(),
            photo_url: "https://img.example/prelude.jpg".to_string(),
        }
    }

    #[test]
    fn test_apply_overwrites_all_fields_but_id() {
        let mut v = vehicle();
        let draft = VehicleDraft {
            model: "Prelude SiR".to_string(),
            year: "1999".to_string(),
            description: "Facelift coupe".to_string(),
            photo_url: "https://img.example/sir.jpg".to_string(),
        };

        v.apply(&draft);

        assert_eq!(v.id, VehicleId::new(3));
        assert_eq!(v.model, "Prelude SiR");
        assert_eq!(v.year, "1999");
        assert_eq!(v.description, "Facelift coupe");
        assert_eq!(v.photo_url, "https://img.example/sir.jpg");
    }

    #[test]
    fn test_into_vehicle_keeps_draft_fields() {
        let draft = VehicleDraft {
            model: "NSX".to_string(),
            year: "2005".to_string(),
            description: String::new(),
            photo_url: String::new(),
        };

        let v = draft.clone().into_vehicle(VehicleId::new(11));
        assert_eq!(v.id, VehicleId::new(11));
        assert_eq!(v.model, draft.model);
        assert_eq!(v.year, draft.year);
    }
}

//! Core type definitions.

mod id;
mod reservation;
mod user;
mod vehicle;

pub use id::VehicleId;
pub use reservation::Reservation;
pub use user::User;
pub use vehicle::{Vehicle, VehicleDraft};

//! `fleetreg-core` — domain building blocks for users and their cars.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod birth_day;
pub mod car;
pub mod entity;
pub mod error;
pub mod id;
pub mod status;
pub mod user;

pub use birth_day::BirthDay;
pub use car::{Car, CarUpdate, NewCar};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CarId, UserId};
pub use status::StatusResult;
pub use user::{NewUser, User, UserUpdate};

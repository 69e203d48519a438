//! Car entity (owned by exactly one user).

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{CarId, UserId};

/// A persisted car.
///
/// `number_plate` and `vin` are unique across all cars; `owner_id` must
/// reference an existing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub number_plate: String,
    pub color: String,
    pub vin: String,
    pub owner_id: UserId,
}

impl Entity for Car {
    type Id = CarId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for inserting a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub number_plate: String,
    pub color: String,
    pub vin: String,
    pub owner_id: UserId,
}

/// Full-row replacement of an existing car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarUpdate {
    pub id: CarId,
    pub number_plate: String,
    pub color: String,
    pub vin: String,
    pub owner_id: UserId,
}

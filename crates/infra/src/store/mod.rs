//! Users-and-cars store abstraction.
//!
//! `FleetStore` is the only door to persisted users and cars. Every method
//! probes the connection first and is bounded by its own deadline (see
//! [`StoreTimeouts`](crate::timeouts::StoreTimeouts)); nothing is retried.

use async_trait::async_trait;

use fleetreg_core::{CarId, CarUpdate, NewCar, NewUser, User, UserId, UserUpdate};

use crate::error::StoreResult;

pub mod sqlite;

pub use sqlite::SqliteFleetStore;

#[async_trait]
pub trait FleetStore: Send + Sync {
    /// Create the `users` and `cars` tables if absent. Idempotent.
    async fn initialize_schema(&self) -> StoreResult<()>;

    /// Parse the birth date, hash the password and insert the user.
    async fn create_user(&self, user: NewUser) -> StoreResult<UserId>;

    /// Delete a user and, by cascade, its cars. Deleting a missing id is a no-op.
    async fn delete_user(&self, id: UserId) -> StoreResult<()>;

    /// Insert a car after checking that its owner exists.
    async fn create_car(&self, car: NewCar) -> StoreResult<CarId>;

    /// Fetch a user with every car it owns (possibly none).
    async fn get_user(&self, id: UserId) -> StoreResult<User>;

    /// Fetch a page of users in ascending id order. An exhausted page is empty.
    async fn list_users(&self, limit: u32, offset: u32) -> StoreResult<Vec<User>>;

    /// Replace every column of an existing user. The password is stored as given.
    async fn update_user(&self, user: UserUpdate) -> StoreResult<()>;

    /// Replace every column of an existing car, re-checking the owner.
    async fn update_car(&self, car: CarUpdate) -> StoreResult<()>;
}

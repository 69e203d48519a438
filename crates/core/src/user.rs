//! User entity and its write-side inputs.

use serde::{Deserialize, Serialize};

use crate::birth_day::BirthDay;
use crate::car::Car;
use crate::entity::Entity;
use crate::id::UserId;

/// A persisted user with the cars it owns.
///
/// `password` holds the stored hash and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub complete_name: String,
    pub sex: bool,
    pub birth_day: BirthDay,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Loaded on demand; not a column.
    #[serde(default)]
    pub users_cars: Vec<Car>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for inserting a user.
///
/// `birth_day` is the raw `YYYY-MM-DD` text and `password` the plaintext; the
/// store parses the former and hashes the latter before anything is written.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub complete_name: String,
    pub sex: bool,
    pub birth_day: String,
    pub password: String,
}

impl core::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NewUser")
            .field("complete_name", &self.complete_name)
            .field("sex", &self.sex)
            .field("birth_day", &self.birth_day)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Full-row replacement of an existing user.
///
/// `password` is written as given; callers hash it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: UserId,
    pub complete_name: String,
    pub sex: bool,
    pub birth_day: BirthDay,
    pub password: String,
}

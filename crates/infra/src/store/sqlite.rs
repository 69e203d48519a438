//! SQLite-backed `FleetStore`.
//!
//! All SQL text lives in this file and every statement is parameterized.
//!
//! ## Error Mapping
//!
//! | Situation | StoreError |
//! |-----------|------------|
//! | Pool closed / probe failed | `Connection` |
//! | Deadline elapsed | `Timeout` |
//! | Bad birth date, empty password | `Validation` |
//! | Owner id has no row | `Reference` |
//! | Lookup or update matched no row | `NotFound` |
//! | UNIQUE violation (plate, VIN) and anything else | `Storage` |

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{Connection, FromRow, SqlitePool};
use tracing::Instrument;

use fleetreg_auth::hash_password;
use fleetreg_core::{BirthDay, Car, CarId, CarUpdate, NewCar, NewUser, User, UserId, UserUpdate};

use super::FleetStore;
use crate::db::{self, CARS_TABLE, DatabaseConfig, USERS_TABLE};
use crate::error::{StoreError, StoreResult};
use crate::timeouts::StoreTimeouts;

const SELECT_USER: &str =
    "SELECT id, complete_name, sex, birth_day, password FROM users WHERE id = ?";

const SELECT_USER_CARS: &str = r#"
SELECT c.id, c.number_plate, c.color, c.vin, c.owner_id
FROM users u
INNER JOIN cars c ON c.owner_id = u.id
WHERE u.id = ?
ORDER BY c.id
"#;

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    complete_name: String,
    sex: bool,
    birth_day: String,
    password: String,
}

impl UserRow {
    fn into_user(self, users_cars: Vec<Car>) -> StoreResult<User> {
        let birth_day = BirthDay::parse(&self.birth_day)
            .map_err(|e| StoreError::Storage(sqlx::Error::Decode(Box::new(e))))?;
        Ok(User {
            id: UserId::new(self.id),
            complete_name: self.complete_name,
            sex: self.sex,
            birth_day,
            password: self.password,
            users_cars,
        })
    }
}

#[derive(Debug, FromRow)]
struct CarRow {
    id: i64,
    number_plate: String,
    color: String,
    vin: String,
    owner_id: i64,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: CarId::new(row.id),
            number_plate: row.number_plate,
            color: row.color,
            vin: row.vin,
            owner_id: UserId::new(row.owner_id),
        }
    }
}

/// Sole owner of the SQLite pool.
///
/// `SqlitePool` is `Send + Sync` and cheap to clone; concurrent access is left
/// to the pool and the engine's own locking.
#[derive(Debug, Clone)]
pub struct SqliteFleetStore {
    pool: SqlitePool,
    timeouts: StoreTimeouts,
}

impl SqliteFleetStore {
    pub fn new(pool: SqlitePool, timeouts: StoreTimeouts) -> Self {
        Self { pool, timeouts }
    }

    /// Connect and create the schema. A failure here is fatal for the process.
    pub async fn open(config: &DatabaseConfig, timeouts: StoreTimeouts) -> StoreResult<Self> {
        let pool = db::connect(config).await?;
        let store = Self::new(pool, timeouts);
        store.initialize_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool; later operations fail with `StoreError::Connection`.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }

    /// Lightweight liveness probe.
    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::Connection)?;
        conn.ping().await.map_err(StoreError::Connection)
    }

    /// Probe the connection, then run `work`, all within `after`.
    async fn bounded<T, F>(&self, operation: &'static str, after: Duration, work: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let guarded = async {
            self.ping().await?;
            work.await
        };

        let outcome = match tokio::time::timeout(after, guarded)
            .instrument(tracing::info_span!("store", operation))
            .await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(StoreError::Timeout { operation, after }),
        };

        if let Err(err) = &outcome {
            log_failure(operation, err);
        }
        outcome
    }

    async fn owner_exists(&self, owner_id: UserId) -> StoreResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(owner_id.get())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }

    async fn fetch_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let Some(row) = sqlx::query_as::<_, UserRow>(SELECT_USER)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let cars = sqlx::query_as::<_, CarRow>(SELECT_USER_CARS)
            .bind(id.get())
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Car::from)
            .collect();

        row.into_user(cars).map(Some)
    }
}

fn log_failure(operation: &'static str, err: &StoreError) {
    if err.is_client_error() || err.is_constraint_violation() {
        tracing::warn!(operation, error = %err, "store operation rejected");
    } else {
        tracing::error!(operation, error = %err, "store operation failed");
    }
}

#[async_trait]
impl FleetStore for SqliteFleetStore {
    async fn initialize_schema(&self) -> StoreResult<()> {
        self.bounded("initialize_schema", self.timeouts.schema, async {
            sqlx::query(USERS_TABLE).execute(&self.pool).await?;
            sqlx::query(CARS_TABLE).execute(&self.pool).await?;
            tracing::info!("schema ready");
            Ok(())
        })
        .await
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<UserId> {
        self.bounded("create_user", self.timeouts.create_user, async {
            let birth_day = BirthDay::parse(&user.birth_day)?;

            let plain = user.password.clone();
            let hash = tokio::task::spawn_blocking(move || hash_password(&plain))
                .await
                .map_err(|e| StoreError::Hashing(e.to_string()))??;

            let result = sqlx::query(
                "INSERT INTO users (complete_name, sex, birth_day, password) VALUES (?, ?, ?, ?)",
            )
            .bind(&user.complete_name)
            .bind(user.sex)
            .bind(birth_day.to_string())
            .bind(&hash)
            .execute(&self.pool)
            .await?;

            let id = UserId::new(result.last_insert_rowid());
            tracing::debug!(user_id = %id, "user inserted");
            Ok(id)
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        self.bounded("delete_user", self.timeouts.delete_user, async {
            let result = sqlx::query("DELETE FROM users WHERE id = ?")
                .bind(id.get())
                .execute(&self.pool)
                .await?;
            tracing::debug!(user_id = %id, rows = result.rows_affected(), "user delete executed");
            Ok(())
        })
        .await
    }

    async fn create_car(&self, car: NewCar) -> StoreResult<CarId> {
        self.bounded("create_car", self.timeouts.create_car, async {
            if !self.owner_exists(car.owner_id).await? {
                return Err(StoreError::Reference {
                    owner_id: car.owner_id.get(),
                });
            }

            let result = sqlx::query(
                "INSERT INTO cars (number_plate, color, vin, owner_id) VALUES (?, ?, ?, ?)",
            )
            .bind(&car.number_plate)
            .bind(&car.color)
            .bind(&car.vin)
            .bind(car.owner_id.get())
            .execute(&self.pool)
            .await?;

            let id = CarId::new(result.last_insert_rowid());
            tracing::debug!(car_id = %id, owner_id = %car.owner_id, "car inserted");
            Ok(id)
        })
        .await
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.bounded("get_user", self.timeouts.get_user, async {
            self.fetch_user(id)
                .await?
                .ok_or_else(|| StoreError::not_found("user", id))
        })
        .await
    }

    async fn list_users(&self, limit: u32, offset: u32) -> StoreResult<Vec<User>> {
        self.bounded("list_users", self.timeouts.list_users, async {
            let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM users ORDER BY id LIMIT ? OFFSET ?")
                .bind(i64::from(limit))
                .bind(i64::from(offset))
                .fetch_all(&self.pool)
                .await?;

            let mut users = Vec::with_capacity(ids.len());
            for id in ids {
                // A concurrent delete can remove a row between the two queries.
                match self.fetch_user(UserId::new(id)).await? {
                    Some(user) => users.push(user),
                    None => tracing::debug!(user_id = id, "user vanished while listing"),
                }
            }
            Ok(users)
        })
        .await
    }

    async fn update_user(&self, user: UserUpdate) -> StoreResult<()> {
        self.bounded("update_user", self.timeouts.update_user, async {
            let result = sqlx::query(
                "UPDATE users SET complete_name = ?, sex = ?, birth_day = ?, password = ? WHERE id = ?",
            )
            .bind(&user.complete_name)
            .bind(user.sex)
            .bind(user.birth_day.to_string())
            .bind(&user.password)
            .bind(user.id.get())
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found("user", user.id));
            }
            Ok(())
        })
        .await
    }

    async fn update_car(&self, car: CarUpdate) -> StoreResult<()> {
        self.bounded("update_car", self.timeouts.update_car, async {
            if !self.owner_exists(car.owner_id).await? {
                return Err(StoreError::Reference {
                    owner_id: car.owner_id.get(),
                });
            }

            let result = sqlx::query(
                "UPDATE cars SET number_plate = ?, color = ?, vin = ?, owner_id = ? WHERE id = ?",
            )
            .bind(&car.number_plate)
            .bind(&car.color)
            .bind(&car.vin)
            .bind(car.owner_id.get())
            .bind(car.id.get())
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found("car", car.id));
            }
            Ok(())
        })
        .await
    }
}

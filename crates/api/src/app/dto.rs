use serde::Deserialize;
use serde::de::DeserializeOwned;

use fleetreg_core::{CarId, NewCar, NewUser, UserId};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub complete_name: String,
    pub sex: bool,
    pub birth_day: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub id: i64,
    pub complete_name: String,
    pub sex: bool,
    pub birth_day: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCarRequest {
    pub number_plate: String,
    pub color: String,
    pub vin: String,
    pub owner_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCarRequest {
    pub id: i64,
    pub number_plate: String,
    pub color: String,
    pub vin: String,
    pub owner_id: i64,
}

/// Query string of `/delete-user`. Kept as raw text so a missing or
/// non-numeric id gets our own 400 message.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteUserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

// -------------------------
// Validation helpers
// -------------------------

/// Decode a JSON request body. The `Content-Type` header is not consulted, so
/// bare `curl -d` requests are accepted like `application/json` ones.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("request body is not valid JSON: {e}")))
}

pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request(format!("{field} is empty, fill it")));
    }
    Ok(trimmed)
}

pub fn parse_user_id(raw: Option<&str>) -> Result<UserId, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::bad_request("user_id is empty, fill it"))?;
    required("user_id", raw)?
        .parse::<UserId>()
        .map_err(|_| ApiError::bad_request("user_id is not an integer"))
}

fn page_param(field: &'static str, raw: Option<&str>) -> Result<u32, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::bad_request(format!("{field} is empty, fill it")))?;
    required(field, raw)?
        .parse::<u32>()
        .map_err(|_| ApiError::bad_request(format!("{field} must be a non-negative integer")))
}

fn positive_id(field: &'static str, value: i64) -> Result<i64, ApiError> {
    if value <= 0 {
        return Err(ApiError::bad_request(format!("{field} must be a positive integer")));
    }
    Ok(value)
}

impl AddUserRequest {
    pub fn into_new_user(self) -> Result<NewUser, ApiError> {
        let complete_name = required("complete_name", &self.complete_name)?.to_string();
        required("birth_day", &self.birth_day)?;
        if self.password.is_empty() {
            return Err(ApiError::bad_request("password is empty, fill it"));
        }
        Ok(NewUser {
            complete_name,
            sex: self.sex,
            birth_day: self.birth_day.trim().to_string(),
            password: self.password,
        })
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<UserId, ApiError> {
        let id = positive_id("id", self.id)?;
        required("complete_name", &self.complete_name)?;
        required("birth_day", &self.birth_day)?;
        if self.password.is_empty() {
            return Err(ApiError::bad_request("password is empty, fill it"));
        }
        Ok(UserId::new(id))
    }
}

impl AddCarRequest {
    pub fn into_new_car(self) -> Result<NewCar, ApiError> {
        Ok(NewCar {
            number_plate: required("number_plate", &self.number_plate)?.to_string(),
            color: required("color", &self.color)?.to_string(),
            vin: required("vin", &self.vin)?.to_string(),
            owner_id: UserId::new(positive_id("owner_id", self.owner_id)?),
        })
    }
}

impl UpdateCarRequest {
    pub fn into_car_update(self) -> Result<fleetreg_core::CarUpdate, ApiError> {
        Ok(fleetreg_core::CarUpdate {
            id: CarId::new(positive_id("id", self.id)?),
            number_plate: required("number_plate", &self.number_plate)?.to_string(),
            color: required("color", &self.color)?.to_string(),
            vin: required("vin", &self.vin)?.to_string(),
            owner_id: UserId::new(positive_id("owner_id", self.owner_id)?),
        })
    }
}

impl PageQuery {
    /// `(limit, offset)`, both required.
    pub fn parse(&self) -> Result<(u32, u32), ApiError> {
        Ok((
            page_param("limit", self.limit.as_deref())?,
            page_param("offset", self.offset.as_deref())?,
        ))
    }
}

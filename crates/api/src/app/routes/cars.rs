use std::sync::Arc;

use axum::{body::Bytes, extract::Extension};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::response::{Payload, Reply};
use crate::app::services::AppServices;

pub async fn add_car(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<Reply, ApiError> {
    let body: dto::AddCarRequest = dto::decode_body(&body)?;
    let new_car = body.into_new_car()?;

    let id = services.store().create_car(new_car).await?;
    tracing::info!(car_id = %id, "car added");

    Ok(Reply::ok(Payload::ok("Car Added")))
}

pub async fn update_car(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<Reply, ApiError> {
    let body: dto::UpdateCarRequest = dto::decode_body(&body)?;
    let update = body.into_car_update()?;
    let id = update.id;

    services.store().update_car(update).await?;
    tracing::info!(car_id = %id, "car updated");

    Ok(Reply::ok(Payload::ok("Car Updated")))
}

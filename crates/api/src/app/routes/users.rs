use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
};

use fleetreg_core::{BirthDay, UserUpdate};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::response::{Payload, Reply};
use crate::app::services::AppServices;

pub async fn add_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<Reply, ApiError> {
    let body: dto::AddUserRequest = dto::decode_body(&body)?;
    let new_user = body.into_new_user()?;

    // The store hashes the password before the row is written.
    let id = services.store().create_user(new_user).await?;
    tracing::info!(user_id = %id, "user added");

    Ok(Reply::ok(Payload::ok("User Added")))
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<Reply, ApiError> {
    let body: dto::UpdateUserRequest = dto::decode_body(&body)?;
    let id = body.validate()?;
    let birth_day = BirthDay::parse(&body.birth_day)?;

    // Updates persist the password as given, so hash it here.
    let plain = body.password;
    let password = tokio::task::spawn_blocking(move || fleetreg_auth::hash_password(&plain))
        .await
        .map_err(|e| ApiError::Internal(format!("password hashing task failed: {e}")))??;

    services
        .store()
        .update_user(UserUpdate {
            id,
            complete_name: body.complete_name.trim().to_string(),
            sex: body.sex,
            birth_day,
            password,
        })
        .await?;
    tracing::info!(user_id = %id, "user updated");

    Ok(Reply::ok(Payload::ok("User Updated")))
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DeleteUserQuery>,
) -> Result<Reply, ApiError> {
    let id = dto::parse_user_id(query.user_id.as_deref())?;

    services.store().delete_user(id).await?;
    tracing::info!(user_id = %id, "user deleted");

    Ok(Reply::ok(Payload::ok("User Deleted")))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> Result<Reply, ApiError> {
    let id = dto::parse_user_id(Some(&user_id))?;
    let user = services.store().get_user(id).await?;
    Ok(Reply::ok(Payload::Entity(user)))
}

pub async fn get_all_users(
    Extension(services): Extension<Arc<AppServices>>,
    Query(page): Query<dto::PageQuery>,
) -> Result<Reply, ApiError> {
    let (limit, offset) = page.parse()?;
    let users = services.store().list_users(limit, offset).await?;
    Ok(Reply::ok(Payload::EntityList(users)))
}

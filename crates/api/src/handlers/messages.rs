//! Handlers for the `/messages` resource (customer support desk).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use herbanet_core::error::CoreError;
use herbanet_core::privileges::MANAGE_MESSAGES;
use herbanet_core::support;
use herbanet_core::types::DbId;
use herbanet_db::models::message::{CreateMessage, CustomerMessage};
use herbanet_db::repositories::MessageRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::privileges::require_privilege;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitMessageRequest {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
}

/// Request body for `POST /messages/{id}/reply`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplyRequest {
    #[validate(length(min = 1))]
    pub reply: String,
}

/// Query string for `GET /messages`.
#[derive(Debug, Deserialize)]
pub struct MessageFilter {
    pub status: Option<String>,
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/messages
///
/// Submit a message to the desk. Any authenticated user.
pub async fn submit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SubmitMessageRequest>,
) -> AppResult<(StatusCode, Json<CustomerMessage>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let create_dto = CreateMessage {
        user_id: auth_user.user_id,
        subject: input.subject,
        body: input.body,
    };

    let message = MessageRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /api/v1/messages/{id}/reply
///
/// Staff reply: stores the reply text and resolves the message. Requires
/// `MANAGE_MESSAGES`.
pub async fn reply(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReplyRequest>,
) -> AppResult<Json<CustomerMessage>> {
    require_privilege(&state, &auth_user, MANAGE_MESSAGES).await?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let replied = MessageRepo::reply(&state.pool, id, &input.reply).await?;
    if !replied {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CustomerMessage",
            id,
        }));
    }

    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CustomerMessage",
            id,
        }))?;

    Ok(Json(message))
}

/// GET /api/v1/messages?status=..&user_id=..
///
/// Desk view of messages, optionally filtered. Requires `MANAGE_MESSAGES`.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filter): Query<MessageFilter>,
) -> AppResult<Json<Vec<CustomerMessage>>> {
    require_privilege(&state, &auth_user, MANAGE_MESSAGES).await?;

    let messages = match (&filter.status, filter.user_id) {
        (Some(status), _) => {
            support::validate_message_status(status)?;
            MessageRepo::list_by_status(&state.pool, status).await?
        }
        (None, Some(user_id)) => MessageRepo::list_for_user(&state.pool, user_id).await?,
        (None, None) => MessageRepo::list(&state.pool).await?,
    };

    Ok(Json(messages))
}

/// GET /api/v1/messages/mine
///
/// The caller's own messages.
pub async fn list_mine(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<CustomerMessage>>> {
    let messages = MessageRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(messages))
}

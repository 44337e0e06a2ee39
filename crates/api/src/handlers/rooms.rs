//! Handlers for the `/rooms` and `/categories` resources.
//!
//! The room catalog and availability search are public; mutations require
//! the `MANAGE_ROOMS` privilege.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use herbanet_core::booking::{self, RoomStatus};
use herbanet_core::error::CoreError;
use herbanet_core::privileges::MANAGE_ROOMS;
use herbanet_core::types::DbId;
use herbanet_db::models::category::RoomCategory;
use herbanet_db::models::room::{CreateRoom, RoomDetail, RoomResponse, UpdateRoom};
use herbanet_db::repositories::{CategoryRepo, RoomRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::privileges::require_privilege;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string for availability search and cost quotes.
#[derive(Debug, Deserialize)]
pub struct StayQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Request body for `POST /rooms`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 10))]
    pub room_number: String,
    pub category_id: DbId,
    #[serde(default)]
    pub floor: i32,
    pub view_type: Option<String>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub rate_override: Option<f64>,
}

/// Request body for `PUT /rooms/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// Response body for `GET /rooms/{id}/quote`.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub room_id: DbId,
    pub room_number: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub nightly_rate: f64,
    pub total_cost: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/rooms
///
/// The full room catalog with category and resolved nightly rate.
pub async fn list_rooms(State(state): State<AppState>) -> AppResult<Json<Vec<RoomResponse>>> {
    let rooms = RoomRepo::list(&state.pool).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// GET /api/v1/rooms/available?check_in=..&check_out=..
///
/// Rooms bookable for the requested range: AVAILABLE now and free of any
/// overlapping non-cancelled reservation.
pub async fn search_available(
    State(state): State<AppState>,
    Query(query): Query<StayQuery>,
) -> AppResult<Json<Vec<RoomResponse>>> {
    booking::validate_date_range(query.check_in, query.check_out)?;

    let rooms = RoomRepo::find_available(&state.pool, query.check_in, query.check_out).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// GET /api/v1/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RoomResponse>> {
    let room = load_room(&state, id).await?;
    Ok(Json(RoomResponse::from(room)))
}

/// GET /api/v1/rooms/{id}/quote?check_in=..&check_out=..
///
/// Deterministic stay-cost quote: `nights × nightly_rate`. The cost is
/// computed on demand and never stored.
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<StayQuery>,
) -> AppResult<Json<QuoteResponse>> {
    booking::validate_date_range(query.check_in, query.check_out)?;

    let room = load_room(&state, id).await?;

    let nightly_rate = room.nightly_rate();
    if nightly_rate <= 0.0 {
        // A rate of zero is a data-quality problem, never a free stay.
        return Err(AppError::Core(CoreError::Validation(format!(
            "Room {} has no nightly rate configured",
            room.room_number
        ))));
    }

    let nights = booking::nights(query.check_in, query.check_out);
    Ok(Json(QuoteResponse {
        room_id: room.id,
        room_number: room.room_number,
        check_in: query.check_in,
        check_out: query.check_out,
        nights,
        nightly_rate,
        total_cost: booking::stay_cost(nights, nightly_rate),
    }))
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RoomCategory>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/v1/rooms
///
/// Create a room. Requires `MANAGE_ROOMS`. A room-number collision
/// surfaces as a duplicate-key conflict.
pub async fn create_room(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<RoomResponse>)> {
    require_privilege(&state, &auth_user, MANAGE_ROOMS).await?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if let Some(rate) = input.rate_override {
        if rate < 0.0 {
            return Err(AppError::Core(CoreError::Validation(
                "Rate override must not be negative".into(),
            )));
        }
    }

    let category = CategoryRepo::find_by_id(&state.pool, input.category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RoomCategory",
            id: input.category_id,
        }))?;

    let create_dto = CreateRoom {
        room_number: input.room_number,
        category_id: category.id,
        floor: input.floor,
        view_type: input.view_type,
        photo_url: input.photo_url,
        description: input.description,
        rate_override: input.rate_override,
    };

    let room = RoomRepo::create(&state.pool, &create_dto).await?;
    let detail = load_room(&state, room.id).await?;

    Ok((StatusCode::CREATED, Json(RoomResponse::from(detail))))
}

/// PUT /api/v1/rooms/{id}
///
/// Update a room's master data. Requires `MANAGE_ROOMS`. Status is not
/// updatable here; see `set_status`.
pub async fn update_room(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<Json<RoomResponse>> {
    require_privilege(&state, &auth_user, MANAGE_ROOMS).await?;

    if let Some(category_id) = input.category_id {
        CategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "RoomCategory",
                id: category_id,
            }))?;
    }

    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;

    let detail = load_room(&state, room.id).await?;
    Ok(Json(RoomResponse::from(detail)))
}

/// PUT /api/v1/rooms/{id}/status
///
/// Manual status override for housekeeping. Requires `MANAGE_ROOMS`.
/// Only AVAILABLE, MAINTENANCE, and CLEANING may be set by hand --
/// RESERVED and OCCUPIED are owned by the reservation lifecycle.
pub async fn set_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<RoomResponse>> {
    require_privilege(&state, &auth_user, MANAGE_ROOMS).await?;

    let status = RoomStatus::parse(&input.status)?;
    if !status.is_manual_override() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Status {} is managed by the booking lifecycle and cannot be set manually",
            status.as_str()
        ))));
    }

    let updated = RoomRepo::update_status(&state.pool, id, status.as_str()).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Room", id }));
    }

    let detail = load_room(&state, id).await?;
    Ok(Json(RoomResponse::from(detail)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a room with its category or fail with 404.
async fn load_room(state: &AppState, id: DbId) -> AppResult<RoomDetail> {
    RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))
}

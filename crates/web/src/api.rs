//! JSON API handlers for habit CRUD and per-day log saves.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use habit_core::model::HabitId;
use services::HabitView;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SaveLogRequest {
    pub habit_id: u64,
    pub day: u32,
    pub status: bool,
}

/// Stats fragment returned after a save so the page can update its
/// tiles without a reload.
#[derive(Debug, Serialize)]
pub struct SaveLogResponse {
    pub success: bool,
    pub completed_today: usize,
    pub today_progress: u32,
    pub monthly_progress: u32,
}

pub async fn save_habit_log(
    State(state): State<AppState>,
    body: Result<Json<SaveLogRequest>, JsonRejection>,
) -> Result<Json<SaveLogResponse>, ApiError> {
    let Json(req) = body?;

    state
        .services
        .log_service()
        .upsert_log(HabitId::new(req.habit_id), req.day, req.status)
        .await?;

    let view = state.services.dashboard_service().dashboard().await?;
    Ok(Json(SaveLogResponse {
        success: true,
        completed_today: view.completed_today,
        today_progress: view.today_progress,
        monthly_progress: view.monthly_progress,
    }))
}

#[derive(Debug, Deserialize)]
pub struct HabitRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HabitResponse {
    pub success: bool,
    pub habit: HabitView,
}

pub async fn create_habit(
    State(state): State<AppState>,
    body: Result<Json<HabitRequest>, JsonRejection>,
) -> Result<Json<HabitResponse>, ApiError> {
    let Json(req) = body?;

    let habit = state.services.habit_service().add_habit(req.name).await?;
    Ok(Json(HabitResponse {
        success: true,
        habit: HabitView::from_habit(&habit),
    }))
}

pub async fn rename_habit(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<HabitRequest>, JsonRejection>,
) -> Result<Json<HabitResponse>, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;

    let habit = state
        .services
        .habit_service()
        .rename_habit(HabitId::new(id), req.name)
        .await?;
    Ok(Json(HabitResponse {
        success: true,
        habit: HabitView::from_habit(&habit),
    }))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

pub async fn delete_habit(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id?;

    state
        .services
        .habit_service()
        .delete_habit(HabitId::new(id))
        .await?;
    Ok(Json(DeleteResponse { success: true }))
}

use axum::{Json, extract::State};

use crate::{
    error::AppError,
    repos::instructor_repo::{self, InstructorRow},
    state::AppState,
};

pub async fn list_instructors(
    State(state): State<AppState>,
) -> Result<Json<Vec<InstructorRow>>, AppError> {
    let instructors = instructor_repo::list(state.store.as_ref()).await?;
    Ok(Json(instructors))
}

use axum::extract::{Json, State, rejection::JsonRejection};
use tracing::Instrument;
use uuid::Uuid;

use super::model::generate_hashtags;
use crate::{
    AppState,
    error::AppError,
    models::{GenerationRequest, GenerationResponse},
};

#[axum::debug_handler]
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!("Rejected generation body: {}", rejection.body_text());
        AppError::Validation(format!("Invalid request: {}", rejection.body_text()))
    })?;

    let span = tracing::info_span!(
        "generate",
        request_id = %Uuid::new_v4(),
        platform = %req.platform,
        strategy = %req.strategy
    );

    async move {
        let hashtags = generate_hashtags(state.completion.as_ref(), &req).await?;
        tracing::info!("Generated {} hashtags", hashtags.len());
        Ok::<_, AppError>(Json(GenerationResponse::success(hashtags)))
    }
    .instrument(span)
    .await
}

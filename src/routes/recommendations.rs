use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{PodcastRecommendation, RecommendationRequest},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<PodcastRecommendation>>> {
    tracing::info!(
        request_id = %request_id,
        user_id = request.user_id,
        "Processing recommendation request"
    );

    let recommendations = recommendations::get_recommended_podcasts(
        state.store.as_ref(),
        state.inference.as_ref(),
        request.user_id,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(recommendations))
}

use std::collections::HashSet;
use std::time::Instant;

use crate::{
    db::ContentStore,
    error::{AppError, AppResult},
    models::{Podcast, PodcastRecommendation, UserFavourites},
    services::{inference::InferenceClient, prompt, reconciler, response_parser},
};

/// Generates AI-backed podcast recommendations for a user
///
/// Runs prompt building, inference, response parsing and reconciliation in
/// sequence. An unknown user fails with [`AppError::UserNotFound`] before
/// any inference call. A user who has favourited every podcast gets an empty
/// list without inference. Every other failure is logged and reported as
/// [`AppError::RecommendationFailure`].
pub async fn get_recommended_podcasts(
    store: &dyn ContentStore,
    inference: &dyn InferenceClient,
    user_id: i64,
) -> AppResult<Vec<PodcastRecommendation>> {
    let start = Instant::now();

    let user = match store.find_user_with_favourites(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!(user_id, "Recommendation requested for unknown user");
            return Err(AppError::UserNotFound);
        }
        Err(e) => {
            tracing::error!(user_id, error = %e, "Error in AI podcast recommendation");
            return Err(AppError::RecommendationFailure);
        }
    };

    match recommend_for(store, inference, &user).await {
        Ok(recommendations) => {
            tracing::info!(
                user_id,
                recommended = recommendations.len(),
                processing_time_ms = start.elapsed().as_millis(),
                "Recommendations generated"
            );
            Ok(recommendations)
        }
        Err(e) => {
            tracing::error!(user_id, error = %e, "Error in AI podcast recommendation");
            Err(AppError::RecommendationFailure)
        }
    }
}

async fn recommend_for(
    store: &dyn ContentStore,
    inference: &dyn InferenceClient,
    user: &UserFavourites,
) -> AppResult<Vec<PodcastRecommendation>> {
    let favourite_categories = prompt::distinct_categories(
        user.favourite_podcasts
            .iter()
            .map(|p| p.category.as_deref()),
    );
    let favourite_ids: HashSet<i64> = user.favourite_podcasts.iter().map(|p| p.id).collect();

    let all_podcasts = store.list_podcasts().await?;

    let candidates: Vec<&Podcast> = all_podcasts
        .iter()
        .filter(|p| !favourite_ids.contains(&p.id))
        .collect();

    if candidates.is_empty() {
        tracing::info!(user_id = user.id, "No candidate podcasts left to recommend");
        return Ok(Vec::new());
    }

    tracing::debug!(
        user_id = user.id,
        candidates = candidates.len(),
        favourite_categories = ?favourite_categories,
        provider = inference.name(),
        "Requesting recommendations"
    );

    let prompt_text = prompt::build_prompt(&favourite_categories, &candidates);
    let raw = inference.infer(&prompt_text).await?;
    let titles = response_parser::parse(&raw)?;

    if titles.len() != prompt::RECOMMENDATION_COUNT {
        tracing::debug!(
            expected = prompt::RECOMMENDATION_COUNT,
            returned = titles.len(),
            "Model returned an unexpected number of titles"
        );
    }

    Ok(reconciler::reconcile(&all_podcasts, &favourite_ids, &titles))
}

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    error::AppError,
    middleware::RequestId,
    models::{NewArtist, NewPodcast, RegisterUserInput},
    routes::AppState,
    services::{recommendations, registration},
};

use super::types::{
    invalid_id, parse_id, ArtistInfo, CreatePodcastInput, PodcastObject,
    PodcastRecommendationObject, RegisterResponseObject,
};

fn request_id(ctx: &Context<'_>) -> String {
    ctx.data_opt::<RequestId>()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// AI-picked podcasts for a user, based on the categories of their favourites
    async fn get_recommended_podcasts(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
    ) -> Result<Option<Vec<Option<PodcastRecommendationObject>>>> {
        let state = ctx.data::<AppState>()?;
        let request_id = request_id(ctx);

        tracing::info!(request_id = %request_id, user_id = %user_id.as_str(), "Processing recommendation query");

        let Some(user_id) = parse_id(&user_id) else {
            return Err(AppError::UserNotFound.extend());
        };

        let recommendations = recommendations::get_recommended_podcasts(
            state.store.as_ref(),
            state.inference.as_ref(),
            user_id,
        )
        .await
        .map_err(|e| e.extend())?;

        Ok(Some(
            recommendations
                .into_iter()
                .map(|r| Some(PodcastRecommendationObject::from(r)))
                .collect(),
        ))
    }

    /// Every podcast with its artist
    async fn podcasts(&self, ctx: &Context<'_>) -> Result<Vec<PodcastObject>> {
        let state = ctx.data::<AppState>()?;
        let podcasts = state.store.list_podcasts().await.map_err(|e| e.extend())?;
        Ok(podcasts.into_iter().map(PodcastObject::from).collect())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        password: String,
    ) -> Result<Option<RegisterResponseObject>> {
        let state = ctx.data::<AppState>()?;

        tracing::info!(request_id = %request_id(ctx), "Processing registration");

        let response = registration::register_user(
            state.store.as_ref(),
            RegisterUserInput {
                name,
                email,
                password,
            },
        )
        .await
        .map_err(|e| e.extend())?;

        Ok(Some(RegisterResponseObject {
            user: Some(response.user.into()),
        }))
    }

    async fn create_artist(
        &self,
        ctx: &Context<'_>,
        name: String,
        bio: Option<String>,
        photo: Option<String>,
    ) -> Result<ArtistInfo> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput("name is required".to_string()).extend());
        }

        let state = ctx.data::<AppState>()?;
        let artist = state
            .store
            .create_artist(NewArtist { name, bio, photo })
            .await
            .map_err(|e| e.extend())?;

        Ok(artist.into())
    }

    async fn create_podcast(
        &self,
        ctx: &Context<'_>,
        input: CreatePodcastInput,
    ) -> Result<PodcastObject> {
        let state = ctx.data::<AppState>()?;
        let new_podcast = NewPodcast::try_from(input).map_err(|e| e.extend())?;
        let podcast = state
            .store
            .create_podcast(new_podcast)
            .await
            .map_err(|e| e.extend())?;

        Ok(podcast.into())
    }

    /// Adds a podcast to a user's favourites; idempotent
    async fn add_favourite_podcast(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        podcast_id: ID,
    ) -> Result<bool> {
        let state = ctx.data::<AppState>()?;
        let user = parse_id(&user_id).ok_or_else(|| invalid_id("userId", &user_id).extend())?;
        let podcast =
            parse_id(&podcast_id).ok_or_else(|| invalid_id("podcastId", &podcast_id).extend())?;

        state
            .store
            .add_favourite(user, podcast)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }
}

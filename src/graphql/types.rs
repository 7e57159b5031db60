use async_graphql::{ComplexObject, Context, ErrorExtensions, InputObject, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::{Artist, NewPodcast, Podcast, PodcastRecommendation, PodcastType, User},
    routes::AppState,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "ArtistInfo")]
pub struct ArtistInfo {
    pub id: ID,
    pub name: String,
    pub bio: Option<String>,
    pub photo: Option<String>,
}

impl From<Artist> for ArtistInfo {
    fn from(artist: Artist) -> Self {
        Self {
            id: ID::from(artist.id.to_string()),
            name: artist.name,
            bio: artist.bio,
            photo: artist.photo,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "PodcastRecommendation")]
pub struct PodcastRecommendationObject {
    pub id: ID,
    pub title: String,
    #[graphql(name = "video_uri")]
    pub video_uri: Option<String>,
    pub artwork: Option<String>,
    pub lyricist: Option<String>,
    #[graphql(name = "type")]
    pub podcast_type: String,
    #[graphql(name = "audio_uri")]
    pub audio_uri: Option<String>,
    pub artist: Option<ArtistInfo>,
    pub is_favourite: bool,
}

impl From<PodcastRecommendation> for PodcastRecommendationObject {
    fn from(rec: PodcastRecommendation) -> Self {
        Self {
            id: ID::from(rec.id.to_string()),
            title: rec.title,
            video_uri: rec.video_uri,
            artwork: rec.artwork,
            lyricist: rec.lyricist,
            podcast_type: rec.podcast_type.to_string(),
            audio_uri: rec.audio_uri,
            artist: Some(rec.artist.into()),
            is_favourite: rec.is_favourite,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub is_admin: bool,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID::from(user.id.to_string()),
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "RegisterResponse")]
pub struct RegisterResponseObject {
    pub user: Option<UserObject>,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Podcast", complex)]
pub struct PodcastObject {
    pub id: ID,
    pub title: String,
    pub category: Option<String>,
    pub video_url: Option<String>,
    pub artwork: Option<String>,
    pub lyricist: Option<String>,
    #[graphql(name = "type")]
    pub podcast_type: String,
    pub audio_url: Option<String>,
    pub artist: Option<ArtistInfo>,
    #[graphql(skip)]
    pub podcast_id: i64,
}

#[ComplexObject]
impl PodcastObject {
    /// Number of users who have this podcast among their favourites
    async fn favourited_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let state = ctx.data::<AppState>()?;
        state
            .store
            .count_favourited_by(self.podcast_id)
            .await
            .map_err(|e| e.extend())
    }
}

impl From<Podcast> for PodcastObject {
    fn from(podcast: Podcast) -> Self {
        Self {
            id: ID::from(podcast.id.to_string()),
            title: podcast.title,
            category: podcast.category,
            video_url: podcast.video_url,
            artwork: podcast.artwork,
            lyricist: podcast.lyricist,
            podcast_type: podcast.podcast_type.to_string(),
            audio_url: podcast.audio_url,
            artist: podcast.artist.map(ArtistInfo::from),
            podcast_id: podcast.id,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreatePodcastInput {
    pub title: String,
    pub category: Option<String>,
    pub video_url: Option<String>,
    pub artwork: Option<String>,
    pub lyricist: Option<String>,
    /// `audio` (default) or `video`
    #[graphql(name = "type")]
    pub podcast_type: Option<String>,
    pub audio_url: Option<String>,
    pub artist_id: Option<ID>,
}

impl TryFrom<CreatePodcastInput> for NewPodcast {
    type Error = AppError;

    fn try_from(input: CreatePodcastInput) -> Result<Self, Self::Error> {
        if input.title.trim().is_empty() {
            return Err(AppError::InvalidInput("title is required".to_string()));
        }

        let podcast_type = match input.podcast_type.as_deref() {
            Some(value) => value.parse::<PodcastType>().map_err(AppError::InvalidInput)?,
            None => PodcastType::default(),
        };

        let artist_id = input
            .artist_id
            .map(|id| parse_id(&id).ok_or_else(|| invalid_id("artistId", &id)))
            .transpose()?;

        Ok(NewPodcast {
            title: input.title,
            category: input.category,
            video_url: input.video_url,
            artwork: input.artwork,
            lyricist: input.lyricist,
            podcast_type,
            audio_url: input.audio_url,
            artist_id,
        })
    }
}

/// Store ids are integers; anything else cannot match a record
pub fn parse_id(id: &ID) -> Option<i64> {
    id.parse::<i64>().ok()
}

pub fn invalid_id(field: &str, id: &ID) -> AppError {
    AppError::InvalidInput(format!("{} '{}' is not a valid id", field, id.as_str()))
}

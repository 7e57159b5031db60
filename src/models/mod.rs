use serde::Deserialize;

pub mod podcast;
pub mod user;

pub use podcast::{
    Artist, NewArtist, NewPodcast, Podcast, PodcastRecommendation, PodcastType,
    FALLBACK_ARTIST_ID,
};
pub use user::{
    FavouritePodcast, NewUser, RegisterResponse, RegisterUserInput, User, UserFavourites,
};

/// Request for personalised podcast recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: i64,
}

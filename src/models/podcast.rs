use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Artist substituted when a recommended podcast has none
pub const FALLBACK_ARTIST_ID: i64 = 123;
const FALLBACK_ARTIST_NAME: &str = "Silent Thoughts";
const FALLBACK_ARTIST_BIO: &str = "internal musings that remain unspoken, a common experience where individuals ponder ideas, feelings, or memories without verbalizing them";
const FALLBACK_ARTIST_PHOTO: &str =
    "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRLhzlZaT0RLxRS18nkRApATQflrRNYBee84A&s";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub photo: Option<String>,
}

impl Artist {
    pub fn fallback() -> Self {
        Self {
            id: FALLBACK_ARTIST_ID,
            name: FALLBACK_ARTIST_NAME.to_string(),
            bio: Some(FALLBACK_ARTIST_BIO.to_string()),
            photo: Some(FALLBACK_ARTIST_PHOTO.to_string()),
        }
    }
}

/// Media kind of a podcast episode
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PodcastType {
    #[default]
    Audio,
    Video,
}

impl PodcastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PodcastType::Audio => "audio",
            PodcastType::Video => "video",
        }
    }
}

impl Display for PodcastType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PodcastType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(PodcastType::Audio),
            "video" => Ok(PodcastType::Video),
            other => Err(format!("unknown podcast type '{}'", other)),
        }
    }
}

/// A podcast with its artist projection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Podcast {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub video_url: Option<String>,
    pub artwork: Option<String>,
    pub lyricist: Option<String>,
    #[serde(rename = "type")]
    pub podcast_type: PodcastType,
    pub audio_url: Option<String>,
    pub artist: Option<Artist>,
}

impl Podcast {
    /// Bare podcast with only a title, everything optional left empty
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            category: None,
            video_url: None,
            artwork: None,
            lyricist: None,
            podcast_type: PodcastType::default(),
            audio_url: None,
            artist: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub bio: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewPodcast {
    pub title: String,
    pub category: Option<String>,
    pub video_url: Option<String>,
    pub artwork: Option<String>,
    pub lyricist: Option<String>,
    pub podcast_type: PodcastType,
    pub audio_url: Option<String>,
    pub artist_id: Option<i64>,
}

/// A recommended podcast returned to the client
///
/// Unlike [`Podcast`], the artist is always present: podcasts without one
/// carry [`Artist::fallback`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PodcastRecommendation {
    pub id: i64,
    pub title: String,
    pub video_uri: Option<String>,
    pub artwork: Option<String>,
    pub lyricist: Option<String>,
    #[serde(rename = "type")]
    pub podcast_type: PodcastType,
    pub audio_uri: Option<String>,
    pub artist: Artist,
    #[serde(rename = "isFavourite")]
    pub is_favourite: bool,
}

impl PodcastRecommendation {
    pub fn from_podcast(podcast: &Podcast, is_favourite: bool) -> Self {
        Self {
            id: podcast.id,
            title: podcast.title.clone(),
            video_uri: podcast.video_url.clone(),
            artwork: podcast.artwork.clone(),
            lyricist: podcast.lyricist.clone(),
            podcast_type: podcast.podcast_type,
            audio_uri: podcast.audio_url.clone(),
            artist: podcast.artist.clone().unwrap_or_else(Artist::fallback),
            is_favourite,
        }
    }
}

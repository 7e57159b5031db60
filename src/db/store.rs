use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    models::{
        Artist, FavouritePodcast, NewArtist, NewPodcast, NewUser, Podcast, PodcastType, User,
        UserFavourites,
    },
};

/// Typed access to users, podcasts and artists
///
/// One method per operation the resolvers need. Implementations own
/// filtering and consistency; callers treat the store as a black box.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Inserts a user; a taken email yields [`AppError::DuplicateUser`]
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    /// Fetches a user id together with the id, title and category of each favourite
    async fn find_user_with_favourites(&self, user_id: i64) -> AppResult<Option<UserFavourites>>;

    /// Fetches every podcast with its artist, ordered by id
    async fn list_podcasts(&self) -> AppResult<Vec<Podcast>>;

    /// Number of users who have favourited the podcast
    async fn count_favourited_by(&self, podcast_id: i64) -> AppResult<i64>;

    async fn create_artist(&self, artist: NewArtist) -> AppResult<Artist>;

    async fn create_podcast(&self, podcast: NewPodcast) -> AppResult<Podcast>;

    /// Marks a podcast as favourite; repeating the call is a no-op
    async fn add_favourite(&self, user_id: i64, podcast_id: i64) -> AppResult<()>;
}

const PODCAST_SELECT: &str = r#"
    SELECT p.id, p.title, p.category, p.video_url, p.artwork, p.lyricist,
           p.type AS podcast_type, p.audio_url,
           a.id AS artist_id, a.name AS artist_name, a.bio AS artist_bio, a.photo AS artist_photo
    FROM podcasts p
    LEFT JOIN artists a ON a.id = p.artist_id
"#;

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    is_admin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            is_admin: row.is_admin,
        }
    }
}

#[derive(Debug, FromRow)]
struct PodcastRow {
    id: i64,
    title: String,
    category: Option<String>,
    video_url: Option<String>,
    artwork: Option<String>,
    lyricist: Option<String>,
    podcast_type: String,
    audio_url: Option<String>,
    artist_id: Option<i64>,
    artist_name: Option<String>,
    artist_bio: Option<String>,
    artist_photo: Option<String>,
}

impl TryFrom<PodcastRow> for Podcast {
    type Error = AppError;

    fn try_from(row: PodcastRow) -> Result<Self, Self::Error> {
        let podcast_type = row
            .podcast_type
            .parse::<PodcastType>()
            .map_err(AppError::Internal)?;

        let artist = match (row.artist_id, row.artist_name) {
            (Some(id), Some(name)) => Some(Artist {
                id,
                name,
                bio: row.artist_bio,
                photo: row.artist_photo,
            }),
            _ => None,
        };

        Ok(Podcast {
            id: row.id,
            title: row.title,
            category: row.category,
            video_url: row.video_url,
            artwork: row.artwork,
            lyricist: row.lyricist,
            podcast_type,
            audio_url: row.audio_url,
            artist,
        })
    }
}

#[derive(Debug, FromRow)]
struct FavouriteRow {
    id: i64,
    title: String,
    category: Option<String>,
}

/// [`ContentStore`] backed by SQLite
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_podcast(&self, podcast_id: i64) -> AppResult<Podcast> {
        let sql = format!("{} WHERE p.id = ?", PODCAST_SELECT);
        let row: Option<PodcastRow> = sqlx::query_as(&sql)
            .bind(podcast_id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| AppError::NotFound(format!("podcast {}", podcast_id)))?
            .try_into()
    }
}

#[async_trait::async_trait]
impl ContentStore for SqliteStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, created_at, is_admin FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password_hash, created_at, is_admin)
            VALUES (?, ?, ?, ?, 0)
            RETURNING id, name, email, created_at, is_admin
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::DuplicateUser,
            other => AppError::from(other),
        })?;

        tracing::info!(user_id = row.id, "User created");

        Ok(row.into())
    }

    async fn find_user_with_favourites(&self, user_id: i64) -> AppResult<Option<UserFavourites>> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(id) = exists else {
            return Ok(None);
        };

        let rows: Vec<FavouriteRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.title, p.category
            FROM podcasts p
            JOIN user_favourite_podcasts f ON f.podcast_id = p.id
            WHERE f.user_id = ?
            ORDER BY p.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let favourite_podcasts = rows
            .into_iter()
            .map(|row| FavouritePodcast {
                id: row.id,
                title: row.title,
                category: row.category,
            })
            .collect();

        Ok(Some(UserFavourites {
            id,
            favourite_podcasts,
        }))
    }

    async fn list_podcasts(&self) -> AppResult<Vec<Podcast>> {
        let sql = format!("{} ORDER BY p.id", PODCAST_SELECT);
        let rows: Vec<PodcastRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(Podcast::try_from).collect()
    }

    async fn count_favourited_by(&self, podcast_id: i64) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_favourite_podcasts WHERE podcast_id = ?")
                .bind(podcast_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn create_artist(&self, artist: NewArtist) -> AppResult<Artist> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO artists (name, bio, photo) VALUES (?, ?, ?) RETURNING id")
                .bind(&artist.name)
                .bind(&artist.bio)
                .bind(&artist.photo)
                .fetch_one(&self.pool)
                .await?;

        Ok(Artist {
            id,
            name: artist.name,
            bio: artist.bio,
            photo: artist.photo,
        })
    }

    async fn create_podcast(&self, podcast: NewPodcast) -> AppResult<Podcast> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO podcasts (title, audio_url, video_url, artwork, lyricist, category, type, artist_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&podcast.title)
        .bind(&podcast.audio_url)
        .bind(&podcast.video_url)
        .bind(&podcast.artwork)
        .bind(&podcast.lyricist)
        .bind(&podcast.category)
        .bind(podcast.podcast_type.as_str())
        .bind(podcast.artist_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::NotFound(format!("artist {}", podcast.artist_id.unwrap_or_default()))
            }
            other => AppError::from(other),
        })?;

        self.find_podcast(id).await
    }

    async fn add_favourite(&self, user_id: i64, podcast_id: i64) -> AppResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO user_favourite_podcasts (user_id, podcast_id) VALUES (?, ?)",
        )
        .bind(user_id)
        .bind(podcast_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => AppError::NotFound(
                format!("user {} or podcast {}", user_id, podcast_id),
            ),
            other => AppError::from(other),
        })?;

        tracing::debug!(user_id, podcast_id, "Favourite added");

        Ok(())
    }
}

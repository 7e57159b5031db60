use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, without credentials
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub is_admin: bool,
}

/// User row to insert; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Favourite podcast projection used by the recommendation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct FavouritePodcast {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
}

/// `{ id, favouritePodcasts { id title category } }`
#[derive(Debug, Clone, PartialEq)]
pub struct UserFavourites {
    pub id: i64,
    pub favourite_podcasts: Vec<FavouritePodcast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user: User,
}

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use podcast_api::{
    db::{create_in_memory_pool, ContentStore, SqliteStore},
    routes::{create_router, AppState},
    services::GeminiClient,
};

const GEMINI_PATH: &str = "/v1beta/models/test:generateContent";

struct TestApp {
    server: TestServer,
    store: Arc<SqliteStore>,
    gemini: mockito::ServerGuard,
}

async fn create_test_app() -> TestApp {
    let gemini = mockito::Server::new_async().await;
    let store = Arc::new(SqliteStore::new(create_in_memory_pool().await.unwrap()));
    let inference = Arc::new(GeminiClient::new(
        "test_key".to_string(),
        format!("{}{}", gemini.url(), GEMINI_PATH),
    ));

    let state = AppState::new(store.clone(), inference);
    let server = TestServer::new(create_router(state)).unwrap();

    TestApp {
        server,
        store,
        gemini,
    }
}

fn gemini_reply(text: &str) -> String {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
}

async fn graphql(server: &TestServer, query: &str, variables: Value) -> Value {
    let response = server
        .post("/graphql")
        .json(&json!({ "query": query, "variables": variables }))
        .await;
    response.assert_status_ok();
    response.json()
}

async fn register(server: &TestServer, email: &str) -> Value {
    graphql(
        server,
        r#"mutation Register($name: String!, $email: String!, $password: String!) {
            registerUser(name: $name, email: $email, password: $password) {
                user { id name email isAdmin }
            }
        }"#,
        json!({ "name": "Ada", "email": email, "password": "correct horse" }),
    )
    .await
}

async fn create_podcast(server: &TestServer, title: &str, category: &str, artist_id: Option<&str>) -> String {
    let body = graphql(
        server,
        r#"mutation Create($input: CreatePodcastInput!) {
            createPodcast(input: $input) { id }
        }"#,
        json!({ "input": { "title": title, "category": category, "artistId": artist_id } }),
    )
    .await;
    body["data"]["createPodcast"]["id"].as_str().unwrap().to_string()
}

async fn add_favourite(server: &TestServer, user_id: &str, podcast_id: &str) {
    let body = graphql(
        server,
        r#"mutation Fav($userId: ID!, $podcastId: ID!) {
            addFavouritePodcast(userId: $userId, podcastId: $podcastId)
        }"#,
        json!({ "userId": user_id, "podcastId": podcast_id }),
    )
    .await;
    assert_eq!(body["data"]["addFavouritePodcast"], true);
}

const RECOMMEND_QUERY: &str = r#"query Recommend($userId: ID!) {
    getRecommendedPodcasts(userId: $userId) {
        id title type video_uri audio_uri isFavourite
        artist { id name }
    }
}"#;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_test_app().await;
    let id = "6f1c1f6e-4f0a-4d39-9a3b-1f6a0c9d2e11";

    let response = app
        .server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_register_user_twice_is_duplicate() {
    let app = create_test_app().await;

    let first = register(&app.server, "ada@example.com").await;
    assert_eq!(first["data"]["registerUser"]["user"]["email"], "ada@example.com");
    assert_eq!(first["data"]["registerUser"]["user"]["isAdmin"], false);

    let second = register(&app.server, "ada@example.com").await;
    assert_eq!(second["errors"][0]["message"], "User with this email already exists");
    assert_eq!(second["errors"][0]["extensions"]["code"], "DUPLICATE_USER");

    let stored = app.store.find_user_by_email("ada@example.com").await.unwrap();
    assert_eq!(
        stored.unwrap().id.to_string(),
        first["data"]["registerUser"]["user"]["id"].as_str().unwrap()
    );
}

#[tokio::test]
async fn test_recommendations_end_to_end() {
    let mut app = create_test_app().await;

    let artist = graphql(
        &app.server,
        r#"mutation { createArtist(name: "Nina", bio: "Jazz singer") { id name } }"#,
        json!({}),
    )
    .await;
    let artist_id = artist["data"]["createArtist"]["id"].as_str().unwrap().to_string();

    let loved = create_podcast(&app.server, "Loved Standards", "Jazz", Some(&artist_id)).await;
    let blue = create_podcast(&app.server, "Blue Notes", "Jazz", Some(&artist_id)).await;
    let news = create_podcast(&app.server, "Daily News", "News", None).await;

    let user = register(&app.server, "ada@example.com").await;
    let user_id = user["data"]["registerUser"]["user"]["id"].as_str().unwrap().to_string();
    add_favourite(&app.server, &user_id, &loved).await;

    let reply = "Sure!\n```json\n{\"recommendations\": [\"Daily News\", \"Blue Notes\", \"Imaginary Show\"]}\n```";
    let mock = app
        .gemini
        .mock("POST", GEMINI_PATH)
        .match_query(mockito::Matcher::UrlEncoded("key".into(), "test_key".into()))
        .match_body(mockito::Matcher::Regex("Blue Notes \\{Category: Jazz, Artist: Nina\\}".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(reply))
        .expect(1)
        .create_async()
        .await;

    let body = graphql(&app.server, RECOMMEND_QUERY, json!({ "userId": user_id })).await;
    mock.assert_async().await;

    let recs = body["data"]["getRecommendedPodcasts"].as_array().unwrap();
    assert_eq!(recs.len(), 2);

    assert_eq!(recs[0]["id"], blue.as_str());
    assert_eq!(recs[0]["artist"]["name"], "Nina");
    assert_eq!(recs[0]["isFavourite"], false);
    assert_eq!(recs[0]["type"], "audio");

    assert_eq!(recs[1]["id"], news.as_str());
    assert_eq!(recs[1]["artist"]["id"], "123");
    assert_eq!(recs[1]["artist"]["name"], "Silent Thoughts");
}

#[tokio::test]
async fn test_unknown_user_fails_without_inference() {
    let mut app = create_test_app().await;
    create_podcast(&app.server, "Blue Notes", "Jazz", None).await;

    let mock = app
        .gemini
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let body = graphql(&app.server, RECOMMEND_QUERY, json!({ "userId": "999" })).await;
    mock.assert_async().await;

    assert_eq!(body["errors"][0]["message"], "User not found");
    assert_eq!(body["errors"][0]["extensions"]["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_all_podcasts_favourited_returns_empty_without_inference() {
    let mut app = create_test_app().await;
    let only = create_podcast(&app.server, "Only Show", "News", None).await;
    let user = register(&app.server, "ada@example.com").await;
    let user_id = user["data"]["registerUser"]["user"]["id"].as_str().unwrap().to_string();
    add_favourite(&app.server, &user_id, &only).await;

    let mock = app
        .gemini
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let body = graphql(&app.server, RECOMMEND_QUERY, json!({ "userId": user_id })).await;
    mock.assert_async().await;

    assert_eq!(body["data"]["getRecommendedPodcasts"], json!([]));
}

#[tokio::test]
async fn test_malformed_model_output_is_generic_failure() {
    let mut app = create_test_app().await;
    create_podcast(&app.server, "Blue Notes", "Jazz", None).await;
    let user = register(&app.server, "ada@example.com").await;
    let user_id = user["data"]["registerUser"]["user"]["id"].as_str().unwrap().to_string();

    let _mock = app
        .gemini
        .mock("POST", GEMINI_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply("I recommend Blue Notes."))
        .create_async()
        .await;

    let body = graphql(&app.server, RECOMMEND_QUERY, json!({ "userId": user_id })).await;

    assert_eq!(body["errors"][0]["message"], "Failed to fetch podcasts");
    assert_eq!(body["errors"][0]["extensions"]["code"], "RECOMMENDATION_FAILURE");
}

#[tokio::test]
async fn test_favourited_count() {
    let app = create_test_app().await;
    let show = create_podcast(&app.server, "Shared Show", "News", None).await;

    for email in ["ada@example.com", "bob@example.com"] {
        let user = register(&app.server, email).await;
        let user_id = user["data"]["registerUser"]["user"]["id"].as_str().unwrap().to_string();
        add_favourite(&app.server, &user_id, &show).await;
    }

    let body = graphql(
        &app.server,
        "{ podcasts { id title favouritedCount artist { id } } }",
        json!({}),
    )
    .await;

    let podcasts = body["data"]["podcasts"].as_array().unwrap();
    assert_eq!(podcasts.len(), 1);
    assert_eq!(podcasts[0]["favouritedCount"], 2);
    assert_eq!(podcasts[0]["artist"], Value::Null);
}

#[tokio::test]
async fn test_rest_recommendations_unknown_user() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": 42 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_rest_recommendations_upstream_error() {
    let mut app = create_test_app().await;
    create_podcast(&app.server, "Blue Notes", "Jazz", None).await;
    let user = register(&app.server, "ada@example.com").await;
    let user_id: i64 = user["data"]["registerUser"]["user"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let mock = app
        .gemini
        .mock("POST", GEMINI_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let response = app
        .server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": user_id }))
        .await;
    mock.assert_async().await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to fetch podcasts");
}

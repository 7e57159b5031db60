//! GraphQL API
//!
//! Custom registration and recommendation operations plus a small content
//! surface over the store, served on `/graphql`.

pub mod schema;
pub mod types;

use async_graphql::{
    http::{playground_source, GraphQLPlaygroundConfig},
    EmptySubscription, Schema,
};
use axum::{
    response::{Html, IntoResponse},
    Extension, Json,
};

use crate::{middleware::RequestId, routes::AppState};
use schema::{MutationRoot, QueryRoot};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the application state available to resolvers
pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

/// GraphQL playground handler
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// GraphQL query handler
pub async fn graphql_handler(
    Extension(schema): Extension<AppSchema>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request.data(request_id)).await)
}

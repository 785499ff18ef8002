//! GraphQL endpoint for the toy order board.

use std::sync::Arc;

use async_graphql::{http::GraphiQLSource, EmptySubscription, Schema};
use axum::{
    extract::Extension,
    response::Html,
    routing::get,
    Json, Router,
};

use crate::infrastructure::state::AppState;

pub mod schema;

use self::schema::{MutationRoot, QueryRoot};

pub type WorkshopSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The schema carries no data of its own; application state is attached to
/// each request so every resolver sees the same store the REST routes use.
pub fn build_schema() -> WorkshopSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

/// Schema in SDL form, for client code generation.
pub fn export_sdl() -> String {
    build_schema().sdl()
}

pub fn router() -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(handler))
        .layer(Extension(build_schema()))
}

async fn handler(
    Extension(schema): Extension<WorkshopSchema>,
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request.data(state)).await)
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

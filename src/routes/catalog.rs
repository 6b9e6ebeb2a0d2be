//! Resource routes for movies, directors and genres.
//! Collection paths answer with and without the trailing slash.

use crate::handlers::entity::{create, delete, list, read, update};
use crate::handlers::Resource;
use crate::model::{Director, Genre, Movie};
use crate::state::AppState;
use axum::{routing::get, Router};

fn resource_routes<R: Resource>(router: Router<AppState>, base: &str) -> Router<AppState> {
    router
        .route(base, get(list::<R>).post(create::<R>))
        .route(&format!("{}/", base), get(list::<R>).post(create::<R>))
        .route(
            &format!("{}/:id", base),
            get(read::<R>).put(update::<R>).delete(delete::<R>),
        )
}

pub fn catalog_routes(state: AppState) -> Router {
    let router = Router::new();
    let router = resource_routes::<Movie>(router, "/movies");
    let router = resource_routes::<Director>(router, "/directors");
    let router = resource_routes::<Genre>(router, "/genres");
    router.with_state(state)
}

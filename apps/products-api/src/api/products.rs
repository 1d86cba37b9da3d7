//! Products routes: reads are public, writes require an admin token

use axum::{Router, middleware::from_fn_with_state};
use axum_helpers::{JwtAuth, require_admin};
use domain_products::{PgProductRepository, ProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    gated(ProductService::new(repository), JwtAuth::new(&state.config.jwt))
}

/// Compose the public routes with the admin routes behind [`require_admin`].
pub fn gated<R: ProductRepository + 'static>(service: ProductService<R>, auth: JwtAuth) -> Router {
    let routers = handlers::routers(service);
    routers
        .public
        .merge(routers.admin.route_layer(from_fn_with_state(auth, require_admin)))
}

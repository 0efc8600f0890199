//! CORS middleware configuration
//!
//! Front-ends for the workflow are served from other origins, so every origin
//! is allowed.

use tower_http::cors::CorsLayer;

pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

//! CORS layer built from configuration.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use tower_http::cors::{AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::{AllowedMethods, CorsConfig};

/// Only listed origins are echoed back in `Access-Control-Allow-Origin`.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let methods = match &config.allowed_methods {
        AllowedMethods::Any => AllowMethods::any(),
        AllowedMethods::List(list) => AllowMethods::list(list.iter().cloned()),
    };

    let origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE])
}

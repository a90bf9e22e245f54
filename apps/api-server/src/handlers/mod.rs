//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::auth::BearerAuth;
use crate::middleware::error::extractor_config;

/// Configure all application routes.
///
/// Fixed `/posts/...` paths are registered before `/posts/{id}` so they are
/// not captured as ids.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);

    cfg.route("/", web::get().to(health::liveness))
        .service(web::scope("/auth").route("/login", web::post().to(auth::login)))
        .service(
            web::scope("/posts")
                // Public routes
                .route("", web::get().to(posts::list))
                .route("/", web::get().to(posts::list))
                .route("/latest", web::get().to(posts::latest))
                // Protected routes
                .service(
                    web::resource("/add")
                        .wrap(BearerAuth)
                        .route(web::post().to(posts::add)),
                )
                .service(
                    web::resource("/update/{id}")
                        .wrap(BearerAuth)
                        .route(web::post().to(posts::update)),
                )
                .service(
                    web::resource("/delete/{id}")
                        .wrap(BearerAuth)
                        .route(web::delete().to(posts::delete)),
                )
                .service(
                    web::scope("/count")
                        .wrap(BearerAuth)
                        .route("/total", web::get().to(posts::count_total))
                        .route("/drafts", web::get().to(posts::count_drafts))
                        .route("/published", web::get().to(posts::count_published)),
                )
                .route("/{id}", web::get().to(posts::get_by_id)),
        );
}

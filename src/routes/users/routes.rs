use crate::authentication;
use crate::routes;
use actix_web::middleware;
use actix_web::web;

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::post().to(routes::login))
        .route("/register", web::post().to(routes::register_user))
        // Protected routes (require authentication)
        .service(
            web::scope("/me")
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .route("/logout", web::post().to(routes::log_out)),
        )
        .route("/{id}", web::get().to(routes::get_user));
}

use crate::authentication::reject_anonymous_users;
use crate::routes::{
    create_post, delete_post, get_post, get_post_by_slug, like_post, list_posts, search_posts,
    unlike_post,
};
use actix_web::middleware::from_fn;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/get/all", web::get().to(list_posts))
        .route("/get/{id}", web::get().to(get_post))
        .route("/slug/{slug}", web::get().to(get_post_by_slug))
        .route("/search", web::get().to(search_posts))
        // Protected routes (require authentication)
        .service(
            web::scope("/me")
                .wrap(from_fn(reject_anonymous_users))
                .route("/create", web::post().to(create_post))
                .route("/like/{id}", web::patch().to(like_post))
                .route("/unlike/{id}", web::patch().to(unlike_post))
                .route("/delete/{id}", web::delete().to(delete_post)),
        );
}

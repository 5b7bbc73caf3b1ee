use crate::configuration::{Configuration, DatabaseConfigs};
use crate::repository::PgRepository;
use crate::routes::{comment_routes, health_check, post_routes, user_routes};
use crate::services::{CommentService, PostService, UserService};
use actix_session::SessionMiddleware;
use actix_session::storage::RedisSessionStore;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Configuration) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&config.database);

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind TCP listener on {address}"))?;
        let port = listener
            .local_addr()
            .context("Failed to read local address of TCP listener")?
            .port();
        tracing::info!(%address, port, base_url = %config.application.base_url, "Starting server");

        let server = run(
            listener,
            connection_pool,
            config.application.hmac_secret,
            config.application.redis_uri,
        )
        .await
        .context("Failed to run Actix web server")?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        self.server.await.context("Server stopped with an error")
    }
}

pub fn get_connection_pool(config: &DatabaseConfigs) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(config.connect_options())
}

async fn run(
    tcp_listener: TcpListener,
    db_pool: PgPool,
    hmac_secret: Secret<String>,
    redis_uri: Secret<String>,
) -> Result<Server, anyhow::Error> {
    let posts = web::Data::new(PostService::new(PgRepository::new(db_pool.clone())));
    let comments = web::Data::new(CommentService::new(PgRepository::new(db_pool.clone())));
    let users = web::Data::new(UserService::new(PgRepository::new(db_pool)));

    let secret_key = actix_web::cookie::Key::from(hmac_secret.expose_secret().as_bytes());

    let redis_store = RedisSessionStore::new(redis_uri.expose_secret())
        .await
        .context("Failed to connect to Redis session store")?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(SessionMiddleware::new(
                redis_store.clone(),
                secret_key.clone(),
            ))
            .configure(configure_routes)
            .app_data(posts.clone())
            .app_data(comments.clone())
            .app_data(users.clone())
    })
    .listen(tcp_listener)
    .context("Failed to bind Actix server to TCP listener")?
    .run();

    Ok(server)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check))
        .service(
            web::scope("/v1")
                .service(web::scope("/user").configure(user_routes))
                .service(web::scope("/post").configure(post_routes))
                .service(web::scope("/comment").configure(comment_routes)),
        );
}

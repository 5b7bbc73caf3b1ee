mod comment;
mod post;
mod user;

pub use comment::CommentRepository;
pub use post::PostRepository;
pub use user::UserRepository;

use sqlx::PgPool;

/// Postgres-backed implementation of every repository trait.
#[derive(Clone, Debug)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

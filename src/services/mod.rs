mod comment;
mod post;
mod user;

pub use comment::{CommentError, CommentService};
pub use post::{PostError, PostService};
pub use user::{UserError, UserService};

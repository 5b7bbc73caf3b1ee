mod body;
mod slug;
mod title;
mod types;

pub use body::PostBody;
pub use slug::Slug;
pub use title::PostTitle;
pub use types::*;

#[derive(Debug)]
pub struct NewPost {
    pub title: PostTitle,
    pub body: PostBody,
}

impl NewPost {
    pub fn new(title: String, body: String) -> Result<Self, String> {
        Ok(Self {
            title: PostTitle::parse(title)?,
            body: PostBody::parse(body)?,
        })
    }
}

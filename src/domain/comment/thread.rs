use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{CommentAuthor, CommentResponse, CommentThread};

impl CommentResponse {
    /// Anonymizes a soft-deleted comment. Id, post, parent, level and reply
    /// count survive so the thread it belongs to keeps its shape.
    /// The viewer's `is_liked` flag is dropped along with the like count.
    pub fn masked(self) -> Self {
        Self {
            text: String::new(),
            likes: 0,
            author: CommentAuthor {
                id: None,
                user_name: None,
            },
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            is_deleted: true,
            is_liked: None,
            ..self
        }
    }
}

pub fn mask_deleted(comments: Vec<CommentResponse>) -> Vec<CommentResponse> {
    comments
        .into_iter()
        .map(|c| if c.is_deleted { c.masked() } else { c })
        .collect()
}

/// Groups a flat, ordered comment list into root comments carrying their
/// direct replies. Input order is kept for roots and within each reply list.
pub fn group_into_threads(comments: Vec<CommentResponse>) -> Vec<CommentThread> {
    let (roots, replies): (Vec<_>, Vec<_>) = comments
        .into_iter()
        .partition(|c| c.parent_comment_id.is_none());

    let mut replies_by_parent: HashMap<Uuid, Vec<CommentResponse>> = HashMap::new();
    for reply in replies {
        if let Some(parent_id) = reply.parent_comment_id {
            replies_by_parent.entry(parent_id).or_default().push(reply);
        }
    }

    let threads: Vec<CommentThread> = roots
        .into_iter()
        .map(|comment| {
            let sub_comments = replies_by_parent.remove(&comment.id).unwrap_or_default();
            CommentThread {
                comment,
                sub_comments,
            }
        })
        .collect();

    if !replies_by_parent.is_empty() {
        tracing::warn!(
            orphaned_parents = replies_by_parent.len(),
            "Dropping replies whose parent is not a root comment of this post"
        );
    }

    threads
}

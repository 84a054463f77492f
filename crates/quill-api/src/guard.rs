//! Ownership decisions for mutating requests. Pure functions over rows the
//! handler has already loaded — no storage access, no side effects. A false
//! answer short-circuits the handler into the Unauthorised outcome before
//! any mutation happens.

use quill_db::models::{CommentRow, PostRow};

/// Posts are updated and deleted by their owner only.
pub fn can_mutate_post(actor_id: i64, post: &PostRow) -> bool {
    actor_id == post.user_id
}

/// Comments are edited by their owner only. The post owner's moderation
/// right covers deletion, never editing.
pub fn can_update_comment(actor_id: i64, comment: &CommentRow) -> bool {
    comment.user_id == Some(actor_id)
}

/// Comments are deleted by their owner, or by the owner of the post they
/// sit on (self-moderation of comments on one's own posts). A comment with
/// no owner on record is only the post owner's to delete.
pub fn can_delete_comment(actor_id: i64, comment: &CommentRow, parent_post: &PostRow) -> bool {
    comment.user_id == Some(actor_id) || actor_id == parent_post.user_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(owner: i64) -> PostRow {
        PostRow {
            id: 1,
            user_id: owner,
            title: "title".into(),
            content: "content".into(),
            created_at: "2026-01-01 00:00:00".into(),
            updated_at: "2026-01-01 00:00:00".into(),
        }
    }

    fn comment(owner: Option<i64>) -> CommentRow {
        CommentRow {
            id: 1,
            post_id: 1,
            user_id: owner,
            content: "content".into(),
            created_at: "2026-01-01 00:00:00".into(),
            updated_at: "2026-01-01 00:00:00".into(),
        }
    }

    #[test]
    fn post_mutation_is_owner_only() {
        assert!(can_mutate_post(7, &post(7)));
        assert!(!can_mutate_post(8, &post(7)));
    }

    #[test]
    fn comment_update_is_owner_only() {
        assert!(can_update_comment(3, &comment(Some(3))));
        assert!(!can_update_comment(4, &comment(Some(3))));
        assert!(!can_update_comment(3, &comment(None)));
    }

    #[test]
    fn post_owner_cannot_edit_others_comments() {
        // Actor 5 owns the post but not the comment: delete yes, update no.
        let c = comment(Some(3));
        let p = post(5);
        assert!(can_delete_comment(5, &c, &p));
        assert!(!can_update_comment(5, &c));
    }

    #[test]
    fn comment_deletion_allows_owner_and_moderator() {
        let p = post(5);

        assert!(can_delete_comment(3, &comment(Some(3)), &p)); // comment owner
        assert!(can_delete_comment(5, &comment(Some(3)), &p)); // post owner
        assert!(!can_delete_comment(4, &comment(Some(3)), &p)); // third party
    }

    #[test]
    fn ownerless_comment_is_moderator_only() {
        let p = post(5);

        assert!(can_delete_comment(5, &comment(None), &p));
        assert!(!can_delete_comment(3, &comment(None), &p));
    }
}

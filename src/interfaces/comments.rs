//! Comments suite

use serde_json::json;

use super::movies::one_of;
use super::{Suite, ToId};
use crate::client::TraktClient;
use crate::error::Error;
use crate::models::{Comment, CommentAndItem, CommentItemOnly, CommentResponse, Sharing};
use crate::pagination::PaginationIterator;
use crate::parser::Shape;
use crate::paths::{CallContext, Path, PerArgValidator, Validator};
use reqwest::Method;

const COMMENT_TYPES: &[&str] = &["all", "reviews", "shouts"];
const MEDIA_TYPES: &[&str] = &["all", "movies", "shows", "seasons", "episodes", "lists"];

/// The API rejects comments shorter than five words.
fn comment_text_validator() -> Validator {
    Validator::PerArg(PerArgValidator::new(
        "comment",
        "must be at least five words",
        |v| {
            v.as_str()
                .map(|s| s.split_whitespace().count() >= 5)
                .unwrap_or(false)
        },
    ))
}

fn comment_id_validator() -> Validator {
    Validator::PerArg(PerArgValidator::new("id", "must be a comment id", |v| {
        v.is_u64()
    }))
}

fn feed_validators() -> Vec<Validator> {
    vec![
        one_of(
            "comment_type",
            "must be one of: all, reviews, shouts",
            COMMENT_TYPES,
        ),
        one_of(
            "type",
            "must be one of: all, movies, shows, seasons, episodes, lists",
            MEDIA_TYPES,
        ),
        Validator::PerArg(PerArgValidator::new(
            "include_replies",
            "must be a boolean",
            |v| v.is_boolean(),
        )),
    ]
}

pub fn suite() -> Suite {
    Suite::new("comments")
        .path(
            "post_comment",
            Path::new("comments", Shape::Leaf)
                .method(Method::POST)
                .validator(Validator::AuthRequired)
                .validator(comment_text_validator()),
        )
        .path(
            "get_comment",
            Path::new("comments/!id", Shape::Leaf).validator(comment_id_validator()),
        )
        .path(
            "get_replies",
            Path::new("comments/!id/replies", Shape::list(Shape::Leaf))
                .paginated()
                .validator(comment_id_validator()),
        )
        .path(
            "post_reply",
            Path::new("comments/!id/replies", Shape::Leaf)
                .method(Method::POST)
                .validator(Validator::AuthRequired)
                .validator(comment_id_validator())
                .validator(comment_text_validator()),
        )
        .path(
            "get_item",
            Path::new("comments/!id/item", Shape::Leaf)
                .extended(&["full"])
                .validator(comment_id_validator()),
        )
        .path(
            "like_comment",
            Path::new("comments/!id/like", Shape::Any)
                .method(Method::POST)
                .validator(Validator::AuthRequired)
                .validator(comment_id_validator()),
        )
        .path(
            "remove_like",
            Path::new("comments/!id/like", Shape::Any)
                .method(Method::DELETE)
                .aliases(&["comments.unlike"])
                .validator(Validator::AuthRequired)
                .validator(comment_id_validator()),
        )
        .path(
            "get_trending",
            Path::new(
                "comments/trending/?comment_type/?type",
                Shape::list(Shape::Leaf),
            )
            .extended(&["full"])
            .paginated()
            .validators(feed_validators())
            .qargs(&["include_replies"]),
        )
        .path(
            "get_recently_created",
            Path::new("comments/recent/?comment_type/?type", Shape::list(Shape::Leaf))
                .extended(&["full"])
                .paginated()
                .validators(feed_validators())
                .qargs(&["include_replies"]),
        )
        .path(
            "get_recently_updated",
            Path::new(
                "comments/updates/?comment_type/?type",
                Shape::list(Shape::Leaf),
            )
            .extended(&["full"])
            .paginated()
            .validators(feed_validators())
            .qargs(&["include_replies"]),
        )
}

pub struct CommentsInterface<'a> {
    client: &'a TraktClient,
}

impl<'a> CommentsInterface<'a> {
    pub(crate) fn new(client: &'a TraktClient) -> Self {
        CommentsInterface { client }
    }

    fn call<T: serde::de::DeserializeOwned>(&self, key: &str, ctx: CallContext) -> Result<T, Error> {
        let path = self.client.suite_path("comments", key)?;
        self.client.executor().call_path(&path, ctx)
    }

    fn paginate<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        ctx: CallContext,
    ) -> Result<PaginationIterator<'a, T>, Error> {
        let path = self.client.suite_path("comments", key)?;
        self.client.executor().paginate(path, ctx)
    }

    fn feed(
        &self,
        key: &str,
        comment_type: Option<&str>,
        media_type: Option<&str>,
        include_replies: bool,
    ) -> Result<PaginationIterator<'a, CommentAndItem>, Error> {
        let ctx = CallContext::new()
            .arg("comment_type", comment_type.unwrap_or("all"))
            .arg("type", media_type.unwrap_or("all"))
            .arg("include_replies", include_replies);
        self.paginate(key, ctx)
    }

    /// Post a comment on a movie, show, season, episode or list.
    pub fn post_comment(
        &self,
        item: &impl ToId,
        comment: &str,
        spoiler: bool,
        sharing: Option<Sharing>,
    ) -> Result<CommentResponse, Error> {
        let mut body = json!({
            "item_id": item.to_id(),
            "comment": comment,
            "spoiler": spoiler,
        });
        if let Some(sharing) = sharing {
            body["sharing"] = json!(sharing);
        }

        let ctx = CallContext::new().arg("comment", comment).body(body);
        self.call("post_comment", ctx)
    }

    pub fn get_comment(&self, id: &impl ToId) -> Result<Comment, Error> {
        self.call("get_comment", CallContext::new().arg("id", id.to_id()))
    }

    pub fn get_replies(&self, id: &impl ToId) -> Result<PaginationIterator<'a, Comment>, Error> {
        self.paginate("get_replies", CallContext::new().arg("id", id.to_id()))
    }

    pub fn post_reply(
        &self,
        id: &impl ToId,
        comment: &str,
        spoiler: bool,
    ) -> Result<CommentResponse, Error> {
        let body = json!({"comment": comment, "spoiler": spoiler});
        let ctx = CallContext::new()
            .arg("id", id.to_id())
            .arg("comment", comment)
            .body(body);
        self.call("post_reply", ctx)
    }

    /// The item a comment was left on; exactly one item field is set.
    pub fn get_item(&self, id: &impl ToId) -> Result<CommentItemOnly, Error> {
        self.call("get_item", CallContext::new().arg("id", id.to_id()))
    }

    pub fn like_comment(&self, id: &impl ToId) -> Result<(), Error> {
        let path = self.client.suite_path("comments", "like_comment")?;
        let ctx = CallContext::new().arg("id", id.to_id());
        let _: serde_json::Value = self.client.executor().call_path(&path, ctx)?;
        Ok(())
    }

    pub fn remove_like(&self, id: &impl ToId) -> Result<(), Error> {
        let path = self.client.suite_path("comments", "remove_like")?;
        let ctx = CallContext::new().arg("id", id.to_id());
        let _: serde_json::Value = self.client.executor().call_path(&path, ctx)?;
        Ok(())
    }

    pub fn get_trending(
        &self,
        comment_type: Option<&str>,
        media_type: Option<&str>,
        include_replies: bool,
    ) -> Result<PaginationIterator<'a, CommentAndItem>, Error> {
        self.feed("get_trending", comment_type, media_type, include_replies)
    }

    pub fn get_recently_created(
        &self,
        comment_type: Option<&str>,
        media_type: Option<&str>,
        include_replies: bool,
    ) -> Result<PaginationIterator<'a, CommentAndItem>, Error> {
        self.feed(
            "get_recently_created",
            comment_type,
            media_type,
            include_replies,
        )
    }

    pub fn get_recently_updated(
        &self,
        comment_type: Option<&str>,
        media_type: Option<&str>,
        include_replies: bool,
    ) -> Result<PaginationIterator<'a, CommentAndItem>, Error> {
        self.feed(
            "get_recently_updated",
            comment_type,
            media_type,
            include_replies,
        )
    }
}

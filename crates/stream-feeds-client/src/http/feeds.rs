/*
[INPUT]:  Feed identity (slug + user id) and activity payloads
[OUTPUT]: Feed reads, activity writes, follow relations
[POS]:    HTTP layer - feed endpoints built on the request pipeline
[UPDATE]: When adding feed endpoints or changing scope requirements
*/

use reqwest::Method;

use crate::http::request::ApiRequest;
use crate::http::{Result, StreamClient, StreamError};
use crate::types::{Activity, ActivityPage};

/// Identity of a single feed, e.g. slug `user` + id `42`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedId {
    slug: String,
    user_id: String,
}

impl FeedId {
    /// Create a feed identity, validating both parts
    ///
    /// Slug and id must be non-empty and URL-path-safe (alphanumeric, `-`,
    /// `_`); violations fail before any network traffic.
    pub fn new(slug: impl Into<String>, user_id: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        let user_id = user_id.into();
        validate_part("feed slug", &slug)?;
        validate_part("feed user id", &user_id)?;
        Ok(Self { slug, user_id })
    }

    /// Feed slug (`user` in `user:42`)
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Feed user id (`42` in `user:42`)
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// `<slug><id>` form used as the `feed_id` token claim
    pub fn claim(&self) -> String {
        format!("{}{}", self.slug, self.user_id)
    }

    /// `<slug>:<id>` form used when another endpoint targets this feed
    pub fn target(&self) -> String {
        format!("{}:{}", self.slug, self.user_id)
    }

    fn path_segment(&self) -> String {
        format!("{}/{}", self.slug, self.user_id)
    }
}

fn validate_part(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StreamError::InvalidRequest(format!(
            "{what} must not be empty"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StreamError::InvalidRequest(format!(
            "{what} {value:?} contains characters that are not URL-path-safe"
        )));
    }
    Ok(())
}

impl StreamClient {
    /// Read activities from a feed
    ///
    /// GET /feed/{slug}/{id}/ with a read-scoped token
    pub async fn get_activities<I, K, V>(&self, feed: &FeedId, params: I) -> Result<ActivityPage>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let req = ApiRequest::new(Method::GET, format!("/feed/{}/", feed.path_segment()))
            .with_params(params)
            .with_token(feed.claim(), "feed", "read");

        let value = self.run(req).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Publish an activity to a feed
    ///
    /// POST /feed/{slug}/{id}/ with a write-scoped token; returns the stored
    /// activity with its server-assigned fields filled in.
    pub async fn add_activity(&self, feed: &FeedId, activity: &Activity) -> Result<Activity> {
        let req = ApiRequest::new(Method::POST, format!("/feed/{}/", feed.path_segment()))
            .with_json(activity)?
            .with_token(feed.claim(), "feed", "write");

        let value = self.run(req).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Follow `target` from `feed`
    ///
    /// POST /feed/{slug}/{id}/following/ with a write-scoped follower token
    pub async fn follow(&self, feed: &FeedId, target: &FeedId) -> Result<serde_json::Value> {
        let req = ApiRequest::new(
            Method::POST,
            format!("/feed/{}/following/", feed.path_segment()),
        )
        .with_json(&serde_json::json!({ "target": target.target() }))?
        .with_token(feed.claim(), "follower", "write");

        self.run(req).await
    }

    /// Remove the follow relation from `feed` to `target`
    ///
    /// DELETE /feed/{slug}/{id}/following/{target}/ — the target rides in
    /// the path, so the request carries no extra params or body.
    pub async fn unfollow(&self, feed: &FeedId, target: &FeedId) -> Result<serde_json::Value> {
        let req = ApiRequest::new(
            Method::DELETE,
            format!(
                "/feed/{}/following/{}/",
                feed.path_segment(),
                target.target()
            ),
        )
        .with_token(feed.claim(), "follower", "write");

        self.run(req).await
    }

    async fn run(&self, req: ApiRequest) -> Result<serde_json::Value> {
        let req = self.prepare_request(req)?;
        let req = self.sign_request(req)?;
        self.execute_request(&req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_id_forms() {
        let feed = FeedId::new("user", "42").unwrap();
        assert_eq!(feed.slug(), "user");
        assert_eq!(feed.user_id(), "42");
        assert_eq!(feed.claim(), "user42");
        assert_eq!(feed.target(), "user:42");
        assert_eq!(feed.path_segment(), "user/42");
    }

    #[test]
    fn test_feed_id_rejects_empty_parts() {
        assert!(FeedId::new("", "42").is_err());
        assert!(FeedId::new("user", "").is_err());
    }

    #[test]
    fn test_feed_id_rejects_unsafe_characters() {
        for bad in ["user/../etc", "time line", "flat:1", "a?b"] {
            let err = FeedId::new(bad, "1").unwrap_err();
            assert!(matches!(err, StreamError::InvalidRequest(_)), "{bad}");
        }
    }

    #[test]
    fn test_feed_id_accepts_dashes_and_underscores() {
        assert!(FeedId::new("time-line", "user_1").is_ok());
    }
}

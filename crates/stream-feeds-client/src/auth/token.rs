/*
[INPUT]:  Feed scope claims and shared API secret
[OUTPUT]: Compact HS256 scope tokens and verified claims
[POS]:    Auth layer - scoped token build and verification
[UPDATE]: When adding claims or changing the signing algorithm
*/

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::http::Result;

/// Claim value meaning "not restricted on this dimension"
///
/// A sentinel, not a pattern; matching semantics belong to the server.
pub const ANY: &str = "*";

/// Scope claims carried by a compact feed token
///
/// Claim values are plain strings. Dimensions left empty are normalized to
/// [`ANY`] when the token is signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedScope {
    pub resource: String,
    pub feed_id: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for FeedScope {
    fn default() -> Self {
        Self::any()
    }
}

impl FeedScope {
    /// Scope restricted to the given resource, feed and action
    pub fn new(
        resource: impl Into<String>,
        feed_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            feed_id: feed_id.into(),
            action: action.into(),
            user_id: None,
            exp: None,
            extra: BTreeMap::new(),
        }
    }

    /// Scope unrestricted on every dimension
    pub fn any() -> Self {
        Self::new(ANY, ANY, ANY)
    }

    /// Bind the scope to a user
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Add an extra string claim
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Give the token a bounded lifetime
    ///
    /// Tokens carry no expiry unless this is set; the server is the
    /// authority on enforcing it.
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.exp = Some(at.timestamp().max(0) as u64);
        self
    }

    fn normalized(&self) -> Self {
        let mut scope = self.clone();
        for dimension in [&mut scope.resource, &mut scope.feed_id, &mut scope.action] {
            if dimension.is_empty() {
                *dimension = ANY.to_string();
            }
        }
        scope
    }
}

/// Sign `scope` into its compact three-segment form
///
/// Unset dimensions default to [`ANY`] before signing. No expiry claim is
/// added unless the scope carries one.
pub fn compact(scope: &FeedScope, secret: &str) -> Result<String> {
    let claims = scope.normalized();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify `token` against `secret` and return its claims
///
/// Fails on signature mismatch or malformed structure; never returns claims
/// from an unverified token. Expiry is not enforced locally, so long-lived
/// tokens verify cleanly.
pub fn decompact(token: &str, secret: &str) -> Result<FeedScope> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<FeedScope>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

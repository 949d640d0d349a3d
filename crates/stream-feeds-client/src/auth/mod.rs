/*
[INPUT]:  Shared API secret and scope claims
[OUTPUT]: Compact scope tokens and HMAC request signatures
[POS]:    Auth layer - both signing schemes for the feeds API
[UPDATE]: When auth schemes or claim formats change
*/

pub mod signature;
pub mod token;

pub use signature::MessageSigner;
pub use token::{ANY, FeedScope};

/*
[INPUT]:  Client configuration and request values
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - request pipeline and feed endpoints
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod feeds;
pub mod request;

pub use error::{Result, StreamError};
pub use feeds::FeedId;
pub use request::{ApiRequest, RequestAuth, RequestOptions};

pub use client::{ClientConfig, StreamClient};

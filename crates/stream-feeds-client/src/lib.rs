/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Stream feeds client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    ANY,
    FeedScope,
    MessageSigner,
};

// Re-export configuration
pub use config::Config;

// Re-export commonly used types from http
pub use http::{
    ApiRequest,
    ClientConfig,
    FeedId,
    RequestAuth,
    RequestOptions,
    Result,
    StreamClient,
    StreamError,
};

// Re-export all types
pub use types::*;

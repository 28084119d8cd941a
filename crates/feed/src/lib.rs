//! Feed polling and parsing.
//!
//! This crate knows how to fetch an RSS document over HTTP and turn it
//! into a list of [`FeedItem`]s. It deliberately understands nothing
//! about what the items are for; callers decide which ones matter.

mod client;
mod error;
mod models;
mod parser;

pub use client::FeedClient;
pub use error::FeedError;
pub use models::FeedItem;
pub use parser::parse_feed;

pub type Result<T> = std::result::Result<T, FeedError>;

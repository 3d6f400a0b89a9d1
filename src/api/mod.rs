//! HTTP client for the article API.
//!
//! The server exposes a single `articles` resource:
//!
//! - `GET    {base}articles`       list the collection
//! - `POST   {base}articles`       create, server assigns the id
//! - `PUT    {base}articles/{id}`  replace
//! - `DELETE {base}articles/{id}`  remove
//!
//! Any non-2xx answer is an error for that call. Nothing is retried.

mod articles;

pub use articles::{ApiError, ArticleClient, MAX_RESPONSE_SIZE};

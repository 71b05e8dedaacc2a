//! Where paper records come from.

pub mod http;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use crate::FetchError;
use crate::model::{Paper, PaperId};

pub use http::HttpPaperSource;

/// Boxed future returned by [`PaperSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// A backend that can look up one paper by id.
pub trait PaperSource: Send + Sync {
    /// Short name used in logs (e.g. "http", "mock").
    fn name(&self) -> &str;

    /// Fetch the paper with the given id.
    fn fetch_paper<'a>(&'a self, paper_id: &'a PaperId) -> SourceFuture<'a, Paper>;

    /// Whether the backend reports itself healthy. Sources without a health
    /// endpoint are always considered healthy.
    fn health<'a>(&'a self) -> SourceFuture<'a, bool> {
        Box::pin(async { Ok(true) })
    }
}

//! SEMrush keyword lookups: the per-keyword HTTP fetcher and response parsing.

pub mod client;
pub mod parse;
pub mod types;

pub use client::{ApiKey, Fetcher, SemrushClient, SemrushError};
pub use types::{Column, Database, KeywordRow};

//! Site Split API Server module
//!
//! Thin HTTP shell around [`crate::export::SiteSplitExporter`].
//! Run with `site-split-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server};

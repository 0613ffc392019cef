//! HTML parsing into the structured [`Document`](crate::model::Document) record.

mod html;

pub use html::{DocumentExtractor, DEFAULT_TITLE};

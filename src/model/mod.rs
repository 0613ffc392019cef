//! Data model for scraped report content.
//!
//! A [`Document`] is the immutable snapshot produced once per scrape cycle;
//! everything downstream (financial entries, topics, aggregates) is recomputed
//! from it on every refresh tick.

mod document;
mod outline;
mod table;

pub use document::{Document, Heading, Image};
pub use outline::{Outline, OutlineNode};
pub use table::Table;

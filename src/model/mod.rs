//! Data model for outline extraction.
//!
//! This module defines the intermediate representation that bridges PDF
//! decoding and outline assembly: text spans with geometry and typography,
//! and the terminal outline artifact serialized for downstream consumers.

mod outline;
mod span;

pub use outline::{FailureRecord, HeadingCandidate, HeadingLevel, OutlineResult};
pub use span::{Alignment, BBox, Span};

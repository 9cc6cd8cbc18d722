//! Occlusion query module
//!
//! Double-buffered GPU occlusion-query lifecycle: lazy lock-free handle
//! allocation during culling, bounding-box query draws, one-frame-behind
//! resolve into a visibility predicate.

mod query_manager;

pub use query_manager::{OcclusionQueryManager, QueryDraw, QUERY_NONE};

//! Render batch module
//!
//! Packed 64-bit batch sort keys, the frame-scoped batch arena with
//! range handles, radix sorting and mesh-grouped draw emission.

mod arena;
mod queue;
mod render_batch;

pub use arena::{BatchArena, BatchRange, QueueBuilder, SortOrder};
pub use queue::{draw_groups, DrawGroup};
pub use render_batch::{RenderBatch, BATCH_INDEX_MAX};

//! Culling module
//!
//! Parallel frustum-vs-AABB culling with lock-free stream compaction,
//! and the per-frame Visibility result it produces.

mod compaction;
mod culler;
mod visibility;

pub use compaction::CompactionBuffer;
pub use culler::cull_scene;
pub use visibility::{VisibleLight, Visibility};

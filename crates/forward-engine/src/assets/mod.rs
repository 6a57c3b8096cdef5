//! Read-only named assets.
//!
//! Assets are looked up by exact name and read on every request; nothing is
//! cached here.

mod source;

pub use source::{read_text, AssetSource, DirAssets, MemoryAssets};

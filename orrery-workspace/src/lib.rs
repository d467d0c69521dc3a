//! Workspace maintenance for orrery.
//!
//! Only generated artifacts are ever removed: the dependency cache, the build
//! output, editor settings, and textures produced by conversion. Source images
//! and hand-made files stay.

pub mod reset;

pub use reset::{generated_textures, reset, ResetError, ResetMode, ResetReport, ResetScope};

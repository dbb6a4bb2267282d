//! Filesystem primitives for Folder Mirror
//!
//! Provides link-aware node probing, paired source/replica paths, atomic
//! file copies that carry timestamps, and idempotent removal.

pub mod error;
pub mod io;
pub mod node;
pub mod path;

pub use error::{Error, Result};
pub use filetime::FileTime;
pub use node::{FileStamp, NodeKind};
pub use path::{PathPair, resolve};

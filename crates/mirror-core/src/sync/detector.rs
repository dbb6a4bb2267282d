//! Metadata-only change detection

use mirror_fs::{FileStamp, NodeKind};

/// Whether the replica needs a fresh copy of a source file.
///
/// Anything other than a regular file in the replica needs a copy. Two
/// regular files are considered identical when their sizes and their
/// modification times, truncated to whole seconds, are equal. Content is
/// never compared: same size and second with different bytes counts as
/// up to date.
pub fn needs_copy(source: &FileStamp, replica: &NodeKind) -> bool {
    match replica.stamp() {
        Some(replica) => {
            source.len != replica.len || source.modified_secs() != replica.modified_secs()
        }
        None => true,
    }
}

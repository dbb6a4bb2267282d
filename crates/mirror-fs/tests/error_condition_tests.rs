//! Tests for error handling under adverse filesystem conditions
//!
//! These tests verify that mirror-fs reports real OS failures with the path
//! that caused them and never leaves a half-written destination behind.

use mirror_fs::{NodeKind, io};
use tempfile::tempdir;

#[test]
fn copy_from_nonexistent_source_returns_error() {
    let dir = tempdir().unwrap();

    let result = io::copy_file(&dir.path().join("missing.txt"), &dir.path().join("out.txt"));

    let err = result.expect_err("copying a missing file should fail");
    assert!(err.is_not_found());
    assert!(err.path().ends_with("missing.txt"));
}

#[test]
fn read_dir_of_a_file_returns_error() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("plain.txt");
    std::fs::write(&file_path, "x").unwrap();

    assert!(io::read_dir_sorted(&file_path).is_err());
    // A file is not "missing", so the lenient variant still fails
    assert!(io::read_dir_sorted_or_empty(&file_path).is_err());
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn copy_unreadable_source_returns_error() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("secret.txt");
        fs::write(&file_path, "secret content").unwrap();
        fs::set_permissions(&file_path, Permissions::from_mode(0o000)).unwrap();

        let dest = dir.path().join("replica").join("secret.txt");
        let result = io::copy_file(&file_path, &dest);

        // Restore permissions before assertions (for cleanup)
        let _ = fs::set_permissions(&file_path, Permissions::from_mode(0o644));

        assert!(result.is_err(), "Copying an unreadable file should fail");
        assert_eq!(NodeKind::probe(&dest).unwrap(), NodeKind::Missing);
    }

    #[test]
    fn copy_into_readonly_parent_preserves_original() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.txt");
        fs::write(&source, "new content").unwrap();
        let parent = dir.path().join("parent");
        fs::create_dir(&parent).unwrap();
        let dest = parent.join("existing.txt");
        fs::write(&dest, "original").unwrap();
        fs::set_permissions(&parent, Permissions::from_mode(0o555)).unwrap();

        let result = io::copy_file(&source, &dest);

        let _ = fs::set_permissions(&parent, Permissions::from_mode(0o755));

        assert!(result.is_err(), "Copying into a read-only directory should fail");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "original");
    }

    #[test]
    fn remove_from_readonly_parent_is_an_error_not_absorbed() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let parent = dir.path().join("locked");
        fs::create_dir(&parent).unwrap();
        let victim = parent.join("old.txt");
        fs::write(&victim, "x").unwrap();
        fs::set_permissions(&parent, Permissions::from_mode(0o555)).unwrap();

        let result = io::remove_file(&victim);

        let _ = fs::set_permissions(&parent, Permissions::from_mode(0o755));

        let err = result.expect_err("permission denied must propagate");
        assert!(!err.is_not_found());
    }
}

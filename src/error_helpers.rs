//! Error helper functions for creating actionable error messages

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Create an enhanced error message for file permission issues
pub fn permission_error(path: &Path, operation: &str) -> String {
    format!(
        "Permission denied when {} '{}'\n\n\
         Possible fixes:\n\
         1. Check file permissions: ls -l '{}'\n\
         2. Make the file writable: chmod u+w '{}'",
        operation,
        path.display(),
        path.display(),
        path.display()
    )
}

/// Create an enhanced error message for a missing migration target
pub fn not_found_error(path: &Path, context: &str) -> String {
    format!(
        "File not found: '{}'\n\n\
         Context: {}\n\n\
         Possible fixes:\n\
         1. Run from the project root, the default target is relative to it\n\
         2. Pass the spec file explicitly: drawline-migrate path/to/file.spec.ts\n\
         3. Set [rewrite] target in the config file",
        path.display(),
        context
    )
}

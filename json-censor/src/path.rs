//! Structural paths used to address entries of a document.
//!
//! A path is the concatenation of the object keys leading to an entry, each
//! prefixed with [`SEPARATOR`]. The document root has the empty path
//! [`ROOT`]. Array elements never add a segment: every element of an array
//! shares the path of the array itself.
//!
//! Paths are plain strings. Nothing here validates or normalizes the keys, so a
//! key that itself contains a `.` simply produces a path with more dots.

/// Separator placed in front of every object key.
pub const SEPARATOR: char = '.';

/// Path of the document root.
pub const ROOT: &str = "";

/// Returns the path of the entry stored under `key` in an object at `parent`.
///
/// ```
/// use json_censor::path;
///
/// assert_eq!(path::child(path::ROOT, "users"), ".users");
/// assert_eq!(path::child(".users", "name"), ".users.name");
/// ```
#[must_use]
pub fn child(parent: &str, key: &str) -> String {
    let mut path = String::with_capacity(parent.len() + key.len() + 1);
    path.push_str(parent);
    path.push(SEPARATOR);
    path.push_str(key);
    path
}

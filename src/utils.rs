//! Remote location helpers

use std::path::Path;

/// Whether a configured remote is a directory on disk rather than a URL prefix
///
/// Local: `/srv/git`, `./origins`, `../origins`, `C:\git`, `\\nas\git`.
/// Not local: `git@github.com:Org/`, `https://github.com/Org/`, bare names.
pub fn is_local_path(remote: &str) -> bool {
  if remote.starts_with("./") || remote.starts_with("../") || remote.starts_with("\\\\") {
    return true;
  }

  // Drive letter, checked before the ':' heuristics below
  let bytes = remote.as_bytes();
  if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && (bytes[2] == b'\\' || bytes[2] == b'/') {
    return true;
  }

  if remote.contains("://") || remote.contains('@') {
    return false;
  }

  remote.starts_with('/') || Path::new(remote).is_absolute()
}

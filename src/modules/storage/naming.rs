//! File naming for stored uploads
//!
//! Stored files are named `<random hex><original extension>`. The random part
//! never depends on the client filename; only the extension is carried over.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::shared::constants::GENERATED_NAME_BYTES;

/// Source of random bytes for generated file names
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Generate a lowercase hex name from `GENERATED_NAME_BYTES` random bytes
pub fn generate_name(source: &dyn RandomSource) -> String {
    let mut bytes = [0u8; GENERATED_NAME_BYTES];
    source.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Reduce a client-supplied filename to its last path component.
///
/// Browsers (and some clients) may send `C:\fakepath\a.png` or `dir/a.png`.
/// `.` and `..` carry no name and come back empty.
pub fn client_basename(raw: &str) -> &str {
    let base = match raw.rfind(['/', '\\']) {
        Some(idx) => &raw[idx + 1..],
        None => raw,
    };

    if base == "." || base == ".." {
        ""
    } else {
        base
    }
}

/// Extension of a basename, leading dot included, verbatim.
///
/// - `photo.JPG` -> `.JPG`
/// - `archive.tar.gz` -> `.gz`
/// - `notes` -> ``
/// - `.bashrc` -> `` (a leading dot marks a hidden file, not an extension)
/// - `trailing.` -> `.`
pub fn extension_of(basename: &str) -> &str {
    match basename.rfind('.') {
        None | Some(0) => "",
        Some(idx) => &basename[idx..],
    }
}

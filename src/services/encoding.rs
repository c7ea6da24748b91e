use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::LoadError;

/// Decodes a whole file as strict UTF-8.
///
/// A UTF-8 BOM is dropped. Any other BOM, or bytes that are not UTF-8, fail
/// with the encoding the file most likely uses so the user knows what to
/// re-export from.
pub fn decode_utf8(path: &Path, bytes: &[u8]) -> Result<String, LoadError> {
    let mut body = bytes;

    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        if encoding != UTF_8 {
            return Err(LoadError::InvalidEncoding {
                path: path.to_path_buf(),
                guess: encoding.name().to_lowercase(),
            });
        }
        body = &bytes[bom_len..];
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => Ok(text.into_owned()),
        None => Err(LoadError::InvalidEncoding {
            path: path.to_path_buf(),
            guess: guess_encoding(body),
        }),
    }
}

pub fn guess_encoding(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true).name().to_lowercase()
}

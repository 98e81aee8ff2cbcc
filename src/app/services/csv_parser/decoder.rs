//! Source byte decoding for the recalls CSV export
//!
//! The export is produced in a legacy Windows encoding (CP1252 by default),
//! so the raw bytes are decoded into UTF-8 before CSV parsing. The encoding
//! label is configurable and resolved against the WHATWG label registry.

use crate::{Error, Result};
use encoding_rs::Encoding;
use tracing::warn;

/// Decode raw source bytes into UTF-8 text using the given encoding label
pub fn decode(bytes: &[u8], encoding_label: &str) -> Result<String> {
    let encoding = Encoding::for_label(encoding_label.as_bytes())
        .ok_or_else(|| Error::decode(encoding_label, "unknown encoding label"))?;

    let (text, actual_encoding, had_errors) = encoding.decode(bytes);
    if had_errors {
        // Malformed byte sequences become replacement characters; the row
        // content is still usable so parsing continues.
        warn!(
            "Source data contained byte sequences invalid in {}, replaced during decode",
            actual_encoding.name()
        );
    }

    Ok(text.into_owned())
}

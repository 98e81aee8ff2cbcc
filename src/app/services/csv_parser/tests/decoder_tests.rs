//! Tests for source byte decoding

use crate::app::services::csv_parser::decoder::decode;

#[test]
fn test_decodes_cp1252_punctuation() {
    // 0x92 is the right single quotation mark in CP1252
    let bytes = b"DRIVER\x92S SEAT";
    let text = decode(bytes, "cp1252").unwrap();
    assert_eq!(text, "DRIVER\u{2019}S SEAT");
}

#[test]
fn test_accepts_windows_1252_label() {
    let text = decode(b"plain ascii", "windows-1252").unwrap();
    assert_eq!(text, "plain ascii");
}

#[test]
fn test_rejects_unknown_label() {
    assert!(decode(b"data", "not-an-encoding").is_err());
}

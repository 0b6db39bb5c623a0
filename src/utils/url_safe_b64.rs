//! The compressed, URL-safe text encoding used for serialized sessions.
//!
//! Text is zlib-deflated and then base64 encoded with the URL-safe alphabet
//! (`-` and `_` instead of `+` and `/`) and no `=` padding. Decoding accepts
//! input with or without padding.

use super::Result;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use std::io::{Read, Write};

const URL_SAFE_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn to_url_safe_b64(text: &str) -> Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .and_then(|_| encoder.finish())
        .map(|deflated| URL_SAFE_B64.encode(deflated))
        .map_err(|e| format!("Could not compress session: {}", e))
}

pub fn from_url_safe_b64(encoded: &str) -> Result<String> {
    let deflated = URL_SAFE_B64
        .decode(encoded.trim())
        .map_err(|e| format!("Could not decode shared session: {}", e))?;

    let mut inflated = Vec::new();
    ZlibDecoder::new(deflated.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|e| format!("Could not decode shared session: {}", e))?;

    String::from_utf8(inflated).map_err(|e| format!("Could not decode shared session: {}", e))
}

use crate::error::CodecError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

// zstd level 0 maps to the library default (currently 3); stored payloads
// are small so the level is not worth configuring.
const COMPRESSION_LEVEL: i32 = 0;

/// Encode a value for storage as a document payload string:
/// JSON -> zstd -> base64.
pub fn encode_payload<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value)?;
    let compressed = zstd::encode_all(std::io::Cursor::new(json), COMPRESSION_LEVEL)?;
    Ok(BASE64.encode(compressed))
}

/// Reverse of [`encode_payload`].
pub fn decode_payload<T: DeserializeOwned>(payload: &str) -> Result<T, CodecError> {
    let compressed = BASE64.decode(payload)?;
    let json = zstd::decode_all(std::io::Cursor::new(compressed))?;
    Ok(serde_json::from_slice(&json)?)
}

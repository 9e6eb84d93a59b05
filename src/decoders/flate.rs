//! FlateDecode (zlib/deflate) via flate2.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::io::Read;

/// FlateDecode filter implementation.
///
/// Exporters occasionally write a truncated zlib trailer or a bad header.
/// Whatever was inflated before the corruption is kept, and a stream whose
/// zlib wrapper is unreadable is retried as raw deflate.
pub struct FlateDecoder;

impl StreamDecoder for FlateDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        match ZlibDecoder::new(input).read_to_end(&mut output) {
            Ok(_) => return Ok(output),
            Err(e) if !output.is_empty() => {
                log::warn!("FlateDecode partial recovery: {} bytes before error: {}", output.len(), e);
                return Ok(output);
            },
            Err(e) => log::debug!("zlib decode failed ({}), retrying as raw deflate", e),
        }

        output.clear();
        match DeflateDecoder::new(input).read_to_end(&mut output) {
            Ok(_) if !output.is_empty() => Ok(output),
            Err(_) if !output.is_empty() => {
                log::warn!("raw deflate partial recovery: {} bytes", output.len());
                Ok(output)
            },
            Ok(_) => Err(Error::Decode("FlateDecode produced no data".to_string())),
            Err(e) => Err(Error::Decode(format!("FlateDecode failed: {}", e))),
        }
    }

    fn name(&self) -> &str {
        "FlateDecode"
    }
}

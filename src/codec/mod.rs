/// Codec module for widemap
///
/// Value marshalling is an external concern: the core only ever sees an
/// `encode`/`decode` pair. Two implementations ship with the crate:
/// [`BytesCodec`] for callers that store raw bytes, and [`JsonCodec`]
/// for any serde-serializable value type.
use crate::util::{Result, Slice};

mod json;

pub use json::JsonCodec;

/// Encodes values into stored bytes and back.
///
/// `decode` fails with `Code::Corruption` on malformed stored bytes;
/// the failure is propagated to the caller, never skipped.
pub trait Codec<V>: Send + Sync {
    fn encode(&self, value: &V) -> Result<Slice>;
    fn decode(&self, raw: &Slice) -> Result<V>;
}

/// Identity codec for raw byte values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

impl Codec<Slice> for BytesCodec {
    fn encode(&self, value: &Slice) -> Result<Slice> {
        Ok(value.clone())
    }

    fn decode(&self, raw: &Slice) -> Result<Slice> {
        Ok(raw.clone())
    }
}

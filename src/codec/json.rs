use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::Codec;
use crate::util::{Result, Slice};

/// JSON codec for any serde value type.
///
/// Decode failures surface as `Code::Corruption` via the
/// `From<serde_json::Error>` conversion on `Status`.
pub struct JsonCodec<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> JsonCodec<V> {
    pub fn new() -> Self {
        JsonCodec {
            _marker: PhantomData,
        }
    }
}

impl<V> Default for JsonCodec<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for JsonCodec<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V> Codec<V> for JsonCodec<V>
where
    V: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &V) -> Result<Slice> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Slice::from(bytes))
    }

    fn decode(&self, raw: &Slice) -> Result<V> {
        let value = serde_json::from_slice(raw.data())?;
        Ok(value)
    }
}

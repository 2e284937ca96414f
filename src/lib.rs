pub mod codec;
pub mod iterator;
pub mod map;
pub mod scan;
pub mod statistics;
pub mod store;
pub mod util;

pub use codec::{BytesCodec, Codec, JsonCodec};
pub use iterator::PagedIterator;
pub use map::{Entry, MapOptions, RangeDeleter, RemoveOutcome, WideMap};
pub use scan::{BoundSpec, Page, RangeScanner};
pub use statistics::Statistics;
pub use store::{
    Direction, MemoryStore, OrderedStoreClient, PartialFailure, PartitionId, RawEntry, StoreRange,
};
pub use util::{Code, Result, Slice, Status};

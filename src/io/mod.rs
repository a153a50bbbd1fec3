//! I/O primitives for random-access COG reading

pub mod byte_order;
pub mod seekable;
pub mod source;

pub use byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use seekable::SeekableReader;
pub use source::ByteSource;

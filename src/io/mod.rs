//! Low-level I/O support
//!
//! Seekable reader abstraction and byte-order handling shared by the
//! MRC format layer.

pub mod byte_order;
pub mod seekable;

pub use byte_order::{ByteOrder, ByteOrderHandler, BigEndianHandler, LittleEndianHandler};
pub use seekable::SeekableReader;

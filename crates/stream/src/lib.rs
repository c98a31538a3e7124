//! iotap Stream
//!
//! Transparent taps for byte streams. A tap wraps a reader, a writer or a
//! bidirectional stream and hands every chunk that actually moved to an
//! [`Observer`], without changing the data or the result the caller sees.
//!
//! ```
//! use iotap_stream::{read_write_tap, ObserverFn};
//! use std::io::{Cursor, Write};
//!
//! let mut rw = read_write_tap(
//!     Cursor::new(Vec::<u8>::new()),
//!     None::<ObserverFn>,
//!     Some(|p: &[u8]| eprintln!("debug: write: [{:02x?}]", p)),
//! );
//! rw.write_all(b"foo").unwrap();
//! ```

#![warn(missing_docs)]

pub mod duplex;
pub mod ext;
pub mod observer;
pub mod read;
pub mod write;

#[cfg(feature = "tokio")]
pub mod async_io;
#[cfg(feature = "trace")]
pub mod trace;

pub use duplex::{read_write_tap, ReadWriteTap};
pub use ext::TapExt;
pub use observer::{Observer, ObserverFn};
pub use read::{read_tap, ReadTap};
pub use write::{write_tap, WriteTap};

#[cfg(feature = "trace")]
pub use trace::{Direction, TraceObserver};

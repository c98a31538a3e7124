//! Method-call sugar for building taps.

use crate::observer::Observer;
use crate::read::ReadTap;
use crate::write::WriteTap;

/// Adds `observe_reads` / `observe_writes` to every value.
///
/// Works for both `std::io` and tokio streams, since the taps implement
/// whichever I/O traits the delegate does.
pub trait TapExt: Sized {
    /// Wrap `self` in a [`ReadTap`] reporting to `observer`.
    fn observe_reads<F>(self, observer: F) -> ReadTap<Self, F>
    where
        F: Observer,
    {
        ReadTap::new(self, Some(observer))
    }

    /// Wrap `self` in a [`WriteTap`] reporting to `observer`.
    fn observe_writes<F>(self, observer: F) -> WriteTap<Self, F>
    where
        F: Observer,
    {
        WriteTap::new(self, Some(observer))
    }
}

impl<T> TapExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read, Write};

    #[test]
    fn test_observe_reads() {
        let mut seen = Vec::new();
        let mut out = String::new();

        {
            let mut tap =
                Cursor::new(b"tap me".to_vec()).observe_reads(|p: &[u8]| seen.extend_from_slice(p));
            tap.read_to_string(&mut out).unwrap();
        }

        assert_eq!(out, "tap me");
        assert_eq!(seen, b"tap me");
    }

    #[test]
    fn test_observe_writes_formatted() {
        let mut seen = Vec::new();

        let inner = {
            let mut tap = Vec::<u8>::new().observe_writes(|p: &[u8]| seen.extend_from_slice(p));
            write!(tap, "{}-{}", 1, 2).unwrap();
            tap.into_inner()
        };

        assert_eq!(inner, b"1-2");
        assert_eq!(seen, b"1-2");
    }
}

//! Duplex tap: independent observers for the read and write sides of one stream.

use crate::observer::{Observer, ObserverFn};
use crate::read::{first_nonempty_mut, observed_read};
use crate::write::{first_nonempty, observed_write};
use std::io::{self, IoSlice, IoSliceMut, Read, Write};

/// Wraps a bidirectional stream, observing either side, both, or neither.
///
/// A side configured with an observer behaves exactly like a [`ReadTap`] or
/// [`WriteTap`] over the same stream. A side without one calls straight into
/// the delegate. The two sides share nothing but the delegate itself.
///
/// [`ReadTap`]: crate::ReadTap
/// [`WriteTap`]: crate::WriteTap
#[derive(Debug)]
pub struct ReadWriteTap<S, R = ObserverFn, W = ObserverFn> {
    inner: S,
    read: Option<R>,
    write: Option<W>,
}

/// Wrap `inner`, observing reads with `read` and writes with `write`.
pub fn read_write_tap<S, R, W>(
    inner: S,
    read: Option<R>,
    write: Option<W>,
) -> ReadWriteTap<S, R, W>
where
    S: Read + Write,
    R: Observer,
    W: Observer,
{
    ReadWriteTap::new(inner, read, write)
}

impl<S> ReadWriteTap<S> {
    /// A tap with neither side observed. Attach observers with
    /// [`on_read`](Self::on_read) and [`on_write`](Self::on_write).
    pub fn passthrough(inner: S) -> Self {
        Self::new(inner, None, None)
    }
}

impl<S, R, W> ReadWriteTap<S, R, W> {
    /// Create a new duplex tap.
    pub fn new(inner: S, read: Option<R>, write: Option<W>) -> Self {
        Self { inner, read, write }
    }

    /// Replace the read-side observer.
    pub fn on_read<R2>(self, observer: R2) -> ReadWriteTap<S, R2, W> {
        ReadWriteTap {
            inner: self.inner,
            read: Some(observer),
            write: self.write,
        }
    }

    /// Replace the write-side observer.
    pub fn on_write<W2>(self, observer: W2) -> ReadWriteTap<S, R, W2> {
        ReadWriteTap {
            inner: self.inner,
            read: self.read,
            write: Some(observer),
        }
    }

    /// Returns a reference to the delegate.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Returns a mutable reference to the delegate.
    ///
    /// I/O through this reference bypasses both observers.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwraps the tap, returning the delegate.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Whether reads are observed.
    pub fn reads_observed(&self) -> bool {
        self.read.is_some()
    }

    /// Whether writes are observed.
    pub fn writes_observed(&self) -> bool {
        self.write.is_some()
    }

    /// Returns the read-side observer, if any.
    pub fn read_observer(&self) -> Option<&R> {
        self.read.as_ref()
    }

    /// Returns the write-side observer, if any.
    pub fn write_observer(&self) -> Option<&W> {
        self.write.as_ref()
    }

    pub(crate) fn read_parts(&mut self) -> (&mut S, Option<&mut R>) {
        (&mut self.inner, self.read.as_mut())
    }

    pub(crate) fn write_parts(&mut self) -> (&mut S, Option<&mut W>) {
        (&mut self.inner, self.write.as_mut())
    }
}

impl<S, R, W> Read for ReadWriteTap<S, R, W>
where
    S: Read,
    R: Observer,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_parts() {
            (inner, None) => inner.read(buf),
            (inner, observer) => observed_read(inner, observer, buf),
        }
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        match self.read_parts() {
            (inner, None) => inner.read_vectored(bufs),
            (inner, observer) => observed_read(inner, observer, first_nonempty_mut(bufs)),
        }
    }
}

impl<S, R, W> Write for ReadWriteTap<S, R, W>
where
    S: Write,
    W: Observer,
{
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self.write_parts() {
            (inner, None) => inner.write(data),
            (inner, observer) => observed_write(inner, observer, data),
        }
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        match self.write_parts() {
            (inner, None) => inner.write_vectored(bufs),
            (inner, observer) => observed_write(inner, observer, first_nonempty(bufs)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

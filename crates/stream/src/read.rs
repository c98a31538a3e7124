//! Read-side tap.

use crate::observer::{transferred, Observer};
use std::io::{self, IoSliceMut, Read};

/// Wraps a reader and reports every completed read to an observer.
///
/// The bytes and the result handed back to the caller are exactly what the
/// delegate produced. With no observer the tap is a plain pass-through.
#[derive(Debug)]
pub struct ReadTap<R, F> {
    inner: R,
    observer: Option<F>,
}

/// Wrap `inner` so that `observer`, if any, sees every completed read.
pub fn read_tap<R, F>(inner: R, observer: Option<F>) -> ReadTap<R, F>
where
    R: Read,
    F: Observer,
{
    ReadTap::new(inner, observer)
}

impl<R, F> ReadTap<R, F> {
    /// Create a new read tap.
    pub fn new(inner: R, observer: Option<F>) -> Self {
        Self { inner, observer }
    }

    /// Returns a reference to the delegate.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the delegate.
    ///
    /// Reading through this reference bypasses the observer.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the tap, returning the delegate.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Whether an observer is attached.
    pub fn is_observed(&self) -> bool {
        self.observer.is_some()
    }

    /// Returns the attached observer, if any.
    pub fn observer(&self) -> Option<&F> {
        self.observer.as_ref()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut R, Option<&mut F>) {
        (&mut self.inner, self.observer.as_mut())
    }
}

/// Delegate one read and hand the transferred prefix to `observer`.
pub(crate) fn observed_read<R, F>(
    inner: &mut R,
    observer: Option<&mut F>,
    buf: &mut [u8],
) -> io::Result<usize>
where
    R: Read + ?Sized,
    F: Observer + ?Sized,
{
    let result = inner.read(buf);
    if let Some(observer) = observer {
        observer.observe(transferred(buf, &result));
    }
    result
}

/// The buffer a single-call vectored read fills: the first non-empty one.
pub(crate) fn first_nonempty_mut<'a>(bufs: &'a mut [IoSliceMut<'_>]) -> &'a mut [u8] {
    bufs.iter_mut()
        .find(|b| !b.is_empty())
        .map(|b| &mut **b)
        .unwrap_or_default()
}

impl<R, F> Read for ReadTap<R, F>
where
    R: Read,
    F: Observer,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (inner, observer) = self.parts_mut();
        observed_read(inner, observer, buf)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        match self.parts_mut() {
            (inner, None) => inner.read_vectored(bufs),
            (inner, observer) => observed_read(inner, observer, first_nonempty_mut(bufs)),
        }
    }
}

//! Write-side tap.

use crate::observer::{transferred, Observer};
use std::io::{self, IoSlice, Write};

/// Wraps a writer and reports every completed write to an observer.
///
/// The observer sees only the prefix the delegate accepted, so short writes
/// are reported as short.
#[derive(Debug)]
pub struct WriteTap<W, F> {
    inner: W,
    observer: Option<F>,
}

/// Wrap `inner` so that `observer`, if any, sees every completed write.
pub fn write_tap<W, F>(inner: W, observer: Option<F>) -> WriteTap<W, F>
where
    W: Write,
    F: Observer,
{
    WriteTap::new(inner, observer)
}

impl<W, F> WriteTap<W, F> {
    /// Create a new write tap.
    pub fn new(inner: W, observer: Option<F>) -> Self {
        Self { inner, observer }
    }

    /// Returns a reference to the delegate.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns a mutable reference to the delegate.
    ///
    /// Writing through this reference bypasses the observer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwraps the tap, returning the delegate.
    pub fn into_inner(self) -> W {
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

    pub(crate) fn parts_mut(&mut self) -> (&mut W, Option<&mut F>) {
        (&mut self.inner, self.observer.as_mut())
    }
}

/// Delegate one write and hand the accepted prefix to `observer`.
pub(crate) fn observed_write<W, F>(
    inner: &mut W,
    observer: Option<&mut F>,
    data: &[u8],
) -> io::Result<usize>
where
    W: Write + ?Sized,
    F: Observer + ?Sized,
{
    let result = inner.write(data);
    if let Some(observer) = observer {
        observer.observe(transferred(data, &result));
    }
    result
}

/// The slice a single-call vectored write sends: the first non-empty one.
pub(crate) fn first_nonempty<'a>(bufs: &'a [IoSlice<'_>]) -> &'a [u8] {
    bufs.iter()
        .find(|b| !b.is_empty())
        .map(|b| &**b)
        .unwrap_or_default()
}

impl<W, F> Write for WriteTap<W, F>
where
    W: Write,
    F: Observer,
{
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let (inner, observer) = self.parts_mut();
        observed_write(inner, observer, data)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        match self.parts_mut() {
            (inner, None) => inner.write_vectored(bufs),
            (inner, observer) => observed_write(inner, observer, first_nonempty(bufs)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

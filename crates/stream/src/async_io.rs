//! tokio `AsyncRead`/`AsyncWrite` support for the taps.
//!
//! An operation counts as completed when the delegate returns `Poll::Ready`.
//! `Pending` polls are never observed, so each read or write is still seen
//! exactly once no matter how many times it is polled.

use crate::duplex::ReadWriteTap;
use crate::observer::{transferred, Observer};
use crate::read::ReadTap;
use crate::write::{first_nonempty, WriteTap};
use std::io::{self, IoSlice};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

fn poll_observed_read<R, F>(
    inner: &mut R,
    observer: Option<&mut F>,
    cx: &mut Context<'_>,
    buf: &mut ReadBuf<'_>,
) -> Poll<io::Result<()>>
where
    R: AsyncRead + Unpin + ?Sized,
    F: Observer + ?Sized,
{
    let start = buf.filled().len();
    let result = ready!(Pin::new(inner).poll_read(cx, buf));
    if let Some(observer) = observer {
        observer.observe(buf.filled().get(start..).unwrap_or_default());
    }
    Poll::Ready(result)
}

fn poll_observed_write<W, F>(
    inner: &mut W,
    observer: Option<&mut F>,
    cx: &mut Context<'_>,
    data: &[u8],
) -> Poll<io::Result<usize>>
where
    W: AsyncWrite + Unpin + ?Sized,
    F: Observer + ?Sized,
{
    let result = ready!(Pin::new(inner).poll_write(cx, data));
    if let Some(observer) = observer {
        observer.observe(transferred(data, &result));
    }
    Poll::Ready(result)
}

impl<R, F> AsyncRead for ReadTap<R, F>
where
    R: AsyncRead + Unpin,
    F: Observer + Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let (inner, observer) = self.get_mut().parts_mut();
        poll_observed_read(inner, observer, cx, buf)
    }
}

impl<W, F> AsyncWrite for WriteTap<W, F>
where
    W: AsyncWrite + Unpin,
    F: Observer + Unpin,
{
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        data: &[u8],
    ) -> Poll<io::Result<usize>> {
        let (inner, observer) = self.get_mut().parts_mut();
        poll_observed_write(inner, observer, cx, data)
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut().parts_mut() {
            (inner, None) => Pin::new(inner).poll_write_vectored(cx, bufs),
            (inner, observer) => poll_observed_write(inner, observer, cx, first_nonempty(bufs)),
        }
    }

    fn is_write_vectored(&self) -> bool {
        !self.is_observed() && self.get_ref().is_write_vectored()
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(self.get_mut().get_mut()).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(self.get_mut().get_mut()).poll_shutdown(cx)
    }
}

impl<S, R, W> AsyncRead for ReadWriteTap<S, R, W>
where
    S: AsyncRead + Unpin,
    R: Observer + Unpin,
    W: Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut().read_parts() {
            (inner, None) => Pin::new(inner).poll_read(cx, buf),
            (inner, observer) => poll_observed_read(inner, observer, cx, buf),
        }
    }
}

impl<S, R, W> AsyncWrite for ReadWriteTap<S, R, W>
where
    S: AsyncWrite + Unpin,
    R: Unpin,
    W: Observer + Unpin,
{
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        data: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut().write_parts() {
            (inner, None) => Pin::new(inner).poll_write(cx, data),
            (inner, observer) => poll_observed_write(inner, observer, cx, data),
        }
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut().write_parts() {
            (inner, None) => Pin::new(inner).poll_write_vectored(cx, bufs),
            (inner, observer) => poll_observed_write(inner, observer, cx, first_nonempty(bufs)),
        }
    }

    fn is_write_vectored(&self) -> bool {
        !self.writes_observed() && self.get_ref().is_write_vectored()
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(self.get_mut().get_mut()).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(self.get_mut().get_mut()).poll_shutdown(cx)
    }
}

//! Observer callbacks invoked after every completed read or write.

/// A passive callback that sees each chunk a tap moves.
///
/// `observe` runs synchronously after the delegate operation completes and
/// before the tap returns to its caller. The slice is only valid for the
/// duration of the call: the caller may reuse the buffer on its next
/// operation, so an observer that needs the bytes later has to copy them.
///
/// Any closure taking `&[u8]` is an observer.
pub trait Observer {
    /// Called once per completed operation with exactly the bytes transferred.
    fn observe(&mut self, bytes: &[u8]);
}

impl<F> Observer for F
where
    F: FnMut(&[u8]),
{
    fn observe(&mut self, bytes: &[u8]) {
        self(bytes)
    }
}

/// Default observer type, used to spell an absent observer as `None::<ObserverFn>`.
pub type ObserverFn = fn(&[u8]);

/// Portion of `buf` the delegate reported as transferred.
///
/// Errors transfer nothing. A count past the end of the buffer is clamped.
pub(crate) fn transferred<'a>(buf: &'a [u8], result: &std::io::Result<usize>) -> &'a [u8] {
    match result {
        Ok(n) => &buf[..(*n).min(buf.len())],
        Err(_) => &buf[..0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_closure_is_observer() {
        let mut seen = Vec::new();
        {
            let mut obs = |p: &[u8]| seen.extend_from_slice(p);
            obs.observe(b"ab");
            obs.observe(b"c");
        }
        assert_eq!(seen, b"abc");
    }

    #[test]
    fn test_boxed_observer() {
        let mut obs: Box<dyn FnMut(&[u8]) + Send> = Box::new(|p: &[u8]| assert_eq!(p, b"x"));
        obs.observe(b"x");
    }

    #[test]
    fn test_transferred_prefix() {
        let buf = b"foobar";
        assert_eq!(transferred(buf, &Ok(3)), b"foo");
        assert_eq!(transferred(buf, &Ok(0)), b"");
    }

    #[test]
    fn test_transferred_error_is_empty() {
        let err = Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(transferred(b"foo", &err).is_empty());
    }

    #[test]
    fn test_transferred_clamps_overlong_count() {
        assert_eq!(transferred(b"foo", &Ok(10)), b"foo");
    }
}

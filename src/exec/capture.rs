//! Caller-owned output sink for executed code.
//!
//! The patcher redirects the standard output symbol of a class to a capture class; whatever the
//! invoked code prints ends up in a [`CaptureBuffer`]. The buffer is passed explicitly to the
//! [`crate::exec::EntryInvoker`] instead of living in process-wide state, so concurrent
//! executions never see each other's output.

use std::io;

/// Collects the bytes written by invoked code.
///
/// `CaptureBuffer` implements [`std::io::Write`], which lets invokers hand it to anything that
/// writes output. [`crate::exec::Executor::execute`] clears it before each invocation.
///
/// # Examples
///
/// ```rust
/// use std::io::Write;
/// use classpatch::exec::CaptureBuffer;
///
/// let mut sink = CaptureBuffer::new();
/// writeln!(sink, "Hello")?;
/// assert_eq!(sink.contents(), "Hello\n");
///
/// sink.clear();
/// assert!(sink.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CaptureBuffer {
    data: Vec<u8>,
}

impl CaptureBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        CaptureBuffer::default()
    }

    /// The captured output decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// The raw captured bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of captured bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Discards everything captured so far.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl io::Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn collects_writes() {
        let mut sink = CaptureBuffer::new();
        sink.write_all(b"one ").unwrap();
        write!(sink, "{}", 2).unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.contents(), "one 2");
        assert_eq!(sink.len(), 5);
        assert_eq!(sink.as_bytes(), b"one 2");
    }

    #[test]
    fn lossy_contents() {
        let mut sink = CaptureBuffer::new();
        sink.write_all(&[b'o', b'k', 0xFF]).unwrap();
        assert_eq!(sink.contents(), "ok\u{FFFD}");
    }
}

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::MalformedConstant {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedConstant {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_range_error {
    ($offset:expr, $len:expr, $size:expr) => {
        crate::Error::OutOfRange {
            offset: $offset,
            len: $len,
            size: $size,
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The patcher treats every input buffer as untrusted. Each variant is raised at the exact point
/// where a violation is detected, and no operation retries or repairs its input. A literal that
/// is simply not present in the constant pool is *not* an error, see
/// [`crate::classfile::PatchOutcome::Unchanged`].
///
/// # Error Categories
///
/// ## Buffer Errors
/// - [`Error::OutOfRange`] - An index or length falls outside the buffer
/// - [`Error::Decoding`] - A text record does not hold valid UTF-8
/// - [`Error::EncodingOverflow`] - An integer does not fit the requested width
///
/// ## Format Errors
/// - [`Error::MalformedConstant`] - Unknown tag, or a constant pool that cannot be walked
///
/// ## Collaborator Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Load`] - The module loader rejected the patched bytes
/// - [`Error::Invoke`] - The entry point could not be resolved or failed
///
/// # Examples
///
/// ```rust
/// use classpatch::{classfile::ConstantPoolPatcher, Error};
///
/// let patcher = ConstantPoolPatcher::new(vec![0xCA, 0xFE]);
/// match patcher.count() {
///     Err(Error::OutOfRange { offset, len, size }) => {
///         assert_eq!((offset, len, size), (8, 2, 2));
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An index or length outside the buffer bounds was requested.
    ///
    /// Raised by every [`crate::file::io`] primitive before any byte is touched, so a failed
    /// read or splice never produces a partial result.
    ///
    /// # Fields
    ///
    /// * `offset` - Start of the requested range
    /// * `len` - Length of the requested range
    /// * `size` - Length of the buffer the range was checked against
    #[error("Range {offset}+{len} is outside of a {size} byte buffer")]
    OutOfRange {
        /// Start of the requested range
        offset: usize,
        /// Length of the requested range
        len: usize,
        /// Size of the underlying buffer
        size: usize,
    },

    /// The constant pool could not be interpreted.
    ///
    /// This covers tags that are not recognized, tags without a defined fixed length (0, 2 and
    /// the invoke-dynamic family), and declared counts that can not describe a valid table.
    /// The error includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    MalformedConstant {
        /// The message to be printed for the MalformedConstant error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A text record does not contain valid UTF-8.
    #[error("Invalid UTF-8 text at offset {offset}: {source}")]
    Decoding {
        /// Offset of the first byte of the text
        offset: usize,
        /// The underlying decoder error
        source: std::str::Utf8Error,
    },

    /// An integer does not fit into the requested number of bytes.
    ///
    /// Writing never truncates; a length prefix that would lose high bits is rejected instead.
    #[error("Value {value} does not fit into {width} byte(s)")]
    EncodingOverflow {
        /// The value that was to be encoded
        value: u64,
        /// The requested width in bytes
        width: usize,
    },

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The module loader rejected the patched binary.
    #[error("Failed to load module - {0}")]
    Load(String),

    /// Resolving or running the entry point failed.
    #[error("Failed to invoke entry point - {0}")]
    Invoke(String),
}

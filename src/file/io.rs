//! Bounds-checked byte codec for class file patching.
//!
//! This module provides the primitive conversions every other component delegates to: reading
//! big-endian unsigned integers and UTF-8 text out of a byte range, encoding integers into a
//! fixed number of bytes, and splicing a replacement into a buffer. Class files store all
//! multi-byte quantities in big-endian order, so unlike most binary readers there is no
//! little-endian counterpart here.
//!
//! # Key Components
//!
//! ## Typed Reading
//! - [`crate::file::io::BeIO`] - Trait describing how a primitive is decoded from big-endian bytes
//! - [`crate::file::io::read_be_at`] - Read a value at an offset and advance the offset
//!
//! ## Dynamic Width Access
//! - [`crate::file::io::is_valid_index`] - Check that an index addresses a byte of the buffer
//! - [`crate::file::io::read_be_uint`] - Read 1 to 8 bytes as an unsigned integer
//! - [`crate::file::io::read_utf8`] - Borrow a byte range as UTF-8 text
//! - [`crate::file::io::write_be_uint`] - Encode an unsigned integer into exactly `len` bytes
//! - [`crate::file::io::splice_replace`] - Produce a new buffer with one range replaced
//!
//! # Examples
//!
//! ```rust
//! use classpatch::file::io::{read_be_uint, splice_replace, write_be_uint};
//!
//! let data = [0x00, 0x05, b'H', b'e', b'l', b'l', b'o'];
//! assert_eq!(read_be_uint(&data, 0, 2)?, 5);
//!
//! let prefix = write_be_uint(3, 2)?;
//! let patched = splice_replace(&data, 0, 2, &prefix)?;
//! assert_eq!(&patched[..2], &[0x00, 0x03]);
//! # Ok::<(), classpatch::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Every function validates its whole range before touching a byte and reports
//! [`crate::Error::OutOfRange`] otherwise. Text that fails to decode yields
//! [`crate::Error::Decoding`], and integers that do not fit their width yield
//! [`crate::Error::EncodingOverflow`] rather than being truncated.
//!
//! # Thread Safety
//!
//! All functions are pure and never mutate their inputs; splicing always allocates a new buffer.

use crate::{Error, Result};

/// Widest integer [`read_be_uint`] and [`write_be_uint`] operate on.
const MAX_UINT_WIDTH: usize = std::mem::size_of::<u64>();

/// Trait for implementing type-specific safe big-endian reading.
///
/// Each implementation names the fixed-size byte array it is decoded from, so the generic
/// readers can slice exactly `size_of::<T>()` bytes and convert them without any unsafe code.
pub trait BeIO: Sized {
    /// Byte array representation of this type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

impl BeIO for u64 {
    type Bytes = [u8; 8];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u64::from_be_bytes(bytes)
    }
}

impl BeIO for u32 {
    type Bytes = [u8; 4];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u32::from_be_bytes(bytes)
    }
}

impl BeIO for u16 {
    type Bytes = [u8; 2];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u16::from_be_bytes(bytes)
    }
}

impl BeIO for u8 {
    type Bytes = [u8; 1];

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        u8::from_be_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in big-endian byte order at `offset`, advancing it.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Position to read at; advanced by `size_of::<T>()` on success
///
/// # Errors
///
/// Returns [`crate::Error::OutOfRange`] if fewer than `size_of::<T>()` bytes remain. The offset
/// is left untouched in that case.
///
/// # Examples
///
/// ```rust
/// use classpatch::file::io::read_be_at;
///
/// let data = [0x01, 0x00, 0x05];
/// let mut offset = 0;
/// let tag: u8 = read_be_at(&data, &mut offset)?;
/// let length: u16 = read_be_at(&data, &mut offset)?;
/// assert_eq!((tag, length, offset), (1, 5, 3));
/// # Ok::<(), classpatch::Error>(())
/// ```
pub fn read_be_at<T: BeIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = check_range(data, *offset, type_len)?;

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(out_of_range_error!(*offset, type_len, data.len()));
    };

    *offset = end;
    Ok(T::from_be_bytes(read))
}

/// Returns `true` if `index` addresses a byte of a non-empty `data`.
///
/// # Examples
///
/// ```rust
/// use classpatch::file::io::is_valid_index;
///
/// assert!(is_valid_index(&[1, 2, 3], 2));
/// assert!(!is_valid_index(&[1, 2, 3], 3));
/// assert!(!is_valid_index(&[], 0));
/// ```
#[must_use]
pub fn is_valid_index(data: &[u8], index: usize) -> bool {
    !data.is_empty() && index < data.len()
}

/// Validates that `len` bytes starting at `start` lie inside `data`, returning the end offset.
///
/// A zero length is rejected as well, since every caller addresses at least one byte.
fn check_range(data: &[u8], start: usize, len: usize) -> Result<usize> {
    if len == 0 || !is_valid_index(data, start) {
        return Err(out_of_range_error!(start, len, data.len()));
    }

    match start.checked_add(len) {
        Some(end) if is_valid_index(data, end - 1) => Ok(end),
        _ => Err(out_of_range_error!(start, len, data.len())),
    }
}

/// Interprets `len` bytes at `start` as a big-endian unsigned integer.
///
/// In practice `len` is 1, 2 or 4, which are the `u1`, `u2` and `u4` quantities of the class
/// file format, but any width up to 8 bytes is accepted.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfRange`] if `len` is 0 or wider than 8 bytes, or if the range
/// `start..start + len` does not lie inside `data`.
///
/// # Examples
///
/// ```rust
/// use classpatch::file::io::read_be_uint;
///
/// let data = [0xCA, 0xFE, 0xBA, 0xBE];
/// assert_eq!(read_be_uint(&data, 0, 4)?, 0xCAFE_BABE);
/// assert_eq!(read_be_uint(&data, 1, 1)?, 0xFE);
/// assert!(read_be_uint(&data, 3, 2).is_err());
/// # Ok::<(), classpatch::Error>(())
/// ```
pub fn read_be_uint(data: &[u8], start: usize, len: usize) -> Result<u64> {
    if len > MAX_UINT_WIDTH {
        return Err(out_of_range_error!(start, len, data.len()));
    }
    let end = check_range(data, start, len)?;

    Ok(data[start..end]
        .iter()
        .fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte)))
}

/// Decodes `len` bytes at `start` as UTF-8 text, borrowing from `data`.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfRange`] under the same conditions as [`read_be_uint`] (without
/// the width limit), and [`crate::Error::Decoding`] if the bytes are not valid UTF-8.
pub fn read_utf8(data: &[u8], start: usize, len: usize) -> Result<&str> {
    let end = check_range(data, start, len)?;

    std::str::from_utf8(&data[start..end]).map_err(|source| Error::Decoding {
        offset: start,
        source,
    })
}

/// Encodes `value` into exactly `len` big-endian bytes, most significant byte first.
///
/// # Errors
///
/// Returns [`crate::Error::EncodingOverflow`] if `value` needs more than `len` bytes, and
/// [`crate::Error::OutOfRange`] if `len` is 0 or wider than 8 bytes.
///
/// # Examples
///
/// ```rust
/// use classpatch::{file::io::write_be_uint, Error};
///
/// assert_eq!(write_be_uint(7, 2)?, vec![0x00, 0x07]);
/// assert!(matches!(
///     write_be_uint(0x1_0000, 2),
///     Err(Error::EncodingOverflow { value: 0x1_0000, width: 2 })
/// ));
/// # Ok::<(), classpatch::Error>(())
/// ```
pub fn write_be_uint(value: u64, len: usize) -> Result<Vec<u8>> {
    if len == 0 || len > MAX_UINT_WIDTH {
        return Err(out_of_range_error!(0, len, MAX_UINT_WIDTH));
    }

    if len < MAX_UINT_WIDTH && value >> (len * 8) != 0 {
        return Err(Error::EncodingOverflow { value, width: len });
    }

    Ok(value.to_be_bytes()[MAX_UINT_WIDTH - len..].to_vec())
}

/// Returns a new buffer equal to `data[..start] ++ replacement ++ data[start + len..]`.
///
/// The input is never modified. The resulting length is `data.len() - len + replacement.len()`,
/// and the bytes outside the replaced range are preserved in order.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfRange`] if `len` is 0 or the range `start..start + len` does not
/// lie inside `data`.
///
/// # Examples
///
/// ```rust
/// use classpatch::file::io::splice_replace;
///
/// let data = b"java/lang/System";
/// let patched = splice_replace(data, 10, 6, b"Out")?;
/// assert_eq!(patched, b"java/lang/Out");
/// assert_eq!(data, b"java/lang/System");
/// # Ok::<(), classpatch::Error>(())
/// ```
pub fn splice_replace(data: &[u8], start: usize, len: usize, replacement: &[u8]) -> Result<Vec<u8>> {
    let end = check_range(data, start, len)?;

    let mut spliced = Vec::with_capacity(data.len() - len + replacement.len());
    spliced.extend_from_slice(&data[..start]);
    spliced.extend_from_slice(replacement);
    spliced.extend_from_slice(&data[end..]);
    Ok(spliced)
}

//! Cursor-based reader for sequential class file decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a small cursor over a byte
//! slice. The constant pool scanner uses it to step from record to record: read a tag, read a
//! length, skip a payload. Every access is bounds-checked through [`crate::file::io`].
//!
//! # Key Components
//!
//! ## Navigation Methods
//! - [`crate::file::parser::Parser::seek`] - Move to a specific position
//! - [`crate::file::parser::Parser::advance_by`] - Move forward by a number of bytes
//! - [`crate::file::parser::Parser::pos`] - Get the current position
//!
//! ## Data Access Methods
//! - [`crate::file::parser::Parser::read_be`] - Read big-endian primitives
//! - [`crate::file::parser::Parser::read_utf8`] - Borrow a run of bytes as UTF-8 text
//!
//! # Examples
//!
//! ```rust
//! use classpatch::Parser;
//!
//! // tag 1, length 2, "Hi"
//! let data = [0x01, 0x00, 0x02, b'H', b'i'];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_be::<u8>()?, 1);
//! let length = parser.read_be::<u16>()?;
//! assert_eq!(parser.read_utf8(usize::from(length))?, "Hi");
//! assert_eq!(parser.pos(), data.len());
//! # Ok::<(), classpatch::Error>(())
//! ```

use crate::{
    file::io::{read_be_at, read_utf8, BeIO},
    Result,
};

/// A binary data parser for reading class file structures.
///
/// `Parser` keeps a position within a borrowed byte slice and validates every read against
/// the slice length, so truncated or hostile input surfaces as [`crate::Error::OutOfRange`]
/// instead of a panic.
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Move the current position to the specified index.
    ///
    /// Seeking to exactly the end of the data is allowed and leaves nothing to read.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if position is beyond the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use classpatch::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// parser.seek(2)?;
    /// assert_eq!(parser.read_be::<u8>()?, 0x03);
    /// # Ok::<(), classpatch::Error>(())
    /// ```
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(out_of_range_error!(pos, 0, self.data.len()));
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        self.position = self.calc_end_position(step)?;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Read a type `T` from the current position in big-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if reading would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use classpatch::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// let value: u16 = parser.read_be()?;
    /// assert_eq!(value, 0x0102);
    /// assert_eq!(parser.pos(), 2);
    /// # Ok::<(), classpatch::Error>(())
    /// ```
    pub fn read_be<T: BeIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Calculates an end position safely with overflow checking.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the calculation would overflow
    /// or if the resulting position exceeds the data length.
    pub fn calc_end_position(&self, length: usize) -> Result<usize> {
        match self.position.checked_add(length) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(out_of_range_error!(self.position, length, self.data.len())),
        }
    }

    /// Reads `length` bytes as UTF-8 text and advances past them.
    ///
    /// A zero length yields an empty string without touching the data.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if reading would exceed the data length, or
    /// [`crate::Error::Decoding`] if the bytes are not valid UTF-8. The position is unchanged
    /// on error.
    pub fn read_utf8(&mut self, length: usize) -> Result<&'a str> {
        if length == 0 {
            return Ok("");
        }

        let text = read_utf8(self.data, self.position, length)?;
        self.position += length;
        Ok(text)
    }
}

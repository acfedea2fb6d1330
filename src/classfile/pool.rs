use crate::{
    classfile::{
        constant::{ConstantRecord, ConstantTag, FixedRecord, RecordHeader, TextRecord},
        header::{CONSTANT_POOL_COUNT_OFFSET, CONSTANT_POOL_OFFSET},
    },
    file::{io::read_be_uint, parser::Parser},
    Result,
};

/// Walks the constant pool of a class file record by record.
///
/// The declared count in the header is one more than the number of slots the pool defines,
/// and `CONSTANT_Long` / `CONSTANT_Double` records occupy two slots each. The iterator visits
/// slots `1..count` accordingly and stops at the first byte after the table.
///
/// Every record boundary must hold a supported tag. Anything else is reported once as
/// [`crate::Error::MalformedConstant`] (or [`crate::Error::OutOfRange`] for truncated data),
/// after which the iterator is exhausted.
///
/// # Examples
///
/// ```rust
/// use classpatch::classfile::{ConstantIter, ConstantRecord};
///
/// let mut data = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x03];
/// data.extend_from_slice(&[0x01, 0x00, 0x02, b'H', b'i']);
/// data.extend_from_slice(&[0x07, 0x00, 0x01]);
///
/// let records = ConstantIter::new(&data)?.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(records.len(), 2);
/// assert!(matches!(records[0], ConstantRecord::Text(ref text) if text.length == 2));
/// assert_eq!(records[1].header().offset, 15);
/// # Ok::<(), classpatch::Error>(())
/// ```
pub struct ConstantIter<'a> {
    parser: Parser<'a>,
    /// Slot the next record will occupy
    next_slot: u32,
    /// Declared constant pool count
    count: u32,
    /// Set once an error has been yielded
    failed: bool,
}

impl<'a> ConstantIter<'a> {
    /// Creates an iterator over the constant pool of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfRange`] if the header is truncated and
    /// [`crate::Error::MalformedConstant`] if the declared count is 0, which no valid class file
    /// can have.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let count = read_be_uint(data, CONSTANT_POOL_COUNT_OFFSET, 2)?;
        if count == 0 {
            return Err(malformed_error!("Constant pool count must be at least 1"));
        }

        let mut parser = Parser::new(data);
        parser.seek(CONSTANT_POOL_OFFSET)?;
        log::debug!("Constant pool declares {} entries", count - 1);

        Ok(ConstantIter {
            parser,
            next_slot: 1,
            count: count as u32,
            failed: false,
        })
    }

    /// Byte offset of the next record, or of the first byte after the table once exhausted.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.parser.pos()
    }

    /// Decodes the record starting at the current position.
    fn read_record(&mut self) -> Result<ConstantRecord> {
        let offset = self.parser.pos();
        let raw_tag = self.parser.read_be::<u8>()?;
        let tag = ConstantTag::from_byte(raw_tag)?;

        let header = RecordHeader {
            tag,
            offset,
            index: self.next_slot as u16,
        };

        let record = match tag.fixed_length() {
            None => {
                let length_offset = self.parser.pos();
                let length = self.parser.read_be::<u16>()?;
                let text_offset = self.parser.pos();
                self.parser.advance_by(usize::from(length))?;

                ConstantRecord::Text(TextRecord {
                    header,
                    length_offset,
                    length,
                    text_offset,
                })
            }
            Some(span) => {
                self.parser.advance_by(span - 1)?;
                ConstantRecord::Fixed(FixedRecord { header, span })
            }
        };

        log::trace!(
            "#{} {} at offset {} spanning {} bytes",
            header.index,
            tag,
            offset,
            record.span()
        );

        self.next_slot += tag.slots();
        Ok(record)
    }
}

impl Iterator for ConstantIter<'_> {
    type Item = Result<ConstantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_slot >= self.count {
            return None;
        }

        let record = self.read_record();
        if record.is_err() {
            self.failed = true;
        }
        Some(record)
    }
}

impl std::iter::FusedIterator for ConstantIter<'_> {}

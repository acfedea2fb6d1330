use strum::{Display, EnumCount, EnumIter};

use crate::{file::parser::Parser, Result};

/// Byte span of each constant kind indexed by tag, tag byte included.
///
/// `None` marks tags that either have no associated constant (0 and 2) or whose length is not
/// fixed (1, `CONSTANT_Utf8`). The table stops at tag 12; the invoke-dynamic family introduced
/// later has no entry and is rejected.
pub const FIXED_LENGTHS: [Option<usize>; 13] = [
    None,
    None,
    None,
    Some(5),
    Some(5),
    Some(9),
    Some(9),
    Some(3),
    Some(3),
    Some(5),
    Some(5),
    Some(5),
    Some(5),
];

/// Returns the fixed byte span of a constant with the given tag.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedConstant`] for tags without a defined fixed length,
/// including tag 1 whose length is variable.
///
/// # Examples
///
/// ```rust
/// use classpatch::classfile::fixed_length;
///
/// assert_eq!(fixed_length(3)?, 5);
/// assert_eq!(fixed_length(6)?, 9);
/// assert!(fixed_length(2).is_err());
/// assert!(fixed_length(18).is_err());
/// # Ok::<(), classpatch::Error>(())
/// ```
pub fn fixed_length(tag: u8) -> Result<usize> {
    match FIXED_LENGTHS.get(usize::from(tag)) {
        Some(Some(length)) => Ok(*length),
        _ => Err(malformed_error!("Tag {} has no fixed length", tag)),
    }
}

/// Kinds of constant pool entries that can be walked.
///
/// The discriminants are the tag bytes stored in the class file. Only the kinds that existed
/// up to class file version 50 are listed; `MethodHandle`, `MethodType`, `Dynamic`,
/// `InvokeDynamic`, `Module` and `Package` are reported as malformed by
/// [`ConstantTag::from_byte`].
///
/// ## Reference
/// * [JVMS §4.4](https://docs.oracle.com/javase/specs/jvms/se8/html/jvms-4.html#jvms-4.4) - The Constant Pool
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount)]
#[repr(u8)]
pub enum ConstantTag {
    /// `CONSTANT_Utf8` (1) - A length-prefixed text literal; the only kind that is rewritten.
    Utf8 = 1,
    /// `CONSTANT_Integer` (3) - A 4 byte integer.
    Integer = 3,
    /// `CONSTANT_Float` (4) - A 4 byte float.
    Float = 4,
    /// `CONSTANT_Long` (5) - An 8 byte integer, occupies two slots.
    Long = 5,
    /// `CONSTANT_Double` (6) - An 8 byte float, occupies two slots.
    Double = 6,
    /// `CONSTANT_Class` (7) - Index of the class name.
    Class = 7,
    /// `CONSTANT_String` (8) - Index of the string literal text.
    String = 8,
    /// `CONSTANT_Fieldref` (9) - Class and name-and-type indices of a field.
    Fieldref = 9,
    /// `CONSTANT_Methodref` (10) - Class and name-and-type indices of a method.
    Methodref = 10,
    /// `CONSTANT_InterfaceMethodref` (11) - Class and name-and-type indices of an interface method.
    InterfaceMethodref = 11,
    /// `CONSTANT_NameAndType` (12) - Name and descriptor indices.
    NameAndType = 12,
}

impl ConstantTag {
    /// Decodes a tag byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedConstant`] for any byte that is not a supported tag.
    pub fn from_byte(tag: u8) -> Result<ConstantTag> {
        Ok(match tag {
            1 => ConstantTag::Utf8,
            3 => ConstantTag::Integer,
            4 => ConstantTag::Float,
            5 => ConstantTag::Long,
            6 => ConstantTag::Double,
            7 => ConstantTag::Class,
            8 => ConstantTag::String,
            9 => ConstantTag::Fieldref,
            10 => ConstantTag::Methodref,
            11 => ConstantTag::InterfaceMethodref,
            12 => ConstantTag::NameAndType,
            15..=20 => {
                return Err(malformed_error!(
                    "Constant tag {} belongs to the unsupported invoke-dynamic family",
                    tag
                ))
            }
            _ => return Err(malformed_error!("Unknown constant tag {}", tag)),
        })
    }

    /// The raw tag byte.
    #[must_use]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Fixed byte span of this kind, or `None` for [`ConstantTag::Utf8`].
    #[must_use]
    pub fn fixed_length(self) -> Option<usize> {
        FIXED_LENGTHS[usize::from(self.to_byte())]
    }

    /// Number of constant pool slots an entry of this kind occupies.
    #[must_use]
    pub fn slots(self) -> u32 {
        match self {
            ConstantTag::Long | ConstantTag::Double => 2,
            _ => 1,
        }
    }
}

/// Position and kind of one record, computed while scanning.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RecordHeader {
    /// Kind of the record
    pub tag: ConstantTag,
    /// Byte offset of the tag within the buffer
    pub offset: usize,
    /// Constant pool index (slot) of the record, starting at 1
    pub index: u16,
}

/// A `CONSTANT_Utf8` record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextRecord {
    /// Tag, offset and index of the record
    pub header: RecordHeader,
    /// Byte offset of the 2 byte length prefix
    pub length_offset: usize,
    /// Length of the text in bytes
    pub length: u16,
    /// Byte offset of the first text byte
    pub text_offset: usize,
}

impl TextRecord {
    /// Borrows the text of this record from the buffer it was scanned from.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decoding`] if the text is not valid UTF-8, or
    /// [`crate::Error::OutOfRange`] if `data` is not the buffer the record came from.
    pub fn text<'a>(&self, data: &'a [u8]) -> Result<&'a str> {
        let mut parser = Parser::new(data);
        parser.seek(self.text_offset)?;
        parser.read_utf8(usize::from(self.length))
    }
}

/// A record with a fixed byte span.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FixedRecord {
    /// Tag, offset and index of the record
    pub header: RecordHeader,
    /// Total byte span, tag included
    pub span: usize,
}

/// One record of the constant pool, as yielded by [`crate::classfile::ConstantIter`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConstantRecord {
    /// A `CONSTANT_Utf8` record
    Text(TextRecord),
    /// Any other supported record
    Fixed(FixedRecord),
}

impl ConstantRecord {
    /// Tag, offset and index of the record.
    #[must_use]
    pub fn header(&self) -> &RecordHeader {
        match self {
            ConstantRecord::Text(text) => &text.header,
            ConstantRecord::Fixed(fixed) => &fixed.header,
        }
    }

    /// Total byte span of the record, tag included.
    #[must_use]
    pub fn span(&self) -> usize {
        match self {
            ConstantRecord::Text(text) => 3 + usize::from(text.length),
            ConstantRecord::Fixed(fixed) => fixed.span,
        }
    }

    /// Number of constant pool slots the record occupies.
    #[must_use]
    pub fn slots(&self) -> u32 {
        self.header().tag.slots()
    }

    /// The text record, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextRecord> {
        match self {
            ConstantRecord::Text(text) => Some(text),
            ConstantRecord::Fixed(_) => None,
        }
    }
}

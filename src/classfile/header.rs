use crate::{file::parser::Parser, Result};

/// Magic number at the start of every JVM class file.
pub const JAVA_MAGIC: u32 = 0xCAFE_BABE;

/// Byte offset of the declared constant pool count.
pub const CONSTANT_POOL_COUNT_OFFSET: usize = 8;

/// Byte offset of the first constant pool record.
pub const CONSTANT_POOL_OFFSET: usize = 10;

/// The fixed prologue of a class file.
///
/// The patcher passes magic and version numbers through untouched; they are decoded here only
/// for reporting. Nothing requires the magic to be [`JAVA_MAGIC`].
///
/// ```text
/// offset 0..4   magic
/// offset 4..6   minor version
/// offset 6..8   major version
/// offset 8..10  constant pool count (entries + 1)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClassHeader {
    /// File magic
    pub magic: u32,
    /// Minor format version
    pub minor_version: u16,
    /// Major format version
    pub major_version: u16,
    /// Declared constant pool count
    pub constant_pool_count: u16,
}

impl ClassHeader {
    /// Decodes the first 10 bytes of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfRange`] if `data` is shorter than 10 bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use classpatch::classfile::ClassHeader;
    ///
    /// let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x01];
    /// let header = ClassHeader::parse(&data)?;
    /// assert!(header.has_java_magic());
    /// assert_eq!(header.major_version, 52);
    /// assert_eq!(header.constant_pool_count, 1);
    /// # Ok::<(), classpatch::Error>(())
    /// ```
    pub fn parse(data: &[u8]) -> Result<ClassHeader> {
        let mut parser = Parser::new(data);

        Ok(ClassHeader {
            magic: parser.read_be::<u32>()?,
            minor_version: parser.read_be::<u16>()?,
            major_version: parser.read_be::<u16>()?,
            constant_pool_count: parser.read_be::<u16>()?,
        })
    }

    /// Returns `true` if the magic is `0xCAFEBABE`.
    #[must_use]
    pub fn has_java_magic(&self) -> bool {
        self.magic == JAVA_MAGIC
    }

    /// Number of slots the constant pool defines, which is one less than the declared count.
    #[must_use]
    pub fn defined_slots(&self) -> u16 {
        self.constant_pool_count.saturating_sub(1)
    }
}

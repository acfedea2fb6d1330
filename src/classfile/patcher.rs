use std::path::Path;

use crate::{
    classfile::{
        constant::TextRecord,
        header::{ClassHeader, CONSTANT_POOL_COUNT_OFFSET},
        pool::ConstantIter,
    },
    file::io::{read_be_uint, splice_replace, write_be_uint},
    Result,
};

/// Width of the `CONSTANT_Utf8` length prefix in bytes.
const LENGTH_PREFIX_WIDTH: usize = 2;

/// Where a literal substitution took place.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PatchLocation {
    /// The matched record as it was laid out before patching
    pub record: TextRecord,
    /// Byte length of the replacement literal
    pub new_length: u16,
}

impl PatchLocation {
    /// By how many bytes every record after the patched one moved.
    #[must_use]
    pub fn shift(&self) -> isize {
        self.new_length as isize - self.record.length as isize
    }
}

/// Result of [`ConstantPoolPatcher::patch_utf8`].
///
/// A missing literal is an ordinary outcome, so callers must look at the variant instead of
/// assuming the returned buffer was modified.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PatchOutcome {
    /// The first matching record was rewritten.
    Patched {
        /// The patched buffer
        data: Vec<u8>,
        /// Location of the rewritten record
        location: PatchLocation,
    },
    /// No record matched; the buffer is returned as it was passed in.
    Unchanged(Vec<u8>),
}

impl PatchOutcome {
    /// Returns `true` if a record was rewritten.
    #[must_use]
    pub fn is_patched(&self) -> bool {
        matches!(self, PatchOutcome::Patched { .. })
    }

    /// The resulting buffer, patched or not.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match self {
            PatchOutcome::Patched { data, .. } | PatchOutcome::Unchanged(data) => data,
        }
    }

    /// Location of the rewritten record, if any.
    #[must_use]
    pub fn location(&self) -> Option<&PatchLocation> {
        match self {
            PatchOutcome::Patched { location, .. } => Some(location),
            PatchOutcome::Unchanged(_) => None,
        }
    }

    /// Consumes the outcome, returning the resulting buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        match self {
            PatchOutcome::Patched { data, .. } | PatchOutcome::Unchanged(data) => data,
        }
    }
}

/// Rewrites `CONSTANT_Utf8` literals in the constant pool of a class file.
///
/// The patcher owns one buffer. Lookups borrow it; [`ConstantPoolPatcher::patch_utf8`] consumes
/// the patcher and hands the buffer back inside a [`PatchOutcome`], so a caller can never keep
/// using the pre-splice bytes by accident.
///
/// # Examples
///
/// ```rust
/// use classpatch::classfile::ConstantPoolPatcher;
///
/// let mut data = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x02];
/// data.extend_from_slice(&[0x01, 0x00, 0x05]);
/// data.extend_from_slice(b"Hello");
///
/// let outcome = ConstantPoolPatcher::new(data).patch_utf8("hello", "World!!")?;
/// assert!(outcome.is_patched());
/// assert_eq!(&outcome.data()[10..13], &[0x01, 0x00, 0x07]);
/// assert_eq!(&outcome.data()[13..], b"World!!");
/// # Ok::<(), classpatch::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConstantPoolPatcher {
    data: Vec<u8>,
}

impl ConstantPoolPatcher {
    /// Creates a patcher over `data`.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        ConstantPoolPatcher { data }
    }

    /// Creates a patcher over the contents of a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file can not be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(crate::file::load(path)?))
    }

    /// The buffer being patched.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the patcher, returning its buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Decodes the class file prologue.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfRange`] if the buffer is shorter than 10 bytes.
    pub fn header(&self) -> Result<ClassHeader> {
        ClassHeader::parse(&self.data)
    }

    /// Reads the declared constant pool count at offset 8.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfRange`] if the buffer is shorter than 10 bytes.
    pub fn count(&self) -> Result<u16> {
        let count = read_be_uint(&self.data, CONSTANT_POOL_COUNT_OFFSET, 2)?;
        Ok(count as u16)
    }

    /// Iterates over the records of the constant pool.
    ///
    /// # Errors
    ///
    /// See [`ConstantIter::new`].
    pub fn constants(&self) -> Result<ConstantIter<'_>> {
        ConstantIter::new(&self.data)
    }

    /// Finds the first text record matching `literal`, ignoring case.
    ///
    /// # Errors
    ///
    /// Propagates any scanning or decoding error met before the match.
    pub fn find_utf8(&self, literal: &str) -> Result<Option<TextRecord>> {
        for record in self.constants()? {
            let Some(text) = record?.as_text().copied() else {
                continue;
            };

            if text.length > 0 && eq_ignore_case(text.text(&self.data)?, literal) {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

    /// Replaces the first text record equal to `old` (ignoring case) with `new`.
    ///
    /// The record's text is spliced out and `new` spliced in, then the 2 byte length prefix is
    /// rewritten to match. Every byte after the record shifts by the length difference; nothing
    /// else changes. Scanning stops at the first match, and empty records never match.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::EncodingOverflow`] if a record matches and `new` is longer than 65535
    ///   bytes
    /// - [`crate::Error::MalformedConstant`] for an unknown tag before the match
    /// - [`crate::Error::OutOfRange`] for truncated records before the match
    /// - [`crate::Error::Decoding`] for a text record that is not valid UTF-8 before the match
    pub fn patch_utf8(self, old: &str, new: &str) -> Result<PatchOutcome> {
        let Some(record) = self.find_utf8(old)? else {
            log::debug!("No text record matches '{old}'");
            return Ok(PatchOutcome::Unchanged(self.data));
        };

        let replacement = new.as_bytes();
        let prefix = write_be_uint(replacement.len() as u64, LENGTH_PREFIX_WIDTH)?;

        let spliced = splice_replace(
            &self.data,
            record.text_offset,
            usize::from(record.length),
            replacement,
        )?;
        let data = splice_replace(&spliced, record.length_offset, LENGTH_PREFIX_WIDTH, &prefix)?;

        let location = PatchLocation {
            record,
            new_length: replacement.len() as u16,
        };
        log::debug!(
            "Patched constant #{} at offset {}: '{}' -> '{}' ({:+} bytes)",
            record.header.index,
            record.header.offset,
            old,
            new,
            location.shift()
        );

        Ok(PatchOutcome::Patched { data, location })
    }
}

/// Patches a class file on disk.
///
/// Reads `input`, replaces the first text record equal to `old` with `new` and writes the result
/// to `output`. Nothing is written when the literal is absent.
///
/// # Returns
///
/// `true` if a record was rewritten and `output` was written.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] for I/O failures and any error of
/// [`ConstantPoolPatcher::patch_utf8`].
pub fn patch_file(input: &Path, output: &Path, old: &str, new: &str) -> Result<bool> {
    let outcome = ConstantPoolPatcher::from_file(input)?.patch_utf8(old, new)?;
    if !outcome.is_patched() {
        return Ok(false);
    }

    crate::file::store(output, outcome.data())?;
    Ok(true)
}

/// Compares two strings character by character, ignoring case.
///
/// Two characters match if they are equal, or equal after upper-casing, or equal after
/// lower-casing. This also covers characters whose case mapping is not one-to-one.
pub(crate) fn eq_ignore_case(left: &str, right: &str) -> bool {
    if left.is_ascii() && right.is_ascii() {
        return left.eq_ignore_ascii_case(right);
    }

    let mut left = left.chars();
    let mut right = right.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) if chars_eq_ignore_case(l, r) => {}
            _ => return false,
        }
    }
}

fn chars_eq_ignore_case(left: char, right: char) -> bool {
    left == right
        || left.to_uppercase().eq(right.to_uppercase())
        || left.to_lowercase().eq(right.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classfile::ConstantRecord, test::ClassBuilder, Error};

    fn offsets(data: &[u8]) -> Vec<usize> {
        ConstantIter::new(data)
            .unwrap()
            .map(|record| record.unwrap().header().offset)
            .collect()
    }

    #[test]
    fn reference_scenario() {
        let data = vec![
            0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x34, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x05, 0x48,
            0x65, 0x6C, 0x6C, 0x6F, 0x03, 0x00, 0x00, 0x00, 0x01,
        ];

        let outcome = ConstantPoolPatcher::new(data.clone())
            .patch_utf8("Hello", "World!!")
            .unwrap();
        let patched = outcome.data();

        assert_eq!(&patched[..10], &data[..10]);
        assert_eq!(
            &patched[10..20],
            &[0x01, 0x00, 0x07, 0x57, 0x6F, 0x72, 0x6C, 0x64, 0x21, 0x21]
        );
        assert_eq!(&patched[20..], &[0x03, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(patched.len(), data.len() + 2);
        assert_eq!(outcome.location().unwrap().shift(), 2);
    }

    #[test]
    fn same_length_keeps_offsets() {
        let data = ClassBuilder::new()
            .utf8("java/lang/Object")
            .utf8("java/lang/System")
            .class(2)
            .integer(3)
            .build();
        let before = offsets(&data);

        let outcome = ConstantPoolPatcher::new(data.clone())
            .patch_utf8("java/lang/System", "java/lang/Sistem")
            .unwrap();

        assert_eq!(outcome.data().len(), data.len());
        assert_eq!(offsets(outcome.data()), before);
    }

    #[test]
    fn longer_and_shorter_literals_shift_followers() {
        let data = ClassBuilder::new()
            .utf8("main")
            .utf8("java/lang/System")
            .long(9)
            .class(2)
            .utf8("out")
            .build();
        let before = offsets(&data);

        for new in ["cp/Sys", "classpatch/exec/CaptureSystem"] {
            let outcome = ConstantPoolPatcher::new(data.clone())
                .patch_utf8("java/lang/System", new)
                .unwrap();
            let shift = new.len() as isize - "java/lang/System".len() as isize;
            assert_eq!(outcome.location().unwrap().shift(), shift);

            let after = offsets(outcome.data());
            assert_eq!(after[..2], before[..2]);
            for (old, new) in before[2..].iter().zip(&after[2..]) {
                assert_eq!(*new as isize - *old as isize, shift);
            }
        }
    }

    #[test]
    fn case_insensitive_match() {
        let data = ClassBuilder::new().utf8("Foo").build();
        let outcome = ConstantPoolPatcher::new(data).patch_utf8("FOO", "Bar").unwrap();
        assert!(outcome.is_patched());
        assert!(outcome.data().ends_with(b"Bar"));

        let data = ClassBuilder::new().utf8("Straße").build();
        let patcher = ConstantPoolPatcher::new(data);
        assert!(patcher.find_utf8("STRASSE").unwrap().is_none());
        assert!(patcher.find_utf8("STRAßE").unwrap().is_some());
    }

    #[test]
    fn only_first_match_is_rewritten() {
        let data = ClassBuilder::new().utf8("dup").integer(0).utf8("DUP").build();
        let outcome = ConstantPoolPatcher::new(data).patch_utf8("dup", "x").unwrap();

        let patcher = ConstantPoolPatcher::new(outcome.into_inner());
        let texts: Vec<String> = patcher
            .constants()
            .unwrap()
            .filter_map(|record| match record.unwrap() {
                ConstantRecord::Text(text) => Some(text.text(patcher.data()).unwrap().to_string()),
                ConstantRecord::Fixed(_) => None,
            })
            .collect();
        assert_eq!(texts, vec!["x".to_string(), "DUP".to_string()]);
    }

    #[test]
    fn second_patch_is_a_no_op() {
        let data = ClassBuilder::new().utf8("java/lang/System").build();
        let first = ConstantPoolPatcher::new(data)
            .patch_utf8("java/lang/System", "Capture")
            .unwrap()
            .into_inner();

        let second = ConstantPoolPatcher::new(first.clone())
            .patch_utf8("java/lang/System", "Capture")
            .unwrap();
        assert_eq!(second, PatchOutcome::Unchanged(first));
    }

    #[test]
    fn empty_replacement() {
        let data = ClassBuilder::new().utf8("gone").integer(1).build();
        let outcome = ConstantPoolPatcher::new(data).patch_utf8("gone", "").unwrap();

        let patched = outcome.data();
        assert_eq!(&patched[10..13], &[0x01, 0x00, 0x00]);
        assert_eq!(patched[13], 0x03);
        assert_eq!(ConstantIter::new(patched).unwrap().count(), 2);
    }

    #[test]
    fn empty_records_never_match() {
        let data = ClassBuilder::new().utf8("").build();
        let outcome = ConstantPoolPatcher::new(data).patch_utf8("", "x").unwrap();
        assert!(!outcome.is_patched());
    }

    #[test]
    fn oversized_replacement() {
        let data = ClassBuilder::new().utf8("a").build();
        let new = "b".repeat(65_536);
        assert!(matches!(
            ConstantPoolPatcher::new(data).patch_utf8("a", &new),
            Err(Error::EncodingOverflow { value: 65_536, width: 2 })
        ));
    }

    #[test]
    fn oversized_replacement_without_match() {
        let data = ClassBuilder::new().utf8("other").build();
        let outcome = ConstantPoolPatcher::new(data.clone())
            .patch_utf8("java/lang/System", &"x".repeat(70_000))
            .unwrap();

        assert!(!outcome.is_patched());
        assert_eq!(outcome.into_inner(), data);
    }

    #[test]
    fn malformed_before_match() {
        let data = ClassBuilder::new()
            .raw(1, &[0x00])
            .utf8("target")
            .build();
        assert!(matches!(
            ConstantPoolPatcher::new(data).patch_utf8("target", "x"),
            Err(Error::MalformedConstant { .. })
        ));
    }

    #[test]
    fn invalid_utf8_before_match() {
        let data = ClassBuilder::new()
            .raw(1, &[0x01, 0x00, 0x02, 0xC3, 0x28])
            .utf8("target")
            .build();
        assert!(matches!(
            ConstantPoolPatcher::new(data).patch_utf8("target", "x"),
            Err(Error::Decoding { .. })
        ));
    }

    #[test]
    fn modified_utf8_nul_before_match() {
        // javac writes U+0000 as C0 80, which strict UTF-8 rejects
        let data = ClassBuilder::new()
            .raw(1, &[0x01, 0x00, 0x02, 0xC0, 0x80])
            .utf8("java/lang/System")
            .build();
        assert!(matches!(
            ConstantPoolPatcher::new(data).patch_utf8("java/lang/System", "x"),
            Err(Error::Decoding { offset: 13, .. })
        ));
    }

    #[test]
    fn count_and_header() {
        let patcher = ConstantPoolPatcher::new(ClassBuilder::new().utf8("a").long(1).build());
        assert_eq!(patcher.count().unwrap(), 4);
        assert_eq!(patcher.header().unwrap().constant_pool_count, 4);
        assert!(matches!(
            ConstantPoolPatcher::new(vec![0; 9]).count(),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn ignore_case_rules() {
        assert!(eq_ignore_case("java/lang/SYSTEM", "Java/Lang/System"));
        assert!(eq_ignore_case("ǅ", "ǆ"));
        assert!(eq_ignore_case("Σ", "σ"));
        assert!(!eq_ignore_case("abc", "abcd"));
        assert!(!eq_ignore_case("abc", "abd"));
    }

    #[test]
    fn patch_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Hello.class");
        let output = dir.path().join("Hello.patched.class");
        crate::file::store(&input, &ClassBuilder::new().utf8("Hello").build()).unwrap();

        assert!(!patch_file(&input, &output, "Bye", "x").unwrap());
        assert!(!output.exists());

        assert!(patch_file(&input, &output, "hello", "Bye").unwrap());
        let written = crate::file::load(&output).unwrap();
        assert!(written.ends_with(&[0x01, 0x00, 0x03, b'B', b'y', b'e']));
    }
}

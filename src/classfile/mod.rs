//! Class file constant pool scanning and literal patching.
//!
//! A JVM class file starts with a fixed 10 byte prologue followed by the constant pool, a
//! table of tagged records. This module walks that table and rewrites `CONSTANT_Utf8` records,
//! which hold every class, member and descriptor name the class refers to. Replacing one of
//! those literals redirects the symbol at load time without touching any bytecode.
//!
//! # Key Components
//!
//! - [`crate::classfile::ConstantPoolPatcher`] - Owns a class file buffer and performs the substitution
//! - [`crate::classfile::PatchOutcome`] - Distinguishes a patched buffer from an untouched one
//! - [`crate::classfile::ConstantIter`] - Record-by-record iterator over the constant pool
//! - [`crate::classfile::ConstantTag`] - Supported record kinds and their fixed lengths
//! - [`crate::classfile::ClassHeader`] - Decoded prologue (magic, versions, declared count)
//!
//! # Binary Layout
//!
//! ```text
//! offset 0..4   magic                (opaque)
//! offset 4..6   minor version        (opaque)
//! offset 6..8   major version        (opaque)
//! offset 8..10  constant pool count  (u2, entries + 1)
//! offset 10..   records
//!
//! CONSTANT_Utf8:  tag=1 (u1) | length (u2) | length bytes of UTF-8
//! other records:  fixed span by tag, see FIXED_LENGTHS
//! ```
//!
//! # Examples
//!
//! ```rust
//! use classpatch::classfile::{ConstantPoolPatcher, PatchOutcome};
//!
//! let mut data = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x02];
//! data.extend_from_slice(&[0x01, 0x00, 0x10]);
//! data.extend_from_slice(b"java/lang/System");
//!
//! match ConstantPoolPatcher::new(data).patch_utf8("java/lang/System", "demo/Capture")? {
//!     PatchOutcome::Patched { data, location } => {
//!         assert_eq!(location.shift(), -4);
//!         assert!(data.ends_with(b"demo/Capture"));
//!     }
//!     PatchOutcome::Unchanged(_) => unreachable!(),
//! }
//! # Ok::<(), classpatch::Error>(())
//! ```

mod constant;
mod header;
mod patcher;
mod pool;

pub use constant::{
    fixed_length, ConstantRecord, ConstantTag, FixedRecord, RecordHeader, TextRecord,
    FIXED_LENGTHS,
};
pub use header::{ClassHeader, CONSTANT_POOL_COUNT_OFFSET, CONSTANT_POOL_OFFSET, JAVA_MAGIC};
pub use patcher::{patch_file, ConstantPoolPatcher, PatchLocation, PatchOutcome};
pub use pool::ConstantIter;

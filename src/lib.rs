// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # classpatch
//!
//! Constant pool patching for JVM class files.
//!
//! `classpatch` rewrites text literals (`CONSTANT_Utf8` records) inside the constant pool of a
//! compiled class. Replacing the internal name of a class there redirects every reference to
//! it, which is how submitted code can be run with `java/lang/System` swapped for a class that
//! writes into a capture buffer. The patcher splices the buffer, rewrites the length prefix and
//! shifts everything behind the record, without parsing method bodies or attributes.
//!
//! ## Quick Start
//!
//! ```rust
//! use classpatch::prelude::*;
//!
//! let mut class = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x02];
//! class.extend_from_slice(&[0x01, 0x00, 0x05]);
//! class.extend_from_slice(b"Hello");
//!
//! let outcome = ConstantPoolPatcher::new(class).patch_utf8("Hello", "World!!")?;
//! assert!(outcome.is_patched());
//! # Ok::<(), classpatch::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`file`] - Bounds-checked byte codec ([`file::io`]) and cursor ([`Parser`])
//! - [`classfile`] - Constant pool model, scanner and [`classfile::ConstantPoolPatcher`]
//! - [`exec`] - Loader and invoker capabilities, the caller-owned capture buffer and the
//!   [`exec::Executor`] that runs a patched class
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Malformed input is never repaired: an
//! unknown tag, a truncated record or invalid UTF-8 aborts the operation. A literal that is not
//! present is reported as [`classfile::PatchOutcome::Unchanged`] rather than as an error.
//!
//! ```rust
//! use classpatch::{classfile::ConstantPoolPatcher, Error};
//!
//! // count = 2, one record with tag 13
//! let class = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 0x34, 0x00, 0x02, 0x0D];
//! match ConstantPoolPatcher::new(class).patch_utf8("a", "b") {
//!     Err(Error::MalformedConstant { message, .. }) => println!("Malformed: {message}"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade: scanned records at `trace`,
//! counts and patch locations at `debug`, and executions of classes that never reference the
//! redirected symbol at `warn`. Install any logger to see them.
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// Byte codec and cursor for class file buffers.
pub mod file;

/// Constant pool scanning and literal patching.
///
/// # Key Types
///
/// - [`classfile::ConstantPoolPatcher`] - Performs the substitution
/// - [`classfile::PatchOutcome`] - Patched or unchanged result
/// - [`classfile::ConstantIter`] - Iterator over constant pool records
pub mod classfile;

/// Executing patched classes through host-provided loader and invoker capabilities.
pub mod exec;

/// `classpatch` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `classpatch` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

/// Cursor-based reader used for constant pool scanning.
pub use file::parser::Parser;

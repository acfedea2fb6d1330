//! Running patched class files with captured output.
//!
//! This module is the boundary between the patcher and whatever actually executes a class.
//! Loading bytes into a runtime and invoking a method by name are platform concerns, so they
//! are expressed as capability traits that a host implements:
//!
//! - [`ModuleLoader`] - Defines a module from the patched bytes
//! - [`EntryInvoker`] - Resolves and calls an entry point on a loaded module
//!
//! The [`Executor`] ties them together with the patcher:
//!
//! ```text
//! class bytes ──> ConstantPoolPatcher ──> ModuleLoader ──> EntryInvoker ──> CaptureBuffer
//!                 (target -> redirect)                      (entry point)     (output)
//! ```
//!
//! Output is collected in a caller-owned [`CaptureBuffer`] that the executor clears before each
//! run, and [`ExecutorConfig`] decides which symbol is redirected and which entry point runs.

mod capture;
mod config;
mod executor;

pub use capture::CaptureBuffer;
pub use config::{
    ExecutorConfig, DEFAULT_ENTRY_POINT, DEFAULT_REDIRECT_SYMBOL, DEFAULT_TARGET_SYMBOL,
};
pub use executor::{EntryInvoker, ExecutionReport, Executor, ModuleLoader};

//! # classpatch Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the classpatch library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all classpatch operations
pub use crate::Error;

/// The result type used throughout classpatch
pub use crate::Result;

/// Low-level parsing utilities
pub use crate::Parser;

// ================================================================================================
// Constant Pool Patching
// ================================================================================================

/// Patcher, outcome and file entry point
pub use crate::classfile::{patch_file, ConstantPoolPatcher, PatchLocation, PatchOutcome};

/// Constant pool model
pub use crate::classfile::{
    ClassHeader, ConstantIter, ConstantRecord, ConstantTag, FixedRecord, RecordHeader, TextRecord,
};

// ================================================================================================
// Execution
// ================================================================================================

/// Execution boundary
pub use crate::exec::{
    CaptureBuffer, EntryInvoker, ExecutionReport, Executor, ExecutorConfig, ModuleLoader,
};

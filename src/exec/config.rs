//! Executor configuration.
//!
//! [`ExecutorConfig`] names the symbol substitution performed before loading and the entry
//! point invoked afterwards. The defaults redirect `java/lang/System` to the capture class and
//! call `main` without arguments.
//!
//! # Example
//!
//! ```rust
//! use classpatch::exec::ExecutorConfig;
//!
//! let config = ExecutorConfig::default()
//!     .with_redirect_symbol("sandbox/Console")
//!     .with_args(["--quiet"]);
//!
//! assert_eq!(config.target_symbol, "java/lang/System");
//! assert_eq!(config.redirect_symbol, "sandbox/Console");
//! assert_eq!(config.entry_point, "main");
//! assert_eq!(config.args, vec!["--quiet".to_string()]);
//! ```

/// Internal name of the class whose references are redirected by default.
pub const DEFAULT_TARGET_SYMBOL: &str = "java/lang/System";

/// Internal name of the capture class references are redirected to by default.
pub const DEFAULT_REDIRECT_SYMBOL: &str = "classpatch/exec/CaptureSystem";

/// Entry point invoked by default.
pub const DEFAULT_ENTRY_POINT: &str = "main";

/// Configuration of one [`crate::exec::Executor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Literal to look for in the constant pool.
    pub target_symbol: String,

    /// Literal written in its place.
    ///
    /// It names the class whose output members write into the
    /// [`crate::exec::CaptureBuffer`].
    pub redirect_symbol: String,

    /// Name of the entry point to invoke.
    pub entry_point: String,

    /// Arguments passed to the entry point.
    pub args: Vec<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        ExecutorConfig {
            target_symbol: DEFAULT_TARGET_SYMBOL.to_string(),
            redirect_symbol: DEFAULT_REDIRECT_SYMBOL.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            args: Vec::new(),
        }
    }
}

impl ExecutorConfig {
    /// Sets the literal to look for.
    #[must_use]
    pub fn with_target_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.target_symbol = symbol.into();
        self
    }

    /// Sets the literal written in place of the target.
    #[must_use]
    pub fn with_redirect_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.redirect_symbol = symbol.into();
        self
    }

    /// Sets the entry point name.
    #[must_use]
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    /// Sets the entry point arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

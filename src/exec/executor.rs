use crate::{
    classfile::ConstantPoolPatcher,
    exec::{CaptureBuffer, ExecutorConfig},
    Result,
};

/// Turns a class file into an executable module.
///
/// Implementations wrap whatever mechanism the host offers for defining a class from bytes.
/// Each call should produce an independent module, so repeated executions of a class do not
/// share state.
pub trait ModuleLoader {
    /// Handle of a loaded module.
    type Module;

    /// Loads the (already patched) class file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Load`] if the bytes are rejected.
    fn load(&self, bytes: &[u8]) -> Result<Self::Module>;
}

/// Resolves and runs an entry point of a loaded module.
pub trait EntryInvoker<M> {
    /// Invokes `entry_point` on `module` with `args`.
    ///
    /// Output produced by the invoked code is written to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Invoke`] if the entry point is missing or fails.
    fn invoke(
        &self,
        module: &M,
        entry_point: &str,
        args: &[String],
        sink: &mut CaptureBuffer,
    ) -> Result<()>;
}

/// What one execution produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Whether the target symbol was found and redirected
    pub patched: bool,
    /// Everything the invoked code wrote to the sink
    pub output: String,
}

/// Runs submitted class files with their output redirected into a [`CaptureBuffer`].
///
/// Each [`Executor::execute`] call clears the sink, rewrites the target symbol in the constant
/// pool, loads the result, invokes the configured entry point and returns the captured output.
///
/// # Examples
///
/// ```rust
/// use std::io::Write;
/// use classpatch::{
///     exec::{CaptureBuffer, EntryInvoker, Executor, ExecutorConfig, ModuleLoader},
///     Result,
/// };
///
/// struct BytesLoader;
///
/// impl ModuleLoader for BytesLoader {
///     type Module = Vec<u8>;
///
///     fn load(&self, bytes: &[u8]) -> Result<Vec<u8>> {
///         Ok(bytes.to_vec())
///     }
/// }
///
/// struct SizeInvoker;
///
/// impl EntryInvoker<Vec<u8>> for SizeInvoker {
///     fn invoke(&self, module: &Vec<u8>, entry: &str, _: &[String], sink: &mut CaptureBuffer) -> Result<()> {
///         write!(sink, "{entry}: {} bytes", module.len())?;
///         Ok(())
///     }
/// }
///
/// let mut class = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x02];
/// class.extend_from_slice(&[0x01, 0x00, 0x10]);
/// class.extend_from_slice(b"java/lang/System");
///
/// let executor = Executor::new(BytesLoader, SizeInvoker, ExecutorConfig::default());
/// let mut sink = CaptureBuffer::new();
/// let report = executor.execute(&class, &mut sink)?;
///
/// assert!(report.patched);
/// assert_eq!(report.output, "main: 42 bytes");
/// # Ok::<(), classpatch::Error>(())
/// ```
pub struct Executor<L, I> {
    loader: L,
    invoker: I,
    config: ExecutorConfig,
}

impl<L, I> Executor<L, I>
where
    L: ModuleLoader,
    I: EntryInvoker<L::Module>,
{
    /// Creates an executor from its collaborators.
    pub fn new(loader: L, invoker: I, config: ExecutorConfig) -> Self {
        Executor {
            loader,
            invoker,
            config,
        }
    }

    /// Patches, loads and runs `class_bytes`, capturing its output in `sink`.
    ///
    /// A class that never references the target symbol is still loaded and run unpatched; the
    /// report's `patched` flag tells the two cases apart.
    ///
    /// # Errors
    ///
    /// Returns any patching error, [`crate::Error::Load`] from the loader and
    /// [`crate::Error::Invoke`] from the invoker. The sink keeps whatever was written before an
    /// invocation failed.
    pub fn execute(&self, class_bytes: &[u8], sink: &mut CaptureBuffer) -> Result<ExecutionReport> {
        sink.clear();

        let outcome = ConstantPoolPatcher::new(class_bytes.to_vec())
            .patch_utf8(&self.config.target_symbol, &self.config.redirect_symbol)?;
        let patched = outcome.is_patched();
        if !patched {
            log::warn!(
                "'{}' is not referenced, running the class unpatched",
                self.config.target_symbol
            );
        }

        let module = self.loader.load(outcome.data())?;
        self.invoker
            .invoke(&module, &self.config.entry_point, &self.config.args, sink)?;

        log::debug!(
            "'{}' finished with {} bytes of output",
            self.config.entry_point,
            sink.len()
        );

        Ok(ExecutionReport {
            patched,
            output: sink.contents(),
        })
    }
}

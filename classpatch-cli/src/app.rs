use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// classpatch - inspect and patch the constant pool of JVM class files
#[derive(Debug, Parser)]
#[command(name = "classpatch", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display the class file prologue: magic, versions and constant pool count.
    Info {
        /// Path to the class file.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// List constant pool records with their index, offset, tag and span.
    Constants {
        /// Path to the class file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Show only text (CONSTANT_Utf8) records.
        #[arg(long)]
        text_only: bool,
    },

    /// Replace the first text record matching a literal (ignoring case).
    Patch {
        /// Path to the class file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Literal to search for, e.g. java/lang/System.
        #[arg(long, value_name = "OLD")]
        from: String,

        /// Replacement literal.
        #[arg(long, value_name = "NEW")]
        to: String,

        /// Output path (default: <FILE>.patched).
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_patch_with_default_output() {
        let cli = Cli::try_parse_from([
            "classpatch",
            "patch",
            "Hello.class",
            "--from",
            "java/lang/System",
            "--to",
            "classpatch/exec/CaptureSystem",
        ])
        .unwrap();

        match cli.command {
            Command::Patch {
                path,
                from,
                to,
                output,
            } => {
                assert_eq!(path, PathBuf::from("Hello.class"));
                assert_eq!(from, "java/lang/System");
                assert_eq!(to, "classpatch/exec/CaptureSystem");
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.global.json);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["classpatch", "constants", "A.class", "--text-only", "--json", "-v"])
                .unwrap();

        assert!(cli.global.json);
        assert!(cli.global.verbose);
        assert!(matches!(
            cli.command,
            Command::Constants {
                text_only: true,
                ..
            }
        ));
    }

    #[test]
    fn patch_requires_from_and_to() {
        assert!(Cli::try_parse_from(["classpatch", "patch", "A.class", "--from", "x"]).is_err());
    }
}

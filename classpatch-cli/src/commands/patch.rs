use std::path::Path;

use anyhow::{bail, Context};
use classpatch::classfile::PatchOutcome;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{default_output_path, load_class, quote},
    output::print_output,
};

#[derive(Debug, Serialize)]
struct PatchReport {
    input: String,
    output: String,
    index: u16,
    offset: String,
    from: String,
    to: String,
    old_length: u16,
    new_length: u16,
    shift: isize,
    size: usize,
}

pub fn run(
    path: &Path,
    from: &str,
    to: &str,
    output: Option<&Path>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let class = load_class(path)?;
    let outcome = class
        .patch_utf8(from, to)
        .with_context(|| format!("failed to patch {}", path.display()))?;

    let (data, location) = match outcome {
        PatchOutcome::Patched { data, location } => (data, location),
        PatchOutcome::Unchanged(_) => {
            bail!("no text constant matches {} in {}", quote(from), path.display())
        }
    };

    let output_path = output.map_or_else(|| default_output_path(path), Path::to_path_buf);
    classpatch::file::store(&output_path, &data)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    log::info!("Wrote {}", output_path.display());

    let report = PatchReport {
        input: path.display().to_string(),
        output: output_path.display().to_string(),
        index: location.record.header.index,
        offset: format!("0x{:06x}", location.record.header.offset),
        from: from.to_string(),
        to: to.to_string(),
        old_length: location.record.length,
        new_length: location.new_length,
        shift: location.shift(),
        size: data.len(),
    };

    print_output(&report, opts, |out| {
        println!("Constant #{} at {}", out.index, out.offset);
        println!("  {} -> {}", quote(&out.from), quote(&out.to));
        println!(
            "  length {} -> {} ({:+} bytes)",
            out.old_length, out.new_length, out.shift
        );
        println!("Output: {} ({} bytes)", out.output, out.size);
    })
}

use std::path::Path;

use serde::Serialize;

use crate::{app::GlobalOptions, commands::common::load_class, output::print_output};

#[derive(Debug, Serialize)]
pub struct ClassInfo {
    pub size: usize,
    pub magic: String,
    pub java_magic: bool,
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool_count: u16,
    pub defined_slots: u16,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let class = load_class(path)?;
    let header = class.header()?;

    if !header.has_java_magic() {
        log::warn!("{} does not start with 0xCAFEBABE", path.display());
    }

    let output = ClassInfo {
        size: class.data().len(),
        magic: format!("0x{:08X}", header.magic),
        java_magic: header.has_java_magic(),
        minor_version: header.minor_version,
        major_version: header.major_version,
        constant_pool_count: header.constant_pool_count,
        defined_slots: header.defined_slots(),
    };

    print_output(&output, opts, |out| {
        println!("Size:           {} bytes", out.size);
        println!("Magic:          {}", out.magic);
        println!("Version:        {}.{}", out.major_version, out.minor_version);
        println!(
            "Constant pool:  {} ({} slots)",
            out.constant_pool_count, out.defined_slots
        );
    })
}

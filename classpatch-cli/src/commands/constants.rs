use std::path::Path;

use classpatch::classfile::ConstantRecord;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{load_class, quote},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct ConstantEntry {
    index: u16,
    offset: String,
    tag: String,
    span: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct ConstantsOutput {
    count: u16,
    shown: usize,
    constants: Vec<ConstantEntry>,
}

pub fn run(path: &Path, text_only: bool, opts: &GlobalOptions) -> anyhow::Result<()> {
    let class = load_class(path)?;
    let data = class.data();

    let mut constants = Vec::new();
    for record in class.constants()? {
        let record = record?;
        let text = match &record {
            ConstantRecord::Text(text) => Some(text.text(data)?.to_string()),
            ConstantRecord::Fixed(_) if text_only => continue,
            ConstantRecord::Fixed(_) => None,
        };

        let header = record.header();
        constants.push(ConstantEntry {
            index: header.index,
            offset: format!("0x{:06x}", header.offset),
            tag: header.tag.to_string(),
            span: record.span(),
            text,
        });
    }

    let output = ConstantsOutput {
        count: class.count()?,
        shown: constants.len(),
        constants,
    };

    print_output(&output, opts, |out| {
        println!(
            "Constant pool count: {} ({} records shown)",
            out.count, out.shown
        );
        if out.constants.is_empty() {
            return;
        }
        println!();

        let mut tw = TabWriter::new(vec![
            ("Index", Align::Right),
            ("Offset", Align::Left),
            ("Tag", Align::Left),
            ("Span", Align::Right),
            ("Text", Align::Left),
        ]);
        for entry in &out.constants {
            tw.row(vec![
                format!("#{}", entry.index),
                entry.offset.clone(),
                entry.tag.clone(),
                entry.span.to_string(),
                entry.text.as_deref().map(quote).unwrap_or_default(),
            ]);
        }
        tw.print();
    })
}

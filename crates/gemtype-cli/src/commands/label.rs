// this_file: crates/gemtype-cli/src/commands/label.rs

//! Label command implementation

use gemtype::error::Result;

use super::{build_engine, exporter, write_output};
use crate::cli::LabelArgs;

pub fn run(args: &LabelArgs) -> Result<()> {
    let engine = build_engine(&args.style)?;
    let label = engine.render_label(&args.text, args.style.scale)?;

    let png = exporter(&args.style)?.export(&label)?;
    write_output(&args.output, &png)?;
    log::info!(
        "Wrote {}x{} label to {}",
        label.width,
        label.height,
        args.output.display()
    );
    Ok(())
}

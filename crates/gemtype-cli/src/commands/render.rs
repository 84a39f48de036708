// this_file: crates/gemtype-cli/src/commands/render.rs

//! Render command implementation

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use gemtype::error::Result;
use gemtype::traits::LoadingPhase;
use gemtype::PageRequest;
use gemtype_export::encode_links;

use super::{build_engine, exporter, write_output};
use crate::cli::RenderArgs;

fn read_document(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut text = Vec::new();
        io::stdin().read_to_end(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read(path)?)
    }
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let text = read_document(&args.input)?;
    let engine = build_engine(&args.style)?;

    let request = PageRequest::new(args.width, args.style.scale);
    let progress = |phase: LoadingPhase| log::info!("{:?}", phase);
    let (surface, links) = engine.render_page(&text, &request, &progress)?.into_parts();

    let png = exporter(&args.style)?.export(&surface)?;
    write_output(&args.output, &png)?;
    log::info!(
        "Wrote {}x{} page to {}",
        surface.width,
        surface.height,
        args.output.display()
    );

    if let Some(path) = &args.links {
        write_output(path, &encode_links(&links, true)?)?;
        log::info!("Wrote {} links to {}", links.len(), path.display());
    }
    Ok(())
}

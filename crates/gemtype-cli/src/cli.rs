// this_file: crates/gemtype-cli/src/cli.rs

//! CLI argument definitions using Clap v4

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// gemtype - render text/gemini pages from the command line
#[derive(Parser, Debug)]
#[command(name = "gemtype")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output
    #[arg(short = 'v', long = "verbose", global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out and rasterize a text/gemini document
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Rasterize a one-line label, as used for status banners
    #[command(alias = "l")]
    Label(LabelArgs),
}

/// Fonts and colors shared by every command
#[derive(Args, Debug)]
pub struct StyleArgs {
    /// Proportional font for text, headings and links
    #[arg(short = 'f', long = "font")]
    pub font: PathBuf,

    /// Monospace font for preformatted text, link arrows and fallback
    #[arg(short = 'm', long = "mono-font")]
    pub mono_font: PathBuf,

    /// Device scale factor
    #[arg(short = 's', long = "scale", default_value = "1.0")]
    pub scale: f32,

    /// Text color as RRGGBB or RRGGBBAA
    #[arg(long = "text-color")]
    pub text_color: Option<String>,

    /// Link color as RRGGBB or RRGGBBAA
    #[arg(long = "link-color")]
    pub link_color: Option<String>,

    /// Paint onto this opaque background instead of leaving it transparent
    #[arg(short = 'b', long = "background")]
    pub background: Option<String>,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Document to render, `-` for stdin
    pub input: PathBuf,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Column width in device pixels
    #[arg(short = 'w', long = "width", default_value = "600")]
    pub width: u32,

    /// PNG output path
    #[arg(short = 'o', long = "output", default_value = "page.png")]
    pub output: PathBuf,

    /// Also write the link boxes as JSON
    #[arg(long = "links")]
    pub links: Option<PathBuf>,
}

/// Arguments for the label command
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Label text
    pub text: String,

    #[command(flatten)]
    pub style: StyleArgs,

    /// PNG output path
    #[arg(short = 'o', long = "output", default_value = "label.png")]
    pub output: PathBuf,
}

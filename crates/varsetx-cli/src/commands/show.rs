//! Show command
//!
//! Usage: varsetx show [--chain <FILE>] [--output <FILE>]

use std::path::PathBuf;

use clap::Args;
use varsetx_core::render::render_chain;

use crate::chain_file::{chain_path, ChainFile};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Chain file (default: varsetx-chain.json)
    #[arg(long)]
    pub chain: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Render the chain file to Markdown
pub fn execute(args: ShowArgs) -> anyhow::Result<()> {
    let file = ChainFile::load_or_new(&chain_path(args.chain))?;
    let markdown = render_chain(&file.chain, Some(&file.root_input))?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, markdown)?;
        println!("Rendered to {}", output_path.display());
    } else {
        print!("{}", markdown);
    }

    Ok(())
}

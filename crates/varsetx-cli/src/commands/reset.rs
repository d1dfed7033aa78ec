//! Reset command
//!
//! Usage: varsetx reset [--chain <FILE>]

use std::path::PathBuf;

use clap::Args;
use varsetx_core::config::ApplierConfig;
use varsetx_core::{apply, Command, Session};

use crate::chain_file::{chain_path, ChainFile};

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Chain file (default: varsetx-chain.json)
    #[arg(long)]
    pub chain: Option<PathBuf>,
}

/// Remove applier-created nodes from the chain file
pub fn execute(args: ResetArgs, config: ApplierConfig) -> anyhow::Result<()> {
    let path = chain_path(args.chain);
    let mut file = ChainFile::load_or_new(&path)?;

    let mut session = Session::new(config);
    let cmd = Command::ResetChain;
    let notification = apply(&mut session, &mut file.chain, Some(&file.root_input), cmd.clone())
        .map_err(|e| session.describe_error(&cmd, e))?;
    println!("{}", notification);

    file.save(&path)
}

//! Apply command
//!
//! Usage: varsetx apply <SCENE> --node <PATH> [--group <NAME>] --choice <NAME> [--chain <FILE>]

use std::path::PathBuf;

use clap::Args;
use varsetx_core::config::ApplierConfig;
use varsetx_core::scene::{FixtureLoader, SceneLoader};
use varsetx_core::{apply, Command, Session};

use crate::chain_file::{chain_path, ChainFile};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Scene fixture (YAML)
    pub scene: PathBuf,

    /// Node path
    #[arg(long)]
    pub node: String,

    /// Choice group; may be omitted when the node has only one
    #[arg(long)]
    pub group: Option<String>,

    /// Choice within the group
    #[arg(long)]
    pub choice: String,

    /// Chain file (default: varsetx-chain.json)
    #[arg(long)]
    pub chain: Option<PathBuf>,
}

/// Run the cascade for one selection and apply it to the chain file
pub fn execute(args: ApplyArgs, config: ApplierConfig) -> anyhow::Result<()> {
    let path = chain_path(args.chain);
    let mut file = ChainFile::load_or_new(&path)?;

    let mut session = Session::new(config);
    let scene = FixtureLoader.load(&args.scene.to_string_lossy())?;
    session.load_scene(scene)?;

    let mut commands = vec![Command::SelectNode {
        path: Some(args.node),
    }];
    if let Some(group) = args.group {
        commands.push(Command::SelectGroup { name: Some(group) });
    }
    commands.push(Command::SelectChoice {
        name: Some(args.choice),
    });
    commands.push(Command::ApplySelection);

    for cmd in commands {
        let notification = apply(&mut session, &mut file.chain, Some(&file.root_input), cmd.clone())
            .map_err(|e| session.describe_error(&cmd, e))?;
        if cmd.mutates_chain() {
            println!("{}", notification);
        }
    }

    file.save(&path)
}

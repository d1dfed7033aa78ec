//! Inspect command
//!
//! Usage: varsetx inspect <SCENE>

use std::path::PathBuf;

use clap::Args;
use varsetx_core::scene::{FixtureLoader, SceneLoader};
use varsetx_core::Session;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Scene fixture (YAML)
    pub scene: PathBuf,
}

/// Print every candidate node with its groups and choices
///
/// The scene's active choice is marked with `*`.
pub fn execute(args: InspectArgs) -> anyhow::Result<()> {
    let mut session = Session::default();
    let scene = FixtureLoader.load(&args.scene.to_string_lossy())?;
    let notification = session.load_scene(scene)?;
    println!("{}", notification);

    let cascade = &mut session.cascade;
    for node in cascade.candidate_nodes().to_vec() {
        println!("{}", node);
        cascade.select_node(Some(&node))?;
        for group in cascade.candidate_groups().to_vec() {
            cascade.select_group(Some(&group))?;
            let active = cascade.active_choice()?;
            let choices: Vec<String> = cascade
                .candidate_choices()
                .iter()
                .map(|c| {
                    if active.as_deref() == Some(c.as_str()) {
                        format!("*{}", c)
                    } else {
                        c.clone()
                    }
                })
                .collect();
            println!("  {}: {}", group, choices.join(", "));
        }
    }
    cascade.select_node(None)?;

    Ok(())
}

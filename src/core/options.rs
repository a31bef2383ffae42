//! Core domain: launch options parsed from the command line.

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Resource, Debug, Clone)]
#[command(name = "shore-runtime", about = "Side-scrolling portfolio world runtime")]
pub struct LaunchOptions {
    /// Initial route in URL query form, e.g. "?world=jersey-shore&x=400&y=500"
    #[arg(long)]
    pub route: Option<String>,

    /// Initial world id (overrides the world in --route)
    #[arg(long)]
    pub world: Option<String>,

    /// Initial player x (requires --y)
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<i32>,

    /// Initial player y (requires --x)
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<i32>,

    /// Asset root containing configs/ and data/
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Directory used for persisted state
    #[arg(long, default_value = ".shore-data")]
    pub data_dir: PathBuf,

    /// Force the on-screen touch controls
    #[arg(long)]
    pub touch: bool,

    /// Expose the diagnostic snapshot handle and log it on every game event
    #[arg(long)]
    pub diagnostic: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            route: None,
            world: None,
            x: None,
            y: None,
            assets: PathBuf::from("assets"),
            data_dir: PathBuf::from(".shore-data"),
            touch: false,
            diagnostic: false,
        }
    }
}

impl LaunchOptions {
    /// The route string this launch should start from, merging --route with the
    /// explicit --world/--x/--y flags.
    pub fn initial_query(&self) -> String {
        let mut query = self.route.clone().unwrap_or_default();
        if let Some(world) = &self.world {
            query = format!("?world={world}");
            if let (Some(x), Some(y)) = (self.x, self.y) {
                query.push_str(&format!("&x={x}&y={y}"));
            }
        }
        query
    }
}

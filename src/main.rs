// This file is part of Blobby Bird.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use bevy::prelude::*;
use blobby_bird::{GameConfig, GamePlugin, RngSeed, SceneBounds};
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;

#[derive(Parser, Debug)]
#[command(about = "Blobby Bird: tap to flap, dodge the blocks", version)]
struct Cli {
    /// Config file to load instead of the layered assets/config/game(.local).ron pair.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for obstacle generation (overrides the config's `seed`).
    #[arg(long)]
    seed: Option<u64>,
}

/// Config plus the load notes to report once logging is up.
struct Loaded {
    cfg: GameConfig,
    used: Vec<String>,
    issues: Vec<String>,
}

#[cfg(target_arch = "wasm32")]
fn load_config(_cli: &Cli) -> anyhow::Result<Loaded> {
    const RAW: &str = include_str!("../assets/config/game.ron");
    Ok(Loaded {
        cfg: ron::from_str(RAW)?,
        used: vec!["embedded game.ron".into()],
        issues: Vec::new(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(cli: &Cli) -> anyhow::Result<Loaded> {
    if let Some(path) = &cli.config {
        let cfg = GameConfig::load_from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading {}", path.display()))?;
        return Ok(Loaded {
            cfg,
            used: vec![path.display().to_string()],
            issues: Vec::new(),
        });
    }
    let (cfg, used, issues) = GameConfig::load_layered([
        std::path::Path::new("assets/config/game.ron"),
        std::path::Path::new("assets/config/game.local.ron"),
    ]);
    Ok(Loaded { cfg, used, issues })
}

fn main() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    {
        // Better panic messages on wasm
        console_error_panic_hook::set_once();
    }

    let cli = Cli::parse();
    let Loaded { cfg, used, issues } = load_config(&cli)?;
    let warnings = cfg.validate();

    let bounds = SceneBounds::new(cfg.window.width, cfg.window.height);
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: false,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(bounds);
    if let Some(seed) = cli.seed.or(cfg.seed) {
        app.insert_resource(RngSeed(seed));
    }
    // LogPlugin only exists from here on.
    app.add_systems(Startup, move || {
        for e in &issues {
            warn!("CONFIG LOAD ISSUE: {e}");
        }
        if used.is_empty() {
            info!("No config layers found; using defaults");
        } else {
            info!(?used, "Config layers loaded");
        }
        for w in &warnings {
            warn!("CONFIG WARNING: {w}");
        }
    });
    app.insert_resource(cfg).add_plugins(GamePlugin).run();
    Ok(())
}

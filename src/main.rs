use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use grid_builder::simulation::{
    self, BalancePolicy, BuildController, FileStore, GameConfig, MemoryStore, ObjectStore,
    StructureCatalog, STARTING_BALANCE,
};

#[derive(Parser)]
#[command(name = "grid_builder")]
#[command(about = "Grid-based city builder with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Frame script to run in headless mode (commands separated by ';')
    #[arg(long, conflicts_with = "script_file")]
    script: Option<String>,

    /// Read the headless frame script from a file
    #[arg(long)]
    script_file: Option<PathBuf>,

    /// Time delta per frame in seconds for headless mode
    #[arg(long, default_value = "0.016")]
    delta: f32,

    /// Directory the map is saved to. Headless runs keep the map in memory without it
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Balance for new maps
    #[arg(long, default_value_t = STARTING_BALANCE, allow_negative_numbers = true)]
    starting_balance: i64,

    /// Refuse purchases the balance cannot cover
    #[arg(long)]
    require_funds: bool,

    /// JSON file with the list of placeable structures
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let catalog = match &self.catalog {
            Some(path) => StructureCatalog::from_json_file(path)?,
            None => StructureCatalog::default_city(),
        };

        Ok(GameConfig {
            starting_balance: self.starting_balance,
            balance_policy: if self.require_funds {
                BalancePolicy::RequireFunds
            } else {
                BalancePolicy::AllowDebt
            },
            save_dir: self
                .save_dir
                .clone()
                .unwrap_or_else(FileStore::default_dir),
            catalog,
        })
    }

    fn script_text(&self) -> Result<String> {
        if let Some(path) = &self.script_file {
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()));
        }
        Ok(self
            .script
            .clone()
            .unwrap_or_else(|| simulation::DEFAULT_SCRIPT.to_string()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config);
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("warn,grid_builder=info"),
        )
        .init();
        run_headless(&config, cli.save_dir.as_deref(), &cli.script_text()?, cli.delta)?;
    }

    Ok(())
}

/// Run a frame script without graphics and print the resulting map.
///
/// Saves only reach the disk when `save_dir` is given, so a scripted run never
/// overwrites the map the UI plays on.
fn run_headless(
    config: &GameConfig,
    save_dir: Option<&Path>,
    script: &str,
    delta: f32,
) -> Result<()> {
    let frames = simulation::parse_script(script).context("invalid frame script")?;
    let (mut store, save_target): (Box<dyn ObjectStore>, String) = match save_dir {
        Some(dir) => {
            let store = FileStore::new(dir);
            let target = store.path_for(simulation::DEFAULT_LOCATOR).display().to_string();
            (Box::new(store), target)
        }
        None => (Box::new(MemoryStore::new()), "(in memory)".to_string()),
    };
    let mut controller = BuildController::new(config);

    info!("Running grid builder in headless mode...");
    info!(
        "Frames: {}, Delta: {}s, Save file: {}",
        frames.len(),
        delta,
        save_target
    );
    info!("{}", controller.summary());

    let reports = simulation::run_script(&mut controller, &frames, delta, store.as_mut());
    for (frame, report) in reports.iter().enumerate() {
        for outcome in &report.outcomes {
            info!("Frame {}: {:?}", frame + 1, outcome);
        }
    }

    info!("=== RUN COMPLETE ===");
    info!("{}", controller.summary());
    println!("{}", controller.draw_map());
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: GameConfig) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Grid Builder UI...");
    println!();
    println!("Controls:");
    println!("  Left click        - Build");
    println!("  Right click / Del - Demolish");
    println!("  R                 - Rotate");
    println!("  Q/E               - Previous/next structure");
    println!("  F5/F9             - Save/load map");
    println!("  W/A/S/D           - Move camera");
    println!("  Middle drag       - Rotate camera");
    println!("  Space             - Recenter camera");
    println!("  ESC               - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,grid_builder=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Grid Builder".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(grid_builder::ui::GridBuilderUIPlugin { config })
        .run();
}

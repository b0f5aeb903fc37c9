use std::fs::File;
use std::path::{Path, PathBuf};

use blockfall::app::App;
use blockfall::config::{self, Config};
use blockfall::{Game, RandomShapes};
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to read. Written with the defaults if it does not exist.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the piece sequence, to replay a run.
    /// Example: `blockfall --seed=42` or `blockfall -s 42`.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Milliseconds between two frames.
    #[arg(short, long)]
    frame_millis: Option<u64>,
    /// Where log records go; the terminal is busy drawing the game.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(frame_millis) = self.frame_millis {
            config.frame_millis = frame_millis;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let (mut config, created) = config::load(&config_path)
        .wrap_err_with(|| format!("loading {}", config_path.display()))?;
    args.apply(&mut config);
    config.validate()?;

    init_logging(&config.log_file)?;
    if created {
        info!("wrote default config to {}", config_path.display());
    } else {
        info!("config from {}", config_path.display());
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");
    let game = Game::new(RandomShapes::seeded(seed));

    let terminal = ratatui::init();
    let _guard = TerminalGuard;
    App::new(game, &config).run(terminal)
}

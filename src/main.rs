//! Main CLI application for the Minesweeper agent

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minesweeper_agent::{
    config::{CliOverrides, Settings},
    game::{BatchSummary, GameOutcome, GameSession},
    utils::{BoardFormatter, ColorOutput, ProgressIndicator},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "minesweeper_agent")]
#[command(about = "Minesweeper Knowledge-Based Agent")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one or more games of Minesweeper
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Board width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Number of mines (overrides config)
        #[arg(short, long)]
        mines: Option<usize>,

        /// Seed for reproducible games (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of games to play (overrides config)
        #[arg(short, long)]
        games: Option<usize>,

        /// Directory to save reports to (overrides config)
        #[arg(short, long)]
        report_dir: Option<PathBuf>,

        /// Show each move as it is played
        #[arg(long)]
        show_moves: bool,

        /// Show the board after each move
        #[arg(long)]
        show_board: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Play a batch of games and report win statistics
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of games to play (overrides config)
        #[arg(short, long)]
        games: Option<usize>,

        /// Seed for reproducible batches (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            height,
            width,
            mines,
            seed,
            games,
            report_dir,
            show_moves,
            show_board,
            verbose,
        } => play_command(
            config, height, width, mines, seed, games, report_dir, show_moves, show_board,
            verbose,
        ),
        Commands::Analyze {
            config,
            games,
            seed,
        } => analyze_command(config, games, seed),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate { config } => validate_command(config),
    }
}

#[allow(clippy::too_many_arguments)]
fn play_command(
    config_path: PathBuf,
    height: Option<usize>,
    width: Option<usize>,
    mines: Option<usize>,
    seed: Option<u64>,
    games: Option<usize>,
    report_dir: Option<PathBuf>,
    show_moves: bool,
    show_board: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🎮 Starting Minesweeper Agent"));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        height,
        width,
        mine_count: mines,
        seed,
        games,
        report_directory: report_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    if show_moves {
        settings.play.show_moves = true;
    }
    if show_board {
        settings.play.show_board = true;
    }

    if verbose {
        println!("Configuration:");
        println!(
            "  Board: {}x{}",
            settings.board.height, settings.board.width
        );
        println!("  Mines: {}", settings.board.mine_count);
        match settings.board.seed {
            Some(seed) => println!("  Seed: {}", seed),
            None => println!("  Seed: random"),
        }
        println!("  Games: {}", settings.play.games);
        println!();
    }

    // Validate settings
    settings
        .validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut reports = Vec::with_capacity(settings.play.games);

    for game in 0..settings.play.games {
        let mut game_settings = settings.clone();
        // Later games reuse the seed with an offset so each board differs
        // but the whole batch stays reproducible.
        if let Some(seed) = settings.board.seed {
            game_settings.board.seed = Some(seed + game as u64);
        }

        let mut session =
            GameSession::new(game_settings).context("Failed to create game session")?;

        if verbose {
            println!("Minefield {}:", game + 1);
            println!(
                "{}",
                BoardFormatter::format_minefield_with_coords(session.minefield())
            );
        }

        let report = session.play().context("Failed to play game")?;

        match &report.outcome {
            GameOutcome::Won => println!(
                "{}",
                ColorOutput::success(&format!(
                    "✅ Game {}: won in {} moves",
                    game + 1,
                    report.moves.len()
                ))
            ),
            GameOutcome::Lost { detonated } => println!(
                "{}",
                ColorOutput::error(&format!(
                    "💥 Game {}: lost at {} after {} moves",
                    game + 1,
                    detonated,
                    report.moves.len()
                ))
            ),
            GameOutcome::Stalled => println!(
                "{}",
                ColorOutput::warning(&format!(
                    "⚠ Game {}: stalled after {} moves",
                    game + 1,
                    report.moves.len()
                ))
            ),
        }

        if verbose {
            println!("{}", session.agent().knowledge().statistics());
        }

        reports.push(report);
    }

    let total_time = start_time.elapsed();

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Played {} game(s) in {:.3}s",
            reports.len(),
            total_time.as_secs_f64()
        ))
    );

    // Display game details
    if reports.len() <= 3 {
        for report in &reports {
            println!("\n{}", BoardFormatter::format_report(report));
        }
    }

    if reports.len() > 1 {
        println!("\n{}", BatchSummary::from_reports(&reports));
    }

    // Save reports
    if let Some(report_directory) = &settings.output.report_directory {
        println!("\n{}", ColorOutput::info("💾 Saving reports..."));
        BoardFormatter::save_reports(&reports, report_directory, &settings.output.format)
            .context("Failed to save reports")?;

        println!(
            "{}",
            ColorOutput::success(&format!("Reports saved to {}", report_directory.display()))
        );
    }

    Ok(())
}

fn analyze_command(
    config_path: PathBuf,
    games: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing agent performance..."));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)?
    } else {
        Settings::default()
    };

    let cli_overrides = CliOverrides {
        games,
        seed,
        ..Default::default()
    };
    settings.merge_with_cli(&cli_overrides);

    // Per-move output would drown the progress line.
    settings.play.show_moves = false;
    settings.play.show_board = false;

    settings
        .validate()
        .context("Configuration validation failed")?;

    println!(
        "Board: {}x{}, {} mines, {} games",
        settings.board.height, settings.board.width, settings.board.mine_count, settings.play.games
    );

    let start_time = Instant::now();
    let mut progress = ProgressIndicator::new(settings.play.games);
    let mut reports = Vec::with_capacity(settings.play.games);

    for game in 0..settings.play.games {
        let mut game_settings = settings.clone();
        if let Some(seed) = settings.board.seed {
            game_settings.board.seed = Some(seed + game as u64);
        }

        let mut session =
            GameSession::new(game_settings).context("Failed to create game session")?;
        reports.push(session.play().context("Failed to play game")?);
        progress.update(game + 1);
    }

    progress.finish();

    let summary = BatchSummary::from_reports(&reports);
    println!("\n{}", summary);
    println!(
        "\n{}",
        ColorOutput::success(&format!(
            "✅ Analyzed {} games in {:.3}s",
            reports.len(),
            start_time.elapsed().as_secs_f64()
        ))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    // Create directories
    let config_dir = directory.join("config");
    let examples_dir = config_dir.join("examples");
    let output_dir = directory.join("output/reports");

    for dir in [&config_dir, &examples_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Beginner configuration
    let mut beginner_config = Settings::default();
    beginner_config.board.height = 9;
    beginner_config.board.width = 9;
    beginner_config.board.mine_count = 10;
    beginner_config.to_file(&examples_dir.join("beginner.yaml"))?;

    // Intermediate configuration
    let mut intermediate_config = Settings::default();
    intermediate_config.board.height = 16;
    intermediate_config.board.width = 16;
    intermediate_config.board.mine_count = 40;
    intermediate_config.play.games = 10;
    intermediate_config.to_file(&examples_dir.join("intermediate.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- play --config config/default.yaml");
    println!("3. Run: cargo run -- analyze --games 100");

    Ok(())
}

fn validate_command(config_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating configuration..."));

    let settings = Settings::from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    println!(
        "Board: {}x{}, {} mines",
        settings.board.height, settings.board.width, settings.board.mine_count
    );
    println!("Games: {}", settings.play.games);
    match settings.board.seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: random"),
    }

    println!("{}", ColorOutput::success("✅ Configuration is valid"));

    Ok(())
}

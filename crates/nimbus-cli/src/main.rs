//! Nimbus CLI - Render and run weather animations from the command line

mod commands;
mod raster;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, kinds, render, run};

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Animated weather backgrounds, rendered headless", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a seeded simulation to a PNG image (deterministic)
    Render {
        /// Weather kind (e.g. rain_night, partly-cloudy-day)
        kind: String,

        /// Output image path
        #[arg(short, long, default_value = "weather.png")]
        output: String,

        /// Image width in pixels
        #[arg(long, default_value = "540")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "960")]
        height: u32,

        /// Number of update ticks to simulate before drawing
        #[arg(long, default_value = "120")]
        ticks: u32,

        /// Simulated milliseconds per tick
        #[arg(long, default_value = "16")]
        interval: f64,

        /// RNG seed
        #[arg(long, default_value = "1")]
        seed: u32,

        /// Simulated gravity sample (comma-separated ax,ay,az)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        gravity: Option<[f32; 3]>,

        /// Scroll ratio in [0, 1] fading the particles
        #[arg(long, default_value = "0")]
        scroll: f32,

        /// Engine config file (TOML)
        #[arg(long)]
        config: Option<String>,
    },

    /// Run the threaded engine live against an in-memory surface
    Run {
        /// Weather kind to start with
        kind: String,

        /// Switch to this kind halfway through
        #[arg(long)]
        switch_to: Option<String>,

        /// How long to run, in milliseconds
        #[arg(long, default_value = "2000")]
        duration: u64,

        /// Surface width in pixels
        #[arg(long, default_value = "540")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "960")]
        height: u32,

        /// Gravity sample fed once at startup (comma-separated ax,ay,az)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        gravity: Option<[f32; 3]>,

        /// Save the last posted frame to this PNG
        #[arg(short, long)]
        output: Option<String>,

        /// Engine config file (TOML)
        #[arg(long)]
        config: Option<String>,
    },

    /// List the weather kinds
    Kinds {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the default engine config, or validate a config file
    Config {
        /// Config file to validate instead of printing defaults
        #[arg(long)]
        check: Option<String>,
    },
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    match cli.command {
        Commands::Render {
            kind,
            output,
            width,
            height,
            ticks,
            interval,
            seed,
            gravity,
            scroll,
            config,
        } => render::run(render::RenderArgs {
            kind,
            output,
            width,
            height,
            ticks,
            interval,
            seed,
            gravity,
            scroll,
            config,
        }),
        Commands::Run {
            kind,
            switch_to,
            duration,
            width,
            height,
            gravity,
            output,
            config,
        } => run::run(run::RunArgs {
            kind,
            switch_to,
            duration,
            width,
            height,
            gravity,
            output,
            config,
        }),
        Commands::Kinds { format } => kinds::run(&format),
        Commands::Config { check } => config::run(check.as_deref()),
    }
}

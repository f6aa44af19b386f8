use clap::{Parser, Subcommand};
use std::path::PathBuf;

use keyfall::config::{self, GameConfig};
use keyfall::game;
use keyfall::live;
use keyfall::melody::{self, Melody};
use keyfall::note::pitch_to_freq;
use keyfall::scheduler;
use keyfall::session::Session;
use keyfall::surface::HeadlessSurface;
use keyfall::synth::{self, Silent};
use keyfall::{GameError, Result};

/// Surface size used when no terminal is involved
const HEADLESS_WIDTH: f32 = 600.0;
const HEADLESS_HEIGHT: f32 = 400.0;

#[derive(Parser)]
#[command(name = "keyfall", about = "Falling-notes rhythm game for the terminal")]
#[command(version)]
struct Cli {
    /// Path to a config file of `key: value` tuning lines
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the melody in the terminal: type note letters or click the keys
    Play {
        /// Melody as note letters, e.g. "C C G G A A G"
        #[arg(long)]
        melody: Option<String>,

        /// Override fall speed (pixels per tick)
        #[arg(long)]
        step: Option<f32>,

        /// Override frame rate
        #[arg(long)]
        fps: Option<u32>,

        /// Play without sound
        #[arg(long)]
        mute: bool,
    },

    /// Play a perfect session without a terminal and print the result
    Autoplay {
        #[arg(long)]
        melody: Option<String>,

        #[arg(long, default_value_t = HEADLESS_WIDTH)]
        width: f32,

        #[arg(long, default_value_t = HEADLESS_HEIGHT)]
        height: f32,
    },

    /// List the melody's notes with pitches and timing
    Melody {
        #[arg(long)]
        melody: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => config::load(path)?,
        None => GameConfig::default(),
    };

    match cli.command {
        Command::Play {
            melody,
            step,
            fps,
            mute,
        } => {
            if let Some(s) = step {
                config.step = s;
            }
            if let Some(f) = fps {
                config.fps = f;
            }
            config.validate()?;
            let melody = load_melody(melody.as_deref())?;

            let sound = synth::open_output(mute);
            let mut session = Session::new(melody, config, HEADLESS_HEIGHT)?;
            live::run(&mut session, sound.as_ref())?;

            println!("Score: {} / {}", session.score(), session.total());
        }
        Command::Autoplay {
            melody,
            width,
            height,
        } => {
            if !(width.is_finite() && width > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "width {} must be a positive finite number",
                    width
                )));
            }
            let melody = load_melody(melody.as_deref())?;
            let mut session = Session::new(melody, config, height)?;
            let mut surface = HeadlessSurface::new(width, height);
            let report = game::autoplay(&mut session, &mut surface, &Silent);
            println!("{}", report.text);
            println!("Ticks: {}", report.ticks);
        }
        Command::Melody { melody } => {
            let melody = load_melody(melody.as_deref())?;
            print_melody(&melody, &config);
        }
    }

    Ok(())
}

fn load_melody(text: Option<&str>) -> Result<Melody> {
    match text {
        Some(t) => melody::parse(t),
        None => Ok(Melody::twinkle()),
    }
}

fn print_melody(melody: &Melody, config: &GameConfig) {
    let window_top = HEADLESS_HEIGHT - config.window_top;
    println!("Notes: {}", melody.len());
    println!(
        "Hit window on a {}x{} surface: {} < y < {}",
        HEADLESS_WIDTH,
        HEADLESS_HEIGHT,
        window_top,
        HEADLESS_HEIGHT - config.window_bottom
    );
    println!();
    for note in scheduler::initialize(melody, config.spacing).iter() {
        println!(
            "  {:?}  pitch {} ({:.1} Hz)  start {:>6}  in window at tick {}",
            note.name,
            note.pitch,
            pitch_to_freq(note.pitch),
            note.position,
            scheduler::ticks_to_pass(note.position, window_top, config.step)
        );
    }
}

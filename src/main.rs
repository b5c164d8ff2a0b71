//! Command line front end for sequence files.
//!
//! ## Usage
//! ```sh
//! seqtool list ./sdcard
//! seqtool show ./sdcard/demo.seq
//! seqtool generate --name pulse --steps 8 --palette FF0000,00FF00 --output pulse.seq
//! seqtool play ./sdcard/demo.seq --fps 30 --seconds 5
//! ```

use clap::{Parser, Subcommand};
use seqtool::colors::{default_palette, unpack_rgb};
use seqtool::{
    FileName, GeneratorConfig, Panel, Player, PlayerAction, Sequence, SequenceStep, Srgb, generate,
    list_directory, load_sequence, save_sequence, write_sequence,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Largest sequence the tool will load or generate.
const MAX_STEPS: usize = 1024;

type CliSequence = Sequence<MAX_STEPS>;

/// Inspect, generate and preview light sequence files
#[derive(Parser)]
#[command(name = "seqtool")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the entries of a sequence directory
    List {
        #[arg(default_value = "./sdcard")]
        dir: PathBuf,
    },

    /// Print the steps of a sequence file
    Show { file: PathBuf },

    /// Generate a sequence from a palette
    Generate {
        /// Short name of the sequence
        #[arg(long, default_value = "generated")]
        name: String,

        /// Number of lit steps
        #[arg(long, default_value = "1")]
        steps: usize,

        /// Duration of each lit step in seconds
        #[arg(long, default_value = "1.0")]
        step_duration: f32,

        /// Do not follow lit steps with dark wait steps
        #[arg(long)]
        no_wait: bool,

        /// Duration of each wait step in seconds
        #[arg(long, default_value = "1.0")]
        wait_duration: f32,

        /// Comma separated RRGGBB colors; defaults to the built-in palette
        #[arg(long, value_delimiter = ',', value_parser = parse_color)]
        palette: Vec<u32>,

        /// Write the sequence here instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Step through a sequence with a simulated frame clock
    Play {
        file: PathBuf,

        /// Simulated frames per second
        #[arg(long, default_value = "30")]
        fps: u32,

        /// How long to play, in seconds
        #[arg(long, default_value = "10.0")]
        seconds: f32,
    },
}

fn parse_color(text: &str) -> Result<u32, String> {
    let digits = text.trim().trim_start_matches('#');
    if digits.is_empty() || digits.len() > 6 {
        return Err(format!("expected RRGGBB, got '{}'", text));
    }
    u32::from_str_radix(digits, 16).map_err(|err| format!("invalid color '{}': {}", text, err))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    let result = match args.command {
        Command::List { dir } => list(&dir),
        Command::Show { file } => show(&file),
        Command::Generate {
            name,
            steps,
            step_duration,
            no_wait,
            wait_duration,
            palette,
            output,
        } => {
            let config = GeneratorConfig {
                name: &name,
                step_count: steps,
                step_duration,
                wait_steps: !no_wait,
                wait_duration,
            };
            run_generate(&config, &palette, output.as_deref())
        }
        Command::Play { file, fps, seconds } => play(&file, fps, seconds),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn list(dir: &Path) -> CliResult {
    let files = list_directory(dir)?;
    for (index, file) in files.entries().iter().enumerate() {
        println!("{:04} {}", index + 1, file.name);
    }
    Ok(())
}

fn load(path: &Path) -> Result<CliSequence, Box<dyn std::error::Error>> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| format!("{} is not a file", path.display()))?
        .to_string_lossy();
    Ok(load_sequence(&FileName::new(dir, name))?)
}

fn show(path: &Path) -> CliResult {
    let sequence = load(path)?;
    println!("name:        {}", sequence.short_name());
    println!("file:        {}", sequence.file_name());
    println!("description: {}", sequence.description());
    println!("steps:       {}", sequence.step_count());
    println!("duration:    {:.2} s", sequence.duration());
    for (index, step) in sequence.steps().iter().enumerate() {
        println!("{:04} {}", index + 1, describe_step(step));
    }
    Ok(())
}

fn describe_step(step: &SequenceStep) -> String {
    let describe = |panel: Panel| {
        let setting = step.panel(panel);
        if setting.is_random() {
            format!("mode {:3}, color random", setting.mode)
        } else {
            format!("mode {:3}, color {:06X}", setting.mode, setting.packed_color())
        }
    };
    format!(
        "panel1: {} | panel2: {} | wait {:.1} s",
        describe(Panel::First),
        describe(Panel::Second),
        step.duration()
    )
}

fn run_generate(config: &GeneratorConfig<'_>, packed: &[u32], output: Option<&Path>) -> CliResult {
    let palette: Vec<Srgb> = if packed.is_empty() {
        default_palette().to_vec()
    } else {
        packed.iter().copied().map(unpack_rgb).collect()
    };

    let sequence: CliSequence = generate(config, &palette)?;
    match output {
        Some(path) => save_sequence(path, &sequence)?,
        None => {
            let mut text = String::new();
            write_sequence(&sequence, &mut text)?;
            print!("{}", text);
        }
    }
    tracing::info!(
        steps = sequence.step_count(),
        duration = sequence.duration(),
        "sequence generated"
    );
    Ok(())
}

fn play(path: &Path, fps: u32, seconds: f32) -> CliResult {
    if fps == 0 {
        return Err("fps must be positive".into());
    }
    let mut sequence = load(path)?;
    let mut player = Player::new();
    let delta = 1.0 / fps as f32;
    let frames = (seconds.max(0.0) * fps as f32) as u32;

    let mut shown = player.handle_action(&mut sequence, PlayerAction::Start)?;
    if let Some(frame) = &shown {
        println!("{:7.2} s  step {:04}  {}", frame.elapsed, frame.step_index + 1, describe_step(&frame.step));
    }
    for _ in 0..frames {
        let frame = player.handle_action(&mut sequence, PlayerAction::Tick(delta))?;
        let changed = match (&frame, &shown) {
            (Some(now), Some(before)) => now.step_index != before.step_index || now.looped,
            _ => frame.is_some(),
        };
        if changed {
            if let Some(frame) = &frame {
                if frame.looped {
                    println!("-- loop");
                }
                println!("{:7.2} s  step {:04}  {}", frame.elapsed, frame.step_index + 1, describe_step(&frame.step));
            }
        }
        shown = frame;
    }
    player.handle_action(&mut sequence, PlayerAction::Stop)?;
    Ok(())
}

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use unit_circle_core::{
    geometry::to_radians, render, AppConfig, InputEvent, Recorder, RecordingSettings,
    SceneState, ScrollDirection, ScrollScript, Session, SvgSurface,
};

fn main() -> unit_circle_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            script,
            output,
            config,
        } => run_replay(&script, &output, config.config.as_deref()),
        Commands::Sweep {
            steps,
            direction,
            show,
            output,
            config,
        } => run_sweep(steps, direction.into(), show, &output, config.config.as_deref()),
        Commands::Inspect {
            degrees,
            radians,
            show,
            config,
        } => run_inspect(degrees, radians, show, config.config.as_deref()),
        Commands::Interactive { output, config } => {
            run_interactive(&output, config.config.as_deref())
        }
    }
}

fn run_replay(
    script: &Path,
    output: &OutputArgs,
    config: Option<&Path>,
) -> unit_circle_core::Result<()> {
    let config = AppConfig::load_or_default(config)?;
    let script = ScrollScript::load(script)?;
    tracing::info!(events = script.len(), variant = ?config.variant, "replaying script");
    record_script(config, &script, output)
}

fn run_sweep(
    steps: usize,
    direction: ScrollDirection,
    show: bool,
    output: &OutputArgs,
    config: Option<&Path>,
) -> unit_circle_core::Result<()> {
    let config = AppConfig::load_or_default(config)?;
    let mut script = ScrollScript::sweep(steps, direction);
    if show {
        script.events.insert(0, InputEvent::Toggle);
    }
    tracing::info!(steps, ?direction, show, "sweeping");
    record_script(config, &script, output)
}

fn record_script(
    config: AppConfig,
    script: &ScrollScript,
    output: &OutputArgs,
) -> unit_circle_core::Result<()> {
    let mut recorder = Recorder::new(output.settings())?;
    let mut session = new_session(config);
    for event in &script.events {
        if session.handle(*event).is_some() {
            recorder.capture(session.graph().diagram())?;
        }
    }
    recorder.finish(session.graph().diagram(), session.graph().chart())?;
    report(&session);
    Ok(())
}

fn run_inspect(
    degrees: Option<f64>,
    radians: Option<f64>,
    show: bool,
    config: Option<&Path>,
) -> unit_circle_core::Result<()> {
    let config = AppConfig::load_or_default(config)?;
    let theta = match (degrees, radians) {
        (Some(degrees), _) => to_radians(degrees),
        (None, Some(radians)) => radians,
        (None, None) => config.starting_theta(),
    };
    tracing::debug!(theta, "inspecting");
    let frame = render(&SceneState::new(theta, show), &config);
    println!("{}", frame.to_json()?);
    Ok(())
}

fn run_interactive(output: &OutputArgs, config: Option<&Path>) -> unit_circle_core::Result<()> {
    let config = AppConfig::load_or_default(config)?;
    let mut recorder = Recorder::new(output.settings())?;
    let mut session = new_session(config);
    recorder.finish(session.graph().diagram(), session.graph().chart())?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "commands: up, down, toggle, quit")?;
    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if matches!(command, "quit" | "q" | "exit") {
            break;
        }

        let event: InputEvent = match command.parse() {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(%err, "ignoring input");
                continue;
            }
        };
        if session.handle(event).is_some() {
            recorder.capture(session.graph().diagram())?;
            recorder.finish(session.graph().diagram(), session.graph().chart())?;
        }
        writeln!(
            stdout,
            "theta = {:.4} rad, button: {}",
            session.state().theta,
            session.toggle_label()
        )?;
    }
    report(&session);
    Ok(())
}

fn new_session(config: AppConfig) -> Session<SvgSurface> {
    let diagram = SvgSurface::from_config(&config.diagram);
    let chart = SvgSurface::from_config(&config.chart);
    let mut session = Session::new(config, diagram, chart);
    session.start();
    session
}

fn report(session: &Session<SvgSurface>) {
    tracing::info!(
        frames = session.graph().frames(),
        theta = session.state().theta,
        show = session.state().show,
        chart_elements = session.graph().chart().len(),
        "session finished"
    );
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Unit circle trigonometry visualiser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON script of scroll and toggle events.
    Replay {
        /// Path to the event script.
        script: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Scroll a fixed number of notches in one direction.
    Sweep {
        /// Number of scroll events.
        #[arg(short = 'n', long, default_value_t = 360)]
        steps: usize,
        #[arg(short, long, value_enum, default_value_t = Direction::Down)]
        direction: Direction,
        /// Plot the secant and cosecant series as well.
        #[arg(long)]
        show: bool,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the geometry and draw commands for one angle as JSON.
    Inspect {
        #[arg(long, conflicts_with = "radians", allow_negative_numbers = true)]
        degrees: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        radians: Option<f64>,
        #[arg(long)]
        show: bool,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Read up/down/toggle commands from stdin and redraw after each one.
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory that receives diagram.svg and chart.svg.
    #[arg(short, long = "out", default_value = "out")]
    out: PathBuf,
    /// Also write a numbered diagram for every event.
    #[arg(long)]
    every_frame: bool,
}

impl OutputArgs {
    fn settings(&self) -> RecordingSettings {
        RecordingSettings {
            output_dir: self.out.clone(),
            every_frame: self.every_frame,
        }
    }
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for ScrollDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => ScrollDirection::Up,
            Direction::Down => ScrollDirection::Down,
        }
    }
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cueprompt_core::config::{MAX_CONTROL_VALUE, MIN_CONTROL_VALUE};
use cueprompt_core::scroll::speed;
use cueprompt_core::{AppConfig, DisplaySurface, Prompter, PrompterEvent, TimeControlMode};

#[derive(Parser)]
#[command(name = "cueprompt")]
#[command(author, version, about = "A dual-surface teleprompter engine")]
struct Cli {
    /// Script file to prompt. Inline `({MM:SS})` markers set per-paragraph
    /// durations when --mode local is active.
    file: PathBuf,

    /// Seconds each paragraph stays up before auto-advancing
    #[arg(short, long)]
    duration: Option<u32>,

    /// Paragraph timing source
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Scroll speed control value in [200, 100000]; lower is faster
    #[arg(short, long)]
    control_value: Option<u32>,

    /// Mirror output onto a second surface
    #[arg(short, long)]
    secondary: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// One shared duration for every paragraph
    Global,
    /// Honor per-paragraph `({MM:SS})` markers
    Local,
}

impl From<Mode> for TimeControlMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Global => TimeControlMode::Global,
            Mode::Local => TimeControlMode::Local,
        }
    }
}

/// Headless stand-in for a rendering widget: the scrollable extent is
/// estimated from the line count at the configured line height.
struct TextSurface {
    name: &'static str,
    text: String,
    position: f64,
    line_height: f64,
}

impl TextSurface {
    fn new(name: &'static str, line_height: f64) -> Self {
        Self {
            name,
            text: String::new(),
            position: 0.0,
            line_height,
        }
    }
}

impl DisplaySurface for TextSurface {
    fn set_visible_text(&mut self, text: &str) {
        self.text = text.to_string();
        debug!(surface = self.name, chars = text.len(), "text updated");
    }

    fn max_scroll_extent(&self) -> f64 {
        self.text.lines().count().max(1) as f64 * self.line_height
    }

    fn scroll_position(&self) -> f64 {
        self.position
    }

    fn set_scroll_position(&mut self, position: f64) {
        self.position = position.clamp(0.0, self.max_scroll_extent());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration, then layer the flag overrides on top
    let mut config = AppConfig::load()?;
    if let Some(duration) = cli.duration {
        config.playback.paragraph_duration_secs = duration;
    }
    if let Some(mode) = cli.mode {
        config.playback.time_control = mode.into();
    }
    if let Some(value) = cli.control_value {
        config.scroll.control_value = value.clamp(MIN_CONTROL_VALUE, MAX_CONTROL_VALUE);
    }

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let line_height = speed::line_height_for_font(config.scroll.font_size);
    info!(
        control = config.scroll.control_value,
        speed = format!("{:.1} px/s", speed::actual_speed(config.scroll.control_value)),
        per_line = format!(
            "{:.2} s",
            speed::seconds_per_line(config.scroll.control_value, line_height)
        ),
        "scroll configured"
    );

    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut prompter = Prompter::new(&config, Box::new(TextSurface::new("primary", line_height)))
        .with_event_sender(event_tx);
    if cli.secondary {
        prompter = prompter
            .with_secondary_surface(Box::new(TextSurface::new("secondary", line_height)));
    }

    let now = Instant::now();
    prompter.set_text(now, &text);
    if cli.secondary {
        prompter.set_secondary_enabled(now, true);
    }
    prompter.start(Instant::now());

    let mut ticker = tokio::time::interval(Duration::from_millis(config.scroll.tick_rate_ms));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                prompter.tick(Instant::now());
            }
            Some(event) = event_rx.recv() => {
                match event {
                    PrompterEvent::ParagraphChanged { index } => {
                        info!(
                            index,
                            total = prompter.document().total_paragraphs(),
                            "paragraph changed"
                        );
                    }
                    PrompterEvent::PlaybackFinished => {
                        info!("playback finished");
                        break;
                    }
                    event => debug!(?event, "prompter event"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    Ok(())
}

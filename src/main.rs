use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slidemorph::constants::*;
use slidemorph::{MorphConfig, SlideShowEngine, Viewport, markup};

#[derive(Parser)]
#[command(name = "slidemorph", about = "Run slideshow morph transitions over a markup file")]
struct Cli {
    /// Slideshow markup (well-formed XHTML)
    markup: PathBuf,

    /// Navigation deltas applied to the first slideshow, one every --gap-ms
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    navigate: Vec<i64>,

    /// Time between two navigations (ms)
    #[arg(long, default_value_t = 500)]
    gap_ms: u64,

    /// Issue this many random navigations on random slideshows
    #[arg(long, default_value_t = 0)]
    random_walk: usize,

    /// Start autorun on every slideshow
    #[arg(long)]
    autorun: bool,

    /// Keep the clock running this long after the last navigation (ms)
    #[arg(long, default_value_t = 2000)]
    run_ms: u64,

    /// Interpolation steps per transition
    #[arg(long, default_value_t = STEP_TOTAL)]
    steps: u32,

    /// Time between interpolation steps (ms)
    #[arg(long, default_value_t = STEP_INTERVAL_MS)]
    step_ms: u64,

    /// Time between autorun ticks (ms)
    #[arg(long, default_value_t = AUTORUN_INTERVAL_MS)]
    autorun_ms: u64,

    /// Attribute relating elements across slides
    #[arg(long, default_value = RELATION_ATTR)]
    relation_attr: String,

    /// Viewport height, for autorun visibility
    #[arg(long, default_value_t = 1080.0)]
    viewport_height: f32,

    /// Open a preview window instead of running headless
    #[arg(long)]
    preview: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.markup)
        .with_context(|| format!("failed to read {}", cli.markup.display()))?;
    let document = markup::parse(&source)
        .with_context(|| format!("failed to parse {}", cli.markup.display()))?;

    let config = MorphConfig::default()
        .with_step_total(cli.steps)
        .with_step_interval(Duration::from_millis(cli.step_ms))
        .with_autorun_interval(Duration::from_millis(cli.autorun_ms))
        .with_relation_attr(cli.relation_attr.clone());
    let mut engine = SlideShowEngine::new(document, Viewport::new(0.0, cli.viewport_height), config)?;

    let activated = engine.animate_slide_shows()?;
    if activated == 0 {
        info!("no slideshow with slides found in {}", cli.markup.display());
    }
    if cli.autorun {
        engine.autorun_all();
    }

    if cli.preview {
        return preview(&mut engine, cli.viewport_height);
    }

    let gap = Duration::from_millis(cli.gap_ms);
    if !cli.navigate.is_empty() {
        if engine.widgets().is_empty() {
            bail!("--navigate needs at least one slideshow");
        }
        for &delta in &cli.navigate {
            let started = engine.navigate(0, delta)?;
            info!(delta, started, at_ms = engine.now().as_millis() as u64, "navigate");
            engine.advance(gap)?;
        }
    }

    if cli.random_walk > 0 && !engine.widgets().is_empty() {
        let mut rng = rand::rng();
        for _ in 0..cli.random_walk {
            let widget = rng.random_range(0..engine.widgets().len());
            let slides = engine.widget(widget)?.slides().len() as i64;
            let delta = rng.random_range(-slides..=slides);
            let started = engine.navigate(widget, delta)?;
            info!(widget, delta, started, "random navigate");
            engine.advance(Duration::from_millis(rng.random_range(0..=cli.gap_ms)))?;
        }
    }

    engine.advance(Duration::from_millis(cli.run_ms))?;
    engine.finish_all();

    for show in engine.widgets() {
        info!(
            widget = show.index(),
            selected = show.selected_index(),
            slides = show.slides().len(),
            "final selection"
        );
    }
    println!("{}", markup::serialize(engine.document()));
    Ok(())
}

#[cfg(feature = "preview")]
fn preview(engine: &mut SlideShowEngine, height: f32) -> Result<()> {
    slidemorph::preview::run(engine, 1280, height as i32)
}

#[cfg(not(feature = "preview"))]
fn preview(_engine: &mut SlideShowEngine, _height: f32) -> Result<()> {
    bail!("this build has no preview window; rebuild with `--features preview`")
}

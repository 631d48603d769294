mod config;
mod output;
mod settings;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use asciify::{
    measure_char_aspect, present, AsciiRenderer, Debouncer, Session, SourceImage, TerminalProbe,
};
use clap::{ArgAction, Parser, Subcommand};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use notify::{RecursiveMode, Watcher};
use walkdir::WalkDir;

use config::FileConfig;
use output::OutputFormat;
use settings::RenderSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert images to character art")]
struct Cli {
    /// TOML file with [render] and [display] defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render character art to the terminal for a quick preview
    Preview(PreviewArgs),
    /// Convert an image and write the result as txt, html, png or jpg
    Convert(ConvertArgs),
    /// Convert every image in a directory
    Batch(BatchArgs),
    /// Re-render the preview whenever the image or config file changes
    Watch(PreviewArgs),
    /// Print the measured character aspect ratio
    Probe,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image path
    input: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image path
    input: PathBuf,
    /// Output file path; the extension picks the format
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of images
    input: PathBuf,
    /// Output directory
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Output format for every converted image
    #[arg(long, value_enum, default_value = "txt")]
    format: OutputFormat,
    #[command(flatten)]
    settings: RenderSettings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    match cli.command {
        Commands::Preview(args) => preview(args, &file_config),
        Commands::Convert(args) => convert(args, &file_config),
        Commands::Batch(args) => batch(args, &file_config),
        Commands::Watch(args) => watch(args, cli.config.as_deref(), &file_config),
        Commands::Probe => probe(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn preview(args: PreviewArgs, file_config: &FileConfig) -> Result<()> {
    let settings = args.settings.resolve(file_config);
    let renderer = AsciiRenderer::new(settings.char_aspect);
    let grid = renderer
        .render_path(&args.input, &settings.config)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    let stdout = io::stdout();
    present::write_ansi(&grid, settings.config.colorize, &mut stdout.lock())?;
    Ok(())
}

fn convert(args: ConvertArgs, file_config: &FileConfig) -> Result<()> {
    let settings = args.settings.resolve(file_config);
    let format = OutputFormat::from_path(&args.output)?;
    let renderer = AsciiRenderer::new(settings.char_aspect);
    let grid = renderer
        .render_path(&args.input, &settings.config)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    output::write_grid(&grid, &settings, format, &args.output)
}

fn batch(args: BatchArgs, file_config: &FileConfig) -> Result<()> {
    let settings = args.settings.resolve(file_config);
    let renderer = AsciiRenderer::new(settings.char_aspect);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let inputs = collect_images(&args.input)?;
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images",
        )?
        .progress_chars("=> "),
    );

    let mut written = 0usize;
    for input in &inputs {
        let stem = input.file_stem().and_then(|stem| stem.to_str()).unwrap_or("image");
        let target = args.out_dir.join(format!("{stem}.{}", args.format.extension()));

        match renderer.render_path(input, &settings.config) {
            Ok(grid) => {
                output::write_grid(&grid, &settings, args.format, &target)?;
                written += 1;
            },
            Err(err) => warn!("skipping {:?}: {err}", input),
        }
        progress.inc(1);
    }

    progress.finish_with_message(format!("{written} images written to {:?}", args.out_dir));
    Ok(())
}

fn collect_images(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| image::ImageFormat::from_path(path).is_ok())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no image files found in {:?}", path);
    }
    Ok(entries)
}

fn watch(args: PreviewArgs, config_path: Option<&Path>, file_config: &FileConfig) -> Result<()> {
    let settings = args.settings.resolve(file_config);
    let mut session = Session::new(settings.config.clone(), settings.char_aspect);
    load_source(&mut session, &args.input)?;
    redraw(&session)?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("failed to start file watcher")?;
    watcher
        .watch(&args.input, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {:?}", args.input))?;
    if let Some(path) = config_path {
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {:?}", path))?;
    }

    let mut debouncer = Debouncer::default();
    loop {
        let timeout = debouncer.remaining(Instant::now()).unwrap_or(Duration::from_secs(3600));
        match rx.recv_timeout(timeout) {
            Ok(Ok(event)) if event.kind.is_modify() || event.kind.is_create() => {
                debug!("change detected: {:?}", event.paths);
                debouncer.submit((), Instant::now());
            },
            Ok(Ok(_)) => {},
            Ok(Err(err)) => warn!("watch error: {err}"),
            Err(RecvTimeoutError::Timeout) => {},
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if debouncer.poll(Instant::now()).is_none() {
            continue;
        }

        if let Some(path) = config_path {
            match FileConfig::load(path) {
                Ok(file_config) => {
                    let config = args.settings.resolve(&file_config).config;
                    session.set_config(config);
                },
                Err(err) => warn!("keeping previous settings: {err:#}"),
            }
        }
        if let Err(err) = load_source(&mut session, &args.input) {
            warn!("keeping previous image: {err:#}");
        }
        if let Err(err) = redraw(&session) {
            warn!("render failed: {err:#}");
        }
    }

    Ok(())
}

fn load_source(session: &mut Session, path: &Path) -> Result<()> {
    let source =
        SourceImage::open(path).with_context(|| format!("failed to open image {:?}", path))?;
    session.load(source);
    Ok(())
}

fn redraw(session: &Session) -> Result<()> {
    let prepared = session.prepare()?;
    let mut stdout = io::stdout().lock();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    if let Some(geometry) = prepared.geometry() {
        writeln!(stdout, "rendering {}x{} characters...", geometry.columns, geometry.rows)?;
        stdout.flush()?;
    }

    let grid = prepared.compute();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    present::write_ansi(&grid, session.config().colorize, &mut stdout)?;
    info!("rendered {}x{} characters", grid.columns, grid.rows);
    Ok(())
}

fn probe() -> Result<()> {
    let measured = measure_char_aspect(&TerminalProbe);
    println!("{measured:.4}");
    Ok(())
}

// SPDX-License-Identifier: MIT
//
// chromath: semiprimes, digit kernels and terminal views.
//
// The binary wires the crates together:
//
//   chromath-core    → generation, transforms, config, JSON store
//   chromath-palette → digit palettes and view colors
//   chromath-view    → frames for each view
//   chromath-term    → color depth, SGR encoding, terminal size
//
// Every command is one shot. `generate` writes both datasets to the store;
// `show` loads one, optionally transforms a copy, renders a frame and
// writes it to stdout. Stored data is never modified by `show`.
//
//   config file → flag overrides → validate → store → transform → view
//   → FrameBuffer → LineWriter (ColorMode) → stdout
//
// Logs go to stderr so a frame piped to a file stays clean.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chromath_core::config::{Config, MAX_BINS};
use chromath_core::error::{ParamError, ParamErrorKind};
use chromath_core::generator::MAX_PRIME_LIMIT;
use chromath_core::{
    ColorChoice, Grid, Pairing, Store, Transform, TransformKind, generate_kernel_grid,
    generate_semiprimes, kernel, params,
};
use chromath_palette::{Palette, builtin, builtin_names, builtin_palette};
use chromath_term::buffer::FrameBuffer;
use chromath_term::cell::Style;
use chromath_term::output::{self, ColorMode, OutputBuffer};
use chromath_term::terminal::{self, Size};
use chromath_view::{Caption, GridView, RenderOptions, SequenceView};

// ─── Command line ───────────────────────────────────────────────────────────

/// Semiprimes, digit kernels and the views between them.
#[derive(Debug, Parser)]
#[command(name = "chromath", version)]
struct Cli {
    /// Config file (default: ./chromath.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the generated datasets
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the semiprime sequence and the kernel grid, replacing stored data
    Generate(GenerateArgs),
    /// Render a stored dataset
    Show {
        #[command(subcommand)]
        target: ShowTarget,
    },
    /// Print the kernel (repeated digit sum) of each value
    Kernel {
        /// Integers, negative allowed
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// List the builtin palettes
    Palettes,
}

// Numbers are taken as text so the core parsers can name the parameter
// that failed.
#[derive(Debug, Args)]
struct GenerateArgs {
    /// Number of semiprimes
    #[arg(long, value_name = "N")]
    count: Option<String>,
    /// Primes are drawn from 2..L
    #[arg(long, value_name = "L")]
    prime_limit: Option<String>,
    /// Pair enumeration: triangular or cartesian
    #[arg(long)]
    pairing: Option<String>,
    /// Grid x coordinates, A..B (end exclusive)
    #[arg(long, value_name = "A..B", allow_hyphen_values = true)]
    x_range: Option<String>,
    /// Grid y coordinates, A..B (end exclusive)
    #[arg(long, value_name = "A..B", allow_hyphen_values = true)]
    y_range: Option<String>,
}

#[derive(Debug, Subcommand)]
enum ShowTarget {
    /// The semiprime sequence
    Sequence(ShowArgs),
    /// The kernel grid
    Grid(ShowArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// View name (see --help of the target for the list)
    #[arg(long)]
    view: Option<String>,
    /// Transform applied to a copy before rendering
    #[arg(long)]
    transform: Option<String>,
    /// Transform parameter, repeat for two-parameter transforms
    #[arg(long = "param", value_name = "P", allow_hyphen_values = true)]
    params: Vec<String>,
    /// Palette name (see `chromath palettes`)
    #[arg(long)]
    palette: Option<String>,
    /// Color depth: auto, truecolor, 256, 16 or none
    #[arg(long, value_name = "MODE")]
    color: Option<String>,
    /// Frame width in columns
    #[arg(long)]
    width: Option<u16>,
    /// Frame height in rows
    #[arg(long)]
    height: Option<u16>,
    /// Histogram bins
    #[arg(long)]
    bins: Option<String>,
    /// Modulus for the distribution view
    #[arg(long, value_name = "M")]
    residues: Option<String>,
}

// ─── Setup ──────────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "chromath=info,chromath_core=info",
        1 => "chromath=debug,chromath_core=debug,chromath_view=debug",
        _ => "chromath=trace,chromath_core=trace,chromath_view=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Load the config file and apply the global flag overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.store.dir.clone_from(dir);
    }
    Ok(config)
}

/// Color depth for a frame written to stdout.
fn color_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto if terminal::is_tty() && !terminal::no_color_requested() => {
            ColorMode::TrueColor
        }
        ColorChoice::Auto | ColorChoice::None => ColorMode::Plain,
        ColorChoice::Truecolor => ColorMode::TrueColor,
        ColorChoice::Ansi256 => ColorMode::Ansi256,
        ColorChoice::Ansi16 => ColorMode::Ansi16,
    }
}

/// Frame size: flags, then the terminal (leaving a row for the prompt),
/// then the fallback.
fn frame_size(width: Option<u16>, height: Option<u16>) -> Size {
    let detected = terminal::get_size().map(|s| Size {
        cols: s.cols,
        rows: s.rows.saturating_sub(1).max(1),
    });
    Size::resolve(width, height, detected)
}

fn palette_named(name: &str) -> Result<Palette, ParamError> {
    builtin_palette(name)
        .ok_or_else(|| ParamError::new("palette", ParamErrorKind::UnknownName(name.to_string())))
}

fn write_frame(frame: &FrameBuffer, mode: ColorMode) -> Result<()> {
    let mut out = OutputBuffer::new();
    output::render_frame(frame, mode, &mut out)?;
    out.flush_stdout().context("writing to stdout")
}

// ─── generate ───────────────────────────────────────────────────────────────

fn apply_generate_args(config: &mut Config, args: &GenerateArgs) -> Result<(), ParamError> {
    let generate = &mut config.generate;
    if let Some(raw) = &args.count {
        generate.count = params::parse_count("count", raw)?;
    }
    if let Some(raw) = &args.prime_limit {
        #[allow(clippy::cast_possible_wrap)]
        let max = MAX_PRIME_LIMIT as i64;
        generate.prime_limit = params::parse_bounded("prime_limit", raw, 3, max)?.unsigned_abs();
    }
    if let Some(raw) = &args.pairing {
        generate.pairing = Pairing::from_name(raw)?;
    }
    if let Some(raw) = &args.x_range {
        generate.set_x_range(params::parse_range("x_range", raw)?);
    }
    if let Some(raw) = &args.y_range {
        generate.set_y_range(params::parse_range("y_range", raw)?);
    }
    config.validate()
}

fn cmd_generate(mut config: Config, args: &GenerateArgs) -> Result<()> {
    apply_generate_args(&mut config, args)?;
    let gen_cfg = &config.generate;
    let store = Store::open(&config.store.dir)?;

    let started = Instant::now();
    let values = generate_semiprimes(gen_cfg.count, &gen_cfg.semiprime_options());
    let grid = generate_kernel_grid(gen_cfg.x_range(), gen_cfg.y_range())?;
    info!(
        semiprimes = values.len(),
        rows = grid.rows(),
        cols = grid.cols(),
        elapsed = ?started.elapsed(),
        "generated datasets"
    );

    store.save_semiprimes(&values)?;
    store.save_kernel_grid(&grid)?;

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "generated {} semiprimes ({} pairing) and a {}×{} kernel grid in {}",
        values.len(),
        gen_cfg.pairing.name(),
        grid.rows(),
        grid.cols(),
        store.dir().display()
    )?;
    if values.len() < gen_cfg.count {
        writeln!(
            stdout,
            "note: only {} semiprimes exist below {}²; raise --prime-limit for more",
            values.len(),
            gen_cfg.prime_limit
        )?;
    }
    Ok(())
}

// ─── show ───────────────────────────────────────────────────────────────────

/// Render options from config and flags, plus the depth to encode at.
fn render_setup(config: &Config, args: &ShowArgs) -> Result<(RenderOptions, ColorMode)> {
    let render = &config.render;
    let choice = match &args.color {
        Some(raw) => ColorChoice::from_name(raw)?,
        None => render.color,
    };
    let mode = color_mode(choice);
    let palette = palette_named(args.palette.as_deref().unwrap_or(&render.palette))?;
    let size = frame_size(args.width, args.height);

    let mut opts = RenderOptions::new(size.cols, size.rows, palette);
    opts.bins = render.bins;
    if let Some(raw) = &args.bins {
        #[allow(clippy::cast_possible_wrap)]
        let max = MAX_BINS as i64;
        opts.bins = usize::try_from(params::parse_bounded("bins", raw, 1, max)?)?;
    }
    if let Some(raw) = &args.residues {
        let m = params::parse_bounded("residues", raw, 1, i64::from(u32::MAX))?;
        opts.residues = m.unsigned_abs();
    }
    opts.text_only = mode.is_plain();
    debug!(
        width = opts.width,
        height = opts.height,
        ?mode,
        palette = opts.palette.name(),
        "render setup"
    );
    Ok((opts, mode))
}

/// Parse `--transform` and its `--param` values, if a transform was given.
fn parse_transform(args: &ShowArgs) -> Result<Option<Transform>, ParamError> {
    args.transform
        .as_deref()
        .map(|name| {
            let kind = TransformKind::from_name(name)?;
            Transform::from_raw(kind, &args.params)
        })
        .transpose()
}

fn sequence_frame(store: &Store, args: &ShowArgs, opts: &RenderOptions) -> Result<FrameBuffer> {
    let view = args
        .view
        .as_deref()
        .map_or(Ok(SequenceView::default()), SequenceView::from_name)?;
    let stored = store.load_semiprimes()?;
    let transform = parse_transform(args)?;
    let values = match transform {
        Some(t) => t.apply_sequence(&stored)?,
        None => stored,
    };

    let mut caption = Caption::new(view.name(), format!("{} semiprimes", values.len()));
    if let Some(t) = transform {
        caption = caption.with_transform(t);
    }
    Ok(view.render(&values, &caption, opts))
}

fn grid_frame(store: &Store, args: &ShowArgs, opts: &RenderOptions) -> Result<FrameBuffer> {
    let view = args
        .view
        .as_deref()
        .map_or(Ok(GridView::default()), GridView::from_name)?;
    let stored = store.load_kernel_grid()?;
    let transform = parse_transform(args)?;
    let grid: Grid = match transform {
        Some(t) => t.apply_grid(&stored)?,
        None => stored,
    };

    let dataset = format!(
        "kernel grid x {} ↓ y {} →",
        grid.x_range(),
        grid.y_range()
    );
    let mut caption = Caption::new(view.name(), dataset);
    if let Some(t) = transform {
        caption = caption.with_transform(t);
    }
    Ok(view.render(&grid, &caption, opts))
}

fn cmd_show(config: &Config, target: &ShowTarget) -> Result<()> {
    let args = match target {
        ShowTarget::Sequence(args) | ShowTarget::Grid(args) => args,
    };
    let (opts, mode) = render_setup(config, args)?;
    let store = Store::open(&config.store.dir)?;
    let frame = match target {
        ShowTarget::Sequence(_) => sequence_frame(&store, args, &opts)?,
        ShowTarget::Grid(_) => grid_frame(&store, args, &opts)?,
    };
    write_frame(&frame, mode)
}

// ─── kernel / palettes ──────────────────────────────────────────────────────

fn cmd_kernel(values: &[String]) -> Result<()> {
    let parsed = values
        .iter()
        .map(|raw| params::parse_int("value", raw))
        .collect::<Result<Vec<_>, _>>()?;
    let mut stdout = io::stdout().lock();
    for v in parsed {
        writeln!(stdout, "{v}\t{}", kernel(v))?;
    }
    Ok(())
}

/// One row per palette: name, swatches, description.
fn palettes_frame() -> Result<FrameBuffer> {
    const NAME_W: u16 = 10;
    let names = builtin_names();
    let widest = names
        .iter()
        .filter_map(|n| builtin_palette(n))
        .map(|p| p.len())
        .max()
        .unwrap_or(0);
    let swatch_w = u16::try_from(widest * 2 + 2)?;
    let desc_w = names
        .iter()
        .map(|n| builtin::describe(n).len())
        .max()
        .unwrap_or(0);
    let width = NAME_W + swatch_w + u16::try_from(desc_w)?;
    let mut frame = FrameBuffer::new(width, u16::try_from(names.len())?);

    for (y, name) in (0u16..).zip(names.iter()) {
        let palette = palette_named(name)?;
        frame.paint_text(0, y, name, Style::PLAIN, None);
        let mut x = NAME_W;
        for color in palette.colors() {
            let cell = color.to_cell_color();
            frame.paint_text(x, y, "██", Style::fg(cell), None);
            x += 2;
        }
        frame.paint_text(NAME_W + swatch_w, y, builtin::describe(name), Style::PLAIN, None);
    }
    Ok(frame)
}

fn cmd_palettes(config: &Config) -> Result<()> {
    let frame = palettes_frame()?;
    write_frame(&frame, color_mode(config.render.color))
}

// ─── main ───────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    debug!(store = %config.store.dir.display(), "configuration loaded");
    match &cli.command {
        Command::Generate(args) => cmd_generate(config, args),
        Command::Show { target } => cmd_show(&config, target),
        Command::Kernel { values } => cmd_kernel(values),
        Command::Palettes => cmd_palettes(&config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("chromath: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("chromath").chain(args.iter().copied())).unwrap()
    }

    fn show_args(args: &[&str]) -> ShowArgs {
        let mut full = vec!["show", "sequence"];
        full.extend_from_slice(args);
        match parse(&full).command {
            Command::Show {
                target: ShowTarget::Sequence(a),
            } => a,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn temp_config(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.store.dir = dir.path().join("data");
        config
    }

    fn generate_into(config: &Config, count: &str) {
        let args = GenerateArgs {
            count: Some(count.to_string()),
            prime_limit: None,
            pairing: None,
            x_range: Some("-1..2".to_string()),
            y_range: Some("-1..2".to_string()),
        };
        let mut config = config.clone();
        apply_generate_args(&mut config, &args).unwrap();
        let store = Store::open(&config.store.dir).unwrap();
        let g = &config.generate;
        store
            .save_semiprimes(&generate_semiprimes(g.count, &g.semiprime_options()))
            .unwrap();
        store
            .save_kernel_grid(&generate_kernel_grid(g.x_range(), g.y_range()).unwrap())
            .unwrap();
    }

    // ── Parsing ──────────────────────────────────────────────────────────

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = parse(&["generate", "--count", "5", "--data-dir", "/tmp/x", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn negative_values_are_accepted() {
        let cli = parse(&["kernel", "-18", "7"]);
        match cli.command {
            Command::Kernel { values } => assert_eq!(values, vec!["-18", "7"]),
            other => panic!("unexpected {other:?}"),
        }
        let args = show_args(&["--transform", "linear", "--param", "-1", "--param", "2"]);
        assert_eq!(args.params, vec!["-1", "2"]);
    }

    #[test]
    fn generate_ranges_parse() {
        let cli = parse(&["generate", "--x-range", "-5..5", "--y-range", "0..3"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let mut config = Config::default();
        apply_generate_args(&mut config, &args).unwrap();
        assert_eq!((config.generate.x_start, config.generate.x_end), (-5, 5));
        assert_eq!((config.generate.y_start, config.generate.y_end), (0, 3));
    }

    #[test]
    fn bad_generate_args_name_the_parameter() {
        let mut config = Config::default();
        let args = GenerateArgs {
            count: Some("lots".into()),
            prime_limit: None,
            pairing: None,
            x_range: None,
            y_range: None,
        };
        let err = apply_generate_args(&mut config, &args).unwrap_err();
        assert_eq!(err.param, "count");

        let args = GenerateArgs {
            count: None,
            prime_limit: None,
            pairing: Some("diagonal".into()),
            x_range: None,
            y_range: None,
        };
        let err = apply_generate_args(&mut config, &args).unwrap_err();
        assert_eq!(err.param, "pairing");
    }

    #[test]
    fn prime_limit_flag_shares_the_config_bound() {
        let cli = parse(&["generate", "--prime-limit", "20000000"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let err = apply_generate_args(&mut Config::default(), &args).unwrap_err();
        assert_eq!(err.param, "prime_limit");

        let cli = parse(&["generate", "--prime-limit", "10000000"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let mut config = Config::default();
        apply_generate_args(&mut config, &args).unwrap();
        assert_eq!(config.generate.prime_limit, MAX_PRIME_LIMIT);
    }

    // ── Setup ────────────────────────────────────────────────────────────

    #[test]
    fn explicit_color_choices() {
        assert_eq!(color_mode(ColorChoice::Truecolor), ColorMode::TrueColor);
        assert_eq!(color_mode(ColorChoice::Ansi256), ColorMode::Ansi256);
        assert_eq!(color_mode(ColorChoice::Ansi16), ColorMode::Ansi16);
        assert_eq!(color_mode(ColorChoice::None), ColorMode::Plain);
    }

    #[test]
    fn explicit_size_wins() {
        assert_eq!(frame_size(Some(30), Some(12)), Size { cols: 30, rows: 12 });
    }

    #[test]
    fn render_setup_from_flags() {
        let config = Config::default();
        let args = show_args(&[
            "--palette", "sunset", "--color", "none", "--width", "50", "--height", "20",
            "--bins", "7",
        ]);
        let (opts, mode) = render_setup(&config, &args).unwrap();
        assert_eq!(mode, ColorMode::Plain);
        assert!(opts.text_only);
        assert_eq!(opts.palette.name(), "sunset");
        assert_eq!((opts.width, opts.height, opts.bins), (50, 20, 7));
    }

    #[test]
    fn unknown_palette_is_rejected() {
        let args = show_args(&["--palette", "plaid", "--width", "10", "--height", "5"]);
        let err = render_setup(&Config::default(), &args).unwrap_err();
        assert!(err.to_string().contains("palette"), "{err}");
    }

    #[test]
    fn transform_parsing() {
        let args = show_args(&["--transform", "mod", "--param", "5"]);
        assert_eq!(parse_transform(&args).unwrap(), Some(Transform::Mod { modulus: 5 }));
        assert_eq!(parse_transform(&show_args(&[])).unwrap(), None);

        let args = show_args(&["--transform", "mod", "--param", "0"]);
        let err = parse_transform(&args).unwrap_err();
        assert_eq!(err.param, "modulus");

        let args = show_args(&["--transform", "mod", "--param", "5", "--param", "7"]);
        let err = parse_transform(&args).unwrap_err();
        assert_eq!(err.param, "transform");
        assert!(err.to_string().contains("MOD takes 1 value(s), 2 given"), "{err}");

        let args = show_args(&["--transform", "linear_mod10", "--param", "1"]);
        let err = parse_transform(&args).unwrap_err();
        assert_eq!((err.param.as_str(), err.kind), ("b", ParamErrorKind::Missing));
    }

    // ── Frames ───────────────────────────────────────────────────────────

    #[test]
    fn show_sequence_with_transform() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        generate_into(&config, "5");

        let args = show_args(&[
            "--view", "distribution", "--transform", "mod", "--param", "5", "--color", "none",
            "--width", "40", "--height", "12",
        ]);
        let (opts, _) = render_setup(&config, &args).unwrap();
        let store = Store::open(&config.store.dir).unwrap();
        let frame = sequence_frame(&store, &args, &opts).unwrap();
        let text = frame.to_text();
        assert!(text.starts_with(" distribution · 5 semiprimes · MOD 5"), "{text}");

        // The stored sequence is untouched.
        assert_eq!(store.load_semiprimes().unwrap(), vec![4, 6, 9, 10, 14]);
    }

    #[test]
    fn show_grid_rejects_sequence_transform() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        generate_into(&config, "5");

        let mut full = vec!["show", "grid", "--transform", "div", "--param", "2"];
        full.extend_from_slice(&["--width", "40", "--height", "12"]);
        let Command::Show {
            target: ShowTarget::Grid(args),
        } = parse(&full).command
        else {
            panic!("expected show grid");
        };
        let (opts, _) = render_setup(&config, &args).unwrap();
        let store = Store::open(&config.store.dir).unwrap();
        let err = grid_frame(&store, &args, &opts).unwrap_err();
        assert!(err.to_string().contains("DIV"), "{err}");
    }

    #[test]
    fn show_grid_caption_names_the_axes() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        generate_into(&config, "5");

        for view in ["heatmap", "contour", "surface"] {
            let full = ["show", "grid", "--view", view, "--width", "60", "--height", "12"];
            let Command::Show {
                target: ShowTarget::Grid(args),
            } = parse(&full).command
            else {
                panic!("expected show grid");
            };
            let (opts, _) = render_setup(&config, &args).unwrap();
            let store = Store::open(&config.store.dir).unwrap();
            let text = grid_frame(&store, &args, &opts).unwrap().to_text();
            let expected = format!(" {view} · kernel grid x -1..2 ↓ y -1..2 →");
            assert!(text.starts_with(&expected), "{text}");
        }
    }

    #[test]
    fn show_without_data_explains() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let args = show_args(&["--width", "40", "--height", "12"]);
        let (opts, _) = render_setup(&config, &args).unwrap();
        let store = Store::open(&config.store.dir).unwrap();
        let err = sequence_frame(&store, &args, &opts).unwrap_err();
        assert!(err.to_string().contains("chromath generate"), "{err}");
    }

    #[test]
    fn palettes_frame_lists_every_palette() {
        let frame = palettes_frame().unwrap();
        let text = frame.to_text();
        for name in builtin_names() {
            assert!(text.lines().any(|l| l.starts_with(name)), "{name}");
        }
    }
}

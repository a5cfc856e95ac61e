use anyhow::{Context, Result};
use clap::Parser;
use gesturecam::source::{ReplaySource, ReplayTiming};
use gesturecam::{GesturecamApp, GesturecamConfig};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "gesturecam")]
#[command(about = "Hand gesture recognition with debouncing and composite gestures")]
#[command(version)]
#[command(long_about = "Reads per-frame hand landmarks from a trace file or a live pipe, \
recognizes simple and composite hand gestures, and maps them to assistant actions such as \
silencing speech, hiding the interface or opening the text panel.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "gesturecam.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without starting the system")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", help = "Write logs to a file in addition to stderr")]
    log_file: Option<String>,

    /// Enable keyboard shortcuts (q/Esc to quit)
    #[arg(long, help = "Enable keyboard input - press q or Esc to quit")]
    keyboard: bool,

    /// Landmark trace to replay instead of reading stdin
    #[arg(long, value_name = "PATH", help = "Replay a JSON-lines landmark trace")]
    replay: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    // Held until exit so buffered file logs are flushed
    let log_guard = init_logging(&args)?;

    info!("Starting Gesturecam v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let config = match GesturecamConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("✗ Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    if args.validate_config {
        info!("Configuration validation successful");
        println!("✓ Configuration is valid");
        return Ok(());
    }

    let realtime = config.replay.realtime;
    let mut app = GesturecamApp::new(config);
    app.set_keyboard_enabled(args.keyboard);

    let exit_code = match &args.replay {
        Some(path) => {
            let source = ReplaySource::open(path, ReplayTiming::Recorded { realtime })
                .await
                .with_context(|| format!("Failed to open trace {}", path))?;
            app.run(source).await
        }
        None => app.run(ReplaySource::stdin()).await,
    }
    .map_err(|e| {
        error!("System error during execution: {}", e);
        e
    })?;

    info!("Gesturecam exited with code: {}", exit_code);
    drop(log_guard);
    std::process::exit(exit_code);
}

fn init_logging(args: &Args) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gesturecam={}", log_level)));

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(args.debug)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .with_writer(std::io::stderr)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_target(true)
                .with_thread_ids(args.debug)
                .with_file(args.debug)
                .with_line_number(args.debug)
                .with_writer(std::io::stderr)
                .boxed()
        }
    };

    let (file_layer, guard) = match &args.log_file {
        Some(path) => {
            let path = std::path::Path::new(path);
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .context("--log-file must name a file")?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(file_layer)
        .with(env_filter)
        .init();

    Ok(guard)
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# Gesturecam Configuration File");
    println!("# This is the default configuration with all available options");
    println!("# Environment overrides use GESTURECAM_<SECTION>__<KEY>");
    println!();

    let rendered = toml::to_string_pretty(&GesturecamConfig::default())
        .context("Failed to render default configuration")?;
    println!("{}", rendered);
    Ok(())
}

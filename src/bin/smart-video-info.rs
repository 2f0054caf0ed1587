use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use env_logger::Env;
use smart_video_info::{
    BatchEntryPolicy, Dispatcher, DispatcherConfig, ExtractionReport, FfmpegLogLevel,
    MetadataExtractor, MethodCall, MethodResponse, VideoMetadata,
};

const CLI_AFTER_HELP: &str = "Examples:\n  smart-video-info info input.mp4\n  smart-video-info info input.mp4 --json\n  smart-video-info batch a.mp4 b.mkv --json\n  echo '{\"method\":\"getInfo\",\"arguments\":{\"path\":\"a.mp4\"}}' | smart-video-info serve\n  smart-video-info completions zsh > _smart-video-info";

#[derive(Debug, Parser)]
#[command(
    name = "smart-video-info",
    version,
    about = "Read resolution, duration, codecs and stream layout from video files",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show debug logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit a failure entry for non-string batch paths instead of skipping them.
    #[arg(long, global = true)]
    placeholders: bool,

    /// Extract batch entries in parallel (requires the `rayon` feature).
    #[arg(long, global = true)]
    parallel: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print metadata for one video file.
    #[command(
        about = "Print video metadata",
        visible_alias = "probe",
        after_help = "Examples:\n  smart-video-info info input.mp4\n  smart-video-info info input.mp4 --json"
    )]
    Info {
        /// Input video path.
        input: String,

        /// Print the JSON result payload.
        #[arg(long)]
        json: bool,
    },

    /// Print metadata for several video files.
    #[command(about = "Print metadata for several files")]
    Batch {
        /// Input video paths.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Print one JSON result payload per line.
        #[arg(long)]
        json: bool,
    },

    /// Answer JSON method calls read line by line from stdin.
    #[command(
        about = "Serve method calls over stdin/stdout",
        after_help = "Each input line is {\"method\": ..., \"arguments\": {...}}.\nEach output line is {\"status\": ..., \"payload\": ...}."
    )]
    Serve,

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn apply_global_options(global: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(level) = &global.log_level {
        let parsed: FfmpegLogLevel = level.parse()?;
        smart_video_info::set_ffmpeg_log_level(parsed);
    }

    #[cfg(not(feature = "rayon"))]
    if global.parallel {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            "--parallel requires building with the `rayon` feature".yellow()
        );
    }

    Ok(())
}

fn dispatcher_config(global: &GlobalOptions) -> DispatcherConfig {
    let policy = if global.placeholders {
        BatchEntryPolicy::Placeholder
    } else {
        BatchEntryPolicy::Skip
    };
    let config = DispatcherConfig::new().with_batch_entry_policy(policy);

    #[cfg(feature = "rayon")]
    let config = config.with_parallel_batch(global.parallel);

    config
}

fn print_summary(input: &str, metadata: &VideoMetadata) {
    println!("{}", input.bold());
    println!("  Container: {}", display_or_dash(&metadata.container));
    println!("  Duration: {} ms", metadata.duration_ms);
    println!(
        "  Video: {}x{} @ {:.2} fps [{}], {} bps",
        metadata.width,
        metadata.height,
        metadata.fps,
        display_or_dash(&metadata.codec),
        metadata.bitrate,
    );
    match &metadata.audio {
        Some(audio) => println!(
            "  Audio: {} Hz, {} ch [{}]",
            audio.sample_rate,
            audio.channels,
            display_or_dash(&audio.codec),
        ),
        None => println!("  Audio: none"),
    }
    println!("  Streams: {}", metadata.stream_count);
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn print_report(
    input: &str,
    report: &ExtractionReport,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    match report {
        ExtractionReport::Success(metadata) => print_summary(input, metadata),
        ExtractionReport::Failure(message) => {
            eprintln!("{} {}: {}", "error:".red().bold(), input, message);
        }
    }
    Ok(())
}

/// Answer one request line. Lines that are not a `MethodCall` get an
/// `INVALID_ARGUMENT` error response.
fn serve_line(dispatcher: &Dispatcher, line: &str) -> MethodResponse {
    MethodResponse::from(MethodCall::from_json(line).and_then(|call| dispatcher.handle(&call)))
}

fn serve(dispatcher: &Dispatcher) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = serve_line(dispatcher, &line);
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    apply_global_options(&cli.global)?;

    match cli.command {
        Commands::Info { input, json } => {
            let report = MetadataExtractor::ffmpeg().report(&input);
            if json {
                println!("{}", report.to_json()?);
            }
            match report {
                ExtractionReport::Success(metadata) if !json => print_summary(&input, &metadata),
                ExtractionReport::Success(_) => {}
                ExtractionReport::Failure(message) => {
                    return Err(format!("{input}: {message}").into());
                }
            }
        }
        Commands::Batch { inputs, json } => {
            let dispatcher = Dispatcher::new(
                MetadataExtractor::ffmpeg(),
                dispatcher_config(&cli.global),
            );
            let reports = dispatcher.batch(&inputs);
            for (input, report) in inputs.iter().zip(&reports) {
                print_report(input, report, json)?;
            }
        }
        Commands::Serve => {
            let dispatcher = Dispatcher::new(
                MetadataExtractor::ffmpeg(),
                dispatcher_config(&cli.global),
            );
            serve(&dispatcher)?;
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(
                shell,
                &mut command,
                "smart-video-info",
                &mut io::stdout(),
            );
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

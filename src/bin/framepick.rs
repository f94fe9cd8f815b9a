use std::{env, path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use framepick::{
    FfmpegCommand, FfmpegLogLevel, ProgressCallback, ProgressInfo, SampleReport, Sampler,
    SegmentReport, Segmenter,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framepick sample --video-file recordings/\n  framepick sample --video-file clip.mp4 --output-folder stills --csv-filename stills.csv\n  framepick segment talk.mp4 --out clips --duration 30\n  framepick completions zsh > _framepick";

#[derive(Debug, Parser)]
#[command(
    name = "framepick",
    version,
    about = "Sample still frames from videos and split videos into segments",
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
    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<FfmpegLogLevel>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sample every 120th frame of a video (or of every video in a directory).
    #[command(
        about = "Sample frames into JPEG images plus a CSV manifest",
        after_help = "Examples:\n  framepick sample --video-file recordings/\n  framepick sample --video-file clip.mp4 --output-folder stills --progress"
    )]
    Sample {
        /// Path to a video file or a directory of videos.
        #[arg(long)]
        video_file: PathBuf,

        /// Output folder for images and the CSV manifest.
        ///
        /// The default name resolves to ./output in the current working
        /// directory; any other name resolves next to a file input.
        #[arg(long, default_value = framepick::DEFAULT_OUTPUT_FOLDER)]
        output_folder: String,

        /// Name of the CSV manifest file.
        #[arg(long, default_value = framepick::DEFAULT_CSV_FILENAME)]
        csv_filename: String,

        /// Print the run report as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Split a video into fixed-duration stream-copied clips.
    #[command(
        about = "Split a video into fixed-duration segments",
        after_help = "Examples:\n  framepick segment talk.mp4 --out clips --duration 30\n  framepick segment talk.mp4 --out clips --duration 30 --ffmpeg /opt/ffmpeg/bin/ffmpeg"
    )]
    Segment {
        /// Input video path.
        input: PathBuf,

        /// Output directory for the segment files.
        #[arg(long)]
        out: PathBuf,

        /// Segment length in seconds.
        #[arg(long)]
        duration: f64,

        /// Path to the ffmpeg binary (defaults to `ffmpeg` on PATH).
        #[arg(long)]
        ffmpeg: Option<PathBuf>,

        /// Print the run report as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::no_length();
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.current);
    }
}

fn init_logging(global: &GlobalOptions) {
    if env::var("RUST_LOG").is_err() {
        let default = if global.verbose {
            "warn,framepick=debug"
        } else {
            "error,framepick=info"
        };
        unsafe {
            env::set_var("RUST_LOG", default);
        }
    }
    pretty_env_logger::init();
}

fn print_sample_report(report: &SampleReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let payload = json!({
            "output_dir": report.output_dir,
            "csv_path": report.csv_path,
            "videos_processed": report.videos_processed,
            "videos_skipped": report.videos_skipped,
            "frames_sampled": report.frames_sampled,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "Sampled {} frame(s) from {} video(s) into {}",
                report.frames_sampled,
                report.videos_processed,
                report.output_dir.display(),
            )
            .green()
        );
        if report.videos_skipped > 0 {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("{} video(s) skipped", report.videos_skipped).yellow()
            );
        }
        println!("Manifest: {}", report.csv_path.display());
    }
    Ok(())
}

fn print_segment_report(
    report: &SegmentReport,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let payload = json!({
            "output_dir": report.output_dir,
            "completed": report.completed.iter().map(|segment| json!({
                "file_name": segment.file_name(),
                "start_seconds": segment.start,
                "end_seconds": segment.end,
            })).collect::<Vec<_>>(),
            "failed": report.failed.iter().map(|(segment, error)| json!({
                "file_name": segment.file_name(),
                "start_seconds": segment.start,
                "end_seconds": segment.end,
                "error": error.to_string(),
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "Cut {} segment(s) into {}",
                report.completed.len(),
                report.output_dir.display(),
            )
            .green()
        );
        for (segment, error) in &report.failed {
            eprintln!(
                "{} {}",
                "error:".red().bold(),
                format!("{} failed: {error}", segment.file_name()).red()
            );
        }
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    if let Some(level) = cli.global.log_level {
        framepick::set_ffmpeg_log_level(level);
    }

    match cli.command {
        Commands::Sample {
            video_file,
            output_folder,
            csv_filename,
            json,
        } => {
            let mut sampler = Sampler::new(&video_file)
                .output_folder(output_folder)
                .csv_filename(csv_filename);

            if cli.global.progress {
                sampler = sampler.with_progress(Arc::new(TerminalProgress::new()?));
            }

            let report = sampler.run()?;
            print_sample_report(&report, json)?;

            if report.videos_processed == 0 && report.videos_skipped == 0 {
                return Err(format!(
                    "no video files matched under {}",
                    video_file.display()
                )
                .into());
            }
        }
        Commands::Segment {
            input,
            out,
            duration,
            ffmpeg,
            json,
        } => {
            let transcoder = match ffmpeg {
                Some(binary) => FfmpegCommand::with_binary(binary),
                None => FfmpegCommand::new(),
            };

            let mut segmenter = Segmenter::new(&input, &out, duration)?;
            if cli.global.progress {
                segmenter = segmenter.with_progress(Arc::new(TerminalProgress::new()?));
            }

            let report = segmenter.run(&transcoder)?;
            print_segment_report(&report, json)?;

            if !report.is_complete() {
                return Err(format!("{} segment(s) failed", report.failed.len()).into());
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "framepick", &mut std::io::stdout());
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

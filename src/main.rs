use clap::{Parser, Subcommand};
use simple_split::decode::{UploadFile, decode_upload};
use simple_split::export::{DirectoryHost, Exporter, PacedQueue};
use simple_split::imaging::{RustBackend, plan_split};
use simple_split::session::Session;
use simple_split::{config, media, output, runtime};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "simple-split")]
#[command(about = "Split a tall image into four equal horizontal strips")]
#[command(long_about = "\
Split a tall image into four equal horizontal strips

The image is cut top to bottom into four strips of equal height, each as
wide as the source. Strips are re-encoded in the source's format (JPEG, PNG
or WebP; anything else becomes PNG) and exported as split-1 … split-4.

  tall.jpg (1200x1600)  →  split-1.jpg  rows    0..400
                           split-2.jpg  rows  400..800
                           split-3.jpg  rows  800..1200
                           split-4.jpg  rows 1200..1600

With --share, each strip goes to the share command from the config and falls
back to a plain save when no share command is configured or sharing fails.

Run 'simple-split gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (TOML); stock defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress (info level) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags for commands that read an image.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Image file to split
    file: PathBuf,

    /// Declared media type, overriding the one guessed from the extension
    #[arg(long)]
    media_type: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Split an image and export the four strips
    Split {
        #[command(flatten)]
        input: InputArgs,

        /// Directory the strips are saved into
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Share each strip instead of saving it
        #[arg(long)]
        share: bool,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show how an image would be split without writing anything
    Inspect(InputArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    runtime::block_on_detached(run(cli))?
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Split {
            input,
            out,
            share,
            json,
        } => {
            let config = config::load_config(cli.config.as_deref())?;
            init_thread_pool(&config.processing);

            let mut session = Session::new(Arc::new(RustBackend::new()), config.split_settings());
            session.upload(read_upload(&input)?).await?;

            let mut host = DirectoryHost::new(out);
            if let Some(command) = config.share.command.clone() {
                host = host.with_share_command(command);
            }
            let exporter = Exporter::with_queue(host, PacedQueue::new(config.pacing_delay()));

            let artifacts = session.artifacts();
            let outcomes = if share {
                exporter.share_all(artifacts).await?
            } else {
                exporter.save_all(artifacts).await?
            };

            let state = session.state();
            if let (Some(upload), Some(set)) = (state.current_upload(), state.artifact_set()) {
                if json {
                    output::print_split_json(upload, set, &outcomes)?;
                } else {
                    output::print_split_output(upload, set, &outcomes, exporter.host().out_dir());
                }
            }
        }
        Command::Inspect(input) => {
            let config = config::load_config(cli.config.as_deref())?;
            let settings = config.split_settings();

            let decoded = decode_upload(
                Arc::new(RustBackend::new()),
                read_upload(&input)?,
                settings.decode_timeout,
            )
            .await?;
            let encoding = media::encoding_for(&decoded.upload.media_type, settings.jpeg_quality);
            let plan = plan_split(decoded.bitmap.dimensions(), encoding);
            output::print_plan(&decoded.upload, &plan);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read the input file, applying a `--media-type` override.
fn read_upload(input: &InputArgs) -> std::io::Result<UploadFile> {
    let mut file = UploadFile::from_path(&input.file)?;
    if let Some(media_type) = &input.media_type {
        file.media_type = media_type.clone();
    }
    if file.media_type.is_empty() {
        log::debug!("no media type known for {}", input.file.display());
    }
    Ok(file)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

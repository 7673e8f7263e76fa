use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podpage::{
    DEFAULT_FEED_URL, NoopReporter, PipelineOptions, ProgressEvent, ProgressReporter,
    ReqwestClient, SharedProgressReporter, build_page,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static SPARKLES: Emoji<'_, '_> = Emoji("✨ ", "[*] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");

/// Render a static HTML episode page from a podcast feed
#[derive(Parser, Debug)]
#[command(name = "podpage")]
#[command(about = "Render a static HTML episode page from a podcast feed")]
#[command(version)]
struct Args {
    /// Feed URL; used as base for relative links when --feed-file is given
    #[arg(short = 'u', long, default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Read the feed from a local file instead of fetching it
    #[arg(short = 'f', long)]
    feed_file: Option<PathBuf>,

    /// Directory containing the page templates
    #[arg(long, default_value = "templates")]
    template_dir: PathBuf,

    /// Template to render, relative to the template directory
    #[arg(short, long, default_value = "page.html")]
    template: String,

    /// Path of the generated HTML page
    #[arg(short, long, default_value = "output/episodes.html")]
    output: PathBuf,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Progress reporter using an indicatif spinner for terminal output
struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { bar }
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingFeed { url } => {
                self.bar
                    .set_message(format!("{SEARCH}Fetching feed: {}", url.cyan()));
            }

            ProgressEvent::ReadingFeedFile { path } => {
                self.bar.set_message(format!(
                    "{FOLDER}Reading feed file: {}",
                    path.display().to_string().cyan()
                ));
            }

            ProgressEvent::FeedParsed { episode_count } => {
                self.bar.set_message(format!(
                    "{HEADPHONES}Feed parsed • {} episodes",
                    episode_count.to_string().cyan()
                ));
            }

            ProgressEvent::EpisodesNormalized { episode_count } => {
                self.bar.set_message(format!(
                    "{SPARKLES}Prepared {} episodes",
                    episode_count.to_string().cyan()
                ));
            }

            ProgressEvent::RenderingPage { template } => {
                self.bar
                    .set_message(format!("{SPARKLES}Rendering {}", template.yellow()));
            }

            ProgressEvent::PageWritten { path, bytes } => {
                self.bar.finish_and_clear();
                println!(
                    "{SUCCESS}{} {} ({} bytes)",
                    "Page written:".bold().green(),
                    path.display().to_string().cyan(),
                    bytes.to_string().dimmed()
                );
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podpage".bold().magenta(),
            "- Podcast Episode Page".dimmed()
        );
    }

    let client = ReqwestClient::new().context("Failed to create HTTP client")?;

    let options = PipelineOptions {
        feed_url: args.feed_url,
        feed_file: args.feed_file,
        template_dir: args.template_dir,
        template_file: args.template,
        output_file: args.output,
    };

    let reporter: SharedProgressReporter = if args.quiet {
        NoopReporter::shared()
    } else {
        Arc::new(SpinnerReporter::new())
    };

    let result = build_page(&client, &options, reporter)
        .await
        .context("Failed to build episode page")?;

    if !args.quiet {
        println!(
            "\n{}{} episodes on the page\n",
            HEADPHONES,
            result.episode_count.to_string().green().bold()
        );
    }

    Ok(())
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use crate::episode::normalize_episodes;
use crate::error::PipelineError;
use crate::feed::acquire_episodes;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::render::render_page;

/// Feed rendered when no other URL is configured
pub const DEFAULT_FEED_URL: &str = "https://feeds.transistor.fm/lrb";

/// Options for building the episode page
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Feed URL; also the base for relative links when reading a local file
    pub feed_url: String,
    /// Read the feed from this file instead of fetching it
    pub feed_file: Option<PathBuf>,
    /// Directory containing the page templates
    pub template_dir: PathBuf,
    /// Template to render, relative to `template_dir`
    pub template_file: String,
    /// Path of the generated HTML page
    pub output_file: PathBuf,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_file: None,
            template_dir: PathBuf::from("templates"),
            template_file: "page.html".to_string(),
            output_file: PathBuf::from("output/episodes.html"),
        }
    }
}

/// Result of a page build
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Number of episodes on the page
    pub episode_count: usize,
    /// Size of the written page in bytes
    pub bytes_written: usize,
}

/// Build the episode page
///
/// This is the main entry point for the library. It:
/// 1. Acquires the feed episodes, oldest first
/// 2. Normalizes them into their display form
/// 3. Renders the template and writes the page
///
/// Any failure aborts the build; the output file is only replaced once the
/// complete page has been rendered.
pub async fn build_page<C: HttpClient>(
    client: &C,
    options: &PipelineOptions,
    reporter: SharedProgressReporter,
) -> Result<PipelineResult, PipelineError> {
    match &options.feed_file {
        Some(path) => reporter.report(ProgressEvent::ReadingFeedFile { path: path.clone() }),
        None => reporter.report(ProgressEvent::FetchingFeed {
            url: options.feed_url.clone(),
        }),
    }

    let raw_episodes =
        acquire_episodes(client, &options.feed_url, options.feed_file.as_deref()).await?;

    reporter.report(ProgressEvent::FeedParsed {
        episode_count: raw_episodes.len(),
    });

    let episodes = normalize_episodes(&raw_episodes)?;

    reporter.report(ProgressEvent::EpisodesNormalized {
        episode_count: episodes.len(),
    });

    reporter.report(ProgressEvent::RenderingPage {
        template: options.template_file.clone(),
    });

    let bytes_written = render_page(
        &episodes,
        &options.template_dir,
        &options.template_file,
        &options.output_file,
    )?;

    reporter.report(ProgressEvent::PageWritten {
        path: options.output_file.clone(),
        bytes: bytes_written,
    });

    Ok(PipelineResult {
        episode_count: episodes.len(),
        bytes_written,
    })
}

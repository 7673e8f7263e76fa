// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while obtaining feed bytes
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch feed from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Stream error while reading feed from {url}: {source}")]
    StreamFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read feed file {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors caused by malformed feed content
#[derive(Error, Debug)]
pub enum FeedFormatError {
    #[error("Failed to parse RSS feed: {0}")]
    ParseFailed(#[from] rss::Error),
}

/// Errors that can occur when acquiring episodes from a feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Format(#[from] FeedFormatError),
}

/// Errors that can occur when formatting a duration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("Invalid duration unit '{0}'")]
    InvalidUnit(String),

    #[error("Invalid duration template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Unknown field '{field}' in duration template '{template}'")]
    UnknownField { template: String, field: String },

    #[error("Duration of {value} {unit} does not fit in seconds")]
    Overflow { value: u64, unit: String },
}

/// Errors that can occur while turning raw episodes into render-ready ones
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Episode '{title}' ({guid}) has no enclosure (audio file)")]
    MissingEnclosure { guid: String, title: String },

    #[error("Episode {guid} has an out-of-range publication timestamp {timestamp}")]
    InvalidTimestamp { guid: String, timestamp: i64 },

    #[error("Failed to format episode duration: {0}")]
    Duration(#[from] DurationError),
}

/// Errors that can occur while rendering and writing the page
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load template {path}: {source}")]
    TemplateLoadFailed {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to render template {template}: {source}")]
    RenderFailed {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write page {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level errors for a page build
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

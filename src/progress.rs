use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted while building the episode page
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Feed is being fetched from URL
    FetchingFeed { url: String },

    /// Feed is being read from a local file instead of the network
    ReadingFeedFile { path: PathBuf },

    /// Feed has been parsed successfully
    FeedParsed { episode_count: usize },

    /// Episodes have been turned into their display form
    EpisodesNormalized { episode_count: usize },

    /// The page template is being rendered
    RenderingPage { template: String },

    /// The page has been written
    PageWritten { path: PathBuf, bytes: usize },
}

/// Trait for reporting progress events during a page build.
///
/// Implementations can use this to display a spinner, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_reporter_handles_all_events() {
        let reporter = NoopReporter::shared();

        reporter.report(ProgressEvent::FetchingFeed {
            url: "https://example.com/feed.xml".to_string(),
        });
        reporter.report(ProgressEvent::ReadingFeedFile {
            path: PathBuf::from("feeds/feed.xml"),
        });
        reporter.report(ProgressEvent::FeedParsed { episode_count: 2 });
        reporter.report(ProgressEvent::EpisodesNormalized { episode_count: 2 });
        reporter.report(ProgressEvent::RenderingPage {
            template: "page.html".to_string(),
        });
        reporter.report(ProgressEvent::PageWritten {
            path: PathBuf::from("output/episodes.html"),
            bytes: 1024,
        });
    }
}

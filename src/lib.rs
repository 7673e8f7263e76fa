pub mod episode;
pub mod error;
pub mod feed;
pub mod http;
pub mod pipeline;
pub mod progress;
pub mod render;

// Re-export main types for convenience
pub use episode::{
    DurationUnit, RenderedEpisode, format_duration, normalize_episodes, normalize_text,
};
pub use error::{
    AcquisitionError, DurationError, FeedError, FeedFormatError, NormalizeError, PipelineError,
    RenderError,
};
pub use feed::{RawEnclosure, RawEpisode, acquire_episodes};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use pipeline::{DEFAULT_FEED_URL, PipelineOptions, PipelineResult, build_page};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use render::render_page;

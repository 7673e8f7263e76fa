mod duration;
mod normalize;
mod text;

pub use duration::{
    DEFAULT_TEMPLATE, DurationTemplate, DurationUnit, EPISODE_TEMPLATE, Field, FieldSpec, Segment,
    format_duration, format_time_delta,
};
pub use normalize::{
    PUBLISHED_DATE_FORMAT, RenderedEpisode, normalize_episodes, sanitize_description,
};
pub use text::{nfkc, normalize_text};

mod fetch;
mod parse;

pub use fetch::{acquire_episodes, fetch_feed_bytes, file_path_to_url, read_feed_file};
pub use parse::{RawEnclosure, RawEpisode, parse_feed, parse_itunes_duration};

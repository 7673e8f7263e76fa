// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::DateTime;
use serde::Serialize;

use crate::error::NormalizeError;
use crate::feed::RawEpisode;

use super::duration::{EPISODE_TEMPLATE, format_duration};
use super::text::{nfkc, normalize_text};

/// Display format for publication dates, always in UTC
pub const PUBLISHED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// An episode with every field in its final display form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEpisode {
    /// Feed identifier, unchanged
    pub guid: String,
    pub title: String,
    pub published_date: String,
    pub total_time: String,
    /// Sanitized description HTML
    pub description: String,
    /// Description HTML exactly as it appeared in the feed
    pub raw_description: String,
    pub enclosure_url: String,
}

impl RenderedEpisode {
    /// Build the render-ready form of a single raw episode
    pub fn from_raw(episode: &RawEpisode) -> Result<Self, NormalizeError> {
        let enclosure = episode
            .enclosures
            .first()
            .ok_or_else(|| NormalizeError::MissingEnclosure {
                guid: episode.guid.clone(),
                title: episode.title.clone(),
            })?;

        let published = DateTime::from_timestamp(episode.published, 0).ok_or_else(|| {
            NormalizeError::InvalidTimestamp {
                guid: episode.guid.clone(),
                timestamp: episode.published,
            }
        })?;

        let total_time = format_duration(
            episode.total_time.unwrap_or(0),
            EPISODE_TEMPLATE,
            "duration",
        )?;

        Ok(Self {
            guid: episode.guid.clone(),
            title: normalize_text(&episode.title),
            published_date: published.format(PUBLISHED_DATE_FORMAT).to_string(),
            total_time,
            description: sanitize_description(&episode.description_html),
            raw_description: episode.description_html.clone(),
            enclosure_url: enclosure.url.trim().to_string(),
        })
    }
}

/// Quote replacement, then `\+` unescaping, then NFKC
pub fn sanitize_description(html: &str) -> String {
    let text = normalize_text(html).replace(r"\+", "+");
    nfkc(&text)
}

/// Turn raw episodes into render-ready episodes, keeping their order
///
/// Stops at the first episode that cannot be normalized.
pub fn normalize_episodes(episodes: &[RawEpisode]) -> Result<Vec<RenderedEpisode>, NormalizeError> {
    episodes.iter().map(RenderedEpisode::from_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::RawEnclosure;

    fn make_episode(guid: &str, title: &str) -> RawEpisode {
        RawEpisode {
            guid: guid.to_string(),
            title: title.to_string(),
            description_html: "<p>Episode notes</p>".to_string(),
            enclosures: vec![RawEnclosure {
                url: "https://example.com/episode.mp3".to_string(),
            }],
            published: 1_704_110_400,
            total_time: Some(3725),
        }
    }

    #[test]
    fn from_raw_converts_all_fields() {
        let mut raw = make_episode("ep-1", "It\u{2019}s \u{201C}live\u{201D}");
        raw.enclosures[0].url = "  https://example.com/ep1.mp3\n".to_string();

        let episode = RenderedEpisode::from_raw(&raw).unwrap();

        assert_eq!(episode.guid, "ep-1");
        assert_eq!(episode.title, "It's \"live\"");
        assert_eq!(episode.published_date, "2024-01-01 12:00:00 UTC");
        assert_eq!(episode.total_time, " 1:02:05");
        assert_eq!(episode.description, "<p>Episode notes</p>");
        assert_eq!(episode.raw_description, "<p>Episode notes</p>");
        assert_eq!(episode.enclosure_url, "https://example.com/ep1.mp3");
    }

    #[test]
    fn missing_total_time_defaults_to_zero() {
        let mut raw = make_episode("ep-1", "Untimed");
        raw.total_time = None;

        let episode = RenderedEpisode::from_raw(&raw).unwrap();
        assert_eq!(episode.total_time, " 0:00:00");
    }

    #[test]
    fn description_is_sanitized_but_raw_is_kept() {
        let mut raw = make_episode("ep-1", "Notes");
        raw.description_html = "C\\+\\+ \u{201C}\u{FB01}x\u{201D} it\u{2019}s".to_string();

        let episode = RenderedEpisode::from_raw(&raw).unwrap();

        assert_eq!(episode.description, "C++ \"fix\" it's");
        assert_eq!(episode.raw_description, raw.description_html);
    }

    #[test]
    fn description_unescapes_plus_before_nfkc() {
        // Fullwidth plus only becomes '+' after the unescape step has run
        assert_eq!(sanitize_description("C\\\u{FF0B}"), "C\\+");
        assert_eq!(sanitize_description("C\\+ \u{FF0B}"), "C+ +");
    }

    #[test]
    fn title_is_not_nfkc_normalized() {
        let raw = make_episode("ep-1", "\u{FB01}sh");
        let episode = RenderedEpisode::from_raw(&raw).unwrap();
        assert_eq!(episode.title, "\u{FB01}sh");
    }

    #[test]
    fn unknown_publication_date_renders_epoch() {
        let mut raw = make_episode("ep-1", "Old");
        raw.published = 0;

        let episode = RenderedEpisode::from_raw(&raw).unwrap();
        assert_eq!(episode.published_date, "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let mut raw = make_episode("ep-1", "Far future");
        raw.published = i64::MAX;

        assert!(matches!(
            RenderedEpisode::from_raw(&raw),
            Err(NormalizeError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn missing_enclosure_is_rejected() {
        let mut raw = make_episode("ep-1", "No audio");
        raw.enclosures.clear();

        match RenderedEpisode::from_raw(&raw).unwrap_err() {
            NormalizeError::MissingEnclosure { guid, title } => {
                assert_eq!(guid, "ep-1");
                assert_eq!(title, "No audio");
            }
            other => panic!("Expected MissingEnclosure error, got {other:?}"),
        }
    }

    #[test]
    fn first_enclosure_wins() {
        let mut raw = make_episode("ep-1", "Two files");
        raw.enclosures.push(RawEnclosure {
            url: "https://example.com/other.mp3".to_string(),
        });

        let episode = RenderedEpisode::from_raw(&raw).unwrap();
        assert_eq!(episode.enclosure_url, "https://example.com/episode.mp3");
    }

    #[test]
    fn normalize_episodes_preserves_length_and_order() {
        let raw: Vec<RawEpisode> = (0..5)
            .map(|i| make_episode(&format!("ep-{i}"), &format!("Episode {i}")))
            .collect();

        let episodes = normalize_episodes(&raw).unwrap();

        assert_eq!(episodes.len(), raw.len());
        for (rendered, raw) in episodes.iter().zip(&raw) {
            assert_eq!(rendered.guid, raw.guid);
            assert_eq!(rendered.title, raw.title);
        }
    }

    #[test]
    fn normalize_episodes_accepts_empty_input() {
        assert!(normalize_episodes(&[]).unwrap().is_empty());
    }

    #[test]
    fn normalize_episodes_stops_at_first_malformed_episode() {
        let mut broken = make_episode("ep-2", "Broken");
        broken.enclosures.clear();
        let raw = vec![make_episode("ep-1", "Fine"), broken, make_episode("ep-3", "Fine")];

        let result = normalize_episodes(&raw);

        assert!(matches!(
            result,
            Err(NormalizeError::MissingEnclosure { ref guid, .. }) if guid == "ep-2"
        ));
    }
}

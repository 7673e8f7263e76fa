// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset};
use url::Url;

use crate::error::FeedFormatError;

/// A feed item as delivered by the feed parser, before any display formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEpisode {
    pub guid: String,
    pub title: String,
    pub description_html: String,
    pub enclosures: Vec<RawEnclosure>,
    /// Publication instant in seconds since the Unix epoch (0 when unknown)
    pub published: i64,
    /// Total running time in seconds, if the feed states one
    pub total_time: Option<u64>,
}

/// A media file attached to a feed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEnclosure {
    pub url: String,
}

/// Parse RSS feed XML bytes into raw episodes, in feed order
///
/// `feed_url` is only used to resolve relative enclosure links; without it
/// they are kept as written.
pub fn parse_feed(
    xml_bytes: &[u8],
    feed_url: Option<&Url>,
) -> Result<Vec<RawEpisode>, FeedFormatError> {
    let channel = rss::Channel::read_from(xml_bytes)?;

    Ok(channel
        .items()
        .iter()
        .map(|item| parse_episode(item, feed_url))
        .collect())
}

fn parse_episode(item: &rss::Item, feed_url: Option<&Url>) -> RawEpisode {
    let enclosures: Vec<RawEnclosure> = item
        .enclosure()
        .map(|enclosure| RawEnclosure {
            url: resolve_url(enclosure.url(), feed_url),
        })
        .into_iter()
        .collect();

    let guid = item
        .guid()
        .map(|g| g.value().to_string())
        .filter(|g| !g.is_empty())
        .or_else(|| enclosures.first().map(|e| e.url.clone()))
        .or_else(|| item.link().map(String::from))
        .unwrap_or_default();

    let description_html = item
        .content()
        .or_else(|| item.description())
        .unwrap_or_default()
        .to_string();

    let published = item
        .pub_date()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(date_str.trim())
                .or_else(|_| parse_relaxed_date(date_str.trim()))
                .ok()
        })
        .map(|dt| dt.timestamp())
        .unwrap_or(0);

    let total_time = item
        .itunes_ext()
        .and_then(|ext| ext.duration())
        .and_then(parse_itunes_duration);

    RawEpisode {
        guid,
        title: item.title().unwrap_or_default().to_string(),
        description_html,
        enclosures,
        published,
        total_time,
    }
}

/// Resolve a possibly relative link against the feed URL, keeping absolute
/// links untouched
fn resolve_url(raw: &str, feed_url: Option<&Url>) -> String {
    if Url::parse(raw.trim()).is_ok() {
        return raw.to_string();
    }

    feed_url
        .and_then(|base| base.join(raw.trim()).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Try to parse dates that don't strictly conform to RFC 2822
fn parse_relaxed_date(date_str: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let formats = [
        "%a, %d %b %Y %H:%M:%S %z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S %z",
    ];

    for format in formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Ok(dt);
        }
    }

    DateTime::parse_from_rfc3339(date_str)
}

/// Parse an `itunes:duration` value (`SS`, `MM:SS` or `HH:MM:SS`) into seconds
pub fn parse_itunes_duration(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut seconds: u64 = 0;
    for part in parts {
        let number: u64 = part.trim().parse().ok()?;
        seconds = seconds.checked_mul(60)?.checked_add(number)?;
    }

    Some(seconds)
}

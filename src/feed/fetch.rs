// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use url::Url;

use crate::error::{AcquisitionError, FeedError};
use crate::http::HttpClient;

use super::parse::{RawEpisode, parse_feed};

// Upper bound for trusting Content-Length when reserving the feed buffer
const MAX_PREALLOCATION: u64 = 8 * 1024 * 1024;

/// Fetch raw feed bytes from a URL by streaming the response body
pub async fn fetch_feed_bytes<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Bytes, AcquisitionError> {
    let response = client
        .get_stream(url)
        .await
        .map_err(|e| AcquisitionError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !(200..300).contains(&response.status) {
        return Err(AcquisitionError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    let capacity = response.content_length.unwrap_or(0).min(MAX_PREALLOCATION);
    let mut buffer = BytesMut::with_capacity(capacity as usize);
    let mut stream = response.body;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| AcquisitionError::StreamFailed {
            url: url.to_string(),
            source: e,
        })?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}

/// Read raw feed bytes from a local file
pub fn read_feed_file(path: &Path) -> Result<Vec<u8>, AcquisitionError> {
    std::fs::read(path).map_err(|e| AcquisitionError::FileReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Construct a file:// URL for a local file path
pub fn file_path_to_url(path: &Path) -> Option<Url> {
    std::path::absolute(path)
        .ok()
        .and_then(|absolute| Url::from_file_path(absolute).ok())
}

/// Obtain the episodes of a feed, oldest first
///
/// With a `local_override` the feed is read from that file and `feed_url` only
/// serves as the base for relative links; when it is not a URL the file's own
/// location is used instead. Otherwise `feed_url` is fetched.
pub async fn acquire_episodes<C: HttpClient>(
    client: &C,
    feed_url: &str,
    local_override: Option<&Path>,
) -> Result<Vec<RawEpisode>, FeedError> {
    let mut episodes = match local_override {
        Some(path) => {
            let base_url = Url::parse(feed_url)
                .ok()
                .or_else(|| file_path_to_url(path));
            let bytes = read_feed_file(path)?;
            parse_feed(&bytes, base_url.as_ref())?
        }
        None => {
            let base_url = Url::parse(feed_url).map_err(AcquisitionError::from)?;
            let bytes = fetch_feed_bytes(client, feed_url).await?;
            parse_feed(&bytes, Some(&base_url))?
        }
    };

    // Feeds list newest first
    episodes.reverse();
    Ok(episodes)
}

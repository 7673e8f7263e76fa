// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tera::{Context, Tera};

use crate::episode::{PUBLISHED_DATE_FORMAT, RenderedEpisode};
use crate::error::RenderError;

use super::markdown::{MARKDOWN_FILTER, MarkdownFilter};

/// Name of the template function returning the generation timestamp
pub const TIMESTAMP_FUNCTION: &str = "generate_date_time_stamp";

/// Format a generation timestamp the same way publication dates are shown
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format(PUBLISHED_DATE_FORMAT).to_string()
}

/// Load all templates below `template_dir` and register the page helpers
///
/// The timestamp function always returns `generated_at`, so every call in a
/// template yields the same value.
pub fn load_templates(template_dir: &Path, generated_at: String) -> Result<Tera, RenderError> {
    let glob = template_dir.join("**").join("*");

    let mut tera =
        Tera::new(&glob.to_string_lossy()).map_err(|e| RenderError::TemplateLoadFailed {
            path: template_dir.to_path_buf(),
            source: e,
        })?;

    tera.register_filter(MARKDOWN_FILTER, MarkdownFilter);
    tera.register_function(
        TIMESTAMP_FUNCTION,
        move |_args: &HashMap<String, Value>| -> tera::Result<Value> {
            Ok(Value::String(generated_at.clone()))
        },
    );

    Ok(tera)
}

/// Render the episode list with the named template
pub fn render_to_string(
    tera: &Tera,
    template_file: &str,
    episodes: &[RenderedEpisode],
) -> Result<String, RenderError> {
    let mut context = Context::new();
    context.insert("episodes", episodes);

    tera.render(template_file, &context)
        .map_err(|e| RenderError::RenderFailed {
            template: template_file.to_string(),
            source: e,
        })
}

/// Write the page so readers never observe a partially written file
///
/// Contents go to `<output>.partial` first and are then renamed over the
/// output path. Missing parent directories are created.
pub fn write_page(output_path: &Path, contents: &str) -> Result<(), RenderError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RenderError::CreateDirectoryFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let partial_path = partial_path(output_path);

    std::fs::write(&partial_path, contents).map_err(|e| RenderError::WriteFailed {
        path: partial_path.clone(),
        source: e,
    })?;

    if let Err(e) = std::fs::rename(&partial_path, output_path) {
        let _ = std::fs::remove_file(&partial_path);
        return Err(RenderError::WriteFailed {
            path: output_path.to_path_buf(),
            source: e,
        });
    }

    Ok(())
}

fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = OsString::from(output_path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

/// Render the episode page and write it to `output_path`
///
/// Returns the number of bytes written.
pub fn render_page(
    episodes: &[RenderedEpisode],
    template_dir: &Path,
    template_file: &str,
    output_path: &Path,
) -> Result<usize, RenderError> {
    let tera = load_templates(template_dir, format_timestamp(Utc::now()))?;
    let page = render_to_string(&tera, template_file, episodes)?;
    write_page(output_path, &page)?;
    Ok(page.len())
}

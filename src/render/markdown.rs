// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use pulldown_cmark::{Options, Parser, html};
use serde_json::Value;

/// Name under which the filter is registered in templates
pub const MARKDOWN_FILTER: &str = "parse_markdown";

/// Convert Markdown text to HTML
///
/// Inline HTML is passed through, so already-HTML descriptions survive.
pub fn markdown_to_html(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::empty());
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut out, parser);
    out
}

/// Template filter rendering its input as Markdown
///
/// Its output is trusted markup and is not auto-escaped again.
pub struct MarkdownFilter;

impl tera::Filter for MarkdownFilter {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let text = tera::try_get_value!(MARKDOWN_FILTER, "value", String, value);
        Ok(Value::String(markdown_to_html(&text)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

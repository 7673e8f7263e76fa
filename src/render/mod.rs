mod markdown;
mod page;

pub use markdown::{MARKDOWN_FILTER, MarkdownFilter, markdown_to_html};
pub use page::{
    TIMESTAMP_FUNCTION, format_timestamp, load_templates, render_page, render_to_string,
    write_page,
};

mod html;
mod line_index;

pub use html::{tokenize_html, HtmlEvent, HtmlToken};
pub use line_index::LineIndex;

//! Page composition for the preview pane and the export command.
//!
//! Both documents splice the three editor buffers verbatim into a fixed HTML
//! skeleton. No escaping is performed: the buffers *are* the page.

use tracing::debug;

/// Default file name offered for an exported page.
pub const EXPORT_FILE_NAME: &str = "webpage.html";

pub const EXPORT_TITLE: &str = "Exported Page";

/// Editor contents feeding a composed page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sources<'a> {
    pub markup: &'a str,
    pub style: &'a str,
    pub script: &'a str,
}

impl<'a> Sources<'a> {
    pub fn new(markup: &'a str, style: &'a str, script: &'a str) -> Self {
        Self {
            markup,
            style,
            script,
        }
    }

    pub fn is_blank(&self) -> bool {
        [self.markup, self.style, self.script]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

/// Preview document: style in head, markup then script in body.
pub fn compose_preview(src: Sources<'_>) -> String {
    let mut doc = String::with_capacity(src.markup.len() + src.style.len() + src.script.len() + 96);
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<style>");
    doc.push_str(src.style);
    doc.push_str("</style>\n</head>\n<body>");
    doc.push_str(src.markup);
    doc.push_str("\n<script>");
    doc.push_str(src.script);
    doc.push_str("</script>\n</body>\n</html>\n");
    debug!(target: "preview", bytes = doc.len(), "preview_composed");
    doc
}

/// Standalone page written out by export; adds a title and puts each buffer on its own lines.
pub fn compose_export(src: Sources<'_>) -> String {
    let doc = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <title>{EXPORT_TITLE}</title>\n    <style>\n{style}\n    </style>\n</head>\n<body>\n{markup}\n    <script>\n{script}\n    </script>\n</body>\n</html>",
        style = src.style,
        markup = src.markup,
        script = src.script,
    );
    debug!(target: "preview", bytes = doc.len(), "export_composed");
    doc
}

/// Gutter labels for a buffer with `line_count` lines. An empty buffer still shows line 1.
pub fn line_numbers(line_count: usize) -> impl Iterator<Item = usize> {
    1..=line_count.max(1)
}

/// Width in columns the gutter needs for `line_count` lines.
pub fn gutter_width(line_count: usize) -> usize {
    let mut n = line_count.max(1);
    let mut digits = 0;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits
}

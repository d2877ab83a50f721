//! Turns uploaded or pasted template sources into plain text.
//!
//! Plain text passes through unchanged. HTML is flattened: `script`/`style`
//! blocks are dropped, block-level closing tags become line breaks, the
//! remaining tags are stripped and the common entities are decoded.
//! Placeholders survive untouched because `{{` and `}}` are not markup.

use common::requests::SourceFormat;
use regex::Regex;
use std::sync::LazyLock;

static HIDDEN_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap()
});
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|tr|h[1-6]|table|ul|ol)\s*>").unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Returns the plain text of `source`.
pub fn to_plain_text(source: &str, format: SourceFormat) -> String {
    match format {
        SourceFormat::Text => source.to_string(),
        SourceFormat::Html => html_to_text(source),
    }
}

fn html_to_text(html: &str) -> String {
    let text = HIDDEN_BLOCK_RE.replace_all(html, "");
    let text = LINE_BREAK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");

    let mut text = text.into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }

    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    BLANK_LINES_RE
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

/// Hex MD5 of the template text.
pub fn template_md5(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        let text = "Hola {{name}}\n<not html>";
        assert_eq!(to_plain_text(text, SourceFormat::Text), text);
    }

    #[test]
    fn html_is_flattened_and_placeholders_survive() {
        let html = "<html><head><style>p { color: red; }</style></head><body>\
            <p>Dear {{customer_name}},</p><p>Total: {{grand_total}} &amp; more</p>\
            <ul>{{#each items}}<li>{{description}}</li>{{/each}}</ul>\
            <script>alert('x')</script></body></html>";

        let text = to_plain_text(html, SourceFormat::Html);

        assert_eq!(
            text,
            "Dear {{customer_name}},\nTotal: {{grand_total}} & more\n{{#each items}}{{description}}\n{{/each}}"
        );
    }

    #[test]
    fn br_tags_become_line_breaks() {
        assert_eq!(html_to_text("a<br>b<BR/>c"), "a\nb\nc");
    }

    #[test]
    fn md5_is_hex() {
        assert_eq!(template_md5(""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}

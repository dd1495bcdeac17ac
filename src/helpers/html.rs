use regex::Regex;
use std::sync::OnceLock;

fn block_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>|</li\s*>|</h[1-6]\s*>").expect("valid regex"))
}

fn any_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

fn blank_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"))
}

/// Reduce an HTML episode description to plain text for the terminal.
pub fn html_to_text(html: &str) -> String {
    let text = block_break().replace_all(html, "\n");
    let text = any_tag().replace_all(&text, "");
    let text = decode_entities(&text);

    let text = text
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    blank_runs().replace_all(text.trim(), "\n\n").into_owned()
}

fn decode_entities(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let html = "<p>Nesse episódio falamos sobre <strong>Rust</strong>.</p><p>Links:</p>";
        assert_eq!(html_to_text(html), "Nesse episódio falamos sobre Rust.\nLinks:");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(html_to_text("Tom &amp; Jerry &lt;3"), "Tom & Jerry <3");
        assert_eq!(html_to_text("&amp;lt;"), "&lt;");
    }

    #[test]
    fn blank_runs_collapse() {
        let html = "<p>a</p><br><br><br><br><p>b</p>";
        assert_eq!(html_to_text(html), "a\n\nb");
    }
}

//! Cleanup of raw model output before it is parsed.

const FENCE: &str = "```";

/// Strip markdown code fences wrapped around a model response.
///
/// An opening fence line (```` ``` ```` or ```` ```json ````) and a trailing
/// fence are removed and surrounding whitespace trimmed, repeatedly, until
/// nothing more can be stripped. The result is therefore stable under a
/// second application. Nothing else about the text is repaired.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    loop {
        let stripped = strip_once(text);
        if stripped.len() == text.len() {
            return text;
        }
        text = stripped;
    }
}

fn strip_once(text: &str) -> &str {
    let mut text = text;
    if text.starts_with(FENCE) {
        text = text.split_once('\n').map_or("", |(_, rest)| rest);
    }
    if let Some(body) = text.strip_suffix(FENCE) {
        text = body;
    }
    text.trim()
}

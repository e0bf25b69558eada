//! Fenced-block extraction from issue/comment text.
//!
//! Issue and comment bodies are human-authored and noisy; they may contain
//! any number of unrelated fenced blocks (examples, logs). Extraction is
//! deterministic about which block it picks: the first opener for the
//! requested fence name wins, and the first closer after it ends the block.
//!
//! The scan is an explicit two-phase line walk rather than a single regex,
//! which pins down non-greedy first-match semantics and CRLF tolerance.

/// Return the inner content of the first `` ```<fence> `` block in `text`.
///
/// The fence token is matched case-insensitively and must occupy its own
/// line. Trailing carriage returns are stripped per line, so CRLF- and
/// LF-authored documents extract identically. A fence with no matching
/// closer is treated as "no match" — content is never returned truncated.
///
/// Returns `None` when no such block exists; this is not an error.
pub fn extract_block(text: &str, fence: &str) -> Option<String> {
    let mut content: Vec<&str> = Vec::new();
    let mut in_block = false;

    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if !in_block {
            if let Some(tag) = line.strip_prefix("```") {
                if tag.eq_ignore_ascii_case(fence) {
                    in_block = true;
                }
            }
        } else if line == "```" {
            return Some(content.join("\n"));
        } else {
            content.push(line);
        }
    }

    // Opener never closed (or never found).
    None
}

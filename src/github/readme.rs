//! Heuristic extraction of a demo link and a short blurb from README text.
//!
//! Both extractors try an ordered list of patterns and take the first hit.
//! The demo-link patterns overlap on purpose: READMEs that went through a
//! bad encoding round-trip carry a garbled link emoji, and earlier patterns
//! must keep priority over the looser ones that follow.
//!
//! Line terminators are `\n` and `\r` (the `R` flag), and lengths are
//! counted in chars.

use regex::Regex;
use std::sync::LazyLock;

const MIN_DESCRIPTION_CHARS: usize = 30;
const MAX_DESCRIPTION_CHARS: usize = 200;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("README pattern must compile"))
        .collect()
}

static DEMO_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)🔗 Live Demo:\s*(https?://[^\s)]+)",
        r"(?i)ð Live Demo:\s*(https?://[^\s)]+)",
        r"(?i)Live Demo:\s*(https?://[^\s)]+)",
        r"(?iR)🔗.*?Live Demo.*?:\s*(https?://[^\s)]+)",
        r"(?iR)Live Demo.*?:\s*(https?://[^\s)]+)",
    ])
});

/// Markdown stripping steps, applied in order
static MARKDOWN_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    let rule = |p: &str, rep: &'static str| (Regex::new(p).expect("markdown rule must compile"), rep);
    vec![
        rule(r"(?mR)^#+\s*", ""),                   // headers
        rule(r"(?R)\*\*(.*?)\*\*", "${1}"),          // bold
        rule(r"(?R)\*(.*?)\*", "${1}"),              // italic
        rule(r"(?R)`(.*?)`", "${1}"),                // inline code
        rule(r"\[([^\]]+)\]\([^)]+\)", "${1}"),      // links keep their text
        rule(r"!\[([^\]]*)\]\([^)]+\)", ""),         // images
        rule(r"(?s)```.*?```", ""),                  // fenced blocks
        rule(r"\n+", " "),
    ]
});

static DESCRIPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?mR)^(.{50,200})\.?\s*$",
        r"(?iR)##?\s*Description[:\s]*(.{50,200})",
        r"(?iR)##?\s*About[:\s]*(.{50,200})",
        r"(?iR)##?\s*Overview[:\s]*(.{50,200})",
        r"(?mR)^(.{30,150})\.?\s*$",
    ])
});

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s*").expect("list marker pattern must compile"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern must compile"));

/// Find a "Live Demo: <url>" link in README text
pub fn extract_demo_url(text: Option<&str>) -> Option<String> {
    let text = text.filter(|t| !t.is_empty())?;

    DEMO_URL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pull a one-line project description (30 to 200 chars) out of README text
pub fn extract_description(text: Option<&str>) -> Option<String> {
    let text = text.filter(|t| !t.is_empty())?;
    let clean = strip_markdown(text);

    for pattern in DESCRIPTION_PATTERNS.iter() {
        let Some(caps) = pattern.captures(&clean) else {
            continue;
        };
        let Some(group) = caps.get(1) else {
            continue;
        };

        let description = tidy(group.as_str());
        if within_bounds(&description) {
            return Some(description);
        }
    }

    SENTENCE_END
        .split(&clean)
        .map(str::trim)
        .find(|sentence| within_bounds(sentence))
        .map(|sentence| {
            if sentence.ends_with('.') {
                sentence.to_string()
            } else {
                format!("{sentence}.")
            }
        })
}

/// Flatten markdown into one whitespace-joined line
fn strip_markdown(text: &str) -> String {
    let flattened = MARKDOWN_RULES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        });

    flattened.trim().to_string()
}

fn tidy(candidate: &str) -> String {
    let without_marker = LIST_MARKER.replace(candidate.trim(), "");
    WHITESPACE_RUN
        .replace_all(&without_marker, " ")
        .trim()
        .to_string()
}

fn within_bounds(candidate: &str) -> bool {
    let len = candidate.chars().count();
    (MIN_DESCRIPTION_CHARS..=MAX_DESCRIPTION_CHARS).contains(&len)
}

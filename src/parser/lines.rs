use std::sync::LazyLock;

use regex::Regex;

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.+? Questions & (Suggested Answers|Answers)( (?:–|â€“) (Basic|Advanced))?)").unwrap()
});
static QUESTION_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.[\s\x1C-\x1F]+(.+)").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http://(breakingintowallstreet\.com|www\.mergersandinquisitions\.com)").unwrap()
});
static PAGE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\s*$").unwrap());

const FIT_HEADER: &str = "Fit / Qualitative Questions";
const FIT_HEADER_MAX_CHARS: usize = 50;
const HEADER_MAX_CHARS: usize = 100;
const TOC_LEADER: &str = "....";
const WALK_ME_THROUGH: &str = "walk me through";

/// One input line plus its artifact-free forms.
#[derive(Debug, Clone)]
pub struct RawLine {
    pub raw: String,
    /// Form feeds removed, whitespace untouched.
    pub clean: String,
    /// `clean`, trimmed with [`trim_line`].
    pub stripped: String,
}

impl RawLine {
    pub fn new(raw: &str) -> Self {
        let clean = strip_artifacts(raw);
        let stripped = trim_line(&clean).to_string();
        RawLine {
            raw: raw.to_string(),
            clean,
            stripped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Header(String),
    QuestionStart { number: String, text: String },
    Blank,
    /// Boilerplate URL or a lone page number.
    Noise,
    Body,
}

/// Split a text dump into the line arena the scanner walks. `\r\n`, lone
/// `\r` and `\n` all end a line.
pub fn split_lines(text: &str) -> Vec<RawLine> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(RawLine::new)
        .collect()
}

/// Trim Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`, which
/// PDF extractors leave behind as record/unit markers.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

pub fn strip_artifacts(line: &str) -> String {
    line.replace('\u{c}', "")
}

pub fn classify(line: &RawLine) -> LineKind {
    if let Some(label) = header_label(&line.stripped) {
        return LineKind::Header(label);
    }
    if let Some((number, text)) = question_start(&line.clean) {
        return LineKind::QuestionStart { number, text };
    }
    if line.stripped.is_empty() {
        LineKind::Blank
    } else if is_boilerplate(&line.stripped) {
        LineKind::Noise
    } else {
        LineKind::Body
    }
}

pub fn is_boilerplate(stripped: &str) -> bool {
    URL_RE.is_match(stripped) || PAGE_NUMBER_RE.is_match(stripped)
}

pub fn is_noise(stripped: &str) -> bool {
    stripped.is_empty() || is_boilerplate(stripped)
}

/// Category label for a section header line, if `stripped` is one.
pub fn header_label(stripped: &str) -> Option<String> {
    let len = stripped.chars().count();

    if stripped.contains(FIT_HEADER) && len < FIT_HEADER_MAX_CHARS {
        return Some(FIT_HEADER.to_string());
    }

    if len >= HEADER_MAX_CHARS || stripped.contains(TOC_LEADER) {
        return None;
    }
    CATEGORY_RE
        .captures(stripped)
        .map(|caps| trim_line(&caps[1]).to_string())
}

/// Match `N. text` at the very start of the clean line.
pub fn question_start(clean: &str) -> Option<(String, String)> {
    let caps = QUESTION_START_RE.captures(clean)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Decide whether the numbered line at `idx` opens a new record or is
/// ordinary text (e.g. a numbered list inside an answer).
pub fn is_new_question(lines: &[RawLine], idx: usize, after_header: bool, text: &str) -> bool {
    if after_header {
        return true;
    }
    if blank_above(lines, idx) {
        return true;
    }
    if text.to_lowercase().starts_with(WALK_ME_THROUGH) {
        return true;
    }
    text.contains('?') || lines[idx].stripped.contains('?')
}

/// Walk back over boilerplate; true when the first real line above is blank.
fn blank_above(lines: &[RawLine], idx: usize) -> bool {
    lines[..idx]
        .iter()
        .rev()
        .find(|l| l.stripped.is_empty() || !is_boilerplate(&l.stripped))
        .is_some_and(|l| l.stripped.is_empty())
}

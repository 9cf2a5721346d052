use serde::Serialize;

use super::lines::{is_noise, strip_artifacts, trim_line};

const MIN_QUESTION_CHARS: usize = 10;

/// One finished question/answer pair. Field order is the JSON field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl Record {
    pub fn assemble(category: &str, question: &[String], answer: &[String]) -> Self {
        Record {
            category: category.to_string(),
            question: normalize(question),
            answer: normalize(answer),
        }
    }
}

/// Join fragments with single spaces, dropping blanks, boilerplate URLs,
/// page numbers and form feeds.
pub fn normalize<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut kept = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let line = trim_line(fragment.as_ref());
        if is_noise(line) {
            continue;
        }
        let line = strip_artifacts(line);
        if !line.is_empty() {
            kept.push(line);
        }
    }
    kept.join(" ")
}

/// Final inclusion check: drops stray fragments and list headers that were
/// mistaken for questions.
pub fn accept(record: &Record) -> bool {
    let q = &record.question;
    if q.chars().count() < MIN_QUESTION_CHARS {
        return false;
    }
    !(q.ends_with(':') && !q.contains('?'))
}

use tracing::debug;

use super::assemble::Record;
use super::lines::{classify, is_new_question, LineKind, RawLine};

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Intro,
    Category,
    Question,
    Answer,
}

/// Single-pass scanner over the line arena. Owns the pending buffers and
/// every record flushed so far.
#[derive(Debug)]
pub struct Segmenter {
    state: ScanState,
    category: String,
    question: Vec<String>,
    answer: Vec<String>,
    records: Vec<Record>,
}

impl Segmenter {
    pub fn new() -> Self {
        Segmenter {
            state: ScanState::Intro,
            category: DEFAULT_CATEGORY.to_string(),
            question: Vec::new(),
            answer: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Feed line `idx` of `lines`. Earlier lines are only read, for the
    /// blank-line lookback.
    pub fn step(&mut self, lines: &[RawLine], idx: usize) {
        let line = &lines[idx];
        let kind = classify(line);

        if let LineKind::Header(label) = &kind {
            self.save_current();
            debug!(line = idx + 1, category = %label, "category header");
            self.category = label.clone();
            self.state = ScanState::Category;
            return;
        }

        if self.state == ScanState::Intro {
            return;
        }

        if let LineKind::QuestionStart { number, text } = &kind {
            let after_header = self.state == ScanState::Category;
            if is_new_question(lines, idx, after_header, text) {
                self.save_current();
                debug!(line = idx + 1, number = %number, "question start");
                self.question.push(text.clone());
                self.state = ScanState::Question;
                return;
            }
        }

        match self.state {
            ScanState::Question => {
                if kind == LineKind::Blank {
                    self.state = ScanState::Answer;
                } else {
                    self.question.push(line.stripped.clone());
                }
            }
            ScanState::Answer => self.answer.push(line.raw.clone()),
            ScanState::Category | ScanState::Intro => {}
        }
    }

    /// Flush the pending question/answer into a record. No-op when no
    /// question is open.
    pub fn save_current(&mut self) {
        if self.question.is_empty() {
            return;
        }
        let record = Record::assemble(&self.category, &self.question, &self.answer);
        debug!(category = %record.category, question = %record.question, "flush");
        self.records.push(record);
        self.question.clear();
        self.answer.clear();
    }

    /// Final flush; returns every record in document order.
    pub fn finish(mut self) -> Vec<Record> {
        self.save_current();
        self.records
    }
}

/// Run the state machine over the whole arena.
pub fn segment(lines: &[RawLine]) -> Vec<Record> {
    let mut seg = Segmenter::new();
    for idx in 0..lines.len() {
        seg.step(lines, idx);
    }
    debug!(state = ?seg.state(), category = seg.category(), "end of input");
    seg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::split_lines;

    fn run(text: &str) -> Vec<Record> {
        segment(&split_lines(text))
    }

    #[test]
    fn intro_is_dropped() {
        let records = run("Table of Contents\n1. Walk me through a DCF.\n\nYou project cash flows...\n");
        assert!(records.is_empty());
    }

    #[test]
    fn walk_me_through_after_header() {
        let records = run(
            "Valuation Questions & Answers\n1. Walk me through a DCF.\n\nYou project cash flows...\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Walk me through a DCF.");
        assert_eq!(records[0].answer, "You project cash flows...");
    }

    #[test]
    fn header_sets_category() {
        let records = run("Valuation Questions & Answers\n1. What is EV?\n\nEnterprise value...\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Valuation Questions & Answers");
        assert_eq!(records[0].question, "What is EV?");
        assert_eq!(records[0].answer, "Enterprise value...");
    }

    #[test]
    fn multi_line_question() {
        let records = run(
            "LBO Questions & Answers\n1. Why would a PE firm use\nleverage in a buyout?\n\nTo boost returns.\n",
        );
        assert_eq!(records[0].question, "Why would a PE firm use leverage in a buyout?");
        assert_eq!(records[0].answer, "To boost returns.");
    }

    #[test]
    fn page_number_inside_answer() {
        let records = run(
            "M&A Questions & Answers\n1. Why do companies acquire?\n\nTo grow\n5\nfaster than organically.\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answer, "To grow faster than organically.");
    }

    #[test]
    fn numbered_list_merges_into_answer() {
        let text = "M&A Questions & Answers\n\
                    1. What are the main synergies?\n\
                    \n\
                    There are two kinds:\n\
                    1. Revenue synergies\n\
                    2. Cost synergies\n";
        let records = run(text);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].answer,
            "There are two kinds: 1. Revenue synergies 2. Cost synergies"
        );
    }

    #[test]
    fn numbered_line_merges_into_question() {
        let records = run("LBO Questions & Answers\n1. What is an LBO?\n2. Explain briefly\n\nA buyout.\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "What is an LBO? 2. Explain briefly");
    }

    #[test]
    fn filler_after_header_discarded() {
        let records = run("Accounting Questions & Answers\nKey Topics:\n1. What is EBITDA?\n\nEarnings before...\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "What is EBITDA?");
        assert!(!records[0].answer.contains("Key Topics"));
    }

    #[test]
    fn blank_line_separates_questions() {
        let text = "Accounting Questions & Answers\n\
                    1. Walk me through the statements.\n\
                    \n\
                    The income statement...\n\
                    \n\
                    2. Depreciation goes up by 10\n\
                    \n\
                    Net income falls.\n";
        let records = run(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].question, "Depreciation goes up by 10");
        assert_eq!(records[1].answer, "Net income falls.");
    }

    #[test]
    fn category_switch_flushes_previous() {
        let text = "Accounting Questions & Answers\n\
                    1. What is working capital?\n\
                    \n\
                    Current assets minus current liabilities.\n\
                    Valuation Questions & Answers – Advanced\n\
                    1. How do you value a bank?\n\
                    \n\
                    With a DDM.\n";
        let records = run(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, "Accounting Questions & Answers");
        assert_eq!(records[0].answer, "Current assets minus current liabilities.");
        assert_eq!(records[1].category, "Valuation Questions & Answers – Advanced");
    }

    #[test]
    fn crlf_document() {
        let text = "Valuation Questions & Answers\r\n\
                    1. What is EV?\r\n\
                    \r\n\
                    Enterprise value\r\n\
                    12\r\n\
                    reflects all investors.\r\n";
        let records = run(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Valuation Questions & Answers");
        assert_eq!(records[0].question, "What is EV?");
        assert_eq!(records[0].answer, "Enterprise value reflects all investors.");
        assert!(!records[0].question.contains('\r') && !records[0].answer.contains('\r'));
    }

    #[test]
    fn crlf_blank_line_starts_answer() {
        let lines = split_lines("LBO Questions & Answers\r\n1. Why use leverage?\r\n\r\n");
        let mut seg = Segmenter::new();
        seg.step(&lines, 0);
        seg.step(&lines, 1);
        assert_eq!(seg.state(), ScanState::Question);
        seg.step(&lines, 2);
        assert_eq!(seg.state(), ScanState::Answer);
    }

    #[test]
    fn bare_carriage_return_document() {
        let records = run("Valuation Questions & Answers\r1. What is enterprise value?\r\rEV is...\r");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "What is enterprise value?");
        assert_eq!(records[0].answer, "EV is...");
    }

    #[test]
    fn separator_control_line_starts_answer() {
        let records = run("Valuation Questions & Answers\n1. What is enterprise value?\n\u{1c}\nEV is...\n");
        assert_eq!(records[0].question, "What is enterprise value?");
        assert_eq!(records[0].answer, "EV is...");
    }

    #[test]
    fn flush_without_question_is_noop() {
        let mut seg = Segmenter::new();
        seg.save_current();
        assert_eq!(seg.state(), ScanState::Intro);
        assert_eq!(seg.category(), DEFAULT_CATEGORY);
        assert!(seg.finish().is_empty());
    }

    #[test]
    fn question_without_answer() {
        let records = run("Fit / Qualitative Questions\n1. Why investment banking?");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Fit / Qualitative Questions");
        assert_eq!(records[0].answer, "");
    }
}

use crate::parser::Record;

#[derive(Debug, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Record counts per category, in order of first appearance.
pub fn category_counts(records: &[Record]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for r in records {
        match counts.iter_mut().find(|c| c.category == r.category) {
            Some(c) => c.count += 1,
            None => counts.push(CategoryCount {
                category: r.category.clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// Records whose category contains `filter` (case-insensitive), capped at `limit`.
pub fn select<'a>(records: &'a [Record], filter: Option<&str>, limit: usize) -> Vec<&'a Record> {
    let needle = filter.map(str::to_lowercase);
    records
        .iter()
        .filter(|r| match &needle {
            Some(n) => r.category.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .take(limit)
        .collect()
}

pub fn print_preview(rows: &[&Record]) {
    println!(
        "{:>3} | {:<28} | {:<60} | {:>6}",
        "#", "Category", "Question", "Answer"
    );
    println!("{}", "-".repeat(108));
    for (i, r) in rows.iter().enumerate() {
        println!(
            "{:>3} | {:<28} | {:<60} | {:>6}",
            i + 1,
            truncate(&r.category, 28),
            truncate(&r.question, 60),
            r.answer.chars().count()
        );
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

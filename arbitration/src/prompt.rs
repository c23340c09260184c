//! Prompt construction for the arbitration model

use common::{Target, Trend};
use sentiment_engine::AnalysisReport;
use std::fmt::Write;

const TITLE_FALLBACK_CHARS: usize = 60;

pub const SYSTEM_PROMPT: &str = "You are a disciplined equity analyst. You weigh pre-scored news \
evidence and give a short-horizon directional call for a single listed company. \
Follow the requested answer format exactly.";

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn display_title(title: &str, content: &str) -> String {
    let title = one_line(title);
    if !title.is_empty() {
        return title;
    }
    one_line(content).chars().take(TITLE_FALLBACK_CHARS).collect()
}

/// Build the user prompt: ranked items 1..N, aggregate score, divergence narrative, answer format
pub fn build_prompt(target: &Target, report: &AnalysisReport) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Target: {} ({}), analysis date {}.",
        target.name, target.stock_id, report.run_date
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Top news by weighted impact (positive = bullish):");
    for (i, scored) in report.ranked.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. {} | score {:+.2}",
            i + 1,
            display_title(&scored.item.title, &scored.item.content),
            scored.impact()
        );
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Aggregate sentiment score: {:+.2}", report.aggregate_sentiment);
    let _ = writeln!(prompt, "Divergence check: {}", report.divergence.verdict.narrative());
    let _ = writeln!(prompt);

    let vocabulary: Vec<&str> = Trend::ALL.iter().map(Trend::as_str).collect();
    let _ = writeln!(prompt, "Answer in exactly this format:");
    let _ = writeln!(prompt, "Trend: <one of {}>", vocabulary.join(", "));
    let _ = write!(prompt, "Reason: <one or two sentences>");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{NaiveDate, NewsItem};
    use sentiment_engine::{assess, DivergenceConfig, ScoredItem};

    fn scored(title: &str, content: &str, adjusted: f64) -> ScoredItem {
        ScoredItem {
            item: NewsItem::new(
                "20251202",
                "news_1",
                title,
                content,
                NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
            ),
            raw_score: adjusted,
            hits: Vec::new(),
            adjusted_score: adjusted,
            recency_weight: 1.0,
            density_weight: 1.0,
            salience_weight: 1.0,
            weight: 1.0,
            parsed_price_change: 0.0,
        }
    }

    #[test]
    fn test_prompt_lists_items_in_rank_order() {
        let ranked = vec![
            scored("LiteOn profit\nsurges", "body", 1.95),
            scored("", "光寶科 停工 影響 出貨", -0.5),
        ];
        let report = AnalysisReport {
            run_date: NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
            considered: 2,
            relevant: 2,
            divergence: assess(&ranked, &DivergenceConfig::default()),
            aggregate_sentiment: 1.45,
            ranked,
        };
        let prompt = build_prompt(&Target::new("LiteOn", "2301"), &report);

        let first = prompt.find("1. LiteOn profit surges | score +1.95").unwrap();
        let second = prompt.find("2. 光寶科 停工 影響 出貨 | score -0.50").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Aggregate sentiment score: +1.45"));
        assert!(prompt.contains(report.divergence.verdict.narrative()));
        assert!(prompt.contains("Trend: <one of Up, SlightUp, SlightDown, Down, Unclear>"));
    }
}

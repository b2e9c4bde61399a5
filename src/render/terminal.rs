use crate::analysis::{AiAnalysis, AnalysisResult, Authorship, InsightKind, RiskLevel, TextStats};
use crate::client::Outcome;
use crate::stats::readability;
use owo_colors::OwoColorize;

/// Inner width (content area between the two border chars).
const W: usize = 56;

/// Width of the bar in `bar_row`.
const BAR_W: usize = 14;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Public API
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Render a full analysis report, with `source` (file name or "stdin")
/// shown under the title.
pub fn render(result: &AnalysisResult, outcome: &Outcome, source: &str) {
    println!();
    border_top();
    blank();

    center_bold("AUTHORCHECK");
    center_dimmed(&format!("{}  \u{00B7}  {}", source, outcome_label(outcome)));
    blank();
    separator();
    blank();

    render_stats(&result.stats);

    if matches!(outcome, Outcome::Skipped) {
        blank();
        border_bot();
        println!();
        return;
    }

    blank();
    separator();
    blank();

    match outcome {
        Outcome::Fallback { reason } | Outcome::Error { reason } => {
            for line in wrap(&format!("AI analysis unavailable: {}", reason), W - 8) {
                warning_line(&line);
            }
            blank();
        }
        _ => {}
    }

    render_ai(&result.ai_analysis);

    blank();
    border_bot();
    println!();
}

fn render_stats(stats: &TextStats) {
    section("TEXT");
    kv("Words", &fmt_num(stats.word_count));
    kv("Characters", &fmt_num(stats.character_count));
    kv("Sentences", &stats.sentence_count.to_string());
    kv("Paragraphs", &stats.paragraph_count.to_string());
    kv("Reading time", &format!("{} min", stats.estimated_reading_time));
    blank();

    let features = &stats.authorship_features;
    section("STYLE");
    kv("Words / sentence", &format!("{:.1}", features.avg_words_per_sentence));
    kv(
        "Sentences / paragraph",
        &format!("{:.1}", features.avg_sentences_per_paragraph),
    );
    kv("Complexity", &format!("{:.1}", features.complexity_score));
    kv("Vocabulary richness", &format!("{:.1}%", features.vocabulary_richness));
    kv(
        "Sentiment",
        &format!("{} ({:+.2})", stats.sentiment.label, stats.sentiment.score),
    );

    if !stats.top_words.is_empty() {
        blank();
        section("TOP WORDS");
        let max = stats.top_words.iter().map(|w| w.count).max().unwrap_or(1).max(1);
        for w in &stats.top_words {
            let pct = w.count as f64 / max as f64 * 100.0;
            bar_row(&w.word, pct, &w.count.to_string());
        }
    }

    blank();
    readability_line(stats.readability_score);
}

fn render_ai(ai: &AiAnalysis) {
    center_bold(&verdict_label(ai.ai_or_human, ai.ai_or_human_confidence));
    for line in wrap(&ai.ai_or_human_explanation, W - 6) {
        italic_line(&line);
    }
    blank();

    let style = &ai.writing_style;
    section("VOICE");
    kv("Tone", &style.tone);
    kv("Formality", style.formality.as_str());
    kv("Complexity", style.complexity.as_str());
    kv("Audience", &style.audience);
    if !style.style.is_empty() {
        kv("Style", &style.style.join(", "));
    }

    if !ai.advanced_sentiment.emotions.is_empty() {
        blank();
        section("EMOTIONS");
        for e in &ai.advanced_sentiment.emotions {
            bar_row(&e.emotion, e.score * 100.0, e.intensity.as_str());
        }
    }

    if !ai.topics.is_empty() {
        blank();
        section("TOPICS");
        for t in &ai.topics {
            bar_row(&t.topic, t.relevance * 100.0, &format!("{:.0}%", t.relevance * 100.0));
        }
    }

    blank();
    section("QUALITY");
    let q = &ai.content_quality;
    for (label, score) in [
        ("Overall", q.overall),
        ("Clarity", q.clarity),
        ("Coherence", q.coherence),
        ("Engagement", q.engagement),
        ("Originality", q.originality),
    ] {
        bar_row(label, f64::from(score), &score.to_string());
    }

    blank();
    let risk = &ai.plagiarism_risk;
    kv("Plagiarism risk", &format!("{} ({}%)", risk.level, risk.score));
    if risk.level == RiskLevel::High {
        warning_line("High similarity to common writing patterns");
    }

    if !ai.insights.is_empty() {
        blank();
        section("INSIGHTS");
        for insight in &ai.insights {
            insight_line(insight.kind, &insight.title);
            for line in wrap(&insight.description, W - 9) {
                indented_dimmed(&line);
            }
            if let Some(suggestion) = &insight.suggestion {
                for line in wrap(&format!("-> {}", suggestion), W - 9) {
                    indented_dimmed(&line);
                }
            }
        }
    }
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Skipped => "empty input",
        Outcome::Disabled => "local only",
        Outcome::Success => "AI analysis",
        Outcome::Fallback { .. } => "fallback",
        Outcome::Error { .. } => "AI unavailable",
    }
}

fn verdict_label(authorship: Authorship, confidence: u8) -> String {
    match authorship {
        Authorship::Ai => format!("LIKELY AI-WRITTEN ({}%)", confidence),
        Authorship::Human => format!("LIKELY HUMAN-WRITTEN ({}%)", confidence),
        Authorship::Unknown => "AUTHORSHIP UNKNOWN".to_string(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Display width calculation
//
//  Terminal columns a string occupies. Emoji and CJK take two
//  columns, variation selectors none, everything else one.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn display_width(s: &str) -> usize {
    s.chars()
        .map(|ch| match ch {
            '\u{FE00}'..='\u{FE0F}' | '\u{200B}'..='\u{200D}' | '\u{0300}'..='\u{036F}' => 0,
            '\u{1F300}'..='\u{1F9FF}'
            | '\u{2600}'..='\u{27BF}'
            | '\u{1F1E0}'..='\u{1F1FF}'
            | '\u{2E80}'..='\u{9FFF}'
            | '\u{AC00}'..='\u{D7A3}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF01}'..='\u{FF60}'
            | '\u{FFE0}'..='\u{FFE6}' => 2,
            _ => 1,
        })
        .sum()
}

/// Greedy word wrap to `width` display columns. Words longer than the
/// width are cut.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let needed = if current.is_empty() {
            display_width(&word)
        } else {
            display_width(&current) + 1 + display_width(&word)
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn truncate(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if display_width(&out) + display_width(ch.encode_utf8(&mut [0; 4])) + 3 > width {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Low-level line builders
//
//  Every line is exactly:
//     "  " + border_left + <W display-columns of content> + border_right
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn border_top() {
    println!("  {}", format!("\u{256D}{}\u{256E}", "\u{2500}".repeat(W)).cyan());
}

fn border_bot() {
    println!("  {}", format!("\u{2570}{}\u{256F}", "\u{2500}".repeat(W)).cyan());
}

fn separator() {
    println!("  {}", format!("\u{251C}{}\u{2524}", "\u{2500}".repeat(W)).cyan());
}

fn blank() {
    println!("  {}{}{}", "\u{2502}".cyan(), " ".repeat(W), "\u{2502}".cyan());
}

/// Left/right padding that centers `text` in the box.
fn centered(text: &str) -> (usize, usize) {
    let free = W.saturating_sub(display_width(text));
    (free / 2, free - free / 2)
}

fn center_bold(text: &str) {
    let text = truncate(text, W);
    let (lp, rp) = centered(&text);
    println!(
        "  {}{}{}{}{}",
        "\u{2502}".cyan(),
        " ".repeat(lp),
        text.bold().white(),
        " ".repeat(rp),
        "\u{2502}".cyan(),
    );
}

fn center_dimmed(text: &str) {
    let text = truncate(text, W);
    let (lp, rp) = centered(&text);
    println!(
        "  {}{}{}{}{}",
        "\u{2502}".cyan(),
        " ".repeat(lp),
        text.dimmed(),
        " ".repeat(rp),
        "\u{2502}".cyan(),
    );
}

fn italic_line(text: &str) {
    let (lp, rp) = centered(text);
    println!(
        "  {}{}{}{}{}",
        "\u{2502}".cyan(),
        " ".repeat(lp),
        text.italic().dimmed(),
        " ".repeat(rp),
        "\u{2502}".cyan(),
    );
}

fn section(label: &str) {
    // Display: "   -- LABEL"
    let dw = display_width("   \u{2500}\u{2500} ") + display_width(label);
    println!(
        "  {}{}{}{}",
        "\u{2502}".cyan(),
        format!("   \u{2500}\u{2500} {}", label).cyan().bold(),
        " ".repeat(W.saturating_sub(dw)),
        "\u{2502}".cyan(),
    );
}

fn kv(label: &str, value: &str) {
    // Layout: "   {label}  {dots}  {value}  "
    let ml = 3_usize;
    let mr = 2_usize;
    let gap = 2_usize;
    let label_w = display_width(label);
    let value = truncate(value, W.saturating_sub(ml + label_w + gap * 2 + mr + 1));
    let fixed = ml + label_w + gap + gap + display_width(&value) + mr;
    let ndots = W.saturating_sub(fixed).max(1);

    println!(
        "  {}{}{}  {}  {}{}{}",
        "\u{2502}".cyan(),
        " ".repeat(ml),
        label.dimmed(),
        ".".repeat(ndots).bright_black(),
        value.white().bold(),
        " ".repeat(mr),
        "\u{2502}".cyan(),
    );
}

fn bar_row(label: &str, pct: f64, value: &str) {
    // Layout: "     {label:<16} {bar:14} {value:>8}  "
    let ml = 5_usize;
    let mr = 2_usize;
    let label_col = 16_usize;
    let value_col = 8_usize;

    let label = truncate(label, label_col);
    let value = truncate(value, value_col);
    let used = ml + label_col + 1 + BAR_W + 1 + value_col + mr;
    let extra = W.saturating_sub(used);

    let filled = bar_cells(pct);
    let bar_filled = "\u{2588}".repeat(filled);
    let bar_empty = "\u{2591}".repeat(BAR_W - filled);
    let label_pad = label_col.saturating_sub(display_width(&label));
    let value_pad = value_col.saturating_sub(display_width(&value));

    println!(
        "  {}{}{}{} {}{} {}{}{}{}",
        "\u{2502}".cyan(),
        " ".repeat(ml),
        label.white(),
        " ".repeat(label_pad),
        bar_filled.green(),
        bar_empty.bright_black(),
        " ".repeat(value_pad),
        value.dimmed(),
        " ".repeat(mr + extra),
        "\u{2502}".cyan(),
    );
}

/// Filled cells for a percentage, clamped to the bar.
fn bar_cells(pct: f64) -> usize {
    let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
    ((pct / 100.0) * BAR_W as f64).round() as usize
}

fn warning_line(msg: &str) {
    let prefix_dw = 3 + 3; // "   " + "!! "
    let msg = truncate(msg, W - prefix_dw);
    let rp = W.saturating_sub(prefix_dw + display_width(&msg));
    println!(
        "  {}   {}{}{}{}",
        "\u{2502}".cyan(),
        "!! ".bright_red().bold(),
        msg.bright_red(),
        " ".repeat(rp),
        "\u{2502}".cyan(),
    );
}

fn insight_line(kind: InsightKind, title: &str) {
    let marker = match kind {
        InsightKind::Strength => "+".green().bold().to_string(),
        InsightKind::Improvement => "^".yellow().bold().to_string(),
        InsightKind::Observation => "*".cyan().bold().to_string(),
    };
    let title = truncate(title, W - 7);
    let rp = W.saturating_sub(5 + 2 + display_width(&title));
    println!(
        "  {}     {} {}{}{}",
        "\u{2502}".cyan(),
        marker,
        title.white().bold(),
        " ".repeat(rp),
        "\u{2502}".cyan(),
    );
}

fn indented_dimmed(text: &str) {
    let rp = W.saturating_sub(7 + display_width(text));
    println!(
        "  {}       {}{}{}",
        "\u{2502}".cyan(),
        text.dimmed(),
        " ".repeat(rp),
        "\u{2502}".cyan(),
    );
}

fn readability_line(score: u32) {
    let text = format!("READABILITY: {} ({})", score, readability::band(score));
    let (lp, rp) = centered(&text);
    println!(
        "  {}{}{}{}{}",
        "\u{2502}".cyan(),
        " ".repeat(lp),
        text.bold().yellow(),
        " ".repeat(rp),
        "\u{2502}".cyan(),
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Utilities
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_works() {
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(500), "500");
        assert_eq!(fmt_num(1000), "1.0K");
        assert_eq!(fmt_num(1500), "1.5K");
        assert_eq!(fmt_num(1_500_000), "1.5M");
    }

    #[test]
    fn display_width_ascii_and_box_drawing() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("\u{2500}\u{2502}"), 2);
    }

    #[test]
    fn display_width_wide_chars() {
        assert_eq!(display_width("\u{1F525}"), 2); // fire
        assert_eq!(display_width("\u{270D}\u{FE0F}"), 2); // writing hand + VS16
        assert_eq!(display_width("\u{6587}"), 2); // CJK
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        for line in &lines {
            assert!(display_width(line) <= 10);
        }
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn long_words_are_truncated() {
        let lines = wrap("supercalifragilistic", 10);
        assert_eq!(lines, vec!["superca..."]);
    }

    #[test]
    fn bar_cells_are_clamped() {
        assert_eq!(bar_cells(0.0), 0);
        assert_eq!(bar_cells(100.0), BAR_W);
        assert_eq!(bar_cells(250.0), BAR_W);
        assert_eq!(bar_cells(-5.0), 0);
        assert_eq!(bar_cells(f64::NAN), 0);
        assert_eq!(bar_cells(50.0), BAR_W / 2);
    }

    #[test]
    fn verdict_mentions_confidence_only_when_known() {
        assert_eq!(verdict_label(Authorship::Ai, 85), "LIKELY AI-WRITTEN (85%)");
        assert_eq!(verdict_label(Authorship::Human, 60), "LIKELY HUMAN-WRITTEN (60%)");
        assert_eq!(verdict_label(Authorship::Unknown, 0), "AUTHORSHIP UNKNOWN");
    }

    #[test]
    fn every_outcome_has_a_label() {
        let outcomes = [
            Outcome::Skipped,
            Outcome::Disabled,
            Outcome::Success,
            Outcome::Fallback { reason: "x".into() },
            Outcome::Error { reason: "x".into() },
        ];
        for o in &outcomes {
            assert!(!outcome_label(o).is_empty());
        }
    }
}

//! Sentiment scoring.
//!
//! Delegates entirely to the VADER polarity estimator; no scoring logic
//! lives here. The compound polarity is clamped to [-1.0, 1.0] and rounded
//! to two decimal places.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Wraps the external polarity estimator.
///
/// Construction loads the lexicon once; `score` is then cheap per call.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity for `text`: negative < 0 < positive, 0 neutral.
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        let scores = self.analyzer.polarity_scores(text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);
        (compound.clamp(-1.0, 1.0) * 100.0).round() / 100.0
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SentimentScorer;

    fn has_two_decimals(score: f64) -> bool {
        ((score * 100.0).round() - score * 100.0).abs() < 1e-9
    }

    #[test]
    fn scores_stay_in_range_with_two_decimals() {
        let scorer = SentimentScorer::new();
        let samples = [
            "I love this wonderful amazing day",
            "this is horrible terrible awful",
            "the cat sat on the mat",
            "",
            "great day",
        ];
        for text in samples {
            let score = scorer.score(text);
            assert!((-1.0..=1.0).contains(&score), "{text:?} scored {score}");
            assert!(has_two_decimals(score), "{text:?} scored {score}");
        }
    }

    #[test]
    fn positive_text_scores_positive() {
        let scorer = SentimentScorer::new();
        assert!(scorer.score("I love this wonderful amazing day") > 0.0);
    }

    #[test]
    fn negative_text_scores_negative() {
        let scorer = SentimentScorer::new();
        assert!(scorer.score("this is horrible terrible awful") < 0.0);
    }

    #[test]
    fn neutral_or_empty_text_scores_zero() {
        let scorer = SentimentScorer::new();
        assert!((scorer.score("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = SentimentScorer::new();
        let text = "great day";
        assert!((scorer.score(text) - scorer.score(text)).abs() < f64::EPSILON);
    }
}

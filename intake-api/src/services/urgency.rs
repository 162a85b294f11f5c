//! Urgency classification from answer sentiment
//!
//! Weighted scoring over per-label emotion scores, mapped onto the
//! low/medium/high scale. Classification must never block a form write:
//! any sentiment-service problem resolves fail-open to Medium.

use intake_common::db::models::Urgency;

use super::sentiment::{EmotionScore, SentimentClient};

const HIGH_THRESHOLD: f64 = 0.6;
const MEDIUM_THRESHOLD: f64 = 0.2;

/// How a classification was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// Derived from sentiment scores
    Scored,
    /// Sentiment service failed; fail-open default applied
    Defaulted,
}

/// Resolved urgency plus how it was obtained
///
/// Callers persist only the urgency; the outcome exists so degraded
/// classifications are visible in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub urgency: Urgency,
    pub outcome: ClassificationOutcome,
}

/// Weighted urgency score over emotion labels
///
/// joy/surprise pull the score down, neutral nudges it up slightly, and the
/// negative emotions push it up. Unknown labels contribute nothing.
pub fn weighted_score(scores: &[EmotionScore]) -> f64 {
    let mut score = 0.0;
    for entry in scores {
        match entry.label.as_str() {
            "joy" | "surprise" => score -= entry.score * 1.5,
            "neutral" => score += entry.score * 0.2,
            "sadness" | "anger" | "disgust" | "fear" => score += entry.score * 1.2,
            _ => {}
        }
    }
    score
}

/// Map a weighted score onto the three-level urgency scale
///
/// Thresholds are inclusive: exactly 0.2 is Medium, exactly 0.6 is High.
pub fn urgency_from_score(score: f64) -> Urgency {
    if score >= HIGH_THRESHOLD {
        Urgency::High
    } else if score >= MEDIUM_THRESHOLD {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

/// Urgency classifier backed by the sentiment analysis service
#[derive(Debug, Clone)]
pub struct UrgencyClassifier {
    client: SentimentClient,
}

impl UrgencyClassifier {
    /// Create a classifier over the given sentiment client
    pub fn new(client: SentimentClient) -> Self {
        Self { client }
    }

    /// Classify answer text into an urgency rating
    ///
    /// Never fails. A sentiment-service problem of any kind (unreachable,
    /// slow, non-200, malformed body) resolves to Medium and is logged.
    pub async fn classify(&self, text: &str) -> Classification {
        match self.client.analyze(text).await {
            Ok(scores) => Classification {
                urgency: urgency_from_score(weighted_score(&scores)),
                outcome: ClassificationOutcome::Scored,
            },
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Sentiment analysis failed, defaulting urgency to medium"
                );
                Classification {
                    urgency: Urgency::Medium,
                    outcome: ClassificationOutcome::Defaulted,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, value: f64) -> EmotionScore {
        EmotionScore {
            label: label.to_string(),
            score: value,
        }
    }

    #[test]
    fn pure_joy_classifies_low() {
        let scores = [score("joy", 1.0)];
        let total = weighted_score(&scores);
        assert!((total - (-1.5)).abs() < 1e-9);
        assert_eq!(urgency_from_score(total), Urgency::Low);
    }

    #[test]
    fn pure_sadness_classifies_high() {
        let scores = [score("sadness", 1.0)];
        let total = weighted_score(&scores);
        assert!((total - 1.2).abs() < 1e-9);
        assert_eq!(urgency_from_score(total), Urgency::High);
    }

    #[test]
    fn pure_neutral_lands_on_the_medium_boundary() {
        let scores = [score("neutral", 1.0)];
        let total = weighted_score(&scores);
        assert!((total - 0.2).abs() < 1e-9);
        assert_eq!(urgency_from_score(total), Urgency::Medium);
    }

    #[test]
    fn empty_result_set_classifies_low() {
        assert_eq!(weighted_score(&[]), 0.0);
        assert_eq!(urgency_from_score(0.0), Urgency::Low);
    }

    #[test]
    fn unlisted_labels_contribute_nothing() {
        let scores = [score("confusion", 1.0), score("anger", 0.5)];
        let total = weighted_score(&scores);
        assert!((total - 0.6).abs() < 1e-9);
    }

    #[test]
    fn threshold_boundaries_are_inclusive() {
        assert_eq!(urgency_from_score(0.6), Urgency::High);
        assert_eq!(urgency_from_score(0.599_999), Urgency::Medium);
        assert_eq!(urgency_from_score(0.2), Urgency::Medium);
        assert_eq!(urgency_from_score(0.199_999), Urgency::Low);
        assert_eq!(urgency_from_score(-2.0), Urgency::Low);
    }

    #[test]
    fn mixed_emotions_sum_their_weights() {
        // 1.2*0.5 (anger) + 1.2*0.25 (fear) - 1.5*0.1 (joy) = 0.75
        let scores = [score("anger", 0.5), score("fear", 0.25), score("joy", 0.1)];
        let total = weighted_score(&scores);
        assert!((total - 0.75).abs() < 1e-9);
        assert_eq!(urgency_from_score(total), Urgency::High);
    }

    #[tokio::test]
    async fn unreachable_service_fails_open_to_medium() {
        // Nothing listens on the discard port; connect fails fast
        let client = SentimentClient::new("http://127.0.0.1:9").unwrap();
        let classifier = UrgencyClassifier::new(client);

        let classification = classifier.classify("the roof is on fire").await;
        assert_eq!(classification.urgency, Urgency::Medium);
        assert_eq!(classification.outcome, ClassificationOutcome::Defaulted);
    }
}

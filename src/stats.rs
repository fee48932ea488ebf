/// Summary statistics over a folder's normalized scores.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ScoreStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n-1 denominator), 0 for fewer than two scores.
    pub std_dev: f64,
}

/// Normalized score: matches per thousand words. Defined as 0 for an empty
/// document instead of dividing by zero.
pub fn normalized_score(total_matches: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        0.0
    } else {
        total_matches as f64 / word_count as f64 * 1000.0
    }
}

/// Aggregate a folder's scores. Returns `None` for an empty slice; a folder
/// summary only exists once at least one document completed.
pub fn summarize(scores: &[f64]) -> Option<ScoreStats> {
    if scores.is_empty() {
        return None;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let std_dev = if scores.len() < 2 {
        0.0
    } else {
        let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    };
    Some(ScoreStats {
        count: scores.len(),
        mean,
        min,
        max,
        std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_zero_for_empty_document() {
        assert_eq!(normalized_score(5, 0), 0.0);
    }

    #[test]
    fn score_is_matches_per_thousand_words() {
        let score = normalized_score(3, 11);
        assert!((score - 272.7).abs() < 0.05, "got {score}");
    }

    #[test]
    fn single_document_folder() {
        let stats = summarize(&[42.0]).unwrap();
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.max, 42.0);
    }

    #[test]
    fn three_document_folder() {
        let stats = summarize(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert!((stats.std_dev - 10.0).abs() < 1e-9);
    }

    #[test]
    fn no_scores_no_summary() {
        assert!(summarize(&[]).is_none());
    }
}

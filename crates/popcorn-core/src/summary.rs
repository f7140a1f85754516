use popcorn_models::WatchedEntry;
use serde::Serialize;

/// Mean of `values` rounded to two decimals. Uses compensated summation; empty input is 0.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for &value in values {
        let y = value - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }

    let mean = sum / values.len() as f64;
    ((mean + f64::EPSILON) * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        let imdb: Vec<f64> = entries.iter().map(|e| e.imdb_rating).collect();
        let user: Vec<f64> = entries.iter().map(|e| f64::from(e.user_rating)).collect();
        let runtime: Vec<f64> = entries.iter().map(|e| f64::from(e.runtime_minutes)).collect();

        Self {
            count: entries.len(),
            avg_imdb_rating: average(&imdb),
            avg_user_rating: average(&user),
            avg_runtime: average(&runtime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_average_midpoint() {
        assert!((average(&[8.8, 8.5]) - 8.65).abs() < 1e-9);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        assert!((average(&[1.0, 2.0, 2.0]) - 1.67).abs() < 1e-9);
        assert_eq!(average(&[148.0, 116.0]), 132.0);
    }

    #[test]
    fn test_average_many_small_values() {
        let values = vec![0.1; 1000];
        assert!((average(&values) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_summary_from_entries() {
        let entries = vec![
            WatchedEntry {
                id: "tt1375666".to_string(),
                title: "Inception".to_string(),
                year: "2010".to_string(),
                poster_url: String::new(),
                user_rating: 10,
                imdb_rating: 8.8,
                runtime_minutes: 148,
            },
            WatchedEntry {
                id: "tt0088763".to_string(),
                title: "Back to the Future".to_string(),
                year: "1985".to_string(),
                poster_url: String::new(),
                user_rating: 9,
                imdb_rating: 8.5,
                runtime_minutes: 116,
            },
        ];

        let summary = WatchedSummary::from_entries(&entries);
        assert_eq!(summary.count, 2);
        assert!((summary.avg_imdb_rating - 8.65).abs() < 1e-9);
        assert!((summary.avg_user_rating - 9.5).abs() < 1e-9);
        assert!((summary.avg_runtime - 132.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = WatchedSummary::from_entries(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_runtime, 0.0);
    }
}

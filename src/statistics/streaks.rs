//! Sign streaks of a percentage-change series

use serde::{Deserialize, Serialize};

/// Lengths of maximal runs of strictly positive and strictly negative changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakStats {
    pub longest_positive: usize,
    pub shortest_positive: usize,
    pub longest_negative: usize,
    pub shortest_negative: usize,
}

/// Compute streak statistics.
///
/// A zero change extends neither kind of run and ends the current one.
/// When a sign never occurs its longest and shortest streaks are 0.
/// The shortest streak is the shortest completed run, not the minimum of
/// the running count, which would be 1 whenever the sign occurs at all.
pub fn streaks(percentage_changes: &[f64]) -> StreakStats {
    let mut positive_runs = Vec::new();
    let mut negative_runs = Vec::new();

    // Signed length of the run in progress
    let mut current: i64 = 0;
    for &change in percentage_changes {
        current = if change > 0.0 && current > 0 {
            current + 1
        } else if change > 0.0 {
            close(current, &mut positive_runs, &mut negative_runs, 1)
        } else if change < 0.0 && current < 0 {
            current - 1
        } else if change < 0.0 {
            close(current, &mut positive_runs, &mut negative_runs, -1)
        } else {
            close(current, &mut positive_runs, &mut negative_runs, 0)
        };
    }
    close(current, &mut positive_runs, &mut negative_runs, 0);

    StreakStats {
        longest_positive: positive_runs.iter().copied().max().unwrap_or(0),
        shortest_positive: positive_runs.iter().copied().min().unwrap_or(0),
        longest_negative: negative_runs.iter().copied().max().unwrap_or(0),
        shortest_negative: negative_runs.iter().copied().min().unwrap_or(0),
    }
}

/// Record the finished run and return the next run's starting value
fn close(run: i64, positive: &mut Vec<usize>, negative: &mut Vec<usize>, next: i64) -> i64 {
    if run > 0 {
        positive.push(run as usize);
    } else if run < 0 {
        negative.push(run.unsigned_abs() as usize);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_positive() {
        let stats = streaks(&[1.0; 10]);
        assert_eq!(stats.longest_positive, 10);
        assert_eq!(stats.shortest_positive, 10);
        assert_eq!(stats.longest_negative, 0);
        assert_eq!(stats.shortest_negative, 0);
    }

    #[test]
    fn test_all_negative() {
        let stats = streaks(&[-0.5; 4]);
        assert_eq!(stats.longest_negative, 4);
        assert_eq!(stats.longest_positive, 0);
        assert_eq!(stats.shortest_positive, 0);
    }

    #[test]
    fn test_mixed_runs() {
        let changes = [1.0, 2.0, 3.0, -1.0, -2.0, 4.0, -3.0, -1.0, -1.0, -1.0, 2.0, 2.0];
        let stats = streaks(&changes);
        assert_eq!(stats.longest_positive, 3);
        assert_eq!(stats.shortest_positive, 1);
        assert_eq!(stats.longest_negative, 4);
        assert_eq!(stats.shortest_negative, 2);
    }

    #[test]
    fn test_zero_breaks_runs() {
        let stats = streaks(&[1.0, 1.0, 0.0, 1.0, -1.0, 0.0, -1.0]);
        assert_eq!(stats.longest_positive, 2);
        assert_eq!(stats.shortest_positive, 1);
        assert_eq!(stats.longest_negative, 1);
        assert_eq!(stats.shortest_negative, 1);
    }

    #[test]
    fn test_empty_and_zero_series() {
        assert_eq!(streaks(&[]), StreakStats::default());
        assert_eq!(streaks(&[0.0, 0.0]), StreakStats::default());
    }
}

//! History Collector
//!
//! Append-only per-state count series, one entry per completed step.

use disinfo_types::{Peak, State, StateCounts, StepRow};

/// Per-state time series. All series always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryCollector {
    series: [Vec<usize>; State::COUNT],
}

impl HistoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one step's counts.
    pub fn record(&mut self, counts: &StateCounts) {
        for (state, count) in counts.iter() {
            self.series[state.index()].push(count);
        }
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.series[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts after step `step` (1-indexed). Steps past the end clamp to the
    /// last recorded step; step 0 or an empty history gives all zeros.
    pub fn counts_for_step(&self, step: usize) -> StateCounts {
        let step = step.min(self.len());
        let mut counts = StateCounts::new();
        if step == 0 {
            return counts;
        }
        for state in State::ALL {
            counts[state] = self.series[state.index()][step - 1];
        }
        counts
    }

    pub fn total_at_step(&self, step: usize) -> usize {
        self.counts_for_step(step).total()
    }

    /// Percentage of the population in each state at `step`, in State order.
    /// All zeros when the total is zero.
    pub fn shares_at_step(&self, step: usize) -> [(State, f64); State::COUNT] {
        let counts = self.counts_for_step(step);
        let total = counts.total();
        State::ALL.map(|state| {
            let share = if total == 0 {
                0.0
            } else {
                counts.get(state) as f64 * 100.0 / total as f64
            };
            (state, share)
        })
    }

    pub fn series(&self, state: State) -> &[usize] {
        &self.series[state.index()]
    }

    pub fn latest(&self) -> Option<StateCounts> {
        (!self.is_empty()).then(|| self.counts_for_step(self.len()))
    }

    /// Export rows, one per recorded step.
    pub fn rows(&self) -> impl Iterator<Item = StepRow> + '_ {
        (1..=self.len()).map(move |step| StepRow {
            step,
            counts: self.counts_for_step(step),
        })
    }

    /// Highest count reached by `state` and the first step it occurred at.
    pub fn peak(&self, state: State) -> Option<Peak> {
        let mut peak: Option<Peak> = None;
        for (i, &count) in self.series(state).iter().enumerate() {
            if peak.map_or(true, |p| count > p.count) {
                peak = Some(Peak { step: i + 1, count });
            }
        }
        peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(s: usize, e: usize, i: usize, d: usize, r: usize) -> StateCounts {
        StateCounts {
            susceptible: s,
            exposed: e,
            infected: i,
            doubtful: d,
            recovered: r,
        }
    }

    fn sample_history() -> HistoryCollector {
        let mut history = HistoryCollector::new();
        history.record(&counts(90, 10, 0, 0, 0));
        history.record(&counts(80, 12, 6, 2, 0));
        history.record(&counts(75, 10, 9, 3, 3));
        history.record(&counts(70, 9, 9, 4, 8));
        history
    }

    #[test]
    fn test_empty_history() {
        let history = HistoryCollector::new();
        assert!(history.is_empty());
        assert_eq!(history.counts_for_step(5), StateCounts::new());
        assert_eq!(history.latest(), None);
        assert_eq!(history.peak(State::Infected), None);
        assert!(history.shares_at_step(1).iter().all(|(_, share)| *share == 0.0));
    }

    #[test]
    fn test_series_stay_equal_length() {
        let history = sample_history();
        for state in State::ALL {
            assert_eq!(history.series(state).len(), 4);
        }
        assert_eq!(history.series(State::Recovered), &[0, 0, 3, 8]);
    }

    #[test]
    fn test_counts_for_step_clamps() {
        let history = sample_history();
        assert_eq!(history.counts_for_step(0), StateCounts::new());
        assert_eq!(history.counts_for_step(2), counts(80, 12, 6, 2, 0));
        assert_eq!(history.counts_for_step(99), counts(70, 9, 9, 4, 8));
        assert_eq!(history.total_at_step(3), 100);
        assert_eq!(history.latest(), Some(counts(70, 9, 9, 4, 8)));
    }

    #[test]
    fn test_shares() {
        let history = sample_history();
        let shares = history.shares_at_step(2);
        assert_eq!(shares[0], (State::Susceptible, 80.0));
        assert_eq!(shares[2], (State::Infected, 6.0));
        let sum: f64 = shares.iter().map(|(_, s)| s).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_peak_takes_first_maximum() {
        let history = sample_history();
        assert_eq!(history.peak(State::Infected), Some(Peak { step: 3, count: 9 }));
        assert_eq!(history.peak(State::Exposed), Some(Peak { step: 2, count: 12 }));
    }

    #[test]
    fn test_rows() {
        let history = sample_history();
        let rows: Vec<StepRow> = history.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].step, 1);
        assert_eq!(rows[3].counts.recovered, 8);
    }
}

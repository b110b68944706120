//! Run-length streak detection over a chronologically ordered outcome
//! sequence.
//!
//! The machine has three logical states: no active run, a win run of length
//! n, a loss run of length n. A `Skip` event (tie, push, missing line)
//! closes whatever run is open and starts nothing — it is neither a win nor
//! a loss, and the next decisive event starts a fresh run of 1.

/// One event in an entity's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    /// Tie / push / no line: breaks any active run without starting one.
    Skip,
}

/// A closed (or still-open) run with the seasons it spanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Positive length = win run, negative = loss run. Never zero.
    pub length: i32,
    pub first_season: i32,
    pub last_season: i32,
}

/// Final bookkeeping for one entity.
///
/// `current` is the run still open at end of input (0 if none). The longest
/// win and loss runs are tracked independently over every run seen, so the
/// current run may or may not be one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StreakSummary {
    /// Signed: positive = active win run, negative = active loss run.
    pub current: i32,
    pub longest_win: Option<Run>,
    pub longest_loss: Option<Run>,
    /// Decisive events observed (wins + losses).
    pub decisions: u32,
}

#[derive(Debug, Default)]
pub struct StreakMachine {
    open: Option<Run>,
    longest_win: Option<Run>,
    longest_loss: Option<Run>,
    decisions: u32,
}

impl StreakMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next event in strict chronological order.
    pub fn push(&mut self, outcome: Outcome, season: i32) {
        match outcome {
            Outcome::Win => {
                self.decisions += 1;
                match &mut self.open {
                    Some(run) if run.length > 0 => {
                        run.length += 1;
                        run.last_season = season;
                    }
                    _ => {
                        self.close_open();
                        self.open = Some(Run {
                            length: 1,
                            first_season: season,
                            last_season: season,
                        });
                    }
                }
            }
            Outcome::Loss => {
                self.decisions += 1;
                match &mut self.open {
                    Some(run) if run.length < 0 => {
                        run.length -= 1;
                        run.last_season = season;
                    }
                    _ => {
                        self.close_open();
                        self.open = Some(Run {
                            length: -1,
                            first_season: season,
                            last_season: season,
                        });
                    }
                }
            }
            Outcome::Skip => self.close_open(),
        }
    }

    /// Close the machine; the still-open run becomes the current streak.
    pub fn finish(mut self) -> StreakSummary {
        let current = self.open.map(|r| r.length).unwrap_or(0);
        // The open run is also a candidate for the longest bookkeeping.
        let open = self.open.take();
        if let Some(run) = open {
            self.record(run);
        }
        StreakSummary {
            current,
            longest_win: self.longest_win,
            longest_loss: self.longest_loss,
            decisions: self.decisions,
        }
    }

    fn close_open(&mut self) {
        if let Some(run) = self.open.take() {
            self.record(run);
        }
    }

    fn record(&mut self, run: Run) {
        if run.length > 0 {
            if self.longest_win.map(|r| run.length > r.length).unwrap_or(true) {
                self.longest_win = Some(run);
            }
        } else if self
            .longest_loss
            .map(|r| run.length < r.length)
            .unwrap_or(true)
        {
            self.longest_loss = Some(run);
        }
    }
}

/// Convenience: run a whole sequence through the machine.
pub fn scan(events: impl IntoIterator<Item = (Outcome, i32)>) -> StreakSummary {
    let mut m = StreakMachine::new();
    for (outcome, season) in events {
        m.push(outcome, season);
    }
    m.finish()
}

use std::time::Instant;

use log::{error, info};

use crate::store::HighScoreStore;

/// Points are paid per pickup, proportional to the time spent getting there.
pub struct ScoreTracker<S> {
    score: u64,
    high_score: u64,
    new_high: bool,
    last_pickup: Instant,
    multiplier: u64,
    store: S,
}

impl<S: HighScoreStore> ScoreTracker<S> {
    /// Reads the stored high score once; an unreadable store counts as 0.
    pub fn new(mut store: S, multiplier: u64, now: Instant) -> Self {
        let high_score = store.read().unwrap_or_else(|e| {
            error!("Error loading high score: {}", e);
            0
        });
        info!("High score is {}", high_score);

        ScoreTracker {
            score: 0,
            high_score,
            new_high: false,
            last_pickup: now,
            multiplier: multiplier.max(1),
            store,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.score = 0;
        self.new_high = false;
        self.last_pickup = now;
    }

    /// Adds one tenth of a millisecond per `multiplier` since the previous pickup
    /// and returns the points added.
    pub fn record_pickup(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.last_pickup);
        let tenths_of_ms = (elapsed.as_micros() / 100) as u64;
        let delta = tenths_of_ms / self.multiplier;

        self.score += delta;
        self.last_pickup = now;

        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high = true;
            if let Err(e) = self.store.write(self.score) {
                error!("Error saving high score: {}", e);
            }
        }

        delta
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Whether this game has beaten the high score it started with.
    pub fn is_new_high(&self) -> bool {
        self.new_high
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

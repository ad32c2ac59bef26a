use super::{HealthReader, RewardShaperConfig, ScoreReader, ScoreReading};
use crate::Frame;
use log::{debug, trace};

/// Reward of a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedReward {
    /// Score component, `0` on non-gameplay frames.
    pub score: f32,

    /// Health component, the death penalty on the step where the player died.
    pub health: f32,

    /// The frame does not show gameplay.
    pub is_non_gameplay: bool,

    /// Health dropped to zero on this step.
    pub died: bool,
}

impl ShapedReward {
    /// Returns the scalar reward stored in the replay buffer.
    pub fn total(&self) -> f32 {
        self.score + self.health
    }
}

/// Combines the score and health readings of consecutive frames into rewards.
///
/// The shaper is stateful: score smoothing and death detection compare the
/// current frame with the previous one.
pub struct RewardShaper<S, H> {
    config: RewardShaperConfig,
    score_reader: S,
    health_reader: H,
    prev_score: ScoreReading,
    prev_health: f32,
}

impl<S, H> RewardShaper<S, H>
where
    S: ScoreReader,
    H: HealthReader,
{
    /// Constructs a reward shaper.
    pub fn new(config: RewardShaperConfig, score_reader: S, health_reader: H) -> Self {
        Self {
            config,
            score_reader,
            health_reader,
            prev_score: ScoreReading::Digits(0),
            prev_health: 0.0,
        }
    }

    fn smooth(&self, reading: ScoreReading) -> ScoreReading {
        match (reading, self.prev_score) {
            (ScoreReading::Uncertain, prev) => prev,
            (ScoreReading::Digits(v), ScoreReading::Digits(p))
                if v > 0 && p > 0 && v.abs_diff(p) > self.config.max_score_jump =>
            {
                trace!("Score jump {} -> {} ignored", p, v);
                ScoreReading::Digits(p)
            }
            (reading, _) => reading,
        }
    }

    /// Evaluates the reward of a full-resolution frame.
    pub fn evaluate(&mut self, full: &Frame) -> ShapedReward {
        let raw = self.score_reader.read_score(full);
        let reading = self.smooth(raw);
        self.prev_score = reading;

        let (score, is_non_gameplay) = match reading {
            ScoreReading::Digits(v) => (v as f32, false),
            _ => (0.0, true),
        };

        let raw_health = self.health_reader.read_health(full);
        let died = self.prev_health > 0.0 && raw_health == 0.0;
        let health = if died {
            debug!("Death detected");
            self.config.death_penalty
        } else {
            self.config.health_weight * raw_health
        };
        self.prev_health = raw_health;

        ShapedReward {
            score,
            health,
            is_non_gameplay,
            died,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use std::collections::VecDeque;

    struct Scripted<T>(VecDeque<T>);

    impl ScoreReader for Scripted<ScoreReading> {
        fn read_score(&mut self, _full: &Frame) -> ScoreReading {
            self.0.pop_front().unwrap()
        }
    }

    impl HealthReader for Scripted<f32> {
        fn read_health(&mut self, _full: &Frame) -> f32 {
            self.0.pop_front().unwrap()
        }
    }

    fn shaper(
        scores: Vec<ScoreReading>,
        healths: Vec<f32>,
    ) -> RewardShaper<Scripted<ScoreReading>, Scripted<f32>> {
        RewardShaper::new(
            RewardShaperConfig::default(),
            Scripted(scores.into()),
            Scripted(healths.into()),
        )
    }

    fn frame() -> Frame {
        Array3::zeros((2, 2, 3))
    }

    #[test]
    fn test_death_penalty() {
        let mut shaper = shaper(
            vec![ScoreReading::Digits(3), ScoreReading::Digits(3)],
            vec![5.0, 0.0],
        );
        let r = shaper.evaluate(&frame());
        assert_eq!(r.health, 50.0);
        assert!(!r.died);

        let r = shaper.evaluate(&frame());
        assert_eq!(r.health, -100.0);
        assert!(r.died);
        assert_eq!(r.total(), -97.0);
    }

    #[test]
    fn test_no_death_without_prior_health() {
        let mut shaper = shaper(
            vec![ScoreReading::NotADigit, ScoreReading::NotADigit],
            vec![0.0, 0.0],
        );
        assert!(!shaper.evaluate(&frame()).died);
        let r = shaper.evaluate(&frame());
        assert!(!r.died);
        assert_eq!(r.total(), 0.0);
    }

    #[test]
    fn test_score_smoothing() {
        use ScoreReading::*;
        let mut shaper = shaper(
            vec![Uncertain, Digits(4), Digits(20), Uncertain, Digits(9), NotADigit, Uncertain],
            vec![0.0; 7],
        );
        let scores = (0..7)
            .map(|_| shaper.evaluate(&frame()))
            .map(|r| (r.score, r.is_non_gameplay))
            .collect::<Vec<_>>();
        assert_eq!(
            scores,
            vec![
                (0.0, false),
                (4.0, false),
                (4.0, false),
                (4.0, false),
                (9.0, false),
                (0.0, true),
                (0.0, true),
            ]
        );
    }
}

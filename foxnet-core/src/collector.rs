//! Online collection of transitions from a running game.
mod config;
mod decision;
mod override_input;
use crate::{
    error::CollectorError,
    record::{Record, RecordValue, Recorder},
    replay_buffer::{FrameBatch, FrameReplayBuffer},
    reward::{HealthReader, RewardShaper, ScoreReader},
    Act, Agent, Env, Observation, Policy, ReplayBufferBase, StackedFrames,
};
use anyhow::Result;
use chrono::Local;
pub use config::CollectorConfig;
pub use decision::Decision;
use decision::argmax;
use log::{debug, info};
pub use override_input::{ChannelOverride, NoOverride, OverrideInput};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Statistics of the batch being collected.
#[derive(Debug, Default)]
struct BatchStats {
    steps: usize,
    reward: f32,
    max_score: f32,
    non_gameplay_steps: usize,
    deaths: usize,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Plays the game and turns raw frames into labeled transitions.
///
/// # Decision step
///
/// [`OnlineCollector::step()`] does the following:
///
/// 1. Repeats the previous action on `frame_skip - 1` frames, discarding them.
///    The last frame read becomes the current observation. On the first step the
///    initial frame is read instead.
/// 2. Stores the current frame in the replay buffer and encodes the stacked
///    observation ending at it.
/// 3. Decides the action, see [`Decision`]:
///     * if the previous frame was not a gameplay screen, one of
///       [`Env::recovery_actions`] drawn uniformly;
///     * else if the override input has a pending action, that action;
///     * else with probability `1 - epsilon` the argmax of [`Policy::evaluate`];
///     * else an action drawn uniformly from [`Env::available_actions`].
/// 4. Sends the action.
/// 5. Reads the next frame and evaluates the reward with [`RewardShaper`].
/// 6. Stores the effect of the frame. Recovery actions, and override actions
///    outside of the available actions, are stored as the no-op.
///
/// Terminal flags are always `false`, as the game never signals the end of an
/// episode.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Env]-->|Observation::state|B[FrameReplayBuffer]
///     A -->|Observation::full|C[RewardShaper]
///     B -->|StackedFrames|D[Policy]
///     D -->|action values|E[Decision]
///     F[OverrideInput]-->E
///     E -->|Env::Act|A
///     C -->|ShapedReward|B
///     B -->|FrameBatch|G[Agent]
/// ```
///
/// [`OnlineCollector::run()`] repeats [`OnlineCollector::next_batch()`], hands
/// each batch to [`Agent::opt_with_record`], anneals epsilon and writes one
/// record per batch.
pub struct OnlineCollector<E, S, H, O>
where
    E: Env,
    S: ScoreReader,
    H: HealthReader,
    O: OverrideInput<E::Act>,
{
    env: E,
    buffer: FrameReplayBuffer,
    shaper: RewardShaper<S, H>,
    override_input: O,

    batch_size: usize,
    frame_skip: usize,
    epsilon: f64,
    epsilon_decay: f64,
    epsilon_decay_interval: usize,
    rng: StdRng,

    /// Index of the no-op in the available actions.
    noop_ix: usize,

    /// Action sent on the previous step, repeated while skipping frames.
    last_act: Option<E::Act>,

    /// Frame read at the end of the previous step.
    current: Option<Observation>,

    /// The previous frame was not a gameplay screen.
    non_gameplay: bool,

    env_steps: usize,
    batches: usize,
    stats: BatchStats,
}

impl<E, S, H, O> OnlineCollector<E, S, H, O>
where
    E: Env,
    S: ScoreReader,
    H: HealthReader,
    O: OverrideInput<E::Act>,
{
    /// Constructs a collector around a connected environment.
    pub fn build(
        config: &CollectorConfig,
        env: E,
        score_reader: S,
        health_reader: H,
        override_input: O,
    ) -> Result<Self> {
        config.validate()?;

        let available = env.available_actions();
        if available.is_empty() {
            Err(CollectorError::NoActions("available"))?;
        }
        if env.recovery_actions().is_empty() {
            Err(CollectorError::NoActions("recovery"))?;
        }
        let noop_ix = available
            .iter()
            .position(|a| *a == E::Act::noop())
            .ok_or(CollectorError::NoopNotAvailable)?;

        Ok(Self {
            buffer: FrameReplayBuffer::build(&config.replay_buffer)?,
            shaper: RewardShaper::new(config.reward.clone(), score_reader, health_reader),
            env,
            override_input,
            batch_size: config.batch_size,
            frame_skip: config.frame_skip,
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            epsilon_decay_interval: config.epsilon_decay_interval,
            rng: StdRng::seed_from_u64(config.seed),
            noop_ix,
            last_act: None,
            current: None,
            non_gameplay: false,
            env_steps: 0,
            batches: 0,
            stats: BatchStats::default(),
        })
    }

    /// Returns the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns the replay buffer.
    pub fn buffer(&self) -> &FrameReplayBuffer {
        &self.buffer
    }

    /// Returns the current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the number of decision steps taken so far.
    pub fn env_steps(&self) -> usize {
        self.env_steps
    }

    /// Returns the number of batches handed to the agent so far.
    pub fn batches(&self) -> usize {
        self.batches
    }

    fn decide<P: Policy>(
        &mut self,
        policy: &mut P,
        obs: &StackedFrames,
    ) -> Result<Decision<E::Act>> {
        if self.non_gameplay {
            let acts = self.env.recovery_actions();
            let ix = self.rng.gen_range(0..acts.len());
            return Ok(Decision::Recover(acts[ix].clone()));
        }

        if let Some(act) = self.override_input.poll() {
            return Ok(Decision::Override(act));
        }

        let n_actions = self.env.available_actions().len();
        if self.rng.gen::<f64>() >= self.epsilon {
            let values = policy.evaluate(obs)?;
            if values.len() != n_actions {
                Err(CollectorError::ActionValueLen {
                    expected: n_actions,
                    given: values.len(),
                })?;
            }
            Ok(Decision::Greedy(argmax(&values)))
        } else {
            Ok(Decision::Explore(self.rng.gen_range(0..n_actions)))
        }
    }

    /// Performs a decision step and stores the resulting transition.
    pub fn step<P: Policy>(&mut self, policy: &mut P) -> Result<Record> {
        // Frame skip
        let mut obs = match self.current.take() {
            Some(obs) => obs,
            None => self.env.read_observation()?,
        };
        if let Some(act) = self.last_act.clone() {
            for _ in 1..self.frame_skip {
                self.env.send_action(&act)?;
                obs = self.env.read_observation()?;
            }
        }

        let ix = self.buffer.store_frame(obs.state)?;
        let stacked = self.buffer.encode_recent_observation()?;

        let decision = self.decide(policy, &stacked)?;
        let available = self.env.available_actions();
        let act = decision
            .action(available)
            .ok_or(CollectorError::NoActions("available"))?;
        let recorded = decision.recorded_index(available, self.noop_ix);
        self.env.send_action(&act)?;
        self.last_act = Some(act);

        let next = self.env.read_observation()?;
        let reward = self.shaper.evaluate(&next.full);
        self.buffer.store_effect(ix, recorded, reward.total(), false)?;
        self.non_gameplay = reward.is_non_gameplay;
        self.current = Some(next);

        self.env_steps += 1;
        self.stats.steps += 1;
        self.stats.reward += reward.total();
        self.stats.max_score = self.stats.max_score.max(reward.score);
        self.stats.non_gameplay_steps += reward.is_non_gameplay as usize;
        self.stats.deaths += reward.died as usize;

        debug!(
            "Step {}: {} action {:?}, reward {}",
            self.env_steps,
            decision.mode(),
            self.last_act,
            reward.total()
        );

        Ok(Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward.total())),
            ("score", RecordValue::Scalar(reward.score)),
            ("health", RecordValue::Scalar(reward.health)),
            ("action", RecordValue::Scalar(recorded as f32)),
            ("mode", RecordValue::String(decision.mode().to_string())),
        ]))
    }

    /// Collects `batch_size` steps, or more until the buffer can be sampled,
    /// and samples a batch.
    pub fn next_batch<P: Policy>(&mut self, policy: &mut P) -> Result<FrameBatch> {
        self.stats = BatchStats::default();
        while self.stats.steps < self.batch_size || !self.buffer.can_sample(self.batch_size) {
            self.step(policy)?;
        }
        self.buffer.sample(self.batch_size)
    }

    fn batch_record(&self, epsilon: f64) -> Record {
        Record::from_slice(&[
            ("batch", RecordValue::Scalar(self.batches as f32)),
            ("env_steps", RecordValue::Scalar(self.env_steps as f32)),
            ("batch_reward", RecordValue::Scalar(self.stats.reward)),
            ("max_score", RecordValue::Scalar(self.stats.max_score)),
            ("epsilon", RecordValue::Scalar(epsilon as f32)),
            (
                "non_gameplay_steps",
                RecordValue::Scalar(self.stats.non_gameplay_steps as f32),
            ),
            ("deaths", RecordValue::Scalar(self.stats.deaths as f32)),
            ("timestamp", RecordValue::DateTime(Local::now())),
        ])
    }

    /// Collects batches and optimizes the agent with them.
    ///
    /// Runs until `max_batches` batches were handed to the agent, or forever
    /// if `max_batches` is `None`.
    pub fn run<A, R>(
        &mut self,
        agent: &mut A,
        recorder: &mut R,
        max_batches: Option<usize>,
    ) -> Result<()>
    where
        A: Agent<FrameReplayBuffer>,
        R: Recorder + ?Sized,
    {
        info!("Start collecting, epsilon = {}", self.epsilon);

        while max_batches.map_or(true, |n| self.batches < n) {
            let batch = self.next_batch(agent)?;
            let record_agent = agent.opt_with_record(batch)?;
            self.batches += 1;

            let epsilon = self.epsilon;
            let mut record = self.batch_record(epsilon);
            record.merge_inplace(record_agent);

            info!(
                "Batch {}: reward {}, max score {}, deaths {}",
                self.batches, self.stats.reward, self.stats.max_score, self.stats.deaths
            );
            recorder.write(record);

            if self.batches % self.epsilon_decay_interval == 0 {
                self.epsilon *= self.epsilon_decay;
                info!("Annealed epsilon to {}", self.epsilon);
            }
        }

        Ok(())
    }
}

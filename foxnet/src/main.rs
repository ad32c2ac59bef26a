use anyhow::Result;
use clap::Parser;
use foxnet::{spawn_stdin_override, CollectConfig, RandomAgent};
use foxnet_core::{
    collector::{NoOverride, OverrideInput},
    record::LogRecorder,
    Env as _, OnlineCollector,
};
use foxnet_emulator_env::{ActionSymbol, DigitTemplateReader, EmulatorEnv, HealthBarReader};
use log::info;
use std::path::PathBuf;

/// Play the game in the emulator and collect transitions
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML configuration file, defaults are used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host of the emulator
    #[arg(long)]
    host: Option<String>,

    /// Port of the emulator
    #[arg(short, long)]
    port: Option<u16>,

    /// Initial exploration rate
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Number of batches to collect, runs until interrupted if omitted
    #[arg(short, long)]
    max_batches: Option<usize>,

    /// Read override action keys from the standard input
    #[arg(short, long, default_value_t = false)]
    user_override: bool,

    /// Image of the health bar at full health
    #[arg(long)]
    health_template: Option<PathBuf>,

    /// Directory of the digit templates
    #[arg(long)]
    digit_templates: Option<PathBuf>,
}

impl Args {
    fn collect_config(&self) -> Result<CollectConfig> {
        let mut config = match &self.config {
            Some(path) => CollectConfig::load(path)?,
            None => CollectConfig::default(),
        };

        if let Some(host) = &self.host {
            config.env.channel.host = host.clone();
        }
        if let Some(port) = self.port {
            config.env.channel.port = port;
        }
        if let Some(epsilon) = self.epsilon {
            config.collector.epsilon = epsilon;
        }
        if let Some(path) = &self.health_template {
            config.health_template = path.clone();
        }
        if let Some(path) = &self.digit_templates {
            config.digit_templates = path.clone();
        }

        Ok(config)
    }
}

fn collect<O: OverrideInput<ActionSymbol>>(
    config: &CollectConfig,
    override_input: O,
    max_batches: Option<usize>,
) -> Result<()> {
    let score_reader = DigitTemplateReader::from_dir(&config.digit_templates)?;
    let health_reader = HealthBarReader::from_path(&config.health_template)?;
    let env = EmulatorEnv::build(&config.env)?;
    let mut agent = RandomAgent::new(env.available_actions().len(), config.collector.seed);
    let mut recorder = LogRecorder::new("");

    let mut collector = OnlineCollector::build(
        &config.collector,
        env,
        score_reader,
        health_reader,
        override_input,
    )?;
    collector.run(&mut agent, &mut recorder, max_batches)?;

    info!("Collected {} steps", collector.env_steps());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.collect_config()?;

    if args.user_override {
        collect(&config, spawn_stdin_override(), args.max_batches)
    } else {
        collect(&config, NoOverride, args.max_batches)
    }
}

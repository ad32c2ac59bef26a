//! Manual override of actions from the terminal.
use crossbeam_channel::Sender;
use foxnet_core::collector::ChannelOverride;
use foxnet_emulator_env::ActionSymbol;
use log::{info, warn};
use std::{
    convert::TryFrom,
    io::{stdin, BufRead},
    thread,
};

/// Parses the keys of a line typed by the user, skipping unknown keys.
pub fn parse_override_line(line: &str) -> Vec<ActionSymbol> {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .filter_map(|c| match ActionSymbol::try_from(c) {
            Ok(act) => Some(act),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect()
}

fn forward_lines(input: impl BufRead, sender: Sender<ActionSymbol>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stopped reading override input: {}", e);
                return;
            }
        };
        for act in parse_override_line(&line) {
            if sender.send(act).is_err() {
                return;
            }
        }
    }
}

/// Reads action keys from the standard input on a background thread.
///
/// Each line typed by the user is parsed with [`parse_override_line`], the
/// last key of a line takes effect at the next decision step.
pub fn spawn_stdin_override() -> ChannelOverride<ActionSymbol> {
    let (sender, input) = ChannelOverride::unbounded();
    thread::spawn(move || forward_lines(stdin().lock(), sender));
    info!("Reading override keys (wasdjkln) from the standard input");
    input
}

//! Action for [`EmulatorEnv`](crate::EmulatorEnv).
use crate::error::EmulatorEnvError;
use foxnet_core::Act;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// A controller input sent to the emulator.
///
/// Each symbol maps to a fixed 32-bit button bitmask of the N64 controller.
/// In configuration files and on the command line, symbols are written as the
/// keys used for manual play: `w`, `a`, `s`, `d` move the stick, `j`, `k`, `l`
/// press A, B and start, and `n` releases everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionSymbol {
    /// Stick up.
    #[serde(rename = "w")]
    Up,

    /// Stick left.
    #[serde(rename = "a")]
    Left,

    /// Stick down.
    #[serde(rename = "s")]
    Down,

    /// Stick right.
    #[serde(rename = "d")]
    Right,

    /// A button, fires.
    #[serde(rename = "j")]
    Fire,

    /// B button.
    #[serde(rename = "k")]
    Back,

    /// Start button.
    #[serde(rename = "l")]
    Start,

    /// No button pressed.
    #[serde(rename = "n")]
    Noop,
}

impl ActionSymbol {
    /// All symbols.
    pub const ALL: [ActionSymbol; 8] = [
        Self::Up,
        Self::Left,
        Self::Down,
        Self::Right,
        Self::Fire,
        Self::Back,
        Self::Start,
        Self::Noop,
    ];

    /// Returns the bitmask written to the emulator.
    pub fn bitmask(self) -> u32 {
        match self {
            Self::Up => 0x5000_0000,
            Self::Left => 0x00b0_0000,
            Self::Down => 0xb000_0000,
            Self::Right => 0x0050_0000,
            Self::Fire => 0x80,
            Self::Back => 0x40,
            Self::Start => 0x10,
            Self::Noop => 0,
        }
    }

    /// Returns the symbol with the given bitmask.
    pub fn from_bitmask(bitmask: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.bitmask() == bitmask)
    }

    /// Returns the key of the symbol.
    pub fn key(self) -> char {
        match self {
            Self::Up => 'w',
            Self::Left => 'a',
            Self::Down => 's',
            Self::Right => 'd',
            Self::Fire => 'j',
            Self::Back => 'k',
            Self::Start => 'l',
            Self::Noop => 'n',
        }
    }

    /// Parses a string of keys such as `"wasdjkn"`.
    pub fn parse_keys(keys: &str) -> Result<Vec<Self>, EmulatorEnvError> {
        keys.chars().map(Self::try_from).collect()
    }
}

impl TryFrom<char> for ActionSymbol {
    type Error = EmulatorEnvError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.key() == c)
            .ok_or(EmulatorEnvError::UnknownAction(c))
    }
}

impl fmt::Display for ActionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Act for ActionSymbol {
    fn noop() -> Self {
        Self::Noop
    }
}

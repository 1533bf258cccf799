use clap::{ArgEnum, Args, Parser, Subcommand};
use parse_duration::parse::{parse as parse_dur, Error as ParseDurationError};
use sensorlink::GreetingPolicy;
use std::{str::FromStr, time::Duration};

use crate::{canvas::CanvasConf, serial::SerialConf};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lists connected serial devices
    List,
    /// Runs the sketch against a sensor board
    Run(RunConf),
}

pub struct ParsableDuration(pub Duration);

impl FromStr for ParsableDuration {
    type Err = ParseDurationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dur(s).map(ParsableDuration)
    }
}

#[derive(Args)]
pub struct RunConf {
    #[clap(flatten)]
    pub serial: SerialConf,

    #[clap(flatten)]
    pub canvas: CanvasConf,

    /// How long to keep the link open, e.g. "30s"; runs until disconnect,
    /// error or Ctrl-C when omitted
    #[clap(short, long)]
    pub duration: Option<ParsableDuration>,

    /// What to do with the greeting a board sends on boot
    #[clap(long, value_enum, default_value_t)]
    pub greeting: GreetingArg,

    /// Poll for the device to come back after a disconnect instead of exiting
    #[clap(long)]
    pub reconnect: bool,
}

#[derive(ArgEnum, Clone, Copy, Default)]
pub enum GreetingArg {
    /// Drop the greeting and rely on the board to follow up unprompted
    #[default]
    Discard,
    /// Spend another prompt byte after a greeting
    Reprompt,
}

impl From<GreetingArg> for GreetingPolicy {
    fn from(arg: GreetingArg) -> Self {
        match arg {
            GreetingArg::Discard => GreetingPolicy::Discard,
            GreetingArg::Reprompt => GreetingPolicy::Reprompt,
        }
    }
}

pub(crate) mod parser;

use crate::error::Error;
use core::str::FromStr;

/// Token a board prints once when its serial port comes up
pub const GREETING: &str = "hello";

/// One decoded line from the channel
#[derive(PartialEq, Debug, Clone)]
pub enum Frame {
    /// Boot greeting, carries no data
    Greeting,
    Reading(Reading),
}

/// Three sensor values from a single line, in wire order
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Reading {
    /// Drives the horizontal position of the sketch
    pub horizontal: f32,
    /// Drives the vertical position
    pub vertical: f32,
    /// Button or analog level, drives the fill shade
    pub level: f32,
}

impl FromStr for Frame {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_line(s)
    }
}

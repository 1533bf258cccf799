use crate::error::Error;
use core::{
    fmt,
    fmt::{Debug, Display},
};
use num_derive::{FromPrimitive, ToPrimitive};

/// UART rates commonly used by hobbyist sensor boards
#[derive(ToPrimitive, FromPrimitive, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum BaudRate {
    #[default]
    Baud9600 = 9600,
    Baud19200 = 19200,
    Baud38400 = 38400,
    Baud57600 = 57600,
    Baud115200 = 115200,
}

impl BaudRate {
    pub fn try_from_rate(rate: u32) -> Result<Self, Error> {
        <Self as num_traits::FromPrimitive>::from_u32(rate).ok_or(Error::InvalidBaudRate)
    }
}

impl Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}", *self as u32))
    }
}

/// What to do with the greeting line a board sends on boot.
///
/// The board only produces a data line in response to a prompt byte, so
/// discarding the greeting without re-arming relies on the board sending its
/// first data line unprompted.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum GreetingPolicy {
    /// Drop the greeting and wait for an unsolicited follow-up line
    #[default]
    Discard,
    /// Drop the greeting and spend a prompt byte to re-arm the exchange
    Reprompt,
}

/// Tunables for a sketch link
#[derive(PartialEq, Debug, Clone)]
pub struct LinkConfig {
    /// Lower bound of the sensor domain
    pub input_min: f32,
    /// Upper bound of the sensor domain, 10-bit ADC by default
    pub input_max: f32,
    /// Width of the drawing surface readings are mapped onto
    pub canvas_width: u32,
    /// Height of the drawing surface
    pub canvas_height: u32,
    pub greeting: GreetingPolicy,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            input_min: 0.0,
            input_max: 1023.0,
            canvas_width: 400,
            canvas_height: 300,
            greeting: GreetingPolicy::default(),
        }
    }
}

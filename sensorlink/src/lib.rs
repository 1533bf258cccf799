//! Duplex link to a sensor board that streams comma-separated readings.
//!
//! The board only sends a line after receiving a one-byte prompt, so at most
//! one frame is ever in flight. [`Link`] holds the protocol state machine and
//! turns tagged channel events into the side effects a driver has to perform;
//! [`LineCodec`] sits at the byte boundary and frames CR-LF terminated lines.

pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod link;
pub mod render;

pub use codec::{LineCodec, Prompt};
pub use config::{BaudRate, GreetingPolicy, LinkConfig};
pub use error::{Error, Result};
pub use frame::{Frame, Reading};
pub use link::{Link, LinkAction, LinkEvent, LinkState};
pub use render::RenderState;

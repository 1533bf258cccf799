use crate::{
    config::{GreetingPolicy, LinkConfig},
    frame::Frame,
    render::RenderState,
};

/// Lifecycle of the channel behind a link.
///
/// `Open` and `Processing` are transient: a dispatch passes through them and
/// settles on `AwaitingFrame` before returning.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LinkState {
    /// No channel selected, selection control visible
    NoChannel,
    /// Selection in progress, waiting for the open to complete
    Selecting,
    /// Channel just opened, prompt not yet spent
    Open,
    /// Prompt spent, waiting for the board's line
    AwaitingFrame,
    /// Decoding a received line
    Processing,
    /// Transport failed, channel unusable until reselected
    Closed,
}

/// Tagged notification fed into the link by its driver
#[derive(PartialEq, Debug, Clone)]
pub enum LinkEvent {
    /// A channel candidate was picked by the user or auto-detected
    SelectRequested,
    /// The selected channel finished opening
    Opened,
    /// A complete line arrived, terminator already stripped
    Line(String),
    /// A new device was attached to the platform
    Attached,
    /// The device went away
    Disconnected,
    /// The transport reported an error
    TransportError(String),
    /// The user asked to shut the link down
    CloseRequested,
}

/// Side effect the driver has to perform after a dispatch
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum LinkAction {
    /// Write one prompt byte to the channel
    SendPrompt,
    /// Re-arm the channel selection control
    ShowSelector,
    /// Remove the channel selection control
    HideSelector,
    /// Re-run channel discovery
    Rescan,
    /// Surface a transport error to the user
    ReportError(String),
}

/// Handshake link to one sensor board.
///
/// Owns the protocol state and the render snapshot; performs no I/O itself.
/// The driver feeds [`LinkEvent`]s through [`Link::handle`] and executes the
/// returned [`LinkAction`]s against the real channel.
pub struct Link {
    config: LinkConfig,
    state: LinkState,
    render: Option<RenderState>,
}

impl Link {
    pub fn new(config: LinkConfig) -> Self {
        Link {
            config,
            state: LinkState::NoChannel,
            render: None,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Snapshot for the renderer, absent until the first parsed reading
    pub fn render_state(&self) -> Option<&RenderState> {
        self.render.as_ref()
    }

    /// Routes one event through the state machine
    pub fn handle(&mut self, event: LinkEvent) -> Vec<LinkAction> {
        use LinkAction::*;
        use LinkState::*;

        match (self.state, event) {
            (NoChannel, LinkEvent::SelectRequested) => {
                self.transition(Selecting);
                vec![]
            }
            (Selecting, LinkEvent::Opened) => {
                self.transition(Open);
                self.transition(AwaitingFrame);
                vec![HideSelector, SendPrompt]
            }
            (AwaitingFrame, LinkEvent::Line(line)) => self.process_line(&line),
            (NoChannel, LinkEvent::Attached) => vec![Rescan],
            (_, LinkEvent::Disconnected) => {
                self.transition(NoChannel);
                vec![ShowSelector]
            }
            (_, LinkEvent::TransportError(message)) => {
                self.transition(Closed);
                vec![ReportError(message)]
            }
            (_, LinkEvent::CloseRequested) => {
                self.transition(NoChannel);
                vec![ShowSelector]
            }
            (state, event) => {
                log::debug!("ignoring {:?} in state {:?}", event, state);
                vec![]
            }
        }
    }

    fn process_line(&mut self, line: &str) -> Vec<LinkAction> {
        use LinkAction::*;

        self.transition(LinkState::Processing);
        let actions = match line.parse::<Frame>() {
            Ok(Frame::Greeting) => match self.config.greeting {
                GreetingPolicy::Discard => {
                    log::debug!("discarding greeting without re-arming the prompt");
                    vec![]
                }
                GreetingPolicy::Reprompt => vec![SendPrompt],
            },
            Ok(Frame::Reading(reading)) => {
                self.render = Some(RenderState::from_reading(&reading, &self.config));
                vec![SendPrompt]
            }
            Err(err) => {
                // Malformed lines are dropped without a prompt; the link
                // stalls until the board sends something unsolicited
                log::debug!("discarding line {:?}: {}", line, err);
                vec![]
            }
        };
        self.transition(LinkState::AwaitingFrame);
        actions
    }

    fn transition(&mut self, next: LinkState) {
        log::trace!("link state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

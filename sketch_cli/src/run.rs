use futures::{future, SinkExt, StreamExt};
use sensorlink::{LineCodec, Link, LinkAction, LinkConfig, LinkEvent, Prompt};
use simple_eyre::{eyre::eyre, Result};
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tokio_util::codec::Framed;

use crate::{canvas, cli::RunConf};

pub async fn run_sketch(conf: &RunConf) -> Result<()> {
    let mut link = Link::new(LinkConfig {
        canvas_width: conf.canvas.width,
        canvas_height: conf.canvas.height,
        greeting: conf.greeting.into(),
        ..LinkConfig::default()
    });

    let root = conf.canvas.drawing_area()?;
    let mut ticker = interval(Duration::from_millis(conf.canvas.tick_millis()));
    // A reconnect wait must not burst a backlog of identical frames
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let deadline = conf.duration.as_ref().map(|d| Instant::now() + d.0);

    'session: loop {
        // Discovery comes first; the link only selects an existing candidate
        let port_name = match conf.serial.discover()? {
            Some(name) => name,
            None if conf.reconnect => {
                log::info!("no device connected, waiting for one to appear");
                let name = conf.serial.wait_for_port().await?;
                link.handle(LinkEvent::Attached);
                name
            }
            None => {
                log::warn!("no connected serial ports found");
                break 'session;
            }
        };

        link.handle(LinkEvent::SelectRequested);
        let stream = match conf.serial.open(&port_name) {
            Ok(stream) => stream,
            Err(err) => return fail(&mut link, err.to_string()),
        };
        let mut channel = Framed::new(stream, LineCodec::new());
        log::info!("port {} open", port_name);
        for action in link.handle(LinkEvent::Opened) {
            if let LinkAction::SendPrompt = action {
                channel.send(Prompt).await?;
            }
        }

        loop {
            tokio::select! {
                item = channel.next() => match item {
                    Some(Ok(line)) => {
                        for action in link.handle(LinkEvent::Line(line)) {
                            if let LinkAction::SendPrompt = action {
                                channel.send(Prompt).await?;
                            }
                        }
                    }
                    Some(Err(err)) => return fail(&mut link, err.to_string()),
                    None => {
                        for action in link.handle(LinkEvent::Disconnected) {
                            if let LinkAction::ShowSelector = action {
                                log::warn!("device disconnected");
                            }
                        }
                        if conf.reconnect {
                            continue 'session;
                        }
                        break 'session;
                    }
                },
                _ = ticker.tick() => canvas::draw_tick(&root, link.render_state())?,
                _ = wait_for_deadline(deadline) => {
                    link.handle(LinkEvent::CloseRequested);
                    break 'session;
                }
                _ = tokio::signal::ctrl_c() => {
                    link.handle(LinkEvent::CloseRequested);
                    break 'session;
                }
            }
        }
    }

    // Flush the last state so short sessions still produce an image
    canvas::draw_tick(&root, link.render_state())?;
    println!("Sketch written to {:?}", conf.canvas.output);
    Ok(())
}

/// Surfaces a transport error to the user and leaves the channel closed; the
/// link never retries on its own
fn fail(link: &mut Link, message: String) -> Result<()> {
    for action in link.handle(LinkEvent::TransportError(message.clone())) {
        if let LinkAction::ReportError(report) = action {
            return Err(eyre!("Serial link error: {report}"));
        }
    }
    Err(eyre!("Serial link error: {message}"))
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}

use futures::{SinkExt, StreamExt};
use sensorlink::{LineCodec, Link, LinkAction, LinkConfig, LinkEvent, LinkState, Prompt};
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt};
use tokio_util::codec::Framed;

type Channel = Framed<tokio::io::DuplexStream, LineCodec>;

async fn apply(actions: Vec<LinkAction>, channel: &mut Channel) -> usize {
    let mut sent = 0;
    for action in actions {
        if let LinkAction::SendPrompt = action {
            channel.send(Prompt).await.unwrap();
            sent += 1;
        }
    }
    sent
}

#[tokio::test]
async fn handshake_round_trip() {
    let (host, mut board) = duplex(256);
    let mut channel = Framed::new(host, LineCodec::new());
    let mut link = Link::new(LinkConfig::default());

    link.handle(LinkEvent::SelectRequested);
    let actions = link.handle(LinkEvent::Opened);
    assert_eq!(apply(actions, &mut channel).await, 1);

    // The board sees the opening prompt before it says anything
    let mut byte = [0u8; 1];
    board.read_exact(&mut byte).await.unwrap();
    assert_eq!(&byte, b"x");

    board.write_all(b"512,768,1\r\n").await.unwrap();
    let line = channel.next().await.unwrap().unwrap();
    let actions = link.handle(LinkEvent::Line(line));
    assert_eq!(apply(actions, &mut channel).await, 1);

    board.read_exact(&mut byte).await.unwrap();
    assert_eq!(&byte, b"x");

    assert_eq!(link.state(), LinkState::AwaitingFrame);
    let state = link.render_state().unwrap();
    assert!((state.loc_h - 200.1955).abs() < 1e-3);
    assert_eq!(state.shade, 0.0);
}

#[tokio::test]
async fn greeting_consumes_a_turn() {
    let (host, mut board) = duplex(256);
    let mut channel = Framed::new(host, LineCodec::new());
    let mut link = Link::new(LinkConfig::default());

    link.handle(LinkEvent::SelectRequested);
    let actions = link.handle(LinkEvent::Opened);
    apply(actions, &mut channel).await;

    // Greeting arrives first, as on a board reset
    board.write_all(b"hello\r\n").await.unwrap();
    let line = channel.next().await.unwrap().unwrap();
    let actions = link.handle(LinkEvent::Line(line));
    assert_eq!(apply(actions, &mut channel).await, 0);
    assert!(link.render_state().is_none());

    // The board follows up unprompted and the exchange resumes
    board.write_all(b"1,2,3\r\n").await.unwrap();
    let line = channel.next().await.unwrap().unwrap();
    let actions = link.handle(LinkEvent::Line(line));
    assert_eq!(apply(actions, &mut channel).await, 1);
    assert!(link.render_state().is_some());
}

#[tokio::test]
async fn line_split_across_writes_decodes_once() {
    let (host, mut board) = duplex(256);
    let mut channel = Framed::new(host, LineCodec::new());

    board.write_all(b"512,7").await.unwrap();
    board.write_all(b"68,1\r").await.unwrap();
    board.write_all(b"\n").await.unwrap();

    let line = channel.next().await.unwrap().unwrap();
    assert_eq!(line, "512,768,1");
}

#[tokio::test]
async fn board_hangup_surfaces_as_disconnect() {
    let (host, board) = duplex(256);
    let mut channel = Framed::new(host, LineCodec::new());
    let mut link = Link::new(LinkConfig::default());

    link.handle(LinkEvent::SelectRequested);
    link.handle(LinkEvent::Opened);

    drop(board);
    assert!(channel.next().await.is_none());

    let actions = link.handle(LinkEvent::Disconnected);
    assert_eq!(actions, vec![LinkAction::ShowSelector]);
    assert_eq!(link.state(), LinkState::NoChannel);
}

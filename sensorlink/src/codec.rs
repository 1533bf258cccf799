use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::Error;

/// Byte that asks the board for its next line
pub const PROMPT_BYTE: u8 = b'x';

/// Upper bound on a buffered line, far above any real sensor triplet
pub const MAX_LINE_LEN: usize = 256;

/// Request for the next line of the exchange
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Prompt;

/// Frames CR-LF terminated text lines and encodes prompt bytes.
///
/// A lone LF does not terminate a line; it stays part of the payload until a
/// full CR-LF arrives.
pub struct LineCodec {
    // Scan position left over from previous calls, avoids rescanning the
    // buffer on every partial read
    next_index: usize,
}

impl LineCodec {
    pub fn new() -> Self {
        LineCodec { next_index: 0 }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        LineCodec::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, Error> {
        if let Some(pos) = src[self.next_index..]
            .windows(2)
            .position(|pair| pair == b"\r\n")
        {
            let end = self.next_index + pos;
            let line = src.split_to(end + 2);
            self.next_index = 0;
            let body = &line[..line.len() - 2];
            return Ok(Some(String::from_utf8_lossy(body).into_owned()));
        }
        if src.len() > MAX_LINE_LEN {
            return Err(Error::LineTooLong(MAX_LINE_LEN));
        }
        // A trailing CR may still pair with the LF of the next read
        self.next_index = src.len().saturating_sub(1);
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                if !src.is_empty() {
                    log::debug!("dropping {} unterminated bytes at end of stream", src.len());
                    src.clear();
                }
                Ok(None)
            }
        }
    }
}

impl Encoder<Prompt> for LineCodec {
    type Error = Error;

    fn encode(&mut self, _item: Prompt, dst: &mut BytesMut) -> Result<(), Error> {
        dst.extend_from_slice(&[PROMPT_BYTE]);
        Ok(())
    }
}

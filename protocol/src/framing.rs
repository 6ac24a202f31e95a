//! Length framing for the battle stream
//!
//! Every frame travels as a big-endian `u32` byte count followed by the frame
//! itself. A transport message may carry several frames, or split one frame
//! across messages, so bytes are buffered until a whole frame is present.

use byteorder::{ByteOrder, WriteBytesExt};

use crate::StreamError;
use crate::wire::WireEndian;

/// Largest frame accepted before the stream is considered desynchronized
pub const MAX_FRAME_LEN: usize = 1 << 20;

const HEADER_LEN: usize = 4;

/// Prefix a frame with its length for transmission
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.write_u32::<WireEndian>(payload.len() as u32).ok();
    out.extend_from_slice(payload);
    out
}

/// Accumulates stream bytes and yields complete frames in order
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes received from the transport
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of buffered bytes not yet returned as a frame
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Pop the next complete frame.
    ///
    /// Returns `Ok(None)` while the next frame is still incomplete.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        if self.buf.len() < HEADER_LEN {
            return Ok(None);
        }

        let length = WireEndian::read_u32(&self.buf[..HEADER_LEN]) as usize;
        if length > MAX_FRAME_LEN {
            return Err(StreamError::FrameTooLarge {
                length,
                max: MAX_FRAME_LEN,
            });
        }

        if self.buf.len() < HEADER_LEN + length {
            return Ok(None);
        }

        let frame = self.buf[HEADER_LEN..HEADER_LEN + length].to_vec();
        self.buf.drain(..HEADER_LEN + length);
        Ok(Some(frame))
    }

    /// Drain every complete frame currently buffered
    pub fn drain_frames(&mut self) -> Result<Vec<Vec<u8>>, StreamError> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }
}

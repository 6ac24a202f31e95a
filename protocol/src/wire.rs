//! Big-endian primitives shared by the inbound and outbound codecs
//!
//! Strings are a `u32` byte length followed by UTF-8 bytes. A length of
//! `0xFFFF_FFFF` is the null string and decodes as empty.

use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::DecodeError;

pub(crate) type WireEndian = BigEndian;

const NULL_STRING: u32 = 0xFFFF_FFFF;

/// Cursor over one frame's payload, tagged with the command being decoded
/// so truncation errors say where they happened.
pub(crate) struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
    command: &'static str,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8], command: &'static str) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            command,
        }
    }

    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(DecodeError::Truncated {
                command: self.command,
                needed: needed - remaining,
            });
        }
        Ok(())
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            command: self.command,
            needed: needed.saturating_sub(self.remaining()).max(1),
        }
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        self.cursor.read_u8().map_err(|_| self.truncated(1))
    }

    pub fn i8(&mut self) -> Result<i8, DecodeError> {
        self.ensure(1)?;
        self.cursor.read_i8().map_err(|_| self.truncated(1))
    }

    pub fn bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.u8()? != 0)
    }

    pub fn u16(&mut self) -> Result<u16, DecodeError> {
        self.ensure(2)?;
        self.cursor
            .read_u16::<WireEndian>()
            .map_err(|_| self.truncated(2))
    }

    pub fn i16(&mut self) -> Result<i16, DecodeError> {
        self.ensure(2)?;
        self.cursor
            .read_i16::<WireEndian>()
            .map_err(|_| self.truncated(2))
    }

    pub fn i32(&mut self) -> Result<i32, DecodeError> {
        self.ensure(4)?;
        self.cursor
            .read_i32::<WireEndian>()
            .map_err(|_| self.truncated(4))
    }

    pub fn u32(&mut self) -> Result<u32, DecodeError> {
        self.ensure(4)?;
        self.cursor
            .read_u32::<WireEndian>()
            .map_err(|_| self.truncated(4))
    }

    pub fn string(&mut self) -> Result<String, DecodeError> {
        let len = self.u32()?;
        if len == NULL_STRING {
            return Ok(String::new());
        }

        let len = len as usize;
        self.ensure(len)?;

        let mut buf = vec![0; len];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| self.truncated(len))?;

        String::from_utf8(buf).map_err(|_| DecodeError::InvalidString {
            command: self.command,
        })
    }
}

/// Append-only big-endian buffer builder.
///
/// Writes go to a `Vec<u8>`, which cannot fail, so io results are dropped.
#[derive(Debug, Default)]
pub(crate) struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn i8(&mut self, value: i8) -> &mut Self {
        self.buf.push(value as u8);
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.u8(u8::from(value))
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.buf.write_u16::<WireEndian>(value).ok();
        self
    }

    pub fn i16(&mut self, value: i16) -> &mut Self {
        self.buf.write_i16::<WireEndian>(value).ok();
        self
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.buf.write_i32::<WireEndian>(value).ok();
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.buf.write_u32::<WireEndian>(value).ok();
        self
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

use crate::{charset::Charset, error::Error};

/// Append-only byte accumulator for mixed binary and text commands.
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    buf: Vec<u8>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        CommandBuffer { buf: Vec::new() }
    }

    pub fn append(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn push(&mut self, byte: u8) -> &mut Self {
        self.buf.push(byte);
        self
    }

    /// Append `text` encoded with `charset`.
    ///
    /// Nothing is appended when the text can not be encoded.
    pub fn append_str(&mut self, text: &str, charset: Charset) -> Result<&mut Self, Error> {
        let mut encoded = charset.encode(text)?;
        self.buf.append(&mut encoded);
        Ok(self)
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Take the accumulated bytes, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

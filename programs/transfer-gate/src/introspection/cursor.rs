//! Bounds-checked reader over the untrusted sysvar buffer
//!
//! Every length field read from the buffer must be validated against the
//! remaining buffer size before it is used to compute the next offset.
//! This type is the only place offset arithmetic happens; callers never
//! index the raw buffer themselves.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

use crate::error::GateError;

/// Forward-only reader over a byte buffer.
///
/// Reads either return the requested bytes and advance the position, or
/// fail with [`GateError::MalformedSysvar`] and leave the position
/// untouched.
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Take the next `len` bytes, advancing on success only
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ProgramError> {
        if len > self.remaining() {
            return Err(GateError::MalformedSysvar.into());
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, ProgramError> {
        let bytes = self.read_slice(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ProgramError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, ProgramError> {
        let bytes = self.read_slice(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey, ProgramError> {
        let bytes = self.read_slice(32)?;
        let mut pubkey = [0u8; 32];
        pubkey.copy_from_slice(bytes);
        Ok(pubkey)
    }
}

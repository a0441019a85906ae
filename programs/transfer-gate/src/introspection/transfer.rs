//! Native transfer decoding
//!
//! Closed single-variant decoding: the gate accepts exactly one
//! instruction shape (SystemProgram transfer) and rejects everything
//! else, including instructions that merely resemble a transfer under a
//! different program id.

use pinocchio::program_error::ProgramError;

use super::sysvar::InstructionRecord;
use crate::error::GateError;

/// SystemProgram transfer discriminant (u32 LE tag 2)
pub const TRANSFER_DISCRIMINANT: [u8; 4] = [2, 0, 0, 0];

/// Transfer payload size: 4-byte discriminant + 8-byte lamports
pub const TRANSFER_DATA_LEN: usize = 12;

/// Decoded view of a native transfer payload
#[derive(Debug, PartialEq, Eq)]
pub struct TransferInstruction {
    pub lamports: u64,
}

/// Decode a record as a native SystemProgram transfer.
///
/// The program-id check comes first: an instruction whose payload happens
/// to parse as a transfer is still rejected when it is addressed to any
/// other program.
pub fn decode_transfer(record: &InstructionRecord) -> Result<TransferInstruction, ProgramError> {
    if record.program_id() != &pinocchio_system::ID {
        return Err(GateError::WrongInstructionType.into());
    }

    let data = record.data();
    if data.len() < TRANSFER_DATA_LEN {
        return Err(GateError::MalformedSysvar.into());
    }

    if data[0..4] != TRANSFER_DISCRIMINANT {
        return Err(GateError::WrongInstructionType.into());
    }

    let lamports = u64::from_le_bytes(data[4..12].try_into().unwrap());
    Ok(TransferInstruction { lamports })
}

//! Transfer verification pipeline
//!
//! Locate -> decode -> compare recipient -> compare amount, in that fixed
//! order, short-circuiting on the first failure. Pure given the sysvar
//! buffer and the request; no state survives a call.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

use super::sysvar::load_instruction_at;
use super::transfer::decode_transfer;
use crate::error::GateError;

/// Recipient position in a native transfer's account list (funder is 0)
pub const TRANSFER_RECIPIENT_INDEX: usize = 1;

/// Caller-declared expectation, untrusted until verified
#[derive(Debug, PartialEq, Eq)]
pub struct VerificationRequest {
    pub expected_recipient: Pubkey,
    pub expected_amount: u64,
    pub instruction_index: usize,
}

impl VerificationRequest {
    /// Serialized size: recipient (32) + amount (8) + index (2)
    pub const LEN: usize = 42;

    /// Parse a request from instruction data.
    pub fn parse(data: &[u8]) -> Result<Self, ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::InvalidInstructionData);
        }

        let mut expected_recipient = [0u8; 32];
        expected_recipient.copy_from_slice(&data[0..32]);
        let expected_amount = u64::from_le_bytes(data[32..40].try_into().unwrap());
        let instruction_index = u16::from_le_bytes(data[40..42].try_into().unwrap()) as usize;

        Ok(Self {
            expected_recipient,
            expected_amount,
            instruction_index,
        })
    }
}

/// Verify that the instruction at the requested index is a native
/// transfer to the expected recipient for the exact expected amount.
///
/// Failure kinds, first applicable wins:
/// - `InvalidInstructionIndex` - index not below the declared count
/// - `MalformedSysvar` - buffer or record truncated/inconsistent
/// - `WrongInstructionType` - not a SystemProgram transfer
/// - `RecipientMismatch` - recipient is not the expected key
/// - `InvalidAmount` - amount differs from the expected lamports
pub fn verify_transfer_at(
    data: &[u8],
    request: &VerificationRequest,
) -> Result<(), ProgramError> {
    let record = load_instruction_at(data, request.instruction_index)?;
    let transfer = decode_transfer(&record)?;

    // Native-transfer convention: account 0 funds, account 1 receives.
    // A transfer-shaped record without a second account has no recipient
    // to match.
    let recipient = record
        .account_at(TRANSFER_RECIPIENT_INDEX)
        .ok_or(GateError::RecipientMismatch)?;
    if recipient.pubkey != request.expected_recipient {
        return Err(GateError::RecipientMismatch.into());
    }

    // Exact equality, no tolerance, no unit conversion
    if transfer.lamports != request.expected_amount {
        return Err(GateError::InvalidAmount.into());
    }

    Ok(())
}

//! Verify-transfer instruction (Pinocchio)
//!
//! Checks that the instruction at a caller-declared index in the current
//! transaction is a native SOL transfer to the expected recipient for the
//! exact expected amount. The runtime aborts the whole transaction when
//! this handler fails, so a caller cannot claim a payment it did not
//! bundle.

use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};

use crate::introspection::{verify_transfer_at, VerificationRequest, INSTRUCTIONS_SYSVAR_ID};

/// Verify a native transfer within this transaction
///
/// # Accounts
/// 0. `[]` Instructions sysvar
///
/// # Instruction data
/// - expected_recipient: [u8; 32]
/// - expected_amount: u64 (lamports)
/// - instruction_index: u16
pub fn process_verify_transfer(
    _program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    if accounts.is_empty() {
        return Err(ProgramError::NotEnoughAccountKeys);
    }

    let instructions_sysvar = &accounts[0];

    // The sysvar address must be checked before trusting the account
    // data; any account can carry bytes shaped like an instruction list.
    if instructions_sysvar.key() != &INSTRUCTIONS_SYSVAR_ID {
        return Err(ProgramError::UnsupportedSysvar);
    }

    let request = VerificationRequest::parse(data)?;

    let sysvar_data = instructions_sysvar.try_borrow_data()?;
    verify_transfer_at(&sysvar_data, &request)?;

    pinocchio::msg!("verified native transfer instruction");
    Ok(())
}

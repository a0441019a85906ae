//! transfer-gate - Transaction Introspection Gate (Pinocchio)
//!
//! Verifies that another instruction in the same transaction is a native
//! SOL transfer to an expected recipient for an exact amount, by reading
//! the instructions sysvar. Callers bundle a System-program transfer and a
//! `VERIFY_TRANSFER` instruction into one transaction; if the transfer is
//! missing or does not match, the whole transaction aborts.
//!
//! ## Core Flow
//!
//! ```text
//! Transfer ix (SystemProgram) ─┐
//!                              ├── same transaction
//! VerifyTransfer ix (gate) ────┘
//!         │
//!         ├── load record at requested index from instructions sysvar
//!         ├── decode native transfer (program id + discriminant + amount)
//!         ├── compare recipient (account 1 of the transfer)
//!         └── compare amount (exact lamports)
//! ```
//!
//! Every byte of the sysvar buffer is attacker-influenced (the caller
//! chooses which instructions precede the gate), so all reads are
//! bounds-checked before use.

use pinocchio::{
    account_info::AccountInfo,
    entrypoint,
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};

pub mod error;
pub mod instructions;
pub mod introspection;

/// Program ID (update after deployment)
pub const ID: Pubkey = [
    0x2c, 0x8f, 0x1a, 0x6e, 0x93, 0x47, 0x5b, 0xd2,
    0x0e, 0x71, 0xc4, 0x38, 0xa5, 0x6f, 0x92, 0x1d,
    0x4b, 0xe8, 0x37, 0x5a, 0xc1, 0x29, 0x8d, 0x64,
    0xf3, 0x0b, 0x76, 0xa2, 0x5e, 0x19, 0xc8, 0x41,
];

/// Instruction discriminators
pub mod instruction {
    /// Verify a native transfer earlier in this transaction
    pub const VERIFY_TRANSFER: u8 = 0;
}

entrypoint!(process_instruction);

/// Main entrypoint - routes to instruction handlers
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let (discriminator, data) = instruction_data
        .split_first()
        .ok_or(ProgramError::InvalidInstructionData)?;

    match *discriminator {
        instruction::VERIFY_TRANSFER => {
            instructions::process_verify_transfer(program_id, accounts, data)
        }
        _ => Err(ProgramError::InvalidInstructionData),
    }
}

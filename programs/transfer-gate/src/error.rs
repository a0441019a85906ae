//! Error definitions for the transfer-gate program

use pinocchio::program_error::ProgramError;
use thiserror::Error;

/// Custom error codes for transfer-gate
/// Starting at 6000 to avoid conflicts with system errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GateError {
    #[error("Invalid instruction index")]
    InvalidInstructionIndex = 6000,

    #[error("Malformed instructions sysvar data")]
    MalformedSysvar = 6001,

    #[error("Not a SystemProgram transfer")]
    WrongInstructionType = 6002,

    #[error("Wrong recipient public key")]
    RecipientMismatch = 6003,

    #[error("Wrong transfer amount")]
    InvalidAmount = 6004,
}

impl From<GateError> for ProgramError {
    fn from(e: GateError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

//! Instructions-sysvar accessor
//!
//! Read-only view over the serialized instruction list of the current
//! transaction. The buffer layout is self-describing and length-prefixed,
//! all integers little-endian:
//!
//! ```text
//! u16          instruction count
//! per record:
//!   [u8; 32]   program id
//!   u16        account-reference count
//!   per account:
//!     u8       flags (bit 0 = signer, bit 1 = writable)
//!     [u8;32]  account pubkey
//!   u16        payload length
//!   [u8; ..]   payload bytes
//! ```
//!
//! Records are variable-length, so reaching index `i` walks records
//! `0..i`. A record returned from [`load_instruction_at`] is fully
//! in-bounds; downstream decoding never re-validates lengths.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

use super::cursor::Cursor;
use crate::error::GateError;

/// Sysvar1nstructions1111111111111111111111111
pub const INSTRUCTIONS_SYSVAR_ID: Pubkey = [
    0x06, 0xa7, 0xd5, 0x17, 0x18, 0x7b, 0xd1, 0x66,
    0x35, 0xda, 0xd4, 0x04, 0x55, 0xfd, 0xc2, 0xc0,
    0xc1, 0x24, 0xc6, 0x8f, 0x21, 0x56, 0x75, 0xa5,
    0xdb, 0xba, 0xcb, 0x5f, 0x08, 0x00, 0x00, 0x00,
];

/// Bit position for the signer flag in an account reference
pub const IS_SIGNER_BIT: u8 = 0;

/// Bit position for the writable flag in an account reference
pub const IS_WRITABLE_BIT: u8 = 1;

/// Serialized size of one account reference (flags byte + pubkey)
pub const ACCOUNT_REF_LEN: usize = 33;

/// One participant of an introspected instruction
#[derive(Debug)]
pub struct AccountRef {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Borrowed view of one instruction in the transaction.
///
/// The account-reference region and payload point into the sysvar buffer;
/// nothing is allocated.
#[derive(Debug)]
pub struct InstructionRecord<'a> {
    program_id: Pubkey,
    accounts: &'a [u8],
    data: &'a [u8],
}

impl<'a> InstructionRecord<'a> {
    /// Program this instruction is addressed to
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Number of account references
    pub fn account_count(&self) -> usize {
        self.accounts.len() / ACCOUNT_REF_LEN
    }

    /// Account reference at `index`, or `None` if out of range.
    ///
    /// The backing region was bounds-checked when the record was decoded,
    /// so in-range access cannot fail.
    pub fn account_at(&self, index: usize) -> Option<AccountRef> {
        if index >= self.account_count() {
            return None;
        }

        let at = index * ACCOUNT_REF_LEN;
        let flags = self.accounts[at];
        let mut pubkey = [0u8; 32];
        pubkey.copy_from_slice(&self.accounts[at + 1..at + ACCOUNT_REF_LEN]);

        Some(AccountRef {
            pubkey,
            is_signer: flags & (1 << IS_SIGNER_BIT) != 0,
            is_writable: flags & (1 << IS_WRITABLE_BIT) != 0,
        })
    }

    /// Opaque instruction payload
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Number of instructions declared in the sysvar header.
///
/// Fails with `MalformedSysvar` if the buffer is shorter than the header.
pub fn instruction_count(data: &[u8]) -> Result<usize, ProgramError> {
    let mut cursor = Cursor::new(data);
    Ok(cursor.read_u16_le()? as usize)
}

/// Decode the instruction record at `index`.
///
/// Fails with `InvalidInstructionIndex` if `index` is not below the
/// declared count, and with `MalformedSysvar` if any declared sub-length
/// would read past the buffer end.
pub fn load_instruction_at(data: &[u8], index: usize) -> Result<InstructionRecord<'_>, ProgramError> {
    let mut cursor = Cursor::new(data);

    let count = cursor.read_u16_le()? as usize;
    if index >= count {
        return Err(GateError::InvalidInstructionIndex.into());
    }

    // Walk past the records before the target
    for _ in 0..index {
        decode_record(&mut cursor)?;
    }
    decode_record(&mut cursor)
}

fn decode_record<'a>(cursor: &mut Cursor<'a>) -> Result<InstructionRecord<'a>, ProgramError> {
    let program_id = cursor.read_pubkey()?;

    let account_count = cursor.read_u16_le()? as usize;
    let accounts = cursor.read_slice(account_count * ACCOUNT_REF_LEN)?;

    let data_len = cursor.read_u16_le()? as usize;
    let data = cursor.read_slice(data_len)?;

    Ok(InstructionRecord {
        program_id,
        accounts,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::testing::{encode_account, encode_record, encode_sysvar};

    fn key(byte: u8) -> Pubkey {
        [byte; 32]
    }

    #[test]
    fn test_sysvar_id_matches_sdk() {
        assert_eq!(
            INSTRUCTIONS_SYSVAR_ID,
            solana_sdk::sysvar::instructions::ID.to_bytes()
        );
    }

    #[test]
    fn test_instruction_count() {
        let buffer = encode_sysvar(&[]);
        assert_eq!(instruction_count(&buffer).unwrap(), 0);

        let buffer = encode_sysvar(&[encode_record(&key(1), &[], &[])]);
        assert_eq!(instruction_count(&buffer).unwrap(), 1);
    }

    #[test]
    fn test_count_fails_on_short_header() {
        assert_eq!(
            instruction_count(&[]),
            Err(GateError::MalformedSysvar.into())
        );
        assert_eq!(
            instruction_count(&[1]),
            Err(GateError::MalformedSysvar.into())
        );
    }

    #[test]
    fn test_round_trip_at_every_index() {
        let records = vec![
            encode_record(&key(1), &[encode_account(&key(10), true, true)], &[0xaa]),
            encode_record(
                &key(2),
                &[
                    encode_account(&key(20), true, false),
                    encode_account(&key(21), false, true),
                ],
                &[0xbb, 0xcc, 0xdd],
            ),
            encode_record(&key(3), &[], &[]),
        ];
        let buffer = encode_sysvar(&records);

        let first = load_instruction_at(&buffer, 0).unwrap();
        assert_eq!(first.program_id(), &key(1));
        assert_eq!(first.account_count(), 1);
        assert_eq!(first.data(), &[0xaa]);

        let second = load_instruction_at(&buffer, 1).unwrap();
        assert_eq!(second.program_id(), &key(2));
        assert_eq!(second.account_count(), 2);
        assert_eq!(second.data(), &[0xbb, 0xcc, 0xdd]);

        let funder = second.account_at(0).unwrap();
        assert_eq!(funder.pubkey, key(20));
        assert!(funder.is_signer);
        assert!(!funder.is_writable);

        let recipient = second.account_at(1).unwrap();
        assert_eq!(recipient.pubkey, key(21));
        assert!(!recipient.is_signer);
        assert!(recipient.is_writable);

        assert!(second.account_at(2).is_none());

        let third = load_instruction_at(&buffer, 2).unwrap();
        assert_eq!(third.program_id(), &key(3));
        assert_eq!(third.account_count(), 0);
        assert_eq!(third.data(), &[] as &[u8]);
    }

    #[test]
    fn test_index_out_of_range() {
        let buffer = encode_sysvar(&[encode_record(&key(1), &[], &[])]);

        assert_eq!(
            load_instruction_at(&buffer, 1).unwrap_err(),
            GateError::InvalidInstructionIndex.into()
        );
        assert_eq!(
            load_instruction_at(&buffer, usize::MAX).unwrap_err(),
            GateError::InvalidInstructionIndex.into()
        );

        let empty = encode_sysvar(&[]);
        assert_eq!(
            load_instruction_at(&empty, 0).unwrap_err(),
            GateError::InvalidInstructionIndex.into()
        );
    }

    #[test]
    fn test_out_of_range_index_wins_over_malformed_tail() {
        // Header parses, index is out of range, and the record bytes are
        // garbage: the index check must fire first.
        let mut buffer = 1u16.to_le_bytes().to_vec();
        buffer.extend_from_slice(&[0xff; 5]);

        assert_eq!(
            load_instruction_at(&buffer, 5).unwrap_err(),
            GateError::InvalidInstructionIndex.into()
        );
    }

    #[test]
    fn test_declared_count_exceeds_records() {
        // Header promises two records but only one is present
        let mut buffer = 2u16.to_le_bytes().to_vec();
        buffer.extend_from_slice(&encode_record(&key(1), &[], &[]));

        assert_eq!(
            load_instruction_at(&buffer, 1).unwrap_err(),
            GateError::MalformedSysvar.into()
        );
    }

    #[test]
    fn test_truncation_at_every_layer() {
        let record = encode_record(
            &key(1),
            &[encode_account(&key(10), true, true)],
            &[0xaa, 0xbb],
        );
        let buffer = encode_sysvar(&[record]);

        // Chopping the buffer anywhere inside the record must fail with
        // MalformedSysvar, never panic or misread.
        for len in 2..buffer.len() {
            assert_eq!(
                load_instruction_at(&buffer[..len], 0).unwrap_err(),
                GateError::MalformedSysvar.into(),
                "truncated at {len}"
            );
        }
    }

    #[test]
    fn test_oversized_account_count_rejected() {
        // Record declares u16::MAX accounts in a tiny buffer
        let mut buffer = 1u16.to_le_bytes().to_vec();
        buffer.extend_from_slice(&key(1));
        buffer.extend_from_slice(&u16::MAX.to_le_bytes());

        assert_eq!(
            load_instruction_at(&buffer, 0).unwrap_err(),
            GateError::MalformedSysvar.into()
        );
    }

    #[test]
    fn test_oversized_payload_length_rejected() {
        let mut buffer = 1u16.to_le_bytes().to_vec();
        buffer.extend_from_slice(&key(1));
        buffer.extend_from_slice(&0u16.to_le_bytes());
        buffer.extend_from_slice(&u16::MAX.to_le_bytes());
        buffer.push(0xaa);

        assert_eq!(
            load_instruction_at(&buffer, 0).unwrap_err(),
            GateError::MalformedSysvar.into()
        );
    }
}

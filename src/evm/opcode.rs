// Mon Oct 19 2026 - Alex

use once_cell::sync::Lazy;

pub const PUSH0: u8 = 0x5F;
pub const PUSH1: u8 = 0x60;
pub const PUSH32: u8 = 0x7F;
pub const GAS: u8 = 0x5A;
pub const STATICCALL: u8 = 0xFA;

static OPCODE_TABLE: Lazy<OpcodeTable> = Lazy::new(OpcodeTable::build);

/// Byte to mnemonic lookup, built once and shared by every worker.
///
/// Bytes without an assigned instruction resolve to `unknown_0x<hex>`
/// instead of failing, so decoding stays total.
pub struct OpcodeTable {
    names: Vec<String>,
    known: [bool; 256],
}

impl OpcodeTable {
    pub fn global() -> &'static OpcodeTable {
        &OPCODE_TABLE
    }

    fn build() -> Self {
        let mut names = Vec::with_capacity(256);
        let mut known = [false; 256];

        for byte in 0..=255u8 {
            match Self::assigned_name(byte) {
                Some(name) => {
                    known[byte as usize] = true;
                    names.push(name);
                }
                None => names.push(placeholder(byte)),
            }
        }

        Self { names, known }
    }

    fn assigned_name(byte: u8) -> Option<String> {
        let name = match byte {
            0x60..=0x7F => return Some(format!("PUSH{}", byte - PUSH0)),
            0x80..=0x8F => return Some(format!("DUP{}", byte - 0x7F)),
            0x90..=0x9F => return Some(format!("SWAP{}", byte - 0x8F)),
            0xA0..=0xA4 => return Some(format!("LOG{}", byte - 0xA0)),
            0x00 => "STOP",
            0x01 => "ADD",
            0x02 => "MUL",
            0x03 => "SUB",
            0x04 => "DIV",
            0x05 => "SDIV",
            0x06 => "MOD",
            0x07 => "SMOD",
            0x08 => "ADDMOD",
            0x09 => "MULMOD",
            0x0A => "EXP",
            0x0B => "SIGNEXTEND",
            0x10 => "LT",
            0x11 => "GT",
            0x12 => "SLT",
            0x13 => "SGT",
            0x14 => "EQ",
            0x15 => "ISZERO",
            0x16 => "AND",
            0x17 => "OR",
            0x18 => "XOR",
            0x19 => "NOT",
            0x1A => "BYTE",
            0x1B => "SHL",
            0x1C => "SHR",
            0x1D => "SAR",
            0x20 => "KECCAK256",
            0x30 => "ADDRESS",
            0x31 => "BALANCE",
            0x32 => "ORIGIN",
            0x33 => "CALLER",
            0x34 => "CALLVALUE",
            0x35 => "CALLDATALOAD",
            0x36 => "CALLDATASIZE",
            0x37 => "CALLDATACOPY",
            0x38 => "CODESIZE",
            0x39 => "CODECOPY",
            0x3A => "GASPRICE",
            0x3B => "EXTCODESIZE",
            0x3C => "EXTCODECOPY",
            0x3D => "RETURNDATASIZE",
            0x3E => "RETURNDATACOPY",
            0x3F => "EXTCODEHASH",
            0x40 => "BLOCKHASH",
            0x41 => "COINBASE",
            0x42 => "TIMESTAMP",
            0x43 => "NUMBER",
            0x44 => "DIFFICULTY",
            0x45 => "GASLIMIT",
            0x46 => "CHAINID",
            0x48 => "BASEFEE",
            0x50 => "POP",
            0x51 => "MLOAD",
            0x52 => "MSTORE",
            0x53 => "MSTORE8",
            0x54 => "SLOAD",
            0x55 => "SSTORE",
            0x56 => "JUMP",
            0x57 => "JUMPI",
            0x58 => "GETPC",
            0x59 => "MSIZE",
            0x5A => "GAS",
            0x5B => "JUMPDEST",
            0xF0 => "CREATE",
            0xF1 => "CALL",
            0xF2 => "CALLCODE",
            0xF3 => "RETURN",
            0xF4 => "DELEGATECALL",
            0xF5 => "CREATE2",
            0xFA => "STATICCALL",
            0xFD => "REVERT",
            0xFE => "INVALID",
            0xFF => "SELFDESTRUCT",
            _ => return None,
        };

        Some(name.to_string())
    }

    pub fn name(&self, byte: u8) -> &str {
        &self.names[byte as usize]
    }

    pub fn is_known(&self, byte: u8) -> bool {
        self.known[byte as usize]
    }

    pub fn known_count(&self) -> usize {
        self.known.iter().filter(|k| **k).count()
    }
}

fn placeholder(byte: u8) -> String {
    format!("unknown_{:#x}", byte)
}

pub fn mnemonic(byte: u8) -> &'static str {
    OpcodeTable::global().name(byte)
}

pub fn is_push(byte: u8) -> bool {
    (PUSH1..=PUSH32).contains(&byte)
}

/// Immediate operand width declared by a push opcode, zero for everything else.
pub fn push_size(byte: u8) -> usize {
    if is_push(byte) {
        (byte - PUSH0) as usize
    } else {
        0
    }
}

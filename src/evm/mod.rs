// Mon Oct 19 2026 - Alex

pub mod opcode;
pub mod disassembler;

pub use opcode::{mnemonic, push_size, is_push, OpcodeTable};
pub use disassembler::{disassemble, disassemble_into, format_operand, DecodedToken, Disassembler, Instruction};

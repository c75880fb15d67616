// Mon Oct 19 2026 - Alex

use crate::evm::opcode;
use std::fmt::{self, Write};

/// One decoded instruction. `operand` is set only for push opcodes and may be
/// shorter than `declared_size` when the code ends mid-operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub pc: usize,
    pub opcode: u8,
    pub operand: Option<&'a [u8]>,
    pub declared_size: usize,
}

impl<'a> Instruction<'a> {
    pub fn mnemonic(&self) -> &'static str {
        opcode::mnemonic(self.opcode)
    }

    pub fn is_push(&self) -> bool {
        self.operand.is_some()
    }

    pub fn is_truncated(&self) -> bool {
        self.operand.map_or(false, |op| op.len() < self.declared_size)
    }

    /// Bytes the cursor moves past, including the opcode itself.
    pub fn width(&self) -> usize {
        1 + self.declared_size
    }

    pub fn tokens(&self) -> Vec<DecodedToken<'a>> {
        let mut tokens = vec![DecodedToken::Mnemonic(self.mnemonic())];
        if let Some(operand) = self.operand {
            tokens.push(DecodedToken::Operand(operand));
        }
        tokens
    }

    fn write_text(&self, out: &mut String) {
        out.push_str(self.mnemonic());
        if let Some(operand) = self.operand {
            out.push(' ');
            write_operand_hex(out, operand);
        }
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        self.write_text(&mut text);
        write!(f, "{:06x}: {}", self.pc, text)?;
        if self.is_truncated() {
            write!(f, " (truncated, {} of {} bytes)", self.operand.map_or(0, |o| o.len()), self.declared_size)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedToken<'a> {
    Mnemonic(&'static str),
    Operand(&'a [u8]),
}

impl fmt::Display for DecodedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedToken::Mnemonic(name) => f.write_str(name),
            DecodedToken::Operand(bytes) => {
                let mut text = String::new();
                write_operand_hex(&mut text, bytes);
                f.write_str(&text)
            }
        }
    }
}

/// Linear sweep over EVM bytecode.
///
/// The cursor always advances by `1 + declared push size`, so a push whose
/// operand runs past the end consumes what is left and stops the sweep.
/// Decoding never fails and never reads past `code`.
pub struct Disassembler<'a> {
    code: &'a [u8],
    pc: usize,
}

impl<'a> Disassembler<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Self { code, pc: 0 }
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn decode(code: &'a [u8]) -> Vec<Instruction<'a>> {
        Disassembler::new(code).collect()
    }

    pub fn tokens(code: &'a [u8]) -> Vec<DecodedToken<'a>> {
        Disassembler::new(code).flat_map(|insn| insn.tokens()).collect()
    }
}

impl<'a> Iterator for Disassembler<'a> {
    type Item = Instruction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let pc = self.pc;
        let byte = *self.code.get(pc)?;
        let declared_size = opcode::push_size(byte);

        let operand = if opcode::is_push(byte) {
            let start = pc + 1;
            let end = (start + declared_size).min(self.code.len());
            Some(&self.code[start..end])
        } else {
            None
        };

        self.pc = pc + 1 + declared_size;

        Some(Instruction {
            pc,
            opcode: byte,
            operand,
            declared_size,
        })
    }
}

/// Renders `code` as space-separated mnemonics and push operands.
pub fn disassemble(code: &[u8]) -> String {
    let mut out = String::with_capacity(code.len() * 4);
    disassemble_into(code, &mut out);
    out
}

/// Same as [`disassemble`] but appends to a caller-owned buffer.
pub fn disassemble_into(code: &[u8], out: &mut String) {
    for (i, insn) in Disassembler::new(code).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        insn.write_text(out);
    }
}

/// Big-endian unsigned value as `0x`-prefixed lowercase hex without leading
/// zeros. Empty and all-zero operands render as `0x0`.
pub fn format_operand(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    write_operand_hex(&mut out, bytes);
    out
}

fn write_operand_hex(out: &mut String, bytes: &[u8]) {
    out.push_str("0x");

    let significant = match bytes.iter().position(|b| *b != 0) {
        Some(first) => &bytes[first..],
        None => {
            out.push('0');
            return;
        }
    };

    let _ = write!(out, "{:x}", significant[0]);
    for byte in &significant[1..] {
        let _ = write!(out, "{:02x}", byte);
    }
}

//! Opcode decode table
//!
//! The official 6502 instruction set: 151 opcodes across 56 mnemonics and
//! 13 addressing modes. Decoding is a single indexed lookup into a 256-entry
//! table built at compile time from the flat opcode matrix below, so a
//! missing or duplicated entry is a compile-time problem rather than a
//! runtime surprise.

/// Instruction mnemonic, one per official 6502 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
}

/// Addressing mode. The resolver in `cpu.rs` gives each one its exact
/// operand-fetch and wrap-around semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/// Cycle descriptor for one opcode: base cost, whether an index crossing a
/// page adds a cycle, and whether the opcode is a memory read-modify-write
/// (RMW always pays its worst-case fixed cost).
#[derive(Debug, Clone, Copy)]
pub struct OpInfo {
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    pub cycles: u8,
    pub page_bonus: bool,
    pub rmw: bool,
}

// Cycle-cost tags for the matrix below.
const FIXED: u8 = 0;
const PAGE: u8 = 1;
const RMW: u8 = 2;

use AddrMode::*;
use Mnemonic::*;

/// The opcode matrix: (opcode byte, mnemonic, mode, base cycles, cost tag).
/// Ordered by mnemonic, matching the usual 6502 reference listings.
const MATRIX: &[(u8, Mnemonic, AddrMode, u8, u8)] = &[
    (0x69, Adc, Immediate, 2, FIXED),
    (0x65, Adc, ZeroPage, 3, FIXED),
    (0x75, Adc, ZeroPageX, 4, FIXED),
    (0x6D, Adc, Absolute, 4, FIXED),
    (0x7D, Adc, AbsoluteX, 4, PAGE),
    (0x79, Adc, AbsoluteY, 4, PAGE),
    (0x61, Adc, IndirectX, 6, FIXED),
    (0x71, Adc, IndirectY, 5, PAGE),
    (0x29, And, Immediate, 2, FIXED),
    (0x25, And, ZeroPage, 3, FIXED),
    (0x35, And, ZeroPageX, 4, FIXED),
    (0x2D, And, Absolute, 4, FIXED),
    (0x3D, And, AbsoluteX, 4, PAGE),
    (0x39, And, AbsoluteY, 4, PAGE),
    (0x21, And, IndirectX, 6, FIXED),
    (0x31, And, IndirectY, 5, PAGE),
    (0x0A, Asl, Accumulator, 2, FIXED),
    (0x06, Asl, ZeroPage, 5, RMW),
    (0x16, Asl, ZeroPageX, 6, RMW),
    (0x0E, Asl, Absolute, 6, RMW),
    (0x1E, Asl, AbsoluteX, 7, RMW),
    (0x90, Bcc, Relative, 2, FIXED),
    (0xB0, Bcs, Relative, 2, FIXED),
    (0xF0, Beq, Relative, 2, FIXED),
    (0x24, Bit, ZeroPage, 3, FIXED),
    (0x2C, Bit, Absolute, 4, FIXED),
    (0x30, Bmi, Relative, 2, FIXED),
    (0xD0, Bne, Relative, 2, FIXED),
    (0x10, Bpl, Relative, 2, FIXED),
    (0x00, Brk, Implied, 7, FIXED),
    (0x50, Bvc, Relative, 2, FIXED),
    (0x70, Bvs, Relative, 2, FIXED),
    (0x18, Clc, Implied, 2, FIXED),
    (0xD8, Cld, Implied, 2, FIXED),
    (0x58, Cli, Implied, 2, FIXED),
    (0xB8, Clv, Implied, 2, FIXED),
    (0xC9, Cmp, Immediate, 2, FIXED),
    (0xC5, Cmp, ZeroPage, 3, FIXED),
    (0xD5, Cmp, ZeroPageX, 4, FIXED),
    (0xCD, Cmp, Absolute, 4, FIXED),
    (0xDD, Cmp, AbsoluteX, 4, PAGE),
    (0xD9, Cmp, AbsoluteY, 4, PAGE),
    (0xC1, Cmp, IndirectX, 6, FIXED),
    (0xD1, Cmp, IndirectY, 5, PAGE),
    (0xE0, Cpx, Immediate, 2, FIXED),
    (0xE4, Cpx, ZeroPage, 3, FIXED),
    (0xEC, Cpx, Absolute, 4, FIXED),
    (0xC0, Cpy, Immediate, 2, FIXED),
    (0xC4, Cpy, ZeroPage, 3, FIXED),
    (0xCC, Cpy, Absolute, 4, FIXED),
    (0xC6, Dec, ZeroPage, 5, RMW),
    (0xD6, Dec, ZeroPageX, 6, RMW),
    (0xCE, Dec, Absolute, 6, RMW),
    (0xDE, Dec, AbsoluteX, 7, RMW),
    (0xCA, Dex, Implied, 2, FIXED),
    (0x88, Dey, Implied, 2, FIXED),
    (0x49, Eor, Immediate, 2, FIXED),
    (0x45, Eor, ZeroPage, 3, FIXED),
    (0x55, Eor, ZeroPageX, 4, FIXED),
    (0x4D, Eor, Absolute, 4, FIXED),
    (0x5D, Eor, AbsoluteX, 4, PAGE),
    (0x59, Eor, AbsoluteY, 4, PAGE),
    (0x41, Eor, IndirectX, 6, FIXED),
    (0x51, Eor, IndirectY, 5, PAGE),
    (0xE6, Inc, ZeroPage, 5, RMW),
    (0xF6, Inc, ZeroPageX, 6, RMW),
    (0xEE, Inc, Absolute, 6, RMW),
    (0xFE, Inc, AbsoluteX, 7, RMW),
    (0xE8, Inx, Implied, 2, FIXED),
    (0xC8, Iny, Implied, 2, FIXED),
    (0x4C, Jmp, Absolute, 3, FIXED),
    (0x6C, Jmp, Indirect, 5, FIXED),
    (0x20, Jsr, Absolute, 6, FIXED),
    (0xA9, Lda, Immediate, 2, FIXED),
    (0xA5, Lda, ZeroPage, 3, FIXED),
    (0xB5, Lda, ZeroPageX, 4, FIXED),
    (0xAD, Lda, Absolute, 4, FIXED),
    (0xBD, Lda, AbsoluteX, 4, PAGE),
    (0xB9, Lda, AbsoluteY, 4, PAGE),
    (0xA1, Lda, IndirectX, 6, FIXED),
    (0xB1, Lda, IndirectY, 5, PAGE),
    (0xA2, Ldx, Immediate, 2, FIXED),
    (0xA6, Ldx, ZeroPage, 3, FIXED),
    (0xB6, Ldx, ZeroPageY, 4, FIXED),
    (0xAE, Ldx, Absolute, 4, FIXED),
    (0xBE, Ldx, AbsoluteY, 4, PAGE),
    (0xA0, Ldy, Immediate, 2, FIXED),
    (0xA4, Ldy, ZeroPage, 3, FIXED),
    (0xB4, Ldy, ZeroPageX, 4, FIXED),
    (0xAC, Ldy, Absolute, 4, FIXED),
    (0xBC, Ldy, AbsoluteX, 4, PAGE),
    (0x4A, Lsr, Accumulator, 2, FIXED),
    (0x46, Lsr, ZeroPage, 5, RMW),
    (0x56, Lsr, ZeroPageX, 6, RMW),
    (0x4E, Lsr, Absolute, 6, RMW),
    (0x5E, Lsr, AbsoluteX, 7, RMW),
    (0xEA, Nop, Implied, 2, FIXED),
    (0x09, Ora, Immediate, 2, FIXED),
    (0x05, Ora, ZeroPage, 3, FIXED),
    (0x15, Ora, ZeroPageX, 4, FIXED),
    (0x0D, Ora, Absolute, 4, FIXED),
    (0x1D, Ora, AbsoluteX, 4, PAGE),
    (0x19, Ora, AbsoluteY, 4, PAGE),
    (0x01, Ora, IndirectX, 6, FIXED),
    (0x11, Ora, IndirectY, 5, PAGE),
    (0x48, Pha, Implied, 3, FIXED),
    (0x08, Php, Implied, 3, FIXED),
    (0x68, Pla, Implied, 4, FIXED),
    (0x28, Plp, Implied, 4, FIXED),
    (0x2A, Rol, Accumulator, 2, FIXED),
    (0x26, Rol, ZeroPage, 5, RMW),
    (0x36, Rol, ZeroPageX, 6, RMW),
    (0x2E, Rol, Absolute, 6, RMW),
    (0x3E, Rol, AbsoluteX, 7, RMW),
    (0x6A, Ror, Accumulator, 2, FIXED),
    (0x66, Ror, ZeroPage, 5, RMW),
    (0x76, Ror, ZeroPageX, 6, RMW),
    (0x6E, Ror, Absolute, 6, RMW),
    (0x7E, Ror, AbsoluteX, 7, RMW),
    (0x40, Rti, Implied, 6, FIXED),
    (0x60, Rts, Implied, 6, FIXED),
    (0xE9, Sbc, Immediate, 2, FIXED),
    (0xE5, Sbc, ZeroPage, 3, FIXED),
    (0xF5, Sbc, ZeroPageX, 4, FIXED),
    (0xED, Sbc, Absolute, 4, FIXED),
    (0xFD, Sbc, AbsoluteX, 4, PAGE),
    (0xF9, Sbc, AbsoluteY, 4, PAGE),
    (0xE1, Sbc, IndirectX, 6, FIXED),
    (0xF1, Sbc, IndirectY, 5, PAGE),
    (0x38, Sec, Implied, 2, FIXED),
    (0xF8, Sed, Implied, 2, FIXED),
    (0x78, Sei, Implied, 2, FIXED),
    // Stores never take the index cross-page bonus.
    (0x85, Sta, ZeroPage, 3, FIXED),
    (0x95, Sta, ZeroPageX, 4, FIXED),
    (0x8D, Sta, Absolute, 4, FIXED),
    (0x9D, Sta, AbsoluteX, 5, FIXED),
    (0x99, Sta, AbsoluteY, 5, FIXED),
    (0x81, Sta, IndirectX, 6, FIXED),
    (0x91, Sta, IndirectY, 6, FIXED),
    (0x86, Stx, ZeroPage, 3, FIXED),
    (0x96, Stx, ZeroPageY, 4, FIXED),
    (0x8E, Stx, Absolute, 4, FIXED),
    (0x84, Sty, ZeroPage, 3, FIXED),
    (0x94, Sty, ZeroPageX, 4, FIXED),
    (0x8C, Sty, Absolute, 4, FIXED),
    (0xAA, Tax, Implied, 2, FIXED),
    (0xA8, Tay, Implied, 2, FIXED),
    (0xBA, Tsx, Implied, 2, FIXED),
    (0x8A, Txa, Implied, 2, FIXED),
    (0x9A, Txs, Implied, 2, FIXED),
    (0x98, Tya, Implied, 2, FIXED),
];

const fn build_table() -> [Option<OpInfo>; 256] {
    let mut table: [Option<OpInfo>; 256] = [None; 256];
    let mut i = 0;
    while i < MATRIX.len() {
        let (byte, mnemonic, mode, cycles, tag) = MATRIX[i];
        assert!(table[byte as usize].is_none(), "duplicate opcode in matrix");
        table[byte as usize] = Some(OpInfo {
            mnemonic,
            mode,
            cycles,
            page_bonus: tag == PAGE,
            rmw: tag == RMW,
        });
        i += 1;
    }
    table
}

/// Opcode byte → instruction info. `None` marks the undocumented opcodes,
/// which this core reports and skips.
pub static OPCODE_TABLE: [Option<OpInfo>; 256] = build_table();

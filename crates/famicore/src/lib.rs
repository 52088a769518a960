//! Famicore - a cycle-driven NES emulation core
//!
//! The heart of the crate is the clock coordinator in [`system`]: it runs
//! the 2A03 CPU one instruction at a time and feeds the 2C02 PPU three dots
//! per CPU cycle, which is what real hardware does. Audio mixing, input
//! glue, and presentation are host concerns; the core exposes a small API
//! (`power_on`, `load_rom`, `step_frame`, `frame_buffer`, `set_controller`)
//! and otherwise keeps to itself.

#![forbid(unsafe_code)]

/// CPU module containing the 2A03 (6502 variant) implementation
pub mod cpu;
/// Opcode decode table: 151 official opcodes, built at compile time
pub mod opcodes;
/// Memory bus and mapping
pub mod bus;
/// PPU (Picture Processing Unit) timing core
pub mod ppu;
/// The fixed 2C02 64-color palette
pub mod palette;
/// Cartridge and iNES ROM loading
pub mod cartridge;
/// APU register stub with timing hooks
pub mod apu;
/// Controller input handling
pub mod controller;
/// Integration module for the complete NES system
pub mod system;

pub use cartridge::{Cartridge, RomError};
pub use cpu::{Bus, Cpu, Status};
pub use ppu::{Ppu, FRAME_BYTES, FRAME_HEIGHT, FRAME_WIDTH};
pub use system::{NesSystem, CYCLES_PER_FRAME};

//! NES system integration
//!
//! The clock coordinator: one instruction on the CPU, then three PPU dots
//! per CPU cycle, with interrupt lines sampled at the boundary. A frame is
//! 29780 CPU cycles; the host calls `step_frame` once per display frame and
//! paces itself — rate control is deliberately not this crate's job.

use crate::bus::NesBus;
use crate::cartridge::{Cartridge, RomError};
use crate::cpu::{Bus as CpuBus, Cpu};
use crate::ppu::{Ppu, FRAME_BYTES};

/// NTSC CPU cycles per frame.
pub const CYCLES_PER_FRAME: u64 = 29780;

/// NES system - integrates all components
pub struct NesSystem {
    cpu: Cpu,
    bus: NesBus,
    frame_count: u64,
}

impl NesSystem {
    /// Power on: construct every component with zeroed RAM and run the
    /// RESET sequence. The reset vector is meaningless until a cartridge is
    /// loaded, which runs RESET again.
    pub fn power_on() -> Self {
        let mut system = Self {
            cpu: Cpu::new(),
            bus: NesBus::new(),
            frame_count: 0,
        };
        system.reset();
        system
    }

    /// Apply the RESET sequence without clearing RAM.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        self.bus.ppu.reset();
        self.bus.apu.reset();
    }

    /// Ingest an iNES image, seat it on the bus, and RESET so PC picks up
    /// the cartridge's reset vector.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), RomError> {
        let cartridge = Cartridge::from_ines(rom)?;
        self.bus.insert_cartridge(cartridge);
        self.reset();
        Ok(())
    }

    /// Execute one instruction and advance the PPU three dots per cycle.
    /// Returns the cycles consumed, including any OAM DMA stall.
    pub fn step(&mut self) -> u64 {
        // Interrupt lines are sampled at the instruction boundary only.
        self.cpu.set_nmi_line(self.bus.ppu.nmi_asserted());
        let cycles = self.cpu.step(&mut self.bus) as u64;
        for _ in 0..cycles * 3 {
            self.bus.ppu.tick();
        }
        self.bus.apu.step(cycles);
        cycles
    }

    /// Run one NES frame's worth of CPU work and return the cycles consumed.
    pub fn step_frame(&mut self) -> u64 {
        let mut cycles = 0;
        while cycles < CYCLES_PER_FRAME {
            cycles += self.step();
        }
        self.frame_count += 1;
        cycles
    }

    /// RGBA8 frame buffer (256x240), stable until the next `step_frame`.
    pub fn frame_buffer(&self) -> &[u8; FRAME_BYTES] {
        self.bus.ppu.frame_buffer()
    }

    /// Update the button bitfield for controller port 0 or 1.
    pub fn set_controller(&mut self, port: usize, state: u8) {
        self.bus.set_controller(port, state);
    }

    /// Get CPU reference
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Get mutable CPU reference
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Get PPU reference
    pub fn ppu(&self) -> &Ppu {
        &self.bus.ppu
    }

    /// Get frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Read a byte from memory via the bus
    pub fn read_memory(&mut self, address: u16) -> u8 {
        self.bus.read(address)
    }

    /// Write a byte to memory via the bus
    pub fn write_memory(&mut self, address: u16, value: u8) {
        self.bus.write(address, value);
    }
}

impl Default for NesSystem {
    fn default() -> Self {
        Self::power_on()
    }
}

//! Full-system integration tests
//!
//! Each test builds a small NROM image in memory, loads it, and observes the
//! coordinator from the public API.

use famicore::{NesSystem, Status, CYCLES_PER_FRAME};

const PRG_BANK: usize = 16 * 1024;

/// Build a one-bank NROM image: `program` at the reset target $8000, NOPs
/// elsewhere, NMI vector at $C000 (mirrored from the single bank).
fn build_rom(program: &[u8]) -> Vec<u8> {
    let mut prg = vec![0xEA; PRG_BANK]; // NOP sled
    prg[..program.len()].copy_from_slice(program);
    // Vectors live in the top of the bank ($FFFA-$FFFF after mirroring).
    prg[0x3FFA] = 0x00; // NMI -> $C000
    prg[0x3FFB] = 0xC0;
    prg[0x3FFC] = 0x00; // RESET -> $8000
    prg[0x3FFD] = 0x80;
    prg[0x3FFE] = 0x00; // IRQ/BRK -> $C000
    prg[0x3FFF] = 0xC0;

    let mut rom = Vec::new();
    rom.extend_from_slice(b"NES\x1A");
    rom.push(1); // one 16 KiB PRG bank
    rom.push(0); // no CHR
    rom.extend_from_slice(&[0; 10]);
    rom.extend_from_slice(&prg);
    rom
}

#[test]
fn load_rom_applies_the_reset_vector() {
    let mut system = NesSystem::power_on();
    system.load_rom(&build_rom(&[])).unwrap();
    assert_eq!(system.cpu().pc, 0x8000);
    assert_eq!(system.cpu().sp, 0xFD);
}

#[test]
fn load_rom_rejects_garbage() {
    let mut system = NesSystem::power_on();
    assert!(system.load_rom(b"not a rom").is_err());
}

#[test]
fn step_frame_consumes_a_frame_of_cycles() {
    let mut system = NesSystem::power_on();
    system.load_rom(&build_rom(&[])).unwrap();
    let cycles = system.step_frame();
    assert!(cycles >= CYCLES_PER_FRAME);
    // NOPs are 2 cycles; the overshoot is at most one instruction.
    assert!(cycles < CYCLES_PER_FRAME + 8);
    assert_eq!(system.frame_count(), 1);
}

#[test]
fn vblank_nmi_vectors_with_break_clear() {
    // Enable CTRL bit 7 then spin; the NMI must arrive once the PPU crosses
    // scanline 241 dot 1.
    let program = [
        0xA9, 0x80, // LDA #$80
        0x8D, 0x00, 0x20, // STA $2000
        0x4C, 0x05, 0x80, // spin: JMP $8005
    ];
    let mut system = NesSystem::power_on();
    system.load_rom(&build_rom(&program)).unwrap();

    let mut vectored = false;
    for _ in 0..40_000 {
        system.step();
        if system.cpu().pc >= 0xC000 && system.cpu().pc < 0xD000 {
            vectored = true;
            break;
        }
    }
    assert!(vectored, "NMI never serviced");
    assert!(system.ppu().in_vblank());

    // The interrupt frame: return PC high/low, then flags with B=0, U=1.
    let sp = system.cpu().sp;
    let flags_addr = 0x0100 | (sp.wrapping_add(1) as u16);
    let flags = Status::from_bits_truncate(system.read_memory(flags_addr));
    assert!(!flags.contains(Status::BREAK));
    assert!(flags.contains(Status::UNUSED));
    let ret_lo = system.read_memory(0x0100 | (sp.wrapping_add(2) as u16));
    let ret_hi = system.read_memory(0x0100 | (sp.wrapping_add(3) as u16));
    let ret = (ret_lo as u16) | ((ret_hi as u16) << 8);
    assert!((0x8000..0xC000).contains(&ret)); // interrupted inside the sled
}

#[test]
fn nmi_waits_for_ctrl_enable() {
    let mut system = NesSystem::power_on();
    // Spin in place with NMI disabled: the PC must never leave the loop.
    system.load_rom(&build_rom(&[0x4C, 0x00, 0x80])).unwrap();
    system.step_frame();
    system.step_frame();
    assert!((0x8000..0x8003).contains(&system.cpu().pc));
}

#[test]
fn oam_dma_stalls_the_cpu() {
    // LDA #$02; STA $4014 -> one page copied from $0200, CPU stalled.
    let program = [
        0xA9, 0x02, // LDA #$02
        0x8D, 0x14, 0x40, // STA $4014
    ];
    let mut system = NesSystem::power_on();
    for i in 0..256u16 {
        system.write_memory(0x0200 + i, i as u8);
    }
    system.load_rom(&build_rom(&program)).unwrap();

    let lda = system.step();
    assert_eq!(lda, 2);
    let sta = system.step();
    // 4 for the store plus 513 or 514 depending on cycle parity.
    assert!(sta == 4 + 513 || sta == 4 + 514, "got {}", sta);

    // OAM now holds the copied page, observable through $2004.
    system.write_memory(0x2003, 0x00);
    assert_eq!(system.read_memory(0x2004), 0x00);
    system.write_memory(0x2003, 0x42);
    assert_eq!(system.read_memory(0x2004), 0x42);
}

#[test]
fn status_read_through_the_bus_clears_vblank() {
    let mut system = NesSystem::power_on();
    system.load_rom(&build_rom(&[])).unwrap();
    // Run until the PPU is inside VBlank.
    while !system.ppu().in_vblank() {
        system.step();
    }
    let status = system.read_memory(0x2002);
    assert!(status & 0x80 != 0);
    assert!(!system.ppu().in_vblank());
}

#[test]
fn controllers_shift_out_button_bits() {
    let mut system = NesSystem::power_on();
    system.load_rom(&build_rom(&[])).unwrap();
    system.set_controller(0, 0b0000_1001); // A + Start
    system.write_memory(0x4016, 1);
    system.write_memory(0x4016, 0);
    let bits: Vec<u8> = (0..8).map(|_| system.read_memory(0x4016)).collect();
    assert_eq!(bits, vec![1, 0, 0, 1, 0, 0, 0, 0]);
}

#[test]
fn frame_buffer_is_stable_between_frames() {
    let mut system = NesSystem::power_on();
    system.load_rom(&build_rom(&[])).unwrap();
    system.step_frame();
    let first = system.frame_buffer().to_vec();
    let again = system.frame_buffer();
    assert_eq!(&first[..], &again[..]);
}

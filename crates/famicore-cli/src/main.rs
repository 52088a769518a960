//! Famicore CLI - headless command line host for the NES core

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use famicore::{Cartridge, NesSystem};

/// NES emulator, headless
#[derive(Parser, Debug)]
#[command(name = "famicore")]
#[command(about = "Execute an iNES ROM headlessly on the famicore core", long_about = None)]
struct Args {
    /// iNES image to execute
    rom: PathBuf,

    /// How many frames to emulate before exiting
    #[arg(short = 'n', long, default_value_t = 60)]
    frames: u64,

    /// Log CPU and PPU state once the run finishes
    #[arg(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = Args::parse();

    let rom_data = match fs::read(&args.rom) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("failed to read {}: {}", args.rom.display(), e);
            return ExitCode::FAILURE;
        }
    };

    // Parse once up front so the summary and the load share one pass.
    let cartridge = match Cartridge::from_ines(&rom_data) {
        Ok(cart) => cart,
        Err(e) => {
            eprintln!("failed to load {}: {}", args.rom.display(), e);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "{}: {} KiB PRG, {} KiB CHR",
        args.rom.display(),
        cartridge.prg_len() / 1024,
        cartridge.chr_rom().len() / 1024
    );

    let mut system = NesSystem::power_on();
    if let Err(e) = system.load_rom(&rom_data) {
        eprintln!("failed to load {}: {}", args.rom.display(), e);
        return ExitCode::FAILURE;
    }

    log::info!("running {} frames", args.frames);
    let mut total_cycles = 0u64;
    for _ in 0..args.frames {
        total_cycles += system.step_frame();
    }
    println!(
        "{} frames, {} CPU cycles",
        system.frame_count(),
        total_cycles
    );

    if args.dump {
        dump_state(&system);
    }
    ExitCode::SUCCESS
}

/// One line per chip: registers grouped with their flags, then the PPU's
/// beam position.
fn dump_state(system: &NesSystem) {
    let cpu = system.cpu();
    log::info!(
        "cpu: pc=${:04X} sp=${:02X} a=${:02X} x=${:02X} y=${:02X} [{}] after {} cycles",
        cpu.pc,
        cpu.sp,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status,
        cpu.total_cycles()
    );
    let ppu = system.ppu();
    log::info!(
        "ppu: scanline {} dot {}{}",
        ppu.scanline(),
        ppu.dot(),
        if ppu.in_vblank() { " (vblank)" } else { "" }
    );
}

use anyhow::{Context, Result};
use clap::Parser;
use ocho_chip8::scheduler::TIMER_HZ;
use ocho_chip8::{Chip8Error, Chip8System, Config, Quirks, PIXEL_ON};
use ocho_core::types::Frame;
use ocho_core::{rom, System};
use std::path::PathBuf;

/// Headless CHIP-8 runner: execute a ROM for a fixed number of cycles
/// without opening a window. Useful for smoke-testing ROMs and quirk
/// configurations.
#[derive(Parser)]
struct Args {
    /// Path to a .ch8 ROM image
    rom: PathBuf,

    /// Number of instruction cycles to execute
    #[arg(long, default_value_t = 2000)]
    cycles: u64,

    /// Cycle rate; headless runs are not wall-clock paced, this only sets
    /// how often the 60 Hz timers tick relative to instructions
    #[arg(long, default_value_t = 700)]
    ips: u32,

    /// 8XY6/8XYE shift Vx in place instead of reading Vy first
    #[arg(long, default_value_t = false)]
    shift_in_place: bool,

    /// BNNN adds Vx (x = high nibble of NNN) instead of V0
    #[arg(long, default_value_t = false)]
    jump_offset_vx: bool,

    /// Leave I untouched by FX55/FX65
    #[arg(long, default_value_t = false)]
    no_index_increment: bool,

    /// Print the final display contents as ASCII art
    #[arg(long, default_value_t = false)]
    dump_display: bool,
}

fn render_ascii(frame: &Frame) -> String {
    let mut out = String::with_capacity((frame.width as usize + 1) * frame.height as usize);
    for y in 0..frame.height {
        for x in 0..frame.width {
            let on = frame.pixels[(y * frame.width + x) as usize] == PIXEL_ON;
            out.push(if on { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = rom::read_rom_file(&args.rom)?;

    let config = Config {
        instructions_per_second: args.ips.max(1),
        quirks: Quirks {
            shift_source_vy: !args.shift_in_place,
            jump_offset_vx: args.jump_offset_vx,
            index_increment: !args.no_index_increment,
        },
    };
    let mut sys = Chip8System::new(config);
    sys.load_rom(&data)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;

    // Approximate the 60 Hz timer cadence by instruction count.
    let cycles_per_timer_tick = (config.instructions_per_second / TIMER_HZ).max(1) as u64;

    let mut executed = 0u64;
    for cycle in 0..args.cycles {
        match sys.step() {
            Ok(_) => executed += 1,
            Err(Chip8Error::EndOfMemory { pc }) => {
                println!(
                    "Program finished: PC ran past the end of memory at {:#05X}",
                    pc
                );
                break;
            }
            Err(e) => return Err(e).context("ROM execution aborted"),
        }
        if (cycle + 1) % cycles_per_timer_tick == 0 {
            sys.tick_timers();
        }
    }

    println!(
        "Executed {} cycles; sound {}",
        executed,
        if sys.sound_active() { "on" } else { "off" }
    );

    if args.dump_display {
        print!("{}", render_ascii(&sys.framebuffer()));
    }

    Ok(())
}

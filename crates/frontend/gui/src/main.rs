mod keypad;
mod settings;

use minifb::{Key, ScaleMode, Window, WindowOptions};
use ocho_chip8::scheduler::Scheduler;
use ocho_chip8::{Chip8Error, Chip8System, HEIGHT, WIDTH};
use ocho_core::rom;
use ocho_core::System;
use settings::Settings;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Pick a ROM interactively when none was given on the command line.
fn pick_rom_dialog() -> Option<PathBuf> {
    rfd::MessageDialog::new()
        .set_title("Ocho")
        .set_description("Select a CHIP-8 ROM to run")
        .set_level(rfd::MessageLevel::Info)
        .show();

    rfd::FileDialog::new()
        .add_filter("CHIP-8 ROM", &[rom::ROM_EXTENSION])
        .pick_file()
}

/// Tell the user why the run stopped. End-of-memory is the program simply
/// running out, everything else is a fault in the ROM.
fn report_halt(err: &Chip8Error) {
    let level = match err {
        Chip8Error::EndOfMemory { .. } => rfd::MessageLevel::Info,
        _ => rfd::MessageLevel::Error,
    };
    log::error!("execution halted: {}", err);
    rfd::MessageDialog::new()
        .set_title("Program stopped")
        .set_description(err.to_string())
        .set_level(level)
        .show();
}

fn main() {
    env_logger::init();

    let mut settings = Settings::load();

    let rom_path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => match pick_rom_dialog() {
            Some(path) => path,
            None => {
                eprintln!("No ROM selected");
                std::process::exit(1);
            }
        },
    };

    let data = match rom::read_rom_file(&rom_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = settings.machine_config();
    let mut sys = Chip8System::new(config);
    if let Err(e) = sys.load_rom(&data) {
        eprintln!("Failed to load ROM: {}", e);
        std::process::exit(1);
    }
    println!("Loaded ROM: {}", rom_path.display());

    settings.last_rom_path = Some(rom_path.display().to_string());
    if let Err(e) = settings.save() {
        eprintln!("Warning: Failed to save settings: {}", e);
    }

    let scale = settings.scale.max(1);
    let mut window = match Window::new(
        "Ocho - CHIP-8",
        WIDTH as usize * scale,
        HEIGHT as usize * scale,
        WindowOptions {
            resize: true,
            // Integer-ish stretching without interpolation keeps the pixel
            // edges crisp.
            scale_mode: ScaleMode::Stretch,
            ..WindowOptions::default()
        },
    ) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("Failed to create window: {}", e);
            std::process::exit(1);
        }
    };

    let mut scheduler = Scheduler::new(config.instructions_per_second);
    let mut frame = sys.framebuffer();
    let mut dirty = true;
    let mut halted = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let tick = scheduler.poll(Instant::now());

        if tick.tick_timers {
            sys.tick_timers();
        }

        if tick.run_instruction && !halted {
            sys.set_keys(keypad::poll(&window));
            match sys.step() {
                Ok(step) => {
                    if step.redraw {
                        frame = sys.framebuffer();
                        dirty = true;
                    }
                }
                Err(e) => {
                    halted = true;
                    report_halt(&e);
                }
            }
        }

        // The window is only handed a buffer when the display actually
        // changed; otherwise just pump events.
        if dirty {
            if let Err(e) =
                window.update_with_buffer(&frame.pixels, WIDTH as usize, HEIGHT as usize)
            {
                eprintln!("Window update error: {}", e);
                break;
            }
            dirty = false;
        } else {
            window.update();
        }

        if halted {
            break;
        }

        let wait = scheduler.time_to_next(Instant::now());
        if wait > Duration::ZERO {
            std::thread::sleep(wait.min(Duration::from_millis(4)));
        }
    }
}

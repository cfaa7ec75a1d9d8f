// filepath: src/main.rs

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use log::{error, info, warn};
use pixel_sandbox::config::SandboxConfig;
use pixel_sandbox::diagnostics::LogSink;
use pixel_sandbox::pointer::{PointerEvent, PointerEventKind};
use pixel_sandbox::{RasterSurface, Sandbox};

/// One line of host input
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Reset,
    Run(Option<String>),
    Pointer(PointerEventKind, f64, f64),
    Pixel(i32, i32),
    Routines,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let name = parts.next().ok_or_else(|| "empty command".to_string())?;
    let args: Vec<&str> = parts.collect();

    let number = |i: usize| -> Result<f64, String> {
        args.get(i)
            .ok_or_else(|| format!("{}: missing argument {}", name, i + 1))?
            .parse::<f64>()
            .map_err(|e| format!("{}: {}", name, e))
    };

    match name {
        "reset" => Ok(Command::Reset),
        "run" => Ok(Command::Run(args.first().map(|s| s.to_string()))),
        "enter" => Ok(Command::Pointer(PointerEventKind::Enter, 0.0, 0.0)),
        "leave" => Ok(Command::Pointer(PointerEventKind::Leave, 0.0, 0.0)),
        "move" => Ok(Command::Pointer(PointerEventKind::Motion, number(0)?, number(1)?)),
        "click" => Ok(Command::Pointer(PointerEventKind::Click, number(0)?, number(1)?)),
        "pixel" => Ok(Command::Pixel(number(0)?.floor() as i32, number(1)?.floor() as i32)),
        "routines" => Ok(Command::Routines),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {}", other)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting pixel-sandbox");

    let config = SandboxConfig::load_from_file().unwrap_or_else(|e| {
        warn!("Could not load configuration, using defaults: {}", e);
        SandboxConfig::default()
    });
    info!("Configuration loaded");

    let resolved = config.surface();
    let backend = RasterSurface::new(resolved.width, resolved.height);
    let mut sandbox = Sandbox::new(config, Box::new(backend), Rc::new(LogSink));

    info!("Entering command loop");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        match command {
            Command::Reset => sandbox.reset(),
            Command::Run(routine) => {
                if let Some(id) = routine {
                    sandbox.set_active_routine(&id);
                }
                if let Err(e) = sandbox.run() {
                    error!("Routine '{}' failed: {}", sandbox.active_routine(), e);
                }
            }
            Command::Pointer(kind, x, y) => {
                if let Some(reading) = sandbox.handle_pointer(&PointerEvent::new(kind, x, y)) {
                    let (left, top) = sandbox.inspector().anchor();
                    writeln!(
                        stdout,
                        "x={} y={} r={} g={} b={} {} @ ({}, {})",
                        reading.x,
                        reading.y,
                        reading.color.r,
                        reading.color.g,
                        reading.color.b,
                        reading.hex,
                        left,
                        top
                    )?;
                }
            }
            Command::Pixel(x, y) => {
                let c = sandbox.inspect(x, y);
                writeln!(stdout, "{} {}", c, c.to_hex())?;
            }
            Command::Routines => {
                writeln!(stdout, "{}", sandbox.registry().ids().join(" "))?;
            }
            Command::Quit => break,
        }
    }

    info!("Shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};
    use pixel_sandbox::pointer::PointerEventKind;

    #[test]
    fn parses_lifecycle_and_pointer_commands() {
        assert_eq!(parse_command("reset"), Ok(Command::Reset));
        assert_eq!(parse_command("run"), Ok(Command::Run(None)));
        assert_eq!(
            parse_command("run diagonal"),
            Ok(Command::Run(Some("diagonal".into())))
        );
        assert_eq!(
            parse_command("move 50 45.5"),
            Ok(Command::Pointer(PointerEventKind::Motion, 50.0, 45.5))
        );
        assert_eq!(parse_command("  pixel 3 4 "), Ok(Command::Pixel(3, 4)));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("").is_err());
        assert!(parse_command("paint").is_err());
        assert!(parse_command("click 1").is_err());
        assert!(parse_command("move x y").is_err());
    }
}

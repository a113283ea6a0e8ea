use anyhow::Context;
use clap::Parser;
use floatball::command::{self, Command};
use floatball::config::{self, BallConfig};
use floatball::sys::SimHost;
use floatball::FloatingBall;
use orbit::Rect;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "floatball", version, about, long_about = None)]
struct Cli {
    /// JSON-lines command script; reads stdin when omitted
    script: Option<PathBuf>,

    /// Extra config file layered over the user config
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Simulated screen size
    #[arg(long, default_value = "1920x1080", value_parser = parse_screen)]
    screen: Rect,
}

fn parse_screen(s: &str) -> Result<Rect, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: f64 = w.trim().parse().map_err(|e| format!("bad width: {}", e))?;
    let height: f64 = h.trim().parse().map_err(|e| format!("bad height: {}", e))?;
    if width <= 0.0 || height <= 0.0 {
        return Err("screen size must be positive".to_string());
    }
    Ok(Rect::new(0.0, 0.0, width, height))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cfg: BallConfig = match &cli.config {
        Some(path) => config::load_config(Some(path))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load_or_default(),
    };

    let script = match &cli.script {
        Some(path) => fs_err::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let commands = command::parse_script(&script)?;

    let mut ball = FloatingBall::new(&cfg, SimHost::new(cli.screen))?;
    let mut out = std::io::stdout().lock();

    for cmd in commands {
        if cmd == Command::Frame {
            writeln!(out, "{}", serde_json::to_string(&ball.frame())?)?;
            continue;
        }
        ball.run(cmd);
        for event in ball.host_mut().take_events() {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }

    Ok(())
}

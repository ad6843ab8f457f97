//! Headless renderer: draws a scene file or one frame of a demo and writes
//! it as a binary PPM image.

use std::fs::File;
use std::io::{BufWriter, Write};

use finch::color::BLACK;
use finch::config::Config;
use finch::convert::export_rgb8;
use finch::demos;
use finch::scene::Scene;
use finch::PixelBuffer;
use log::{info, warn};

/// Simulated time fed to a demo before its frame is captured
const DEFAULT_SECONDS: f32 = 1.0;
const FRAME_SECONDS: f32 = 1.0 / 60.0;

struct Args {
    scene: Option<String>,
    demo: String,
    width: u32,
    height: u32,
    seconds: f32,
    output: String,
}

fn print_help() {
    println!("Usage: finch-render [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --scene FILE              Render a scene file (its size wins)");
    println!(
        "  --demo NAME               Render a demo frame: {} (default: basic)",
        demos::NAMES.join(", ")
    );
    println!("  --resolution WxH, -r WxH  Demo frame size (default: 800x600)");
    println!("  --seconds S               Demo time before capture (default: 1)");
    println!("  --output FILE, -o FILE    Output path (default: finch.ppm)");
    println!("  --help                    Show this help message");
}

fn parse_args() -> Args {
    let defaults = Config::default();
    let mut parsed = Args {
        scene: None,
        demo: defaults.demo,
        width: defaults.width,
        height: defaults.height,
        seconds: DEFAULT_SECONDS,
        output: "finch.ppm".to_string(),
    };

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--scene" => {
                parsed.scene = value;
                i += 1;
            },
            "--demo" => {
                if let Some(v) = value {
                    parsed.demo = v;
                }
                i += 1;
            },
            "--resolution" | "-r" => {
                if let Some((w, h)) = value.as_deref().and_then(|v| v.split_once('x')) {
                    if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                        parsed.width = w;
                        parsed.height = h;
                    }
                }
                i += 1;
            },
            "--seconds" => {
                if let Some(s) = value.and_then(|v| v.parse::<f32>().ok()) {
                    parsed.seconds = s.max(0.0);
                }
                i += 1;
            },
            "--output" | "-o" => {
                if let Some(v) = value {
                    parsed.output = v;
                }
                i += 1;
            },
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => warn!("ignoring unknown argument {}", other),
        }
        i += 1;
    }
    parsed
}

fn render_demo(args: &Args) -> Result<PixelBuffer<'static>, String> {
    let mut demo =
        demos::by_name(&args.demo).ok_or_else(|| format!("unknown demo {:?}", args.demo))?;
    let mut buffer = PixelBuffer::new(args.width, args.height).map_err(|e| e.to_string())?;
    buffer.clear(BLACK);

    let frames = (args.seconds / FRAME_SECONDS).round() as u32;
    for _ in 0..frames.max(1) {
        demo.update(FRAME_SECONDS, args.width, args.height);
    }
    demo.render(&mut buffer);
    Ok(buffer)
}

/// Binary PPM: text header, then packed RGB rows
fn write_ppm(path: &str, buffer: &PixelBuffer) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", buffer.width(), buffer.height())?;
    out.write_all(&export_rgb8(buffer))?;
    out.flush()
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = parse_args();

    let buffer = match &args.scene {
        Some(path) => {
            let scene = Scene::load(path).map_err(|e| e.to_string())?;
            scene.render_new().map_err(|e| e.to_string())?
        },
        None => render_demo(&args)?,
    };

    write_ppm(&args.output, &buffer).map_err(|e| e.to_string())?;
    info!(
        "wrote {}x{} image to {}",
        buffer.width(),
        buffer.height(),
        args.output
    );
    Ok(())
}

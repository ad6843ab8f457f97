use finch::color::{BLACK, YELLOW};
use finch::config::Config;
use finch::demos::{self, Demo};
use finch::display::{draw_text, Display, InputEvent, Key, RenderTarget};
use finch::scene::Scene;
use finch::util::FrameClock;
use finch::PixelBuffer;
use log::{info, warn};

const CONFIG_FILE: &str = "finch.json";

/// Command-line overrides layered on top of the config file
#[derive(Default)]
struct Args {
    width: Option<u32>,
    height: Option<u32>,
    vsync: Option<bool>,
    demo: Option<String>,
    config: Option<String>,
    scene: Option<String>,
}

fn print_help() {
    let defaults = Config::default();
    println!("Usage: finch [OPTIONS]");
    println!();
    println!("Options:");
    println!(
        "  --width W, -w W           Set window width (default: {})",
        defaults.width
    );
    println!(
        "  --height H, -h H          Set window height (default: {})",
        defaults.height
    );
    println!("  --resolution WxH, -r WxH  Set resolution (e.g., 640x480)");
    println!("  --no-vsync                Disable VSync for uncapped framerate");
    println!(
        "  --demo NAME               Start with a demo: {}",
        demos::NAMES.join(", ")
    );
    println!(
        "  --config FILE             Read settings from FILE (default: {})",
        CONFIG_FILE
    );
    println!("  --scene FILE              Show a scene file instead of the demos");
    println!("  --help                    Show this help message");
}

/// Parse command line arguments; unknown flags and bad values are ignored
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--no-vsync" => parsed.vsync = Some(false),
            "--width" | "-w" => {
                if let Some(v) = value {
                    parsed.width = v.parse().ok().or(parsed.width);
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if let Some(v) = value {
                    parsed.height = v.parse().ok().or(parsed.height);
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if let Some(v) = value {
                    // WxH, e.g. 640x480
                    if let Some((w, h)) = v.split_once('x') {
                        if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                            parsed.width = Some(w);
                            parsed.height = Some(h);
                        }
                    }
                    i += 1;
                }
            },
            "--demo" => {
                if let Some(v) = value {
                    parsed.demo = Some(v.clone());
                    i += 1;
                }
            },
            "--config" => {
                if let Some(v) = value {
                    parsed.config = Some(v.clone());
                    i += 1;
                }
            },
            "--scene" => {
                if let Some(v) = value {
                    parsed.scene = Some(v.clone());
                    i += 1;
                }
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

/// What the window is showing
enum Content {
    Demo(usize, Box<dyn Demo>),
    Scene(Scene),
}

fn open_demo(index: usize) -> Result<Content, String> {
    let name = demos::NAMES[index % demos::NAMES.len()];
    let demo = demos::by_name(name).ok_or_else(|| format!("unknown demo {}", name))?;
    info!("switched to demo {}", name);
    Ok(Content::Demo(index % demos::NAMES.len(), demo))
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = parse_args();

    let config_path = args.config.as_deref().unwrap_or(CONFIG_FILE);
    let mut config = Config::load_or_default(config_path).map_err(|e| e.to_string())?;
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(vsync) = args.vsync {
        config.vsync = vsync;
    }
    if let Some(demo) = args.demo {
        config.demo = demo;
    }

    let mut content = match &args.scene {
        Some(path) => {
            let scene = Scene::load(path).map_err(|e| e.to_string())?;
            // a scene fixes the buffer size
            config.width = scene.width;
            config.height = scene.height;
            Content::Scene(scene)
        },
        None => {
            let index = demos::NAMES
                .iter()
                .position(|&n| n == config.demo)
                .ok_or_else(|| format!("unknown demo {:?}", config.demo))?;
            open_demo(index)?
        },
    };

    let (width, height) = (config.width, config.height);
    let (mut display, texture_creator) =
        Display::with_options(&config.title, width, height, config.scale, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;
    let mut buffer = PixelBuffer::new(width, height).map_err(|e| e.to_string())?;

    let mut clock = FrameClock::new(60);
    let mut show_fps = false;

    println!("=== finch ===");
    println!("Resolution: {}x{}", width, height);
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  Left/Right - Cycle through demos");
    println!("  F          - Toggle FPS display");
    println!("  Escape, Q  - Quit");

    'main: loop {
        let dt = clock.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown { key, .. } => match key {
                    Key::Escape | Key::Char('q') => break 'main,
                    Key::Char('f') => {
                        show_fps = !show_fps;
                        continue;
                    },
                    Key::Left | Key::Right => {
                        if let Content::Demo(index, _) = content {
                            let count = demos::NAMES.len();
                            let next = if key == Key::Left {
                                (index + count - 1) % count
                            } else {
                                (index + 1) % count
                            };
                            content = open_demo(next)?;
                        }
                        continue;
                    },
                    _ => {},
                },
                _ => {},
            }

            if let Content::Demo(_, demo) = &mut content {
                demo.handle_event(&event);
            }
        }

        match &mut content {
            Content::Demo(_, demo) => {
                demo.update(dt, width, height);
                demo.render(&mut buffer);
            },
            Content::Scene(scene) => scene.render(&mut buffer).map_err(|e| e.to_string())?,
        }

        // FPS overlay with a shadow for visibility
        if show_fps {
            let fps_text = format!("FPS {:.0}", clock.fps());
            let y = buffer.height() as i32 - 12;
            draw_text(&mut buffer, 5, y + 1, &fps_text, BLACK);
            draw_text(&mut buffer, 4, y, &fps_text, YELLOW);
        }

        display.present(&mut target, &buffer)?;
    }

    Ok(())
}

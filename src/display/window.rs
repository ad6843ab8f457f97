//! SDL2 window, streaming texture and event translation

use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Mod, Scancode};
use sdl2::mouse::MouseButton as SdlMouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::input::{InputEvent, Key, Modifiers, MouseButton};
use super::PixelBuffer;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

/// Streaming ARGB8888 texture the pixel buffer is uploaded into
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

impl Display {
    /// Open a window showing a `width` x `height` buffer magnified by `scale`
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        scale: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let scale = scale.max(1);
        let window = video_subsystem
            .window(title, width * scale, height * scale)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;
        debug!("window {}x{} scale {} vsync {}", width, height, scale, vsync);

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Upload the buffer (pitch `stride * 4`) and flip
    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<(), String> {
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.stride() as usize * 4)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k),
                    scancode,
                    keymod,
                    ..
                } => events.push(InputEvent::KeyDown {
                    key: map_key(k),
                    scan_code: scan_code(scancode),
                    modifiers: map_modifiers(keymod),
                }),
                Event::KeyUp {
                    keycode: Some(k),
                    scancode,
                    keymod,
                    ..
                } => events.push(InputEvent::KeyUp {
                    key: map_key(k),
                    scan_code: scan_code(scancode),
                    modifiers: map_modifiers(keymod),
                }),
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                Event::MouseButtonDown {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseDown { x, y, button });
                    }
                },
                Event::MouseButtonUp {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseUp { x, y, button });
                    }
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn map_key(k: Keycode) -> Key {
    match k {
        Keycode::Escape => Key::Escape,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Space => Key::Space,
        Keycode::Backspace => Key::Backspace,
        Keycode::Tab => Key::Tab,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        other => {
            // SDL keycodes of printable keys are their ASCII value
            let code = other.into_i32();
            match u8::try_from(code) {
                Ok(b) if (0x21..0x7f).contains(&b) => Key::Char(b as char),
                _ => Key::Other(code),
            }
        },
    }
}

fn scan_code(scancode: Option<Scancode>) -> i32 {
    scancode.map_or(0, |s| s as i32)
}

fn map_modifiers(keymod: Mod) -> Modifiers {
    let mut mods = Modifiers::empty();
    if keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD) {
        mods |= Modifiers::SHIFT;
    }
    if keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD) {
        mods |= Modifiers::CONTROL;
    }
    if keymod.intersects(Mod::LALTMOD | Mod::RALTMOD) {
        mods |= Modifiers::ALT;
    }
    if keymod.intersects(Mod::LGUIMOD | Mod::RGUIMOD) {
        mods |= Modifiers::SUPER;
    }
    mods
}

fn map_mouse_button(btn: SdlMouseButton) -> Option<MouseButton> {
    match btn {
        SdlMouseButton::Left => Some(MouseButton::Left),
        SdlMouseButton::Right => Some(MouseButton::Right),
        SdlMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

use super::Demo;
use crate::color::{make_color_with_alpha, Pixel, BLACK, WHITE};
use crate::display::{draw_text, InputEvent, Key, PixelBuffer};
use crate::util::Rng;

const NUM_BALLS: usize = 7;
const MAX_SPEED: i32 = 5;
const MIN_RADIUS: i32 = 25;
const MAX_RADIUS: i32 = 60;
const SEED: u64 = 789_034;
/// Physics runs at a fixed rate regardless of frame rate
const STEP_SECONDS: f32 = 0.015;
const MAX_STEPS_PER_UPDATE: u32 = 8;

const PALETTE: [Pixel; 10] = [
    0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFF00, 0xFF00FFFF, 0xFFFF00FF, 0xFFFFFFFF, 0xFF00A5E2,
    0xFFFF6B35, 0xFF7FB800,
];

struct Ball {
    r: i32,
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    color: Pixel,
}

impl Ball {
    fn random(rng: &mut Rng, width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        let r = rng.range_i32(MIN_RADIUS, MAX_RADIUS).min(w.min(h) / 2).max(1);
        let x = rng.range_i32(r, w - r - 1) as f32;
        let y = rng.range_i32(r, h - r - 1) as f32;

        let (mut dx, mut dy) = (0, 0);
        for _ in 0..10 {
            dx = rng.range_i32(-MAX_SPEED, MAX_SPEED - 1);
            dy = rng.range_i32(-MAX_SPEED, MAX_SPEED - 1);
            if dx != 0 || dy != 0 {
                break;
            }
        }

        let color = PALETTE[rng.range_i32(0, PALETTE.len() as i32 - 1) as usize];
        Self {
            r,
            x,
            y,
            dx: dx as f32,
            dy: dy as f32,
            color,
        }
    }

    /// Reverse off any wall the ball touches, then move one step
    fn step(&mut self, width: u32, height: u32) {
        let r = self.r as f32;
        if self.x + r >= width as f32 || self.x - r < 0.0 {
            self.dx = -self.dx;
        }
        if self.y + r >= height as f32 || self.y - r < 0.0 {
            self.dy = -self.dy;
        }
        self.x += self.dx;
        self.y += self.dy;
    }

    fn draw(&self, buffer: &mut PixelBuffer) {
        let (x, y, r) = (self.x as i32, self.y as i32, self.r);
        buffer.fill_circle(x + 5, y + 5, r, make_color_with_alpha(0, 0, 0, 64));
        buffer.fill_circle(x, y, r, self.color);
        buffer.draw_circle(x, y, r, WHITE);
        buffer.fill_circle(x - r / 3, y - r / 3, r / 4, make_color_with_alpha(255, 255, 255, 128));
    }
}

/// Balls bouncing off the buffer edges; `r` restarts with a new layout
pub struct Bounce {
    balls: Vec<Ball>,
    rng: Rng,
    size: (u32, u32),
    accumulator: f32,
    steps: u64,
    restart_requested: bool,
}

impl Bounce {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(NUM_BALLS),
            rng: Rng::new(SEED),
            size: (0, 0),
            accumulator: 0.0,
            steps: 0,
            restart_requested: true,
        }
    }

    fn restart(&mut self, width: u32, height: u32) {
        self.balls.clear();
        for _ in 0..NUM_BALLS {
            self.balls.push(Ball::random(&mut self.rng, width, height));
        }
        self.size = (width, height);
        self.restart_requested = false;
    }
}

impl Default for Bounce {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Bounce {
    fn update(&mut self, dt: f32, width: u32, height: u32) {
        if self.restart_requested || self.size != (width, height) {
            self.restart(width, height);
        }

        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= STEP_SECONDS && steps < MAX_STEPS_PER_UPDATE {
            for ball in &mut self.balls {
                ball.step(width, height);
            }
            self.accumulator -= STEP_SECONDS;
            self.steps += 1;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_UPDATE {
            // drop the backlog after a long stall
            self.accumulator = 0.0;
        }
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.clear(BLACK);
        for ball in &self.balls {
            ball.draw(buffer);
        }
        draw_text(buffer, 10, 10, "BOUNCE - R to restart", WHITE);
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::KeyDown {
            key: Key::Char('r'),
            ..
        } = event
        {
            self.restart_requested = true;
        }
    }

    fn name(&self) -> &str {
        "bounce"
    }
}

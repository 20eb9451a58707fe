//! blitkit demo host
//!
//! Drives the frame loop the library expects from its host: a rock spins via
//! `transform::rotate`, a ship follows the mouse, and hits are resolved with
//! a rect test first and a pixel-exact mask test second. The display surface
//! is presented through a macroquad texture each frame.
//!
//! Controls: move the mouse, hold Tab to preview the rock's mask, Esc quits.

use blitkit::{draw, transform, Color, Mask, Rect, RuntimeConfig, Surface};
use macroquad::prelude as mq;
use std::path::Path;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const CONFIG_PATH: &str = "blitkit.ron";

/// Degrees per second
const SPIN_SPEED: f32 = 60.0;

fn init_logging() {
    // window_conf runs before main, so both may call this
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

fn load_config() -> RuntimeConfig {
    match RuntimeConfig::load_or_default(Path::new(CONFIG_PATH)) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            RuntimeConfig::default()
        }
    }
}

fn window_conf() -> mq::Conf {
    init_logging();
    let cfg = load_config();
    let scale = cfg.pixel_scale.max(1) as usize;
    mq::Conf {
        window_title: format!("{} v{}", cfg.window_title, VERSION),
        window_width: (cfg.width * scale) as i32,
        window_height: (cfg.height * scale) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

/// Ship sprite: hull ellipse with a cockpit, facing right
fn make_ship() -> Surface {
    let mut ship = Surface::new(24, 16);
    draw::fill_ellipse(
        &mut ship,
        (12.0, 8.0),
        (11.0, 6.0),
        0.0,
        0.0,
        std::f32::consts::TAU,
        Color::new(90, 200, 255),
    );
    draw::fill_circle(&mut ship, (16.0, 8.0), 3.0, Color::WHITE);
    draw::line(&mut ship, (1.0, 8.0), (6.0, 8.0), Color::new(255, 160, 40), 2.0);
    ship
}

/// Rock sprite: drawn on a magenta backdrop that is then keyed out
fn make_rock() -> Surface {
    let mut rock = Surface::new(40, 28);
    rock.fill("magenta");
    draw::fill_rect(&mut rock, &Rect::new(4.0, 6.0, 32.0, 16.0), Color::new(140, 120, 100));
    draw::fill_circle(&mut rock, (10.0, 10.0), 6.0, Color::new(120, 100, 80));
    draw::arc(&mut rock, (28.0, 18.0), 5.0, 0.0, 3.0, Color::new(70, 60, 50), 2.0);
    rock.set_colorkey(Some(Color::new(255, 0, 255)));
    rock
}

/// Push the display surface to the window, scaled to fit
fn present(display: &Surface) {
    let texture = mq::Texture2D::from_rgba8(
        display.width() as u16,
        display.height() as u16,
        display.pixels(),
    );
    texture.set_filter(mq::FilterMode::Nearest);
    mq::draw_texture_ex(
        &texture,
        0.0,
        0.0,
        mq::WHITE,
        mq::DrawTextureParams {
            dest_size: Some(mq::vec2(mq::screen_width(), mq::screen_height())),
            ..Default::default()
        },
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    init_logging();
    let cfg = load_config();
    log::info!("=== blitkit v{} === {}x{}", VERSION, cfg.width, cfg.height);

    let mut display = Surface::new(cfg.width, cfg.height);
    let mut ship_right = make_ship();
    let mut ship_left = transform::flip(&ship_right, (true, false));
    let ship_right_mask = Mask::from_surface(&ship_right, cfg.mask_threshold);
    let ship_left_mask = Mask::from_surface(&ship_left, cfg.mask_threshold);
    let rock = make_rock();

    let mut angle = 0.0f32;
    let mut last_mouse_x = 0.0f32;
    let mut facing_left = false;

    loop {
        if mq::is_key_pressed(mq::KeyCode::Escape) {
            break;
        }
        let dt = mq::get_frame_time();
        angle = (angle + SPIN_SPEED * dt) % 360.0;

        // Mouse in display-surface pixels
        let (mx, my) = mq::mouse_position();
        let mx = mx * cfg.width as f32 / mq::screen_width().max(1.0);
        let my = my * cfg.height as f32 / mq::screen_height().max(1.0);
        if (mx - last_mouse_x).abs() > 0.5 {
            facing_left = mx < last_mouse_x;
            last_mouse_x = mx;
        }
        let (ship, ship_mask) = if facing_left {
            (&mut ship_left, &ship_left_mask)
        } else {
            (&mut ship_right, &ship_right_mask)
        };

        // Spin the rock around the display center
        let mut spun = transform::rotate(&rock, angle);
        let rock_pos = (
            (cfg.width as f32 - spun.width() as f32) * 0.5,
            (cfg.height as f32 - spun.height() as f32) * 0.5,
        );
        let rock_rect = spun.get_rect(Some(rock_pos)).copy();
        let ship_pos = (mx - ship.width() as f32 * 0.5, my - ship.height() as f32 * 0.5);
        let ship_rect = ship.get_rect(Some(ship_pos)).copy();

        // Broad phase on rects, narrow phase on masks
        let mut hit = None;
        if rock_rect.colliderect(&ship_rect) {
            let rock_mask = Mask::from_surface(&spun, cfg.mask_threshold);
            // Blits floor positions, so compare floored origins
            let offset = (
                ship_rect.x.floor() - rock_rect.x.floor(),
                ship_rect.y.floor() - rock_rect.y.floor(),
            );
            hit = rock_mask
                .overlap(ship_mask, offset)
                .map(|(x, y)| (rock_rect.x.floor() + x as f32, rock_rect.y.floor() + y as f32));
        }

        display.fill(cfg.clear_color);
        display.blit(&spun, rock_rect.pos());
        display.blit(ship, ship_rect.pos());

        if let Some(point) = hit {
            draw::rect(&mut display, &ship_rect, Color::RED, 1.0);
            draw::circle(&mut display, point, 4.0, Color::with_alpha(255, 60, 60, 0.8), 2.0);
        }

        if mq::is_key_down(mq::KeyCode::Tab) {
            let preview = Mask::from_surface(&spun, cfg.mask_threshold)
                .to_surface(Color::WHITE, Color::with_alpha(0, 0, 0, 0.5));
            let (w, h) = preview.size();
            let preview = transform::scale(&preview, (w / 2, h / 2));
            display.blit(&preview, (4.0, 4.0));
        }

        present(&display);
        mq::next_frame().await;
    }
}

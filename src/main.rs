use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;

mod constants;
mod controller;
mod frames;
mod intro;
mod track;
mod texture_loader;

use crate::constants::*;
use crate::controller::{ControllerConfig, DisplayAsset, ScrubController, TrackAxes};
use crate::frames::FrameSet;
use crate::track::{Axis, Point, Track, TrackLayout};
use crate::texture_loader::load_texture_with_exif_rotation;

/// Interactive Hanger Lamp product viewer. Drag the track (or scroll) to
/// move the lamp arm through its photographed positions; click the switch
/// (or press L) to turn the lamp off and on.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Directory containing the product shot sequence (an `_OFF` file
    /// becomes the lamp-off shot)
    images: PathBuf,

    /// Skip the startup animation
    #[arg(long)]
    no_intro: bool,

    /// Disable scroll-linked scrubbing
    #[arg(long)]
    no_scroll: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let frames = FrameSet::from_dir(&args.images)
        .with_context(|| format!("Failed to load frames from {:?}", args.images))?;
    println!(
        "Loaded {} frames from {:?} (off shot: {})",
        frames.len(),
        args.images,
        frames.off_asset().map_or("none", |a| a.label.as_str()),
    );

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Hanger Lamp")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Textures ---
    let mut frame_textures = Vec::with_capacity(frames.len());
    for asset in frames.frames() {
        let texture = load_texture_with_exif_rotation(&mut rl, &thread, &asset.path)
            .with_context(|| format!("Failed to load frame {}", asset.label))?;
        frame_textures.push(texture);
    }
    // A broken off shot only disables the toggle, the scrub still works.
    let off_texture = match frames.off_asset() {
        Some(asset) => match load_texture_with_exif_rotation(&mut rl, &thread, &asset.path) {
            Ok(texture) => Some(texture),
            Err(e) => {
                eprintln!("Warning: could not load off shot {}: {:#}", asset.label, e);
                None
            }
        },
        None => None,
    };

    let config = ControllerConfig {
        axes: TrackAxes::Dual,
        has_intro: !args.no_intro,
        has_scroll_scrub: !args.no_scroll,
    };
    let mut controller = ScrubController::new(frames.len(), config);
    let mut scroll_y: f32 = 0.0;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let sw = rl.get_screen_width() as f32;
        let sh = rl.get_screen_height() as f32;

        let layout = compute_tracks(sw, sh);
        controller.set_tracks(layout);

        // --- Input ---
        let mouse = rl.get_mouse_position();
        let pointer = Point::new(mouse.x, mouse.y);
        let toggle_rect = toggle_button_rect(sh);

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if toggle_rect.check_collision_point_rec(mouse) {
                if off_texture.is_some() {
                    controller.toggle_light();
                }
            } else {
                controller.press(pointer);
            }
        }
        if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) && controller.is_dragging() {
            controller.drag_move(Some(pointer));
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            controller.release();
        }

        if rl.is_key_pressed(KeyboardKey::KEY_L) && off_texture.is_some() {
            controller.toggle_light();
        }

        // Wheel notches accumulate into a virtual page scroll offset; the
        // controller only reads the position.
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            scroll_y = (scroll_y - wheel * SCROLL_WHEEL_STEP).max(0.0);
            controller.scroll(scroll_y, sh);
        }

        controller.tick(dt);
        let snap = controller.snapshot();

        rl.set_mouse_cursor(if snap.is_dragging {
            MouseCursor::MOUSE_CURSOR_RESIZE_ALL
        } else {
            MouseCursor::MOUSE_CURSOR_DEFAULT
        });

        // --- Draw ---
        let background = if snap.is_off {
            Color::new(0x7f, 0x7d, 0x75, 255)
        } else {
            Color::new(0xd9, 0xd5, 0xcd, 255)
        };
        let ink = Color::new(0x1a, 0x1a, 0x1a, 255);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(background);

        let texture = match snap.display {
            DisplayAsset::Off => off_texture.as_ref().unwrap_or(&frame_textures[snap.active_frame]),
            DisplayAsset::Frame(i) => &frame_textures[i],
        };
        draw_product_shot(&mut d, texture, sw, sh);

        // Switch thumbnail / toggle button
        let toggle_ink = if off_texture.is_some() { ink } else { ink.fade(0.3) };
        d.draw_rectangle_lines_ex(toggle_rect, 2.0, toggle_ink);
        let toggle_label = if snap.is_off { "ON" } else { "OFF" };
        d.draw_text(
            toggle_label,
            toggle_rect.x as i32 + 10,
            toggle_rect.y as i32 + 16,
            16,
            toggle_ink,
        );

        if let Some(track) = layout.horizontal {
            draw_track(&mut d, &track, &snap, ink);
        }
        if let Some(track) = layout.vertical {
            draw_track(&mut d, &track, &snap, ink);
        }

        if snap.show_hint {
            let hint = "drag to explore";
            let width = d.measure_text(hint, 20);
            d.draw_text(hint, (sw as i32 - width) / 2, sh as i32 - 110, 20, ink);
        }

        let label = if snap.is_off {
            "OFF"
        } else {
            frames.frame(snap.active_frame).label.as_str()
        };
        d.draw_text(label, 40, 40, 20, ink);
    }

    Ok(())
}

// The horizontal track is always mounted (narrow layout); the vertical one
// joins it when the window is wider than tall, mirroring the two responsive
// layouts. Both being mounted at once is exactly what the controller's
// routing heuristic exists for.
fn compute_tracks(sw: f32, sh: f32) -> TrackLayout {
    let horizontal = Track::new(Axis::Horizontal, 120.0, (sw - 240.0).max(1.0), sh - 72.0, 48.0);
    let vertical = if sw > sh {
        Some(Track::new(Axis::Vertical, 120.0, (sh - 240.0).max(1.0), sw - 72.0, 48.0))
    } else {
        None
    };
    TrackLayout { horizontal: Some(horizontal), vertical }
}

fn toggle_button_rect(sh: f32) -> Rectangle {
    Rectangle::new(40.0, sh - 72.0, 48.0, 48.0)
}

fn draw_product_shot(d: &mut RaylibDrawHandle, texture: &Texture2D, sw: f32, sh: f32) {
    let tw = texture.width() as f32;
    let th = texture.height() as f32;
    let scale = ((sw * 0.8) / tw).min((sh * 0.8) / th);
    let dw = tw * scale;
    let dh = th * scale;
    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tw, th),
        Rectangle::new((sw - dw) / 2.0, (sh - dh) / 2.0 - 20.0, dw, dh),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::WHITE,
    );
}

fn draw_track(
    d: &mut RaylibDrawHandle,
    track: &Track,
    snap: &crate::controller::Snapshot,
    ink: Color,
) {
    // Dim the whole affordance while it is not interactive
    let ink = if snap.is_off || snap.is_intro_playing { ink.fade(0.3) } else { ink };
    let mid = track.cross_start + track.cross_length / 2.0;
    let handle_at = track.start + track.length * snap.slider_position / 100.0;

    match track.axis {
        Axis::Horizontal => {
            d.draw_line_ex(
                Vector2::new(track.start, mid),
                Vector2::new(track.start + track.length, mid),
                1.0,
                ink,
            );
            d.draw_rectangle((handle_at - 2.0) as i32, (mid - 16.0) as i32, 4, 32, ink);
        }
        Axis::Vertical => {
            d.draw_line_ex(
                Vector2::new(mid, track.start),
                Vector2::new(mid, track.start + track.length),
                1.0,
                ink,
            );
            d.draw_rectangle((mid - 16.0) as i32, (handle_at - 2.0) as i32, 32, 4, ink);
        }
    }
}

// What you SEE:
// • The photo on a checkerboard; erased parts show the checkerboard through.
// • Hold Left Mouse: paint with the current tool (E erase, R restore, P pan).
// • [ / ] brush size, - / = hardness, wheel or Q / W zoom, 0 resets the view.
// • Z undoes the last stroke, C makes the whole photo visible again.
// • Enter saves the cutout PNG and quits. ESC (or closing the window) cancels.
//
// Usage: cutout <input image> [output.png]

mod draw;

use std::path::{Path, PathBuf};

use cutout::composite;
use cutout::error::{Error, Result};
use cutout::gamma::GammaLut;
use cutout::types::FrameBuffer;
use cutout::{Editor, EditorConfig, PointerEvent, Tool};
use draw::{Drawer, draw_crosshair, draw_ring, draw_text_5x7};
use kurbo::Point;
use minifb::Key;
use tracing_subscriber::EnvFilter;

const MAX_WINDOW: (u32, u32) = (1280, 900);
const MIN_WINDOW: (u32, u32) = (480, 360);

fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("cutout");
    input.with_file_name(format!("{stem}_cutout.png"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cutout=info")))
        .init();

    let mut args = std::env::args_os().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        return Err(Error::Config("usage: cutout <input image> [output.png]".into()));
    };
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| default_output(&input));

    /* --- Session setup ---
       Visual: nothing yet; the photo is decoded and the mask starts fully opaque. */
    let config = EditorConfig::load();
    let bytes = std::fs::read(&input)?;
    let mut editor = Editor::open_encoded(&bytes, config)?;

    let (iw, ih) = (editor.image().width(), editor.image().height());
    let ww = iw.clamp(MIN_WINDOW.0, MAX_WINDOW.0) as usize;
    let wh = ih.clamp(MIN_WINDOW.1, MAX_WINDOW.1) as usize;
    let mut drawer = Drawer::new("Cutout - Refine", ww, wh)?;

    /* --- Screen buffers ---
       `canvas` holds the composite drawn through the viewport (redrawn only when it changes);
       `screen` is canvas + cursor + HUD, rebuilt every frame. */
    let mut canvas = FrameBuffer::new(ww, wh);
    let mut screen = FrameBuffer::new(ww, wh);
    let lut = GammaLut::new();
    let mut canvas_stale = true;

    let mut was_down = false;
    let mut last_mouse: Option<(f32, f32)> = None;
    let mut saved = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        if drawer.pressed_once(Key::Escape) {
            break;
        }

        /* 1) Keyboard: tools, brush, view, history */
        if drawer.pressed_once(Key::E) { editor.set_tool(Tool::Erase); }
        if drawer.pressed_once(Key::R) { editor.set_tool(Tool::Restore); }
        if drawer.pressed_once(Key::P) { editor.set_tool(Tool::Pan); }

        let brush = editor.brush();
        if drawer.pressed_repeat(Key::LeftBracket) { editor.set_brush_size(brush.size - 5.0); }
        if drawer.pressed_repeat(Key::RightBracket) { editor.set_brush_size(brush.size + 5.0); }
        if drawer.pressed_repeat(Key::Minus) { editor.set_hardness(brush.hardness - 0.1); }
        if drawer.pressed_repeat(Key::Equal) { editor.set_hardness(brush.hardness + 0.1); }

        let scale_before = editor.viewport().scale();
        if drawer.pressed_repeat(Key::Q) { editor.zoom_steps(-1.0); }
        if drawer.pressed_repeat(Key::W) { editor.zoom_steps(1.0); }
        let wheel = drawer.scroll_y();
        if wheel != 0.0 { editor.zoom_steps(wheel.signum() as f64); }
        if drawer.pressed_once(Key::Key0) { editor.reset_view(); }
        if editor.viewport().scale() != scale_before { canvas_stale = true; }

        if drawer.pressed_once(Key::Z) { canvas_stale |= editor.undo(); }
        if drawer.pressed_once(Key::C) { canvas_stale |= editor.reset_mask(); }

        /* 2) Mouse -> pointer events (edge-detected)
           Visual: strokes appear under the brush ring while the button is held. */
        let mouse = drawer.mouse_pos();
        let down = drawer.left_mouse_down();
        let event = match (mouse, was_down, down) {
            (None, true, _) => Some(PointerEvent::Leave),
            (Some((x, y)), false, true) => Some(PointerEvent::Down(Point::new(x as f64, y as f64))),
            (Some((x, y)), true, true) if mouse != last_mouse => {
                Some(PointerEvent::Move(Point::new(x as f64, y as f64)))
            }
            (_, true, false) => Some(PointerEvent::Up),
            _ => None,
        };
        if let Some(event) = event {
            let panning_before = editor.viewport().offset();
            canvas_stale |= editor.handle(event);
            canvas_stale |= editor.viewport().offset() != panning_before;
        }
        was_down = down && mouse.is_some();
        last_mouse = mouse;

        /* 3) Enter: encode and save. On failure the session stays open so you can retry. */
        if drawer.pressed_once(Key::Enter) && editor.is_idle() {
            match editor.confirm() {
                Ok(cutout) => match std::fs::write(&output, &cutout.bytes) {
                    Ok(()) => {
                        tracing::info!("wrote {}", output.display());
                        saved = true;
                        break;
                    }
                    Err(e) => tracing::error!("could not write {}: {e}", output.display()),
                },
                Err(e) => tracing::error!("export failed: {e}"),
            }
        }

        /* 4) Redraw the composite only when something changed. */
        if canvas_stale {
            composite::present(editor.display(), editor.viewport(), &mut canvas, &lut);
            canvas_stale = false;
        }
        screen.pixels.copy_from_slice(&canvas.pixels);

        /* 5) Cursor + HUD on top */
        if let Some((mx, my)) = mouse {
            let (mx, my) = (mx as i32, my as i32);
            if editor.tool() == Tool::Pan {
                draw_crosshair(&mut screen, mx, my, 8, 0x00_FF_CC_33);
            } else {
                let r = (editor.brush().radius() * editor.viewport().scale()).round() as i32;
                draw_ring(&mut screen, mx, my, r, 0x00_FF_FF_FF);
                draw_crosshair(&mut screen, mx, my, 3, 0x00_FF_CC_33);
            }
        }

        let b = editor.brush();
        let hud = format!(
            "{} | SIZE {:.0} | HARD {:.1} | ZOOM {:.2}X | UNDO {}",
            editor.tool().label(),
            b.size,
            b.hardness,
            editor.viewport().scale(),
            editor.history().len() - 1,
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);
        draw_text_5x7(&mut screen, 8, wh as i32 - 16, "ENTER: DONE  ESC: CANCEL", 0x00_AA_AA_AA);

        drawer.present(&screen)?;
    }

    if !saved {
        editor.cancel();
    }
    Ok(())
}

//! Art Star main loop
//!
//! Single-threaded and render-then-mutate: draw the current frame, poll
//! for a key, apply the command, repeat. Parameters are saved once, on
//! the way out.

use anyhow::{Context, Result};
use tracing::{error, info};

use artstar::display::Display;
use artstar::session::CommandOutcome;
use artstar::store::{self, DEFAULT_STORE_PATH};
use artstar::{Command, ImageCollection, Session};
use artstar_transform::fit_to_viewport;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let params = store::load_parameters(DEFAULT_STORE_PATH);
    let collection = ImageCollection::load(params).context("loading source images")?;
    let mut session = Session::new(collection);
    let mut display = Display::open().context("opening display window")?;

    let mut needs_render = true;
    let mut last_size = (0, 0);

    while display.is_open() {
        let size = display.client_size();
        if size != last_size {
            last_size = size;
            needs_render = true;
        }

        if needs_render {
            match session.render_frame() {
                Ok(frame) => {
                    let fitted = fit_to_viewport(&frame, size.0, size.1)?;
                    display.set_annotation(&annotation(&session));
                    display.present(&fitted)?;
                }
                Err(err) => {
                    // Keep the session alive; the next keypress may fix it.
                    error!(%err, "render failed");
                    display.pump();
                }
            }
            needs_render = false;
        } else {
            display.pump();
        }

        let shift = display.shift_down();
        let mut quit = false;
        for key in display.pressed_keys() {
            let Some(command) = Command::from_key(key, shift) else {
                continue;
            };
            match session.apply(command) {
                CommandOutcome::Redraw => needs_render = true,
                CommandOutcome::Quit => quit = true,
            }
        }
        if quit {
            break;
        }
    }

    store::save_parameters(DEFAULT_STORE_PATH, &session.collection().parameters())
        .context("saving parameter document")?;
    info!("session saved, exiting");
    Ok(())
}

fn annotation(session: &Session) -> String {
    let (low, high) = session.edge_thresholds();
    format!(
        "[{}] {} | edge {} ({low},{high}) | blend {} ({:?})",
        session.current_index(),
        session.current_path(),
        if session.use_edge_detection() { "on" } else { "off" },
        if session.use_blending() { "on" } else { "off" },
        session.blend_direction(),
    )
}

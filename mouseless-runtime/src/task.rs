//! Periodic render task

use embassy_time::{Duration, Ticker, Timer};
use tracing::{info, warn};

use std::rc::Rc;

use mouseless_core::markup::MarkupParser;
use mouseless_core::traits::Storage;
use mouseless_display::PixelDisplay;

use crate::channels::InputChannel;
use crate::config::{load_config, ConfigError, DeviceConfig, CONFIG_PATH};
use crate::renderer::Renderer;

/// Poll period while waiting for the panel to finish a transfer
const READY_POLL_MS: u64 = 1;

/// Build the renderer from the on-storage configuration and open the start page
///
/// A start page that fails to load is logged; the renderer then shows an
/// empty body under the status bar.
pub fn boot<D: PixelDisplay, S: Storage>(
    display: D,
    storage: S,
    parser: Rc<dyn MarkupParser>,
    input: &'static InputChannel,
) -> Result<(Renderer<D, S>, DeviceConfig), ConfigError> {
    let config = load_config(&storage, CONFIG_PATH)?;
    let mut renderer = Renderer::new(display, storage, parser, input, config.renderer.clone());
    if let Err(err) = renderer.open(&config.start_page) {
        warn!(%err, "start page failed to load");
    }
    Ok((renderer, config))
}

/// Render loop, one tick every `interval`
///
/// Each tick waits until the previous frame transfer has completed. Display
/// errors drop the frame; the loop never exits.
pub async fn render_task<D: PixelDisplay, S: Storage>(
    renderer: &mut Renderer<D, S>,
    interval: Duration,
) -> ! {
    info!(interval_ms = interval.as_millis(), "render task started");

    let mut ticker = Ticker::every(interval);
    loop {
        ticker.next().await;

        while !renderer.display().is_ready() {
            Timer::after_millis(READY_POLL_MS).await;
        }
        if let Err(err) = renderer.tick() {
            warn!(?err, "frame dropped");
        }
    }
}

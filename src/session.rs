//! One mounted cover view: compositor, drawing surface and animation loop, driven by UI actions.

use std::path::{Path, PathBuf};

use rand::Rng;
use rand::rngs::StdRng;

use crate::compositor::Compositor;
use crate::export::export_current_frame;
use crate::foundation::core::Color;
use crate::foundation::error::CoverResult;
use crate::render::surface::Surface;
use crate::scheduler::{AnimationLoop, FrameRequest, FrameScheduler};

pub struct CoverSession<F: FrameScheduler, S: Surface, R = StdRng> {
    compositor: Compositor<R>,
    surface: S,
    frame_loop: AnimationLoop<F>,
}

impl<F: FrameScheduler, S: Surface, R: Rng> CoverSession<F, S, R> {
    pub fn new(compositor: Compositor<R>, surface: S, scheduler: F) -> Self {
        Self {
            compositor,
            surface,
            frame_loop: AnimationLoop::new(scheduler),
        }
    }

    /// Start the animation loop. No-op when already mounted.
    pub fn mount(&mut self) {
        if !self.frame_loop.is_active() {
            self.frame_loop.start();
            tracing::debug!("cover session mounted");
        }
    }

    /// Stop the animation loop, cancelling the pending frame. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.frame_loop.is_active()
    }

    /// Handle a fired frame callback. Stale or post-unmount callbacks draw nothing.
    ///
    /// Returns whether a frame was drawn.
    pub fn on_frame(&mut self, request: FrameRequest, now_ms: f64) -> CoverResult<bool> {
        if !self.frame_loop.accept(request) {
            return Ok(false);
        }
        self.compositor.frame(now_ms, &mut self.surface)?;
        Ok(true)
    }

    pub fn toggle_running(&mut self) -> bool {
        self.compositor.toggle_running()
    }

    /// Clicking the canvas toggles sticker generation.
    pub fn click_canvas(&mut self) -> bool {
        self.toggle_running()
    }

    /// Change the background and redraw right away with stickers and bands cleared.
    pub fn set_background(&mut self, color: Color) -> CoverResult<()> {
        self.compositor.set_background(color);
        self.redraw()
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.compositor.set_text_color(color);
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.compositor.set_bar_color(color);
    }

    /// Replace the bands and redraw right away.
    pub fn generate_pattern(&mut self) -> CoverResult<()> {
        self.compositor.regenerate_bands();
        self.redraw()
    }

    /// Remove stickers and bands and redraw right away.
    pub fn clear(&mut self) -> CoverResult<()> {
        self.compositor.clear();
        self.redraw()
    }

    /// Save the last drawn frame as `dir/pop-cover.png`; `None` when nothing was drawn yet.
    pub fn export(&self, dir: &Path) -> CoverResult<Option<PathBuf>> {
        export_current_frame(&self.surface, dir)
    }

    fn redraw(&mut self) -> CoverResult<()> {
        if !self.is_mounted() {
            return Ok(());
        }
        self.compositor.draw(&mut self.surface)
    }

    pub fn compositor(&self) -> &Compositor<R> {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor<R> {
        &mut self.compositor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        self.frame_loop.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        self.frame_loop.scheduler_mut()
    }
}

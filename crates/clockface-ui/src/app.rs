use anyhow::Result;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use clockface_engine::core::{App as EngineApp, AppControl, FrameCtx};
use clockface_engine::device::GpuInit;
use clockface_engine::paint::Color;
use clockface_engine::render::SceneRenderer;
use clockface_engine::scene::DrawList;
use clockface_engine::text::{FontId, FontSystem};
use clockface_engine::time::Cadence;
use clockface_engine::window::{Runtime, RuntimeConfig};

use crate::driver::ClockDriver;
use crate::face::ClockFace;
use crate::painter::Painter;
use crate::style::FaceStyle;
use crate::time_source::{TimeZoneSetting, WallClock};

// ── Application ───────────────────────────────────────────────────────────

/// Top-level clock application builder.
///
/// Configure the window, font and timezone, then start the event loop with
/// [`Application::run`].
///
/// ```rust,ignore
/// Application::new()
///     .title("Clockface")
///     .size(480.0, 480.0)
///     .font(load_font())
///     .timezone("Europe/Paris".parse()?)
///     .run()?;
/// ```
pub struct Application {
    title:              String,
    width:              f64,
    height:             f64,
    font:               Option<Vec<u8>>,
    timezone:           TimeZoneSetting,
    face:               ClockFace,
    updates_per_second: u32,
    margin:             f32,
    background:         Color,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:              "clockface".to_string(),
            width:              480.0,
            height:             480.0,
            font:               None,
            timezone:           TimeZoneSetting::Local,
            face:               ClockFace::new(),
            updates_per_second: 1,
            margin:             16.0,
            background:         Color::from_straight(0.07, 0.07, 0.09, 1.0),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Font used for the numerals. Without one the dial is drawn without numerals.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.font = Some(data);
        self
    }

    /// Zone the wall clock is read in. Defaults to the local zone.
    pub fn timezone(mut self, zone: TimeZoneSetting) -> Self {
        self.timezone = zone;
        self
    }

    /// Replace the face (hands and style) drawn by the application.
    pub fn face(mut self, face: ClockFace) -> Self {
        self.face = face;
        self
    }

    /// Replace only the face style.
    pub fn style(mut self, style: FaceStyle) -> Self {
        self.face = self.face.with_style(style);
        self
    }

    /// How many times per second the hands are updated (at least 1).
    pub fn updates_per_second(mut self, n: u32) -> Self {
        self.updates_per_second = n.max(1);
        self
    }

    /// Space between the window edge and the dial, in logical pixels.
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Window clear color around the dial.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    // ── Entry point ───────────────────────────────────────────────────────

    /// Opens the window and runs the event loop until it is closed.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        log::info!("starting clock ({} time)", self.timezone);
        let state = ClockAppState::new(self);
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── ClockAppState ─────────────────────────────────────────────────────────

/// Internal state that implements `clockface_engine::core::App`.
///
/// Everything engine-specific (renderers, FrameCtx) lives here.
struct ClockAppState {
    driver: ClockDriver<WallClock, Cadence>,

    font_system: FontSystem,
    font:        Option<FontId>,
    draw_list:   DrawList,
    renderer:    SceneRenderer,

    margin:     f32,
    background: Color,
}

impl ClockAppState {
    fn new(app: Application) -> Self {
        let mut font_system = FontSystem::new();
        let font = app.font.as_deref().and_then(|bytes| match font_system.load_font(bytes) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("{e}; numerals will not be rendered");
                None
            }
        });
        if app.font.is_none() {
            log::warn!("no font configured; numerals will not be rendered");
        }

        let driver = ClockDriver::new(
            app.face,
            WallClock::new(app.timezone),
            Cadence::per_second(app.updates_per_second),
        );

        Self {
            driver,
            font_system,
            font,
            draw_list: DrawList::new(),
            renderer: SceneRenderer::new(),
            margin: app.margin,
            background: app.background,
        }
    }
}

fn is_exit_key(key: PhysicalKey, state: ElementState) -> bool {
    state == ElementState::Pressed && key == PhysicalKey::Code(KeyCode::Escape)
}

impl EngineApp for ClockAppState {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. } if is_exit_key(event.physical_key, event.state) => {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn next_frame_deadline(&self) -> Option<std::time::Instant> {
        self.driver.next_deadline()
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.driver.update(ctx.time.now);

        let viewport = ctx.viewport();
        if !viewport.is_valid() {
            // Minimized: nothing to present.
            return AppControl::Continue;
        }

        // ── Record ────────────────────────────────────────────────────────
        let region = viewport.centered_square().inset(self.margin);
        self.draw_list.clear();
        {
            let mut painter = Painter::new(&mut self.draw_list, &self.font_system, self.font);
            self.driver.face().render(Some(&mut painter), region);
        }

        // ── Render ────────────────────────────────────────────────────────
        let dl       = &mut self.draw_list;
        let fs       = &self.font_system;
        let renderer = &mut self.renderer;

        ctx.render(self.background, |rctx, target| {
            renderer.render(rctx, target, dl, fs);
        })
    }
}

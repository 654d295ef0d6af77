// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! A lucky wheel: a list of names drawn as colored slices, spun with an
//! eased animation, with optional priority names that win first and a
//! history of results.
//!
//! [`WheelSession`] holds all the rules and can be driven without a window.
//! [`LuckyWheel`] puts it on screen.

pub mod animator;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod layout;
pub mod render;
pub mod selector;
pub mod session;
pub mod store;

pub use config::{Color, WheelConfig};
pub use error::WheelError;
pub use history::{HistoryEntry, HistoryLog};
pub use selector::{select_next, PriorityNames, WonSet};
pub use session::{SpinOutcome, SpinState, WheelCommand, WheelSession};
pub use store::ItemStore;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use tracing::{error, info, warn};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use input::TextInput;
use layout::{HitContext, Layout, UiTarget};
use render::{load_font, render_frame, Canvas, FrameView};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// The wheel window and the session behind it
pub struct LuckyWheel {
    config: WheelConfig,
    session: WheelSession,
}

impl LuckyWheel {
    pub fn new(config: WheelConfig) -> Self {
        let session = WheelSession::from_config(&config);
        Self { config, session }
    }

    pub fn session(&self) -> &WheelSession {
        &self.session
    }

    pub fn show(&mut self) -> Result<(), WheelError> {
        self.run_window(None)
    }

    /// Like [`show`](Self::show), also applying commands sent from elsewhere.
    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<WheelCommand>,
    ) -> Result<(), WheelError> {
        self.run_window(Some(receiver))
    }

    fn run_window(&mut self, receiver: Option<Receiver<WheelCommand>>) -> Result<(), WheelError> {
        let Self { config, session } = self;
        let width = config.window_width();
        let height = config.window_height();
        let layout = Layout::new(config);
        let font = load_font(config.font_path.as_deref())?;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(width as u32, height as u32, surface_texture)?;

        let mut view = ViewState::new(config.max_input_chars);
        let frame_duration = Duration::from_secs_f64(1.0 / config.max_framerate);
        let mut last_frame = Instant::now();

        info!(
            items = session.items().len(),
            priority_names = session.priority().len(),
            "wheel window open"
        );

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        session.shutdown();
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!(%err, "surface resize failed");
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        view.cursor = pixels
                            .window_pos_to_pixel((position.x as f32, position.y as f32))
                            .ok()
                            .map(|(x, y)| (x as i32, y as i32));
                    }
                    WindowEvent::CursorLeft { .. } => {
                        view.cursor = None;
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        let Some((x, y)) = view.cursor else { return };
                        let context = HitContext {
                            dialog_open: session.pending_result().is_some(),
                            item_count: session.items().len(),
                            item_scroll: view.item_scroll,
                        };
                        if let Some(command) = layout
                            .hit_test(x, y, context)
                            .and_then(|target| view.command_for_target(target))
                        {
                            session.apply(command, Instant::now());
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let over_list = view
                            .cursor
                            .is_some_and(|(x, y)| layout.items_list.contains(x, y));
                        if over_list {
                            let rows = match delta {
                                MouseScrollDelta::LineDelta(_, y) => -y.round() as i32,
                                MouseScrollDelta::PixelDelta(position) => {
                                    -(position.y / layout.row_height as f64).round() as i32
                                }
                            };
                            view.scroll_items(rows, layout.max_item_scroll(session.items().len()));
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. }
                        if event.state == ElementState::Pressed =>
                    {
                        let dialog_open = session.pending_result().is_some();
                        if let Some(command) = view.command_for_key(
                            &event.logical_key,
                            event.text.as_deref(),
                            dialog_open,
                        ) {
                            session.apply(command, Instant::now());
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        if let Some(ref receiver) = receiver {
                            session.drain_commands(receiver, now);
                        }
                        session.tick(now);
                        view.scroll_items(0, layout.max_item_scroll(session.items().len()));

                        let frame_view = FrameView {
                            items: session.items().as_slice(),
                            rotation: session.rotation(),
                            history: session.history(),
                            input: view.input.text(),
                            input_blank: view.input.is_blank(),
                            item_scroll: view.item_scroll,
                            pending: session.pending_result().map(|(_, item)| item),
                            spinning: session.is_spinning(),
                        };
                        let mut canvas = Canvas::new(pixels.frame_mut(), width, height);
                        render_frame(&mut canvas, &frame_view, &layout, config, font.as_ref());
                        if let Err(err) = pixels.render() {
                            error!(%err, "frame presentation failed");
                            session.shutdown();
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

// ============================================================================
// INTERNAL IMPLEMENTATION
// ============================================================================

/// UI state that is not part of the session: the edit buffer, list scroll
/// position and last known cursor position in framebuffer pixels.
struct ViewState {
    input: TextInput,
    item_scroll: usize,
    cursor: Option<(i32, i32)>,
}

impl ViewState {
    fn new(max_input_chars: usize) -> Self {
        Self {
            input: TextInput::new(max_input_chars),
            item_scroll: 0,
            cursor: None,
        }
    }

    fn scroll_items(&mut self, rows: i32, max_scroll: usize) {
        let target = self.item_scroll as i64 + rows as i64;
        self.item_scroll = target.clamp(0, max_scroll as i64) as usize;
    }

    fn command_for_target(&mut self, target: UiTarget) -> Option<WheelCommand> {
        match target {
            UiTarget::Wheel => Some(WheelCommand::Spin),
            UiTarget::InputBox => None,
            UiTarget::AddButton => self.input.submit().map(WheelCommand::AddItem),
            UiTarget::SpinButton => Some(WheelCommand::Spin),
            UiTarget::RemoveItem(index) => Some(WheelCommand::RemoveItem(index)),
            UiTarget::ClearItems => Some(WheelCommand::ClearItems),
            UiTarget::ClearHistory => Some(WheelCommand::ClearHistory),
            UiTarget::RemoveWinner => Some(WheelCommand::RemoveWinner),
            UiTarget::KeepWinner => Some(WheelCommand::KeepWinner),
        }
    }

    // Enter adds the typed name; with nothing typed it spins instead.
    fn command_for_key(
        &mut self,
        key: &Key,
        text: Option<&str>,
        dialog_open: bool,
    ) -> Option<WheelCommand> {
        if dialog_open {
            return match key {
                Key::Named(NamedKey::Enter | NamedKey::Escape) => Some(WheelCommand::KeepWinner),
                Key::Named(NamedKey::Delete) => Some(WheelCommand::RemoveWinner),
                _ => None,
            };
        }
        match key {
            Key::Named(NamedKey::Enter) if self.input.text().is_empty() => Some(WheelCommand::Spin),
            Key::Named(NamedKey::Enter) => self.input.submit().map(WheelCommand::AddItem),
            Key::Named(NamedKey::Backspace) => {
                self.input.backspace();
                None
            }
            _ => {
                if let Some(text) = text {
                    self.input.insert_str(text);
                }
                None
            }
        }
    }
}

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use novaportal_lobby::controller::{AmbientSceneController, FrameHandle, FrameScheduler};
use novaportal_lobby::form::LobbyForm;
use novaportal_lobby::input::{self, FormAction, FormKey};
use novaportal_lobby::join::{redact_fragment, Router};
use novaportal_lobby::scene::AmbientScene;
use novaportal_wgpu::BackdropRenderer;

use crate::config::LobbyConfig;

/// Frame scheduler backed by winit redraw requests: each scheduled step is
/// one `RedrawRequested` delivery.
pub struct RedrawScheduler {
    window: Arc<Window>,
    next_handle: u64,
    armed: Option<FrameHandle>,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_handle: 0,
            armed: None,
        }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle::new(self.next_handle);
        self.armed = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        // The OS cannot retract an already-queued redraw; disarming here
        // means a late delivery finds the controller Stopped and is dropped
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }
}

/// Records the navigation hand-off from a submitted form.
#[derive(Default)]
struct PendingNavigation {
    target: Option<String>,
}

impl Router for PendingNavigation {
    fn push(&mut self, target: &str) {
        self.target = Some(target.to_string());
    }
}

/// The lobby shell: one window, the backdrop controller, and the join
/// form. Unmounting (close or submit) tears the controller down before the
/// event loop exits.
pub struct LobbyApp {
    config: LobbyConfig,
    form: LobbyForm,
    window: Option<Arc<Window>>,
    controller: Option<AmbientSceneController<BackdropRenderer, RedrawScheduler>>,
    navigation: PendingNavigation,
}

impl LobbyApp {
    pub fn new(config: LobbyConfig, form: LobbyForm) -> Self {
        Self {
            config,
            form,
            window: None,
            controller: None,
            navigation: PendingNavigation::default(),
        }
    }

    /// The navigation target produced by a submitted form, if any.
    pub fn navigation_target(&self) -> Option<&str> {
        self.navigation.target.as_deref()
    }

    fn unmount(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(controller) = self.controller.as_mut() {
            controller.teardown();
        }
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: FormKey) {
        match input::apply_key(&mut self.form, key) {
            FormAction::SubmitRequested => {
                if let Some(target) = self.form.submit(&mut self.navigation) {
                    log::info!("navigating to {}", redact_fragment(&target));
                    self.unmount(event_loop);
                } else {
                    log::warn!("a display name is required to open a portal");
                }
            }
            FormAction::Edited | FormAction::Ignored => {}
        }
    }
}

impl ApplicationHandler for LobbyApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(self.config.window_title.clone())
                        .with_inner_size(winit::dpi::LogicalSize::new(
                            self.config.window_width,
                            self.config.window_height,
                        )),
                )
                .expect("Failed to create window"),
        );

        // Physical pixels: the surface tracks the real backing size
        let size = window.inner_size();
        let scene = AmbientScene::new();
        match BackdropRenderer::new(window.clone(), size.width, size.height, &scene) {
            Ok(renderer) => {
                let scheduler = RedrawScheduler::new(window.clone());
                self.controller = Some(AmbientSceneController::mount(
                    scene,
                    renderer,
                    scheduler,
                    size.width,
                    size.height,
                ));
            }
            Err(e) => {
                // The backdrop is decoration; the join form works without it
                log::warn!("backdrop disabled: {e}");
            }
        }

        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.unmount(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(controller) = self.controller.as_mut() {
                    controller.on_resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(controller) = self.controller.as_mut() {
                    controller.on_frame();
                }
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state == ElementState::Pressed {
                    if let Some(key) = map_key(&key_event.logical_key) {
                        self.handle_key(event_loop, key);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Map a winit logical key onto a form action key.
fn map_key(key: &Key) -> Option<FormKey> {
    match key {
        Key::Named(NamedKey::Enter) => Some(FormKey::Submit),
        Key::Named(NamedKey::Tab) => Some(FormKey::NextField),
        Key::Named(NamedKey::Backspace) => Some(FormKey::Backspace),
        Key::Named(NamedKey::Space) => Some(FormKey::Char(' ')),
        Key::Character(text) => text.chars().next().map(FormKey::Char),
        _ => None,
    }
}

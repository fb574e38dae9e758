//! Nova Portal lobby runtime.
//!
//! Owns the two cores of the entry screen: turning join-form state into a
//! `/rooms/<id>?name=...[#passphrase]` navigation target, and driving the
//! ambient backdrop (rotating wireframe torus plus drifting particle field)
//! through its mount / animate / resize / teardown lifecycle. Rendering
//! sits behind the [`controller::RenderSurface`] seam so this crate carries
//! no GPU dependency and every lifecycle property is testable headless.

pub mod animation;
pub mod controller;
pub mod form;
pub mod input;
pub mod join;
pub mod particles;
pub mod scene;
pub mod secrets;

pub use controller::{AmbientSceneController, FrameHandle, FrameScheduler, Phase, RenderSurface};
pub use form::LobbyForm;
pub use join::{build_target, generate_room_id, redact_fragment, JoinRequest, Router};
pub use scene::{AmbientScene, Camera};

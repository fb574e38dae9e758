//! Nova Portal lobby launcher.
//!
//! `novaportal` opens the lobby window; `novaportal join --name ...`
//! builds and prints a room navigation target without a window.

mod app;
mod cli;
mod config;

use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

use novaportal_lobby::form::LobbyForm;
use novaportal_lobby::join::{build_target, generate_room_id};
use novaportal_lobby::secrets::{random_string, PASSPHRASE_LENGTH};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = cli::Cli::parse();

    if let Some(cli::Command::Join { name, room, e2ee }) = cli.command {
        if name.trim().is_empty() {
            anyhow::bail!("a display name is required");
        }
        let passphrase = random_string(PASSPHRASE_LENGTH);
        let target = build_target(
            room.as_deref().unwrap_or(""),
            &name,
            e2ee,
            &passphrase,
            generate_room_id,
        );
        // stdout is the navigation hand-off, passphrase fragment included;
        // log output never carries it
        println!("{target}");
        return Ok(());
    }

    let config = config::load(cli.config.as_deref())?;

    let mut form = LobbyForm::new();
    if let Some(name) = cli.name {
        form.display_name = name;
    }
    if let Some(room) = cli.room {
        form.room_name = room;
    }
    form.e2ee_enabled = cli.e2ee;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut lobby = app::LobbyApp::new(config, form);
    event_loop.run_app(&mut lobby)?;

    if let Some(target) = lobby.navigation_target() {
        println!("{target}");
    }
    Ok(())
}

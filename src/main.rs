//! Third-person course main entry point.
//!
//! A small 3D obstacle course built with:
//! - **raylib** for windowing, graphics and input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Parse the command line, load and validate `config.ini`
//! 2. Initialize the raylib window and the ECS world
//! 3. Register scene hooks and observers, enter the Setup scene
//! 4. Each frame:
//!    - Poll input
//!    - Run the simulation pipeline (scene, locomotion, physics, camera,
//!      occlusion)
//!    - Render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --skip-menu
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use thirdperson::events::scene::SceneChangedEvent;
use thirdperson::game::{LaunchOptions, install_scene_flow};
use thirdperson::pipeline::{
    insert_simulation_resources, simulation_schedule, spawn_gameplay_observers,
};
use thirdperson::resources::gameconfig::GameConfig;
use thirdperson::resources::scene::{ActiveScene, NextScene, SceneStates};
use thirdperson::systems::input::update_input_state;
use thirdperson::systems::render::render_system;
use thirdperson::systems::time::update_world_time;

/// Third-person character controller demo
#[derive(Parser)]
#[command(version, about = "Walk, jump and climb through a small third-person course.")]
struct Cli {
    /// Path of the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level file to load instead of the one named in the configuration.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Start directly in the level.
    #[arg(long)]
    skip_menu: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(level) = cli.level {
        config.level_path = level;
    }
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Early-exit: write the config and quit (no window needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Third Person Course")
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape is a game key, not the window close key
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    insert_simulation_resources(&mut world, &config);
    world.insert_resource(LaunchOptions {
        skip_menu: cli.skip_menu,
    });
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    install_scene_flow(&mut world);
    spawn_gameplay_observers(&mut world);

    world.resource_mut::<NextScene>().set(SceneStates::Setup);
    world.trigger(SceneChangedEvent {}); // Enter Setup immediately

    let mut input = Schedule::default();
    input.add_systems(update_input_state);
    let mut simulation = simulation_schedule();
    let mut render = Schedule::default();
    render.add_systems(render_system);

    for schedule in [&mut input, &mut simulation, &mut render] {
        if let Err(e) = schedule.initialize(&mut world) {
            error!("Failed to initialize schedule: {}", e);
            std::process::exit(1);
        }
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && world.resource::<ActiveScene>().get() != SceneStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        input.run(&mut world);
        simulation.run(&mut world);
        render.run(&mut world);

        world.clear_trackers();
    }
    info!("Bye");
}

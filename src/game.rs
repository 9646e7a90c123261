//! Scene hooks and entity construction.
//!
//! The hooks are one-shot systems registered by [`install_scene_flow`] and
//! run by the scene observer:
//!
//! - `setup` – choose the first scene
//! - `enter_menu` – spawn the title texts
//! - `enter_level` – load the level file and spawn it with the player rig
//! - `quit_game` – log the shutdown; the host loop exits on `Quitting`
//! - `clean_scene` – despawn everything not tagged [`Persistent`]

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::{Color, Vector3};

use crate::components::boxcollider::{BoxCollider3D, LayerMask};
use crate::components::camerarig::CameraRig;
use crate::components::globaltransform3d::GlobalTransform3D;
use crate::components::groundsensor::GroundSensor;
use crate::components::occlusion::{OcclusionResponse, SpecialOccluder};
use crate::components::persistent::Persistent;
use crate::components::player::{ModelRoot, Player};
use crate::components::renderable::Renderable;
use crate::components::rigidbody::RigidBody3D;
use crate::components::teleporter::{TeleportTarget, Teleporter};
use crate::components::texttrigger::{TextTrigger, UiText};
use crate::components::transform3d::Transform3D;
use crate::events::scene::observe_scene_change_event;
use crate::resources::gameconfig::GameConfig;
use crate::resources::level::{LevelData, vec3};
use crate::resources::materialstore::MaterialStore;
use crate::resources::physicsscene::TriggerContacts;
use crate::resources::scene::{NextScene, SceneStates};
use crate::resources::systemsstore::SystemsStore;

/// Height of the camera pivot above the player's feet.
pub const CAMERA_PIVOT_HEIGHT: f32 = 1.5;
pub const PLAYER_SIZE: Vector3 = Vector3 {
    x: 0.8,
    y: 1.8,
    z: 0.8,
};

/// Start-up choices made on the command line.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub skip_menu: bool,
}

/// Entities of one spawned player rig.
#[derive(Debug, Clone, Copy)]
pub struct PlayerRig {
    pub body: Entity,
    pub model_root: Entity,
    pub ground_sensor: Entity,
    pub yaw_pivot: Entity,
    pub move_pivot: Entity,
    pub pitch_pivot: Entity,
    pub camera: Entity,
}

fn placed(transform: Transform3D) -> (Transform3D, GlobalTransform3D) {
    (transform, GlobalTransform3D::from(transform))
}

/// Spawn the player body with its model, ground sensor and camera rig.
///
/// `spawn` is the position of the feet.
pub fn spawn_player_rig(
    commands: &mut Commands,
    config: &GameConfig,
    spawn: Vector3,
    yaw: f32,
) -> PlayerRig {
    let half_height = PLAYER_SIZE.y * 0.5;
    let body = commands
        .spawn((
            Player,
            placed(Transform3D::from_position(spawn)),
            RigidBody3D::new(),
            BoxCollider3D::new(PLAYER_SIZE.x, PLAYER_SIZE.y, PLAYER_SIZE.z)
                .with_offset(Vector3::new(0.0, half_height, 0.0))
                .with_layer(LayerMask::PLAYER),
        ))
        .id();

    let model_root = commands
        .spawn((
            ModelRoot,
            placed(Transform3D::default().with_yaw(yaw)),
            Renderable::new(PLAYER_SIZE, "player").with_offset(Vector3::new(0.0, half_height, 0.0)),
            ChildOf(body),
        ))
        .id();

    let ground_sensor = commands
        .spawn((
            GroundSensor::new(),
            placed(Transform3D::default()),
            BoxCollider3D::new(0.6, 0.2, 0.6)
                .with_layer(LayerMask::PLAYER)
                .trigger(LayerMask::DEFAULT),
            ChildOf(body),
        ))
        .id();

    let yaw_pivot = commands
        .spawn((placed(Transform3D::default().with_yaw(yaw)), ChildOf(body)))
        .id();
    let move_pivot = commands
        .spawn((
            placed(Transform3D::new(0.0, CAMERA_PIVOT_HEIGHT, 0.0)),
            ChildOf(yaw_pivot),
        ))
        .id();
    let pitch_pivot = commands
        .spawn((placed(Transform3D::default()), ChildOf(move_pivot)))
        .id();
    let resolver = config.occlusion_resolver(move_pivot);
    let camera = commands
        .spawn((
            placed(Transform3D::new(0.0, 0.0, -resolver.zoom)),
            resolver,
            ChildOf(pitch_pivot),
        ))
        .id();

    commands.entity(yaw_pivot).insert((
        CameraRig {
            model_root,
            move_pivot,
            pitch_pivot,
            camera,
        },
        config.camera_framing(),
    ));
    commands
        .entity(body)
        .insert(config.locomotion(model_root, ground_sensor));

    PlayerRig {
        body,
        model_root,
        ground_sensor,
        yaw_pivot,
        move_pivot,
        pitch_pivot,
        camera,
    }
}

/// Spawn blocks, teleporters and text triggers of a level.
pub fn spawn_level(
    commands: &mut Commands,
    level: &LevelData,
    config: &GameConfig,
    materials: &mut MaterialStore,
) {
    for def in &level.materials {
        let [r, g, b, a] = def.rgba;
        materials.insert(def.name.clone(), Color::new(r, g, b, a));
    }

    for block in &level.blocks {
        if !materials.contains(&block.material) {
            warn!("Level '{}' uses unknown material '{}'", level.name, block.material);
        }
        let size = vec3(block.size);
        let mut entity = commands.spawn((
            placed(Transform3D::from_position(vec3(block.center))),
            BoxCollider3D::new(size.x, size.y, size.z),
            Renderable::new(size, block.material.clone()),
        ));
        if let Some(special) = &block.special {
            let response = if special.hidden {
                OcclusionResponse::Hidden
            } else {
                OcclusionResponse::Translucent
            };
            entity.insert(
                SpecialOccluder::new(block.material.clone(), special.transparent_material.clone())
                    .with_response(response),
            );
        }
    }

    for teleporter in &level.teleporters {
        let size = vec3(teleporter.size);
        let target = commands
            .spawn((
                TeleportTarget,
                placed(Transform3D::from_position(vec3(teleporter.target))),
            ))
            .id();
        commands.spawn((
            Teleporter { target },
            placed(Transform3D::from_position(vec3(teleporter.center))),
            BoxCollider3D::new(size.x, size.y, size.z).trigger(LayerMask::PLAYER),
            Renderable::new(size, "teleporter"),
        ));
    }

    for (index, def) in level.text_triggers.iter().enumerate() {
        let size = vec3(def.size);
        let ui = commands
            .spawn(UiText::hidden(def.message.clone(), 20, 60 + 30 * index as i32, 24))
            .id();
        let mut text_trigger = TextTrigger::new(ui, config.text_trigger_lifetime);
        if def.ends_level {
            text_trigger = text_trigger.ending_level(config.menu_delay);
        }
        commands.spawn((
            text_trigger,
            placed(Transform3D::from_position(vec3(def.center))),
            BoxCollider3D::new(size.x, size.y, size.z).trigger(LayerMask::PLAYER),
            Renderable::new(size, "text_trigger"),
        ));
    }
}

pub fn setup(mut next_scene: ResMut<NextScene>, launch: Option<Res<LaunchOptions>>) {
    let skip_menu = launch.is_some_and(|l| l.skip_menu);
    next_scene.set(if skip_menu {
        SceneStates::Level
    } else {
        SceneStates::Menu
    });
    info!("Setup done, skip_menu={}", skip_menu);
}

pub fn enter_menu(mut commands: Commands) {
    commands.spawn(UiText::hidden("THIRD PERSON COURSE", 40, 60, 48).shown());
    commands.spawn(UiText::hidden("Press Enter to start, Escape to quit", 40, 130, 24).shown());
}

pub fn enter_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut materials: ResMut<MaterialStore>,
    mut contacts: ResMut<TriggerContacts>,
) {
    let level = match LevelData::load_from_file(&config.level_path) {
        Ok(level) => level,
        Err(e) => {
            warn!(
                "Could not load level {:?} ({}); using the built-in course",
                config.level_path, e
            );
            LevelData::default_course()
        }
    };
    contacts.pairs.clear();
    spawn_level(&mut commands, &level, &config, &mut materials);
    let rig = spawn_player_rig(&mut commands, &config, vec3(level.spawn), level.spawn_yaw);
    info!("Entered level '{}', player {:?}", level.name, rig.body);
}

pub fn quit_game() {
    info!("Quitting");
}

pub fn clean_scene(mut commands: Commands, query: Query<Entity, Without<Persistent>>) {
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }
}

/// Register the scene hooks, the [`SystemsStore`] and the scene observer.
pub fn install_scene_flow(world: &mut World) {
    let mut systems_store = SystemsStore::new();

    // Registered systems are entities; keep them across scene changes.
    let setup_id = world.register_system(setup);
    world.entity_mut(setup_id.entity()).insert(Persistent);
    systems_store.insert("setup", setup_id);

    let enter_menu_id = world.register_system(enter_menu);
    world.entity_mut(enter_menu_id.entity()).insert(Persistent);
    systems_store.insert("enter_menu", enter_menu_id);

    let enter_level_id = world.register_system(enter_level);
    world.entity_mut(enter_level_id.entity()).insert(Persistent);
    systems_store.insert("enter_level", enter_level_id);

    let quit_game_id = world.register_system(quit_game);
    world.entity_mut(quit_game_id.entity()).insert(Persistent);
    systems_store.insert("quit_game", quit_game_id);

    let clean_scene_id = world.register_system(clean_scene);
    world.entity_mut(clean_scene_id.entity()).insert(Persistent);
    systems_store.insert("clean_scene", clean_scene_id);

    world.insert_resource(systems_store);
    world.spawn((Observer::new(observe_scene_change_event), Persistent));
    world.flush();
}

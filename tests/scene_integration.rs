//! Integration tests for gameplay volumes and the scene flow: teleporters,
//! text triggers, the deferred return to the menu, and the shipped assets.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use thirdperson::components::boxcollider::{BoxCollider3D, LayerMask};
use thirdperson::components::globaltransform3d::GlobalTransform3D;
use thirdperson::components::groundsensor::GroundSensor;
use thirdperson::components::player::Player;
use thirdperson::components::teleporter::{TeleportTarget, Teleporter};
use thirdperson::components::texttrigger::{TextTrigger, UiText};
use thirdperson::components::transform3d::Transform3D;
use thirdperson::components::ttl::Ttl;
use thirdperson::components::occlusion::SpecialOccluder;
use thirdperson::events::scene::SceneChangedEvent;
use thirdperson::events::trigger::{TriggerEnterEvent, TriggerExitEvent};
use thirdperson::game::{
    LaunchOptions, PlayerRig, install_scene_flow, spawn_level, spawn_player_rig,
};
use thirdperson::pipeline::{
    insert_simulation_resources, simulation_schedule, spawn_gameplay_observers,
};
use thirdperson::resources::gameconfig::GameConfig;
use thirdperson::resources::input::InputState;
use thirdperson::resources::level::LevelData;
use thirdperson::resources::materialstore::MaterialStore;
use thirdperson::resources::physicsscene::{PhysicsScene, TriggerContacts};
use thirdperson::resources::scene::{ActiveScene, NextScene, SceneStates};
use thirdperson::resources::scenetransition::PendingTransition;
use thirdperson::systems::physics::{sync_physics_scene, trigger_detector};
use thirdperson::systems::propagate_transforms::propagate_transforms;
use thirdperson::systems::time::update_world_time;

const EPSILON: f32 = 1e-3;
const DT: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(config: GameConfig) -> World {
    let mut world = World::new();
    insert_simulation_resources(&mut world, &config);
    spawn_gameplay_observers(&mut world);
    install_scene_flow(&mut world);
    world
}

fn placed(position: Vector3) -> (Transform3D, GlobalTransform3D) {
    let t = Transform3D::from_position(position);
    (t, GlobalTransform3D::from(t))
}

fn spawn_ground(world: &mut World) {
    world.spawn((
        placed(Vector3::new(0.0, -0.5, 0.0)),
        BoxCollider3D::new(60.0, 1.0, 60.0),
    ));
}

fn spawn_rig(world: &mut World, position: Vector3) -> PlayerRig {
    let config = world.resource::<GameConfig>().clone();
    let rig = spawn_player_rig(&mut world.commands(), &config, position, 0.0);
    world.flush();
    rig
}

fn run_ticks(world: &mut World, schedule: &mut Schedule, ticks: usize) {
    for _ in 0..ticks {
        update_world_time(world, DT);
        schedule.run(world);
    }
}

fn player_count(world: &mut World) -> usize {
    world
        .query_filtered::<Entity, With<Player>>()
        .iter(world)
        .count()
}

fn enter_setup(world: &mut World) {
    world.resource_mut::<NextScene>().set(SceneStates::Setup);
    world.trigger(SceneChangedEvent {});
    world.flush();
}

#[test]
fn teleporter_moves_the_player_to_its_target() {
    let mut world = make_world(GameConfig::new());
    let mut schedule = simulation_schedule();
    spawn_ground(&mut world);
    let target = world
        .spawn((TeleportTarget, placed(Vector3::new(-10.0, 0.05, -10.0))))
        .id();
    world.spawn((
        Teleporter { target },
        placed(Vector3::new(3.0, 1.0, 0.0)),
        BoxCollider3D::new(2.0, 2.0, 2.0).trigger(LayerMask::PLAYER),
    ));
    let rig = spawn_rig(&mut world, Vector3::new(3.0, 0.0, 0.0));

    run_ticks(&mut world, &mut schedule, 30);

    let body = world.get::<Transform3D>(rig.body).unwrap();
    assert!(approx_eq(body.position.x, -10.0), "x = {}", body.position.x);
    assert!(approx_eq(body.position.z, -10.0), "z = {}", body.position.z);
    assert!(approx_eq(body.position.y, 0.0), "y = {}", body.position.y);
    assert!(world.get::<GroundSensor>(rig.ground_sensor).unwrap().is_grounded());
}

#[test]
fn text_trigger_shows_its_text_once_and_expires() {
    let mut config = GameConfig::new();
    config.text_trigger_lifetime = 0.5;
    let mut world = make_world(config);
    let mut schedule = simulation_schedule();
    spawn_ground(&mut world);
    let ui = world.spawn(UiText::hidden("hello", 10, 10, 20)).id();
    let trigger = world
        .spawn((
            TextTrigger::new(ui, 0.5),
            placed(Vector3::new(0.0, 1.0, 0.0)),
            BoxCollider3D::new(4.0, 2.0, 4.0).trigger(LayerMask::PLAYER),
        ))
        .id();
    spawn_rig(&mut world, Vector3::zero());

    run_ticks(&mut world, &mut schedule, 2);

    assert!(world.get::<UiText>(ui).unwrap().visible);
    assert!(world.get::<TextTrigger>(trigger).unwrap().fired);
    assert!(world.get::<Ttl>(trigger).is_some());
    assert!(!world.resource::<PendingTransition>().is_armed());

    run_ticks(&mut world, &mut schedule, 40);
    assert!(world.get_entity(trigger).is_err(), "trigger should be despawned");
    assert!(world.get::<UiText>(ui).unwrap().visible);
}

#[test]
fn ending_trigger_returns_to_the_menu_after_the_delay() {
    let mut config = GameConfig::new();
    config.menu_delay = 0.5;
    let mut world = make_world(config);
    let mut schedule = simulation_schedule();
    world.resource_mut::<ActiveScene>().set(SceneStates::Level);
    spawn_ground(&mut world);
    let ui = world.spawn(UiText::hidden("bye", 10, 10, 20)).id();
    world.spawn((
        TextTrigger::new(ui, 5.0).ending_level(0.5),
        placed(Vector3::new(0.0, 1.0, 0.0)),
        BoxCollider3D::new(4.0, 2.0, 4.0).trigger(LayerMask::PLAYER),
    ));
    spawn_rig(&mut world, Vector3::zero());

    run_ticks(&mut world, &mut schedule, 2);
    assert!(world.resource::<PendingTransition>().is_armed());
    assert_eq!(world.resource::<ActiveScene>().get(), SceneStates::Level);

    run_ticks(&mut world, &mut schedule, 20);
    assert_eq!(world.resource::<ActiveScene>().get(), SceneStates::Level);

    run_ticks(&mut world, &mut schedule, 20);
    assert_eq!(world.resource::<ActiveScene>().get(), SceneStates::Menu);
    assert_eq!(player_count(&mut world), 0);
    assert!(!world.resource::<PendingTransition>().is_armed());
}

#[test]
fn skip_menu_goes_straight_to_the_level() {
    let mut config = GameConfig::new();
    config.level_path = "does/not/exist.json".into();
    let mut world = make_world(config);
    world.insert_resource(LaunchOptions { skip_menu: true });
    let mut schedule = simulation_schedule();

    enter_setup(&mut world);
    run_ticks(&mut world, &mut schedule, 90);

    assert_eq!(world.resource::<ActiveScene>().get(), SceneStates::Level);
    assert_eq!(player_count(&mut world), 1);
    let grounded = world
        .query::<&GroundSensor>()
        .iter(&world)
        .any(|s| s.is_grounded());
    assert!(grounded, "player should stand on the built-in course");
}

#[test]
fn menu_starts_the_level_and_escape_quits() {
    let mut config = GameConfig::new();
    config.level_path = "does/not/exist.json".into();
    let mut world = make_world(config);
    let mut schedule = simulation_schedule();

    enter_setup(&mut world);
    run_ticks(&mut world, &mut schedule, 1);
    assert_eq!(world.resource::<ActiveScene>().get(), SceneStates::Menu);
    let menu_texts = world
        .query::<&UiText>()
        .iter(&world)
        .filter(|t| t.visible)
        .count();
    assert_eq!(menu_texts, 2);

    world.resource_mut::<InputState>().action_confirm.press();
    run_ticks(&mut world, &mut schedule, 1);
    world.resource_mut::<InputState>().clear_edges();
    run_ticks(&mut world, &mut schedule, 1);
    assert_eq!(world.resource::<ActiveScene>().get(), SceneStates::Level);
    assert_eq!(player_count(&mut world), 1);

    world.resource_mut::<InputState>().action_back.press();
    run_ticks(&mut world, &mut schedule, 1);
    world.resource_mut::<InputState>().clear_edges();
    run_ticks(&mut world, &mut schedule, 1);
    assert_eq!(world.resource::<ActiveScene>().get(), SceneStates::Quitting);
    assert_eq!(player_count(&mut world), 0);
}

#[test]
fn shipped_level_and_config_load() {
    let root = env!("CARGO_MANIFEST_DIR");

    let level = LevelData::load_from_file(format!("{}/assets/levels/course.json", root))
        .expect("course.json should load");
    assert_eq!(level.name, "course");
    assert!(level.blocks.iter().any(|b| b.special.is_some()));
    assert!(level.text_triggers.iter().any(|t| t.ends_level));

    let mut config = GameConfig::with_path(format!("{}/config.ini", root));
    config.load_from_file().expect("config.ini should load");
    config.validate().expect("config.ini should be valid");
    assert!(approx_eq(config.zoom, 10.0));
    assert!(approx_eq(config.max_zoom, 15.0));
    assert!(approx_eq(config.menu_delay, 6.5));
}

#[derive(Resource, Default)]
struct TriggerLog(Vec<(&'static str, Entity, Entity)>);

fn log_enter(trigger: On<TriggerEnterEvent>, mut log: ResMut<TriggerLog>) {
    let e = trigger.event();
    log.0.push(("enter", e.trigger, e.other));
}

fn log_exit(trigger: On<TriggerExitEvent>, mut log: ResMut<TriggerLog>) {
    let e = trigger.event();
    log.0.push(("exit", e.trigger, e.other));
}

#[test]
fn trigger_detector_reports_enter_exit_and_despawn() {
    let mut world = World::new();
    world.insert_resource(PhysicsScene::default());
    world.insert_resource(TriggerContacts::default());
    world.init_resource::<TriggerLog>();
    world.spawn(Observer::new(log_enter));
    world.spawn(Observer::new(log_exit));
    world.flush();

    let mut schedule = Schedule::default();
    schedule.add_systems((propagate_transforms, sync_physics_scene, trigger_detector).chain());

    let volume = world
        .spawn((
            placed(Vector3::zero()),
            BoxCollider3D::new(2.0, 2.0, 2.0).trigger(LayerMask::DEFAULT),
        ))
        .id();
    let crate_box = world
        .spawn((placed(Vector3::new(0.5, 0.0, 0.0)), BoxCollider3D::new(1.0, 1.0, 1.0)))
        .id();

    schedule.run(&mut world);
    assert_eq!(world.resource::<TriggerLog>().0, vec![("enter", volume, crate_box)]);

    // Staying inside emits nothing new.
    schedule.run(&mut world);
    assert_eq!(world.resource::<TriggerLog>().0.len(), 1);

    world.get_mut::<Transform3D>(crate_box).unwrap().position = Vector3::new(5.0, 0.0, 0.0);
    schedule.run(&mut world);
    assert_eq!(world.resource::<TriggerLog>().0[1], ("exit", volume, crate_box));

    world.get_mut::<Transform3D>(crate_box).unwrap().position = Vector3::zero();
    schedule.run(&mut world);
    assert_eq!(world.resource::<TriggerLog>().0[2], ("enter", volume, crate_box));

    world.despawn(crate_box);
    schedule.run(&mut world);
    assert_eq!(world.resource::<TriggerLog>().0[3], ("exit", volume, crate_box));
    assert!(world.resource::<TriggerContacts>().pairs.is_empty());
}

#[test]
fn spawning_a_level_creates_its_colliders_and_volumes() {
    let level = LevelData::default_course();
    let config = GameConfig::new();
    let mut world = World::new();
    let mut materials = MaterialStore::default();

    spawn_level(&mut world.commands(), &level, &config, &mut materials);
    world.flush();

    let solids = world
        .query::<&BoxCollider3D>()
        .iter(&world)
        .filter(|c| !c.is_trigger)
        .count();
    assert_eq!(solids, level.blocks.len());
    assert_eq!(
        world.query::<&Teleporter>().iter(&world).count(),
        level.teleporters.len()
    );
    assert_eq!(
        world.query::<&TeleportTarget>().iter(&world).count(),
        level.teleporters.len()
    );
    assert_eq!(
        world.query::<&TextTrigger>().iter(&world).count(),
        level.text_triggers.len()
    );
    let endings = world
        .query::<&TextTrigger>()
        .iter(&world)
        .filter(|t| t.ends_level && approx_eq(t.menu_delay, config.menu_delay))
        .count();
    assert_eq!(endings, 1);
    assert_eq!(world.query::<&SpecialOccluder>().iter(&world).count(), 1);
    assert_eq!(
        world.query::<&UiText>().iter(&world).filter(|t| !t.visible).count(),
        level.text_triggers.len()
    );
}

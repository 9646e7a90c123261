//! Raylib 3D rendering.
//!
//! The simulation is left-handed (+X right when looking down +Z) while
//! raylib is right-handed, so every world position is mirrored on X before
//! drawing. Opaque boxes are drawn first, then translucent ones back to
//! front. Hidden special occluders are skipped.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider3D;
use crate::components::globaltransform3d::GlobalTransform3D;
use crate::components::groundsensor::GroundSensor;
use crate::components::occlusion::{OcclusionResolver, SpecialOccluder};
use crate::components::player::{LocomotionController, ModelRoot, Player};
use crate::components::renderable::Renderable;
use crate::components::texttrigger::UiText;
use crate::resources::debugmode::DebugMode;
use crate::resources::materialstore::MaterialStore;
use crate::resources::scene::ActiveScene;
use crate::resources::worldtime::WorldTime;

const CAMERA_FOVY: f32 = 60.0;

fn to_render(v: Vector3) -> Vector3 {
    Vector3::new(-v.x, v.y, v.z)
}

struct DrawBox {
    center: Vector3,
    size: Vector3,
    color: Color,
}

fn draw_world(
    d3: &mut RaylibMode3D<RaylibDrawHandle>,
    eye: Vector3,
    boxes: &Query<(&GlobalTransform3D, &Renderable, Option<&SpecialOccluder>)>,
    models: &Query<&GlobalTransform3D, With<ModelRoot>>,
    materials: &MaterialStore,
) {
    let mut translucent: Vec<DrawBox> = Vec::new();
    for (gt, renderable, special) in boxes.iter() {
        if special.is_some_and(|s| !s.visible()) {
            continue;
        }
        let item = DrawBox {
            center: gt.position + renderable.offset,
            size: renderable.size,
            color: materials.get(&renderable.material),
        };
        if item.color.a < 255 {
            translucent.push(item);
            continue;
        }
        let c = to_render(item.center);
        d3.draw_cube(c, item.size.x, item.size.y, item.size.z, item.color);
        d3.draw_cube_wires(c, item.size.x, item.size.y, item.size.z, Color::DARKGRAY);
    }

    // Nose marker so the facing is visible.
    for model in models.iter() {
        let nose = model.position + model.forward() * 0.45 + Vector3::new(0.0, 1.4, 0.0);
        d3.draw_cube(to_render(nose), 0.25, 0.25, 0.25, Color::ORANGE);
    }

    translucent.sort_by(|a, b| {
        let da = (a.center - eye).length();
        let db = (b.center - eye).length();
        db.total_cmp(&da)
    });
    for item in translucent.iter() {
        d3.draw_cube(
            to_render(item.center),
            item.size.x,
            item.size.y,
            item.size.z,
            item.color,
        );
    }
}

fn draw_debug_world(
    d3: &mut RaylibMode3D<RaylibDrawHandle>,
    colliders: &Query<(&GlobalTransform3D, &BoxCollider3D)>,
    resolver: &OcclusionResolver,
) {
    d3.draw_grid(40, 1.0);
    for (gt, collider) in colliders.iter() {
        let (min, max) = collider.aabb(gt.position);
        let size = max - min;
        let color = if collider.is_trigger {
            Color::YELLOW
        } else {
            Color::RED
        };
        d3.draw_cube_wires(to_render((min + max) * 0.5), size.x, size.y, size.z, color);
    }
    if let Some((start, end)) = resolver.debug_ray {
        d3.draw_line_3D(to_render(start), to_render(end), Color::MAGENTA);
    }
}

pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    materials: Res<MaterialStore>,
    debug_mode: Option<Res<DebugMode>>,
    active_scene: Res<ActiveScene>,
    time: Res<WorldTime>,
    cameras: Query<(&GlobalTransform3D, &OcclusionResolver)>,
    boxes: Query<(&GlobalTransform3D, &Renderable, Option<&SpecialOccluder>)>,
    models: Query<&GlobalTransform3D, With<ModelRoot>>,
    colliders: Query<(&GlobalTransform3D, &BoxCollider3D)>,
    texts: Query<&UiText>,
    players: Query<&LocomotionController, With<Player>>,
    sensors: Query<&GroundSensor>,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::SKYBLUE);

    if let Some((camera_gt, resolver)) = cameras.iter().next() {
        let eye = camera_gt.position;
        let camera = Camera3D::perspective(
            to_render(eye),
            to_render(eye + camera_gt.forward()),
            Vector3::new(0.0, 1.0, 0.0),
            CAMERA_FOVY,
        );
        let mut d3 = d.begin_mode3D(camera);
        draw_world(&mut d3, eye, &boxes, &models, &materials);
        if debug_mode.is_some() {
            draw_debug_world(&mut d3, &colliders, resolver);
        }
    }

    for text in texts.iter().filter(|t| t.visible) {
        d.draw_text(&text.content, text.x, text.y, text.font_size, Color::BLACK);
    }

    if debug_mode.is_some() {
        let fps = d.get_fps();
        let text = format!(
            "DEBUG MODE (press F11 to toggle) | FPS: {} | Scene: {:?} | Time: {:.1}s",
            fps,
            active_scene.get(),
            time.elapsed
        );
        d.draw_text(&text, 10, 10, 10, Color::BLACK);

        for (i, locomotion) in players.iter().enumerate() {
            let grounded = sensors
                .get(locomotion.ground_sensor)
                .map(|s| s.contacts())
                .unwrap_or(0);
            let text = format!(
                "Speed: {:.1} sprint: {} ground contacts: {}",
                locomotion.move_speed, locomotion.sprint_enabled, grounded
            );
            d.draw_text(&text, 10, 30 + 20 * i as i32, 10, Color::BLACK);
        }
        if let Some((camera_gt, resolver)) = cameras.iter().next() {
            let text = format!(
                "Camera pos: ({:.1}, {:.1}, {:.1}) zoom: {:.2}",
                camera_gt.position.x, camera_gt.position.y, camera_gt.position.z, resolver.zoom
            );
            let y = d.get_screen_height() - 30;
            d.draw_text(&text, 10, y, 10, Color::BLACK);
        }
    }
}

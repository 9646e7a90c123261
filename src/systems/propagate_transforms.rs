//! Transform propagation for parent-child entity hierarchies.
//!
//! Computes [`GlobalTransform3D`] for every entity with a [`Transform3D`]:
//! roots (no [`ChildOf`]) mirror their local transform, descendants compose
//! it onto their parent's world transform.
//!
//! # Schedule position
//!
//! Runs after the physics step, after camera framing and after occlusion, so
//! raycasts, trigger checks and rendering see current world positions.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;

use crate::components::globaltransform3d::GlobalTransform3D;
use crate::components::transform3d::Transform3D;

/// Propagate transforms from roots down through the hierarchy.
///
/// Entities missing a `GlobalTransform3D` get it inserted via deferred
/// [`Commands`] (visible after the next sync point).
pub fn propagate_transforms(
    roots: Query<(Entity, &Transform3D, Option<&Children>), Without<ChildOf>>,
    children_query: Query<(&Transform3D, Option<&Children>), With<ChildOf>>,
    mut globals: Query<&mut GlobalTransform3D>,
    mut commands: Commands,
) {
    for (root_entity, transform, children) in roots.iter() {
        let root_gt = GlobalTransform3D::from(*transform);
        write_global(root_entity, root_gt, &mut globals, &mut commands);

        if let Some(children) = children {
            propagate_children(
                &root_gt,
                children,
                &children_query,
                &mut globals,
                &mut commands,
            );
        }
    }
}

fn write_global(
    entity: Entity,
    value: GlobalTransform3D,
    globals: &mut Query<&mut GlobalTransform3D>,
    commands: &mut Commands,
) {
    if let Ok(mut gt) = globals.get_mut(entity) {
        if *gt != value {
            *gt = value;
        }
    } else {
        commands.entity(entity).insert(value);
    }
}

fn propagate_children(
    parent_gt: &GlobalTransform3D,
    children: &Children,
    children_query: &Query<(&Transform3D, Option<&Children>), With<ChildOf>>,
    globals: &mut Query<&mut GlobalTransform3D>,
    commands: &mut Commands,
) {
    for child_entity in children.iter() {
        let Ok((local, maybe_grandchildren)) = children_query.get(child_entity) else {
            continue;
        };

        let child_gt = parent_gt.compose(local);
        write_global(child_entity, child_gt, globals, commands);

        if let Some(grandchildren) = maybe_grandchildren {
            propagate_children(&child_gt, grandchildren, children_query, globals, commands);
        }
    }
}

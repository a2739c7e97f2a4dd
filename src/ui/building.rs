//! Building systems: pointer ray, controller tick, cursor and preview

use bevy::prelude::*;

use super::components::{
    BuilderResource, CashDisplay, MainCamera, PendingFrame, PreviewModel, PreviewState,
    SaveStoreResource, SelectionDisplay, Selector,
};
use super::spawner::model_assets;
use crate::simulation::{BuildController, Position, Ray};

/// System to setup the balance label and the placement cursor
pub fn setup_building_ui(mut commands: Commands, builder: Res<BuilderResource>) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(builder.0.ledger().display()),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.2, 1.0, 0.2)),
                CashDisplay,
            ));
            parent.spawn((
                Text::new(selection_label(&builder.0)),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                SelectionDisplay,
            ));
        });

    commands.spawn((
        Selector,
        Transform::default(),
        Visibility::default(),
    ));
}

fn selection_label(builder: &BuildController) -> String {
    let def = builder.active_structure();
    format!("{} - ${}", def.name, def.price)
}

/// System to cast the pointer ray for this frame
pub fn update_pointer_ray(
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut pending: ResMut<PendingFrame>,
) {
    pending.0.pointer = None;

    let Ok(window) = windows.single() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    // Cast ray from camera through cursor position
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    pending.0.pointer = Some(Ray::new(
        Position::new(ray.origin.x, ray.origin.y, ray.origin.z),
        Position::new(ray.direction.x, ray.direction.y, ray.direction.z),
    ));
}

/// System to run the build controller on this frame's input
pub fn tick_builder(
    time: Res<Time>,
    pending: Res<PendingFrame>,
    mut builder: ResMut<BuilderResource>,
    mut store: ResMut<SaveStoreResource>,
) {
    let report = builder.0.tick(&pending.0, time.delta_secs(), &mut store.0);
    if report.map_changed() {
        bevy::log::debug!("{}", builder.0.summary());
    }
}

/// System to move the cursor to the controller's smoothed pose
pub fn update_cursor(
    builder: Res<BuilderResource>,
    mut cursor_query: Query<&mut Transform, With<Selector>>,
) {
    let Ok(mut transform) = cursor_query.single_mut() else {
        return;
    };
    let cursor = builder.0.cursor();
    transform.translation = Vec3::new(cursor.position.x, 0.0, cursor.position.z);
    transform.rotation = Quat::from_rotation_y(cursor.yaw);
}

/// System to replace the preview model when the active structure changes
pub fn update_preview(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    builder: Res<BuilderResource>,
    mut preview_state: ResMut<PreviewState>,
    cursor_query: Query<Entity, With<Selector>>,
    preview_query: Query<Entity, With<PreviewModel>>,
) {
    let preview = builder.0.preview();
    if preview_state.shown_generation == Some(preview.generation) {
        return;
    }

    let Ok(cursor) = cursor_query.single() else {
        return;
    };

    for entity in preview_query.iter() {
        commands.entity(entity).despawn();
    }

    let (mesh, material) =
        model_assets(&mut meshes, &mut materials, &preview.model, preview.transparency);
    let height = preview.model.size[1];

    commands.entity(cursor).with_children(|parent| {
        parent.spawn((
            PreviewModel,
            mesh,
            material,
            Transform::from_xyz(0.0, height / 2.0 + preview.lift, 0.0),
        ));
    });

    preview_state.shown_generation = Some(preview.generation);
}

/// System to refresh the balance and selection labels
pub fn update_labels(
    builder: Res<BuilderResource>,
    mut cash_query: Query<&mut Text, (With<CashDisplay>, Without<SelectionDisplay>)>,
    mut selection_query: Query<&mut Text, (With<SelectionDisplay>, Without<CashDisplay>)>,
) {
    for mut text in cash_query.iter_mut() {
        **text = builder.0.ledger().display();
    }
    for mut text in selection_query.iter_mut() {
        **text = selection_label(&builder.0);
    }
}

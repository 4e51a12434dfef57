use bevy::prelude::*;

use constants::render_settings::PANEL_WIDTH;

use super::events::{CuboidCommand, ToggleField, TransformField};
use super::registry::{CuboidId, CuboidRegistry};
use super::selection::SelectionState;

// Panel palette, shared across the widgets
const PANEL_BG: Color = Color::srgb(0.10, 0.11, 0.13);
const HEADER_BG: Color = Color::srgb(0.14, 0.16, 0.20);
const BODY_BG: Color = Color::srgb(0.12, 0.13, 0.15);
const BUTTON_BG: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_BG_HOVER: Color = Color::srgb(0.26, 0.28, 0.32);
const BUTTON_BG_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
const ROW_SELECTED_BG: Color = Color::srgb(0.16, 0.34, 0.36);
const REMOVE_BG: Color = Color::srgb(0.28, 0.10, 0.10);
const REMOVE_BG_HOVER: Color = Color::srgb(0.34, 0.14, 0.14);
const REMOVE_BG_PRESSED: Color = Color::srgb(0.20, 0.12, 0.12);
const TOGGLE_ON_BG: Color = Color::srgb(0.16, 0.40, 0.22);

/// Everything the panel renders, projected from the registry and selection.
/// The panel holds no cuboid state of its own; a change in this model is the
/// only trigger for a rebuild.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct PanelModel {
    pub rows: Vec<PanelRow>,
    pub selected: Option<SelectedDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub id: CuboidId,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedDetail {
    pub id: CuboidId,
    pub center: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
    pub visible: bool,
    pub wireframe: bool,
}

pub fn project_panel_model(registry: &CuboidRegistry, selection: &SelectionState) -> PanelModel {
    let rows = registry
        .list()
        .iter()
        .map(|cuboid| PanelRow {
            id: cuboid.id,
            label: cuboid.label(),
            selected: selection.is_selected(cuboid.id),
        })
        .collect();

    let selected = selection
        .active()
        .and_then(|id| registry.get(id))
        .map(|cuboid| SelectedDetail {
            id: cuboid.id,
            center: cuboid.transform.center,
            scale: cuboid.transform.scale,
            rotation: cuboid.transform.rotation,
            visible: cuboid.visible,
            wireframe: cuboid.wireframe,
        });

    PanelModel { rows, selected }
}

#[derive(Component)]
pub struct CuboidPanelRoot;

#[derive(Component)]
pub struct PanelBody;

#[derive(Component)]
pub struct CreateCuboidButton;

#[derive(Component)]
pub struct RowSelectButton(pub CuboidId);

#[derive(Component)]
pub struct RemoveCuboidButton(pub CuboidId);

#[derive(Component)]
pub struct ToggleButton {
    pub id: CuboidId,
    pub field: ToggleField,
}

/// Nudge buttons commit absolute values through the command path, so the
/// interaction system reads the current field and adds the step.
#[derive(Component)]
pub struct FieldNudgeButton {
    pub id: CuboidId,
    pub field: TransformField,
    pub step: f32,
}

// Spawns the cuboid panel with header, Create button and an empty body
pub fn spawn_panel(mut commands: Commands) {
    commands
        .spawn((
            CuboidPanelRoot,
            Name::new("CuboidPanel"),
            BackgroundColor(PANEL_BG),
            Node {
                width: Val::Px(PANEL_WIDTH),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                justify_content: JustifyContent::FlexStart,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Name::new("Header"),
                    BackgroundColor(HEADER_BG),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(12.0)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::SpaceBetween,
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        Name::new("Title"),
                        Text::new("Cuboids"),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));

                    header
                        .spawn((
                            CreateCuboidButton,
                            Name::new("CreateCuboidButton"),
                            Button,
                            BackgroundColor(BUTTON_BG),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new("+ Create"),
                                TextFont { font_size: 16.0, ..default() },
                                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                            ));
                        });
                });

            parent.spawn((
                PanelBody,
                Name::new("Body"),
                BackgroundColor(BODY_BG),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                    row_gap: Val::Px(6.0),
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    overflow: Overflow::clip_y(),
                    ..default()
                },
            ));
        });
}

/// Rebuild the panel body whenever the projected model changes. The rebuild
/// is wholesale: old children are dropped and the body is repopulated from
/// the fresh model.
pub fn refresh_panel(
    mut commands: Commands,
    registry: Res<CuboidRegistry>,
    selection: Res<SelectionState>,
    mut cache: ResMut<PanelModel>,
    body: Query<Entity, With<PanelBody>>,
) {
    let Ok(body) = body.single() else {
        return;
    };

    let model = project_panel_model(&registry, &selection);
    if model == *cache {
        return;
    }
    *cache = model.clone();

    commands.entity(body).despawn_related::<Children>();
    commands.entity(body).with_children(|parent| {
        for row in &model.rows {
            spawn_row(parent, row);
        }
        if let Some(detail) = &model.selected {
            spawn_detail(parent, detail);
        }
    });
}

fn spawn_row(parent: &mut ChildSpawnerCommands, row: &PanelRow) {
    let bg = if row.selected { ROW_SELECTED_BG } else { BUTTON_BG };
    parent
        .spawn((
            RowSelectButton(row.id),
            Button,
            Name::new(format!("Row-{}", row.label)),
            BackgroundColor(bg),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(30.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::FlexStart,
                padding: UiRect::axes(Val::Px(8.0), Val::Px(0.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(row.label.clone()),
                TextFont { font_size: 15.0, ..default() },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });
}

fn spawn_detail(parent: &mut ChildSpawnerCommands, detail: &SelectedDetail) {
    parent.spawn((
        Text::new("Properties"),
        TextFont { font_size: 15.0, ..default() },
        TextColor(Color::srgb(0.8, 0.85, 0.9)),
        Node {
            margin: UiRect::top(Val::Px(8.0)),
            ..default()
        },
    ));

    let fields: [(&str, TransformField, f32, f32); 9] = [
        ("pos.x", TransformField::PosX, detail.center.x, 0.25),
        ("pos.y", TransformField::PosY, detail.center.y, 0.25),
        ("pos.z", TransformField::PosZ, detail.center.z, 0.25),
        ("scale.x", TransformField::ScaleX, detail.scale.x, 0.25),
        ("scale.y", TransformField::ScaleY, detail.scale.y, 0.25),
        ("scale.z", TransformField::ScaleZ, detail.scale.z, 0.25),
        ("rot.x", TransformField::RotX, detail.rotation.x, 0.1),
        ("rot.y", TransformField::RotY, detail.rotation.y, 0.1),
        ("rot.z", TransformField::RotZ, detail.rotation.z, 0.1),
    ];
    for (label, field, value, step) in fields {
        spawn_field_row(parent, detail.id, label, field, value, step);
    }

    parent
        .spawn((Node {
            width: Val::Percent(100.0),
            display: Display::Flex,
            column_gap: Val::Px(6.0),
            margin: UiRect::top(Val::Px(6.0)),
            ..default()
        },))
        .with_children(|row| {
            spawn_toggle(row, detail.id, ToggleField::Visible, "Visible", detail.visible);
            spawn_toggle(
                row,
                detail.id,
                ToggleField::Wireframe,
                "Wireframe",
                detail.wireframe,
            );
        });

    parent
        .spawn((
            RemoveCuboidButton(detail.id),
            Button,
            Name::new("RemoveCuboidButton"),
            BackgroundColor(REMOVE_BG),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(32.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                margin: UiRect::top(Val::Px(6.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new("Remove"),
                TextFont { font_size: 15.0, ..default() },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });
}

fn spawn_field_row(
    parent: &mut ChildSpawnerCommands,
    id: CuboidId,
    label: &str,
    field: TransformField,
    value: f32,
    step: f32,
) {
    parent
        .spawn((Node {
            width: Val::Percent(100.0),
            height: Val::Px(24.0),
            display: Display::Flex,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::SpaceBetween,
            column_gap: Val::Px(4.0),
            ..default()
        },))
        .with_children(|row| {
            row.spawn((
                Text::new(format!("{label}  {value:.2}")),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::srgb(0.85, 0.88, 0.92)),
            ));

            row.spawn((Node {
                display: Display::Flex,
                column_gap: Val::Px(4.0),
                ..default()
            },))
            .with_children(|buttons| {
                spawn_nudge(buttons, id, field, -step, "-");
                spawn_nudge(buttons, id, field, step, "+");
            });
        });
}

fn spawn_nudge(
    parent: &mut ChildSpawnerCommands,
    id: CuboidId,
    field: TransformField,
    step: f32,
    glyph: &str,
) {
    parent
        .spawn((
            FieldNudgeButton { id, field, step },
            Button,
            BackgroundColor(BUTTON_BG),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                width: Val::Px(22.0),
                height: Val::Px(22.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(glyph),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });
}

fn spawn_toggle(
    parent: &mut ChildSpawnerCommands,
    id: CuboidId,
    field: ToggleField,
    label: &str,
    on: bool,
) {
    let bg = if on { TOGGLE_ON_BG } else { BUTTON_BG };
    parent
        .spawn((
            ToggleButton { id, field },
            Button,
            BackgroundColor(bg),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                flex_grow: 1.0,
                height: Val::Px(28.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });
}

// Handles interactions for the panel buttons. Each press is translated into
// a command; the panel itself rebuilds from the model on the next frame.
pub fn create_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<CreateCuboidButton>),
    >,
    mut commands: EventWriter<CuboidCommand>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                commands.write(CuboidCommand::Create);
                *bg = BackgroundColor(BUTTON_BG_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => *bg = BackgroundColor(BUTTON_BG),
        }
    }
}

pub fn row_select_interaction(
    mut q: Query<
        (&Interaction, &RowSelectButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    selection: Res<SelectionState>,
    mut commands: EventWriter<CuboidCommand>,
) {
    for (interaction, row, mut bg) in &mut q {
        let resting = if selection.is_selected(row.0) {
            ROW_SELECTED_BG
        } else {
            BUTTON_BG
        };
        match *interaction {
            Interaction::Pressed => {
                commands.write(CuboidCommand::Select(row.0));
                *bg = BackgroundColor(BUTTON_BG_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => *bg = BackgroundColor(resting),
        }
    }
}

pub fn remove_button_interaction(
    mut q: Query<
        (&Interaction, &RemoveCuboidButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut commands: EventWriter<CuboidCommand>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                commands.write(CuboidCommand::Remove(button.0));
                *bg = BackgroundColor(REMOVE_BG_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(REMOVE_BG_HOVER),
            Interaction::None => *bg = BackgroundColor(REMOVE_BG),
        }
    }
}

pub fn toggle_button_interaction(
    mut q: Query<
        (&Interaction, &ToggleButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut commands: EventWriter<CuboidCommand>,
) {
    for (interaction, toggle, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                commands.write(CuboidCommand::Toggle {
                    id: toggle.id,
                    field: toggle.field,
                });
                *bg = BackgroundColor(BUTTON_BG_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => {}
        }
    }
}

/// Reads the live field value at press time so the committed value is
/// absolute, not a delta applied to a stale panel snapshot.
pub fn field_nudge_interaction(
    mut q: Query<
        (&Interaction, &FieldNudgeButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    registry: Res<CuboidRegistry>,
    mut commands: EventWriter<CuboidCommand>,
) {
    for (interaction, nudge, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                if let Some(cuboid) = registry.get(nudge.id) {
                    let t = &cuboid.transform;
                    let current = match nudge.field {
                        TransformField::PosX => t.center.x,
                        TransformField::PosY => t.center.y,
                        TransformField::PosZ => t.center.z,
                        TransformField::ScaleX => t.scale.x,
                        TransformField::ScaleY => t.scale.y,
                        TransformField::ScaleZ => t.scale.z,
                        TransformField::RotX => t.rotation.x,
                        TransformField::RotY => t.rotation.y,
                        TransformField::RotZ => t.rotation.z,
                    };
                    commands.write(CuboidCommand::SetField {
                        id: nudge.id,
                        field: nudge.field,
                        value: current + nudge.step,
                    });
                }
                *bg = BackgroundColor(BUTTON_BG_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => *bg = BackgroundColor(BUTTON_BG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::cuboid::selection;

    #[test]
    fn model_mirrors_registry_order_and_selection() {
        let mut registry = CuboidRegistry::default();
        let mut state = SelectionState::default();
        let a = registry.create().id;
        let b = registry.create().id;
        selection::select(&mut registry, &mut state, b);

        let model = project_panel_model(&registry, &state);
        assert_eq!(model.rows.len(), 2);
        assert_eq!(model.rows[0].id, a);
        assert!(!model.rows[0].selected);
        assert!(model.rows[1].selected);
        assert_eq!(model.selected.as_ref().unwrap().id, b);
    }

    #[test]
    fn unchanged_state_projects_an_equal_model() {
        let mut registry = CuboidRegistry::default();
        let mut state = SelectionState::default();
        let a = registry.create().id;
        selection::select(&mut registry, &mut state, a);

        let first = project_panel_model(&registry, &state);
        let second = project_panel_model(&registry, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn field_edit_changes_the_model() {
        let mut registry = CuboidRegistry::default();
        let mut state = SelectionState::default();
        let a = registry.create().id;
        selection::select(&mut registry, &mut state, a);

        let before = project_panel_model(&registry, &state);
        registry.get_mut(a).unwrap().transform.center.x = 4.0;
        let after = project_panel_model(&registry, &state);
        assert_ne!(before, after);
        assert_eq!(after.selected.unwrap().center.x, 4.0);
    }

    #[test]
    fn empty_registry_projects_an_empty_model() {
        let registry = CuboidRegistry::default();
        let state = SelectionState::default();
        let model = project_panel_model(&registry, &state);
        assert!(model.rows.is_empty());
        assert!(model.selected.is_none());
    }
}

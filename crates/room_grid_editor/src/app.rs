//! Bevy host: rooms list with search, room editor, details and item panels over a local store

use crate::facades::{
    FurnitureItemsFacade, FurniturePayload, RoomDetailsFacade, RoomEditorFacade, RoomsListFacade,
    SearchFacade,
};
use crate::preferences::EditorPreferences;
use crate::render::{PreviewHighlight, PreviewLayout};
use crate::session::{PlacementSession, RoomEditorSession};
use crate::store::InMemoryStore;
use crate::ui::{show_brush_picker, show_grid_editor, show_grid_preview, GridStyle};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use futures::executor::block_on;
use room_grid_core::{CreateRoomCommand, GridBounds};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Resource)]
pub struct EditorStore(pub Arc<InMemoryStore>);

#[derive(Resource)]
pub struct EditorFacades {
    pub list: RoomsListFacade,
    pub details: RoomDetailsFacade,
    pub editor: RoomEditorFacade,
    pub items: FurnitureItemsFacade,
    pub search: SearchFacade,
}

impl EditorFacades {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            list: RoomsListFacade::new(store.clone()),
            details: RoomDetailsFacade::new(store.clone(), store.clone()),
            editor: RoomEditorFacade::new(store.clone()),
            items: FurnitureItemsFacade::new(store.clone()),
            search: SearchFacade::new(store),
        }
    }
}

/// What the panels are showing
#[derive(Resource)]
pub struct EditorUiState {
    pub session: RoomEditorSession,
    pub placement: Option<(Uuid, PlacementSession)>,
    pub highlight: PreviewHighlight,
    pub new_furniture: FurniturePayload,
    /// Furniture whose items window is open, with its name for the title
    pub items_for: Option<(Uuid, String)>,
    /// New item names, one per line
    pub item_drafts: String,
    pub search_text: String,
    pub status: Option<String>,
}

impl EditorUiState {
    fn from_preferences(preferences: &EditorPreferences) -> Self {
        Self {
            session: RoomEditorSession::new(preferences.grid_side(), preferences.brush_size),
            placement: None,
            highlight: PreviewHighlight::default(),
            new_furniture: FurniturePayload {
                color: "#ff1744".to_string(),
                ..Default::default()
            },
            items_for: None,
            item_drafts: String::new(),
            search_text: String::new(),
            status: None,
        }
    }
}

#[derive(Default)]
pub struct RoomGridEditorPlugin;

impl Plugin for RoomGridEditorPlugin {
    fn build(&self, app: &mut App) {
        let preferences = EditorPreferences::load();
        info!("Loaded editor preferences");

        let store = Arc::new(InMemoryStore::new());
        app.add_plugins(EguiPlugin::default())
            .insert_resource(EditorUiState::from_preferences(&preferences))
            .insert_resource(preferences)
            .insert_resource(EditorFacades::new(store.clone()))
            .insert_resource(EditorStore(store))
            .add_systems(Startup, (setup_camera, seed_demo_room))
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

fn setup_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// One L-shaped room so the panels are not empty on first launch
fn seed_demo_room(store: Res<EditorStore>, facades: Res<EditorFacades>) {
    let mut cells = GridBounds::new(4, 4, 8, 3).coords().collect::<Vec<_>>();
    cells.extend(GridBounds::new(4, 7, 3, 4).coords());
    let command =
        CreateRoomCommand::from_bounds("Living room", "#5c6bc0", GridBounds::new(4, 4, 8, 7));
    if let Err(e) = store.0.seed_room(command, cells) {
        warn!("Could not seed demo room: {}", e);
    }
    if let Err(e) = block_on(facades.list.load_rooms()) {
        warn!("Could not load rooms: {}", e);
    }
}

fn render_ui(
    mut contexts: EguiContexts,
    facades: Res<EditorFacades>,
    preferences: Res<EditorPreferences>,
    mut state: ResMut<EditorUiState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let style = GridStyle::from_preferences(&preferences);

    egui::SidePanel::left("rooms_list")
        .default_width(220.0)
        .show(ctx, |ui| render_rooms_list(ui, &facades, &mut state));

    egui::SidePanel::right("room_details")
        .default_width(360.0)
        .show(ctx, |ui| render_room_details(ui, &facades, &mut state, &style));

    egui::CentralPanel::default().show(ctx, |ui| {
        render_room_editor(ui, &facades, &mut state, &style);
    });

    render_placement_dialog(ctx, &facades, &mut state, &style);
    render_items_dialog(ctx, &facades, &mut state);
}

fn open_room(facades: &EditorFacades, state: &mut EditorUiState, room_id: Uuid) {
    let raw = room_id.to_string();
    let loaded = block_on(facades.editor.load(&raw))
        .and_then(|_| block_on(facades.details.load(&raw)));
    if let Err(e) = loaded {
        state.status = Some(e.describe().to_string());
        return;
    }
    let editor = facades.editor.snapshot();
    match editor.room {
        Some(room) => state.session.load(&room, &editor.cells),
        None => state.status = Some("Room not found".to_string()),
    }
    state.placement = None;
    state.items_for = None;
    state.highlight.clear();
}

fn render_search(ui: &mut egui::Ui, facades: &EditorFacades, state: &mut EditorUiState) {
    ui.horizontal(|ui| {
        let edit =
            ui.add(egui::TextEdit::singleline(&mut state.search_text).hint_text("Find items"));
        if edit.changed() {
            facades.search.set_query(&state.search_text);
        }
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Search").clicked() || submitted {
            if let Err(e) = block_on(facades.search.search(&state.search_text)) {
                state.status = Some(e.describe().to_string());
            }
        }
    });

    let search = facades.search.snapshot();
    if search.is_loading {
        ui.spinner();
    }
    if search.has_searched && search.results.is_empty() {
        ui.label("No items found");
    }
    let mut open = None;
    for result in &search.results {
        let label = format!(
            "{} ({} / {})",
            result.item_name, result.room_name, result.furniture_name
        );
        if ui.selectable_label(false, label).clicked() {
            open = Some((result.room_id, result.furniture_id));
        }
    }
    if let Some((room_id, furniture_id)) = open {
        open_room(facades, state, room_id);
        state.highlight.set_highlighted(Some(furniture_id));
    }
}

fn render_rooms_list(ui: &mut egui::Ui, facades: &EditorFacades, state: &mut EditorUiState) {
    render_search(ui, facades, state);
    ui.separator();

    ui.heading("Rooms");
    if ui.button("+ New room").clicked() {
        state.session.reset();
        state.placement = None;
        facades.editor.reset();
        facades.details.reset();
    }
    ui.separator();

    let list = facades.list.snapshot();
    if list.is_loading {
        ui.spinner();
    }
    let mut open = None;
    let mut delete = None;
    for room in &list.rooms {
        ui.horizontal(|ui| {
            let selected = state.session.room_id() == Some(room.id);
            if ui.selectable_label(selected, &room.name).clicked() {
                open = Some(room.id);
            }
            if ui.small_button("x").clicked() {
                delete = Some(room.id);
            }
        });
    }

    if let Some(room_id) = open {
        open_room(facades, state, room_id);
    }
    if let Some(room_id) = delete {
        match block_on(facades.list.delete_room(&room_id.to_string())) {
            Ok(()) if state.session.room_id() == Some(room_id) => {
                state.session.reset();
                facades.details.reset();
            }
            Ok(()) => {}
            Err(e) => state.status = Some(e.describe().to_string()),
        }
    }
}

fn render_room_editor(
    ui: &mut egui::Ui,
    facades: &EditorFacades,
    state: &mut EditorUiState,
    style: &GridStyle,
) {
    let title = if state.session.room_id().is_some() {
        "Edit room"
    } else {
        "New room"
    };
    ui.heading(title);

    ui.horizontal(|ui| {
        ui.label("Name:");
        ui.text_edit_singleline(&mut state.session.name);
        ui.label("Color:");
        ui.add(egui::TextEdit::singleline(&mut state.session.color).desired_width(70.0));
    });
    show_brush_picker(ui, &mut state.session.surface);

    let session = &mut state.session;
    let style = style.with_fill_hex(&session.color);
    egui::ScrollArea::both().show(ui, |ui| {
        let events = show_grid_editor(ui, &session.grid, &mut session.surface, &style);
        session.handle_all(events);
    });

    ui.separator();
    ui.horizontal(|ui| {
        let can_save = state.session.can_save();
        if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
            match block_on(state.session.save(&facades.editor)) {
                Ok(room_id) => {
                    state.status = Some("Room saved".to_string());
                    if let Err(e) = block_on(facades.list.load_rooms()) {
                        warn!("Could not reload rooms: {}", e);
                    }
                    open_room(facades, state, room_id);
                }
                Err(e) => state.status = Some(e.describe().to_string()),
            }
        }
        if ui.button("Clear").clicked() {
            state.session.grid.clear();
        }
        ui.label(format!("{} cell(s)", state.session.grid.filled_len()));
        if let Some(status) = &state.status {
            ui.label(status);
        }
    });
}

fn render_room_details(
    ui: &mut egui::Ui,
    facades: &EditorFacades,
    state: &mut EditorUiState,
    style: &GridStyle,
) {
    let details = facades.details.snapshot();
    let Some(room) = &details.room else {
        ui.label(if details.not_found {
            "Room not found"
        } else {
            "Select a room"
        });
        return;
    };

    ui.heading(&room.name);
    let layout = PreviewLayout::derive(&details.cells, None);
    let preview_style = style.with_fill_hex(&room.color);
    if let Some(clicked) = show_grid_preview(
        ui,
        &layout,
        &details.cells,
        &details.placements,
        &mut state.highlight,
        &preview_style,
    ) {
        state.highlight.set_highlighted(Some(clicked));
    }

    ui.separator();
    ui.label("Furniture");
    let mut place = None;
    let mut remove = None;
    let mut show_items = None;
    for item in &details.furniture {
        ui.horizontal(|ui| {
            let highlighted = state.highlight.highlighted == Some(item.id);
            if ui.selectable_label(highlighted, &item.name).clicked() {
                state.highlight.set_highlighted(Some(item.id));
            }
            if ui.small_button("Place").clicked() {
                place = Some(item.id);
            }
            if ui.small_button("Items").clicked() {
                show_items = Some((item.id, item.name.clone()));
            }
            if ui.small_button("x").clicked() {
                remove = Some(item.id);
            }
        });
    }

    if let Some(furniture_id) = place {
        let existing = details
            .placements
            .iter()
            .find(|view| view.furniture_id == furniture_id)
            .map(|view| view.bounds());
        state.placement = Some((furniture_id, PlacementSession::new(&details.cells, existing)));
    }
    if let Some((furniture_id, name)) = show_items {
        match block_on(facades.items.load(&furniture_id.to_string())) {
            Ok(()) => state.items_for = Some((furniture_id, name)),
            Err(e) => state.status = Some(e.describe().to_string()),
        }
    }
    if let Some(furniture_id) = remove {
        if let Err(e) = block_on(facades.details.delete_furniture(furniture_id)) {
            state.status = Some(e.describe().to_string());
        }
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut state.new_furniture.name);
        ui.add(egui::TextEdit::singleline(&mut state.new_furniture.color).desired_width(70.0));
        if ui.button("Add").clicked() {
            let payload = state.new_furniture.clone();
            let created =
                block_on(facades.details.create_furniture(&room.id.to_string(), payload, None));
            match created {
                Ok(_) => state.new_furniture.name.clear(),
                Err(e) => state.status = Some(e.describe().to_string()),
            }
        }
    });
}

fn render_placement_dialog(
    ctx: &egui::Context,
    facades: &EditorFacades,
    state: &mut EditorUiState,
    style: &GridStyle,
) {
    let Some((furniture_id, session)) = state.placement.as_mut() else {
        return;
    };
    let furniture_id = *furniture_id;
    let details = facades.details.snapshot();
    let Some(item) = details.furniture.iter().find(|item| item.id == furniture_id) else {
        state.placement = None;
        return;
    };
    let Some(room_id) = details.room.as_ref().map(|room| room.id) else {
        state.placement = None;
        return;
    };

    let mut close = false;
    let mut submitted = None;
    egui::Window::new(format!("Place {}", item.name))
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            show_brush_picker(ui, &mut session.surface);
            let style = style.with_fill_hex(&item.color);
            let events = show_grid_editor(ui, &session.grid, &mut session.surface, &style);
            session.handle_all(events);

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    submitted = Some(session.submit(room_id));
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

    match submitted {
        Some(Ok(upsert)) => {
            let payload = FurniturePayload {
                name: item.name.clone(),
                description: item.description.clone(),
                color: item.color.clone(),
            };
            let saved =
                block_on(facades.details.update_furniture(furniture_id, payload, Some(upsert)));
            match saved {
                Ok(_) => close = true,
                Err(e) => state.status = Some(e.describe().to_string()),
            }
        }
        Some(Err(e)) => state.status = Some(e.describe().to_string()),
        None => {}
    }
    if close {
        state.placement = None;
    }
}

fn render_items_dialog(ctx: &egui::Context, facades: &EditorFacades, state: &mut EditorUiState) {
    let Some((_, furniture_name)) = state.items_for.clone() else {
        return;
    };
    let items = facades.items.snapshot();

    let mut close = false;
    let mut add = false;
    let mut delete = None;
    egui::Window::new(format!("Items: {}", furniture_name))
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label("New items, one per line");
            ui.add(egui::TextEdit::multiline(&mut state.item_drafts).desired_rows(4));
            ui.horizontal(|ui| {
                let has_drafts = state.item_drafts.lines().any(|line| !line.trim().is_empty());
                if ui
                    .add_enabled(has_drafts && !items.is_saving, egui::Button::new("Add"))
                    .clicked()
                {
                    add = true;
                }
                if ui.button("Close").clicked() {
                    close = true;
                }
            });

            ui.separator();
            if items.is_loading {
                ui.spinner();
            }
            for item in &items.items {
                ui.horizontal(|ui| {
                    ui.label(&item.name);
                    let busy = items.deleting.contains(&item.id);
                    if ui.add_enabled(!busy, egui::Button::new("x").small()).clicked() {
                        delete = Some(item.id);
                    }
                });
            }
        });

    if add {
        let names: Vec<String> = state
            .item_drafts
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        match block_on(facades.items.add_items(names)) {
            // Keep only the refused names so they can be corrected
            Ok(failed) => {
                state.item_drafts = failed
                    .into_iter()
                    .map(|failure| failure.name)
                    .collect::<Vec<_>>()
                    .join("\n");
            }
            Err(e) => state.status = Some(e.describe().to_string()),
        }
    }
    if let Some(item_id) = delete {
        if let Err(e) = block_on(facades.items.delete_item(item_id)) {
            state.status = Some(e.describe().to_string());
        }
    }
    if close {
        state.items_for = None;
        state.item_drafts.clear();
        facades.items.reset();
    }
}

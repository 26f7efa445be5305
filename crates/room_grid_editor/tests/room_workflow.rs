//! End-to-end flows: paint a room, save it, place furniture, read it back

use room_grid_core::{CellCoord, GridBounds};
use room_grid_editor::facades::FurniturePayload;
use room_grid_editor::render::PreviewLayout;
use room_grid_editor::store::{FurnitureApi, RoomsApi};
use room_grid_editor::tools::{apply_events, SurfaceEvent};
use room_grid_editor::{
    FurnitureItemsFacade, InMemoryStore, PlacementSession, RoomDetailsFacade, RoomEditorFacade,
    RoomEditorSession, RoomsListFacade, SearchFacade,
};
use std::sync::Arc;

fn paint(session: &mut RoomEditorSession, cells: &[(i32, i32)]) {
    let mut events = Vec::new();
    for &(x, y) in cells {
        session
            .surface
            .click(&session.grid, CellCoord::new(x, y), |e| events.push(e));
    }
    session.handle_all(events);
}

#[tokio::test]
async fn test_create_room_and_reload_details() {
    let store = Arc::new(InMemoryStore::new());
    let editor = RoomEditorFacade::new(store.clone());
    let details = RoomDetailsFacade::new(store.clone(), store.clone());
    let list = RoomsListFacade::new(store.clone());

    let mut session = RoomEditorSession::default();
    session.name = "Workshop".to_string();
    session.color = "#795548".to_string();
    paint(&mut session, &[(5, 5), (6, 5), (7, 5), (5, 6)]);

    let room_id = session.save(&editor).await.unwrap();
    assert_eq!(session.room_id(), Some(room_id));

    let room = store.get_room(room_id).await.unwrap();
    assert_eq!(room.bounds(), GridBounds::new(5, 5, 3, 2));
    assert_eq!(room.name, "Workshop");

    list.load_rooms().await.unwrap();
    assert_eq!(list.snapshot().rooms[0].id, room_id);

    details.load(&room_id.to_string()).await.unwrap();
    let state = details.snapshot();
    assert_eq!(
        state.cells,
        vec![
            CellCoord::new(5, 5),
            CellCoord::new(6, 5),
            CellCoord::new(7, 5),
            CellCoord::new(5, 6)
        ]
    );

    // Reopening in a fresh session reproduces the painted shape
    let mut reopened = RoomEditorSession::default();
    reopened.load(&room, &state.cells);
    assert_eq!(reopened.grid.filled_cells(), state.cells);
}

#[tokio::test]
async fn test_reopened_room_keeps_every_painted_cell() {
    let store = Arc::new(InMemoryStore::new());
    let editor = RoomEditorFacade::new(store.clone());
    let details = RoomDetailsFacade::new(store.clone(), store.clone());

    // The left arm is reached last, so its cells sit before their only
    // neighbour when read row by row
    let painted = [(2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1), (0, 0)];
    let mut session = RoomEditorSession::default();
    session.name = "Hallway".to_string();
    paint(&mut session, &painted);
    assert_eq!(session.grid.filled_len(), painted.len());

    let room_id = session.save(&editor).await.unwrap();
    details.load(&room_id.to_string()).await.unwrap();
    let state = details.snapshot();
    let room = state.room.clone().unwrap();

    let mut reopened = RoomEditorSession::default();
    reopened.load(&room, &state.cells);
    assert_eq!(reopened.grid.filled_len(), painted.len());
    for (x, y) in painted {
        assert!(reopened.grid.is_filled(CellCoord::new(x, y)));
    }
    assert_eq!(room.bounds(), GridBounds::new(0, 0, 3, 3));
}

#[tokio::test]
async fn test_edit_room_replaces_cells() {
    let store = Arc::new(InMemoryStore::new());
    let editor = RoomEditorFacade::new(store.clone());

    let mut session = RoomEditorSession::default();
    session.name = "Attic".to_string();
    paint(&mut session, &[(0, 0), (1, 0)]);
    let room_id = session.save(&editor).await.unwrap();

    paint(&mut session, &[(2, 0)]);
    session.name = "Loft".to_string();
    assert_eq!(session.save(&editor).await.unwrap(), room_id);

    let room = store.get_room(room_id).await.unwrap();
    assert_eq!(room.name, "Loft");
    assert_eq!(room.width_cells, 3);
    assert_eq!(store.get_room_cells(room_id).await.unwrap().cells.len(), 3);
}

#[tokio::test]
async fn test_place_furniture_inside_room() {
    let store = Arc::new(InMemoryStore::new());
    let editor = RoomEditorFacade::new(store.clone());
    let details = RoomDetailsFacade::new(store.clone(), store.clone());

    let mut session = RoomEditorSession::new(40, room_grid_editor::BrushSize::Medium);
    session.name = "Kitchen".to_string();
    paint(&mut session, &[(11, 21)]);
    let room_id = session.save(&editor).await.unwrap();
    details.load(&room_id.to_string()).await.unwrap();

    let fridge = details
        .create_furniture(
            &room_id.to_string(),
            FurniturePayload {
                name: "Fridge".to_string(),
                description: Some("Tall".to_string()),
                color: "#eceff1".to_string(),
            },
            None,
        )
        .await
        .unwrap();

    // Placement dialog opened on the room's cells; paint the top-left 2x1
    let mut placement = PlacementSession::new(&details.snapshot_cells(), None);
    let layout = placement.layout();
    let events = [CellCoord::new(10, 20), CellCoord::new(11, 20)]
        .into_iter()
        .map(|cell| SurfaceEvent::SetCell {
            cell: layout.to_render(cell),
            filled: true,
        });
    apply_events(&mut placement.grid, events);
    let upsert = placement.submit(room_id).unwrap();
    assert_eq!(upsert.bounds(), GridBounds::new(10, 20, 2, 1));

    details
        .update_furniture(
            fridge.id,
            FurniturePayload {
                name: fridge.name.clone(),
                description: fridge.description.clone(),
                color: fridge.color.clone(),
            },
            Some(upsert),
        )
        .await
        .unwrap();

    let stored = store.get_furniture_placement(fridge.id).await.unwrap();
    assert_eq!(stored.bounds(), GridBounds::new(10, 20, 2, 1));

    // Overlay and mask share the preview offset
    details.load(&room_id.to_string()).await.unwrap();
    let state = details.snapshot();
    let preview = PreviewLayout::derive(&state.cells, None);
    let overlay = preview.placement_rect(&state.placements[0]);
    assert_eq!(overlay, GridBounds::new(2, 2, 2, 1));
    assert_eq!(
        preview.placement_at(&state.placements, CellCoord::new(3, 2)),
        Some(fridge.id)
    );
}

#[tokio::test]
async fn test_delete_of_vanished_furniture_rolls_back() {
    let store = Arc::new(InMemoryStore::new());
    let editor = RoomEditorFacade::new(store.clone());
    let details = RoomDetailsFacade::new(store.clone(), store.clone());

    let mut session = RoomEditorSession::default();
    session.name = "Study".to_string();
    paint(&mut session, &[(1, 1)]);
    let room_id = session.save(&editor).await.unwrap();

    let payload = |name: &str| FurniturePayload {
        name: name.to_string(),
        description: None,
        color: "#8d6e63".to_string(),
    };
    let a = details
        .create_furniture(&room_id.to_string(), payload("A"), None)
        .await
        .unwrap();
    let b = details
        .create_furniture(&room_id.to_string(), payload("B"), None)
        .await
        .unwrap();
    details.load(&room_id.to_string()).await.unwrap();
    let before = details.snapshot().furniture;

    // Someone else removed A already, so our delete is refused
    store.delete_furniture(a.id).await.unwrap();
    let err = details.delete_furniture(a.id).await.unwrap_err();

    assert!(err.is_not_found());
    let state = details.snapshot();
    assert_eq!(state.furniture, before);
    assert_eq!(state.error, Some(err));

    details.delete_furniture(b.id).await.unwrap();
    assert_eq!(details.snapshot().furniture.len(), 1);
}

#[tokio::test]
async fn test_duplicate_room_name_is_reported() {
    let store = Arc::new(InMemoryStore::new());
    let editor = RoomEditorFacade::new(store.clone());

    for expected_ok in [true, false] {
        let mut session = RoomEditorSession::default();
        session.name = "Pantry".to_string();
        paint(&mut session, &[(0, 0)]);
        let result = session.save(&editor).await;
        assert_eq!(result.is_ok(), expected_ok);
    }

    let state = editor.snapshot();
    let err = state.error.unwrap();
    assert_eq!(err.status, 409);
    assert_eq!(err.describe(), "Room name already exists");
}

#[tokio::test]
async fn test_items_are_found_by_search_until_furniture_goes() {
    let store = Arc::new(InMemoryStore::new());
    let editor = RoomEditorFacade::new(store.clone());
    let details = RoomDetailsFacade::new(store.clone(), store.clone());
    let items = FurnitureItemsFacade::new(store.clone());
    let search = SearchFacade::new(store.clone());

    let mut session = RoomEditorSession::default();
    session.name = "Bedroom".to_string();
    paint(&mut session, &[(2, 2), (3, 2)]);
    let room_id = session.save(&editor).await.unwrap();
    let wardrobe = details
        .create_furniture(
            &room_id.to_string(),
            FurniturePayload {
                name: "Wardrobe".to_string(),
                description: None,
                color: "#6d4c41".to_string(),
            },
            None,
        )
        .await
        .unwrap();

    items.load(&wardrobe.id.to_string()).await.unwrap();
    let failed = items
        .add_items(vec!["Winter coat".to_string(), "Scarf".to_string()])
        .await
        .unwrap();
    assert!(failed.is_empty());
    assert_eq!(items.snapshot().items.len(), 2);

    search.search("coat").await.unwrap();
    let found = search.snapshot().results;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].room_id, room_id);
    assert_eq!(found[0].furniture_id, wardrobe.id);

    // Matching the room name finds everything inside it
    search.search("bedroom").await.unwrap();
    assert_eq!(search.snapshot().results.len(), 2);

    details.delete_furniture(wardrobe.id).await.unwrap();
    search.search("coat").await.unwrap();
    let state = search.snapshot();
    assert!(state.results.is_empty());
    assert!(state.has_searched);
}

//! Field-level validation for commands sent to the store
//!
//! Each validator collects every failing field into a [`FieldErrors`] map
//! (field name -> message) instead of stopping at the first problem.

use crate::{
    CellCoord, CreateFurnitureCommand, CreateItemsRequest, CreateRoomCommand, ListItemsQuery,
    PlacementUpsert, RenameItem, ReplaceRoomCells, SearchItemsQuery, UpdateFurnitureCommand,
    UpdateRoomCommand, CELL_SIZE_M, MAX_COORD, MAX_SPAN_CELLS,
};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Field name -> human readable message
pub type FieldErrors = BTreeMap<String, String>;

pub const MAX_ROOM_NAME_LEN: usize = 120;
pub const MAX_FURNITURE_NAME_LEN: usize = 150;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_ITEM_NAME_LEN: usize = 200;
pub const MAX_PAGE_LIMIT: u32 = 200;

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn insert(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.insert(field.to_string(), message.into());
}

/// `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn check_name(errors: &mut FieldErrors, name: &str, max_len: usize) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        insert(errors, "name", "Name is required");
    } else if trimmed.chars().count() > max_len {
        insert(errors, "name", format!("Name must be at most {} characters", max_len));
    }
}

fn check_color(errors: &mut FieldErrors, color: &str) {
    if !is_hex_color(color) {
        insert(errors, "color", "Color must be a hex value like #aabbcc");
    }
}

fn check_span(errors: &mut FieldErrors, field: &str, value: i32) {
    if !(1..=MAX_SPAN_CELLS).contains(&value) {
        insert(
            errors,
            field,
            format!("{} must be an integer between 1 and {}", field, MAX_SPAN_CELLS),
        );
    }
}

fn check_origin(errors: &mut FieldErrors, field: &str, value: i32) {
    if value < 0 {
        insert(errors, field, format!("{} must be a number >= 0", field));
    }
}

fn check_cell_size(errors: &mut FieldErrors, value: f32) {
    if value != CELL_SIZE_M {
        insert(errors, "cell_size_m", "cell_size_m must be exactly 0.5");
    }
}

/// Trim and parse an identifier. Empty and malformed ids are both rejected
/// under `field`.
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, FieldErrors> {
    let trimmed = raw.trim();
    let mut errors = FieldErrors::new();
    if trimmed.is_empty() {
        insert(&mut errors, field, format!("{} is required", field));
        return Err(errors);
    }
    Uuid::parse_str(trimmed).map_err(|_| {
        insert(&mut errors, field, format!("{} must be a valid UUID", field));
        errors
    })
}

pub fn validate_create_room(command: &CreateRoomCommand) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, &command.name, MAX_ROOM_NAME_LEN);
    check_color(&mut errors, &command.color);
    check_origin(&mut errors, "x_start", command.x_start);
    check_origin(&mut errors, "y_start", command.y_start);
    check_span(&mut errors, "width_cells", command.width_cells);
    check_span(&mut errors, "height_cells", command.height_cells);
    check_cell_size(&mut errors, command.cell_size_m);
    finish(errors)
}

pub fn validate_update_room(command: &UpdateRoomCommand) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if command.is_empty() {
        insert(&mut errors, "name", "At least one field must be provided");
        return Err(errors);
    }
    if let Some(name) = &command.name {
        check_name(&mut errors, name, MAX_ROOM_NAME_LEN);
    }
    if let Some(color) = &command.color {
        check_color(&mut errors, color);
    }
    if let Some(x_start) = command.x_start {
        check_origin(&mut errors, "x_start", x_start);
    }
    if let Some(y_start) = command.y_start {
        check_origin(&mut errors, "y_start", y_start);
    }
    if let Some(width_cells) = command.width_cells {
        check_span(&mut errors, "width_cells", width_cells);
    }
    if let Some(height_cells) = command.height_cells {
        check_span(&mut errors, "height_cells", height_cells);
    }
    if let Some(cell_size_m) = command.cell_size_m {
        check_cell_size(&mut errors, cell_size_m);
    }
    finish(errors)
}

fn in_coord_range(coord: &CellCoord) -> bool {
    (0..=MAX_COORD).contains(&coord.x) && (0..=MAX_COORD).contains(&coord.y)
}

pub fn validate_room_cells(request: &ReplaceRoomCells) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some((idx, cell)) = request
        .cells
        .iter()
        .enumerate()
        .find(|(_, cell)| !in_coord_range(cell))
    {
        insert(
            &mut errors,
            "cells",
            format!(
                "cells[{}] ({}) must have x and y between 0 and {}",
                idx, cell, MAX_COORD
            ),
        );
    }
    finish(errors)
}

pub fn validate_create_furniture(command: &CreateFurnitureCommand) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, &command.name, MAX_FURNITURE_NAME_LEN);
    if let Some(description) = &command.description {
        check_description(&mut errors, description);
    }
    check_color(&mut errors, &command.color);
    if command.room_id.is_nil() {
        insert(&mut errors, "room_id", "Room id is required");
    }
    finish(errors)
}

fn check_description(errors: &mut FieldErrors, description: &str) {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        insert(
            errors,
            "description",
            format!("Description must be at most {} characters", MAX_DESCRIPTION_LEN),
        );
    }
}

pub fn validate_update_furniture(command: &UpdateFurnitureCommand) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if command.is_empty() {
        insert(&mut errors, "name", "At least one field must be provided");
        return Err(errors);
    }
    if let Some(name) = &command.name {
        check_name(&mut errors, name, MAX_FURNITURE_NAME_LEN);
    }
    if let Some(description) = &command.description {
        check_description(&mut errors, description);
    }
    if let Some(color) = &command.color {
        check_color(&mut errors, color);
    }
    finish(errors)
}

pub fn validate_placement(request: &PlacementUpsert) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if request.room_id.is_nil() {
        insert(&mut errors, "room_id", "Room id is required");
    }
    for (field, value) in [("x", request.x), ("y", request.y)] {
        if !(0..=MAX_COORD).contains(&value) {
            insert(
                &mut errors,
                field,
                format!("{} must be an integer between 0 and {}", field, MAX_COORD),
            );
        }
    }
    check_span(&mut errors, "width_cells", request.width_cells);
    check_span(&mut errors, "height_cells", request.height_cells);
    finish(errors)
}

fn check_page(errors: &mut FieldErrors, limit: Option<u32>, offset: Option<u32>) {
    if let Some(limit) = limit {
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            insert(
                errors,
                "limit",
                format!("limit must be an integer between 1 and {}", MAX_PAGE_LIMIT),
            );
        }
    }
    if offset.is_some() && limit.is_none() {
        insert(errors, "offset", "offset requires limit to be set");
    }
}

pub fn validate_list_items(query: &ListItemsQuery) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if query.furniture_id.is_nil() {
        insert(&mut errors, "furniture_id", "Furniture id is required");
    }
    if let Some(q) = &query.q {
        let trimmed = q.trim();
        if trimmed.is_empty() {
            insert(&mut errors, "q", "Query filter cannot be empty");
        } else if trimmed.chars().count() > MAX_ITEM_NAME_LEN {
            insert(
                &mut errors,
                "q",
                format!("Query filter must be at most {} characters", MAX_ITEM_NAME_LEN),
            );
        }
    }
    check_page(&mut errors, query.limit, query.offset);
    finish(errors)
}

/// Every name is checked; failures are keyed `items.<index>.name`
pub fn validate_create_items(request: &CreateItemsRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if request.names.is_empty() {
        insert(&mut errors, "items", "At least one item is required");
        return Err(errors);
    }
    for (idx, name) in request.names.iter().enumerate() {
        let trimmed = name.trim();
        let field = format!("items.{}.name", idx);
        if trimmed.is_empty() {
            insert(&mut errors, &field, "Name is required");
        } else if trimmed.chars().count() > MAX_ITEM_NAME_LEN {
            insert(
                &mut errors,
                &field,
                format!("Name must be at most {} characters", MAX_ITEM_NAME_LEN),
            );
        }
    }
    finish(errors)
}

pub fn validate_rename_item(request: &RenameItem) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, &request.name, MAX_ITEM_NAME_LEN);
    finish(errors)
}

pub fn validate_search_items(query: &SearchItemsQuery) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if query.q.trim().is_empty() {
        insert(&mut errors, "q", "Query is required");
    }
    check_page(&mut errors, query.limit, query.offset);
    finish(errors)
}

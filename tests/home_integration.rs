//! End-to-end flow of the table browser: draw with a test backend, click
//! the header arrows, and check the resulting sort against the keyboard
//! path.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, Terminal};
use tokio::sync::mpsc::unbounded_channel;

use oceanconf::{
    action::Action,
    catalog::{Catalog, CellValue},
    components::{home::Home, Component},
    config::Config,
};

fn catalog() -> Catalog {
    serde_json::from_str(
        r#"{
            "loggers": [
                {"id": 3, "name": "MLOG-3", "serial_number": "ML-003", "firmware_version": null, "notes": null},
                {"id": 1, "name": "MLOG-1", "serial_number": "ML-001", "firmware_version": null, "notes": null},
                {"id": 2, "name": "MLOG-2", "serial_number": "ML-002", "firmware_version": null, "notes": null}
            ]
        }"#,
    )
    .unwrap()
}

fn ids(home: &Home) -> Vec<i64> {
    home.table()
        .rows
        .iter()
        .map(|row| match row[0] {
            CellValue::Int(id) => id,
            _ => panic!("id column must be integer"),
        })
        .collect()
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::empty(),
    }
}

// With an 80x24 frame the Logger table starts inside the border at (1, 1):
// the first header reads "Id ▲▼", so the arrow pair of the id column covers
// columns 4 and 5 of the header row.
const ID_ARROW_UP: (u16, u16) = (4, 1);
const ID_ARROW_DOWN: (u16, u16) = (5, 1);

fn draw(home: &mut Home) {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| home.draw(f, f.area()).unwrap())
        .unwrap();
}

#[test]
fn test_arrow_click_sorts_the_column() {
    let (tx, mut rx) = unbounded_channel();
    let mut home = Home::new(catalog());
    home.register_action_handler(tx).unwrap();
    home.register_config_handler(Config::default()).unwrap();
    assert_eq!(ids(&home), vec![3, 1, 2]);

    draw(&mut home);
    home.handle_mouse_events(click(ID_ARROW_UP.0, ID_ARROW_UP.1))
        .unwrap();
    let action = rx.try_recv().unwrap();
    assert_eq!(
        action,
        Action::SortColumn {
            key: "id".to_owned(),
            ascending: true,
        }
    );
    home.update(action).unwrap();
    assert_eq!(home.selection(), "id_up");
    assert_eq!(ids(&home), vec![1, 2, 3]);

    draw(&mut home);
    home.handle_mouse_events(click(ID_ARROW_DOWN.0, ID_ARROW_DOWN.1))
        .unwrap();
    let action = rx.try_recv().unwrap();
    home.update(action).unwrap();
    assert_eq!(home.selection(), "id_down");
    assert_eq!(ids(&home), vec![3, 2, 1]);
}

#[test]
fn test_click_outside_the_arrows_does_nothing() {
    let (tx, mut rx) = unbounded_channel();
    let mut home = Home::new(catalog());
    home.register_action_handler(tx).unwrap();

    draw(&mut home);
    // title cell, data row, and border are all inert
    home.handle_mouse_events(click(1, 1)).unwrap();
    home.handle_mouse_events(click(ID_ARROW_UP.0, 2)).unwrap();
    home.handle_mouse_events(click(0, 0)).unwrap();
    assert!(rx.try_recv().is_err());
    assert_eq!(ids(&home), vec![3, 1, 2]);
}

// On a 50-wide frame the Logger columns lay out at x = 1 (Id, 5 wide),
// 7 (Name, 7), 15 (Serial, 9), 25 (Firmware, 11), 37 (Notes, 27): the Notes
// column runs past the frame and gets truncated by the table, so its arrow
// pair at columns 43-44 must not be clickable even though those cells are
// still on screen.
#[test]
fn test_arrows_of_truncated_columns_are_not_clickable() {
    let (tx, mut rx) = unbounded_channel();
    let mut home = Home::new(
        serde_json::from_str(
            r#"{
                "loggers": [
                    {"id": 2, "name": "MLOG-2", "serial_number": "ML-002", "firmware_version": "2.1", "notes": "southern mooring line spare"},
                    {"id": 1, "name": "MLOG-1", "serial_number": "ML-001", "firmware_version": "1.0", "notes": null}
                ]
            }"#,
        )
        .unwrap(),
    );
    home.register_action_handler(tx).unwrap();

    let backend = TestBackend::new(50, 10);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| home.draw(f, f.area()).unwrap())
        .unwrap();

    // the Notes arrow pair as the accumulated layout would place it
    home.handle_mouse_events(click(43, 1)).unwrap();
    home.handle_mouse_events(click(44, 1)).unwrap();
    assert!(rx.try_recv().is_err());
    assert_eq!(home.selection(), "");

    // the last fully visible column still sorts
    home.handle_mouse_events(click(34, 1)).unwrap();
    let action = rx.try_recv().unwrap();
    assert_eq!(
        action,
        Action::SortColumn {
            key: "firmware_version".to_owned(),
            ascending: true,
        }
    );
    home.update(action).unwrap();
    assert_eq!(home.selection(), "firmware_version_up");
}

#[test]
fn test_mouse_and_keyboard_sort_agree() {
    let (tx, mut rx) = unbounded_channel();
    let mut clicked = Home::new(catalog());
    clicked.register_action_handler(tx).unwrap();
    draw(&mut clicked);
    clicked
        .handle_mouse_events(click(ID_ARROW_UP.0, ID_ARROW_UP.1))
        .unwrap();
    let action = rx.try_recv().unwrap();
    clicked.update(action).unwrap();

    let mut keyed = Home::new(catalog());
    keyed.update(Action::SortAscending).unwrap();

    assert_eq!(clicked.selection(), keyed.selection());
    assert_eq!(clicked.table(), keyed.table());
}

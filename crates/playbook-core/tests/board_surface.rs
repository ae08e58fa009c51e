//! End-to-end gesture scenarios driven through a `MemoryHost`.

use kurbo::{Point, Size};
use playbook_core::{
    Board, BoardHost, BoardItem, BoardSurface, Command, Drawing, DrawingKind, DropPayload, Interaction, Key,
    KeyEvent, MemoryHost, MenuAction, MenuTarget, Modifiers, PlacementError, PlayerData, PointerEvent, ShapeData,
    Team, Tool,
};

const SIZE: Size = Size::new(1000.0, 1000.0);

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

fn cone(x: f64, y: f64) -> BoardItem {
    BoardItem::shape(
        "cone",
        Point::new(x, y),
        ShapeData {
            icon: Some("cone".into()),
            image_url: None,
            color: Some("#f97316".into()),
            base_size: 40.0,
        },
    )
}

fn player(number: u32, x: f64, y: f64) -> BoardItem {
    BoardItem::player(
        format!("p-{number}"),
        Point::new(x, y),
        PlayerData {
            team: Team::Home,
            number,
            nickname: format!("Player {number}"),
            avatar_url: None,
            color: Team::Home.default_color().into(),
        },
    )
}

fn press(surface: &mut BoardSurface, host: &mut MemoryHost, x: f64, y: f64) {
    surface.pointer_down(host, PointerEvent::at(x, y));
    surface.pointer_up(host, PointerEvent::at(x, y));
}

fn drag(surface: &mut BoardSurface, host: &mut MemoryHost, from: (f64, f64), to: (f64, f64)) {
    surface.pointer_down(host, PointerEvent::at(from.0, from.1));
    surface.pointer_move(host, PointerEvent::at(to.0, to.1));
    surface.pointer_up(host, PointerEvent::at(to.0, to.1));
}

fn type_text(surface: &mut BoardSurface, host: &mut MemoryHost, text: &str) {
    for c in text.chars() {
        surface.key_down(host, KeyEvent::new(Key::Char(c)));
    }
}

#[test]
fn arrow_select_recolor() {
    let mut host = MemoryHost::default();
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Arrow).with_color("#ffffff");

    drag(&mut surface, &mut host, (100.0, 100.0), (400.0, 300.0));
    assert_eq!(host.board().drawings.len(), 1);
    let arrow = host.board().drawings[0].clone();
    assert_eq!(arrow.kind, DrawingKind::Arrow);
    assert_eq!(arrow.points, vec![Point::new(0.1, 0.1), Point::new(0.4, 0.3)]);

    surface.set_tool(&mut host, Tool::Selection);
    drag(&mut surface, &mut host, (0.0, 0.0), (500.0, 500.0));
    assert!(surface.selection().contains(arrow.id));
    assert_eq!(surface.selection().len(), 1);

    surface.run_action(&mut host, MenuTarget::Selection, MenuAction::Recolor("#ff0000".into()));
    assert_eq!(host.board().drawings[0].color, "#ff0000");
    assert_eq!(host.board().drawings[0].points, arrow.points);
}

#[test]
fn recolor_changes_only_color() {
    let mut host = MemoryHost::default();
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Arrow).with_color("#ffffff");

    // Arrow from (0.1, 0.5) to (0.4, 0.5).
    drag(&mut surface, &mut host, (100.0, 500.0), (400.0, 500.0));
    let arrow = host.board().drawings[0].clone();
    assert_eq!(arrow.points, vec![Point::new(0.1, 0.5), Point::new(0.4, 0.5)]);

    // Select with the rectangle (0.05, 0.45) to (0.45, 0.55).
    surface.set_tool(&mut host, Tool::Selection);
    drag(&mut surface, &mut host, (50.0, 450.0), (450.0, 550.0));
    assert_eq!(surface.selection().ids(), vec![arrow.id]);

    surface.run_action(&mut host, MenuTarget::Selection, MenuAction::Recolor("#ff0000".into()));
    let expected = Drawing {
        color: "#ff0000".into(),
        ..arrow
    };
    assert_eq!(host.board().drawings, vec![expected]);
}

#[test]
fn rubber_band_selects_inclusive() {
    let items = vec![cone(0.1, 0.1), cone(0.5, 0.5), cone(0.9, 0.9)];
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    let mut host = MemoryHost::new(Board { items, drawings: Vec::new() });
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Selection);

    // Start in empty space between tokens and drag up-left.
    drag(&mut surface, &mut host, (600.0, 600.0), (0.0, 0.0));
    assert!(surface.selection().contains(ids[0]));
    assert!(surface.selection().contains(ids[1]));
    assert!(!surface.selection().contains(ids[2]));
    assert!(surface.interaction().is_idle());
}

#[test]
fn group_move_keeps_relative_layout() {
    let items = vec![cone(0.2, 0.2), cone(0.4, 0.3)];
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    let mut host = MemoryHost::new(Board { items, drawings: Vec::new() });
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Selection);
    surface.select(ids.clone());

    surface.pointer_down(&mut host, PointerEvent::at(200.0, 200.0));
    for step in 1..=5 {
        let d = 20.0 * step as f64;
        surface.pointer_move(&mut host, PointerEvent::at(200.0 + d, 200.0 + d));
    }
    surface.pointer_up(&mut host, PointerEvent::at(300.0, 300.0));

    let board = host.board();
    assert!(approx(board.items[0].position, Point::new(0.3, 0.3)));
    assert!(approx(board.items[1].position, Point::new(0.5, 0.4)));
    assert_eq!(surface.selection().len(), 2);
}

#[test]
fn move_tool_retargets_selection() {
    let items = vec![cone(0.2, 0.2), cone(0.6, 0.6)];
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    let mut host = MemoryHost::new(Board { items, drawings: Vec::new() });
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Move);
    surface.select(ids.clone());

    drag(&mut surface, &mut host, (200.0, 200.0), (250.0, 200.0));
    assert!(approx(host.board().items[0].position, Point::new(0.25, 0.2)));
    assert!(approx(host.board().items[1].position, Point::new(0.6, 0.6)));
    assert_eq!(surface.selection().ids(), vec![ids[0]]);

    // Ctrl extends instead of replacing.
    surface.pointer_down(&mut host, PointerEvent::at(600.0, 600.0).with_modifiers(Modifiers::CTRL));
    surface.pointer_up(&mut host, PointerEvent::at(600.0, 600.0));
    assert_eq!(surface.selection().len(), 2);
}

#[test]
fn players_win_over_shapes_and_drawings() {
    let shape = cone(0.5, 0.5);
    let keeper = player(1, 0.5, 0.5);
    let keeper_id = keeper.id;
    let line = Drawing::segment(DrawingKind::Line, Point::new(0.0, 0.5), Point::new(1.0, 0.5), "#fff", 3.0);
    let mut host = MemoryHost::new(Board {
        items: vec![keeper, shape],
        drawings: vec![line],
    });
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Pencil);

    press(&mut surface, &mut host, 500.0, 500.0);
    assert_eq!(surface.selection().ids(), vec![keeper_id]);
    assert!(host.board().drawings.len() == 1, "press on a token must not start a drawing");
}

#[test]
fn duplicate_offsets_and_reselects() {
    let shape = cone(0.5, 0.5);
    let keeper = player(1, 0.3, 0.3);
    let ids = vec![shape.id, keeper.id];
    let mut host = MemoryHost::new(Board {
        items: vec![shape, keeper],
        drawings: Vec::new(),
    });
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Selection);
    surface.select(ids.clone());

    surface.execute(&mut host, Command::Duplicate { ids: ids.clone() });
    let board = host.board();
    assert_eq!(board.items.len(), 3);
    let copy = &board.items[2];
    assert!(!ids.contains(&copy.id));
    assert!(approx(copy.position, Point::new(0.52, 0.52)));
    assert_eq!(surface.selection().ids(), vec![copy.id]);

    // Only players selected: nothing happens.
    surface.execute(&mut host, Command::Duplicate { ids: vec![ids[1]] });
    assert_eq!(host.board().items.len(), 3);
}

#[test]
fn delete_removes_from_selection() {
    let shape = cone(0.5, 0.5);
    let id = shape.id;
    let mut host = MemoryHost::new(Board {
        items: vec![shape],
        drawings: Vec::new(),
    });
    let mut surface = BoardSurface::new(SIZE);
    surface.select([id]);
    surface.run_action(&mut host, MenuTarget::Item(id), MenuAction::Delete);
    assert!(host.board().is_empty());
    assert!(surface.selection().is_empty());
}

#[test]
fn shape_menu_resize_and_rotate() {
    let shape = cone(0.5, 0.5);
    let id = shape.id;
    let mut host = MemoryHost::new(Board {
        items: vec![shape],
        drawings: Vec::new(),
    });
    let mut surface = BoardSurface::new(SIZE);
    surface.run_action(&mut host, MenuTarget::Item(id), MenuAction::Enlarge);
    surface.run_action(&mut host, MenuTarget::Item(id), MenuAction::Rotate);
    let item = &host.board().items[0];
    assert!((item.scale - 1.2).abs() < 1e-12);
    assert_eq!(item.rotation, 90.0);
}

#[test]
fn new_label_commit_and_cancel() {
    let mut host = MemoryHost::default();
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Text).with_color("#000000");

    surface.pointer_down(&mut host, PointerEvent::at(300.0, 300.0));
    surface.pointer_up(&mut host, PointerEvent::at(300.0, 300.0));
    assert!(matches!(surface.interaction(), Interaction::EditingText(_)));
    type_text(&mut surface, &mut host, "High");
    surface.key_down(&mut host, KeyEvent::new(Key::Enter).with_modifiers(Modifiers::SHIFT));
    type_text(&mut surface, &mut host, "press");
    surface.key_down(&mut host, KeyEvent::new(Key::Enter));

    let label = host.board().drawings[0].clone();
    assert_eq!(label.kind, DrawingKind::Text);
    assert_eq!(label.text.as_deref(), Some("High\npress"));
    assert_eq!(label.points, vec![Point::new(0.3, 0.3)]);

    // Escape on a fresh label leaves the board untouched.
    let updates = host.updates;
    press(&mut surface, &mut host, 700.0, 700.0);
    type_text(&mut surface, &mut host, "scrap");
    surface.key_down(&mut host, KeyEvent::new(Key::Escape));
    assert_eq!(host.updates, updates);
    assert_eq!(host.board().drawings.len(), 1);
}

#[test]
fn existing_label_edit_escape_enter_and_clear() {
    let label = Drawing::label(Point::new(0.2, 0.2), "Zone 14", "#000", 2.0);
    let id = label.id;
    let mut host = MemoryHost::new(Board {
        items: Vec::new(),
        drawings: vec![label],
    });
    let mut surface = BoardSurface::new(SIZE);

    // Escape keeps the original text.
    assert!(surface.begin_text_edit(&mut host, id));
    surface.set_draft_text("Half space");
    surface.key_down(&mut host, KeyEvent::new(Key::Escape));
    assert_eq!(host.board().drawings[0].text.as_deref(), Some("Zone 14"));

    // Enter commits under the same id and anchor.
    surface.run_action(&mut host, MenuTarget::Drawing(id), MenuAction::EditText);
    surface.set_draft_text("Half space");
    surface.key_down(&mut host, KeyEvent::new(Key::Enter));
    let edited = &host.board().drawings[0];
    assert_eq!(edited.id, id);
    assert_eq!(edited.points, vec![Point::new(0.2, 0.2)]);
    assert_eq!(edited.text.as_deref(), Some("Half space"));

    // Clearing and committing deletes the label; a press elsewhere commits.
    surface.begin_text_edit(&mut host, id);
    surface.set_draft_text("");
    surface.pointer_down(&mut host, PointerEvent::at(900.0, 900.0));
    assert!(host.board().drawings.is_empty());
    assert!(surface.interaction().is_idle());
}

#[test]
fn double_click_enters_label_edit() {
    let label = Drawing::label(Point::new(0.2, 0.2), "Press", "#000", 2.0);
    let mut host = MemoryHost::new(Board {
        items: Vec::new(),
        drawings: vec![label],
    });
    let mut surface = BoardSurface::new(SIZE);
    // Inside the first line's box, just above the baseline.
    surface.double_click(&mut host, PointerEvent::at(210.0, 195.0));
    assert!(matches!(surface.interaction(), Interaction::EditingText(draft) if draft.text == "Press"));
}

#[test]
fn drop_payloads() {
    let mut host = MemoryHost::default();
    let mut surface = BoardSurface::new(SIZE);

    let payload = DropPayload::from_json(
        r#"{ "type": "player", "player": { "id": "p-10", "number": 10, "nickname": "Ten" } }"#,
    )
    .unwrap();
    let id = surface.drop_payload(&mut host, payload, Point::new(250.0, 500.0)).unwrap();
    let item = host.board().item(id).unwrap();
    assert_eq!(item.position, Point::new(0.25, 0.5));
    assert_eq!(host.placements, 0);

    let empty = DropPayload::from_json(r#"{ "type": "shape" }"#).unwrap();
    assert!(matches!(
        surface.drop_payload(&mut host, empty, Point::new(0.0, 0.0)),
        Err(PlacementError::MissingAsset(_))
    ));
    assert_eq!(host.board().items.len(), 1);
}

#[test]
fn board_json_round_trip() {
    let mut board = Board::new();
    board.items.push(player(7, 0.1, 0.9));
    board.items.push(cone(0.5, 0.5));
    board.drawings.push(Drawing::segment(
        DrawingKind::CurvedArrow,
        Point::new(0.1, 0.1),
        Point::new(0.7, 0.2),
        "#22c55e",
        4.0,
    ));
    board.drawings.push(Drawing::label(Point::new(0.4, 0.4), "Switch play", "#000", 2.0));

    let json = board.to_json().unwrap();
    let back = Board::from_json(&json).unwrap();
    assert_eq!(back, board);
}

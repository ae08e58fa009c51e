//! Property tests: gestures never push geometry off the board.

use kurbo::{Point, Size};
use playbook_core::geometry::in_unit;
use playbook_core::{
    Board, BoardHost, BoardItem, BoardSurface, Drawing, DrawingKind, Interaction, MemoryHost, PlayerData,
    PointerEvent, ShapeData, Team, Tool,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const SIZE: Size = Size::new(800.0, 600.0);

fn pointer_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-2000.0f64..2000.0, -2000.0f64..2000.0)
}

fn board_with_arrow() -> Board {
    Board {
        items: Vec::new(),
        drawings: vec![Drawing::segment(
            DrawingKind::Arrow,
            Point::new(0.4, 0.4),
            Point::new(0.6, 0.5),
            "#ffffff",
            3.0,
        )],
    }
}

/// A player at (240, 240) px and a cone at (480, 300) px.
fn board_with_tokens() -> Board {
    let player = BoardItem::player(
        "home-7",
        Point::new(0.3, 0.4),
        PlayerData {
            team: Team::Home,
            number: 7,
            nickname: "Seven".into(),
            avatar_url: None,
            color: Team::Home.default_color().into(),
        },
    );
    let cone = BoardItem::shape(
        "cone",
        Point::new(0.6, 0.5),
        ShapeData {
            icon: Some("cone".into()),
            image_url: None,
            color: None,
            base_size: 40.0,
        },
    );
    Board {
        items: vec![player, cone],
        drawings: Vec::new(),
    }
}

/// How the tokens are picked up.
#[derive(Debug, Clone, Copy)]
enum Grab {
    Player,
    Shape,
    /// Both selected, grabbed by one of them.
    Group,
    /// Both selected, grabbed by empty space inside the selection box.
    SelectionBox,
}

fn grab_strategy() -> impl Strategy<Value = Grab> {
    prop::sample::select(vec![Grab::Player, Grab::Shape, Grab::Group, Grab::SelectionBox])
}

fn check_item_move_stays_in_bounds(grab: Grab, moves: Vec<(f64, f64)>) -> Result<(), TestCaseError> {
    let mut host = MemoryHost::new(board_with_tokens());
    let ids: Vec<_> = host.board().items.iter().map(|i| i.id).collect();
    let (tool, press) = match grab {
        Grab::Player => (Tool::Move, (240.0, 240.0)),
        Grab::Shape => (Tool::Move, (480.0, 300.0)),
        Grab::Group => (Tool::Selection, (480.0, 300.0)),
        Grab::SelectionBox => (Tool::Selection, (360.0, 270.0)),
    };
    let mut surface = BoardSurface::new(SIZE).with_tool(tool);
    if tool == Tool::Selection {
        surface.select(ids.iter().copied());
    }

    surface.pointer_down(&mut host, PointerEvent::at(press.0, press.1));
    prop_assert!(matches!(surface.interaction(), Interaction::Moving(_)));
    for (x, y) in &moves {
        surface.pointer_move(&mut host, PointerEvent::at(*x, *y));
        for item in &host.board().items {
            prop_assert!(in_unit(item.position), "item at {:?} left the board", item.position);
        }
    }
    let (x, y) = moves[moves.len() - 1];
    surface.pointer_up(&mut host, PointerEvent::at(x, y));
    prop_assert_eq!(host.board().items.len(), 2);
    Ok(())
}

fn check_move_stays_in_bounds(moves: Vec<(f64, f64)>) -> Result<(), TestCaseError> {
    let mut host = MemoryHost::new(board_with_arrow());
    let mut surface = BoardSurface::new(SIZE).with_tool(Tool::Selection);

    // Grab the middle of the shaft.
    surface.pointer_down(&mut host, PointerEvent::at(400.0, 270.0));
    for (x, y) in &moves {
        surface.pointer_move(&mut host, PointerEvent::at(*x, *y));
        for p in &host.board().drawings[0].points {
            prop_assert!(in_unit(*p), "point {p:?} left the board");
        }
    }
    surface.pointer_up(&mut host, PointerEvent::at(0.0, 0.0));
    Ok(())
}

fn check_drawing_stays_in_bounds(tool: Tool, moves: Vec<(f64, f64)>) -> Result<(), TestCaseError> {
    let mut host = MemoryHost::default();
    let mut surface = BoardSurface::new(SIZE).with_tool(tool);

    let (x0, y0) = moves[0];
    surface.pointer_down(&mut host, PointerEvent::at(x0, y0));
    for (x, y) in &moves[1..] {
        surface.pointer_move(&mut host, PointerEvent::at(*x, *y));
    }
    surface.pointer_leave(&mut host);

    prop_assert_eq!(host.board().drawings.len(), 1);
    let drawing = &host.board().drawings[0];
    if tool != Tool::Pencil {
        prop_assert_eq!(drawing.points.len(), 2);
    }
    for p in &drawing.points {
        prop_assert!(in_unit(*p), "point {p:?} left the board");
    }
    Ok(())
}

proptest! {
    #[test]
    fn move_stays_in_bounds(moves in prop::collection::vec(pointer_strategy(), 1..40)) {
        check_move_stays_in_bounds(moves)?;
    }

    #[test]
    fn item_move_stays_in_bounds(
        grab in grab_strategy(),
        moves in prop::collection::vec(pointer_strategy(), 1..40),
    ) {
        check_item_move_stays_in_bounds(grab, moves)?;
    }

    #[test]
    fn drawing_stays_in_bounds(
        tool in prop::sample::select(vec![Tool::Pencil, Tool::Line, Tool::Arrow, Tool::CurvedArrow, Tool::Circle]),
        moves in prop::collection::vec(pointer_strategy(), 1..20),
    ) {
        check_drawing_stays_in_bounds(tool, moves)?;
    }
}

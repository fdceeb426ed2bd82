mod fixture;

use cellwright::{Border, Rect, RenderContext, Size, StaticWidget};
use pretty_assertions::assert_eq;

#[test]
fn corner_and_body_positions() {
    let border = Border::new("Hello world!").at(Rect::new(2, 1, 6, 2));
    let ctx = RenderContext::new(Size::new(12, 6)).without_colors();
    let text = border.render(&ctx).unwrap();

    assert!(text.contains("\x1b[2;3H╭"), "top-left corner at column 3, row 2");
    assert!(text.contains("\x1b[2;10H╮"));
    assert!(text.contains("\x1b[5;3H╰"));
    assert!(text.contains("\x1b[3;4HHello"), "body starts at row 3");
    assert!(text.contains("\x1b[4;4Hworld!"));
}

#[test]
fn titled_border_matches_golden() {
    let border = Border::new("Hello")
        .with_title("Info")
        .at(Rect::new(1, 1, 14, 2));
    let ctx = RenderContext::new(Size::new(18, 6)).without_colors();
    let rows = fixture::paint(&border.render(&ctx).unwrap(), Size::new(18, 6));
    assert_eq!(rows, fixture::read_screen("border_scenario.txt"));
}

#[test]
fn title_needs_room_beyond_eight_cells() {
    let border = Border::new("").with_title("T").at(Rect::new(0, 0, 8, 1));
    let ctx = RenderContext::new(Size::new(10, 3)).without_colors();
    assert!(!border.render(&ctx).unwrap().contains('T'));
}

mod fixture;

use cellwright::{Rect, RenderContext, Size, StaticWidget, Table};

const ROWS: usize = 7;
const COLUMNS: usize = 4;
const WIDTH: u16 = 76;

fn scenario() -> Table {
    let rows = (0..ROWS).map(|row| (0..COLUMNS).map(move |column| format!("r{row}c{column}")));
    Table::new(rows)
        .with_header(true)
        .at(Rect::new(0, 0, WIDTH, ROWS as u16 + 1))
}

#[test]
fn columns_start_at_multiples_of_the_cell_width() {
    let table = scenario();
    let geometry = Rect::new(0, 0, WIDTH, ROWS as u16 + 1);
    let cell_width = Table::cell_width(WIDTH, COLUMNS);
    assert_eq!(cell_width, 19);
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            let (x, _) = table.cell_position(geometry, row, column);
            assert_eq!(x, cell_width * column as i64 + 1);
        }
    }
}

#[test]
fn cells_land_where_the_layout_says() {
    let table = scenario();
    let size = Size::new(80, 12);
    let ctx = RenderContext::new(size).without_colors();
    let rows = fixture::paint(&table.render(&ctx).unwrap(), size);

    for row in 0..ROWS {
        // The header separator pushes every later row down by one.
        let y = if row == 0 { 1 } else { row + 2 };
        for column in 0..COLUMNS {
            let x = 19 * column + 1;
            let expected = format!("r{row}c{column}");
            let found: String = rows[y].chars().skip(x).take(expected.len()).collect();
            assert_eq!(found, expected, "row {row} column {column}");
        }
    }

    let separator: Vec<char> = rows[2].chars().collect();
    assert_eq!(separator[0], '├');
    assert_eq!(separator[19], '┼');
    assert_eq!(separator[38], '┼');
    assert_eq!(separator[57], '┼');
    assert_eq!(separator[76], '┤');
    assert!(rows[ROWS + 2].starts_with('╰'));
}

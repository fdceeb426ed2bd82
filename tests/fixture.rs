#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use cellwright::{Buffer, RenderContext, Size};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read fixture {name}: {err}"))
}

/// Fixture rows with the `|` guards stripped. Guards keep trailing blanks visible.
pub fn read_screen(name: &str) -> Vec<String> {
    read_fixture(name)
        .replace("\r\n", "\n")
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.strip_prefix('|')
                .and_then(|line| line.strip_suffix('|'))
                .unwrap_or_else(|| panic!("fixture {name} row without guards: {line:?}"))
                .to_string()
        })
        .collect()
}

/// Paints `text` into a fresh buffer and returns every row.
pub fn paint(text: &str, size: Size) -> Vec<String> {
    let ctx = RenderContext::new(size).without_colors();
    let mut buffer = Buffer::new(size);
    buffer.paint(text, &ctx.layout);
    (0..size.height).map(|y| buffer.row_text(y)).collect()
}


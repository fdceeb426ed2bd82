use cellwright::core::color::gradient;
use cellwright::core::sequence::regex;
use cellwright::core::text::ELLIPSIS;
use cellwright::widgets::progress::{cells, INDETERMINATE_LAST};
use cellwright::{
    Color, Coordinate, CyclicWidget, EscapeSequence, Progress, ProgressState, SequenceKind,
    Spinner, SpinnerStyle, StringTerminator, TextLayout,
};
use proptest::prelude::*;

fn terminator() -> impl Strategy<Value = StringTerminator> {
    prop_oneof![
        Just(StringTerminator::Bell),
        Just(StringTerminator::EscBackslash),
        Just(StringTerminator::C1),
    ]
}

/// Words separated by single spaces, mixing wide glyphs and leading color changes.
fn sentence() -> impl Strategy<Value = String> {
    let color = prop_oneof![Just(""), Just("\x1b[31m"), Just("\x1b[32m")];
    let word = (color, "[a-z日本語]{1,7}").prop_map(|(color, word)| format!("{color}{word}"));
    prop::collection::vec(word, 1..10).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn generated_sgr_matches_its_grammar(params in prop::collection::vec(0u16..=255, 0..6)) {
        let wire = EscapeSequence::sgr(params).generate().unwrap();
        prop_assert!(regex(SequenceKind::Sgr).is_match(&wire));
    }

    #[test]
    fn generated_cursor_position_matches_its_grammar(x in 0u16..500, y in 0u16..500) {
        let wire = EscapeSequence::cursor_position(Coordinate::new(x, y)).generate().unwrap();
        prop_assert!(regex(SequenceKind::CursorPosition).is_match(&wire));
        prop_assert_eq!(wire, format!("\x1b[{};{}H", y + 1, x + 1));
    }

    #[test]
    fn generated_osc_matches_its_grammar(payload in "[ -~]{0,24}", terminator in terminator()) {
        let wire = EscapeSequence::osc(payload.clone(), terminator).generate().unwrap();
        prop_assert!(regex(SequenceKind::Osc).is_match(&wire));
        prop_assert!(wire.contains(&payload));
    }

    #[test]
    fn payload_with_a_terminator_is_rejected(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}") {
        let payload = format!("{prefix}\x07{suffix}");
        prop_assert!(EscapeSequence::osc(payload, StringTerminator::Bell).generate().is_err());
    }

    #[test]
    fn wrapped_lines_fit_and_rewrap_to_themselves(text in sentence(), width in 2usize..24) {
        let layout = TextLayout::default();
        let lines = layout.wrap(&text, width);
        for line in &lines {
            prop_assert!(layout.width(line) <= width, "{line:?} wider than {width}");
        }
        prop_assert_eq!(layout.wrap(&lines.join(" "), width), lines);
    }

    #[test]
    fn truncation_never_exceeds_the_limit(text in "\\PC{0,40}", max in 0usize..30) {
        let layout = TextLayout::default();
        let truncated = layout.truncate(&text, max);
        prop_assert!(layout.width(&truncated) <= max);
        if layout.width(&text) > max && max > ELLIPSIS.len() {
            prop_assert!(truncated.ends_with(ELLIPSIS));
        }
    }

    #[test]
    fn gradient_keeps_endpoints_and_moves_monotonically(
        from in any::<(u8, u8, u8)>(),
        to in any::<(u8, u8, u8)>(),
        steps in 2usize..40,
    ) {
        let start = Color::rgb(from.0, from.1, from.2);
        let end = Color::rgb(to.0, to.1, to.2);
        let colors = gradient(&start, &end, steps);
        prop_assert_eq!(colors.len(), steps);
        prop_assert_eq!(colors[0].resolved(), start.resolved());
        prop_assert_eq!(colors[steps - 1].resolved(), end.resolved());

        let channels = |color: &Color| {
            let rgb = color.resolved();
            [rgb.r, rgb.g, rgb.b]
        };
        for pair in colors.windows(2) {
            let (a, b) = (channels(&pair[0]), channels(&pair[1]));
            let (s, e) = (channels(&start), channels(&end));
            for c in 0..3 {
                if s[c] <= e[c] {
                    prop_assert!(a[c] <= b[c]);
                } else {
                    prop_assert!(a[c] >= b[c]);
                }
            }
        }
    }

    #[test]
    fn progress_cells_stay_on_the_track(
        position in -1_000i64..1_000,
        max in -1_000i64..1_000,
        track in 0i64..200,
    ) {
        let filled = cells(position, max, track);
        prop_assert!((0..=track).contains(&filled));
    }

    #[test]
    fn indeterminate_step_stays_in_range(frames in 0usize..400) {
        let mut progress = Progress::new(0, 100).with_state(ProgressState::Indeterminate);
        for _ in 0..frames {
            progress.advance();
            prop_assert!((0..=INDETERMINATE_LAST).contains(&progress.step()));
        }
    }

    #[test]
    fn spinner_returns_to_its_first_frame(style_index in 0usize..SpinnerStyle::ALL.len()) {
        let style = SpinnerStyle::ALL[style_index];
        let mut spinner = Spinner::new(style);
        let first = spinner.peek().to_string();
        for _ in 0..spinner.frame_count() {
            spinner.advance();
        }
        prop_assert_eq!(spinner.index(), 0);
        prop_assert_eq!(spinner.peek(), first.as_str());
    }
}

use super::*;
use crate::script::parser::parse;

fn texts(state: &DisplayState) -> Vec<&str> {
    state.lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn chars_per_frame_is_ceiling_with_floor_of_one() {
    assert_eq!(chars_per_frame(0, 40), 1);
    assert_eq!(chars_per_frame(40, 40), 1);
    assert_eq!(chars_per_frame(41, 40), 2);
    assert_eq!(chars_per_frame(400, 40), 10);
    assert_eq!(chars_per_frame(5, 0), 5);
}

#[test]
fn instant_hold_grows_then_saturates() {
    assert_eq!(instant_hold_ms(1), 200);
    assert_eq!(instant_hold_ms(2), 250);
    assert_eq!(instant_hold_ms(3), 300);
    assert_eq!(instant_hold_ms(4), 350);
    assert_eq!(instant_hold_ms(50), 350);
    assert!((0..200).all(|n| instant_hold_ms(n) <= 400));
}

#[test]
fn empty_script_yields_only_warmup() {
    let frames = generate(&[], &TimelineParams::default());
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].hold_ms, WARMUP_HOLD_MS);
    assert!(frames[0].state.lines.is_empty());
    assert!(!frames[0].state.is_complete);
}

#[test]
fn typed_lines_emit_one_frame_per_char_when_short() {
    let entries = parse(&["> ab", "c"]);
    let frames = generate(&entries, &TimelineParams::default());
    // warmup, "a", "ab", inter-line, "c", final
    assert_eq!(frames.len(), 6);
    assert_eq!(texts(&frames[1].state), vec!["a"]);
    assert!(!frames[1].state.lines[0].complete);
    assert_eq!(texts(&frames[2].state), vec!["ab"]);
    assert!(frames[2].state.lines[0].complete);
    assert_eq!(frames[3].state.current_line, 1);
    assert_eq!(frames[3].hold_ms, INTER_LINE_HOLD_MS);
    assert_eq!(texts(&frames[4].state), vec!["ab", "c"]);
    let last = frames.last().unwrap();
    assert_eq!(last.hold_ms, FINAL_HOLD_MS);
    assert_eq!(last.state.current_line, 2);
    assert!(last.state.is_complete);
}

#[test]
fn typed_hold_has_a_floor() {
    let entries = parse(&["> x"]);
    let params = TimelineParams {
        typing_speed_ms: 5,
        ..TimelineParams::default()
    };
    let frames = generate(&entries, &params);
    assert_eq!(frames[1].hold_ms, MIN_TYPED_HOLD_MS);
    let params = TimelineParams {
        typing_speed_ms: 80,
        ..TimelineParams::default()
    };
    assert_eq!(generate(&entries, &params)[1].hold_ms, 80);
}

#[test]
fn long_scripts_are_throttled() {
    let long = format!("> {}", "x".repeat(400));
    let entries = parse(&[long.as_str()]);
    let frames = generate(&entries, &TimelineParams::default());
    // warmup + 40 typing frames + final
    assert_eq!(frames.len(), 42);
    assert_eq!(frames[1].state.lines[0].char_len(), 10);
}

#[test]
fn line_end_always_emits_even_off_budget() {
    let entries = parse(&["> abc", "> de"]);
    let params = TimelineParams {
        target_frame_count: 2,
        ..TimelineParams::default()
    };
    // typed = 5 -> 3 chars per frame. Counter hits 3 on "abc" and line 2 ends at 5.
    let frames = generate(&entries, &params);
    let reveals: Vec<Vec<&str>> = frames.iter().map(|f| texts(&f.state)).collect();
    assert_eq!(
        reveals,
        vec![
            vec![],
            vec!["abc"],
            vec!["abc"],
            vec!["abc", "de"],
            vec!["abc", "de"],
        ]
    );
}

#[test]
fn instant_mode_reveals_output_at_once() {
    let entries = parse(&["> cat f", "l1", "l2", "l3"]);
    let params = TimelineParams {
        output_mode: OutputMode::Instant,
        ..TimelineParams::default()
    };
    let frames = generate(&entries, &params);
    let batch: Vec<_> = frames
        .iter()
        .filter(|f| f.hold_ms == instant_hold_ms(3))
        .collect();
    assert_eq!(batch.len(), 1);
    assert_eq!(texts(&batch[0].state), vec!["cat f", "l1", "l2", "l3"]);
    assert_eq!(batch[0].state.current_line, 3);
}

#[test]
fn blank_line_produces_no_reveal_frames() {
    let entries = parse(&["> a", "", "> b"]);
    let frames = generate(&entries, &TimelineParams::default());
    // warmup, "a", inter, inter (after blank), "b", final
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[2].state.current_line, 1);
    assert_eq!(frames[3].state.current_line, 2);
    assert_eq!(texts(&frames[3].state), vec!["a", ""]);
}

#[test]
fn generation_is_deterministic() {
    let entries = parse(&["> make", "!!", "cc a.c", "cc b.c", "!!", "ok"]);
    let p = TimelineParams::default();
    assert_eq!(generate(&entries, &p), generate(&entries, &p));
}

#[test]
fn total_duration_sums_holds() {
    let frames = generate(&parse(&["> a"]), &TimelineParams::default());
    assert_eq!(
        total_duration_ms(&frames),
        u64::from(WARMUP_HOLD_MS + 50 + FINAL_HOLD_MS)
    );
}

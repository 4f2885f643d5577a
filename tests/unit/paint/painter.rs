use super::*;
use crate::paint::geometry::measure_geometry;
use crate::script::parser::parse;
use crate::text::measure::MonospaceMeasurer;
use crate::timeline::state::DisplayLine;

fn setup(
    style: &StyleConfig,
    lines: &[&str],
) -> (Vec<crate::script::parser::ScriptEntry>, Geometry) {
    let entries = parse(lines);
    let mut m = MonospaceMeasurer::default();
    let g = measure_geometry(&entries, style, None, &mut m).unwrap();
    (entries, g)
}

fn cursor_rects(plan: &PaintPlan) -> Vec<Rect> {
    plan.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

fn typing_state(entries: &[crate::script::parser::ScriptEntry]) -> DisplayState {
    DisplayState {
        lines: vec![DisplayLine::partial(&entries[0], 2)],
        current_line: 0,
        is_complete: false,
    }
}

#[test]
fn blink_alternates_every_half_period() {
    assert!(cursor_blink_visible(0, true));
    assert!(cursor_blink_visible(529, true));
    assert!(!cursor_blink_visible(530, true));
    assert!(cursor_blink_visible(1060, true));
    assert!(cursor_blink_visible(530, false));
}

#[test]
fn typing_line_gets_prompt_text_and_cursor() {
    let style = StyleConfig::default();
    let (entries, g) = setup(&style, &["> whoami", "root"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();

    let plan = painter
        .paint(&typing_state(&entries), PaintOptions::animated(), &mut m)
        .unwrap();

    assert_eq!(plan.canvas, g.canvas);
    assert_eq!(plan.texts().collect::<Vec<_>>(), vec!["$ ", "wh"]);
    let cursors = cursor_rects(&plan);
    assert_eq!(cursors.len(), 1);
    // Cursor sits after prompt and the two revealed characters.
    let expected_x = f64::from(g.padding + 4.0 * 14.0 * 0.6);
    assert!((cursors[0].x0 - expected_x).abs() < 1e-3);
    assert!((cursors[0].width() - f64::from(g.cell_width)).abs() < 1e-3);
}

#[test]
fn cursor_hidden_when_not_animating_or_forced_complete_or_blinked_off() {
    let style = StyleConfig::default();
    let (entries, g) = setup(&style, &["> whoami"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let state = typing_state(&entries);

    for opts in [
        PaintOptions {
            animating: false,
            ..PaintOptions::animated()
        },
        PaintOptions {
            force_complete: true,
            ..PaintOptions::animated()
        },
        PaintOptions {
            cursor_visible: false,
            ..PaintOptions::animated()
        },
    ] {
        let plan = painter.paint(&state, opts, &mut m).unwrap();
        assert!(cursor_rects(&plan).is_empty(), "{opts:?}");
    }
}

#[test]
fn completed_line_has_no_cursor() {
    let style = StyleConfig::default();
    let (entries, g) = setup(&style, &["> ls", "out"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let state = DisplayState {
        lines: vec![DisplayLine::revealed(&entries[0])],
        current_line: 1,
        is_complete: false,
    };
    let plan = painter.paint(&state, PaintOptions::animated(), &mut m).unwrap();
    assert!(cursor_rects(&plan).is_empty());
}

#[test]
fn resting_line_draws_prompt_and_solid_cursor_in_still() {
    let style = StyleConfig::default();
    let (entries, g) = setup(&style, &["> ls", "a.txt"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let state = DisplayState::finished(&entries);

    let plan = painter.paint(&state, PaintOptions::still(), &mut m).unwrap();
    assert_eq!(
        plan.texts().collect::<Vec<_>>(),
        vec!["$ ", "ls", "a.txt", "$ "]
    );
    let cursors = cursor_rects(&plan);
    assert_eq!(cursors.len(), 1);
    assert!((cursors[0].y0 - f64::from(g.row_top(2))).abs() < f64::from(g.line_px));
}

#[test]
fn multi_segment_prompt_occupies_extra_rows() {
    let style = StyleConfig {
        prompt: "user@host ~\n$ ".to_owned(),
        ..StyleConfig::default()
    };
    let (entries, g) = setup(&style, &["> ls", "a"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let plan = painter
        .paint(&DisplayState::finished(&entries), PaintOptions::still(), &mut m)
        .unwrap();

    let rows: Vec<(String, f64)> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, origin, .. } => Some((text.clone(), origin.y)),
            _ => None,
        })
        .collect();
    assert_eq!(rows[0].0, "user@host ~");
    assert_eq!(rows[1].0, "$ ");
    assert_eq!(rows[2].0, "ls");
    assert!(rows[1].1 > rows[0].1);
    assert_eq!(rows[1].1, rows[2].1);
    // Output "a" lands on the third row.
    assert_eq!(rows[3].0, "a");
    assert_eq!(rows[3].1, f64::from(g.row_top(2)));
}

#[test]
fn cursor_styles_differ_in_shape() {
    let mut widths = Vec::new();
    let mut heights = Vec::new();
    for cursor_style in [CursorStyle::Block, CursorStyle::Underline, CursorStyle::Bar] {
        let style = StyleConfig {
            cursor_style,
            ..StyleConfig::default()
        };
        let (entries, g) = setup(&style, &["> whoami"]);
        let painter = Painter::new(&style, g).unwrap();
        let mut m = MonospaceMeasurer::default();
        let plan = painter
            .paint(&typing_state(&entries), PaintOptions::animated(), &mut m)
            .unwrap();
        let rect = cursor_rects(&plan)[0];
        widths.push(rect.width());
        heights.push(rect.height());
    }
    assert_eq!(widths[0], widths[1]);
    assert!(widths[2] < widths[0]);
    assert!(heights[1] < heights[0]);
    assert_eq!(heights[0], heights[2]);
}

#[test]
fn glow_draws_each_text_twice_underneath() {
    let mut style = StyleConfig::default();
    style.effects.glow = true;
    let (entries, g) = setup(&style, &["> ls"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let plan = painter
        .paint(&DisplayState::finished(&entries), PaintOptions::still(), &mut m)
        .unwrap();

    let texts: Vec<(&str, f32)> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, opacity, .. } => Some((text.as_str(), *opacity)),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 6);
    assert_eq!(texts[0], ("$ ", GLOW_OPACITY));
    assert_eq!(texts[1], ("$ ", 1.0));
}

#[test]
fn scanlines_and_crt_overlay_after_content() {
    let mut style = StyleConfig::default();
    style.effects.scanlines = true;
    style.effects.crt = true;
    let (entries, g) = setup(&style, &["> ls"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let plan = painter
        .paint(&DisplayState::finished(&entries), PaintOptions::still(), &mut m)
        .unwrap();

    let scanlines = plan
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillRect { opacity, .. } if *opacity == SCANLINE_OPACITY))
        .count();
    assert_eq!(scanlines, g.canvas.height.div_ceil(SCANLINE_PITCH) as usize);
    let bands = plan
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillRect { opacity, .. } if *opacity == CRT_OPACITY))
        .count();
    assert_eq!(bands, 4);
    assert!(matches!(plan.ops.last(), Some(DrawOp::FillRect { .. })));
}

#[test]
fn background_image_follows_window_fill() {
    let style = StyleConfig {
        background_image: Some(crate::style::config::BackgroundImageSpec {
            path: "bg.png".into(),
            opacity: 0.3,
        }),
        ..StyleConfig::default()
    };
    let (_, g) = setup(&style, &["> ls"]);
    let image = Arc::new(PreparedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![255, 0, 0, 255]),
    });
    let painter = Painter::new(&style, g).unwrap().with_background(image);
    let mut m = MonospaceMeasurer::default();
    let plan = painter
        .paint(&DisplayState::empty(), PaintOptions::animated(), &mut m)
        .unwrap();

    assert!(matches!(plan.ops[0], DrawOp::FillPath { .. }));
    assert!(matches!(plan.ops[1], DrawOp::FillPath { .. }));
    assert!(matches!(plan.ops[2], DrawOp::Image { opacity, .. } if opacity == 0.3));
}

#[test]
fn title_is_centered_and_chrome_optional() {
    let style = StyleConfig {
        title: "demo".to_owned(),
        ..StyleConfig::default()
    };
    let (_, g) = setup(&style, &["> a-rather-long-command-line"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let plan = painter
        .paint(&DisplayState::empty(), PaintOptions::animated(), &mut m)
        .unwrap();
    let title_x = plan
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { text, origin, .. } if text == "demo" => Some(origin.x),
            _ => None,
        })
        .unwrap();
    let title_w = 4.0 * 14.0 * 0.6;
    let centered = (f64::from(g.canvas.width) - title_w) / 2.0;
    assert!((title_x - centered).abs() < 1e-3);

    let bare = StyleConfig {
        window_chrome: false,
        ..style.clone()
    };
    let (_, g) = setup(&bare, &["> ls"]);
    let plan = Painter::new(&bare, g)
        .unwrap()
        .paint(&DisplayState::empty(), PaintOptions::animated(), &mut m)
        .unwrap();
    assert_eq!(plan.texts().count(), 0);
    assert_eq!(plan.ops.len(), 2);
}

#[test]
fn painting_is_pure() {
    let style = StyleConfig::default();
    let (entries, g) = setup(&style, &["> whoami", "root"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();
    let state = typing_state(&entries);
    let a = painter.paint(&state, PaintOptions::animated(), &mut m).unwrap();
    let b = painter.paint(&state, PaintOptions::animated(), &mut m).unwrap();
    assert_eq!(a, b);
}

#[test]
fn window_dots_fit_a_narrow_untitled_canvas() {
    let style = StyleConfig::default();
    let (entries, g) = setup(&style, &[">"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();

    let plan = painter
        .paint(&DisplayState::finished(&entries), PaintOptions::still(), &mut m)
        .unwrap();

    let width = f64::from(g.canvas.width);
    for op in &plan.ops {
        if let DrawOp::FillPath { path, .. } = op {
            let bounds = kurbo::Shape::bounding_box(path);
            assert!(bounds.x1 <= width + 1e-6, "{bounds:?} exceeds {width}");
        }
    }
}

#[test]
fn force_complete_hides_the_typing_cursor_but_keeps_partial_text() {
    let style = StyleConfig::default();
    let (entries, g) = setup(&style, &["> whoami"]);
    let painter = Painter::new(&style, g).unwrap();
    let mut m = MonospaceMeasurer::default();

    let plan = painter
        .paint(&typing_state(&entries), PaintOptions::still(), &mut m)
        .unwrap();

    assert_eq!(plan.texts().collect::<Vec<_>>(), vec!["$ ", "wh"]);
    assert!(cursor_rects(&plan).is_empty());
}

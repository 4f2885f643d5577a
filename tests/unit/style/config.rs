use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn empty_object_yields_defaults() {
    let cfg = StyleConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, StyleConfig::default());
    assert_eq!(cfg.resolved_theme().unwrap().name, "classic");
}

#[test]
fn parses_named_theme_and_enums() {
    let cfg = StyleConfig::from_json_str(
        r#"{
            "theme": "Dracula",
            "cursor_style": "underline",
            "output_mode": "instant",
            "effects": { "scanlines": true },
            "prompt": "user@host\n$ "
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.resolved_theme().unwrap().name, "dracula");
    assert_eq!(cfg.cursor_style, CursorStyle::Underline);
    assert_eq!(cfg.output_mode, OutputMode::Instant);
    assert!(cfg.effects.scanlines && !cfg.effects.glow);
    assert_eq!(cfg.prompt_segments(), vec!["user@host", "$ "]);
}

#[test]
fn parses_inline_theme() {
    let cfg = StyleConfig::from_json_str(
        r##"{
            "theme": {
                "background": "#000000",
                "foreground": [255, 255, 255],
                "prompt": "#00ff00",
                "cursor": "#ffffffcc",
                "title_bar": "#111111",
                "title_text": "#999999",
                "border": "#333333",
                "dots": ["#ff0000", "#ffff00", "#00ff00"]
            }
        }"##,
    )
    .unwrap();
    let theme = cfg.resolved_theme().unwrap();
    assert_eq!(theme.foreground, Rgba8::rgb(255, 255, 255));
    assert_eq!(theme.cursor.a, 0xcc);
    assert_eq!(theme.dots[1], Rgba8::rgb(255, 255, 0));
}

#[test]
fn unknown_theme_is_rejected() {
    let err = StyleConfig::from_json_str(r#"{"theme":"neon"}"#).unwrap_err();
    assert!(matches!(err, TermreelError::Validation(_)));
    assert!(err.to_string().contains("neon"));
}

#[test]
fn every_builtin_theme_resolves() {
    for name in crate::style::theme::BUILTIN_THEMES {
        assert_eq!(Theme::by_name(name).unwrap().name, *name);
    }
}

#[test]
fn validation_rejects_bad_numbers() {
    for json in [
        r#"{"font_size": 0}"#,
        r#"{"line_height": -1}"#,
        r#"{"padding": -4}"#,
        r#"{"target_frame_count": 0}"#,
    ] {
        assert!(
            matches!(
                StyleConfig::from_json_str(json),
                Err(TermreelError::Validation(_))
            ),
            "{json}"
        );
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = StyleConfig::from_json_str("{ font_size: ").unwrap_err();
    assert!(matches!(err, TermreelError::Serde(_)));
}

#[test]
fn params_mirror_config() {
    let cfg = StyleConfig {
        typing_speed_ms: 70,
        line_delay_ms: 120,
        target_frame_count: 12,
        output_mode: OutputMode::Instant,
        ..StyleConfig::default()
    };
    let t = cfg.timeline_params();
    let d = cfg.driver_params();
    assert_eq!(t.typing_speed_ms, 70);
    assert_eq!(t.target_frame_count, 12);
    assert_eq!(d.line_delay_ms, 120);
    assert_eq!(t.output_mode, d.output_mode);
}

#[test]
fn style_round_trips_through_json() {
    let cfg = StyleConfig {
        theme: ThemeRef::Inline(Box::new(Theme::by_name("nord").unwrap())),
        title: "demo".to_owned(),
        ..StyleConfig::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(StyleConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn relative_paths_are_rebased() {
    let mut cfg = StyleConfig {
        font: FontSpec {
            family: "Mono".to_owned(),
            path: Some(PathBuf::from("fonts/mono.ttf")),
        },
        ..StyleConfig::default()
    };
    cfg.rebase_paths(Path::new("/etc/termreel"));
    assert_eq!(
        cfg.font.path.as_deref(),
        Some(Path::new("/etc/termreel/fonts/mono.ttf"))
    );
}

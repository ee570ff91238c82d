use cube_tower::core::config::{DropRuleKind, GameConfig};

#[test]
fn defaults_are_sane_and_warning_free() {
    let cfg = GameConfig::default();
    assert!(!cfg.element_types.is_empty());
    assert!(cfg.bottom_cube_count > 0);
    assert_eq!(cfg.drop_rule, DropRuleKind::NonRestriction);
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn partial_ron_falls_back_to_defaults_per_field() {
    let cfg: GameConfig = ron::from_str(
        r#"(
            bottom_cube_count: 8,
            drop_rule: OnlyOneColor,
        )"#,
    )
    .unwrap();
    assert_eq!(cfg.bottom_cube_count, 8);
    assert_eq!(cfg.drop_rule, DropRuleKind::OnlyOneColor);
    // Untouched sections keep their defaults.
    assert_eq!(cfg.drag, GameConfig::default().drag);
    assert_eq!(cfg.element_types, GameConfig::default().element_types);
}

#[test]
fn element_types_parse_from_ron() {
    let cfg: GameConfig = ron::from_str(
        r#"(
            element_types: [
                (id: "Red", sprite: "sprites/cube_red.png"),
                (id: "Blue", sprite: "sprites/cube_blue.png"),
            ],
        )"#,
    )
    .unwrap();
    assert_eq!(cfg.element_types.len(), 2);
    assert_eq!(cfg.element_types[1].id, "Blue");
}

#[test]
fn missing_file_loads_defaults_with_a_reported_error() {
    let (cfg, err) = GameConfig::load_or_default("no/such/config.ron");
    assert_eq!(cfg, GameConfig::default());
    assert!(err.is_some());
}

#[test]
fn validate_flags_suspicious_configs() {
    let mut cfg = GameConfig::default();
    cfg.element_types.clear();
    cfg.bottom_cube_count = 0;
    cfg.tower.max_y = cfg.tower.min_y;
    cfg.hole.width = 0.0;
    let warnings = cfg.validate();
    assert!(warnings.iter().any(|w| w.contains("element_types")));
    assert!(warnings.iter().any(|w| w.contains("bottom_cube_count")));
    assert!(warnings.iter().any(|w| w.contains("tower zone rect")));
    assert!(warnings.iter().any(|w| w.contains("hole ellipse")));
}

#[test]
fn duplicate_type_ids_are_flagged() {
    let mut cfg = GameConfig::default();
    let dup = cfg.element_types[0].clone();
    cfg.element_types.push(dup);
    assert!(cfg.validate().iter().any(|w| w.contains("duplicate")));
}

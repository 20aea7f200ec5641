use std::collections::BTreeMap;

use bolt_highlight::scope::{matches, specificity};
use bolt_highlight::{
    BaseTheme, Color, FontStyle, Registry, Scope, StyleModifier, StyleRule, Theme,
};

const SCOPES: [&str; 8] = [
    "",
    "keyword",
    "keyword.control",
    "invalid.illegal",
    "string.comment",
    "a.b.c.d",
    "a..b",
    "variable.other.readwrite",
];

fn color(hex: &str) -> Color {
    Color::from_hex(hex).unwrap()
}

fn registry_with(name: &str, rules: &str) -> Registry {
    let registry = Registry::default();
    registry
        .add_theme_from_str(
            name,
            &format!(r#"{{ "base": "vs", "inherit": false, "rules": {rules} }}"#),
        )
        .unwrap();
    registry
}

#[test]
fn single_rule_exact_scope() {
    let registry = registry_with("t", r#"[{ "token": "keyword", "foreground": "0000ff" }]"#);
    let style = registry.resolve(&Scope::new("keyword"), "t").unwrap();
    assert_eq!(style.foreground, color("0000ff"));
}

#[test]
fn single_rule_prefix_match() {
    let registry = registry_with("t", r#"[{ "token": "keyword", "foreground": "0000ff" }]"#);
    let style = registry.resolve(&Scope::new("keyword.control"), "t").unwrap();
    assert_eq!(style.foreground, color("0000ff"));

    // Prefixes are whole segments
    let style = registry.resolve(&Scope::new("keywords"), "t").unwrap();
    assert_eq!(style.foreground, BaseTheme::Light.fallback_foreground());
}

const INVALID_RULES: &str = r#"[
    { "token": "invalid", "foreground": "ff0000" },
    { "token": "invalid.illegal", "foreground": "00ff00", "background": "ff00ff" }
]"#;

#[test]
fn more_specific_rule_wins_on_its_fields() {
    let registry = registry_with("t", INVALID_RULES);
    let style = registry.resolve(&Scope::new("invalid.illegal"), "t").unwrap();
    assert_eq!(style.foreground, color("00ff00"));
    assert_eq!(style.background, color("ff00ff"));
}

#[test]
fn only_less_specific_rule_matches() {
    let registry = registry_with("t", INVALID_RULES);
    let style = registry.resolve(&Scope::new("invalid.deprecated"), "t").unwrap();
    assert_eq!(style.foreground, color("ff0000"));
    assert_eq!(style.background, Color::TRANSPARENT);
}

#[test]
fn registering_same_name_replaces() {
    let registry = registry_with("A", r#"[{ "token": "keyword", "foreground": "111111" }]"#);
    assert_eq!(
        registry.resolve(&Scope::new("keyword"), "A").unwrap().foreground,
        color("111111")
    );

    registry
        .add_theme_from_str(
            "A",
            r#"{ "base": "vs", "inherit": false, "rules": [{ "token": "keyword", "foreground": "222222" }] }"#,
        )
        .unwrap();
    assert_eq!(
        registry.resolve(&Scope::new("keyword"), "A").unwrap().foreground,
        color("222222")
    );
}

#[test]
fn empty_rule_table_resolves_to_hard_defaults() {
    for base in BaseTheme::ALL {
        for inherit in [true, false] {
            let theme = Theme::new(base, inherit, Vec::new(), BTreeMap::new());
            for scope in SCOPES {
                assert_eq!(
                    theme.resolve(&Scope::new(scope), None),
                    theme.hard_defaults(),
                    "{base} {scope:?}"
                );
            }
        }
    }
}

#[test]
fn specificity_wins_regardless_of_order() {
    let modifier = |hex: &str| StyleModifier {
        foreground: Some(color(hex)),
        ..Default::default()
    };
    let specific_first = Theme::new(
        BaseTheme::Light,
        false,
        vec![
            StyleRule::new("a.b.c", modifier("333333")),
            StyleRule::new("a.b", modifier("222222")),
            StyleRule::new("a", modifier("111111")),
        ],
        BTreeMap::new(),
    );
    let specific_last = Theme::new(
        BaseTheme::Light,
        false,
        specific_first.rules().iter().rev().cloned().collect(),
        BTreeMap::new(),
    );

    for theme in [&specific_first, &specific_last] {
        assert_eq!(theme.resolve(&Scope::new("a.b.c.d"), None).foreground, color("333333"));
        assert_eq!(theme.resolve(&Scope::new("a.b.x"), None).foreground, color("222222"));
        assert_eq!(theme.resolve(&Scope::new("a.x"), None).foreground, color("111111"));
    }
}

#[test]
fn equal_specificity_later_rule_wins() {
    let registry = registry_with(
        "t",
        r#"[
            { "token": "string", "foreground": "111111", "fontStyle": "bold" },
            { "token": "string", "foreground": "222222" }
        ]"#,
    );
    let style = registry.resolve(&Scope::new("string.quoted"), "t").unwrap();
    assert_eq!(style.foreground, color("222222"));
    // The losing rule contributes nothing
    assert_eq!(style.font_style, FontStyle::empty());
}

#[test]
fn empty_selector_matches_every_scope() {
    let empty = Scope::new("");
    assert_eq!(specificity(&empty), 0);
    for scope in SCOPES {
        assert!(matches(&Scope::new(scope), &empty), "{scope:?}");
    }
}

#[test]
fn resolution_is_idempotent() {
    let registry = Registry::builtin().unwrap();
    for name in registry.theme_names() {
        for scope in SCOPES {
            let scope = Scope::new(scope);
            let first = registry.resolve(&scope, &name).unwrap();
            let second = registry.resolve(&scope, &name).unwrap();
            assert_eq!(first, second, "{name} {scope}");
        }
    }
}

#[test]
fn highlighting_covers_the_whole_source() {
    let registry = Registry::builtin().unwrap();
    let source = include_str!("../samples/fibonacci.bolt");
    let highlighted = registry.highlight(source, "bolt").unwrap();

    let mut end = 0;
    for token in &highlighted.tokens {
        assert_eq!(token.span.start, end);
        assert_eq!(token.text, &source[token.span.clone()]);
        end = token.span.end;
    }
    assert_eq!(end, source.len());
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::*;

    #[test]
    fn radio_question_end_to_end() {
        let src = r#"
# comment
RADIO_QUESTION: "Pick one"
OPTION_NAME: "Foo"
OPTION_TAG: "foo_tag"
OPTION_NAME: "Bar"
OPTION_TAG: "bar_tag"
DEFAULT_SAFETY: "q"
"#;
        let cfg = compile(src).unwrap();
        assert_eq!(cfg.questions, vec![Question::Options {
            kind: OptionKind::Radio,
            text: "Pick one".into(),
            options: vec![
                QuestionOption::new("Foo", "foo_tag"),
                QuestionOption::new("Bar", "bar_tag"),
            ],
        }]);
        assert_eq!(cfg.default_safety, Safety::Questionable);
    }

    #[test]
    fn alias_rule_applies_to_every_trigger() {
        let src = r#"
ALIAS_TAG_FROM: "a b"
KEYBIND: "unrelated"
ALIAS_TAG_TO: "x y"
"#;
        let cfg = compile(src).unwrap();
        for trigger in ["a", "b"] {
            let mut target = TagsContainer::new();
            cfg.conditional_tags.apply_rule(trigger, &mut target);
            assert_eq!(target.names(), vec!["x", "y"]);
            assert_eq!(target.strength_of("x"), 1);
            assert_eq!(target.strength_of("y"), 1);
        }
        assert!(cfg.conditional_tags.shares_rule("a", "b"));
    }

    #[test]
    fn full_template() {
        let src = r##"
NAME_QUESTION: "Name?"
SOURCE_QUESTION: "Source?"
SAFETY_QUESTION: "Rating?"
SESSION_TAGS: "Session tags"
CHECK_QUESTION: "Colors"
OPTION_NAME: "Red"
OPTION_TAG: "red"
OPTION_NAME: "Blue"
OPTION_TAG: "blue"
ENTRY_QUESTION: "Other tags"
IMAGE_TAGS_ENTRY: "All tags"

DEFAULT_SOURCE: "scanner \"B\""
NAMELESS_TAG: "needs_name"
SOURCELESS_TAG: "needs_source Source_Unknown"
TAGLESS_TAG: "tagme"
TAGLESS_TAG: "untagged"
DEFAULT_SAFETY: "Explicit"
MAX_OPEN_FILES: " 12 "
UPDATE_INTERVAL: "0.25"
MAX_IMAGE_BUFSIZE: "1.5 MiB"
IMAGE_BACKGROUND_COLOR_ONE: "#FF8000"
IMAGE_BACKGROUND_COLOR_TWO: "hsv 0 0 50"
IMAGE_BACKGROUND_SQUARE_WIDTH: "8"
KEYBIND: "ctrl+n next"
KEYBIND: "ctrl+p prev"
DEFAULT_IMAGE_QUALITY: "fast"
"##;
        let cfg = compile(src).unwrap();

        let kinds: Vec<_> = cfg.questions.iter().map(Question::kind_name).collect();
        assert_eq!(kinds, vec![
            "name",
            "source",
            "safety",
            "session_tags",
            "check",
            "entry",
            "image_tags_entry",
        ]);
        assert_eq!(cfg.questions[4].options().len(), 2);

        assert_eq!(cfg.default_source, "scanner \"B\"");
        assert_eq!(cfg.nameless_tags.names(), vec!["needs_name"]);
        assert_eq!(cfg.sourceless_tags.names(), vec![
            "needs_source",
            "source_unknown"
        ]);
        assert_eq!(cfg.tagless_tags.names(), vec!["tagme", "untagged"]);
        assert_eq!(cfg.default_safety, Safety::Explicit);
        assert_eq!(cfg.max_open_files, 12);
        assert_eq!(cfg.update_interval, Duration::from_millis(250));
        assert_eq!(cfg.max_image_buffer_size, 1_572_864);
        assert_eq!(cfg.background_color_one.to_hex(), "#ff8000");
        assert_eq!(cfg.background_color_two.to_rgb8(), (128, 128, 128));
        assert_eq!(cfg.background_square_width, 8);
        assert_eq!(cfg.keybinds, vec!["ctrl+n next", "ctrl+p prev"]);
        assert_eq!(cfg.default_image_quality, ImageQuality::Fast);
    }

    #[test]
    fn later_settings_override_earlier_ones() {
        let cfg = compile(
            r#"DEFAULT_SAFETY: "e"
            MAX_OPEN_FILES: "1"
            DEFAULT_SAFETY: "s"
            MAX_OPEN_FILES: "2""#,
        )
        .unwrap();
        assert_eq!(cfg.default_safety, Safety::Safe);
        assert_eq!(cfg.max_open_files, 2);
    }

    #[test]
    fn compile_with_custom_defaults() {
        let defaults = Defaults {
            max_open_files: 7,
            keybinds: vec!["builtin".into()],
            ..Defaults::default()
        };
        let cfg = compile_with(r#"KEYBIND: "user""#, defaults).unwrap();
        assert_eq!(cfg.max_open_files, 7);
        assert_eq!(cfg.keybinds, vec!["builtin", "user"]);
    }

    #[test]
    fn lexer_errors_abort_compile() {
        let err = compile("ENTRY_QUESTION: \"ok\"\nBOGUS: \"x\"").unwrap_err();
        assert!(matches!(err, Error::Lexer { line: 2, col: 1, .. }));
        let pretty = err.pretty("ENTRY_QUESTION: \"ok\"\nBOGUS: \"x\"");
        assert!(pretty.contains("line 2, column 1"));
        assert!(pretty.contains("BOGUS"));
    }

    #[test]
    fn trailing_empty_option_question_is_accepted() {
        let cfg = compile(r#"ENTRY_QUESTION: "e" RADIO_QUESTION: "never finished""#).unwrap();
        assert_eq!(cfg.questions.len(), 2);
        assert!(cfg.questions[1].options().is_empty());
    }

    #[test]
    fn compiled_registries_stay_mutable() {
        let mut cfg = compile(
            r#"TAGLESS_TAG: "tagme"
            ALIAS_TAG_FROM: "cat" ALIAS_TAG_TO: "animal""#,
        )
        .unwrap();
        cfg.tagless_tags.add("tagme", 1);
        assert_eq!(cfg.tagless_tags.strength_of("tagme"), 2);

        let mut image = TagsContainer::from_map([("cat", 2), ("dog", 1)]);
        let mut seeded = TagsContainer::new();
        cfg.conditional_tags
            .apply_from_initial_set(image.iter().map(|t| (t.name(), t.strength())), &mut seeded);
        assert!(seeded.is_empty());

        cfg.conditional_tags
            .dependents_mut("cat")
            .unwrap()
            .set("mammal", 1);
        cfg.conditional_tags.apply_rule("cat", &mut image);
        assert_eq!(image.names(), vec!["animal", "cat", "dog", "mammal"]);
    }

    #[test]
    fn config_serializes_to_json() {
        let cfg = compile(
            r#"RADIO_QUESTION: "q" OPTION_NAME: "a" OPTION_TAG: "t"
            NAMELESS_TAG: "n"
            ALIAS_TAG_FROM: "a" ALIAS_TAG_TO: "b""#,
        )
        .unwrap();
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["questions"][0]["kind"], "radio");
        assert_eq!(json["nameless_tags"]["n"], 1);
        assert_eq!(json["conditional_tags"]["a"][0], "b");
        assert_eq!(json["default_safety"], "safe");
    }
}

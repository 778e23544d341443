#[cfg(test)]
mod formatting_tests {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::mpsc;

    use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
    use serde_json::json;

    use crate::{grok_record, Describe, Grok, Options, WellKnown};

    struct Person {
        name: String,
        age: u32,
    }

    grok_record!(Person { name, age });

    struct Empty {}

    grok_record!(Empty {});

    struct Token {
        id: u64,
    }

    impl Describe for Token {
        fn describe(&self) -> String {
            format!("token #{}", self.id)
        }
    }

    grok_record!(Token { id } describe);

    #[allow(dead_code)]
    struct Session {
        user: String,
        secret: String,
        host: String,
    }

    grok_record!(Session { user, secret: hidden, host });

    struct Event {
        name: String,
        at: DateTime<Utc>,
    }

    grok_record!(Event { name, at });

    struct Team {
        lead: Person,
    }

    grok_record!(Team { lead });

    struct Zoned {
        utc: Utc,
        local: Local,
        fixed: FixedOffset,
    }

    grok_record!(Zoned { utc, local, fixed });

    struct Holder {
        slot: (),
    }

    grok_record!(Holder { slot });

    fn ann() -> Person {
        Person {
            name: "Ann".to_string(),
            age: 7,
        }
    }

    fn launch_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn plain() -> Options {
        Options::new().colour(false)
    }

    fn render<T: Grok>(value: &T) -> String {
        crate::to_string(value, &plain())
    }

    fn assert_rendered(actual: &str, expected: &str) {
        if actual != expected {
            let diff = similar::TextDiff::from_lines(expected, actual);
            panic!(
                "rendered output mismatch:\n{}",
                diff.unified_diff().header("expected", "actual")
            );
        }
    }

    #[test]
    fn test_record_fields_in_declaration_order() {
        assert_rendered(
            &render(&ann()),
            "value Person = {\n  name String = \"Ann\" 3\n  age u32 = 7\n}\n",
        );
    }

    #[test]
    fn test_scalars() {
        assert_rendered(&render(&true), "value bool = true\n");
        assert_rendered(&render(&-12i64), "value i64 = -12\n");
        assert_rendered(&render(&1.5f64), "value f64 = 1.5\n");
        assert_rendered(&render(&'x'), "value char = x\n");
    }

    #[test]
    fn test_empty_collections_render_inline() {
        assert_rendered(&render(&Vec::<i32>::new()), "value []i32 = []\n");
        assert_rendered(
            &render(&HashMap::<String, i32>::new()),
            "value map[String]i32 = []\n",
        );
        assert_rendered(&render(&Empty {}), "value Empty = {}\n");
    }

    #[test]
    fn test_empty_collections_ignore_max_depth() {
        let options = plain().max_depth(1);
        assert_rendered(
            &crate::to_string(&Vec::<i32>::new(), &options),
            "value []i32 = []\n",
        );
    }

    #[test]
    fn test_sequence_uses_indices_as_names() {
        assert_rendered(
            &render(&vec!["a".to_string(), "bc".to_string()]),
            "value []String = [\n  0 String = \"a\" 1\n  1 String = \"bc\" 2\n]\n",
        );
    }

    #[test]
    fn test_fixed_size_array_label() {
        assert_rendered(
            &render(&[1, 2, 3]),
            "value [3]i32 = [\n  0 i32 = 1\n  1 i32 = 2\n  2 i32 = 3\n]\n",
        );
    }

    #[test]
    fn test_map_keys_sorted_by_text() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), 1);
        map.insert("a".to_string(), 2);

        assert_rendered(
            &render(&map),
            "value map[String]i32 = [\n  a i32 = 2\n  b i32 = 1\n]\n",
        );
    }

    #[test]
    fn test_map_keys_compare_as_text_not_numbers() {
        let mut map = BTreeMap::new();
        map.insert(9, "nine");
        map.insert(10, "ten");

        assert_rendered(
            &render(&map),
            "value map[i32]str = [\n  10 str = \"ten\" 3\n  9 str = \"nine\" 4\n]\n",
        );
    }

    #[test]
    fn test_map_order_is_stable_across_instances() {
        let build = || {
            (0..50)
                .map(|i| (format!("key-{}", i), i))
                .collect::<HashMap<String, i32>>()
        };

        assert_eq!(render(&build()), render(&build()));
    }

    #[test]
    fn test_null_indirection_keeps_pointee_type() {
        let missing: Option<Box<Person>> = None;
        assert_rendered(&render(&missing), "value *Person = <nil>\n");
    }

    #[test]
    fn test_indirection_is_dereferenced() {
        assert_rendered(
            &render(&Box::new(ann())),
            "value *Person = {\n  name String = \"Ann\" 3\n  age u32 = 7\n}\n",
        );
        assert_rendered(&render(&Some(5u32)), "value *u32 = 5\n");
    }

    #[test]
    fn test_double_indirection_falls_back_to_kind_name() {
        assert_rendered(&render(&Box::new(Box::new(1))), "value **i32 = ??? indirection\n");
    }

    #[test]
    fn test_polymorphic_shows_concrete_type() {
        let boxed: Box<dyn Grok> = Box::new(42i32);
        assert_rendered(&render(&boxed), "value i32 as any = 42\n");
    }

    #[test]
    fn test_polymorphic_unwraps_one_indirection() {
        let boxed: Box<dyn Grok> = Box::new(Box::new(ann()));
        assert_rendered(
            &render(&boxed),
            "value Person as any = {\n  name String = \"Ann\" 3\n  age u32 = 7\n}\n",
        );
    }

    #[test]
    fn test_empty_polymorphic_slot() {
        let slot: Option<Box<dyn Grok>> = None;
        assert_rendered(&render(&slot), "value any = <nil>\n");
    }

    #[test]
    fn test_sequence_of_polymorphic_values() {
        let items: Vec<Box<dyn Grok>> = vec![Box::new(1), Box::new("x".to_string())];
        assert_rendered(
            &render(&items),
            "value []any = [\n  0 i32 as any = 1\n  1 String as any = \"x\" 1\n]\n",
        );
    }

    #[test]
    fn test_pointer_to_polymorphic_prints_default_text() {
        let inner: Box<dyn Grok> = Box::new(5);
        assert_rendered(&render(&Box::new(inner)), "value *any = 5\n");
    }

    #[test]
    fn test_string_truncation_reports_original_length() {
        let options = plain().max_length(5);
        assert_rendered(
            &crate::to_string(&"hello world".to_string(), &options),
            "value String = \"hello...\" 11\n",
        );
        assert_rendered(
            &crate::to_string(&"short".to_string(), &options),
            "value String = \"short\" 5\n",
        );
    }

    #[test]
    fn test_string_truncation_respects_char_boundaries() {
        let options = plain().max_length(2);
        assert_rendered(
            &crate::to_string(&"héllo", &options),
            "value str = \"h...\" 6\n",
        );
    }

    #[test]
    fn test_max_depth_truncates_before_children() {
        let nested = vec![vec![1, 2], vec![3]];

        assert_rendered(
            &crate::to_string(&nested, &plain().max_depth(1)),
            "value [][]i32 = [\n  ... max depth reached\n]\n",
        );
        assert_rendered(
            &crate::to_string(&nested, &plain().max_depth(2)),
            "value [][]i32 = [\n  0 []i32 = [\n    ... max depth reached\n  ]\n  1 []i32 = [\n    ... max depth reached\n  ]\n]\n",
        );
    }

    #[test]
    fn test_max_depth_applies_before_describe() {
        assert_rendered(
            &crate::to_string(&Token { id: 1 }, &plain().max_depth(1)),
            "value Token = {\n  ... max depth reached\n}\n",
        );
    }

    #[test]
    fn test_unlimited_depth_renders_every_leaf() {
        let nested = vec![vec![vec![1, 2], vec![3]], vec![vec![4]]];
        let output = render(&nested);
        let leaves = output.lines().filter(|line| line.contains(" i32 = ")).count();
        assert_eq!(leaves, 4);
    }

    #[test]
    fn test_brackets_balance_at_every_depth_limit() {
        let nested = vec![vec![vec![1, 2], vec![]], vec![vec![4]]];
        for max_depth in 0..6 {
            let output = crate::to_string(&nested, &plain().max_depth(max_depth));
            let opened = output.lines().filter(|line| line.ends_with('[')).count();
            let closed = output.lines().filter(|line| line.trim() == "]").count();
            assert_eq!(opened, closed, "unbalanced at max_depth {}:\n{}", max_depth, output);
        }
    }

    #[test]
    fn test_describe_replaces_fields() {
        assert_rendered(
            &render(&Token { id: 9 }),
            "value Token = {\n  ... token #9\n}\n",
        );
    }

    #[test]
    fn test_hidden_fields_render_placeholder() {
        let session = Session {
            user: "ann".to_string(),
            secret: "hunter2".to_string(),
            host: "db".to_string(),
        };
        assert_rendered(
            &render(&session),
            "value Session = {\n  user String = \"ann\" 3\n  ... ???\n  host String = \"db\" 2\n}\n",
        );
    }

    #[test]
    fn test_well_known_type_summarised_when_nested() {
        let event = Event {
            name: "launch".to_string(),
            at: launch_time(),
        };
        assert_rendered(
            &render(&event),
            "value Event = {\n  name String = \"launch\" 6\n  at DateTime<Utc> = {\n    ... 2024-01-02 03:04:05 UTC\n  }\n}\n",
        );
    }

    #[test]
    fn test_well_known_type_enumerated_at_top_level() {
        assert_rendered(
            &render(&launch_time()),
            "value DateTime<Utc> = {\n  timestamp i64 = 1704164645\n  nanos u32 = 0\n  offset String = \"UTC\" 3\n}\n",
        );
    }

    #[test]
    fn test_depth_offset_enables_summary_at_top_level() {
        assert_rendered(
            &crate::to_string(&launch_time(), &plain().depth(1)),
            "  value DateTime<Utc> = {\n    ... 2024-01-02 03:04:05 UTC\n  }\n",
        );
    }

    #[test]
    fn test_custom_well_known_registry() {
        let mut registry = WellKnown::empty();
        registry.register(|person: &Person| format!("person {}", person.name));

        let team = Team { lead: ann() };
        assert_rendered(
            &crate::to_string(&team, &plain().well_known(registry)),
            "value Team = {\n  lead Person = {\n    ... person Ann\n  }\n}\n",
        );
    }

    #[test]
    fn test_nested_time_zones_show_their_names() {
        let zoned = Zoned {
            utc: Utc,
            local: Local,
            fixed: FixedOffset::east_opt(3600).unwrap(),
        };
        assert_rendered(
            &render(&zoned),
            "value Zoned = {\n  utc Utc = {\n    ... UTC\n  }\n  local Local = {\n    ... Local\n  }\n  fixed FixedOffset = {\n    ... +01:00\n  }\n}\n",
        );
    }

    #[test]
    fn test_time_zone_enumerated_at_top_level() {
        assert_rendered(
            &render(&Utc),
            "value Utc = {\n  name str = \"UTC\" 3\n}\n",
        );
    }

    #[test]
    fn test_invalid_value() {
        assert_rendered(&render(&()), "<invalid>\n");
        assert_rendered(
            &render(&Holder { slot: () }),
            "value Holder = {\n  <invalid>\n}\n",
        );
    }

    #[test]
    fn test_tuple_as_positional_record() {
        assert_rendered(
            &render(&(1, "a")),
            "value (i32, str) = {\n  0 i32 = 1\n  1 str = \"a\" 1\n}\n",
        );
    }

    #[test]
    fn test_channels() {
        let (sender, receiver) = mpsc::channel::<i32>();
        assert!(render(&sender).starts_with("value chan<- i32 = 0x"));
        assert!(render(&receiver).starts_with("value <-chan i32 = 0x"));

        let closed: Option<mpsc::Sender<i32>> = None;
        assert_rendered(&render(&closed), "value chan<- i32 = <nil>\n");
    }

    #[test]
    fn test_functions() {
        fn double(x: i32) -> i32 {
            x * 2
        }

        let f: fn(i32) -> i32 = double;
        assert!(render(&f).starts_with("value func = 0x"));

        let missing: Option<fn()> = None;
        assert_rendered(&render(&missing), "value func = <nil>\n");
    }

    #[test]
    fn test_raw_pointer() {
        let null: *const i32 = std::ptr::null();
        assert_rendered(&render(&null), "value unsafe*i32 = 0x0\n");
    }

    #[test]
    fn test_json_document() {
        let document = json!({"name": "Ann", "tags": ["x"], "n": null});
        assert_rendered(
            &render(&document),
            "value map[String]any as any = [\n  n any = <nil>\n  name String as any = \"Ann\" 3\n  tags []any as any = [\n    0 String as any = \"x\" 1\n  ]\n]\n",
        );
    }

    #[test]
    fn test_custom_tabstop_and_empty_root_name() {
        let options = plain().tabstop("\t").root_name("");
        assert_rendered(
            &crate::to_string(&ann(), &options),
            "{\n\tname String = \"Ann\" 3\n\tage u32 = 7\n}\n",
        );
    }

    #[test]
    fn test_colour_codes() {
        assert_eq!(
            crate::to_string(&true, &Options::new()),
            "\x1b[33mvalue\x1b[0m \x1b[34mbool\x1b[0m = \x1b[32mtrue\x1b[0m\n"
        );
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let options = Options::new();
        assert_eq!(
            crate::to_string(&ann(), &options),
            crate::to_string(&ann(), &options)
        );
    }
}

#[cfg(test)]
mod classifier_tests {
    use std::collections::HashMap;

    use crate::renderer::{Classifier, Palette};
    use crate::{Grok, Kind, TypeDesc};

    fn classify<T: Grok>(value: &T) -> (Kind, String, bool) {
        let classified = Classifier::new(Palette::new(false)).classify(value);
        (classified.kind, classified.label, classified.target.is_some())
    }

    #[test]
    fn test_kinds_and_labels() {
        assert_eq!(classify(&1u8), (Kind::Number, "u8".to_string(), true));
        assert_eq!(classify(&vec![true]), (Kind::Sequence, "[]bool".to_string(), true));

        let missing: Option<Box<u8>> = None;
        assert_eq!(classify(&missing), (Kind::Indirection, "*u8".to_string(), false));

        let boxed: Box<dyn Grok> = Box::new("s".to_string());
        assert_eq!(
            classify(&boxed),
            (Kind::Polymorphic, "String as any".to_string(), true)
        );
    }

    #[test]
    fn test_element_labels() {
        let pointers: Vec<Option<Box<i32>>> = vec![];
        assert_eq!(classify(&pointers).1, "[]*i32");

        let map: HashMap<String, Box<i32>> = HashMap::new();
        assert_eq!(classify(&map).1, "map[String]*i32");

        let any_map: HashMap<String, Box<dyn Grok>> = HashMap::new();
        assert_eq!(classify(&any_map).1, "map[String]any");
    }

    #[test]
    fn test_type_desc_display() {
        assert_eq!(TypeDesc::map(TypeDesc::named("K"), TypeDesc::any()).to_string(), "map[K]any");
        assert_eq!(
            TypeDesc::Chan(crate::ChanDir::Both, Box::new(TypeDesc::named("T"))).to_string(),
            "chan T"
        );
        assert_eq!(
            TypeDesc::RawPointer(Box::new(TypeDesc::named("T"))).to_string(),
            "unsafe*T"
        );
        assert_eq!(
            TypeDesc::Array {
                elem: Box::new(TypeDesc::named("u8")),
                len: 4
            }
            .to_string(),
            "[4]u8"
        );
    }

    #[test]
    fn test_coloured_label_marks_structure_and_names() {
        let bytes = vec![1u8];
        let classified = Classifier::new(Palette::new(true)).classify(&bytes);
        assert_eq!(classified.label, "\x1b[31m[]\x1b[0m\x1b[34mu8\x1b[0m");
    }
}

#[cfg(test)]
mod text_tests {
    use std::collections::HashMap;

    use crate::inspect::well_known::{coalesce, request_summary, response_summary};
    use crate::renderer::{default_text, truncate};

    #[test]
    fn test_default_text() {
        assert_eq!(default_text(&vec![1, 2]), "[1 2]");
        assert_eq!(default_text(&Box::new(5)), "&5");
        assert_eq!(default_text(&None::<Box<i32>>), "<nil>");

        let mut map = HashMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(default_text(&map), "map[a:1 b:2]");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("日本", 4), "日");
    }

    #[test]
    fn test_summaries_coalesce_missing_parts() {
        assert_eq!(coalesce(&["", "b"]), "b");
        assert_eq!(request_summary("", "", 0), "GET <request-uri> 0");
        assert_eq!(request_summary("POST", "/x", 3), "POST /x 3");
        assert_eq!(response_summary("", -1), "<status-code> <status> -1");
        assert_eq!(response_summary("200 OK", 12), "200 OK 12");
    }
}

use super::*;

fn texts(items: &[Thing]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

mod list_text {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_any_whitespace() {
        let items = Thing::string("a  b\tc\nd").as_list().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(texts(&items), ["a", "b", "c", "d"]);
    }

    #[test]
    fn braces_group_verbatim() {
        let items = Thing::string("x {a {b} $c} y")
            .as_list()
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(texts(&items), ["x", "a {b} $c", "y"]);
    }

    #[test]
    fn quotes_and_escapes() {
        let items = Thing::string(r#""a b" c\ d e\tf"#)
            .as_list()
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(texts(&items), ["a b", "c d", "e\tf"]);
    }

    #[test]
    fn empty_text_is_empty_list() {
        let items = Thing::string("   ").as_list().unwrap_or_else(|e| panic!("{e}"));
        assert!(items.is_empty());
    }

    #[test]
    fn unbalanced_brace_is_an_error() {
        assert_eq!(
            Thing::string("a {b").as_list().err(),
            Some(ConvError::UnbalancedBraces)
        );
    }

    #[test]
    fn text_after_close_brace_is_an_error() {
        assert_eq!(
            Thing::string("{a}b").as_list().err(),
            Some(ConvError::ExtraAfterBrace('b'))
        );
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(
            Thing::string("\"abc").as_list().err(),
            Some(ConvError::UnterminatedQuote)
        );
    }
}

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_quotes_elements_that_need_it() {
        let list = Thing::list(vec![
            Thing::string("plain"),
            Thing::string("two words"),
            Thing::empty(),
            Thing::string("un{balanced"),
        ]);
        assert_eq!(list.to_string(), r"plain {two words} {} un\{balanced");
    }

    #[test]
    fn rendered_list_reads_back_identically() {
        let original = vec![
            Thing::string("a b"),
            Thing::string("}{"),
            Thing::string("back\\slash"),
            Thing::string("$x [y]"),
            Thing::string("line\nbreak"),
        ];
        let text = Thing::list(original.clone()).to_string();
        let back = Thing::string(text).as_list().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(texts(&back), texts(&original));
    }

    #[test]
    fn map_renders_sorted_pairs() {
        let mut entries = FxHashMap::default();
        entries.insert("b".to_string(), Thing::int(2));
        entries.insert("a".to_string(), Thing::string("one two"));
        assert_eq!(Thing::map(entries).to_string(), "a {one two} b 2");
    }

    #[test]
    fn markers_render_as_source() {
        assert_eq!(Thing::var_ref("name").to_string(), "$name");
        assert_eq!(Thing::var_ref("odd name").to_string(), "${odd name}");
        let group = Thing::group(vec![
            Thing::string("a"),
            Thing::var_ref("b"),
            Thing::string("c"),
        ]);
        assert_eq!(group.to_string(), "a$bc");
        assert!(group.is_marker());
    }
}

mod conversions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn map_from_pairs() {
        let map = Thing::string("k1 v1 k2 {v 2}")
            .as_map()
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(map.len(), 2);
        assert_eq!(map["k2"].to_string(), "v 2");
    }

    #[test]
    fn odd_list_is_not_a_map() {
        assert_eq!(
            Thing::string("a b c").as_map().err(),
            Some(ConvError::OddMapList(3))
        );
    }

    #[test]
    fn ints_and_truth() {
        assert_eq!(Thing::string(" 42 ").as_int(), Some(42));
        assert_eq!(Thing::string("4x").as_int(), None);
        assert!(Thing::int(-1).is_true());
        assert!(Thing::string("TRUE").is_true());
        assert!(!Thing::int(0).is_true());
        assert!(!Thing::string("nope").is_true());
    }
}

mod copy_on_write {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_mut_detaches_alias() {
        let original = Thing::list(vec![Thing::int(1)]);
        let mut alias = original.clone();
        alias
            .list_mut()
            .unwrap_or_else(|e| panic!("{e}"))
            .push(Thing::int(2));

        assert_eq!(original.to_string(), "1");
        assert_eq!(alias.to_string(), "1 2");
    }

    #[test]
    fn list_mut_converts_text_in_place() {
        let mut value = Thing::string("a b");
        value
            .list_mut()
            .unwrap_or_else(|e| panic!("{e}"))
            .push(Thing::string("c d"));
        assert_eq!(value.type_name(), "list");
        assert_eq!(value.to_string(), "a b {c d}");
    }

    #[test]
    fn map_mut_detaches_alias() {
        let original = Thing::string("k v").as_map().map(Thing::Map);
        let original = original.unwrap_or_else(|e| panic!("{e}"));
        let mut alias = original.clone();
        alias
            .map_mut()
            .unwrap_or_else(|e| panic!("{e}"))
            .insert("k".into(), Thing::string("changed"));

        assert_eq!(original.to_string(), "k v");
        assert_eq!(alias.to_string(), "k changed");
    }

    #[test]
    fn deep_copy_shares_nothing() {
        let inner = Thing::list(vec![Thing::string("x")]);
        let outer = Thing::list(vec![inner]);
        let copy = outer.deep_copy();

        let (Thing::List(a), Thing::List(b)) = (&outer, &copy) else {
            panic!("expected lists");
        };
        assert!(!Heap::ptr_eq(a, b));
        assert_eq!(outer, copy);
    }
}

use std::collections::{BTreeMap, HashMap};

use automap::Automap;

#[derive(Automap, Default, Debug, PartialEq)]
struct Value {
    #[tag(automap = "info")]
    info: String,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Optional {
    #[tag(automap = "info")]
    info: Option<String>,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Boxed {
    #[tag(automap = "info")]
    info: Box<String>,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Deep {
    #[tag(automap = "info")]
    info: Option<Box<Option<String>>>,
}

#[automap_testhelpers::test]
fn value_to_value() {
    let source = Value {
        info: "Source.Info".into(),
    };
    let target: Value = automap::map(&source).unwrap();
    assert_eq!(target, source);
}

#[automap_testhelpers::test]
fn value_to_optional() {
    let source = Value {
        info: "Source.Info".into(),
    };
    let target: Optional = automap::map(&source).unwrap();
    assert_eq!(target.info.as_deref(), Some("Source.Info"));
}

#[automap_testhelpers::test]
fn optional_to_value() {
    let source = Optional {
        info: Some("Source.Info".into()),
    };
    let target: Value = automap::map(&source).unwrap();
    assert_eq!(target.info, "Source.Info");
}

#[automap_testhelpers::test]
fn optional_to_optional() {
    let source = Optional {
        info: Some("Source.Info".into()),
    };
    let target: Optional = automap::map(&source).unwrap();
    assert_eq!(target, source);
}

#[automap_testhelpers::test]
fn absent_to_value_keeps_the_default() {
    let source = Optional { info: None };
    let target: Value = automap::map(&source).unwrap();
    assert_eq!(target.info, "");
    assert_eq!(source.info, None);
}

#[automap_testhelpers::test]
fn absent_to_optional_stays_absent() {
    let source = Optional { info: None };
    let target: Optional = automap::map(&source).unwrap();
    assert_eq!(target.info, None);
}

#[automap_testhelpers::test]
fn round_trip_through_an_optional() {
    let original = Value {
        info: "there and back".into(),
    };
    let optional: Optional = automap::map(&original).unwrap();
    let back: Value = automap::map(&optional).unwrap();
    assert_eq!(back, original);
}

#[automap_testhelpers::test]
fn boxes_are_peeled_on_both_sides() {
    let source = Boxed {
        info: Box::new("boxed".into()),
    };
    let target: Value = automap::map(&source).unwrap();
    assert_eq!(target.info, "boxed");

    let back: Boxed = automap::map(&target).unwrap();
    assert_eq!(*back.info, "boxed");
}

#[automap_testhelpers::test]
fn every_layer_is_filled_in_on_the_target() {
    let source = Value {
        info: "deep".into(),
    };
    let target: Deep = automap::map(&source).unwrap();
    assert_eq!(target.info, Some(Box::new(Some("deep".to_string()))));

    let back: Optional = automap::map(&target).unwrap();
    assert_eq!(back.info.as_deref(), Some("deep"));

    let hollow = Deep {
        info: Some(Box::new(None)),
    };
    let target: Value = automap::map(&hollow).unwrap();
    assert_eq!(target.info, "");
}

#[automap_testhelpers::test]
fn source_may_be_wrapped() {
    let source = Some(Box::new(Value {
        info: "wrapped".into(),
    }));
    let target: Optional = automap::map(&source).unwrap();
    assert_eq!(target.info.as_deref(), Some("wrapped"));
}

#[derive(Automap, Default, Debug, Clone, PartialEq)]
struct Scalars {
    #[tag(automap = "flag")]
    flag: bool,
    #[tag(automap = "letter")]
    letter: char,
    #[tag(automap = "small")]
    small: i8,
    #[tag(automap = "big")]
    big: u128,
    #[tag(automap = "ratio")]
    ratio: f64,
    #[tag(automap = "size")]
    size: usize,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct OptionalScalars {
    #[tag(automap = "flag")]
    flag: Option<bool>,
    #[tag(automap = "letter")]
    letter: Option<char>,
    #[tag(automap = "small")]
    small: Option<i8>,
    #[tag(automap = "big")]
    big: Option<u128>,
    #[tag(automap = "ratio")]
    ratio: Option<f64>,
    #[tag(automap = "size")]
    size: Option<usize>,
}

#[automap_testhelpers::test]
fn scalars_are_copied_verbatim() {
    let source = Scalars {
        flag: true,
        letter: 'λ',
        small: -8,
        big: u128::MAX,
        ratio: 0.25,
        size: 42,
    };
    let optional: OptionalScalars = automap::map(&source).unwrap();
    assert_eq!(
        optional,
        OptionalScalars {
            flag: Some(true),
            letter: Some('λ'),
            small: Some(-8),
            big: Some(u128::MAX),
            ratio: Some(0.25),
            size: Some(42),
        }
    );

    let back: Scalars = automap::map(&optional).unwrap();
    assert_eq!(back, source);
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Collections {
    #[tag(automap = "list")]
    list: Vec<String>,
    #[tag(automap = "hash")]
    hash: HashMap<String, u32>,
    #[tag(automap = "tree")]
    tree: Option<BTreeMap<u8, bool>>,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct OtherCollections {
    #[tag(automap = "list")]
    list: Option<Vec<String>>,
    #[tag(automap = "hash")]
    hash: HashMap<String, u32>,
    #[tag(automap = "tree")]
    tree: BTreeMap<u8, bool>,
}

#[automap_testhelpers::test]
fn collections_are_cloned_as_a_whole() {
    let source = Collections {
        list: vec!["a".into(), "b".into()],
        hash: HashMap::from([("one".to_string(), 1)]),
        tree: Some(BTreeMap::from([(1, true), (2, false)])),
    };
    let target: OtherCollections = automap::map(&source).unwrap();
    assert_eq!(target.list, Some(source.list.clone()));
    assert_eq!(target.hash, source.hash);
    assert_eq!(Some(target.tree), source.tree);
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Partial {
    #[tag(automap = "kept")]
    kept: u32,
    #[tag(automap = "only_here")]
    only_here: u32,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Elsewhere {
    #[tag(automap = "kept")]
    kept: u32,
    #[tag(automap = "only_there")]
    only_there: u32,
}

#[automap_testhelpers::test]
fn one_sided_tags_are_ignored() {
    let source = Partial {
        kept: 1,
        only_here: 2,
    };
    let target: Elsewhere = automap::map(&source).unwrap();
    assert_eq!(
        target,
        Elsewhere {
            kept: 1,
            only_there: 0
        }
    );
}

#[derive(Automap, Default)]
struct Empty;

#[automap_testhelpers::test]
fn structs_without_tags_map_to_defaults() {
    let target: Elsewhere = automap::map(&Empty).unwrap();
    assert_eq!(target, Elsewhere::default());

    let _: Empty = automap::map(&Partial::default()).unwrap();
}

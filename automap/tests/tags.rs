use automap::{Automap, Mapper, TAG_KEY, TagIndex};

#[derive(Automap, Default, Debug)]
struct Source {
    #[tag(automap = "a")]
    a: String,
    #[tag(automap = "b")]
    b: String,
    #[tag(automap = "c")]
    c: String,
    #[tag(automap = "d")]
    d: String,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Excluding {
    #[tag(automap = "a")]
    a: String,
    #[tag(automap = "-")]
    b: String,
    #[tag(automap = "")]
    c: String,
    d: String,
}

#[automap_testhelpers::test]
fn excluded_fields_are_never_written() {
    let source = Source {
        a: "A".into(),
        b: "B".into(),
        c: "C".into(),
        d: "D".into(),
    };
    let target: Excluding = automap::map(&source).unwrap();
    assert_eq!(
        target,
        Excluding {
            a: "A".into(),
            ..Default::default()
        }
    );
}

#[derive(Automap, Default, Debug)]
struct WithOptions {
    #[tag(automap = "a,omitempty", json = "alpha")]
    a: Option<String>,
}

#[automap_testhelpers::test]
fn tag_options_are_ignored() {
    let source = WithOptions {
        a: Some("A".into()),
    };
    let target: Excluding = automap::map(&source).unwrap();
    assert_eq!(target.a, "A");
}

#[derive(Automap, Default, Debug)]
struct Collision {
    #[tag(automap = "a")]
    first: String,
    #[tag(automap = "a")]
    second: String,
}

#[automap_testhelpers::test]
fn the_last_field_sharing_a_tag_wins() {
    let source = Collision {
        first: "first".into(),
        second: "second".into(),
    };
    let target: Excluding = automap::map(&source).unwrap();
    assert_eq!(target.a, "second");

    let back: Collision = automap::map(&target).unwrap();
    assert_eq!(back.first, "");
    assert_eq!(back.second, "second");

    assert_eq!(TagIndex::build(TAG_KEY, Collision::SHAPE).get("a"), Some(1));
}

#[derive(Automap, Default, Debug)]
struct Row {
    #[tag(db = "user_name", automap = "ignored")]
    name: String,
    #[tag(db = "age")]
    age: u8,
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Model {
    #[tag(db = "user_name", automap = "name")]
    name: Option<String>,
    #[tag(db = "age")]
    age: Option<u8>,
}

#[automap_testhelpers::test]
fn a_custom_tag_key_selects_other_tags() {
    let row = Row {
        name: "Ada".into(),
        age: 36,
    };

    let model: Model = Mapper::new().with_tag_key("db").map(&row).unwrap();
    assert_eq!(
        model,
        Model {
            name: Some("Ada".into()),
            age: Some(36),
        }
    );

    // under the default key only `name` is tagged, with different tags on each side
    let model: Model = automap::map(&row).unwrap();
    assert_eq!(model, Model::default());
}

use automap::{Automap, Mapper, TAG_KEY};
use automap_repository::{
    DefaultRepository, ErrorKind, MemoryDao, Operator, Query, Repository, Update, parse_queries,
};
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Automap, Default, Debug, Clone, PartialEq)]
struct User {
    #[tag(automap = "name")]
    name: String,
    #[tag(automap = "mail")]
    mail: Option<String>,
    #[tag(automap = "age")]
    age: Option<u8>,
    #[tag(automap = "joined")]
    joined: NaiveDateTime,
}

#[derive(Automap, Default, Debug, Clone, PartialEq)]
struct UserRow {
    #[tag(automap = "name")]
    name: String,
    #[tag(automap = "mail")]
    mail: String,
    #[tag(automap = "age")]
    age: u8,
    #[tag(automap = "joined")]
    joined: Box<NaiveDateTime>,
}

#[derive(Automap, Default)]
struct UserPatch {
    #[tag(update = "mail")]
    mail: Option<String>,
    #[tag(update = "age")]
    age: Option<u8>,
}

type Users = DefaultRepository<User, UserRow, MemoryDao<UserRow>>;

fn joined(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 6, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap()
}

fn user(name: &str, age: u8, year: i32) -> User {
    User {
        name: name.into(),
        mail: Some(format!("{}@example.com", name.to_lowercase())),
        age: Some(age),
        joined: joined(year),
    }
}

async fn seeded() -> Users {
    let users = Users::new(MemoryDao::new());
    for (id, user) in [
        ("1", user("Ada", 36, 2019)),
        ("2", user("Bob", 25, 2023)),
        ("3", user("Cyd", 41, 2024)),
    ] {
        users.create(id, user).await.unwrap();
    }
    users
}

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.name.as_str()).collect()
}

#[automap_testhelpers::test(tokio::test)]
async fn create_then_read_round_trips() {
    let users = Users::new(MemoryDao::new());
    let ada = user("Ada", 36, 2019);
    users.create("1", ada.clone()).await.unwrap();

    assert_eq!(users.read("1").await.unwrap(), ada);
    assert_eq!(users.dao().len(), 1);

    let row = automap_repository::Dao::read(users.dao(), "1").await.unwrap();
    assert_eq!(row.mail, "ada@example.com");
    assert_eq!(*row.joined, joined(2019));
}

#[automap_testhelpers::test(tokio::test)]
async fn concurrent_calls_share_one_store() {
    fn assert_send<F: Send>(future: F) -> F {
        future
    }

    let users = Users::new(MemoryDao::new());
    let (ada, bob, eve) = tokio::join!(
        assert_send(users.create("1", user("Ada", 36, 2019))),
        assert_send(users.create("2", user("Bob", 25, 2023))),
        assert_send(users.create("1", user("Eve", 20, 2020))),
    );
    ada.unwrap();
    bob.unwrap();
    assert!(eve.unwrap_err().is(ErrorKind::Conflict));
    assert_eq!(users.dao().len(), 2);
    assert_eq!(users.read("1").await.unwrap().name, "Ada");
}

#[automap_testhelpers::test(tokio::test)]
async fn duplicate_ids_conflict() {
    let users = seeded().await;
    let err = users.create("2", user("Eve", 20, 2020)).await.unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    insta::assert_snapshot!(err, @"[id(2) already exists] -> [CONFLICT]");
    assert_eq!(users.read("2").await.unwrap().name, "Bob");
}

#[automap_testhelpers::test(tokio::test)]
async fn missing_ids_are_not_found() {
    let users = seeded().await;

    let err = users.read("9").await.unwrap_err();
    insta::assert_snapshot!(err, @"[id(9) not found] -> [NOT FOUND]");

    let update: Update = [("age", 1u8)].into_iter().collect();
    assert!(users.update("9", update).await.unwrap_err().is(ErrorKind::NotFound));
    assert!(users.delete("9").await.unwrap_err().is(ErrorKind::NotFound));
}

#[automap_testhelpers::test(tokio::test)]
async fn delete_removes() {
    let users = seeded().await;
    users.delete("2").await.unwrap();
    assert!(users.read("2").await.unwrap_err().is(ErrorKind::NotFound));
    assert_eq!(names(&users.search(&[]).await.unwrap()), ["Ada", "Cyd"]);
}

#[automap_testhelpers::test(tokio::test)]
async fn updates_collected_from_a_patch() {
    let users = seeded().await;
    let patch = UserPatch {
        mail: None,
        age: Some(37),
    };
    users
        .update("1", Update::from_tagged(&patch).unwrap())
        .await
        .unwrap();

    let ada = users.read("1").await.unwrap();
    assert_eq!(ada.age, Some(37));
    assert_eq!(ada.mail.as_deref(), Some("ada@example.com"));
}

#[automap_testhelpers::test(tokio::test)]
async fn empty_updates_do_nothing() {
    let users = seeded().await;
    users.update("9", Update::new()).await.unwrap();
    users
        .update("1", Update::from_tagged(&UserPatch::default()).unwrap())
        .await
        .unwrap();
    assert_eq!(users.read("1").await.unwrap(), user("Ada", 36, 2019));
}

#[automap_testhelpers::test(tokio::test)]
async fn rejected_updates_change_nothing() {
    let users = seeded().await;

    let mut update = Update::new();
    update.insert("age", 99u8);
    update.insert("nickname", "Countess");
    let err = users.update("1", update).await.unwrap_err();
    insta::assert_snapshot!(err, @"[key(nickname) cannot be updated] -> [BAD REQUEST]");

    let mut update = Update::new();
    update.insert("age", 99u8);
    update.insert("mail", 1i64);
    let err = users.update("1", update).await.unwrap_err();
    insta::assert_snapshot!(err, @"[value(1) does not fit key(mail)] -> [BAD REQUEST]");

    assert_eq!(users.read("1").await.unwrap().age, Some(36));
}

#[automap_testhelpers::test(tokio::test)]
async fn search_matches_every_query() {
    let users = seeded().await;
    let keys = automap::tag_to_type(TAG_KEY, UserRow::SHAPE).unwrap();

    let found = users
        .search(&parse_queries("q=age,GE,30&q=name,NE,Cyd", &keys).unwrap())
        .await
        .unwrap();
    assert_eq!(names(&found), ["Ada"]);

    let found = users
        .search(&parse_queries("?q=joined,GT,2020-01-01_00:00", &keys).unwrap())
        .await
        .unwrap();
    assert_eq!(names(&found), ["Bob", "Cyd"]);

    let found = users
        .search(&[Query::new("name", Operator::Eq, "Nobody")])
        .await
        .unwrap();
    assert!(found.is_empty());

    assert_eq!(names(&users.search(&[]).await.unwrap()), ["Ada", "Bob", "Cyd"]);
}

#[automap_testhelpers::test(tokio::test)]
async fn searching_an_unknown_key_is_a_bad_request() {
    let users = seeded().await;
    let err = users
        .search(&[Query::new("height", Operator::Gt, 180u16)])
        .await
        .unwrap_err();
    insta::assert_snapshot!(err, @"[key(height) cannot be searched] -> [BAD REQUEST]");
}

#[derive(Automap, Default, Debug)]
struct Legacy {
    #[tag(automap = "name")]
    name: u32,
}

#[automap_testhelpers::test(tokio::test)]
async fn mapping_failures_are_internal_errors() {
    let legacy = DefaultRepository::<Legacy, UserRow, _>::new(MemoryDao::new());
    let err = legacy.create("1", Legacy { name: 7 }).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    insta::assert_snapshot!(err, @"[source and target kind mismatch for tag 'name' - source: 'u32' (u32), target: 'string' (String)] -> [INTERNAL ERROR]");
    assert!(legacy.dao().is_empty());
}

#[derive(Automap, Default, Debug, PartialEq)]
struct Account {
    #[tag(db = "login")]
    login: String,
}

#[derive(Automap, Default, Clone)]
struct AccountRow {
    #[tag(db = "login")]
    user_name: String,
}

#[automap_testhelpers::test(tokio::test)]
async fn custom_tag_keys() {
    let accounts = DefaultRepository::<Account, AccountRow, _>::with_mapper(
        MemoryDao::new().with_tag_key("db"),
        Mapper::new().with_tag_key("db"),
    );
    accounts
        .create("a", Account { login: "root".into() })
        .await
        .unwrap();

    let update: Update = [("login", "admin")].into_iter().collect();
    accounts.update("a", update).await.unwrap();
    assert_eq!(accounts.read("a").await.unwrap().login, "admin");
}

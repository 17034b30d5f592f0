use indexmap::IndexMap;

use reladb::store::{DataType, Database, Error, Row, Value};

fn _prepare_database() -> Database {
    Database::new()
}

fn _user_fields() -> Vec<(&'static str, DataType)> {
    vec![("name", DataType::Text), ("age", DataType::Integer)]
}

fn _insert_users(database: &mut Database) {
    let users = database.get("users").unwrap();
    let mut users_rw = users.write().unwrap();

    for (name, age) in [("Alice", 30), ("Bob", 25), ("Jimmy", 16)] {
        users_rw.add_row(Row::from_pairs(vec![
            ("name", Value::from(name)),
            ("age", age.into()),
        ]));
    }
}

#[test]
fn database_create_and_get() {
    let mut database = _prepare_database();

    let created = database.create("users", _user_fields());
    assert_eq!(created.is_ok(), true);

    let users = database.get("users").unwrap();
    assert_eq!(users.read().unwrap().name(), "users");
    assert_eq!(database.table_names(), vec!["users"]);
    assert_eq!(database.contains_table("users"), true);
}

#[test]
#[should_panic(expected = "NotFound")]
fn database_get_missing_table() {
    let database = _prepare_database();
    database.get("missing").unwrap();
}

#[test]
fn database_create_duplicate_is_rejected() {
    let mut database = _prepare_database();
    database.create("users", _user_fields()).unwrap();

    let duplicate = database.create("users", _user_fields());

    assert!(matches!(duplicate, Err(Error::AlreadyExists(_))));
}

#[test]
fn database_delete_removes_table() {
    let mut database = _prepare_database();
    database.create("users", _user_fields()).unwrap();

    database.delete("users").unwrap();

    assert_eq!(database.contains_table("users"), false);
    assert!(matches!(database.delete("users"), Err(Error::NotFound(_))));
}

#[test]
fn database_find_then_update_through_handle() {
    let mut database = _prepare_database();
    database.create("users", _user_fields()).unwrap();
    _insert_users(&mut database);

    let users = database.get("users").unwrap();
    let found = users
        .read()
        .unwrap()
        .find(|row| row.get("name") == Value::from("Alice"), 0);
    let alice = &found[0];

    let snapshot = alice.read().unwrap().fields();
    assert_eq!(snapshot.get("name"), Some(&Value::from("Alice")));
    assert_eq!(snapshot.get("age"), Some(&Value::from(30)));

    alice.write().unwrap().add_field("age", 31);

    let rows = users.read().unwrap().scan();
    assert_eq!(rows[0].read().unwrap().get("age"), Value::from(31));
}

#[test]
fn save_without_file_path_fails() {
    let database = _prepare_database();

    assert!(matches!(database.save(), Err(Error::NoFilePath)));
}

#[test]
fn save_and_load_round_trip() {
    let directory = tempfile::tempdir().unwrap();
    let file_path = directory.path().join("round_trip.db");

    let mut database = Database::open(&file_path);
    database
        .create(
            "users",
            vec![
                ("name", DataType::Text),
                ("age", DataType::Integer),
                ("active", DataType::Boolean),
                ("score", DataType::Float),
                ("tags", DataType::List),
                ("profile", DataType::Map),
            ],
        )
        .unwrap();

    let users = database.get("users").unwrap();
    users.write().unwrap().add_row(Row::from_pairs(vec![
        ("name", Value::from("Alice")),
        ("age", 30.into()),
        ("active", true.into()),
        ("score", 91.5.into()),
        (
            "tags",
            Value::List(vec![Value::from("admin"), Value::from("staff")]),
        ),
        (
            "profile",
            Value::Map(IndexMap::from([("city".to_string(), Value::from("Oslo"))])),
        ),
    ]));
    users.write().unwrap().add_row(Row::from_pairs(vec![
        ("name", Value::from("Bob")),
        ("age", 25.into()),
        ("active", false.into()),
        ("score", Value::Null),
        ("tags", Value::List(vec![])),
        ("profile", Value::Map(IndexMap::new())),
    ]));

    database.save().unwrap();

    let mut restored = Database::open(&file_path);
    restored.load().unwrap();

    assert_eq!(restored.table_names(), vec!["users"]);

    let users = restored.get("users").unwrap();
    let users_ro = users.read().unwrap();

    let field_names: Vec<&str> = users_ro.fields().keys().map(|name| name.as_str()).collect();
    assert_eq!(
        field_names,
        vec!["name", "age", "active", "score", "tags", "profile"]
    );
    assert_eq!(users_ro.fields()["age"].data_type(), DataType::Integer);
    assert_eq!(users_ro.fields()["active"].data_type(), DataType::Boolean);
    assert_eq!(users_ro.fields()["score"].data_type(), DataType::Float);

    let rows = users_ro.scan();
    assert_eq!(rows.len(), 2);

    let alice = rows[0].read().unwrap();
    assert_eq!(alice.get("name"), Value::from("Alice"));
    assert_eq!(alice.get("age"), Value::from(30));
    assert_eq!(alice.get("active"), Value::from(true));
    assert_eq!(alice.get("score"), Value::from(91.5));
    assert_eq!(
        alice.get("tags"),
        Value::List(vec![Value::from("admin"), Value::from("staff")])
    );
    assert_eq!(
        alice.get("profile"),
        Value::Map(IndexMap::from([("city".to_string(), Value::from("Oslo"))]))
    );

    let bob = rows[1].read().unwrap();
    assert_eq!(bob.get("name"), Value::from("Bob"));
    assert_eq!(bob.get("active"), Value::from(false));
    assert_eq!(bob.get("score"), Value::Null);
}

#[test]
fn save_replaces_previous_file_contents() {
    let directory = tempfile::tempdir().unwrap();
    let file_path = directory.path().join("replace.db");

    let mut database = Database::open(&file_path);
    database.create("users", _user_fields()).unwrap();
    _insert_users(&mut database);
    database.save().unwrap();

    // shrink the table and save again; the file follows
    let users = database.get("users").unwrap();
    users
        .write()
        .unwrap()
        .delete_row(|row| row.get("age").as_integer().is_some_and(|age| age < 18));
    database.save().unwrap();

    let mut restored = Database::open(&file_path);
    restored.load().unwrap();

    let users = restored.get("users").unwrap();
    assert_eq!(users.read().unwrap().len(), 2);
}

#[test]
fn load_into_conflicting_database_is_rejected() {
    let directory = tempfile::tempdir().unwrap();
    let file_path = directory.path().join("conflict.db");

    let mut database = Database::open(&file_path);
    database.create("users", _user_fields()).unwrap();
    database.save().unwrap();

    let mut conflicting = Database::open(&file_path);
    conflicting.create("users", _user_fields()).unwrap();

    assert!(matches!(
        conflicting.load(),
        Err(Error::AlreadyExists(_))
    ));
}

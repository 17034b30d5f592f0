#[cfg(test)]
mod row {
    use reladb::store::{Row, Value};

    #[test]
    fn row_get_missing_field_is_null() {
        let row = Row::from_pairs(vec![("name", "Alice")]);

        assert_eq!(row.get("age"), Value::Null);
    }

    #[test]
    fn row_add_field_overwrites_in_place() {
        let mut row = Row::from_pairs(vec![("name", Value::from("Alice")), ("age", 30.into())]);

        row.add_field("name", "Alicia");

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("name"), Value::from("Alicia"));
        // overwriting must not move the field to the back
        assert_eq!(row.field_names(), vec!["name", "age"]);
    }

    #[test]
    fn row_add_field_appends_new_field_last() {
        let mut row = Row::from_pairs(vec![("name", "Alice")]);

        row.add_field("age", 30);

        assert_eq!(row.field_names(), vec!["name", "age"]);
    }

    #[test]
    fn row_fields_is_a_snapshot() {
        let mut row = Row::from_pairs(vec![("name", "Alice")]);
        let snapshot = row.fields();

        row.add_field("age", 30);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(row.len(), 2);
    }
}

#[cfg(test)]
mod table {
    use reladb::store::{DataType, Row, Table, Value};

    fn _create_table(columns: Vec<(&str, DataType)>) -> Result<Table, reladb::store::Error> {
        let mut table = Table::new("users")?;
        table.add_fields(columns)?;
        Ok(table)
    }

    fn _insert_people(table: &mut Table) {
        let people = vec![("Alice", 30), ("Bob", 25), ("Jimmy", 16)];

        for (name, age) in people {
            table.add_row(Row::from_pairs(vec![
                ("name", Value::from(name)),
                ("age", age.into()),
            ]));
        }
    }

    #[test]
    fn table_creates_with_fields() {
        let table = _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]);

        assert_eq!(table.is_ok(), true);
        assert_eq!(table.unwrap().fields().len(), 2);
    }

    #[test]
    #[should_panic(expected = "InvalidSchema")]
    fn table_does_not_create_with_empty_name() {
        Table::new("").unwrap();
    }

    #[test]
    #[should_panic(expected = "InvalidSchema")]
    fn table_does_not_accept_empty_field_name() {
        let mut table = Table::new("users").unwrap();
        table.add_field("", DataType::Text).unwrap();
    }

    #[test]
    fn add_field_last_write_wins() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();

        table.add_field("age", DataType::Float).unwrap();

        assert_eq!(table.fields().len(), 2);
        assert_eq!(table.fields()["age"].data_type(), DataType::Float);
    }

    #[test]
    fn delete_fields_ignores_unknown_names() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();

        table.delete_fields(&["age", "salary"]);

        assert_eq!(table.fields().len(), 1);
    }

    #[test]
    fn delete_fields_keeps_row_data() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        table.delete_fields(&["age"]);

        // schema deletion does not cascade into stored rows
        let rows = table.scan();
        assert_eq!(rows[0].read().unwrap().get("age"), Value::from(30));
    }

    #[test]
    fn scan_returns_all_rows_in_insertion_order() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        let rows = table.scan();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].read().unwrap().get("name"), Value::from("Alice"));
        assert_eq!(rows[2].read().unwrap().get("name"), Value::from("Jimmy"));
    }

    #[test]
    fn find_returns_matching_subset_in_order() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        let adults = table.find(
            |row| row.get("age").as_integer().is_some_and(|age| age >= 18),
            0,
        );

        assert_eq!(adults.len(), 2);
        assert_eq!(adults[0].read().unwrap().get("name"), Value::from("Alice"));
        assert_eq!(adults[1].read().unwrap().get("name"), Value::from("Bob"));
    }

    #[test]
    fn find_with_amount_stops_at_first_matches() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        let first = table.find(|_| true, 2);

        assert_eq!(first.len(), 2);
        assert_eq!(first[1].read().unwrap().get("name"), Value::from("Bob"));
    }

    #[test]
    fn find_with_no_match_returns_empty() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        let nobody = table.find(|row| row.get("name") == Value::from("Zoe"), 0);

        assert_eq!(nobody.len(), 0);
    }

    #[test]
    fn find_hands_out_live_rows() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        let found = table.find(|row| row.get("name") == Value::from("Alice"), 0);
        let alice = &found[0];
        assert_eq!(
            alice.read().unwrap().fields().get("age"),
            Some(&Value::from(30))
        );

        alice.write().unwrap().add_field("age", 31);

        // the stored row was updated through the handle
        let rows = table.scan();
        assert_eq!(rows[0].read().unwrap().get("age"), Value::from(31));
    }

    #[test]
    fn delete_row_keeps_survivors_in_order() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        let n_deleted =
            table.delete_row(|row| row.get("age").as_integer().is_some_and(|age| age < 18));

        assert_eq!(n_deleted, 1);
        let rows = table.scan();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].read().unwrap().get("name"), Value::from("Alice"));
        assert_eq!(rows[1].read().unwrap().get("name"), Value::from("Bob"));
    }

    #[test]
    fn delete_row_without_match_changes_nothing() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();
        _insert_people(&mut table);

        let n_deleted = table.delete_row(|row| row.get("name") == Value::from("Zoe"));

        assert_eq!(n_deleted, 0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn add_rows_counts_insertions() {
        let mut table =
            _create_table(vec![("name", DataType::Text), ("age", DataType::Integer)]).unwrap();

        let n_inserted = table.add_rows(vec![
            Row::from_pairs(vec![("name", "Alice")]),
            Row::from_pairs(vec![("name", "Bob")]),
        ]);

        assert_eq!(n_inserted, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn rows_may_diverge_from_schema() {
        let mut table = _create_table(vec![("name", DataType::Text)]).unwrap();

        table.add_row(Row::from_pairs(vec![
            ("name", Value::from("Alice")),
            ("age", 30.into()),
        ]));

        let rows = table.scan();
        assert_eq!(rows[0].read().unwrap().get("age"), Value::from(30));
    }
}

//! Whole-record conversion tests: from_record, from_record_exact, to_record,
//! and the complete! bridge.

use lacuna::record::Complete;
use lacuna::Record;

use crate::helpers::*;

lacuna::complete! {
    /// One fully-present user row.
    pub struct User optional UserOptional {
        pub username: String,
        pub age: i64,
    }
}

lacuna::complete! {
    /// A wider row than [`User`]: one extra field.
    pub struct AuditedUser optional AuditedUserOptional {
        pub username: String,
        pub age: i64,
        pub active: bool,
    }
}

lacuna::complete! {
    /// A narrower row than [`User`].
    pub struct NameOnly optional NameOnlyOptional {
        pub username: String,
    }
}

lacuna::complete! {
    /// Same names as [`User`], one differing type.
    pub struct StringlyUser optional StringlyUserOptional {
        pub username: String,
        pub age: String,
    }
}

fn ann() -> User {
    User {
        username: "ann".to_string(),
        age: 31,
    }
}

#[test]
fn complete_schema_follows_declaration_order() {
    let schema = User::schema();
    let names: Vec<_> = schema.fields().map(|def| def.name()).collect();
    assert_eq!(names, ["username", "age"]);
    assert_eq!(schema, user_schema());
}

#[test]
fn generated_field_handles_match_the_shared_ones() {
    let r = Record::new().insert(&User::username(), "ann".to_string());
    assert_eq!(r.get(&USERNAME), Some("ann".to_string()));
}

#[test]
fn from_record_exact_makes_every_field_present() {
    let r = Record::from_record_exact(ann());
    assert_eq!(r.schema(), &User::schema());
    assert_eq!(r.present_len(), 2);
    assert_eq!(r.get(&USERNAME), Some("ann".to_string()));
    assert_eq!(r.get(&AGE), Some(31));

    // Identical to folding insert by hand.
    assert_eq!(r, sample_user());
}

#[test]
fn from_record_then_to_record_round_trips() {
    let r = Record::from_record(&user_schema(), ann());
    let parts: UserOptional = r.to_record::<User>();
    assert_eq!(parts.username, Some("ann".to_string()));
    assert_eq!(parts.age, Some(31));
}

#[test]
fn from_record_drops_fields_outside_the_target_schema() {
    let r = Record::from_record(
        &user_schema(),
        AuditedUser {
            username: "ann".to_string(),
            age: 31,
            active: true,
        },
    );
    assert_eq!(r.schema(), &user_schema());
    assert!(!r.schema().contains("active"));
    assert_eq!(r.get(&AGE), Some(31));
}

#[test]
fn from_record_leaves_missing_target_fields_absent() {
    let r = Record::from_record(
        &user_schema(),
        NameOnly {
            username: "ann".to_string(),
        },
    );
    assert_eq!(r.get(&USERNAME), Some("ann".to_string()));
    assert_eq!(r.get(&AGE), None);
    assert_eq!(r.present_len(), 1);
}

#[test]
fn to_record_marks_absent_fields_none() {
    let r = Record::empty(user_schema()).set(&USERNAME, "ann".to_string());
    let parts = r.to_record::<User>();
    assert_eq!(parts.username, Some("ann".to_string()));
    assert_eq!(parts.age, None);

    let blank = Record::empty(user_schema()).to_record::<User>();
    assert_eq!(blank.username, None);
    assert_eq!(blank.age, None);
}

#[test]
#[should_panic(expected = "type mismatch")]
fn from_record_with_a_retyped_field_is_fatal() {
    let _ = Record::from_record(
        &user_schema(),
        StringlyUser {
            username: "ann".to_string(),
            age: "31".to_string(),
        },
    );
}

#[test]
#[should_panic(expected = "schema mismatch")]
fn to_record_under_the_wrong_schema_is_fatal() {
    let r = Record::new().insert(&ACTIVE, true);
    let _ = r.to_record::<User>();
}

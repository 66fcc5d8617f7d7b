//! Derived structural operation tests: equality, total ordering, rendering.

use std::cmp::Ordering;

use lacuna::Record;
use lacuna::record::{Field, Schema};

use crate::helpers::*;

#[test]
fn rendering_an_empty_record() {
    assert_eq!(Record::new().to_string(), "(Record::from_record {})");
    assert_eq!(
        Record::empty(user_schema()).to_string(),
        "(Record::from_record {})"
    );
}

#[test]
fn rendering_walks_canonical_order_and_skips_absent_fields() {
    const F1: Field<i64> = Field::new("f1");
    const F2: Field<String> = Field::new("f2");

    let r = Record::new().insert(&F1, 1).insert(&F2, "x".to_string());
    assert_eq!(
        r.to_string(),
        r#"(Record::from_record { f1: 1, f2: "x" })"#
    );

    // Write order does not leak into the rendering.
    let rewritten = Record::empty(r.schema().clone())
        .set(&F2, "x".to_string())
        .set(&F1, 1);
    assert_eq!(rewritten.to_string(), r.to_string());

    // Absent fields are omitted entirely.
    assert_eq!(
        r.delete(&F1).to_string(),
        r#"(Record::from_record { f2: "x" })"#
    );
}

#[test]
fn debug_shows_absent_slots() {
    let r = Record::empty(user_schema()).set(&AGE, 31);
    let rendered = format!("{r:?}");
    assert!(rendered.contains("username: <absent>"));
    assert!(rendered.contains("age: 31"));
}

#[test]
fn absent_differs_from_present() {
    let schema = Schema::builder().field::<i64>("age").build().unwrap();
    let absent = Record::empty(schema);
    let present = Record::new().insert(&AGE, 31);

    assert_eq!(absent.schema(), present.schema());
    assert_ne!(absent, present);
    assert_eq!(absent.cmp(&present), Ordering::Less);
    assert_eq!(present.cmp(&absent), Ordering::Greater);
}

#[test]
fn equality_compares_field_values() {
    assert_eq!(sample_user(), sample_user());
    assert_ne!(sample_user(), sample_user().set(&AGE, 32));

    // Two absents are equal regardless of how they were produced.
    let a = Record::empty(user_schema());
    let b = sample_user().modify(&AGE, |v| *v).set(&AGE, 31);
    assert_eq!(b, sample_user());
    assert_ne!(a, b);
    assert_eq!(a, Record::empty(user_schema()));
}

#[test]
fn records_of_different_shapes_are_unequal() {
    let r = sample_user();
    let narrowed = r.delete(&AGE);
    assert_ne!(r, narrowed);

    let retyped = r.modify(&AGE, |v| v.to_string());
    assert_ne!(r, retyped);
}

#[test]
fn ordering_is_lexicographic_over_the_canonical_sequence() {
    // First differing field decides; later fields cannot override it.
    let lesser = sample_user().set(&USERNAME, "ann".to_string()).set(&AGE, 99);
    let greater = sample_user().set(&USERNAME, "bob".to_string()).set(&AGE, 1);
    assert_eq!(lesser.cmp(&greater), Ordering::Less);

    // Equal head field defers to the tail.
    let young = sample_user().set(&AGE, 1);
    let old = sample_user().set(&AGE, 99);
    assert_eq!(young.cmp(&old), Ordering::Less);
}

#[test]
fn ordering_is_consistent_with_equality() {
    let records = [
        Record::empty(user_schema()),
        sample_user(),
        sample_user().set(&AGE, 1),
        Record::empty(user_schema()).set(&USERNAME, "ann".to_string()),
    ];

    for a in &records {
        for b in &records {
            assert_eq!(a.cmp(b) == Ordering::Equal, a == b);
            assert_eq!(a.cmp(b).reverse(), b.cmp(a));
        }
    }
}

#[test]
fn ordering_is_total_across_schemas() {
    let a = sample_user();
    let b = Record::new().insert(&ACTIVE, true);

    // Shape decides, and consistently in both directions.
    assert_ne!(a.cmp(&b), Ordering::Equal);
    assert_eq!(a.cmp(&b).reverse(), b.cmp(&a));
}

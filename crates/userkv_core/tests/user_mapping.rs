mod common;

use chrono::{TimeZone, Utc};
use common::scenario_now;
use userkv_core::{to_item, AttributeValue, User, UserRecord};

fn populated_user() -> User {
    User {
        id: "usr-42".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        phone: "+1 (555) 010-0000".to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 2, 15, 10, 0, 0).unwrap(),
        updated_at: Utc.timestamp_opt(1_700_000_000, 123_000_000).unwrap(),
    }
}

#[test]
fn new_user_has_no_identity() {
    let user = User::new("John", "Doe", "+12345678");

    assert!(!user.has_id());
    assert_eq!(user.created_at, User::default().created_at);
    assert_eq!(user.created_at.timestamp(), 0);
}

#[test]
fn mapper_round_trip_is_lossless() {
    let user = populated_user();

    let record = UserRecord::from_domain(&user);
    assert_eq!(record.id, user.id);
    assert_eq!(record.phone, user.phone);
    assert_eq!(record.into_domain(), user);

    let via_from: User = UserRecord::from(&user).into();
    assert_eq!(via_from, user);
}

#[test]
fn record_item_has_exact_attribute_layout() {
    let now = scenario_now();
    let record = UserRecord {
        id: "usr-uuid-123".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        phone: "+12345678".to_string(),
        created_at: now,
        updated_at: now,
    };

    let item = to_item(&record).unwrap();

    let names: Vec<&str> = item.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        ["created_at", "first_name", "id", "last_name", "phone", "updated_at"]
    );
    assert_eq!(item["created_at"], AttributeValue::N(now.timestamp().to_string()));
    assert_eq!(item["updated_at"].as_i64(), Some(now.timestamp()));
    assert_eq!(item["phone"].as_s(), Some("+12345678"));
}

#[test]
fn domain_json_uses_snake_case_fields_and_rfc3339_timestamps() {
    let json = serde_json::to_value(populated_user()).unwrap();

    assert_eq!(json["id"], "usr-42");
    assert_eq!(json["first_name"], "Grace");
    assert_eq!(json["last_name"], "Hopper");
    assert_eq!(json["created_at"], "2023-02-15T10:00:00Z");

    let decoded: User = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, populated_user());
}

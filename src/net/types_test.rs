use super::*;

#[test]
fn donation_deserializes_service_field_names() {
    let json = serde_json::json!({
        "_id": "a",
        "food_type": "Rice",
        "quantity": 5,
        "storage": "fridge",
        "description": "cooked today",
        "createdAt": "2025-01-02T10:00:00Z",
        "safe_till": "2025-01-02T18:00:00Z",
        "donor": "ignored"
    });
    let d: Donation = serde_json::from_value(json).unwrap();
    assert_eq!(d.id, "a");
    assert_eq!(d.food_type, "Rice");
    assert_eq!(d.quantity, Some(5.0));
    assert_eq!(d.storage.as_deref(), Some("fridge"));
    assert_eq!(d.description.as_deref(), Some("cooked today"));
    assert_eq!(d.created_at.as_deref(), Some("2025-01-02T10:00:00Z"));
    assert_eq!(d.safe_till.as_deref(), Some("2025-01-02T18:00:00Z"));
}

#[test]
fn donation_tolerates_missing_optional_fields() {
    let d: Donation = serde_json::from_value(serde_json::json!({ "_id": "b", "food_type": "Dal" })).unwrap();
    assert_eq!(d.quantity, None);
    assert_eq!(d.quantity_or_zero(), 0.0);
    assert_eq!(d.created_at, None);
    assert_eq!(d.safe_till, None);
}

#[test]
fn donation_without_id_is_rejected() {
    let res = serde_json::from_value::<Donation>(serde_json::json!({ "food_type": "Dal" }));
    assert!(res.is_err());
}

#[test]
fn new_donation_serializes_expected_body() {
    let payload = NewDonation {
        food_type: "Rice".into(),
        quantity: 5.0,
        storage: "fridge".into(),
        description: String::new(),
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        serde_json::json!({ "food_type": "Rice", "quantity": 5, "storage": "fridge", "description": "" })
    );
    assert_eq!(
        serde_json::to_string(&payload).unwrap(),
        r#"{"food_type":"Rice","quantity":5,"storage":"fridge","description":""}"#
    );
}

#[test]
fn new_donation_keeps_fractional_quantity() {
    let payload = NewDonation {
        food_type: "Curry".into(),
        quantity: 2.5,
        storage: String::new(),
        description: String::new(),
    };
    assert_eq!(serde_json::to_value(&payload).unwrap()["quantity"], serde_json::json!(2.5));
}

#[test]
fn error_body_reads_optional_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":"Unauthorized"}"#).unwrap();
    assert_eq!(body.error.as_deref(), Some("Unauthorized"));
    let body: ErrorBody = serde_json::from_str("{}").unwrap();
    assert_eq!(body.error, None);
}

#[test]
fn list_scope_paths_and_auth() {
    assert_eq!(ListScope::default(), ListScope::All);
    assert_eq!(ListScope::All.path(), "/api/food/list");
    assert_eq!(ListScope::Mine.path(), "/api/food/my");
    assert!(!ListScope::All.requires_auth());
    assert!(ListScope::Mine.requires_auth());
}

use super::*;

#[test]
fn new_profile_admin_is_active_everyone_else_pending() {
    let admin = UserProfile::new("a@b.com".to_owned(), RoleTag::Admin, 1);
    assert_eq!(admin.status, AccountStatus::Active);

    let customer = UserProfile::new("c@d.com".to_owned(), RoleTag::Customer, 1);
    assert_eq!(customer.status, AccountStatus::Pending);

    let provider = UserProfile::new("p@q.com".to_owned(), RoleTag::HotelProvider, 1);
    assert_eq!(provider.status, AccountStatus::Pending);
}

#[test]
fn profile_omits_absent_optional_fields() {
    let profile = UserProfile::new("a@b.com".to_owned(), RoleTag::Customer, 42);
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["email"], "a@b.com");
    assert_eq!(json["role"], "customer");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["registered_at"], 42);
    assert!(json.get("first_name").is_none());
    assert!(json.get("hotel_registration_id").is_none());
}

#[test]
fn profile_round_trips_with_provider_fields() {
    let mut profile = UserProfile::new("h@q.com".to_owned(), RoleTag::HotelProvider, 7);
    profile.company_name = Some("Seaview Stays".to_owned());
    profile.hotel_registration_id = Some("HR-991".to_owned());
    profile.provider_kind = Some(ProviderKind::Hotel);

    let json = serde_json::to_string(&profile).unwrap();
    let back: UserProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, profile);
}

#[test]
fn parse_entries_drops_malformed_documents() {
    let entries = vec![
        (
            "b1".to_owned(),
            serde_json::json!({
                "kind": "flight", "title": "DEL-BOM", "date": "2026-09-01",
                "status": "confirmed", "booked_at": 1
            }),
        ),
        ("junk".to_owned(), serde_json::json!({ "not": "a booking" })),
    ];
    let parsed: Vec<(String, Booking)> = parse_entries(entries);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].0, "b1");
    assert_eq!(parsed[0].1.title, "DEL-BOM");
}

#[test]
fn profile_tolerates_missing_optionals_on_read() {
    let doc = serde_json::json!({
        "email": "x@y.com",
        "role": "customer",
        "status": "pending",
        "registered_at": 0
    });
    let profile: UserProfile = serde_json::from_value(doc).unwrap();
    assert_eq!(profile.role, RoleTag::Customer);
    assert_eq!(profile.first_name, None);
}

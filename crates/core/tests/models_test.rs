use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use roomresv_core::i18n::{
    EntityKey, KeyShape, Localized, TransEntity, Translation, TranslationFallback,
    TranslationText,
};
use roomresv_core::keys::{NoticeKey, ReservationKey};
use roomresv_core::lookup::{Lookup, LookupKind, resv_privacy};
use roomresv_core::models::reservation::{ReservationUpdate, SlotListing};
use roomresv_core::models::setting::SettingUpdate;
use roomresv_core::models::room::{NewRoom, RoomUpdate};
use roomresv_core::models::user::{NewUser, UserUpdate};
use rstest::rstest;
use serde_json::{from_str, json, to_value};

fn listing(privacy: i64) -> SlotListing {
    SlotListing {
        username: Some("alice".to_string()),
        resv_id: Some(3),
        slot_id: Some(1),
        title: Some("Meeting".to_string()),
        room_id: 5,
        privacy,
        status: 0,
        start_time: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    }
}

#[test]
fn test_public_listing_is_unchanged() {
    let public = listing(resv_privacy::PUBLIC);
    assert_eq!(public.clone().masked(), public);
}

#[test]
fn test_anonymous_listing_hides_owner() {
    let masked = listing(resv_privacy::ANONYMOUS).masked();

    assert_eq!(masked.username, None);
    assert_eq!(masked.resv_id, Some(3));
    assert_eq!(masked.title.as_deref(), Some("Meeting"));
}

#[test]
fn test_private_listing_keeps_only_occupancy() {
    let original = listing(resv_privacy::PRIVATE);
    let masked = original.clone().masked();

    assert_eq!(
        masked,
        SlotListing {
            username: None,
            resv_id: None,
            slot_id: None,
            title: None,
            ..original
        }
    );
}

#[test]
fn test_keys_display() {
    let key = ReservationKey::new("alice", 2);
    let slot = key.slot(4);

    assert_eq!(key.to_string(), "alice/2");
    assert_eq!(slot.to_string(), "alice/2/4");
    assert_eq!(slot.reservation(), key);
    assert_eq!(NoticeKey::new("bob", 7).to_string(), "bob/7");
}

#[rstest]
#[case(TransEntity::Room, "rooms", "room_trans", &["room_id"], KeyShape::Integer)]
#[case(TransEntity::User, "users", "user_trans", &["username"], KeyShape::Text)]
#[case(TransEntity::Notice, "notices", "notice_trans", &["username", "notice_id"], KeyShape::Owned)]
#[case(TransEntity::Reservation, "reservations", "resv_trans", &["username", "resv_id"], KeyShape::Owned)]
#[case(TransEntity::RoomType, "room_types", "room_type_trans", &["type"], KeyShape::Integer)]
#[case(TransEntity::Setting, "settings", "setting_trans", &["id"], KeyShape::Integer)]
fn test_trans_entity_tables(
    #[case] entity: TransEntity,
    #[case] base: &str,
    #[case] trans: &str,
    #[case] keys: &[&str],
    #[case] shape: KeyShape,
) {
    assert_eq!(entity.base_table(), base);
    assert_eq!(entity.trans_table(), trans);
    assert_eq!(entity.key_columns(), keys);
    assert_eq!(entity.key_shape(), shape);
}

#[test]
fn test_only_long_form_entities_have_detail() {
    let with_detail: Vec<_> = TransEntity::ALL
        .into_iter()
        .filter(|e| e.detail_column().is_some())
        .collect();

    assert_eq!(
        with_detail,
        vec![TransEntity::Setting, TransEntity::Notice, TransEntity::Reservation]
    );
}

#[test]
fn test_lookup_kinds_map_to_their_translations() {
    for kind in LookupKind::ALL {
        let entity = kind.trans_entity();
        assert_eq!(entity.base_table(), kind.table());
        assert_eq!(entity.key_columns(), &[kind.key_column()]);
        assert_eq!(entity.label_column(), "label");
    }
}

#[test]
fn test_entity_key_shape_check() {
    assert!(EntityKey::from(5).check_for(TransEntity::Room).is_ok());
    assert!(EntityKey::from("alice").check_for(TransEntity::User).is_ok());
    assert!(
        EntityKey::from(ReservationKey::new("alice", 1))
            .check_for(TransEntity::Reservation)
            .is_ok()
    );

    let err = EntityKey::from("alice")
        .check_for(TransEntity::Room)
        .unwrap_err();
    assert!(err.to_string().contains("rooms"));
}

#[test]
fn test_entity_key_serialization() {
    assert_eq!(to_value(EntityKey::Id(5)).unwrap(), json!(5));
    assert_eq!(
        to_value(EntityKey::from(NoticeKey::new("bob", 7))).unwrap(),
        json!({ "username": "bob", "id": 7 })
    );

    let key: EntityKey = from_str(r#""alice""#).unwrap();
    assert_eq!(key, EntityKey::Name("alice".to_string()));
}

#[rstest]
#[case(TranslationFallback::None, "fr", "fr")]
#[case(TranslationFallback::Locale("en".to_string()), "fr", "en")]
fn test_fallback_locale(
    #[case] fallback: TranslationFallback,
    #[case] requested: &str,
    #[case] consulted: &str,
) {
    assert_eq!(fallback.locale_for(requested), consulted);
}

#[test]
fn test_translation_text_builder() {
    let text = TranslationText::new("Réunion").with_detail("Salle 5");

    assert_eq!(text.label, "Réunion");
    assert_eq!(text.detail.as_deref(), Some("Salle 5"));
}

#[test]
fn test_localized_serialization_flattens_base() {
    let localized = Localized {
        base: Lookup {
            id: 1,
            label: "Available".to_string(),
        },
        translation: Some(Translation {
            lang_code: "fr".to_string(),
            label: "Disponible".to_string(),
            detail: None,
        }),
    };

    assert_eq!(localized.label(), Some("Disponible"));
    assert_eq!(
        to_value(&localized).unwrap(),
        json!({
            "id": 1,
            "label": "Available",
            "translation": { "lang_code": "fr", "label": "Disponible", "detail": null }
        })
    );
}

#[test]
fn test_new_room_uses_type_field() {
    let room: NewRoom = from_str(
        r#"{"room_id": null, "status": 1, "name": "Lab", "capacity": 20, "type": 2, "image": null}"#,
    )
    .unwrap();

    assert_eq!(room.room_type, 2);
    assert_eq!(room.room_id, None);
}

#[test]
fn test_new_user_email_defaults_to_empty() {
    let user: NewUser = from_str(
        r#"{"username": "alice", "name": "Alice", "password": "secret", "role": 1}"#,
    )
    .unwrap();

    assert_eq!(user.email, "");
}

#[test]
fn test_empty_updates() {
    assert!(UserUpdate::default().is_empty());
    assert!(ReservationUpdate::default().is_empty());
    assert!(
        !ReservationUpdate {
            title: Some("x".to_string()),
            ..Default::default()
        }
        .is_empty()
    );
}

#[test]
fn test_patch_distinguishes_absent_from_null() {
    let keep: ReservationUpdate = from_str(r#"{"title": "Review"}"#).unwrap();
    assert_eq!(keep.session_id, None);
    assert_eq!(keep.note, None);

    let clear: ReservationUpdate = from_str(r#"{"session_id": null, "note": null}"#).unwrap();
    assert_eq!(clear.session_id, Some(None));
    assert_eq!(clear.note, Some(None));
    assert!(!clear.is_empty());

    let set: ReservationUpdate = from_str(r#"{"session_id": 3}"#).unwrap();
    assert_eq!(set.session_id, Some(Some(3)));

    let room: RoomUpdate = from_str(r#"{"image": null}"#).unwrap();
    assert_eq!(room.image, Some(None));
    let setting: SettingUpdate = from_str(r#"{"description": null}"#).unwrap();
    assert_eq!(setting.description, Some(None));
}

#[test]
fn test_patch_serializes_only_present_fields() {
    let clear = ReservationUpdate {
        note: Some(None),
        ..Default::default()
    };

    assert_eq!(
        to_value(&clear).unwrap(),
        json!({
            "room_id": null,
            "privacy": null,
            "title": null,
            "note": null
        })
    );
}

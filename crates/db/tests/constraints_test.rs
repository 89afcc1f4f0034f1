mod common;

use chrono::NaiveTime;
use common::{add_reservation, add_room, add_user, at, basic_fixture, slot};
use pretty_assertions::assert_eq;
use roomresv_core::errors::{ConstraintViolation, ResvError};
use roomresv_core::keys::ReservationKey;
use roomresv_core::lookup::{role, LookupKind};
use roomresv_core::models::notice::NewNotice;
use roomresv_core::models::period::NewPeriod;
use roomresv_core::models::session::NewSession;
use roomresv_core::models::user::NewUser;
use roomresv_db::error::{classify, WriteAction};
use roomresv_db::repositories::{lookup, notice, period, reservation, room, session, time_slot, user};
use roomresv_db::testing::create_test_pool;
use rstest::rstest;

fn violation(err: ResvError) -> ConstraintViolation {
    match err {
        ResvError::Constraint(violation) => violation,
        other => panic!("expected a constraint violation, got {other:?}"),
    }
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[tokio::test]
async fn test_period_requires_start_before_end() {
    let pool = create_test_pool().await;

    let err = period::create_period(
        &pool,
        &NewPeriod {
            period_id: None,
            start_time: time(10, 0),
            end_time: time(9, 0),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(
        violation(err),
        ConstraintViolation::Check {
            table: "periods",
            constraint: Some("valid_time_range".to_string()),
        }
    );

    let equal = period::create_period(
        &pool,
        &NewPeriod {
            period_id: None,
            start_time: time(9, 0),
            end_time: time(9, 0),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(violation(equal), ConstraintViolation::Check { .. }));
}

#[tokio::test]
async fn test_session_requires_start_before_end() {
    let pool = create_test_pool().await;

    let err = session::create_session(
        &pool,
        &NewSession {
            session_id: None,
            name: "Spring".to_string(),
            start_time: at(12, 0),
            end_time: at(11, 0),
            is_current: false,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(violation(err).table(), "sessions");
}

#[tokio::test]
async fn test_time_slot_ending_before_it_starts_is_rejected() {
    let pool = create_test_pool().await;
    basic_fixture(&pool).await;

    let resv = add_reservation(&pool, "alice", 5).await;
    let err = time_slot::create_time_slot(&pool, &resv.key(), &slot(at(10, 0), at(9, 0)))
        .await
        .unwrap_err();

    assert_eq!(
        violation(err),
        ConstraintViolation::Check {
            table: "time_slots",
            constraint: Some("valid_time_range".to_string()),
        }
    );
    let slots = time_slot::get_time_slots_by_reservation(&pool, &resv.key())
        .await
        .unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_reservation_update_time_cannot_precede_create_time() {
    let pool = create_test_pool().await;
    basic_fixture(&pool).await;
    let resv = add_reservation(&pool, "alice", 5).await;

    let err = sqlx::query(
        "UPDATE reservations SET update_time = $1 WHERE username = $2 AND resv_id = $3",
    )
    .bind(at(7, 0))
    .bind(&resv.username)
    .bind(resv.resv_id)
    .execute(&pool)
    .await
    .unwrap_err();

    assert_eq!(
        violation(classify(err, WriteAction::Update, "reservations")),
        ConstraintViolation::Check {
            table: "reservations",
            constraint: Some("valid_update_time".to_string()),
        }
    );
}

fn new_user(username: &str, name: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        name: name.to_string(),
        password: "secret".to_string(),
        role: role::BASIC,
        email: email.to_string(),
    }
}

#[rstest]
#[case("", "Nobody", "", "valid_username")]
#[case("carol", "", "", "valid_name")]
#[case("carol", "Carol", "not-an-email", "valid_email")]
#[tokio::test]
async fn test_user_checks(
    #[case] username: &str,
    #[case] name: &str,
    #[case] email: &str,
    #[case] constraint: &str,
) {
    let pool = create_test_pool().await;

    let err = user::create_user(&pool, &new_user(username, name, email))
        .await
        .unwrap_err();
    assert_eq!(
        violation(err),
        ConstraintViolation::Check {
            table: "users",
            constraint: Some(constraint.to_string()),
        }
    );
}

#[tokio::test]
async fn test_user_email_may_be_empty() {
    let pool = create_test_pool().await;

    let created = user::create_user(&pool, &new_user("carol", "Carol", ""))
        .await
        .unwrap();
    assert_eq!(created.email, "");
}

#[tokio::test]
async fn test_duplicate_username_is_a_unique_violation() {
    let pool = create_test_pool().await;
    add_user(&pool, "alice").await;

    let err = user::create_user(
        &pool,
        &NewUser {
            username: "alice".to_string(),
            name: "Another Alice".to_string(),
            password: "secret".to_string(),
            role: role::BASIC,
            email: String::new(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(violation(err), ConstraintViolation::Unique { table: "users" });
}

#[tokio::test]
async fn test_user_with_unknown_role_is_rejected() {
    let pool = create_test_pool().await;

    let err = user::create_user(
        &pool,
        &NewUser {
            username: "dave".to_string(),
            name: "Dave".to_string(),
            password: "secret".to_string(),
            role: 99,
            email: String::new(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(violation(err), ConstraintViolation::MissingParent { table: "users" });
}

#[test_log::test(tokio::test)]
async fn test_referenced_role_cannot_be_deleted_but_can_be_rekeyed() {
    let pool = create_test_pool().await;
    add_user(&pool, "alice").await;

    let err = lookup::delete_lookup(&pool, LookupKind::UserRole, role::BASIC)
        .await
        .unwrap_err();
    assert_eq!(
        violation(err),
        ConstraintViolation::RestrictedDelete { table: "user_roles" }
    );

    lookup::rekey_lookup(&pool, LookupKind::UserRole, role::BASIC, 10)
        .await
        .unwrap();
    let alice = user::get_user(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(alice.role, 10);

    // Unreferenced values can go.
    lookup::delete_lookup(&pool, LookupKind::UserRole, role::ADMIN)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_room_with_reservations_cannot_be_deleted() {
    let pool = create_test_pool().await;
    basic_fixture(&pool).await;
    add_reservation(&pool, "alice", 5).await;

    let err = room::delete_room(&pool, 5).await.unwrap_err();
    assert_eq!(violation(err), ConstraintViolation::RestrictedDelete { table: "rooms" });
    assert!(room::get_room(&pool, 5).await.unwrap().is_some());

    add_room(&pool, 6).await;
    room::delete_room(&pool, 6).await.unwrap();
}

#[tokio::test]
async fn test_reservation_with_slots_cannot_be_deleted_until_slots_are_removed() {
    let pool = create_test_pool().await;
    basic_fixture(&pool).await;
    let resv = add_reservation(&pool, "alice", 5).await;
    time_slot::create_time_slot(&pool, &resv.key(), &slot(at(9, 0), at(10, 0)))
        .await
        .unwrap();

    let err = reservation::delete_reservation(&pool, &resv.key())
        .await
        .unwrap_err();
    assert_eq!(
        violation(err),
        ConstraintViolation::RestrictedDelete { table: "reservations" }
    );

    let removed = time_slot::delete_time_slots_by_reservation(&pool, &resv.key())
        .await
        .unwrap();
    assert_eq!(removed, 1);
    reservation::delete_reservation(&pool, &resv.key()).await.unwrap();
    assert!(reservation::get_reservation(&pool, &resv.key()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_renaming_a_user_cascades_to_owned_rows() {
    let pool = create_test_pool().await;
    basic_fixture(&pool).await;
    let resv = add_reservation(&pool, "alice", 5).await;
    time_slot::create_time_slot(&pool, &resv.key(), &slot(at(9, 0), at(10, 0)))
        .await
        .unwrap();
    notice::create_notice(
        &pool,
        "alice",
        &NewNotice {
            title: "Closed".to_string(),
            content: "Room 5 is closed on Friday".to_string(),
        },
    )
    .await
    .unwrap();

    user::rename_user(&pool, "alice", "alicia").await.unwrap();

    let moved = ReservationKey::new("alicia", resv.resv_id);
    assert!(reservation::get_reservation(&pool, &moved).await.unwrap().is_some());
    assert!(reservation::get_reservation(&pool, &resv.key()).await.unwrap().is_none());

    let slots = time_slot::get_time_slots_by_reservation(&pool, &moved).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].username, "alicia");

    let notices = notice::list_notices(&pool, Some("alicia")).await.unwrap();
    assert_eq!(notices.len(), 1);
}

#[tokio::test]
async fn test_user_with_reservations_cannot_be_deleted() {
    let pool = create_test_pool().await;
    basic_fixture(&pool).await;
    add_reservation(&pool, "alice", 5).await;

    let err = user::delete_user(&pool, "alice").await.unwrap_err();
    assert_eq!(violation(err), ConstraintViolation::RestrictedDelete { table: "users" });

    add_user(&pool, "bob").await;
    user::delete_user(&pool, "bob").await.unwrap();
}

#[tokio::test]
async fn test_rekeying_a_room_moves_its_reservations() {
    let pool = create_test_pool().await;
    basic_fixture(&pool).await;
    let resv = add_reservation(&pool, "alice", 5).await;

    room::rekey_room(&pool, 5, 50).await.unwrap();

    let moved = reservation::get_reservation(&pool, &resv.key())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.room_id, 50);
}

#[tokio::test]
async fn test_deleting_missing_rows_is_not_found() {
    let pool = create_test_pool().await;

    assert!(room::delete_room(&pool, 404).await.unwrap_err().is_not_found());
    assert!(user::delete_user(&pool, "ghost").await.unwrap_err().is_not_found());
    assert!(period::delete_period(&pool, 404).await.unwrap_err().is_not_found());
    assert!(
        lookup::delete_lookup(&pool, LookupKind::RoomType, 404)
            .await
            .unwrap_err()
            .is_not_found()
    );
}

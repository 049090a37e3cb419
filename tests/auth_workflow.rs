use tempfile::TempDir;

use vivah_gate::config::AdminSettings;
use vivah_gate::features::admin::types::ModerationDecision;
use vivah_gate::features::admin::AdminService;
use vivah_gate::features::auth::types::RegistrationOutcome;
use vivah_gate::features::auth::AuthService;
use vivah_gate::features::media::ImagePipeline;
use vivah_gate::features::profiles::types::{ProfilePatch, ProfileStatus, ProfileType, Role};
use vivah_gate::features::profiles::ProfileStore;
use vivah_gate::infrastructure::persistence::local::LocalRecordStore;
use vivah_gate::utils::error::Error;

const ADMIN_MOBILE: &str = "9381493260";
const ADMIN_PASSWORD: &str = "9398601984";

struct Harness {
    auth: AuthService,
    admin: AdminService,
    store: ProfileStore,
    _tmp: TempDir,
}

fn harness() -> Harness {
    let tmp = tempfile::tempdir().unwrap();
    let records = LocalRecordStore::new(tmp.path());
    let store = ProfileStore::local_only(records.clone());
    let settings = AdminSettings {
        admin_mobile: ADMIN_MOBILE.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        admin_name: "Admin".to_string(),
    };
    let images = ImagePipeline::disabled();

    Harness {
        auth: AuthService::new(store.clone(), records, settings, images.clone()),
        admin: AdminService::new(store.clone(), images),
        store,
        _tmp: tmp,
    }
}

fn full_patch() -> ProfilePatch {
    ProfilePatch {
        phone: Some("9876501234".into()),
        date_of_birth: Some(chrono::NaiveDate::from_ymd_opt(1995, 4, 12).unwrap()),
        height: Some("5'6\"".into()),
        education: Some("B.Tech".into()),
        occupation: Some("Engineer".into()),
        city: Some("Hyderabad".into()),
        state: Some("Telangana".into()),
        religion: Some("Hindu".into()),
        mother_tongue: Some("Telugu".into()),
        family_type: Some("Nuclear".into()),
        about: Some("I enjoy reading, long walks, cooking for friends and family.".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn fresh_registration_is_pending_and_cannot_log_in() {
    let h = harness();

    let outcome = h
        .auth
        .register("9876543210", "secret1", "Ravi", ProfileType::Groom)
        .await
        .unwrap();
    assert_eq!(outcome, RegistrationOutcome::PendingApproval);

    let stored = h
        .store
        .find_by_identifier("9876543210", None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ProfileStatus::Pending);
    assert!(!stored.is_profile_complete);

    let err = h
        .auth
        .login("9876543210", "secret1", Some(ProfileType::Groom))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PendingApproval));

    // registration never establishes a session
    assert!(h.auth.current_session().await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_mobile_registration_is_rejected() {
    let h = harness();

    h.auth
        .register("9876543210", "secret1", "Ravi", ProfileType::Groom)
        .await
        .unwrap();

    let err = h
        .auth
        .register("9876543210", "other-pass", "Asha", ProfileType::Bride)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateUser));
}

#[tokio::test]
async fn admin_login_is_idempotent_and_yields_one_record() {
    let h = harness();

    for _ in 0..10 {
        let session = h
            .auth
            .login(ADMIN_MOBILE, ADMIN_PASSWORD, None)
            .await
            .unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.status, ProfileStatus::Approved);
    }

    let admins: Vec<_> = h
        .store
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.role == Role::Admin)
        .collect();
    assert_eq!(admins.len(), 1);
    assert!(admins[0].is_profile_complete);
}

#[tokio::test]
async fn admin_record_is_repaired_when_drifted() {
    let h = harness();

    h.auth
        .login(ADMIN_MOBILE, ADMIN_PASSWORD, None)
        .await
        .unwrap();

    // knock the stored record off the admin invariant
    let mut record = h
        .store
        .find_by_identifier(ADMIN_MOBILE, None)
        .await
        .unwrap()
        .unwrap();
    record.status = ProfileStatus::Pending;
    record.is_profile_complete = false;
    h.store.update(&record).await.unwrap();

    let session = h
        .auth
        .login(ADMIN_MOBILE, ADMIN_PASSWORD, None)
        .await
        .unwrap();
    assert_eq!(session.status, ProfileStatus::Approved);
    assert!(session.is_profile_complete);

    let repaired = h
        .store
        .find_by_identifier(ADMIN_MOBILE, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(repaired.role, Role::Admin);
    assert_eq!(repaired.status, ProfileStatus::Approved);
}

#[tokio::test]
async fn approval_unlocks_login_then_profile_completion() {
    let h = harness();

    // register mobile 9876543210 as groom
    h.auth
        .register("9876543210", "secret1", "Ravi", ProfileType::Groom)
        .await
        .unwrap();

    // login before approval
    let err = h
        .auth
        .login("9876543210", "secret1", Some(ProfileType::Groom))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PendingApproval));

    // admin approves
    let pending = h
        .store
        .find_by_identifier("9876543210", None)
        .await
        .unwrap()
        .unwrap();
    h.admin
        .set_status(&pending.id, ModerationDecision::Approved)
        .await
        .unwrap();

    // login now succeeds with an incomplete profile: the caller's next stop
    // is profile completion, not browse
    let session = h
        .auth
        .login("9876543210", "secret1", Some(ProfileType::Groom))
        .await
        .unwrap();
    assert!(!session.is_profile_complete);

    let session = h.auth.update_profile(&session.id, full_patch()).await.unwrap();
    assert!(session.is_profile_complete);

    // the cached session was refreshed too
    let cached = h.auth.current_session().await.unwrap().unwrap();
    assert!(cached.is_profile_complete);
}

#[tokio::test]
async fn rejected_account_cannot_log_in_until_reapproved() {
    let h = harness();

    h.auth
        .register("9123456789", "secret1", "Asha", ProfileType::Bride)
        .await
        .unwrap();
    let record = h
        .store
        .find_by_identifier("9123456789", None)
        .await
        .unwrap()
        .unwrap();

    h.admin
        .set_status(&record.id, ModerationDecision::Rejected)
        .await
        .unwrap();
    let err = h
        .auth
        .login("9123456789", "secret1", Some(ProfileType::Bride))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RejectedAccount));

    // re-approval is permitted
    h.admin
        .set_status(&record.id, ModerationDecision::Approved)
        .await
        .unwrap();
    h.auth
        .login("9123456789", "secret1", Some(ProfileType::Bride))
        .await
        .unwrap();
}

#[tokio::test]
async fn wrong_password_and_wrong_scope_are_invalid_credentials() {
    let h = harness();

    h.auth
        .register("9123456789", "secret1", "Asha", ProfileType::Bride)
        .await
        .unwrap();
    let record = h
        .store
        .find_by_identifier("9123456789", None)
        .await
        .unwrap()
        .unwrap();
    h.admin
        .set_status(&record.id, ModerationDecision::Approved)
        .await
        .unwrap();

    let err = h
        .auth
        .login("9123456789", "wrong", Some(ProfileType::Bride))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));

    // a bride is invisible to a groom-scoped login
    let err = h
        .auth
        .login("9123456789", "secret1", Some(ProfileType::Groom))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
}

#[tokio::test]
async fn logout_clears_the_session_but_not_the_roster() {
    let h = harness();

    h.auth
        .login(ADMIN_MOBILE, ADMIN_PASSWORD, None)
        .await
        .unwrap();
    assert!(h.auth.current_session().await.unwrap().is_some());

    h.auth.logout().await.unwrap();
    assert!(h.auth.current_session().await.unwrap().is_none());

    // the admin record survives
    assert!(h
        .store
        .find_by_identifier(ADMIN_MOBILE, None)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn stale_cached_session_is_discarded() {
    let h = harness();

    h.auth
        .register("9123456789", "secret1", "Asha", ProfileType::Bride)
        .await
        .unwrap();
    let record = h
        .store
        .find_by_identifier("9123456789", None)
        .await
        .unwrap()
        .unwrap();
    h.admin
        .set_status(&record.id, ModerationDecision::Approved)
        .await
        .unwrap();
    h.auth
        .login("9123456789", "secret1", Some(ProfileType::Bride))
        .await
        .unwrap();
    assert!(h.auth.current_session().await.unwrap().is_some());

    // the account disappears underneath the cached session
    h.admin.delete_user(&record.id).await.unwrap();
    assert!(h.auth.current_session().await.unwrap().is_none());
}

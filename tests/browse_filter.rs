use tempfile::TempDir;

use vivah_gate::config::AdminSettings;
use vivah_gate::features::admin::types::ModerationDecision;
use vivah_gate::features::admin::AdminService;
use vivah_gate::features::auth::AuthService;
use vivah_gate::features::browse::types::CandidateFilter;
use vivah_gate::features::browse::BrowseService;
use vivah_gate::features::media::ImagePipeline;
use vivah_gate::features::profiles::types::{ProfilePatch, ProfileType, SessionUser};
use vivah_gate::features::profiles::ProfileStore;
use vivah_gate::infrastructure::persistence::local::LocalRecordStore;
use vivah_gate::utils::error::Error;

struct Harness {
    auth: AuthService,
    admin: AdminService,
    browse: BrowseService,
    store: ProfileStore,
    _tmp: TempDir,
}

fn harness() -> Harness {
    let tmp = tempfile::tempdir().unwrap();
    let records = LocalRecordStore::new(tmp.path());
    let store = ProfileStore::local_only(records.clone());
    let settings = AdminSettings {
        admin_mobile: "9381493260".to_string(),
        admin_password: "9398601984".to_string(),
        admin_name: "Admin".to_string(),
    };
    let images = ImagePipeline::disabled();

    Harness {
        auth: AuthService::new(store.clone(), records, settings, images.clone()),
        admin: AdminService::new(store.clone(), images),
        browse: BrowseService::new(store.clone()),
        store,
        _tmp: tmp,
    }
}

fn patch(city: &str, state: &str, religion: &str, education: &str) -> ProfilePatch {
    ProfilePatch {
        phone: Some("9876501234".into()),
        date_of_birth: Some(chrono::NaiveDate::from_ymd_opt(1996, 1, 20).unwrap()),
        height: Some("5'5\"".into()),
        education: Some(education.into()),
        occupation: Some("Engineer".into()),
        city: Some(city.into()),
        state: Some(state.into()),
        religion: Some(religion.into()),
        mother_tongue: Some("Hindi".into()),
        family_type: Some("Nuclear".into()),
        about: Some("Curious, kind, and always planning the next mountain trip.".into()),
        ..Default::default()
    }
}

/// Register, approve and complete one account, returning its session shape.
async fn seed_user(
    h: &Harness,
    mobile: &str,
    name: &str,
    profile_type: ProfileType,
    city: &str,
    state: &str,
    religion: &str,
    education: &str,
) -> SessionUser {
    h.auth
        .register(mobile, "secret1", name, profile_type)
        .await
        .unwrap();
    let record = h
        .store
        .find_by_identifier(mobile, None)
        .await
        .unwrap()
        .unwrap();
    h.admin
        .set_status(&record.id, ModerationDecision::Approved)
        .await
        .unwrap();
    h.auth
        .update_profile(&record.id, patch(city, state, religion, education))
        .await
        .unwrap()
}

#[tokio::test]
async fn candidates_are_opposite_gender_approved_and_complete_only() {
    let h = harness();

    // the admin record exists and must never surface
    h.auth
        .login("9381493260", "9398601984", None)
        .await
        .unwrap();

    let viewer = seed_user(
        &h,
        "9000000001",
        "Ravi",
        ProfileType::Groom,
        "Pune",
        "Maharashtra",
        "Hindu",
        "B.Tech",
    )
    .await;
    seed_user(
        &h,
        "9000000002",
        "Asha",
        ProfileType::Bride,
        "Mumbai",
        "Maharashtra",
        "Hindu",
        "B.Tech",
    )
    .await;
    seed_user(
        &h,
        "9000000003",
        "Meera",
        ProfileType::Bride,
        "Jaipur",
        "Rajasthan",
        "Jain",
        "MBA",
    )
    .await;
    // same gender as the viewer: must not appear
    seed_user(
        &h,
        "9000000004",
        "Arjun",
        ProfileType::Groom,
        "Delhi",
        "Delhi",
        "Hindu",
        "B.Tech",
    )
    .await;
    // approved but never completed: must not appear
    h.auth
        .register("9000000005", "secret1", "Lata", ProfileType::Bride)
        .await
        .unwrap();
    let incomplete = h
        .store
        .find_by_identifier("9000000005", None)
        .await
        .unwrap()
        .unwrap();
    h.admin
        .set_status(&incomplete.id, ModerationDecision::Approved)
        .await
        .unwrap();

    let candidates = h.browse.list_candidates(&viewer).await.unwrap();
    let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Asha"));
    assert!(names.contains(&"Meera"));

    for candidate in &candidates {
        assert_ne!(candidate.id, viewer.id);
        assert_eq!(candidate.profile_type, ProfileType::Bride);
    }
}

#[tokio::test]
async fn viewer_with_incomplete_profile_is_turned_away() {
    let h = harness();

    h.auth
        .register("9000000001", "secret1", "Ravi", ProfileType::Groom)
        .await
        .unwrap();
    let record = h
        .store
        .find_by_identifier("9000000001", None)
        .await
        .unwrap()
        .unwrap();
    h.admin
        .set_status(&record.id, ModerationDecision::Approved)
        .await
        .unwrap();
    let viewer = h
        .auth
        .login("9000000001", "secret1", Some(ProfileType::Groom))
        .await
        .unwrap();

    let err = h.browse.list_candidates(&viewer).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden));
}

#[tokio::test]
async fn filtering_narrows_and_clearing_restores_exactly() {
    let h = harness();

    let viewer = seed_user(
        &h,
        "9000000001",
        "Ravi",
        ProfileType::Groom,
        "Pune",
        "Maharashtra",
        "Hindu",
        "B.Tech",
    )
    .await;
    for (mobile, name, city, state, religion, education) in [
        ("9000000002", "Asha", "Mumbai", "Maharashtra", "Hindu", "B.Tech"),
        ("9000000003", "Meera", "Jaipur", "Rajasthan", "Jain", "MBA"),
        ("9000000004", "Sara", "Hyderabad", "Telangana", "Muslim", "MBBS"),
    ] {
        seed_user(&h, mobile, name, ProfileType::Bride, city, state, religion, education).await;
    }

    let unfiltered = h.browse.list_candidates(&viewer).await.unwrap();
    assert_eq!(unfiltered.len(), 3);

    // a search narrows to a subset of the unfiltered result
    let search = CandidateFilter {
        search: Some("jaipur".into()),
        ..Default::default()
    };
    let narrowed = search.apply(&unfiltered);
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].name, "Meera");
    assert!(narrowed
        .iter()
        .all(|c| unfiltered.iter().any(|u| u.id == c.id)));

    // facets compose with search
    let composed = CandidateFilter {
        state: Some("Maharashtra".into()),
        religion: Some("Hindu".into()),
        education: Some("B.Tech".into()),
        ..Default::default()
    };
    assert_eq!(composed.apply(&unfiltered).len(), 1);

    // clearing every filter restores the original set exactly
    let cleared = CandidateFilter::default().apply(&unfiltered);
    assert_eq!(
        cleared.iter().map(|c| &c.id).collect::<Vec<_>>(),
        unfiltered.iter().map(|c| &c.id).collect::<Vec<_>>()
    );

    // candidate listing itself is repeatable
    let again = h.browse.list_candidates(&viewer).await.unwrap();
    assert_eq!(
        again.iter().map(|c| &c.id).collect::<Vec<_>>(),
        unfiltered.iter().map(|c| &c.id).collect::<Vec<_>>()
    );
}

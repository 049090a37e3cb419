use anyhow::Context;
use chrono::Utc;
use uuid::Uuid;

use crate::config::AdminSettings;
use crate::features::profiles::types::{Profile, ProfileStatus, ProfileType, Role};
use crate::features::profiles::ProfileStore;
use crate::utils::crypto::hash_password;

/// Provisioning-time bootstrap: make sure the configured admin identity
/// exists in the roster before the first request. Idempotent; the login-time
/// repair path stays as a backstop for drifted records.
pub async fn run(store: &ProfileStore, admin: &AdminSettings) -> anyhow::Result<()> {
    let existing = store
        .find_by_identifier(&admin.admin_mobile, None)
        .await
        .context("admin lookup failed")?;

    if existing.is_some() {
        tracing::info!("Seed skipped: admin record already present.");
        return Ok(());
    }

    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        mobile: admin.admin_mobile.clone(),
        email: admin.admin_mobile.clone(),
        password_hash: hash_password(&admin.admin_password)
            .context("admin password hash failed")?,
        name: admin.admin_name.clone(),
        profile_type: ProfileType::Groom,
        role: Role::Admin,
        status: ProfileStatus::Approved,
        is_profile_complete: true,
        phone: None,
        date_of_birth: None,
        height: None,
        education: None,
        occupation: None,
        salary: None,
        city: None,
        state: None,
        religion: None,
        mother_tongue: None,
        family_type: None,
        about: None,
        profile_image: None,
        profile_images: None,
        created_at: Utc::now(),
        updated_at: None,
        created_by: None,
        created_by_admin: None,
    };

    store
        .insert(&profile)
        .await
        .context("admin record insert failed")?;

    tracing::info!("Seed complete: admin record created.");
    Ok(())
}

use chrono::Utc;
use uuid::Uuid;

use crate::config::AdminSettings;
use crate::features::media::ImagePipeline;
use crate::features::profiles::types::{
    Profile, ProfilePatch, ProfileStatus, ProfileType, Role, SessionUser,
};
use crate::features::profiles::ProfileStore;
use crate::infrastructure::persistence::local::{LocalRecordStore, SESSION_KEY};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::error::{Error, Result};

use super::types::RegistrationOutcome;

/// Login, registration, session and profile completion. All roster access
/// goes through the dual-backend [`ProfileStore`]; the session projection is
/// always cached in the local record store, whichever backend owns the
/// roster write.
#[derive(Clone)]
pub struct AuthService {
    store: ProfileStore,
    records: LocalRecordStore,
    admin: AdminSettings,
    images: ImagePipeline,
}

impl AuthService {
    pub fn new(
        store: ProfileStore,
        records: LocalRecordStore,
        admin: AdminSettings,
        images: ImagePipeline,
    ) -> Self {
        Self {
            store,
            records,
            admin,
            images,
        }
    }

    /// Authenticate and cache the session. A matching admin credential pair
    /// short-circuits every other rule; otherwise the lookup is scoped to
    /// the requested profile type when one is given.
    pub async fn login(
        &self,
        mobile: &str,
        password: &str,
        scope: Option<ProfileType>,
    ) -> Result<SessionUser> {
        if mobile == self.admin.admin_mobile && password == self.admin.admin_password {
            let admin = self.ensure_admin_record().await?;
            let session = SessionUser::from(&admin);
            self.cache_session(&session).await?;
            return Ok(session);
        }

        let profile = self
            .store
            .find_by_identifier(mobile, scope)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !verify_password(&profile.password_hash, password)? {
            return Err(Error::InvalidCredentials);
        }

        if profile.role != Role::Admin {
            match profile.status {
                ProfileStatus::Pending => return Err(Error::PendingApproval),
                ProfileStatus::Rejected => return Err(Error::RejectedAccount),
                ProfileStatus::Approved => {}
            }
        }

        let session = SessionUser::from(&profile);
        self.cache_session(&session).await?;
        Ok(session)
    }

    /// The single admin identity, created on first use and repaired if the
    /// stored record drifted from the admin invariant. Idempotent: repeated
    /// logins leave exactly one admin record.
    async fn ensure_admin_record(&self) -> Result<Profile> {
        match self
            .store
            .find_by_identifier(&self.admin.admin_mobile, None)
            .await?
        {
            Some(mut profile) => {
                let drifted = profile.role != Role::Admin
                    || profile.status != ProfileStatus::Approved
                    || !profile.is_profile_complete
                    || profile.mobile != self.admin.admin_mobile
                    || profile.email != self.admin.admin_mobile
                    || !verify_password(&profile.password_hash, &self.admin.admin_password)
                        .unwrap_or(false);

                if drifted {
                    profile.role = Role::Admin;
                    profile.status = ProfileStatus::Approved;
                    profile.is_profile_complete = true;
                    profile.mobile = self.admin.admin_mobile.clone();
                    profile.email = self.admin.admin_mobile.clone();
                    if !verify_password(&profile.password_hash, &self.admin.admin_password)
                        .unwrap_or(false)
                    {
                        profile.password_hash = hash_password(&self.admin.admin_password)?;
                    }
                    profile.updated_at = Some(Utc::now());
                    self.store.update(&profile).await?;
                }
                Ok(profile)
            }
            None => {
                let profile = self.admin_profile()?;
                self.store.insert(&profile).await?;
                Ok(profile)
            }
        }
    }

    fn admin_profile(&self) -> Result<Profile> {
        Ok(Profile {
            id: Uuid::new_v4().to_string(),
            mobile: self.admin.admin_mobile.clone(),
            email: self.admin.admin_mobile.clone(),
            password_hash: hash_password(&self.admin.admin_password)?,
            name: self.admin.admin_name.clone(),
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
        })
    }

    /// Create a pending account. Never establishes a session: the outcome
    /// tells the caller to wait for admin approval.
    pub async fn register(
        &self,
        mobile: &str,
        password: &str,
        name: &str,
        profile_type: ProfileType,
    ) -> Result<RegistrationOutcome> {
        if self.store.identifier_in_use(mobile).await? {
            return Err(Error::DuplicateUser);
        }

        let profile =
            Profile::new_registration(mobile, hash_password(password)?, name, profile_type);
        self.store.insert(&profile).await?;

        tracing::info!(mobile, "registration staged, awaiting approval");
        Ok(RegistrationOutcome::PendingApproval)
    }

    /// Clears the cached session only; the roster is untouched.
    pub async fn logout(&self) -> Result<()> {
        self.records.remove(SESSION_KEY).await
    }

    /// Load and revalidate the cached session. A record that disappeared or
    /// is no longer allowed to authenticate discards the cache.
    pub async fn current_session(&self) -> Result<Option<SessionUser>> {
        let raw = match self.records.get(SESSION_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let cached: SessionUser = match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(_) => {
                self.records.remove(SESSION_KEY).await?;
                return Ok(None);
            }
        };

        match self.store.find_by_id(&cached.id).await? {
            Some(profile) if profile.can_authenticate() => {
                let refreshed = SessionUser::from(&profile);
                self.cache_session(&refreshed).await?;
                Ok(Some(refreshed))
            }
            _ => {
                self.records.remove(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Merge the patch into the record, marking it complete. Inline images
    /// run through the media pipeline first; image trouble degrades instead
    /// of failing the update.
    pub async fn update_profile(&self, user_id: &str, patch: ProfilePatch) -> Result<SessionUser> {
        let mut profile = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(Error::NotFound)?;

        let mut patch = patch;
        if let Some(image) = &patch.profile_image {
            match self.images.process_inline(image, user_id).await {
                Ok(stored) => patch.profile_image = Some(stored),
                Err(err) => {
                    tracing::warn!(user_id, error = %err, "keeping submitted profile image");
                }
            }
        }
        if let Some(images) = &patch.profile_images {
            match self.images.process_inline_many(images, user_id).await {
                Ok(stored) => patch.profile_images = Some(stored),
                Err(err) => {
                    tracing::warn!(user_id, error = %err, "keeping submitted profile images");
                }
            }
        }

        patch.apply_to(&mut profile);
        self.store.update(&profile).await?;

        // Keep the cached projection in step with the merged record.
        if let Some(cached) = self.current_session().await? {
            if cached.id == profile.id {
                self.cache_session(&SessionUser::from(&profile)).await?;
            }
        }

        Ok(SessionUser::from(&profile))
    }

    async fn cache_session(&self, session: &SessionUser) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.records.set(SESSION_KEY, &raw).await
    }
}

use chrono::Utc;
use uuid::Uuid;

use crate::features::admin::types::{AdminProfileReq, ModerationDecision, UsersByStatus};
use crate::features::media::ImagePipeline;
use crate::features::profiles::types::{
    Profile, ProfileDto, ProfileStatus, Role,
};
use crate::features::profiles::ProfileStore;
use crate::utils::crypto::hash_password;
use crate::utils::error::{Error, Result};

/// Moderation and direct profile management. Only reachable behind an admin
/// session; the routes enforce that.
#[derive(Clone)]
pub struct AdminService {
    store: ProfileStore,
    images: ImagePipeline,
}

impl AdminService {
    pub fn new(store: ProfileStore, images: ImagePipeline) -> Self {
        Self { store, images }
    }

    /// Pure read: the roster partitioned by status, admins excluded.
    pub async fn list_by_status(&self) -> Result<UsersByStatus> {
        let roster = self.store.list().await?;

        let mut pending = Vec::new();
        let mut approved = Vec::new();
        let mut rejected = Vec::new();

        for profile in roster.into_iter().filter(|p| p.role != Role::Admin) {
            let bucket = match profile.status {
                ProfileStatus::Pending => &mut pending,
                ProfileStatus::Approved => &mut approved,
                ProfileStatus::Rejected => &mut rejected,
            };
            bucket.push(ProfileDto::from(profile));
        }

        Ok(UsersByStatus {
            pending,
            approved,
            rejected,
        })
    }

    /// Approve or reject: a direct status mutation, last write wins. Two
    /// moderators deciding the same user in quick succession both succeed
    /// and the later write stands; there is no conflict detection.
    pub async fn set_status(
        &self,
        user_id: &str,
        decision: ModerationDecision,
    ) -> Result<ProfileDto> {
        let profile = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(Error::NotFound)?;

        if profile.role == Role::Admin {
            return Err(Error::Forbidden);
        }

        let next: ProfileStatus = decision.into();
        if profile.status == ProfileStatus::Approved && next != ProfileStatus::Approved {
            tracing::warn!(user_id, "overwriting an approved account's status");
        }

        let updated = self.store.set_status(user_id, next).await?;
        Ok(ProfileDto::from(updated))
    }

    /// Irreversible removal. The confirmation step lives in the caller; once
    /// invoked there is no undo.
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let profile = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(Error::NotFound)?;
        if profile.role == Role::Admin {
            return Err(Error::Forbidden);
        }

        self.store.delete(user_id).await?;
        tracing::info!(user_id, "user deleted by admin");
        Ok(())
    }

    /// Create a complete, already-approved profile on behalf of a user, or
    /// edit an existing one in place when `editing_user_id` is set.
    pub async fn create_profile(
        &self,
        req: AdminProfileReq,
        admin_id: &str,
    ) -> Result<ProfileDto> {
        match req.editing_user_id.clone() {
            Some(user_id) => self.edit_existing(user_id, req, admin_id).await,
            None => self.create_new(req, admin_id).await,
        }
    }

    async fn create_new(&self, req: AdminProfileReq, admin_id: &str) -> Result<ProfileDto> {
        if req.password.len() < 6 {
            return Err(Error::Validation(
                "password must be at least 6 characters".into(),
            ));
        }
        let image = req
            .profile_image
            .as_deref()
            .ok_or_else(|| Error::Validation("profile image is required".into()))?;

        if self.store.identifier_in_use(&req.mobile).await? {
            return Err(Error::DuplicateUser);
        }

        let id = Uuid::new_v4().to_string();
        let stored_image = self.images.process_inline(image, &id).await?;
        let stored_images = match &req.profile_images {
            Some(values) => Some(self.images.process_inline_many(values, &id).await?),
            None => None,
        };

        let profile = Profile {
            id,
            mobile: req.mobile.clone(),
            email: req.mobile.clone(),
            password_hash: hash_password(&req.password)?,
            name: req.name,
            profile_type: req.profile_type,
            role: Role::User,
            // Admin-created accounts skip moderation entirely.
            status: ProfileStatus::Approved,
            is_profile_complete: true,
            phone: Some(req.phone),
            date_of_birth: Some(req.date_of_birth),
            height: Some(req.height),
            education: Some(req.education),
            occupation: Some(req.occupation),
            salary: req.salary,
            city: Some(req.city),
            state: Some(req.state),
            religion: Some(req.religion),
            mother_tongue: Some(req.mother_tongue),
            family_type: Some(req.family_type),
            about: Some(req.about),
            profile_image: Some(stored_image),
            profile_images: stored_images,
            created_at: Utc::now(),
            updated_at: None,
            created_by: Some("admin".to_string()),
            created_by_admin: Some(admin_id.to_string()),
        };

        self.store.insert(&profile).await?;
        Ok(ProfileDto::from(profile))
    }

    async fn edit_existing(
        &self,
        user_id: String,
        req: AdminProfileReq,
        _admin_id: &str,
    ) -> Result<ProfileDto> {
        let mut profile = self
            .store
            .find_by_id(&user_id)
            .await?
            .ok_or(Error::NotFound)?;

        if profile.role == Role::Admin {
            return Err(Error::Forbidden);
        }

        if req.mobile != profile.mobile && self.store.identifier_in_use(&req.mobile).await? {
            return Err(Error::DuplicateUser);
        }

        profile.mobile = req.mobile.clone();
        profile.email = req.mobile;
        profile.name = req.name;
        profile.profile_type = req.profile_type;
        if !req.password.is_empty() {
            profile.password_hash = hash_password(&req.password)?;
        }
        profile.phone = Some(req.phone);
        profile.date_of_birth = Some(req.date_of_birth);
        profile.height = Some(req.height);
        profile.education = Some(req.education);
        profile.occupation = Some(req.occupation);
        if req.salary.is_some() {
            profile.salary = req.salary;
        }
        profile.city = Some(req.city);
        profile.state = Some(req.state);
        profile.religion = Some(req.religion);
        profile.mother_tongue = Some(req.mother_tongue);
        profile.family_type = Some(req.family_type);
        profile.about = Some(req.about);

        if let Some(image) = &req.profile_image {
            profile.profile_image = Some(self.images.process_inline(image, &profile.id).await?);
        }
        if let Some(images) = &req.profile_images {
            profile.profile_images =
                Some(self.images.process_inline_many(images, &profile.id).await?);
        }

        profile.is_profile_complete = true;
        profile.updated_at = Some(Utc::now());

        self.store.update(&profile).await?;
        Ok(ProfileDto::from(profile))
    }
}

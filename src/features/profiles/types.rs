use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "profile_type", rename_all = "lowercase")]
pub enum ProfileType {
    Bride,
    Groom,
}

impl ProfileType {
    /// Brides browse grooms and vice versa.
    pub fn opposite(self) -> Self {
        match self {
            ProfileType::Bride => ProfileType::Groom,
            ProfileType::Groom => ProfileType::Bride,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "profile_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "profile_status", rename_all = "lowercase")]
pub enum ProfileStatus {
    Pending,
    Approved,
    Rejected,
}

/// The central roster record. Field names double as the backing stores'
/// snake_case column names; the camelCase wire types live in the feature
/// `types.rs` files and convert through `From` impls.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: String,
    pub mobile: String,
    /// Legacy alias of `mobile`, kept for records written before the mobile
    /// column existed.
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub profile_type: ProfileType,
    pub role: Role,
    pub status: ProfileStatus,
    pub is_profile_complete: bool,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub height: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub salary: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub religion: Option<String>,
    pub mother_tongue: Option<String>,
    pub family_type: Option<String>,
    pub about: Option<String>,
    pub profile_image: Option<String>,
    pub profile_images: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub created_by_admin: Option<String>,
}

impl Profile {
    /// A fresh self-registration: pending, incomplete, plain user.
    pub fn new_registration(
        mobile: &str,
        password_hash: String,
        name: &str,
        profile_type: ProfileType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mobile: mobile.to_string(),
            email: mobile.to_string(),
            password_hash,
            name: name.to_string(),
            profile_type,
            role: Role::User,
            status: ProfileStatus::Pending,
            is_profile_complete: false,
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
        }
    }

    pub fn can_authenticate(&self) -> bool {
        self.role == Role::Admin || self.status == ProfileStatus::Approved
    }

    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.mobile == identifier || self.email == identifier
    }
}

/// Merge input for profile completion and edits. Unset fields are left
/// untouched; applying a patch always marks the profile complete.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub height: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub salary: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub religion: Option<String>,
    pub mother_tongue: Option<String>,
    pub family_type: Option<String>,
    pub about: Option<String>,
    pub profile_image: Option<String>,
    pub profile_images: Option<Vec<String>>,
}

impl ProfilePatch {
    pub fn apply_to(&self, profile: &mut Profile) {
        fn merge<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
            if source.is_some() {
                *target = source.clone();
            }
        }

        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        merge(&mut profile.phone, &self.phone);
        merge(&mut profile.date_of_birth, &self.date_of_birth);
        merge(&mut profile.height, &self.height);
        merge(&mut profile.education, &self.education);
        merge(&mut profile.occupation, &self.occupation);
        merge(&mut profile.salary, &self.salary);
        merge(&mut profile.city, &self.city);
        merge(&mut profile.state, &self.state);
        merge(&mut profile.religion, &self.religion);
        merge(&mut profile.mother_tongue, &self.mother_tongue);
        merge(&mut profile.family_type, &self.family_type);
        merge(&mut profile.about, &self.about);
        merge(&mut profile.profile_image, &self.profile_image);
        merge(&mut profile.profile_images, &self.profile_images);

        // Completion never reverts once reached.
        profile.is_profile_complete = true;
        profile.updated_at = Some(Utc::now());
    }
}

/// Non-owning cached projection of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub mobile: String,
    pub name: String,
    pub profile_type: ProfileType,
    pub is_profile_complete: bool,
    pub status: ProfileStatus,
    pub role: Role,
}

impl From<&Profile> for SessionUser {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id.clone(),
            email: p.email.clone(),
            mobile: p.mobile.clone(),
            name: p.name.clone(),
            profile_type: p.profile_type,
            is_profile_complete: p.is_profile_complete,
            status: p.status,
            role: p.role,
        }
    }
}

/// Public card shape shared by the admin and browse surfaces. Never carries
/// the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: String,
    pub mobile: String,
    pub email: String,
    pub name: String,
    pub profile_type: ProfileType,
    pub status: ProfileStatus,
    pub is_profile_complete: bool,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub height: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub salary: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub religion: Option<String>,
    pub mother_tongue: Option<String>,
    pub family_type: Option<String>,
    pub about: Option<String>,
    pub profile_image: Option<String>,
    pub profile_images: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Profile> for ProfileDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            mobile: p.mobile,
            email: p.email,
            name: p.name,
            profile_type: p.profile_type,
            status: p.status,
            is_profile_complete: p.is_profile_complete,
            phone: p.phone,
            date_of_birth: p.date_of_birth,
            height: p.height,
            education: p.education,
            occupation: p.occupation,
            salary: p.salary,
            city: p.city,
            state: p.state,
            religion: p.religion,
            mother_tongue: p.mother_tongue,
            family_type: p.family_type,
            about: p.about,
            profile_image: p.profile_image,
            profile_images: p.profile_images,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_swaps_bride_and_groom() {
        assert_eq!(ProfileType::Bride.opposite(), ProfileType::Groom);
        assert_eq!(ProfileType::Groom.opposite(), ProfileType::Bride);
    }

    #[test]
    fn patch_merges_only_set_fields_and_completes() {
        let mut profile = Profile::new_registration(
            "9876543210",
            "$argon2$hash".into(),
            "Asha",
            ProfileType::Bride,
        );
        profile.city = Some("Mumbai".into());
        assert!(!profile.is_profile_complete);

        let patch = ProfilePatch {
            education: Some("B.Tech".into()),
            ..Default::default()
        };
        patch.apply_to(&mut profile);

        assert_eq!(profile.education.as_deref(), Some("B.Tech"));
        assert_eq!(profile.city.as_deref(), Some("Mumbai"));
        assert!(profile.is_profile_complete);
        assert!(profile.updated_at.is_some());
    }

    #[test]
    fn session_projection_drops_credentials() {
        let profile = Profile::new_registration(
            "9876543210",
            "$argon2$hash".into(),
            "Ravi",
            ProfileType::Groom,
        );
        let session = SessionUser::from(&profile);
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("profileType"));
    }
}

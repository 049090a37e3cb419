use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::types::validate_mobile;
use crate::features::profiles::types::{ProfileDto, ProfileStatus, ProfileType};

/// The roster partitioned for the moderation dashboard. Admin records are
/// never listed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsersByStatus {
    pub pending: Vec<ProfileDto>,
    pub approved: Vec<ProfileDto>,
    pub rejected: Vec<ProfileDto>,
}

/// Moderation can only approve or reject; there is no way back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModerationDecision {
    Approved,
    Rejected,
}

impl From<ModerationDecision> for ProfileStatus {
    fn from(decision: ModerationDecision) -> Self {
        match decision {
            ModerationDecision::Approved => ProfileStatus::Approved,
            ModerationDecision::Rejected => ProfileStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusReq {
    pub status: ModerationDecision,
}

/// Admin-side profile creation form. With `editing_user_id` set this edits
/// the record in place: a blank password keeps the current one and a missing
/// image keeps the stored one.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfileReq {
    pub editing_user_id: Option<String>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = validate_mobile))]
    pub mobile: String,
    /// Required for new profiles; blank on edit means keep current.
    #[serde(default)]
    pub password: String,
    pub profile_type: ProfileType,
    #[validate(length(min = 10, message = "valid phone number is required"))]
    pub phone: String,
    pub date_of_birth: chrono::NaiveDate,
    #[validate(length(min = 1, message = "height is required"))]
    pub height: String,
    #[validate(length(min = 1, message = "education is required"))]
    pub education: String,
    #[validate(length(min = 1, message = "occupation is required"))]
    pub occupation: String,
    pub salary: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "religion is required"))]
    pub religion: String,
    #[validate(length(min = 1, message = "mother tongue is required"))]
    pub mother_tongue: String,
    #[validate(length(min = 1, message = "family type is required"))]
    pub family_type: String,
    #[validate(length(min = 50, message = "please write at least 50 characters about the person"))]
    pub about: String,
    pub profile_image: Option<String>,
    pub profile_images: Option<Vec<String>>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::profiles::types::ProfileType;

/// 10 digits, first one 6-9.
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    let valid = mobile.len() == 10
        && mobile.chars().all(|c| c.is_ascii_digit())
        && matches!(mobile.as_bytes()[0], b'6'..=b'9');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("mobile")
            .with_message("mobile number must start with 6, 7, 8, or 9 and be 10 digits".into()))
    }
}

/// What the login form's "I am a" selector sends. `None` is the admin path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoginScope {
    Bride,
    Groom,
    None,
}

impl LoginScope {
    pub fn as_profile_type(self) -> Option<ProfileType> {
        match self {
            LoginScope::Bride => Some(ProfileType::Bride),
            LoginScope::Groom => Some(ProfileType::Groom),
            LoginScope::None => None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginReq {
    #[validate(custom(function = validate_mobile))]
    pub mobile: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default = "default_scope")]
    pub user_type: LoginScope,
}

fn default_scope() -> LoginScope {
    LoginScope::None
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = validate_mobile))]
    pub mobile: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub confirm_password: String,
    pub profile_type: ProfileType,
}

/// Profile completion form. Every field is required by the form; the about
/// text has the conventional 50-character floor.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileReq {
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
    #[validate(length(min = 50, message = "please write at least 50 characters about yourself"))]
    pub about: String,
    pub profile_image: Option<String>,
    pub profile_images: Option<Vec<String>>,
}

/// Distinct success outcome of a registration: the account exists but needs
/// admin approval before any session can be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    PendingApproval,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResp {
    pub status: String,
    pub message: String,
}

impl From<RegistrationOutcome> for RegisterResp {
    fn from(_: RegistrationOutcome) -> Self {
        Self {
            status: "pendingApproval".to_string(),
            message: "registration successful, your account is awaiting admin approval"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_rule_matches_the_form() {
        assert!(validate_mobile("9876543210").is_ok());
        assert!(validate_mobile("6123456789").is_ok());
        assert!(validate_mobile("5876543210").is_err()); // bad first digit
        assert!(validate_mobile("987654321").is_err()); // too short
        assert!(validate_mobile("98765432100").is_err()); // too long
        assert!(validate_mobile("98765abc10").is_err()); // not digits
    }

    #[test]
    fn login_scope_maps_to_profile_type() {
        assert_eq!(
            LoginScope::Bride.as_profile_type(),
            Some(ProfileType::Bride)
        );
        assert_eq!(
            LoginScope::Groom.as_profile_type(),
            Some(ProfileType::Groom)
        );
        assert_eq!(LoginScope::None.as_profile_type(), None);
    }
}

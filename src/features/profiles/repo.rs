use async_trait::async_trait;

use crate::features::profiles::types::{Profile, ProfileStatus, ProfileType};
use crate::utils::error::Result;

/// The one seam both backends implement. Callers never touch a table or a
/// storage key directly; the workflow services only see this interface (or
/// the fallback wrapper over it).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>>;

    /// Look up by mobile number or the legacy email alias. A scope restricts
    /// the search to records of that profile type (partition plus staged
    /// rows); without one, every record is searched.
    async fn find_by_identifier(
        &self,
        identifier: &str,
        scope: Option<ProfileType>,
    ) -> Result<Option<Profile>>;

    async fn insert(&self, profile: &Profile) -> Result<()>;

    /// Whole-record replacement, last write wins.
    async fn update(&self, profile: &Profile) -> Result<()>;

    /// Status mutation with an `updated_at` stamp. Returns the stored record.
    async fn set_status(&self, id: &str, status: ProfileStatus) -> Result<Profile>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn list(&self) -> Result<Vec<Profile>>;

    async fn list_by_status(&self, status: ProfileStatus) -> Result<Vec<Profile>>;
}

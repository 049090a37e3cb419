use crate::features::browse::types::CandidateDto;
use crate::features::profiles::types::{ProfileStatus, Role, SessionUser};
use crate::features::profiles::ProfileStore;
use crate::utils::error::{Error, Result};

/// Opposite-gender discovery over the approved roster.
#[derive(Clone)]
pub struct BrowseService {
    store: ProfileStore,
}

impl BrowseService {
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    /// Approved, complete, opposite-type profiles; never the viewer, never
    /// an admin. The viewer must have completed their own profile first.
    pub async fn list_candidates(&self, viewer: &SessionUser) -> Result<Vec<CandidateDto>> {
        if !viewer.is_profile_complete {
            return Err(Error::Forbidden);
        }

        let wanted = viewer.profile_type.opposite();
        let candidates = self
            .store
            .list_by_status(ProfileStatus::Approved)
            .await?
            .into_iter()
            .filter(|p| {
                p.role != Role::Admin
                    && p.is_profile_complete
                    && p.profile_type == wanted
                    && p.id != viewer.id
            })
            .map(CandidateDto::from)
            .collect();

        Ok(candidates)
    }
}

use async_trait::async_trait;
use chrono::Utc;

use crate::features::profiles::repo::ProfileRepository;
use crate::features::profiles::types::{Profile, ProfileStatus, ProfileType};
use crate::infrastructure::persistence::local::{LocalRecordStore, ROSTER_KEY};
use crate::utils::error::{Error, Result};

/// Fallback backend: the whole roster lives under one key as a JSON array,
/// loaded and written wholesale. No partitions here; scoping is a filter.
#[derive(Debug, Clone)]
pub struct LocalProfileRepository {
    store: LocalRecordStore,
}

impl LocalProfileRepository {
    pub fn new(store: LocalRecordStore) -> Self {
        Self { store }
    }

    async fn load_roster(&self) -> Result<Vec<Profile>> {
        match self.store.get(ROSTER_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_roster(&self, roster: &[Profile]) -> Result<()> {
        let raw = serde_json::to_string(roster)?;
        self.store.set(ROSTER_KEY, &raw).await
    }
}

#[async_trait]
impl ProfileRepository for LocalProfileRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>> {
        let roster = self.load_roster().await?;
        Ok(roster.into_iter().find(|p| p.id == id))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
        scope: Option<ProfileType>,
    ) -> Result<Option<Profile>> {
        let roster = self.load_roster().await?;
        Ok(roster.into_iter().find(|p| {
            p.matches_identifier(identifier)
                && scope.map_or(true, |profile_type| p.profile_type == profile_type)
        }))
    }

    async fn insert(&self, profile: &Profile) -> Result<()> {
        let mut roster = self.load_roster().await?;
        if roster.iter().any(|p| p.matches_identifier(&profile.mobile)) {
            return Err(Error::DuplicateUser);
        }
        roster.push(profile.clone());
        self.save_roster(&roster).await
    }

    async fn update(&self, profile: &Profile) -> Result<()> {
        let mut roster = self.load_roster().await?;
        let slot = roster
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or(Error::NotFound)?;
        *slot = profile.clone();
        self.save_roster(&roster).await
    }

    async fn set_status(&self, id: &str, status: ProfileStatus) -> Result<Profile> {
        let mut roster = self.load_roster().await?;
        let slot = roster
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::NotFound)?;
        slot.status = status;
        slot.updated_at = Some(Utc::now());
        let updated = slot.clone();
        self.save_roster(&roster).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut roster = self.load_roster().await?;
        let before = roster.len();
        roster.retain(|p| p.id != id);
        if roster.len() == before {
            return Err(Error::NotFound);
        }
        self.save_roster(&roster).await
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        self.load_roster().await
    }

    async fn list_by_status(&self, status: ProfileStatus) -> Result<Vec<Profile>> {
        let roster = self.load_roster().await?;
        Ok(roster.into_iter().filter(|p| p.status == status).collect())
    }
}

use std::future::Future;

use crate::features::profiles::local::LocalProfileRepository;
use crate::features::profiles::pg::PgProfileRepository;
use crate::features::profiles::repo::ProfileRepository;
use crate::features::profiles::types::{Profile, ProfileStatus, ProfileType};
use crate::infrastructure::persistence::local::LocalRecordStore;
use crate::utils::error::Result;

/// Dual-backend facade. Every operation runs against the remote profile
/// store first; infrastructure failures are logged and the same operation is
/// retried against the local record store. Business-rule failures propagate
/// verbatim and never fall back. Without a configured remote the local store
/// is authoritative.
///
/// At most one backend takes the authoritative write of a logical operation.
/// The two stores are not reconciled afterwards; divergence across
/// operations is accepted (see DESIGN.md).
#[derive(Clone)]
pub struct ProfileStore {
    remote: Option<PgProfileRepository>,
    local: LocalProfileRepository,
}

impl ProfileStore {
    pub fn new(remote: Option<PgProfileRepository>, local_records: LocalRecordStore) -> Self {
        Self {
            remote,
            local: LocalProfileRepository::new(local_records),
        }
    }

    pub fn local_only(local_records: LocalRecordStore) -> Self {
        Self::new(None, local_records)
    }

    /// The fallback discipline, written once. `local` is only awaited when
    /// the remote attempt fails with something other than a business rule.
    async fn attempt<T>(
        op: &'static str,
        remote: impl Future<Output = Result<T>>,
        local: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match remote.await {
            Ok(value) => Ok(value),
            Err(err) if err.is_business_rule() => Err(err),
            Err(err) => {
                tracing::warn!(
                    operation = op,
                    error = %err,
                    "remote profile store failed, retrying against local records"
                );
                local.await
            }
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Profile>> {
        match &self.remote {
            Some(remote) => {
                Self::attempt("find_by_id", remote.find_by_id(id), self.local.find_by_id(id))
                    .await
            }
            None => self.local.find_by_id(id).await,
        }
    }

    pub async fn find_by_identifier(
        &self,
        identifier: &str,
        scope: Option<ProfileType>,
    ) -> Result<Option<Profile>> {
        match &self.remote {
            Some(remote) => {
                Self::attempt(
                    "find_by_identifier",
                    remote.find_by_identifier(identifier, scope),
                    self.local.find_by_identifier(identifier, scope),
                )
                .await
            }
            None => self.local.find_by_identifier(identifier, scope).await,
        }
    }

    /// Duplicate detection consults both backends: a record created locally
    /// during a remote outage still blocks re-registration of its mobile.
    pub async fn identifier_in_use(&self, identifier: &str) -> Result<bool> {
        if let Some(remote) = &self.remote {
            match remote.find_by_identifier(identifier, None).await {
                Ok(Some(_)) => return Ok(true),
                Ok(None) => {}
                Err(err) if err.is_business_rule() => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        operation = "identifier_in_use",
                        error = %err,
                        "remote profile store failed, local records decide"
                    );
                }
            }
        }
        Ok(self
            .local
            .find_by_identifier(identifier, None)
            .await?
            .is_some())
    }

    pub async fn insert(&self, profile: &Profile) -> Result<()> {
        match &self.remote {
            Some(remote) => {
                Self::attempt("insert", remote.insert(profile), self.local.insert(profile))
                    .await
            }
            None => self.local.insert(profile).await,
        }
    }

    pub async fn update(&self, profile: &Profile) -> Result<()> {
        match &self.remote {
            Some(remote) => {
                Self::attempt("update", remote.update(profile), self.local.update(profile))
                    .await
            }
            None => self.local.update(profile).await,
        }
    }

    pub async fn set_status(&self, id: &str, status: ProfileStatus) -> Result<Profile> {
        match &self.remote {
            Some(remote) => {
                Self::attempt(
                    "set_status",
                    remote.set_status(id, status),
                    self.local.set_status(id, status),
                )
                .await
            }
            None => self.local.set_status(id, status).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        match &self.remote {
            Some(remote) => {
                Self::attempt("delete", remote.delete(id), self.local.delete(id)).await
            }
            None => self.local.delete(id).await,
        }
    }

    pub async fn list(&self) -> Result<Vec<Profile>> {
        match &self.remote {
            Some(remote) => Self::attempt("list", remote.list(), self.local.list()).await,
            None => self.local.list().await,
        }
    }

    pub async fn list_by_status(&self, status: ProfileStatus) -> Result<Vec<Profile>> {
        match &self.remote {
            Some(remote) => {
                Self::attempt(
                    "list_by_status",
                    remote.list_by_status(status),
                    self.local.list_by_status(status),
                )
                .await
            }
            None => self.local.list_by_status(status).await,
        }
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Executor, PgPool, Postgres};

use crate::features::profiles::repo::ProfileRepository;
use crate::features::profiles::types::{Profile, ProfileStatus, ProfileType, Role};
use crate::utils::error::{Error, Result};

/// Registration staging plus the admin account and legacy generic lookups.
const USERS_TABLE: &str = "users";
/// Authoritative post-approval partitions.
const BRIDES_TABLE: &str = "brides";
const GROOMS_TABLE: &str = "grooms";

const ALL_TABLES: [&str; 3] = [USERS_TABLE, BRIDES_TABLE, GROOMS_TABLE];

const COLUMNS: &str = "id, mobile, email, password_hash, name, profile_type, role, status, \
     is_profile_complete, phone, date_of_birth, height, education, occupation, salary, \
     city, state, religion, mother_tongue, family_type, about, profile_image, \
     profile_images, created_at, updated_at, created_by, created_by_admin";

fn partition_for(profile_type: ProfileType) -> &'static str {
    match profile_type {
        ProfileType::Bride => BRIDES_TABLE,
        ProfileType::Groom => GROOMS_TABLE,
    }
}

/// Where a record belongs: approved non-admin records live in their
/// partition; everything else (admin, pending, rejected) stays staged.
fn home_table(profile: &Profile) -> &'static str {
    if profile.role == Role::Admin || profile.status != ProfileStatus::Approved {
        USERS_TABLE
    } else {
        partition_for(profile.profile_type)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

fn bind_profile<'q>(
    query: Query<'q, Postgres, PgArguments>,
    p: &'q Profile,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(&p.id)
        .bind(&p.mobile)
        .bind(&p.email)
        .bind(&p.password_hash)
        .bind(&p.name)
        .bind(p.profile_type)
        .bind(p.role)
        .bind(p.status)
        .bind(p.is_profile_complete)
        .bind(&p.phone)
        .bind(p.date_of_birth)
        .bind(&p.height)
        .bind(&p.education)
        .bind(&p.occupation)
        .bind(&p.salary)
        .bind(&p.city)
        .bind(&p.state)
        .bind(&p.religion)
        .bind(&p.mother_tongue)
        .bind(&p.family_type)
        .bind(&p.about)
        .bind(&p.profile_image)
        .bind(&p.profile_images)
        .bind(p.created_at)
        .bind(p.updated_at)
        .bind(&p.created_by)
        .bind(&p.created_by_admin)
}

fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {table} ({COLUMNS}) VALUES \
         ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
          $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)"
    )
}

fn update_sql(table: &str) -> String {
    format!(
        "UPDATE {table} SET mobile = $2, email = $3, password_hash = $4, name = $5, \
         profile_type = $6, role = $7, status = $8, is_profile_complete = $9, \
         phone = $10, date_of_birth = $11, height = $12, education = $13, \
         occupation = $14, salary = $15, city = $16, state = $17, religion = $18, \
         mother_tongue = $19, family_type = $20, about = $21, profile_image = $22, \
         profile_images = $23, created_at = $24, updated_at = $25, created_by = $26, \
         created_by_admin = $27 WHERE id = $1"
    )
}

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_into<'e, E>(&self, executor: E, table: &str, profile: &Profile) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = bind_profile(sqlx::query(&insert_sql(table)), profile)
            .execute(executor)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(Error::DuplicateUser),
            Err(err) => Err(err.into()),
        }
    }

    /// Find the table currently holding `id`, together with the record.
    async fn locate(&self, id: &str) -> Result<Option<(&'static str, Profile)>> {
        for table in ALL_TABLES {
            let found = sqlx::query_as::<_, Profile>(&format!(
                "SELECT {COLUMNS} FROM {table} WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            if let Some(profile) = found {
                return Ok(Some((table, profile)));
            }
        }
        Ok(None)
    }

    async fn find_in_table(
        &self,
        table: &str,
        identifier: &str,
        scope: Option<ProfileType>,
    ) -> Result<Option<Profile>> {
        let profile = match scope {
            Some(profile_type) => {
                sqlx::query_as::<_, Profile>(&format!(
                    "SELECT {COLUMNS} FROM {table} \
                     WHERE (mobile = $1 OR email = $1) AND profile_type = $2"
                ))
                .bind(identifier)
                .bind(profile_type)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Profile>(&format!(
                    "SELECT {COLUMNS} FROM {table} WHERE mobile = $1 OR email = $1"
                ))
                .bind(identifier)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(profile)
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self.locate(id).await?.map(|(_, profile)| profile))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
        scope: Option<ProfileType>,
    ) -> Result<Option<Profile>> {
        // Scoped: partition first, then matching staged rows, so a pending
        // bride is still visible to a bride-scoped login.
        let tables: Vec<&'static str> = match scope {
            Some(profile_type) => vec![partition_for(profile_type), USERS_TABLE],
            None => ALL_TABLES.to_vec(),
        };

        for table in tables {
            if let Some(profile) = self.find_in_table(table, identifier, scope).await? {
                return Ok(Some(profile));
            }
        }
        Ok(None)
    }

    async fn insert(&self, profile: &Profile) -> Result<()> {
        self.insert_into(&self.pool, home_table(profile), profile)
            .await
    }

    async fn update(&self, profile: &Profile) -> Result<()> {
        let (table, _) = self.locate(&profile.id).await?.ok_or(Error::NotFound)?;
        bind_profile(sqlx::query(&update_sql(table)), profile)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_status(&self, id: &str, status: ProfileStatus) -> Result<Profile> {
        let (table, mut profile) = self.locate(id).await?.ok_or(Error::NotFound)?;
        profile.status = status;
        profile.updated_at = Some(Utc::now());

        let target = home_table(&profile);
        if target == table {
            bind_profile(sqlx::query(&update_sql(table)), &profile)
                .execute(&self.pool)
                .await?;
        } else {
            // Promotion into the authoritative partition: one transaction,
            // one logical write.
            let mut tx = self.pool.begin().await.map_err(Error::from)?;
            self.insert_into(&mut *tx, target, &profile).await?;
            sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await.map_err(Error::from)?;
        }

        Ok(profile)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let (table, _) = self.locate(id).await?.ok_or(Error::NotFound)?;
        sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        let mut roster = Vec::new();
        for table in ALL_TABLES {
            let mut rows =
                sqlx::query_as::<_, Profile>(&format!("SELECT {COLUMNS} FROM {table}"))
                    .fetch_all(&self.pool)
                    .await?;
            roster.append(&mut rows);
        }
        roster.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(roster)
    }

    async fn list_by_status(&self, status: ProfileStatus) -> Result<Vec<Profile>> {
        let mut roster = Vec::new();
        for table in ALL_TABLES {
            let mut rows = sqlx::query_as::<_, Profile>(&format!(
                "SELECT {COLUMNS} FROM {table} WHERE status = $1"
            ))
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
            roster.append(&mut rows);
        }
        roster.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(roster)
    }
}

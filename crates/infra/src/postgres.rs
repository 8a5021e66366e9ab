//! Postgres-backed stores.
//!
//! Both stores share one connection pool and run plain parameterized
//! queries. Optional filter predicates use the `($n IS NULL OR col = $n)`
//! pattern so every listing is a single prepared statement.
//!
//! SQLx errors surface as [`StoreError::Unavailable`] with the failing
//! operation named; rows that cannot be mapped back into domain values
//! surface as [`StoreError::Decode`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgRow, FromRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use fieldintel_auth::{Role, RoleCode, User, UserUpdate};
use fieldintel_core::{InformationId, UserId};
use fieldintel_informations::{DatePredicate, Information, InformationFilter};

use crate::store::{InformationStore, OwnedInformation, StoreError, UserStore};

/// Create the tables and indexes if they do not exist yet. Run once at
/// startup, before the first request.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            access_code TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL CHECK (role IN ('A', 'D', 'R')),
            view TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            CHECK ((role = 'R') = (view IS NOT NULL))
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS informations (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL,
            type_bu TEXT NOT NULL,
            type_info TEXT NOT NULL,
            lab TEXT,
            competitor_product TEXT,
            info_date DATE NOT NULL,
            comment TEXT,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_informations_created_at ON informations (created_at DESC)",
        "CREATE INDEX IF NOT EXISTS idx_informations_user_id ON informations (user_id)",
        "CREATE INDEX IF NOT EXISTS idx_informations_type_bu ON informations (type_bu)",
        "CREATE INDEX IF NOT EXISTS idx_informations_info_date ON informations (info_date)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// Postgres-backed user store.
///
/// Uniqueness of email and access code is also enforced by the schema; the
/// handlers probe with [`UserStore::email_taken`] first so a constraint trip
/// here only happens on a lost race and surfaces as `Unavailable`.
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: Arc<PgPool>,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, access_code, role, view, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.map(decode_user).transpose()
    }

    #[instrument(skip(self, access_code), fields(email = %email), err)]
    async fn find_by_credentials(
        &self,
        email: &str,
        access_code: &str,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, access_code, role, view, created_at
            FROM users
            WHERE email = $1 AND access_code = $2
            "#,
        )
        .bind(email)
        .bind(access_code)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_credentials", e))?;

        row.map(decode_user).transpose()
    }

    #[instrument(skip(self), err)]
    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<UserId>,
    ) -> Result<bool, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            ) AS taken
            "#,
        )
        .bind(email)
        .bind(excluding.map(|id| *id.as_uuid()))
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("email_taken", e))?;

        row.try_get("taken")
            .map_err(|e| StoreError::Decode(format!("failed to read taken flag: {e}")))
    }

    #[instrument(skip(self, access_code), err)]
    async fn access_code_taken(
        &self,
        access_code: &str,
        excluding: Option<UserId>,
    ) -> Result<bool, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE access_code = $1 AND ($2::uuid IS NULL OR id <> $2)
            ) AS taken
            "#,
        )
        .bind(access_code)
        .bind(excluding.map(|id| *id.as_uuid()))
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("access_code_taken", e))?;

        row.try_get("taken")
            .map_err(|e| StoreError::Decode(format!("failed to read taken flag: {e}")))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id), err)]
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, access_code, role, view, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.access_code)
        .bind(user.role.code().as_str())
        .bind(user.role.view())
        .bind(user.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_user", e))?;

        Ok(())
    }

    #[instrument(skip(self, update), err)]
    async fn update(&self, id: UserId, update: &UserUpdate) -> Result<(), StoreError> {
        // Role and view always carry the resulting state; the view column is
        // overwritten (with NULL for unrestricted roles) on every update.
        sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                access_code = COALESCE($3, access_code),
                role = $4,
                view = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.email.as_deref())
        .bind(update.access_code.as_deref())
        .bind(update.role.code().as_str())
        .bind(update.role.view())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_user", e))?;

        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_user", e))?;

        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, access_code, role, view, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_users", e))?;

        rows.into_iter().map(decode_user).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Informations
// ─────────────────────────────────────────────────────────────────────────────

/// Postgres-backed information store.
#[derive(Debug, Clone)]
pub struct PostgresInformationStore {
    pool: Arc<PgPool>,
}

impl PostgresInformationStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl InformationStore for PostgresInformationStore {
    #[instrument(skip(self, info), fields(information_id = %info.id), err)]
    async fn insert(&self, info: &Information) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO informations (
                id, user_id, type_bu, type_info, lab,
                competitor_product, info_date, comment, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(info.id.as_uuid())
        .bind(info.user_id.as_uuid())
        .bind(&info.type_bu)
        .bind(&info.type_info)
        .bind(info.lab.as_deref())
        .bind(info.competitor_product.as_deref())
        .bind(info.info_date)
        .bind(info.comment.as_deref())
        .bind(info.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_information", e))?;

        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list(&self, filter: &InformationFilter) -> Result<Vec<Information>, StoreError> {
        let binds = FilterBinds::from(filter);

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, type_bu, type_info, lab,
                   competitor_product, info_date, comment, created_at
            FROM informations
            WHERE ($1::uuid IS NULL OR user_id = $1)
                AND ($2::text[] IS NULL OR type_bu = ANY($2))
                AND ($3::text IS NULL OR type_info = $3)
                AND ($4::date IS NULL OR info_date = $4)
                AND ($5::date IS NULL OR info_date >= $5)
                AND ($6::date IS NULL OR info_date <= $6)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(binds.owner)
        .bind(&binds.units)
        .bind(&binds.type_info)
        .bind(binds.on)
        .bind(binds.from)
        .bind(binds.to)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_informations", e))?;

        let mut informations = Vec::with_capacity(rows.len());
        for row in rows {
            let decoded = InformationRow::from_row(&row)
                .map_err(|e| StoreError::Decode(format!("failed to read information row: {e}")))?;
            informations.push(decoded.into());
        }
        Ok(informations)
    }

    #[instrument(skip(self), err)]
    async fn list_with_owner(
        &self,
        filter: &InformationFilter,
    ) -> Result<Vec<OwnedInformation>, StoreError> {
        let binds = FilterBinds::from(filter);

        // LEFT JOIN: records outlive their owning account, so the email can
        // come back NULL.
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.user_id, i.type_bu, i.type_info, i.lab,
                   i.competitor_product, i.info_date, i.comment, i.created_at,
                   u.email AS owner_email
            FROM informations i
            LEFT JOIN users u ON u.id = i.user_id
            WHERE ($1::uuid IS NULL OR i.user_id = $1)
                AND ($2::text[] IS NULL OR i.type_bu = ANY($2))
                AND ($3::text IS NULL OR i.type_info = $3)
                AND ($4::date IS NULL OR i.info_date = $4)
                AND ($5::date IS NULL OR i.info_date >= $5)
                AND ($6::date IS NULL OR i.info_date <= $6)
            ORDER BY i.created_at DESC, i.id DESC
            "#,
        )
        .bind(binds.owner)
        .bind(&binds.units)
        .bind(&binds.type_info)
        .bind(binds.on)
        .bind(binds.from)
        .bind(binds.to)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_informations_with_owner", e))?;

        let mut informations = Vec::with_capacity(rows.len());
        for row in rows {
            let decoded = InformationRow::from_row(&row)
                .map_err(|e| StoreError::Decode(format!("failed to read information row: {e}")))?;
            let owner_email: Option<String> = row
                .try_get("owner_email")
                .map_err(|e| StoreError::Decode(format!("failed to read owner_email: {e}")))?;
            informations.push(OwnedInformation {
                info: decoded.into(),
                owner_email,
            });
        }
        Ok(informations)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row mapping and error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Bind values derived from an [`InformationFilter`]; `NULL` disables the
/// corresponding predicate in the query.
struct FilterBinds {
    owner: Option<Uuid>,
    units: Option<Vec<String>>,
    type_info: Option<String>,
    on: Option<NaiveDate>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl From<&InformationFilter> for FilterBinds {
    fn from(filter: &InformationFilter) -> Self {
        let (on, from, to) = match filter.date {
            Some(DatePredicate::On(day)) => (Some(day), None, None),
            Some(DatePredicate::Between { from, to }) => (None, Some(from), Some(to)),
            None => (None, None, None),
        };
        Self {
            owner: filter.owner.map(|id| *id.as_uuid()),
            units: filter.business_units.clone(),
            type_info: filter.type_info.clone(),
            on,
            from,
            to,
        }
    }
}

fn decode_user(row: PgRow) -> Result<User, StoreError> {
    let decoded = UserRow::from_row(&row)
        .map_err(|e| StoreError::Decode(format!("failed to read user row: {e}")))?;
    decoded.try_into()
}

#[derive(Debug)]
struct UserRow {
    id: Uuid,
    email: String,
    access_code: String,
    role: String,
    view: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserRow {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            access_code: row.try_get("access_code")?,
            role: row.try_get("role")?,
            view: row.try_get("view")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, StoreError> {
        let code = RoleCode::parse(&row.role)
            .map_err(|_| StoreError::Decode(format!("unknown role code {:?}", row.role)))?;
        let role = Role::from_parts(code, row.view.as_deref()).map_err(|e| {
            StoreError::Decode(format!("role/view mismatch for user {}: {e}", row.id))
        })?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            access_code: row.access_code,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug)]
struct InformationRow {
    id: Uuid,
    user_id: Uuid,
    type_bu: String,
    type_info: String,
    lab: Option<String>,
    competitor_product: Option<String>,
    info_date: NaiveDate,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for InformationRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(InformationRow {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            type_bu: row.try_get("type_bu")?,
            type_info: row.try_get("type_info")?,
            lab: row.try_get("lab")?,
            competitor_product: row.try_get("competitor_product")?,
            info_date: row.try_get("info_date")?,
            comment: row.try_get("comment")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<InformationRow> for Information {
    fn from(row: InformationRow) -> Self {
        Information {
            id: InformationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            type_bu: row.type_bu,
            type_info: row.type_info,
            lab: row.lab,
            competitor_product: row.competitor_product,
            info_date: row.info_date,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

/// Map SQLx errors to [`StoreError`], naming the failing operation.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Unavailable(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::RowNotFound => {
            StoreError::Unavailable(format!("unexpected row not found in {operation}"))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {operation}: {err}")),
    }
}

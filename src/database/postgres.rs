use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgArguments, FromRow, PgPool, Row};
use std::time::{Duration, Instant};

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseManager;
use crate::database::models::{ContentRow, Global, Site};
use crate::database::store::{ContentStore, StoreError};
use crate::filter::{Filter, FilterOrderInfo, OrderTarget, SortDirection, SqlResult};
use crate::types::{ContentQuery, DocumentPage, SiteId, SortSpec, StatusFilter};

const CONTENT_COLUMNS: [&str; 7] = ["id", "site_id", "slug", "status", "created_at", "updated_at", "fields"];

/// `ContentStore` over the shared PostgreSQL database.
///
/// Expected layout (provisioned by the admin side):
/// - `sites(id, slug, name, api_key, active)`
/// - `site_globals(site_id, key, data jsonb)`, unique on `(site_id, key)`
/// - `projects` / `pages`: `(id, site_id, slug, status, created_at, updated_at, fields jsonb)`
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgContentStore {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        let slow_query_threshold = config
            .enable_slow_query_warning
            .then(|| Duration::from_millis(config.slow_query_threshold_ms));
        Self { pool, slow_query_threshold }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = DatabaseManager::connect(config).await?;
        Ok(Self::new(pool, config))
    }

    fn warn_if_slow(&self, what: &str, started: Instant) {
        if let Some(threshold) = self.slow_query_threshold {
            let elapsed = started.elapsed();
            if elapsed > threshold {
                tracing::warn!("Slow query ({}): {:?} exceeds {:?}", what, elapsed, threshold);
            }
        }
    }

    /// Translates a collection query into a tenant-scoped `Filter`.
    fn build_filter(query: &ContentQuery) -> Result<Filter, StoreError> {
        let mut filter = Filter::new(query.kind.table_name()).map_err(query_error)?;
        filter.select(&CONTENT_COLUMNS).map_err(query_error)?;
        filter.where_eq("site_id", Value::from(query.site.0)).map_err(query_error)?;
        if let Some(slug) = &query.slug {
            filter.where_eq("slug", Value::String(slug.clone())).map_err(query_error)?;
        }
        if let StatusFilter::Only(status) = &query.status {
            filter.where_eq("status", Value::String(status.clone())).map_err(query_error)?;
        }
        filter.order(order_info(&query.sort)).map_err(query_error)?;
        filter
            .order(FilterOrderInfo { target: OrderTarget::Column("id".to_string()), sort: SortDirection::Asc })
            .map_err(query_error)?;
        filter
            .limit(u64::from(query.limit), Some(query.offset()))
            .map_err(query_error)?;
        Ok(filter)
    }
}

/// Document field names map to columns where one exists; everything else
/// lives in the `fields` jsonb column.
fn order_info(sort: &SortSpec) -> FilterOrderInfo {
    let target = match sort.document_field() {
        "id" => OrderTarget::Column("id".to_string()),
        "site" => OrderTarget::Column("site_id".to_string()),
        "slug" => OrderTarget::Column("slug".to_string()),
        "status" => OrderTarget::Column("status".to_string()),
        "createdAt" => OrderTarget::Column("created_at".to_string()),
        "updatedAt" => OrderTarget::Column("updated_at".to_string()),
        other => OrderTarget::JsonField { column: "fields".to_string(), key: other.to_string() },
    };
    FilterOrderInfo { target, sort: sort.direction }
}

fn query_error(err: crate::filter::FilterError) -> StoreError {
    StoreError::QueryError(err.to_string())
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn find_active_site(&self, api_key: &str) -> Result<Option<Site>, StoreError> {
        let started = Instant::now();
        let site = sqlx::query_as::<_, Site>(
            "SELECT id, slug, name, api_key, active
             FROM sites
             WHERE api_key = $1 AND active = true
             LIMIT 1",
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;
        self.warn_if_slow("site lookup", started);
        Ok(site)
    }

    async fn find_global(&self, site: SiteId, key: &str) -> Result<Option<Global>, StoreError> {
        let started = Instant::now();
        let global = sqlx::query_as::<_, Global>(
            "SELECT site_id, key, data
             FROM site_globals
             WHERE site_id = $1 AND key = $2
             LIMIT 1",
        )
        .bind(site)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        self.warn_if_slow("global lookup", started);
        Ok(global)
    }

    async fn find_documents(&self, query: &ContentQuery) -> Result<DocumentPage, StoreError> {
        let filter = Self::build_filter(query)?;
        let select = filter.to_sql().map_err(query_error)?;
        let count = filter.to_count_sql().map_err(query_error)?;
        tracing::debug!("Collection query: {}", select.query);

        let started = Instant::now();
        let rows = fetch_all::<ContentRow>(&self.pool, &select).await?;
        let total_docs = fetch_count(&self.pool, &count).await?;
        self.warn_if_slow(query.kind.as_str(), started);

        let docs = rows.into_iter().map(ContentRow::into_document).collect();
        Ok(DocumentPage::new(docs, total_docs, query.page, query.limit))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

async fn fetch_all<T>(pool: &PgPool, sql: &SqlResult) -> Result<Vec<T>, StoreError>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let mut q = sqlx::query_as::<_, T>(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query_as(q, p);
    }
    Ok(q.fetch_all(pool).await?)
}

async fn fetch_count(pool: &PgPool, sql: &SqlResult) -> Result<u64, StoreError> {
    let mut q = sqlx::query(&sql.query);
    for p in sql.params.iter() {
        q = bind_param_query(q, p);
    }
    let row = q.fetch_one(pool).await?;
    let count: i64 = row.try_get("count")?;
    Ok(count.max(0) as u64)
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => q.bind(None::<String>),
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        Value::Array(_) | Value::Object(_) => q.bind(v),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => q.bind(None::<String>),
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        Value::Array(_) | Value::Object(_) => q.bind(v),
    }
}

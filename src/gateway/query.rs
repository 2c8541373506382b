use super::error::GatewayError;
use super::request::RequestParams;
use super::tenant::SiteContext;
use crate::config::ContentConfig;
use crate::types::{ContentKind, ContentQuery, SortSpec, StatusFilter};

pub const DEFAULT_STATUS: &str = "published";
pub const ALL_STATUSES: &str = "all";

/// Validated, tenant-independent collection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionParams {
    pub slug: Option<String>,
    pub status: StatusFilter,
    pub sort: SortSpec,
    pub limit: u32,
    pub page: u32,
}

/// Turns request parameters into a tenant-scoped `ContentQuery`.
///
/// Parsing is split from building so that every parameter is validated before
/// the tenant is resolved. The tenant predicate comes only from the
/// `SiteContext` handed to `build`; no request parameter can influence it.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    default_limit: u32,
    max_limit: u32,
    default_sort: SortSpec,
}

impl QueryBuilder {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            default_sort: SortSpec::parse(&config.default_sort)
                .unwrap_or_else(|| SortSpec::ascending("createdAt")),
        }
    }

    pub fn parse(&self, params: &RequestParams) -> Result<CollectionParams, GatewayError> {
        let slug = params.get("slug").map(str::to_string);

        let status = match params.get("status").unwrap_or(DEFAULT_STATUS) {
            ALL_STATUSES => StatusFilter::Any,
            other => StatusFilter::Only(other.to_string()),
        };

        let sort = match params.get("sort") {
            Some(raw) => SortSpec::parse(raw)
                .ok_or_else(|| GatewayError::invalid("sort", "must be a field name, optionally prefixed with '-'"))?,
            None => self.default_sort.clone(),
        };

        let limit = match params.get("limit") {
            Some(raw) => positive_integer("limit", raw)?.min(self.max_limit),
            None => self.default_limit,
        };
        let page = match params.get("page") {
            Some(raw) => positive_integer("page", raw)?,
            None => 1,
        };

        Ok(CollectionParams { slug, status, sort, limit, page })
    }

    pub fn build(&self, ctx: &SiteContext, kind: ContentKind, params: CollectionParams) -> ContentQuery {
        ContentQuery {
            kind,
            site: ctx.site_id(),
            slug: params.slug,
            status: params.status,
            sort: params.sort,
            limit: params.limit,
            page: params.page,
        }
    }
}

fn positive_integer(name: &'static str, raw: &str) -> Result<u32, GatewayError> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GatewayError::invalid(name, "must be a positive integer")),
    }
}

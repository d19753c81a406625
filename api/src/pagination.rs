//! Page-number pagination for list endpoints.
//!
//! Page size is always an explicit argument: list handlers pass the global size
//! from `AppState`, the course-reviews action passes its own fixed size. `None`
//! means pagination is disabled and the whole result set is returned as a plain
//! array.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::{Deserialize, Serialize};

/// Query string accepted by paginated endpoints (`?page=2`, `?page=last`).
///
/// Kept as a raw string so that garbage is reported as an invalid page rather
/// than as a query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn requested(&self) -> Option<&str> {
        self.page.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// A list result: one page, or everything when pagination is off.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Unpaged(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<PageMeta>) {
        match self {
            Listing::Paged(page) => (page.results, Some(page.meta)),
            Listing::Unpaged(items) => (items, None),
        }
    }

    pub fn from_parts(items: Vec<T>, meta: Option<PageMeta>) -> Self {
        match meta {
            Some(meta) => Listing::Paged(Page {
                results: items,
                meta,
            }),
            None => Listing::Unpaged(items),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid page")]
    InvalidPage,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Number of pages for `total` items; an empty set still has one (empty) page.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// Resolves the requested page number (1-based) against the result size.
pub fn resolve_page(requested: Option<&str>, total: u64, per_page: u64) -> Result<u64, PageError> {
    let last = total_pages(total, per_page);
    let page = match requested.map(str::trim) {
        None | Some("") => 1,
        Some("last") => last,
        Some(raw) => raw.parse::<u64>().map_err(|_| PageError::InvalidPage)?,
    };

    if page == 0 || page > last {
        return Err(PageError::InvalidPage);
    }
    Ok(page)
}

/// Fetches one page of `query`.
pub async fn paginate<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    per_page: u64,
    requested: Option<&str>,
) -> Result<Page<E::Model>, PageError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
{
    let paginator = query.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let page = resolve_page(requested, total, per_page)?;
    let results = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        results,
        meta: PageMeta {
            page,
            per_page,
            total,
            total_pages: total_pages(total, per_page),
        },
    })
}

/// Lists `query`, paginated when `page_size` is set.
pub async fn list<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    page_size: Option<u64>,
    requested: Option<&str>,
) -> Result<Listing<E::Model>, PageError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
{
    match page_size {
        Some(per_page) => Ok(Listing::Paged(paginate(db, query, per_page, requested).await?)),
        None => Ok(Listing::Unpaged(query.all(db).await?)),
    }
}

use axum::{
    extract::{RawQuery, State},
    Extension, Json,
};
use serde::Serialize;

use crate::database::{Listing, QuerySettings, Repository};
use crate::error::ApiError;
use crate::filter::{build_filter, ListParams, Listable, PaginationMode};
use crate::middleware::RequestContext;
use crate::state::AppState;

/// Listing envelope. Offset listings report `count`/`next_id`, keyset
/// listings `total_size`/`next_page_token`; the cursor is the last row's id
/// and is omitted on an empty page.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Offset {
        count: i64,
        results: Vec<T>,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_id: Option<i64>,
    },
    Keyset {
        total_size: i64,
        results: Vec<T>,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_page_token: Option<i64>,
    },
}

impl<T: Listable> ListResponse<T> {
    pub fn from_listing(mode: PaginationMode, listing: Listing<T>) -> Self {
        let last_id = listing.rows.last().map(Listable::id);
        match mode {
            PaginationMode::Offset => ListResponse::Offset {
                count: listing.total,
                results: listing.rows,
                next_id: last_id,
            },
            PaginationMode::Keyset => ListResponse::Keyset {
                total_size: listing.total,
                results: listing.rows,
                next_page_token: last_id,
            },
        }
    }
}

/// Generic list endpoint: scope to the caller's tenant, compile the filter,
/// then run the page and count queries together.
pub async fn list_entities<T: Listable>(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListResponse<T>>, ApiError> {
    let identity = ctx.identity()?;
    if T::EXECUTIVE_ONLY && !identity.role.is_executive() {
        return Err(ApiError::forbidden(format!("{} are restricted to executives", T::NAME)));
    }

    let params = ListParams::parse(query.as_deref());
    let filter = build_filter::<T>(&params, identity.tenant_id, ctx.page.page(T::PAGINATION))?;

    let repo = Repository::<T>::new(state.pool.clone(), QuerySettings::from_config(&state.config.database));
    let listing = repo.fetch_page(&filter).await?;

    Ok(Json(ListResponse::from_listing(T::PAGINATION, listing)))
}

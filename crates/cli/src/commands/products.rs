//! Catalog browsing.

use shahd_storefront::api::ProductFilters;
use shahd_storefront::error::Result;
use shahd_storefront::state::AppState;

use crate::render;

/// Print one page of the catalog.
pub async fn list(state: &AppState, filters: &ProductFilters) -> Result<()> {
    let page = state.main_service().list_products(filters).await?;
    render::products(&page, state.config().currency);
    Ok(())
}

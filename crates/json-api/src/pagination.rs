//! Pagination at the HTTP boundary.

use salvo::Request;

use storefront_app::pagination::PageRequest;

/// Reads the `numPage` and `limit` query parameters leniently: anything
/// absent or unparseable falls back to the defaults.
pub(crate) fn page_request(req: &Request) -> PageRequest {
    PageRequest::from_query(req.query("numPage"), req.query("limit"))
}

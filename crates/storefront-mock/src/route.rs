//! Path routing.

use std::fmt;
use storefront_core::ItemId;

/// A resource addressed by a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// `/items`
    Items,
    /// `/items/:id`
    Item(ItemId),
    /// `/categories`
    Categories,
    /// `/cart`
    Cart,
    /// `/cart/:item_id`
    CartEntry(ItemId),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Items => f.write_str("items"),
            Resource::Item(id) => write!(f, "items/{}", id),
            Resource::Categories => f.write_str("categories"),
            Resource::Cart => f.write_str("cart"),
            Resource::CartEntry(id) => write!(f, "cart/{}", id),
        }
    }
}

/// Why a path did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No resource lives at the path.
    Unknown(String),
    /// The identifier segment is not a number.
    BadId(String),
}

/// Strip `base` from `path`, returning the remaining segments.
pub fn relative<'a>(base: &str, path: &'a str) -> Option<Vec<&'a str>> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    for expected in base.split('/').filter(|s| !s.is_empty()) {
        if segments.next()? != expected {
            return None;
        }
    }
    Some(segments.collect())
}

/// Resolve a request path under `base` to a resource.
pub fn resolve(base: &str, path: &str) -> Result<Resource, RouteError> {
    let unknown = || RouteError::Unknown(format!("/{}", path));
    let segments = relative(base, path).ok_or_else(unknown)?;

    match segments.as_slice() {
        ["items"] => Ok(Resource::Items),
        ["items", id] => parse_id(id).map(Resource::Item),
        ["categories"] => Ok(Resource::Categories),
        ["cart"] => Ok(Resource::Cart),
        ["cart", id] => parse_id(id).map(Resource::CartEntry),
        _ => Err(unknown()),
    }
}

fn parse_id(segment: &str) -> Result<ItemId, RouteError> {
    segment
        .parse()
        .map_err(|_| RouteError::BadId(segment.to_string()))
}

//! The in-memory backend.

use crate::fault::{Fault, FaultPlan, FaultRule};
use crate::route::{self, Resource, RouteError};
use crate::tables::Tables;
use crate::MockConfig;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use storefront_core::cart::{CartEntry, QuantityUpdate};
use storefront_core::catalog::{Item, ItemDraft};
use storefront_core::ItemId;
use storefront_data::{FetchError, Method, Request, Response, Transport};
use tracing::{debug, trace};

/// An in-process REST backend holding items, categories and the cart.
///
/// Each request is answered in two phases: the tables are read or
/// written under a lock, then the response is held back for the
/// configured latency. Responses to overlapping requests can therefore
/// arrive after the state they describe has already changed.
#[derive(Debug)]
pub struct InMemoryApi {
    config: MockConfig,
    tables: Mutex<Tables>,
    faults: Mutex<FaultPlan>,
    served: AtomicU64,
}

impl InMemoryApi {
    /// Create a backend.
    pub fn new(config: MockConfig) -> Self {
        let tables = if config.seed {
            Tables::seeded()
        } else {
            Tables::default()
        };
        Self {
            config,
            tables: Mutex::new(tables),
            faults: Mutex::new(FaultPlan::default()),
            served: AtomicU64::new(0),
        }
    }

    /// A seeded backend with no latency.
    pub fn seeded() -> Self {
        Self::new(MockConfig::default())
    }

    /// The configuration.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Install a fault rule.
    pub fn inject(&self, rule: FaultRule) {
        self.faults.lock().push(rule);
    }

    /// Remove all fault rules.
    pub fn clear_faults(&self) {
        self.faults.lock().clear();
    }

    /// Copy of the current tables.
    pub fn tables(&self) -> Tables {
        self.tables.lock().clone()
    }

    /// Current cart rows.
    pub fn cart(&self) -> Vec<CartEntry> {
        self.tables.lock().cart.clone()
    }

    /// Current catalog rows.
    pub fn items(&self) -> Vec<Item> {
        self.tables.lock().items.clone()
    }

    /// Number of requests received, including faulted ones.
    pub fn requests_served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }

    /// Answer a request against the tables, without latency or faults.
    pub fn handle(&self, request: &Request) -> Response {
        let resource = match route::resolve(&self.config.base_path, &request.path) {
            Ok(resource) => resource,
            Err(RouteError::Unknown(path)) => {
                return Response::error(404, format!("no resource at {}", path))
            }
            Err(RouteError::BadId(id)) => {
                return Response::error(400, format!("invalid id: {}", id))
            }
        };

        let mut tables = self.tables.lock();
        match (request.method, resource) {
            (Method::Get, Resource::Items) => {
                let category = request.query_param("category");
                json(200, &tables.items_in(category))
            }
            (Method::Post, Resource::Items) => match request.body_json::<ItemDraft>() {
                Ok(draft) => json(201, &tables.insert_item(draft)),
                Err(e) => Response::error(400, e.to_string()),
            },
            (Method::Get, Resource::Item(id)) => match tables.item(id) {
                Some(item) => json(200, item),
                None => item_not_found(id),
            },
            (Method::Put, Resource::Item(id)) => match request.body_json::<Item>() {
                Ok(item) if item.id != id => Response::error(
                    400,
                    format!("body id {} does not match path id {}", item.id, id),
                ),
                Ok(item) => {
                    if tables.replace_item(item.clone()) {
                        json(200, &item)
                    } else {
                        item_not_found(id)
                    }
                }
                Err(e) => Response::error(400, e.to_string()),
            },
            (Method::Delete, Resource::Item(id)) => {
                if tables.remove_item(id) {
                    Response::no_content()
                } else {
                    item_not_found(id)
                }
            }
            (Method::Get, Resource::Categories) => json(200, &tables.categories),
            (Method::Get, Resource::Cart) => json(200, &tables.cart),
            (Method::Post, Resource::Cart) => match request.body_json::<CartEntry>() {
                Ok(entry) => {
                    if let Err(e) = CartEntry::new(entry.item_id, entry.quantity) {
                        return Response::error(400, e.to_string());
                    }
                    if tables.item(entry.item_id).is_none() {
                        return item_not_found(entry.item_id);
                    }
                    if tables.cart_entry_mut(entry.item_id).is_some() {
                        return Response::error(
                            409,
                            format!("item {} is already in the cart", entry.item_id),
                        );
                    }
                    tables.cart.push(entry);
                    json(201, &entry)
                }
                Err(e) => Response::error(400, e.to_string()),
            },
            (Method::Delete, Resource::Cart) => {
                tables.cart.clear();
                Response::no_content()
            }
            (Method::Put, Resource::CartEntry(id)) => {
                let update = match request.body_json::<QuantityUpdate>() {
                    Ok(update) => update,
                    Err(e) => return Response::error(400, e.to_string()),
                };
                if let Err(e) = QuantityUpdate::new(i64::from(update.quantity)) {
                    return Response::error(400, e.to_string());
                }
                match tables.cart_entry_mut(id) {
                    Some(entry) => {
                        entry.quantity = update.quantity;
                        json(200, &*entry)
                    }
                    None => cart_entry_not_found(id),
                }
            }
            (Method::Delete, Resource::CartEntry(id)) => {
                if tables.remove_cart_entry(id) {
                    Response::no_content()
                } else {
                    cart_entry_not_found(id)
                }
            }
            (method, resource) => {
                Response::error(405, format!("{} not allowed on /{}", method, resource))
            }
        }
    }

    fn relative_path(&self, request: &Request) -> String {
        route::relative(&self.config.base_path, &request.path)
            .map(|segments| segments.join("/"))
            .unwrap_or_else(|| request.path.clone())
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl Transport for InMemoryApi {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        self.served.fetch_add(1, Ordering::Relaxed);
        let fault = self
            .faults
            .lock()
            .take(&request, &self.relative_path(&request));

        let mut delay = self.config.latency;
        let response = match fault {
            Some(Fault::Transport) => {
                debug!(request = %request, "injected transport failure");
                sleep(delay).await;
                return Err(FetchError::Transport(format!(
                    "connection to {} dropped",
                    request.url()
                )));
            }
            Some(Fault::Status(status)) => {
                debug!(request = %request, status, "injected status");
                Response::error(status, "injected failure")
            }
            Some(Fault::Delay(extra)) => {
                delay += extra;
                self.handle(&request)
            }
            None => self.handle(&request),
        };

        trace!(request = %request, status = response.status, ?delay, "mock response");
        sleep(delay).await;
        Ok(response)
    }
}

async fn sleep(delay: std::time::Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Response {
    Response::json_body(status, value).unwrap_or_else(|e| Response::error(500, e.to_string()))
}

fn item_not_found(id: ItemId) -> Response {
    Response::error(404, format!("item {} not found", id))
}

fn cart_entry_not_found(id: ItemId) -> Response {
    Response::error(404, format!("item {} is not in the cart", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use storefront_core::Money;

    fn get(path: &str) -> Request {
        Request::new(Method::Get, path)
    }

    #[test]
    fn test_list_items_and_categories() {
        let api = InMemoryApi::seeded();

        let items: Vec<Item> = api.handle(&get("api/items")).json().unwrap();
        assert_eq!(items.len(), 9);
        assert_eq!(items[0].name, "White Bread");
        assert_eq!(items[0].price, Money::from_cents(30));

        let bakery: Vec<Item> = api
            .handle(&get("api/items").query("category", "Bakery"))
            .json()
            .unwrap();
        assert_eq!(bakery.len(), 4);

        let categories: Vec<serde_json::Value> = api.handle(&get("api/categories")).json().unwrap();
        assert_eq!(categories[0], serde_json::json!({ "id": 11, "name": "Bakery" }));
    }

    #[test]
    fn test_create_update_delete_item() {
        let api = InMemoryApi::seeded();

        let create = Request::new(Method::Post, "api/items")
            .json(&serde_json::json!({ "name": "Donut", "price": 0.45, "category": "Bakery" }))
            .unwrap();
        let response = api.handle(&create);
        assert_eq!(response.status, 201);
        let created: Item = response.json().unwrap();
        assert_eq!(created.id, ItemId::new(10));

        let mut renamed = created.clone();
        renamed.name = "Glazed Donut".to_string();
        let update = Request::new(Method::Put, "api/items/10").json(&renamed).unwrap();
        assert_eq!(api.handle(&update).status, 200);
        assert_eq!(api.items().last().unwrap().name, "Glazed Donut");

        let delete = Request::new(Method::Delete, "api/items/10");
        assert_eq!(api.handle(&delete).status, 204);
        assert_eq!(api.handle(&delete).status, 404);
    }

    #[test]
    fn test_update_rejects_mismatched_or_unknown_id() {
        let api = InMemoryApi::seeded();
        let item = Item::new(ItemId::new(3), "Croissant", Money::from_cents(15), "Bakery");

        let mismatched = Request::new(Method::Put, "api/items/4").json(&item).unwrap();
        assert_eq!(api.handle(&mismatched).status, 400);

        let ghost = Item::new(ItemId::new(77), "Ghost", Money::ZERO, "Bakery");
        let unknown = Request::new(Method::Put, "api/items/77").json(&ghost).unwrap();
        assert_eq!(api.handle(&unknown).status, 404);
    }

    #[test]
    fn test_malformed_bodies() {
        let api = InMemoryApi::seeded();

        let negative = Request::new(Method::Post, "api/items")
            .json(&serde_json::json!({ "name": "X", "price": -1.0, "category": "Bakery" }))
            .unwrap();
        assert_eq!(api.handle(&negative).status, 400);

        let missing = Request::new(Method::Post, "api/cart");
        assert_eq!(api.handle(&missing).status, 400);

        assert_eq!(api.handle(&get("api/items/abc")).status, 400);
    }

    #[test]
    fn test_cart_lifecycle() {
        let api = InMemoryApi::seeded();
        let add = Request::new(Method::Post, "api/cart")
            .json(&CartEntry::single(ItemId::new(4)))
            .unwrap();

        assert_eq!(api.handle(&add).status, 201);
        assert_eq!(api.handle(&add).status, 409);

        let update = Request::new(Method::Put, "api/cart/4")
            .json(&serde_json::json!({ "quantity": 3 }))
            .unwrap();
        let entry: CartEntry = api.handle(&update).json().unwrap();
        assert_eq!(entry.quantity, 3);

        let zero = Request::new(Method::Put, "api/cart/4")
            .json(&serde_json::json!({ "quantity": 0 }))
            .unwrap();
        assert_eq!(api.handle(&zero).status, 400);

        assert_eq!(api.handle(&Request::new(Method::Delete, "api/cart/4")).status, 204);
        assert_eq!(api.handle(&Request::new(Method::Delete, "api/cart/4")).status, 404);
        assert!(api.cart().is_empty());
    }

    #[test]
    fn test_cart_rejects_unknown_item() {
        let api = InMemoryApi::seeded();
        let add = Request::new(Method::Post, "api/cart")
            .json(&CartEntry::single(ItemId::new(42)))
            .unwrap();
        assert_eq!(api.handle(&add).status, 404);
    }

    #[test]
    fn test_clear_cart() {
        let api = InMemoryApi::seeded();
        for id in [1, 2] {
            let add = Request::new(Method::Post, "api/cart")
                .json(&CartEntry::single(ItemId::new(id)))
                .unwrap();
            api.handle(&add);
        }
        assert_eq!(api.cart().len(), 2);
        assert_eq!(api.handle(&Request::new(Method::Delete, "api/cart")).status, 204);
        assert!(api.cart().is_empty());
    }

    #[test]
    fn test_method_not_allowed() {
        let api = InMemoryApi::seeded();
        assert_eq!(api.handle(&Request::new(Method::Delete, "api/categories")).status, 405);
        assert_eq!(api.handle(&Request::new(Method::Put, "api/items")).status, 405);
        assert_eq!(api.handle(&get("api/orders")).status, 404);
    }

    #[test]
    fn test_unseeded_backend_is_empty() {
        let api = InMemoryApi::new(MockConfig::new().with_seed(false));
        let items: Vec<Item> = api.handle(&get("api/items")).json().unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_status_fault_leaves_tables_untouched() {
        let api = InMemoryApi::seeded();
        api.inject(FaultRule::new(Fault::Status(500)).on(Method::Post).at("cart").times(1));

        let add = Request::new(Method::Post, "api/cart")
            .json(&CartEntry::single(ItemId::new(1)))
            .unwrap();
        assert_eq!(api.send(add.clone()).await.unwrap().status, 500);
        assert!(api.cart().is_empty());

        assert_eq!(api.send(add).await.unwrap().status, 201);
        assert_eq!(api.requests_served(), 2);
    }

    #[tokio::test]
    async fn test_transport_fault() {
        let api = InMemoryApi::seeded();
        api.inject(FaultRule::new(Fault::Transport).at("items"));

        let err = api.send(get("api/items")).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));

        api.clear_faults();
        assert!(api.send(get("api/items")).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let api = InMemoryApi::new(MockConfig::new().with_latency(Duration::from_millis(200)));
        let start = tokio::time::Instant::now();
        api.send(get("api/categories")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}

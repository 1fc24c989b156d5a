//! In-memory REST backend for the storefront.
//!
//! [`InMemoryApi`] implements [`storefront_data::Transport`] over three
//! tables (items, categories, cart) seeded with the demo catalog:
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | `GET` | `/items[?category=]` | 200 |
//! | `POST` | `/items` | 201 |
//! | `GET`, `PUT` | `/items/:id` | 200 |
//! | `DELETE` | `/items/:id` | 204 |
//! | `GET` | `/categories` | 200 |
//! | `GET` | `/cart` | 200 |
//! | `POST` | `/cart` | 201, 409 if present |
//! | `PUT` | `/cart/:item_id` | 200 |
//! | `DELETE` | `/cart/:item_id`, `/cart` | 204 |
//!
//! Unknown identifiers answer 404, malformed bodies 400, and other
//! methods 405. Latency and [`FaultRule`]s simulate a slow or flaky
//! network.

mod api;
mod config;
mod fault;
mod route;
mod tables;

pub use api::InMemoryApi;
pub use config::MockConfig;
pub use fault::{Fault, FaultPlan, FaultRule};
pub use route::{Resource, RouteError};
pub use tables::Tables;

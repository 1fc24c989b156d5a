//! Operation outcomes published to observers.

use crate::StoreError;
use std::fmt;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default number of events buffered per subscriber.
pub const DEFAULT_STATUS_CAPACITY: usize = 64;

/// A store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListItems,
    ListItemsByCategory,
    ListCategories,
    CreateItem,
    UpdateItem,
    DeleteItem,
    RefreshCart,
    AddToCart,
    SetQuantity,
    RemoveFromCart,
    ClearCart,
}

impl Operation {
    /// Human readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListItems => "list items",
            Operation::ListItemsByCategory => "list items by category",
            Operation::ListCategories => "list categories",
            Operation::CreateItem => "create item",
            Operation::UpdateItem => "update item",
            Operation::DeleteItem => "delete item",
            Operation::RefreshCart => "refresh cart",
            Operation::AddToCart => "add to cart",
            Operation::SetQuantity => "set quantity",
            Operation::RemoveFromCart => "remove from cart",
            Operation::ClearCart => "clear cart",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an operation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded,
    Failed(StoreError),
}

/// One published outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    pub operation: Operation,
    pub outcome: Outcome,
}

impl StoreEvent {
    /// Check if the operation failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    /// The error, if the operation failed.
    pub fn error(&self) -> Option<&StoreError> {
        match &self.outcome {
            Outcome::Failed(e) => Some(e),
            Outcome::Succeeded => None,
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Succeeded => write!(f, "{} succeeded", self.operation),
            Outcome::Failed(e) => write!(f, "{} failed: {}", self.operation, e),
        }
    }
}

/// Broadcast channel of [`StoreEvent`]s shared by the stores.
///
/// Publishing never blocks; slow subscribers observe a lag error and
/// skip ahead.
#[derive(Debug, Clone)]
pub struct StatusChannel {
    sender: broadcast::Sender<StoreEvent>,
}

impl StatusChannel {
    /// Create a channel buffering `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Dropped silently when nobody listens.
    pub fn publish(&self, operation: Operation, outcome: Outcome) {
        let _ = self.sender.send(StoreEvent { operation, outcome });
    }

    /// Log and publish the outcome of `operation`, converting failure to
    /// `None`.
    pub fn settle<T>(&self, operation: Operation, result: Result<T, StoreError>) -> Option<T> {
        match result {
            Ok(value) => {
                debug!(%operation, "store operation succeeded");
                self.publish(operation, Outcome::Succeeded);
                Some(value)
            }
            Err(error) => {
                warn!(%operation, %error, "store operation failed");
                self.publish(operation, Outcome::Failed(error));
                None
            }
        }
    }
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_CAPACITY)
    }
}

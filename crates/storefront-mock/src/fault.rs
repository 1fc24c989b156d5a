//! Fault injection.

use std::time::Duration;
use storefront_data::{Method, Request};

/// What to do instead of (or on top of) answering normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Answer with this status and leave the tables untouched.
    Status(u16),
    /// Fail without producing a response.
    Transport,
    /// Answer normally, but hold the response back for longer.
    Delay(Duration),
}

/// A fault applied to requests matching a method and path prefix.
///
/// The prefix is matched against the path below the base path, so
/// `"cart"` covers both `/api/cart` and `/api/cart/3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRule {
    fault: Fault,
    method: Option<Method>,
    path_prefix: String,
    remaining: Option<u32>,
}

impl FaultRule {
    /// A rule matching every request, forever.
    pub fn new(fault: Fault) -> Self {
        Self {
            fault,
            method: None,
            path_prefix: String::new(),
            remaining: None,
        }
    }

    /// Only match `method`.
    pub fn on(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Only match paths starting with `prefix`.
    pub fn at(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    /// Expire after `count` matches.
    pub fn times(mut self, count: u32) -> Self {
        self.remaining = Some(count);
        self
    }

    /// The fault this rule injects.
    pub fn fault(&self) -> Fault {
        self.fault
    }

    fn matches(&self, request: &Request, relative_path: &str) -> bool {
        if self.remaining == Some(0) {
            return false;
        }
        if self.method.is_some_and(|m| m != request.method) {
            return false;
        }
        relative_path.starts_with(&self.path_prefix)
    }
}

/// Ordered set of fault rules; the first live match wins.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    rules: Vec<FaultRule>,
}

impl FaultPlan {
    /// Add a rule.
    pub fn push(&mut self, rule: FaultRule) {
        self.rules.push(rule);
    }

    /// Remove every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Check if no rules are installed.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the fault for a request, consuming one use of the matching rule.
    pub fn take(&mut self, request: &Request, relative_path: &str) -> Option<Fault> {
        let rule = self
            .rules
            .iter_mut()
            .find(|rule| rule.matches(request, relative_path))?;
        if let Some(remaining) = rule.remaining.as_mut() {
            *remaining -= 1;
        }
        let fault = rule.fault;
        self.rules.retain(|rule| rule.remaining != Some(0));
        Some(fault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_and_prefix_filter() {
        let mut plan = FaultPlan::default();
        plan.push(FaultRule::new(Fault::Status(500)).on(Method::Post).at("/cart"));

        let get = Request::new(Method::Get, "api/cart");
        let post = Request::new(Method::Post, "api/cart");
        let post_items = Request::new(Method::Post, "api/items");

        assert_eq!(plan.take(&get, "cart"), None);
        assert_eq!(plan.take(&post_items, "items"), None);
        assert_eq!(plan.take(&post, "cart"), Some(Fault::Status(500)));
        assert_eq!(plan.take(&post, "cart"), Some(Fault::Status(500)));
    }

    #[test]
    fn test_rules_expire() {
        let mut plan = FaultPlan::default();
        plan.push(FaultRule::new(Fault::Transport).times(1));
        plan.push(FaultRule::new(Fault::Status(503)).times(1));

        let req = Request::new(Method::Get, "api/items");
        assert_eq!(plan.take(&req, "items"), Some(Fault::Transport));
        assert_eq!(plan.take(&req, "items"), Some(Fault::Status(503)));
        assert_eq!(plan.take(&req, "items"), None);
        assert!(plan.is_empty());
    }
}

//! In-memory registry double for exercising probing and migration
//! logic without the live SOAP services.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::models::Document;
use crate::service::{Arg, Lookup, Registry, Service};

type CallKey = (Service, String, Vec<String>);

/// A canned-response registry. Lookups with no canned document come
/// back as [`Lookup::NoMatch`], mirroring a registry fault for an
/// unknown record.
#[derive(Debug, Default)]
pub struct MockRegistry {
    responses: HashMap<CallKey, Document>,
    calls: RefCell<Vec<CallKey>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned document for an exact (service, operation,
    /// args) combination.
    pub fn insert(
        &mut self,
        service: Service,
        operation: &str,
        args: &[Arg],
        document: Document,
    ) {
        self.responses
            .insert((service, operation.to_string(), render_args(args)), document);
    }

    /// Every lookup issued so far, in order.
    pub fn calls(&self) -> Vec<CallKey> {
        self.calls.borrow().clone()
    }
}

impl Registry for MockRegistry {
    fn lookup(&self, service: Service, operation: &str, args: &[Arg]) -> Result<Lookup> {
        let key = (service, operation.to_string(), render_args(args));
        self.calls.borrow_mut().push(key.clone());
        match self.responses.get(&key) {
            Some(document) => Ok(Lookup::Found(document.clone())),
            None => Ok(Lookup::NoMatch(format!(
                "no {} record for {}({})",
                service,
                operation,
                key.2.join(", ")
            ))),
        }
    }
}

fn render_args(args: &[Arg]) -> Vec<String> {
    args.iter().map(Arg::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canned_response_round_trip() {
        let mut registry = MockRegistry::new();
        registry.insert(
            Service::Vardok,
            "GetCodelistById",
            &[Arg::Int(46)],
            json!({"id": "urn:ssb:codelist:vardok:46"}),
        );

        let hit = registry
            .lookup(Service::Vardok, "GetCodelistById", &[Arg::Int(46)])
            .unwrap();
        assert!(matches!(hit, Lookup::Found(_)));

        let miss = registry
            .lookup(Service::Vardok, "GetCodelistById", &[Arg::Int(47)])
            .unwrap();
        assert!(matches!(miss, Lookup::NoMatch(_)));

        assert_eq!(registry.calls().len(), 2);
    }
}

use crate::error::Result;
use crate::models::Document;

/// The four legacy TBMD services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Datadok,
    Vardok,
    Metadb,
    Statbank,
}

impl Service {
    /// Lower-case service name as used in operation routing.
    pub fn name(&self) -> &'static str {
        match self {
            Service::Datadok => "datadok",
            Service::Vardok => "vardok",
            Service::Metadb => "metadb",
            Service::Statbank => "statbank",
        }
    }

    /// WSDL endpoint of the live service. Recorded for operators; the
    /// transport itself is a collaborator outside this crate.
    pub fn wsdl(&self) -> &'static str {
        match self {
            Service::Datadok => "http://ws.ssb.no/DatadokService/DatadokService.asmx?WSDL",
            Service::Vardok => "http://ws.ssb.no/VardokService/VardokService.asmx?WSDL",
            Service::Metadb => "http://ws.ssb.no/MetaDbService/MetaDbService.asmx?WSDL",
            Service::Statbank => "http://ws.ssb.no/statbankmetaservice/Service.asmx?WSDL",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A positional operation argument: the registries take strings and ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    Str(String),
    Int(i64),
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

/// Outcome of a single registry lookup.
///
/// A registry-reported "no record matches" is an expected, recoverable
/// outcome for the probing loop, so it is a variant here rather than a
/// transport error the caller has to catch.
#[derive(Debug, Clone)]
pub enum Lookup {
    Found(Document),
    NoMatch(String),
}

/// The registry collaborator boundary.
///
/// One blocking call per operation: a service, an operation name, and
/// positional arguments, returning a structured document or a no-match
/// outcome. Transport failures surface as errors and propagate.
pub trait Registry {
    fn lookup(&self, service: Service, operation: &str, args: &[Arg]) -> Result<Lookup>;
}

impl<R: Registry + ?Sized> Registry for &R {
    fn lookup(&self, service: Service, operation: &str, args: &[Arg]) -> Result<Lookup> {
        (**self).lookup(service, operation, args)
    }
}

/// Resolve a lookup outcome for callers that expect a record: a
/// no-match becomes a fault error.
pub(crate) fn expect_found(outcome: Lookup) -> Result<Document> {
    match outcome {
        Lookup::Found(document) => Ok(document),
        Lookup::NoMatch(fault) => Err(crate::error::RegistryError::Fault(fault)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_names() {
        assert_eq!(Service::Datadok.name(), "datadok");
        assert_eq!(Service::Statbank.name(), "statbank");
        assert_eq!(Service::Datadok.to_string(), "datadok");
    }

    #[test]
    fn test_arg_display() {
        assert_eq!(Arg::from("$UTD/nudb/g2002").to_string(), "$UTD/nudb/g2002");
        assert_eq!(Arg::from(228589i64).to_string(), "228589");
    }
}

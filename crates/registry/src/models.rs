use serde_json::Value;

use crate::error::{RegistryError, Result};

/// Raw structured document as serialized from the registry response.
/// Field order is not a contract; snapshots keep it as received.
pub type Document = Value;

/// One metadata entry for a flat-file column: the attributes the
/// decoding pipeline consumes. Registry attributes it does not touch
/// (definition, codelist reference, positions) stay on the raw
/// variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column title as declared in the registry
    pub name: String,
    /// Free-text datatype category, e.g. "Tekst", "Heltall", "Desimaltall"
    pub datatype: String,
    /// Declared field width, string-encoded non-negative integer
    pub length: String,
}

/// A file variable as validated off the raw document.
#[derive(Debug, Clone)]
pub struct ContextVariable {
    pub title: String,
    pub datatype: String,
    pub length: String,
    /// Full `Properties` mapping as returned by the registry
    pub properties: serde_json::Map<String, Value>,
}

impl ContextVariable {
    pub fn descriptor(&self) -> ColumnDescriptor {
        ColumnDescriptor {
            name: self.title.clone(),
            datatype: self.datatype.clone(),
            length: self.length.clone(),
        }
    }
}

/// A registry file description: the raw document plus its validated,
/// ordered variable list.
///
/// This is the single conversion point from the dynamic document shape
/// into typed structures; unexpected shapes are rejected here rather
/// than surfacing as lookup failures deep inside decoding.
#[derive(Debug, Clone)]
pub struct FileDescription {
    document: Document,
    variables: Vec<ContextVariable>,
}

impl FileDescription {
    /// Validate a raw registry document into a typed description.
    pub fn from_document(document: Document) -> Result<Self> {
        let vars = document
            .get("ContextVariable")
            .ok_or_else(|| RegistryError::bad_document("missing ContextVariable list"))?
            .as_array()
            .ok_or_else(|| RegistryError::bad_document("ContextVariable is not a list"))?;

        let mut variables = Vec::with_capacity(vars.len());
        for (i, var) in vars.iter().enumerate() {
            variables.push(parse_variable(var).map_err(|e| {
                RegistryError::bad_document(format!("ContextVariable[{}]: {}", i, e))
            })?);
        }

        Ok(FileDescription {
            document,
            variables,
        })
    }

    /// The raw document as received, for snapshotting.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Validated variables in declaration order.
    pub fn variables(&self) -> &[ContextVariable] {
        &self.variables
    }

    /// Column descriptors in declaration order; this order drives the
    /// decode step's width sequence.
    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        self.variables.iter().map(ContextVariable::descriptor).collect()
    }

    /// Ordered column titles.
    pub fn column_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.title.clone()).collect()
    }
}

fn parse_variable(var: &Value) -> std::result::Result<ContextVariable, String> {
    let title = titled_value(var.get("Title")).ok_or("missing Title._value_1")?;
    let properties = var
        .get("Properties")
        .and_then(Value::as_object)
        .ok_or("missing Properties mapping")?;
    let datatype = properties
        .get("Datatype")
        .and_then(Value::as_str)
        .ok_or("missing Properties.Datatype")?
        .to_string();
    let length = match properties.get("Length") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err("missing Properties.Length".to_string()),
    };
    Ok(ContextVariable {
        title,
        datatype,
        length,
        properties: properties.clone(),
    })
}

/// The registries wrap display strings as `{"_value_1": ...}`.
pub(crate) fn titled_value(value: Option<&Value>) -> Option<String> {
    value?
        .get("_value_1")
        .and_then(Value::as_str)
        .map(str::to_string)
}

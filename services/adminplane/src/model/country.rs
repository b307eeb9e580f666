//! Country model definitions.
use quill_authz::CountryId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    /// ISO 3166-1 alpha-2 code, unique.
    pub code: String,
    pub name: String,
    pub enabled: bool,
}

impl Country {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            id: CountryId::new(0),
            code: code.to_string(),
            name: name.to_string(),
            enabled: true,
        }
    }
}

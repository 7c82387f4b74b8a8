use serde::{Deserialize, Serialize};
use strum::Display;

/// Naming service a domain is registered with. Pending detection differs per
/// service, so there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum NamingService {
    Uns,
    Zns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainItem {
    pub name: String,
    pub naming_service: NamingService,
    #[serde(default)]
    pub owner_address: Option<String>,
}

impl DomainItem {
    pub fn new(name: &str, naming_service: NamingService, owner_address: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            naming_service,
            owner_address: owner_address.map(str::to_string),
        }
    }

    /// Owner address, unless missing or blank.
    pub fn owner(&self) -> Option<&str> {
        self.owner_address
            .as_deref()
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
    }

    pub fn is_owned_by(&self, address: &str) -> bool {
        self.owner()
            .map(|owner| owner.eq_ignore_ascii_case(address.trim()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_compared_case_insensitively() {
        let domain = DomainItem::new("alice.zil", NamingService::Zns, Some("0xAbC"));
        assert!(domain.is_owned_by("0xabc"));
        assert!(!domain.is_owned_by("0xabd"));
    }

    #[test]
    fn blank_owner_is_absent() {
        let domain = DomainItem::new("alice.zil", NamingService::Zns, Some("  "));
        assert_eq!(domain.owner(), None);
        assert!(!domain.is_owned_by(""));
    }

    #[test]
    fn naming_service_serde() {
        let domain: DomainItem =
            serde_json::from_str(r#"{"name":"a.x","namingService":"UNS"}"#).unwrap();
        assert_eq!(domain.naming_service, NamingService::Uns);
        assert_eq!(domain.owner_address, None);
        assert_eq!(NamingService::Zns.to_string(), "ZNS");
    }
}

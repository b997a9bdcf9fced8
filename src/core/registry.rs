use crate::domain::model::CarrierDescriptor;
use crate::utils::error::{Result, TrackingError};

/// 內建支援的承運商：(code, 顯示名稱, icon)
const BUILTIN_CARRIERS: &[(&str, &str, &str)] = &[
    ("india-post", "India Post", "🇮🇳"),
    ("delhivery", "Delhivery", "📦"),
    ("bluedart", "Blue Dart", "✈️"),
    ("dtdc", "DTDC", "🚚"),
    ("ecom-express", "Ecom Express", "🛒"),
    ("ekart", "Ekart Logistics", "🎯"),
];

#[derive(Debug, Clone)]
pub struct CarrierRegistry {
    carriers: Vec<CarrierDescriptor>,
}

impl CarrierRegistry {
    pub fn builtin() -> Self {
        Self {
            carriers: BUILTIN_CARRIERS
                .iter()
                .map(|(code, name, icon)| CarrierDescriptor::new(code, name, icon))
                .collect(),
        }
    }

    /// Builtin table plus configured carriers. A configured code replaces the builtin entry in place.
    pub fn with_extra(extra: &[CarrierDescriptor]) -> Self {
        let mut registry = Self::builtin();
        for descriptor in extra {
            registry.register(descriptor.clone());
        }
        registry
    }

    pub fn register(&mut self, mut descriptor: CarrierDescriptor) {
        descriptor.code = descriptor.code.trim().to_lowercase();
        match self.carriers.iter_mut().find(|c| c.code == descriptor.code) {
            Some(existing) => {
                tracing::debug!("Overriding carrier '{}'", descriptor.code);
                *existing = descriptor;
            }
            None => self.carriers.push(descriptor),
        }
    }

    pub fn resolve(&self, code: &str) -> Result<&CarrierDescriptor> {
        let wanted = code.trim().to_lowercase();
        self.carriers
            .iter()
            .find(|c| c.code == wanted)
            .ok_or_else(|| TrackingError::UnsupportedCarrier {
                code: code.to_string(),
            })
    }

    pub fn list(&self) -> &[CarrierDescriptor] {
        &self.carriers
    }
}

impl Default for CarrierRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = CarrierRegistry::builtin();
        let carrier = registry.resolve("India-Post").unwrap();
        assert_eq!(carrier.display_name, "India Post");
        assert_eq!(registry.resolve(" DTDC ").unwrap().code, "dtdc");
    }

    #[test]
    fn test_unknown_carrier_names_the_code() {
        let registry = CarrierRegistry::builtin();
        match registry.resolve("fedex") {
            Err(TrackingError::UnsupportedCarrier { code }) => assert_eq!(code, "fedex"),
            other => panic!("expected UnsupportedCarrier, got {:?}", other),
        }
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let registry = CarrierRegistry::builtin();
        let codes: Vec<&str> = registry.list().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["india-post", "delhivery", "bluedart", "dtdc", "ecom-express", "ekart"]
        );
    }

    #[test]
    fn test_extra_carriers_append_or_override() {
        let registry = CarrierRegistry::with_extra(&[
            CarrierDescriptor::new("XpressBees", "XpressBees", "🐝"),
            CarrierDescriptor::new("dtdc", "DTDC Express", "🚛"),
        ]);
        assert_eq!(registry.list().len(), 7);
        assert_eq!(registry.resolve("xpressbees").unwrap().icon, "🐝");
        assert_eq!(registry.resolve("dtdc").unwrap().display_name, "DTDC Express");
        assert_eq!(registry.list()[3].code, "dtdc");
    }
}

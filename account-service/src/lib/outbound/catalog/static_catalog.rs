use crate::domain::home::models::Bundle;
use crate::domain::home::models::Offer;
use crate::domain::home::models::ServiceTile;
use crate::domain::home::ports::HomeCatalog;

/// Fixed home screen content compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct StaticHomeCatalog;

impl StaticHomeCatalog {
    pub fn new() -> Self {
        Self
    }
}

fn tile(id: u32, name: &str, icon: &str, color: &str) -> ServiceTile {
    ServiceTile {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

impl HomeCatalog for StaticHomeCatalog {
    fn services(&self) -> Vec<ServiceTile> {
        vec![
            tile(1, "Send Money", "send", "#E91E63"),
            tile(2, "Mobile Recharge", "phone", "#2196F3"),
            tile(3, "Cash Out", "account_balance", "#4CAF50"),
            tile(4, "Payment", "payment", "#FF9800"),
            tile(5, "Add Money", "add_circle", "#9C27B0"),
            tile(6, "More", "more_horiz", "#607D8B"),
        ]
    }

    fn offers(&self) -> Vec<Offer> {
        vec![
            Offer {
                id: 1,
                title: "Free Cash Out".to_string(),
                description: "No charge for cash out this month".to_string(),
                image: "offer1".to_string(),
            },
            Offer {
                id: 2,
                title: "Recharge Bonus".to_string(),
                description: "Get 10% bonus on mobile recharge".to_string(),
                image: "offer2".to_string(),
            },
        ]
    }

    fn bundles(&self) -> Vec<Bundle> {
        vec![
            Bundle {
                id: 1,
                name: "Internet Bundle".to_string(),
                price: "৳29".to_string(),
                validity: "7 days".to_string(),
                description: "1GB daily".to_string(),
            },
            Bundle {
                id: 2,
                name: "Voice Bundle".to_string(),
                price: "৳38".to_string(),
                validity: "7 days".to_string(),
                description: "100 minutes".to_string(),
            },
        ]
    }
}

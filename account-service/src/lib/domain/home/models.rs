use crate::domain::user::models::User;

/// Quick-action tile on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTile {
    pub id: u32,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Promotional offer card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Mobile data/voice bundle for sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub validity: String,
    pub description: String,
}

/// Everything the home screen renders for one signed-in user.
#[derive(Debug, Clone)]
pub struct HomeData {
    pub user: User,
    pub services: Vec<ServiceTile>,
    pub offers: Vec<Offer>,
    pub bundles: Vec<Bundle>,
}

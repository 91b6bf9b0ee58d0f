use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::home::models::Bundle;
use crate::domain::home::models::HomeData;
use crate::domain::home::models::Offer;
use crate::domain::home::models::ServiceTile;
use crate::domain::user::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_home_data<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<HomeResponseData>, ApiError> {
    let home = state.user_service.get_home_data(&caller.user_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&home).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeResponseData {
    pub user: UserData,
    pub services: Vec<ServiceData>,
    pub offers: Vec<OfferData>,
    pub bundles: Vec<BundleData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceData {
    pub id: u32,
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferData {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleData {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub validity: String,
    pub description: String,
}

impl From<&HomeData> for HomeResponseData {
    fn from(home: &HomeData) -> Self {
        Self {
            user: UserData::from(&home.user),
            services: home.services.iter().map(ServiceData::from).collect(),
            offers: home.offers.iter().map(OfferData::from).collect(),
            bundles: home.bundles.iter().map(BundleData::from).collect(),
        }
    }
}

impl From<&ServiceTile> for ServiceData {
    fn from(tile: &ServiceTile) -> Self {
        Self {
            id: tile.id,
            name: tile.name.clone(),
            icon: tile.icon.clone(),
            color: tile.color.clone(),
        }
    }
}

impl From<&Offer> for OfferData {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id,
            title: offer.title.clone(),
            description: offer.description.clone(),
            image: offer.image.clone(),
        }
    }
}

impl From<&Bundle> for BundleData {
    fn from(bundle: &Bundle) -> Self {
        Self {
            id: bundle.id,
            name: bundle.name.clone(),
            price: bundle.price.clone(),
            validity: bundle.validity.clone(),
            description: bundle.description.clone(),
        }
    }
}

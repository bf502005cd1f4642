use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    model::{BaseModel, Record},
    validate,
};

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteType {
    Organic,
    Plastic,
    Paper,
    Metal,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BinStatus {
    #[default]
    Empty,
    HalfFull,
    Full,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinLocationSpec {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub waste_type: WasteType,
    #[serde(default)]
    pub status: BinStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
}

impl BaseModel for BinLocationSpec {
    const KEY: &'static str = "Bin location";
    const ID_FIELD: &'static str = "id";
}

impl BinLocationSpec {
    pub fn validate(&self) -> validate::Result {
        validate::require("Address", &self.address)?;
        validate::coordinates(self.latitude, self.longitude)
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub type BinLocation = Record<BinLocationSpec>;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl GeoPoint {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Great-circle distance in kilometers.
    pub fn distance_km(&self, other: &Self) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * Self::EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "NearestQuery::default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub waste_type: Option<WasteType>,
}

impl NearestQuery {
    const fn default_limit() -> usize {
        5
    }

    pub const fn origin(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.lat,
            longitude: self.lng,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyBin {
    pub distance_km: f64,
    pub bin: BinLocation,
}

/// Picks the bins closest to the origin, nearest first.
pub fn nearest(bins: Vec<BinLocation>, query: &NearestQuery) -> Vec<NearbyBin> {
    let mut nearby: Vec<_> = bins
        .into_iter()
        .filter(|bin| {
            query
                .waste_type
                .map_or(true, |waste_type| bin.spec.waste_type == waste_type)
        })
        .map(|bin| NearbyBin {
            distance_km: query.origin().distance_km(&bin.spec.position()),
            bin,
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby.truncate(query.limit);
    nearby
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinSummary {
    pub total: usize,
    pub by_status: BTreeMap<BinStatus, usize>,
    pub by_waste_type: BTreeMap<WasteType, usize>,
}

impl<'a> FromIterator<&'a BinLocationSpec> for BinSummary {
    fn from_iter<T: IntoIterator<Item = &'a BinLocationSpec>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |mut summary, bin| {
            summary.total += 1;
            *summary.by_status.entry(bin.status).or_default() += 1;
            *summary.by_waste_type.entry(bin.waste_type).or_default() += 1;
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Id;

    use super::*;

    fn bin(id: Id, latitude: f64, longitude: f64, waste_type: WasteType) -> BinLocation {
        Record::new(
            id,
            BinLocationSpec {
                address: format!("bin {id}"),
                latitude,
                longitude,
                waste_type,
                status: BinStatus::Empty,
                last_updated: None,
            },
        )
    }

    #[test]
    fn distance_between_cities() {
        let colombo = GeoPoint {
            latitude: 6.9271,
            longitude: 79.8612,
        };
        let kandy = GeoPoint {
            latitude: 7.2906,
            longitude: 80.6337,
        };
        let distance = colombo.distance_km(&kandy);
        assert!((90.0..100.0).contains(&distance), "{distance}");
        assert_eq!(colombo.distance_km(&colombo), 0.0);
    }

    #[test]
    fn pick_nearest_bins_first() {
        let bins = vec![
            bin(1, 7.2906, 80.6337, WasteType::Paper),
            bin(2, 6.9300, 79.8600, WasteType::Paper),
            bin(3, 6.9271, 79.8612, WasteType::Metal),
            bin(4, 6.9500, 79.9000, WasteType::Paper),
        ];
        let query = NearestQuery {
            lat: 6.9271,
            lng: 79.8612,
            limit: 2,
            waste_type: Some(WasteType::Paper),
        };

        let ids: Vec<_> = nearest(bins, &query)
            .into_iter()
            .map(|nearby| nearby.bin.id)
            .collect();
        assert_eq!(ids, [2, 4]);
    }

    #[test]
    fn summarize_bins() {
        let mut full = bin(2, 0.0, 0.0, WasteType::Plastic);
        full.spec.status = BinStatus::Full;
        let bins = [bin(1, 0.0, 0.0, WasteType::Plastic), full];

        let summary: BinSummary = bins.iter().map(|bin| &bin.spec).collect();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.by_status[&BinStatus::Empty], 1);
        assert_eq!(summary.by_status[&BinStatus::Full], 1);
        assert_eq!(summary.by_waste_type[&WasteType::Plastic], 2);
    }

    #[test]
    fn wire_names_are_screaming() {
        let value = ::serde_json::to_value(BinStatus::HalfFull).unwrap();
        assert_eq!(value, "HALF_FULL");
        assert_eq!("HALF_FULL".parse::<BinStatus>().unwrap(), BinStatus::HalfFull);
    }
}

use crate::core::{bounds::Bounds, geo::Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visitor facilities drawn as icons on the floorplan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmenityType {
    Restroom,
    WomensRoom,
    MensRoom,
    FamilyRestroom,
    Elevator,
    Escalator,
    Information,
    Tickets,
    Checkroom,
    Dining,
    GiftShop,
    MembersLounge,
    AudioGuide,
    WheelchairRamp,
    Lockers,
}

impl AmenityType {
    pub const ALL: [AmenityType; 15] = [
        AmenityType::Restroom,
        AmenityType::WomensRoom,
        AmenityType::MensRoom,
        AmenityType::FamilyRestroom,
        AmenityType::Elevator,
        AmenityType::Escalator,
        AmenityType::Information,
        AmenityType::Tickets,
        AmenityType::Checkroom,
        AmenityType::Dining,
        AmenityType::GiftShop,
        AmenityType::MembersLounge,
        AmenityType::AudioGuide,
        AmenityType::WheelchairRamp,
        AmenityType::Lockers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AmenityType::Restroom => "restroom",
            AmenityType::WomensRoom => "womens-room",
            AmenityType::MensRoom => "mens-room",
            AmenityType::FamilyRestroom => "family-restroom",
            AmenityType::Elevator => "elevator",
            AmenityType::Escalator => "escalator",
            AmenityType::Information => "information",
            AmenityType::Tickets => "tickets",
            AmenityType::Checkroom => "checkroom",
            AmenityType::Dining => "dining",
            AmenityType::GiftShop => "gift-shop",
            AmenityType::MembersLounge => "members-lounge",
            AmenityType::AudioGuide => "audio-guide",
            AmenityType::WheelchairRamp => "wheelchair-ramp",
            AmenityType::Lockers => "lockers",
        }
    }

    pub fn is_restroom(&self) -> bool {
        matches!(
            self,
            AmenityType::Restroom
                | AmenityType::WomensRoom
                | AmenityType::MensRoom
                | AmenityType::FamilyRestroom
        )
    }
}

impl fmt::Display for AmenityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AmenityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_name(s);
        let amenity = match name.as_str() {
            "restroom" | "restrooms" | "toilet" => AmenityType::Restroom,
            "womens-room" | "women" | "womens-restroom" => AmenityType::WomensRoom,
            "mens-room" | "men" | "mens-restroom" => AmenityType::MensRoom,
            "family-restroom" | "family" => AmenityType::FamilyRestroom,
            "elevator" => AmenityType::Elevator,
            "escalator" => AmenityType::Escalator,
            "information" | "info" => AmenityType::Information,
            "tickets" | "ticket" => AmenityType::Tickets,
            "checkroom" | "coat-check" => AmenityType::Checkroom,
            "dining" | "cafe" | "restaurant" => AmenityType::Dining,
            "gift-shop" | "shop" | "giftshop" => AmenityType::GiftShop,
            "members-lounge" | "member-lounge" | "lounge" => AmenityType::MembersLounge,
            "audio-guide" | "audio" => AmenityType::AudioGuide,
            "wheelchair-ramp" | "wheelchair" => AmenityType::WheelchairRamp,
            "lockers" | "locker" => AmenityType::Lockers,
            _ => return Err(name),
        };
        Ok(amenity)
    }
}

/// Lowercases a drawing-layer name and strips the numeric suffixes that
/// illustration tools append to duplicated ids (`Dining_2_` → `dining`).
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace([' ', '_'], "-");
    let trimmed = lowered.trim_end_matches(|c: char| c == '-' || c.is_ascii_digit());
    if trimmed.is_empty() {
        lowered
    } else {
        trimmed.to_string()
    }
}

/// What a floorplan marker stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandmarkKind {
    Amenity(AmenityType),
    Department(String),
    Space(String),
    Landmark(String),
    Gallery(String),
}

impl LandmarkKind {
    /// Label text, `None` for icon-only amenities
    pub fn text(&self) -> Option<&str> {
        match self {
            LandmarkKind::Amenity(_) => None,
            LandmarkKind::Department(text)
            | LandmarkKind::Space(text)
            | LandmarkKind::Landmark(text)
            | LandmarkKind::Gallery(text) => Some(text),
        }
    }
}

/// A typed marker parsed from a floor's vector description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub kind: LandmarkKind,
    pub position: Point,
    pub floor: usize,
}

/// Everything one floorplan yields, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorplanRecords {
    pub floor: usize,
    /// Page extent in authoring units, when the document declares one
    pub view_box: Option<Bounds>,
    pub amenities: Vec<LandmarkRecord>,
    pub departments: Vec<LandmarkRecord>,
    pub spaces: Vec<LandmarkRecord>,
    pub landmarks: Vec<LandmarkRecord>,
    pub galleries: Vec<LandmarkRecord>,
    /// Markers of unknown or unsupported kind that were dropped
    pub skipped: usize,
}

impl FloorplanRecords {
    pub fn empty(floor: usize) -> Self {
        Self {
            floor,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.amenities.len()
            + self.departments.len()
            + self.spaces.len()
            + self.landmarks.len()
            + self.galleries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records, grouped by layer
    pub fn iter(&self) -> impl Iterator<Item = &LandmarkRecord> {
        self.amenities
            .iter()
            .chain(self.departments.iter())
            .chain(self.spaces.iter())
            .chain(self.landmarks.iter())
            .chain(self.galleries.iter())
    }
}

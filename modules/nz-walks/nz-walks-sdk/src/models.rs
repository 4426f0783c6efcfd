//! Public models for the `nz-walks` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the module and its consumers.

use uuid::Uuid;

/// A geographic region walks belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

/// Data for creating a new region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegion {
    /// Generated when absent.
    pub id: Option<Uuid>,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

/// Full replacement of a region's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionUpdate {
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

impl Region {
    /// Apply a full update, keeping the identifier.
    #[must_use]
    pub fn replaced_with(&self, update: RegionUpdate) -> Self {
        Self {
            id: self.id,
            code: update.code,
            name: update.name,
            region_image_url: update.region_image_url,
        }
    }
}

/// Lookup entity describing how hard a walk is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub id: Uuid,
    pub name: String,
}

/// A walk inside a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

/// Data for creating a new walk.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWalk {
    /// Generated when absent.
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

/// Full replacement of a walk's mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkUpdate {
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

impl Walk {
    /// Apply a full update, keeping the identifier.
    #[must_use]
    pub fn replaced_with(&self, update: WalkUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name,
            description: update.description,
            length_in_km: update.length_in_km,
            walk_image_url: update.walk_image_url,
            region_id: update.region_id,
            difficulty_id: update.difficulty_id,
        }
    }
}

/// Metadata recorded for an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: Uuid,
    pub file_name: String,
    pub file_description: Option<String>,
    /// Lower-cased, including the leading dot (`.png`).
    pub file_extension: String,
    pub file_size_in_bytes: u64,
    /// Publicly addressable URL of the stored file.
    pub file_path: String,
    pub content_type: String,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn region_update_keeps_identifier() {
        let region = Region {
            id: Uuid::new_v4(),
            code: "AKL".to_owned(),
            name: "Auckland".to_owned(),
            region_image_url: None,
        };

        let updated = region.replaced_with(RegionUpdate {
            code: "WGN".to_owned(),
            name: "Wellington".to_owned(),
            region_image_url: Some("https://img/wgn.png".to_owned()),
        });

        assert_eq!(updated.id, region.id);
        assert_eq!(updated.code, "WGN");
        assert_eq!(updated.name, "Wellington");
        assert_eq!(
            updated.region_image_url.as_deref(),
            Some("https://img/wgn.png")
        );
    }

    #[test]
    fn walk_update_replaces_every_mutable_field() {
        let walk = Walk {
            id: Uuid::new_v4(),
            name: "Bay Track".to_owned(),
            description: "Coastal".to_owned(),
            length_in_km: 5.0,
            walk_image_url: Some("https://img/bay.png".to_owned()),
            region_id: Uuid::new_v4(),
            difficulty_id: Uuid::new_v4(),
        };
        let region_id = Uuid::new_v4();
        let difficulty_id = Uuid::new_v4();

        let updated = walk.replaced_with(WalkUpdate {
            name: "Hill Track".to_owned(),
            description: "Steep".to_owned(),
            length_in_km: 12.5,
            walk_image_url: None,
            region_id,
            difficulty_id,
        });

        assert_eq!(updated.id, walk.id);
        assert_eq!(updated.name, "Hill Track");
        assert_eq!(updated.description, "Steep");
        assert!((updated.length_in_km - 12.5).abs() < f64::EPSILON);
        assert_eq!(updated.walk_image_url, None);
        assert_eq!(updated.region_id, region_id);
        assert_eq!(updated.difficulty_id, difficulty_id);
    }
}

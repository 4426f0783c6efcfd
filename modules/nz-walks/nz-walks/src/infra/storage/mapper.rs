use nz_walks_sdk::{Difficulty, Image, Region, Walk};
use sea_orm::ActiveValue::Set;

use crate::infra::storage::entity::{difficulty, image, region, walk};

impl From<region::Model> for Region {
    fn from(m: region::Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            name: m.name,
            region_image_url: m.region_image_url,
        }
    }
}

impl From<Region> for region::ActiveModel {
    fn from(r: Region) -> Self {
        Self {
            id: Set(r.id),
            code: Set(r.code),
            name: Set(r.name),
            region_image_url: Set(r.region_image_url),
        }
    }
}

impl From<difficulty::Model> for Difficulty {
    fn from(m: difficulty::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<walk::Model> for Walk {
    fn from(m: walk::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            length_in_km: m.length_in_km,
            walk_image_url: m.walk_image_url,
            region_id: m.region_id,
            difficulty_id: m.difficulty_id,
        }
    }
}

impl From<Walk> for walk::ActiveModel {
    fn from(w: Walk) -> Self {
        Self {
            id: Set(w.id),
            name: Set(w.name),
            description: Set(w.description),
            length_in_km: Set(w.length_in_km),
            walk_image_url: Set(w.walk_image_url),
            region_id: Set(w.region_id),
            difficulty_id: Set(w.difficulty_id),
        }
    }
}

impl From<image::Model> for Image {
    fn from(m: image::Model) -> Self {
        Self {
            id: m.id,
            file_name: m.file_name,
            file_description: m.file_description,
            file_extension: m.file_extension,
            file_size_in_bytes: u64::try_from(m.file_size_in_bytes).unwrap_or_default(),
            file_path: m.file_path,
            content_type: m.content_type,
        }
    }
}

impl From<Image> for image::ActiveModel {
    fn from(i: Image) -> Self {
        Self {
            id: Set(i.id),
            file_name: Set(i.file_name),
            file_description: Set(i.file_description),
            file_extension: Set(i.file_extension),
            file_size_in_bytes: Set(i64::try_from(i.file_size_in_bytes).unwrap_or(i64::MAX)),
            file_path: Set(i.file_path),
            content_type: Set(i.content_type),
        }
    }
}

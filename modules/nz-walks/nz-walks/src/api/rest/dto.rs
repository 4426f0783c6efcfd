use nz_walks_sdk::{
    Difficulty, Image, NewRegion, NewWalk, Region, RegionUpdate, Walk, WalkQuery, WalkUpdate,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// REST DTO for region representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionDto {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

/// REST DTO for creating a region
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddRegionReq {
    /// Optional ID. If not provided, a UUID v7 will be generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Exactly three characters, e.g. `AKL`
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub region_image_url: Option<String>,
}

/// REST DTO for replacing a region
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegionReq {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub region_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDto {
    pub id: Uuid,
    pub name: String,
}

/// REST DTO for walk representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalkDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

/// REST DTO for creating a walk
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWalkReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    #[serde(default)]
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

/// REST DTO for replacing a walk
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWalkReq {
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    #[serde(default)]
    pub walk_image_url: Option<String>,
    pub region_id: Uuid,
    pub difficulty_id: Uuid,
}

/// Listing parameters for `GET /walks`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WalkListParams {
    /// `Name` or `Description`
    pub filter_on: Option<String>,
    /// Case-insensitive substring
    pub filter_query: Option<String>,
    /// `Name`, `Description` or `Length`
    pub sort_by: Option<String>,
    /// Defaults to `true`
    pub is_ascending: Option<bool>,
    /// 1-based, defaults to 1
    pub page_number: Option<i64>,
    /// Defaults to 1000
    pub page_size: Option<i64>,
}

/// Metadata returned after an upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: Uuid,
    pub file_name: String,
    pub file_description: Option<String>,
    pub file_extension: String,
    pub file_size_in_bytes: u64,
    pub file_path: String,
    pub content_type: String,
}

/// Multipart form accepted by `POST /images/upload` (documentation only)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub file_name: String,
    pub file_description: Option<String>,
}

// Conversion implementations between REST DTOs and contract models
impl From<Region> for RegionDto {
    fn from(r: Region) -> Self {
        Self {
            id: r.id,
            code: r.code,
            name: r.name,
            region_image_url: r.region_image_url,
        }
    }
}

impl From<AddRegionReq> for NewRegion {
    fn from(req: AddRegionReq) -> Self {
        Self {
            id: req.id,
            code: req.code,
            name: req.name,
            region_image_url: req.region_image_url,
        }
    }
}

impl From<UpdateRegionReq> for RegionUpdate {
    fn from(req: UpdateRegionReq) -> Self {
        Self {
            code: req.code,
            name: req.name,
            region_image_url: req.region_image_url,
        }
    }
}

impl From<Difficulty> for DifficultyDto {
    fn from(d: Difficulty) -> Self {
        Self {
            id: d.id,
            name: d.name,
        }
    }
}

impl From<Walk> for WalkDto {
    fn from(w: Walk) -> Self {
        Self {
            id: w.id,
            name: w.name,
            description: w.description,
            length_in_km: w.length_in_km,
            walk_image_url: w.walk_image_url,
            region_id: w.region_id,
            difficulty_id: w.difficulty_id,
        }
    }
}

impl From<AddWalkReq> for NewWalk {
    fn from(req: AddWalkReq) -> Self {
        Self {
            id: req.id,
            name: req.name,
            description: req.description,
            length_in_km: req.length_in_km,
            walk_image_url: req.walk_image_url,
            region_id: req.region_id,
            difficulty_id: req.difficulty_id,
        }
    }
}

impl From<UpdateWalkReq> for WalkUpdate {
    fn from(req: UpdateWalkReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            length_in_km: req.length_in_km,
            walk_image_url: req.walk_image_url,
            region_id: req.region_id,
            difficulty_id: req.difficulty_id,
        }
    }
}

impl From<WalkListParams> for WalkQuery {
    fn from(p: WalkListParams) -> Self {
        Self {
            filter_on: p.filter_on,
            filter_query: p.filter_query,
            sort_by: p.sort_by,
            is_ascending: p.is_ascending,
            page_number: p.page_number,
            page_size: p.page_size,
        }
    }
}

impl From<Image> for ImageDto {
    fn from(i: Image) -> Self {
        Self {
            id: i.id,
            file_name: i.file_name,
            file_description: i.file_description,
            file_extension: i.file_extension,
            file_size_in_bytes: i.file_size_in_bytes,
            file_path: i.file_path,
            content_type: i.content_type,
        }
    }
}

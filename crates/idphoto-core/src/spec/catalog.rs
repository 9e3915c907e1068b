//! The enumerated photo-spec and paper catalogs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{GuideLineSpec, PaperSpec, PhotoSpec, WHITE};

pub const PHOTO_CHINA_PASSPORT: &str = "P.R.China Passport";
pub const PHOTO_US_PASSPORT: &str = "US Passport";
pub const PAPER_4X6: &str = "4x6 inch";
pub const PAPER_5X7: &str = "5x7 inch";

/// Spec selected when an editor session starts.
pub const DEFAULT_PHOTO_SPEC: &str = PHOTO_US_PASSPORT;
/// Paper selected when an editor session starts.
pub const DEFAULT_PAPER: &str = PAPER_4X6;

/// Errors from catalog lookup and loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown photo specification: {0}")]
    UnknownPhotoSpec(String),

    #[error("Unknown paper size: {0}")]
    UnknownPaper(String),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Photo specs and paper sizes keyed by name, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    photo_specs: Vec<PhotoSpec>,
    paper_specs: Vec<PaperSpec>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The fixed catalog shipped with the editor.
    pub fn builtin() -> Self {
        // Both passport formats share the same face placement ranges
        let passport_guides = GuideLineSpec {
            eyes_position_min: 28.0,
            eyes_position_max: 35.0,
            head_size_min: 25.0,
            head_size_max: 35.0,
        };

        Self {
            photo_specs: vec![
                PhotoSpec {
                    name: PHOTO_CHINA_PASSPORT.to_string(),
                    width_mm: 33.0,
                    height_mm: 48.0,
                    dpi: 300,
                    bg_color: WHITE,
                    description: "Chinese Passport (33x48mm)".to_string(),
                    guide_lines: passport_guides,
                },
                PhotoSpec {
                    name: PHOTO_US_PASSPORT.to_string(),
                    width_mm: 51.0,
                    height_mm: 51.0,
                    dpi: 300,
                    bg_color: WHITE,
                    description: "US Passport (51x51mm)".to_string(),
                    guide_lines: passport_guides,
                },
            ],
            paper_specs: vec![
                PaperSpec {
                    name: PAPER_4X6.to_string(),
                    width_mm: 152.4,
                    height_mm: 101.6,
                    dpi: 300,
                    description: "4x6 inch photo paper".to_string(),
                },
                PaperSpec {
                    name: PAPER_5X7.to_string(),
                    width_mm: 177.8,
                    height_mm: 127.0,
                    dpi: 300,
                    description: "5x7 inch photo paper".to_string(),
                },
            ],
        }
    }

    /// Parse a catalog from JSON and validate it.
    ///
    /// The document has the same shape as the serialized catalog:
    /// `{"photo_specs": [...], "paper_specs": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Invalid(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.photo_specs.is_empty() || self.paper_specs.is_empty() {
            return Err(CatalogError::Invalid(
                "catalog needs at least one photo spec and one paper size".to_string(),
            ));
        }
        for spec in &self.photo_specs {
            if spec.width_mm <= 0.0 || spec.height_mm <= 0.0 || spec.dpi == 0 {
                return Err(CatalogError::Invalid(format!(
                    "photo spec '{}' must have positive size and dpi",
                    spec.name
                )));
            }
        }
        for paper in &self.paper_specs {
            if paper.width_mm <= 0.0 || paper.height_mm <= 0.0 || paper.dpi == 0 {
                return Err(CatalogError::Invalid(format!(
                    "paper '{}' must have positive size and dpi",
                    paper.name
                )));
            }
        }
        Ok(())
    }

    pub fn photo_specs(&self) -> &[PhotoSpec] {
        &self.photo_specs
    }

    pub fn paper_specs(&self) -> &[PaperSpec] {
        &self.paper_specs
    }

    /// Look up a photo spec by name.
    pub fn photo(&self, name: &str) -> Result<&PhotoSpec, CatalogError> {
        self.photo_specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| CatalogError::UnknownPhotoSpec(name.to_string()))
    }

    /// Look up a paper size by name.
    pub fn paper(&self, name: &str) -> Result<&PaperSpec, CatalogError> {
        self.paper_specs
            .iter()
            .find(|paper| paper.name == name)
            .ok_or_else(|| CatalogError::UnknownPaper(name.to_string()))
    }
}

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no variants")]
    Empty,
    #[error("variant {name:?}: {field} must be within [0, 1], got {value}")]
    OutOfRange {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("failed to read catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// One selectable product configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub product_line: String,
    pub material: String,
    pub base_color: Rgb,
    /// Perceived brightness of the colorway, drives fog and light targets
    pub luminance: f64,
    /// How glossy the finish reads, feeds the rim light
    pub finish_bias: f64,
}

/// Fixed, ordered list of variants with a cyclic selection cursor
#[derive(Debug, Clone)]
pub struct Catalog {
    variants: Vec<Variant>,
    active: usize,
}

#[derive(Serialize, Deserialize)]
struct CatalogFile {
    variants: Vec<Variant>,
}

impl Catalog {
    pub fn new(variants: Vec<Variant>) -> Result<Self, CatalogError> {
        if variants.is_empty() {
            return Err(CatalogError::Empty);
        }
        for variant in &variants {
            for (field, value) in [
                ("luminance", variant.luminance),
                ("finish_bias", variant.finish_bias),
            ] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(CatalogError::OutOfRange {
                        name: variant.name.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(Catalog {
            variants,
            active: 0,
        })
    }

    /// The three colorways shipped with the viewer
    pub fn builtin() -> Self {
        let variants = vec![
            Variant {
                name: "Midnight".to_string(),
                product_line: "Stride Runner".to_string(),
                material: "Engineered knit".to_string(),
                base_color: Rgb::rgb8(0x1a, 0x1a, 0x1a),
                luminance: 0.1,
                finish_bias: 0.2,
            },
            Variant {
                name: "Glacier".to_string(),
                product_line: "Stride Runner".to_string(),
                material: "Suede overlay".to_string(),
                base_color: Rgb::rgb8(0xd8, 0xe2, 0xec),
                luminance: 0.85,
                finish_bias: 0.4,
            },
            Variant {
                name: "Ember".to_string(),
                product_line: "Stride Trail".to_string(),
                material: "Patent leather".to_string(),
                base_color: Rgb::rgb8(0xc4, 0x45, 0x2d),
                luminance: 0.45,
                finish_bias: 0.9,
            },
        ];
        Catalog {
            variants,
            active: 0,
        }
    }

    /// Loads a catalog from a RON file of the form `(variants: [ ... ])`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile = ron::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Catalog::new(file.variants)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let file = CatalogFile {
            variants: self.variants.clone(),
        };
        ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())
    }

    pub fn active(&self) -> &Variant {
        &self.variants[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Advances to the next variant, wrapping after the last one
    pub fn select_next(&mut self) -> &Variant {
        self.active = (self.active + 1) % self.variants.len();
        &self.variants[self.active]
    }

    pub fn reset(&mut self) {
        self.active = 0;
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Built-in catalog of the Wisconsin breast-cytology features.
//!
//! Holds the 30 features in canonical order with a display label, a group,
//! and a demonstration value used for example pre-fill and as a placeholder
//! hint. Schemas loaded from elsewhere still use this catalog to label
//! features they name.

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::SchemaError;
use crate::field::{FieldSchema, field_key};

/// Measurement group of a catalog feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    /// Mean over all nuclei ("Médias").
    Mean,
    /// Standard error ("Erro (SE)").
    StandardError,
    /// Mean of the three largest values ("Pior (worst)").
    Worst,
}

impl FeatureGroup {
    pub fn title(self) -> &'static str {
        match self {
            FeatureGroup::Mean => "Médias",
            FeatureGroup::StandardError => "Erro (SE)",
            FeatureGroup::Worst => "Pior (worst)",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogEntry {
    /// Raw feature name as used at training time, e.g. `"mean radius"`.
    pub name: &'static str,
    pub label: &'static str,
    pub group: FeatureGroup,
    pub demo: f64,
}

const fn entry(name: &'static str, label: &'static str, group: FeatureGroup, demo: f64) -> CatalogEntry {
    CatalogEntry {
        name,
        label,
        group,
        demo,
    }
}

use FeatureGroup::{Mean, StandardError, Worst};

/// All 30 features in canonical order.
pub const FEATURES: [CatalogEntry; 30] = [
    entry("mean radius", "Raio (média)", Mean, 14.2),
    entry("mean texture", "Textura (média)", Mean, 18.3),
    entry("mean perimeter", "Perímetro (média)", Mean, 92.4),
    entry("mean area", "Área (média)", Mean, 654.4),
    entry("mean smoothness", "Suavidade (média)", Mean, 0.086),
    entry("mean compactness", "Compacidade (média)", Mean, 0.070),
    entry("mean concavity", "Concavidade (média)", Mean, 0.025),
    entry("mean concave points", "Pontos côncavos (média)", Mean, 0.030),
    entry("mean symmetry", "Simetria (média)", Mean, 0.181),
    entry("mean fractal dimension", "Dimensão fractal (média)", Mean, 0.062),
    entry("radius error", "Raio (erro)", StandardError, 0.352),
    entry("texture error", "Textura (erro)", StandardError, 1.21),
    entry("perimeter error", "Perímetro (erro)", StandardError, 2.56),
    entry("area error", "Área (erro)", StandardError, 40.9),
    entry("smoothness error", "Suavidade (erro)", StandardError, 0.005),
    entry("compactness error", "Compacidade (erro)", StandardError, 0.025),
    entry("concavity error", "Concavidade (erro)", StandardError, 0.017),
    entry("concave points error", "Pontos côncavos (erro)", StandardError, 0.006),
    entry("symmetry error", "Simetria (erro)", StandardError, 0.020),
    entry("fractal dimension error", "Dimensão fractal (erro)", StandardError, 0.003),
    entry("worst radius", "Raio (pior)", Worst, 16.1),
    entry("worst texture", "Textura (pior)", Worst, 25.4),
    entry("worst perimeter", "Perímetro (pior)", Worst, 107.2),
    entry("worst area", "Área (pior)", Worst, 880.7),
    entry("worst smoothness", "Suavidade (pior)", Worst, 0.131),
    entry("worst compactness", "Compacidade (pior)", Worst, 0.240),
    entry("worst concavity", "Concavidade (pior)", Worst, 0.186),
    entry("worst concave points", "Pontos côncavos (pior)", Worst, 0.071),
    entry("worst symmetry", "Simetria (pior)", Worst, 0.265),
    entry("worst fractal dimension", "Dimensão fractal (pior)", Worst, 0.095),
];

/// The ten features used by the reduced model, in its training order.
pub const TOP10: [&str; 10] = [
    "worst radius",
    "worst texture",
    "worst perimeter",
    "worst area",
    "worst smoothness",
    "mean radius",
    "mean texture",
    "mean perimeter",
    "mean area",
    "mean symmetry",
];

static BY_KEY: LazyLock<Vec<(String, CatalogEntry)>> = LazyLock::new(|| {
    FEATURES
        .iter()
        .map(|entry| (field_key(entry.name), *entry))
        .collect()
});

/// Find a catalog entry by derived key (see [`field_key`]).
pub fn lookup(key: &str) -> Option<&'static CatalogEntry> {
    BY_KEY.iter().find(|(k, _)| k == key).map(|(_, entry)| entry)
}

/// Which catalog subset to build a schema from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// All 30 features.
    Full,
    /// The reduced 10-feature model.
    #[default]
    Top10,
}

impl Selection {
    pub fn names(self) -> Vec<&'static str> {
        match self {
            Selection::Full => FEATURES.iter().map(|e| e.name).collect(),
            Selection::Top10 => TOP10.to_vec(),
        }
    }

    pub fn schema(self) -> Result<FieldSchema, SchemaError> {
        FieldSchema::from_names(self.names())
    }
}

//! Configuration Module
//! Source files, column mappings and map settings for the four indicator layers.
//!
//! Every default matches the spreadsheets the city publishes, so a run without a
//! configuration file needs nothing but the input files in the working directory.
//! A JSON file may override any subset of the fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Complete run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Directory the source files are resolved against.
    pub input_dir: PathBuf,
    /// Output HTML file.
    pub output: PathBuf,
    pub zoom: u8,
    /// Field separator used for `.csv` sources.
    pub csv_separator: char,
    pub hdi: HdiSource,
    pub urban: UrbanSource,
    pub education: EducationSource,
    pub income: IncomeSource,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output: PathBuf::from("index.html"),
            zoom: 11,
            csv_separator: ',',
            hdi: HdiSource::default(),
            urban: UrbanSource::default(),
            education: EducationSource::default(),
            income: IncomeSource::default(),
        }
    }
}

impl MapConfig {
    /// Load a configuration file; missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve a source file name against the input directory.
    pub fn source_path(&self, file: &str) -> PathBuf {
        self.input_dir.join(file)
    }
}

/// Human Development Index table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HdiSource {
    pub file: String,
    pub layer_name: String,
    pub name_column: String,
    pub value_column: String,
    pub class_column: String,
    pub latitude_column: String,
    pub longitude_column: String,
}

impl Default for HdiSource {
    fn default() -> Self {
        Self {
            file: "IDH.xlsx".to_string(),
            layer_name: "IDH dos Bairros".to_string(),
            name_column: "Bairro".to_string(),
            value_column: "Valor".to_string(),
            class_column: "Classificação IDH".to_string(),
            latitude_column: "Latitude (generated)".to_string(),
            longitude_column: "Longitude (generated)".to_string(),
        }
    }
}

/// Urban well-being (IBEU) table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrbanSource {
    pub file: String,
    pub layer_name: String,
    pub name_column: String,
    pub class_column: String,
    pub environmental_column: String,
    pub housing_column: String,
    pub latitude_column: String,
    pub longitude_column: String,
}

impl Default for UrbanSource {
    fn default() -> Self {
        Self {
            file: "IBEU_data.xlsx".to_string(),
            layer_name: "Condições Urbanas".to_string(),
            name_column: "Bairro".to_string(),
            class_column: "Classificação".to_string(),
            environmental_column: "Condições Ambientais Urbanas (D2)".to_string(),
            housing_column: "Condições Habitacionais Urbanas (D3)".to_string(),
            latitude_column: "Latitude (generated)".to_string(),
            longitude_column: "Longitude (generated)".to_string(),
        }
    }
}

/// Educational attainment table, one row per area of weighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationSource {
    pub file: String,
    pub layer_name: String,
    /// Expected header of the area column. When absent the first column is used.
    pub area_column: String,
    /// Neighborhood column, shown in the popup when present.
    pub neighborhood_column: String,
    /// Percentage shares ordered from lowest to highest attainment.
    pub share_columns: [String; 4],
    pub latitude_column: String,
    pub longitude_column: String,
    pub legend_caption: String,
}

impl Default for EducationSource {
    fn default() -> Self {
        Self {
            file: "IDE.xlsx".to_string(),
            layer_name: "Índice de Desenvolvimento Educacional (IDE)".to_string(),
            area_column: "Nome da Área de Ponderação".to_string(),
            neighborhood_column: "Bairro".to_string(),
            share_columns: [
                "IDE-1: Sem instrução e fundamental incompleto (A)".to_string(),
                "IDE-2: Fundamental completo e médio incompleto (B)".to_string(),
                "IDE-3: Médio completo e superior incompleto (C)".to_string(),
                "IDE-4: Superior completo (D)".to_string(),
            ],
            latitude_column: "Latitude (gerada)".to_string(),
            longitude_column: "Longitude (gerada)".to_string(),
            legend_caption: "Nível Médio de Educação (IDE)".to_string(),
        }
    }
}

/// Family income table (merged demographic sheet).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeSource {
    pub file: String,
    pub layer_name: String,
    /// Aliases for the area name, first match wins.
    pub name_columns: Vec<String>,
    pub income_column: String,
    pub class_column: String,
    pub latitude_column: String,
    pub longitude_column: String,
}

impl Default for IncomeSource {
    fn default() -> Self {
        Self {
            file: "Renda.xlsx".to_string(),
            layer_name: "Renda Familiar".to_string(),
            name_columns: vec!["Nome do Bairro".to_string(), "Bairro".to_string()],
            income_column: "Renda Média".to_string(),
            class_column: "Faixa de Renda".to_string(),
            latitude_column: "Latitude (generated)".to_string(),
            longitude_column: "Longitude (generated)".to_string(),
        }
    }
}

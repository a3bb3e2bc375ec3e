use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::BillingError;
use super::numbering::{NumberingScheme, ReceiptGeneration};
use super::types::Organization;

/// Deployment settings.
///
/// Every field has a default, so a configuration file only needs the keys
/// it changes:
///
/// ```toml
/// generation = "modern"
/// prefix = "LSK"
/// logo = "assets/logo.png"
///
/// [organization]
/// name = "LITTLE SKY KIDS"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub organization: Organization,
    pub generation: ReceiptGeneration,
    /// Literal prefix of every invoice number.
    pub prefix: String,
    /// File holding the last issued counter value.
    pub counter_path: PathBuf,
    /// Folder receipts go to when the caller does not pick one.
    pub output_dir: Option<PathBuf>,
    /// Optional logo printed top-left. A missing file is tolerated.
    pub logo: Option<PathBuf>,
    pub layout: PageLayout,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            organization: Organization::default(),
            generation: ReceiptGeneration::default(),
            prefix: "LSK".into(),
            counter_path: PathBuf::from("data").join("invoice_counter.txt"),
            output_dir: None,
            logo: None,
            layout: PageLayout::default(),
        }
    }
}

impl BillingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, BillingError> {
        toml::from_str(s).map_err(|e| BillingError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BillingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BillingError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn numbering(&self) -> NumberingScheme {
        self.generation.numbering(self.prefix.clone())
    }

    /// Configured output folder, or `~/Desktop/Invoices`.
    pub fn default_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join("Desktop").join("Invoices")
    }
}

/// Page geometry in millimetres. The page itself is always A4 portrait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Left, right and top margin.
    pub margin_mm: f32,
    /// Content that would cross this distance from the bottom edge
    /// continues on a new page.
    pub bottom_margin_mm: f32,
    /// Printed width of the logo; height follows the image's aspect ratio.
    pub logo_width_mm: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            bottom_margin_mm: 15.0,
            logo_width_mm: 25.0,
        }
    }
}

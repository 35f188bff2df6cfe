use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

/// Relative importances of the four score components. They do not need to
/// sum to 1.0.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub pct_off: f64,
    pub abs_saving: f64,
    pub cheapness: f64,
    pub keyword_brand: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            pct_off: 0.30,
            abs_saving: 0.25,
            cheapness: 0.05,
            keyword_brand: 0.40,
        }
    }
}

/// Tunables consumed by the scorer. Tests override individual fields without
/// touching any shared state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub keywords: Vec<String>,
    pub brand_weights: HashMap<String, f64>,
    /// Flat boost added once per matched keyword.
    pub keyword_boost: f64,
    pub weights: Weights,
    /// Ceiling on the parsed percent-off, so one outlier label cannot
    /// dominate the score.
    pub pct_off_cap: f64,
    /// "Large saving" anchor, in whole currency units.
    pub saving_reference: f64,
    /// Keyword/brand points needed to max out that component.
    pub bonus_saturation: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        let keywords = ["ps5", "playstation", "starlink", "rtx", "tv", "hisense", "samsung", "asus", "hp"]
            .iter()
            .map(|kw| kw.to_string())
            .collect();
        let brand_weights = HashMap::from([
            ("hp".to_string(), 5.0),
            ("asus".to_string(), 5.0),
            ("samsung".to_string(), 7.0),
            ("hisense".to_string(), 3.0),
            ("philips".to_string(), 3.0),
            ("philco".to_string(), 2.0),
            ("playstation".to_string(), 10.0),
        ]);
        Self {
            keywords,
            brand_weights,
            keyword_boost: 15.0,
            weights: Weights::default(),
            pct_off_cap: 80.0,
            saving_reference: 2_000_000.0,
            bonus_saturation: 30.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input_url: String,
    pub output_file: String,
    pub download_images: bool,
    pub images_dir: String,
    pub score: ScoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_url: "https://www.mercadolibre.com.ar/ofertas".to_string(),
            output_file: "articulos_mercado.csv".to_string(),
            download_images: true,
            images_dir: "imagenes".to_string(),
            score: ScoreConfig::default(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

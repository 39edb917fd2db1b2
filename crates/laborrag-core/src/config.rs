//! Lightweight configuration loader, typed settings and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_RETRIEVAL__TOP_K=5`). Every settings
//! section has defaults, so an empty configuration is valid.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::segment::SegmentStrategy;
use crate::{Error, Result};

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Loads `config.toml` and the environment overlay from the working directory.
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("config.toml"), &env_name)
    }

    /// Loads an explicit config file; `config.<env>.toml` next to it is merged
    /// on top when present.
    pub fn load_from(path: &Path, env_name: &str) -> anyhow::Result<Self> {
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut figment = Figment::new().merge(Toml::file(path));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment, base_dir })
    }

    /// Builds a config from an in-memory TOML string. Environment variables are
    /// not consulted.
    pub fn from_toml_str(toml: &str, base_dir: &Path) -> Self {
        let figment = Figment::new().merge(Toml::string(toml));
        Self { figment, base_dir: base_dir.to_path_buf() }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extracts and validates the full typed settings tree.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?;
        settings.base_dir = self.base_dir.clone();
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub documents: DocumentSettings,
    pub segment: SegmentSettings,
    pub retrieval: RetrievalSettings,
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
    pub server: ServerSettings,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segment;
        if seg.window_size == 0 {
            return Err(Error::InvalidConfig("segment.window_size must be > 0".into()));
        }
        if seg.overlap >= seg.window_size {
            return Err(Error::InvalidConfig(format!(
                "segment.overlap ({}) must be smaller than segment.window_size ({})",
                seg.overlap, seg.window_size
            )));
        }
        if !(0.0..1.0).contains(&seg.sentence_cut_ratio) {
            return Err(Error::InvalidConfig("segment.sentence_cut_ratio must be in [0, 1)".into()));
        }
        if self.retrieval.top_k == 0 || self.server.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be > 0".into()));
        }
        if self.embedding.batch_size == 0 {
            return Err(Error::InvalidConfig("embedding.batch_size must be > 0".into()));
        }
        if !(0.0..=0.1).contains(&self.generation.temperature) {
            return Err(Error::InvalidConfig(format!(
                "generation.temperature must be within 0.0..=0.1, got {}",
                self.generation.temperature
            )));
        }
        Ok(())
    }

    /// Resolves a configured path against `base_dir`.
    pub fn resolve<S: AsRef<str>>(&self, p: S) -> PathBuf {
        resolve_with_base(&self.base_dir, p)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Directory scanned recursively for `.pdf` and `.txt` files.
    pub dir: Option<String>,
    /// Explicit document list; takes precedence over `dir` when non-empty.
    pub files: Vec<String>,
    pub overrides: Vec<StrategyOverride>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self { dir: Some("data".to_string()), files: Vec::new(), overrides: Vec::new() }
    }
}

/// Pins the segmentation strategy for a document by file name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StrategyOverride {
    pub file: String,
    pub strategy: SegmentStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentSettings {
    pub window_size: usize,
    pub overlap: usize,
    pub sentence_cut_ratio: f32,
    pub article_max_chars: usize,
    pub min_fragment_chars: usize,
    pub ocr_max_chars: usize,
    pub ocr_min_block_chars: usize,
    pub ocr_fallback_chars: usize,
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self {
            window_size: 800,
            overlap: 200,
            sentence_cut_ratio: 0.4,
            article_max_chars: 1500,
            min_fragment_chars: 50,
            ocr_max_chars: 1500,
            ocr_min_block_chars: 50,
            ocr_fallback_chars: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: usize,
    /// Semantic candidates fetched per requested result.
    pub candidate_multiplier: usize,
    pub distance_threshold: f32,
    pub keywords: Vec<String>,
    pub keyword_cap: usize,
    /// Keyword matches are kept even when their distance is above threshold
    /// or they have no semantic distance at all.
    pub keyword_bypass_threshold: bool,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 8,
            candidate_multiplier: 2,
            distance_threshold: 1.5,
            keywords: ["임금", "휴가", "근로시간", "해고", "계약", "휴일", "수당"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            keyword_cap: 5,
            keyword_bypass_threshold: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// `openai` or `fake`.
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub dimensions: Option<usize>,
    pub batch_size: usize,
    pub timeout_secs: u64,
    pub max_retries: usize,
    /// Vector size produced by the fake provider.
    pub fake_dim: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            dimensions: None,
            batch_size: 512,
            timeout_secs: 60,
            max_retries: 3,
            fake_dim: 256,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
    pub max_retries: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: None,
            timeout_secs: 60,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub top_k: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: "0.0.0.0:5000".to_string(), top_k: 5 }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

use std::path::{Path, PathBuf};

use crate::config::{DocumentSettings, SegmentSettings, Settings, StrategyOverride};
use crate::extract::ExtractorRegistry;
use crate::segment::SegmentStrategy;
use crate::traits::TextExtractor;
use crate::types::Corpus;
use crate::{Error, Result};

/// Builds a [`Corpus`] from source documents: extract, classify, segment.
pub struct DataProcessor {
    segment: SegmentSettings,
    overrides: Vec<StrategyOverride>,
    extractor: Box<dyn TextExtractor>,
}

impl Default for DataProcessor {
    fn default() -> Self {
        Self::new(SegmentSettings::default())
    }
}

impl DataProcessor {
    pub fn new(segment: SegmentSettings) -> Self {
        Self { segment, overrides: Vec::new(), extractor: Box::new(ExtractorRegistry::default()) }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.segment.clone()).with_overrides(settings.documents.overrides.clone())
    }

    pub fn with_overrides(mut self, overrides: Vec<StrategyOverride>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Strategy for a document: an explicit override wins over name hints.
    pub fn strategy_for(&self, source_name: &str) -> SegmentStrategy {
        self.overrides
            .iter()
            .find(|o| o.file == source_name)
            .map(|o| o.strategy)
            .unwrap_or_else(|| SegmentStrategy::classify(source_name))
    }

    pub fn process_directory(&self, data_dir: &Path) -> Result<Corpus> {
        self.process_paths(&list_document_files(data_dir))
    }

    pub fn process_directory_limited(&self, data_dir: &Path, limit: usize) -> Result<Corpus> {
        let mut files = list_document_files(data_dir);
        if files.len() > limit {
            files.truncate(limit);
            tracing::info!(limit, "limited ingestion to first {} files", limit);
        }
        self.process_paths(&files)
    }

    /// Extracts and segments every path in order. The first unreadable
    /// document aborts the build.
    pub fn process_paths(&self, paths: &[PathBuf]) -> Result<Corpus> {
        let mut corpus = Corpus::new();
        if paths.is_empty() {
            tracing::warn!("no documents to ingest");
            return Ok(corpus);
        }
        for (file_index, path) in paths.iter().enumerate() {
            tracing::info!("Processing file {}/{}: {}", file_index + 1, paths.len(), path.display());
            let raw = self.extractor.extract(path)?;
            self.ingest_text(&mut corpus, path, &raw);
        }
        tracing::info!(
            documents = corpus.documents().len(),
            chunks = corpus.len(),
            "processed {} files into {} chunks",
            paths.len(),
            corpus.len()
        );
        Ok(corpus)
    }

    /// Segments already-extracted text and appends it to `corpus` as a new
    /// document. Returns the assigned `doc_id`.
    pub fn ingest_text(&self, corpus: &mut Corpus, path: &Path, raw: &str) -> usize {
        let source = display_name(path);
        let strategy = self.strategy_for(&source);
        let segmenter = strategy.segmenter(&self.segment);
        let segments = segmenter.segment(raw);
        if segments.is_empty() {
            tracing::warn!(%source, "document produced no chunks");
        }
        tracing::debug!(%source, segmenter = segmenter.name(), chunks = segments.len(), "segmented document");
        corpus.push_document(&source, path.to_path_buf(), strategy, segments)
    }
}

/// Paths of the configured documents: the explicit `files` list when given,
/// otherwise everything supported under `dir`.
pub fn resolve_document_paths(settings: &Settings) -> Result<Vec<PathBuf>> {
    let docs: &DocumentSettings = &settings.documents;
    if !docs.files.is_empty() {
        let paths: Vec<PathBuf> = docs.files.iter().map(|f| settings.resolve(f)).collect();
        if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
            return Err(Error::Extraction {
                source_name: display_name(missing),
                reason: format!("file not found: {}", missing.display()),
            });
        }
        return Ok(paths);
    }
    match &docs.dir {
        Some(dir) => {
            let dir = settings.resolve(dir);
            if !dir.is_dir() {
                return Err(Error::InvalidConfig(format!("documents.dir {} is not a directory", dir.display())));
            }
            Ok(list_document_files(&dir))
        }
        None => Ok(Vec::new()),
    }
}

/// Supported document files under `root`, sorted by path.
pub fn list_document_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| ExtractorRegistry::supports(p))
        .collect();
    files.sort();
    files
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

//! Configuration loading and parsing.
//!
//! Parses `livepad.toml` (or an override path provided by the binary). Every
//! field has a default so a missing file, a missing section, or a file that
//! fails to parse all yield a working configuration. Unknown fields are
//! ignored so older binaries tolerate newer files.
//!
//! ```toml
//! [suggest]
//! classify_delay_ms = 10
//! highlight_first = true
//! supersede_pending = true
//! filter_tags_by_prefix = false
//!
//! [triggers]
//! markup = "< "
//! style = ": "
//! script = "."
//!
//! [preview]
//! debounce_ms = 1000
//! auto_run = true
//! ```
//!
//! The single persisted user preference (theme) lives in [`preferences`], not
//! in this file.

use anyhow::Result;
use core_suggest::{ClassifierOptions, EditorKind, TriggerChar, TriggerSet};
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub mod preferences;
pub use preferences::{PreferenceStore, Theme, ThemeParseError};

/// Upper bound for the deferred classification delay; anything longer feels like lag.
pub const MAX_CLASSIFY_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestConfig {
    #[serde(default = "SuggestConfig::default_classify_delay_ms")]
    pub classify_delay_ms: u64,
    #[serde(default = "default_true")]
    pub highlight_first: bool,
    #[serde(default = "default_true")]
    pub supersede_pending: bool,
    #[serde(default)]
    pub filter_tags_by_prefix: bool,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            classify_delay_ms: Self::default_classify_delay_ms(),
            highlight_first: true,
            supersede_pending: true,
            filter_tags_by_prefix: false,
        }
    }
}

impl SuggestConfig {
    const fn default_classify_delay_ms() -> u64 {
        10
    }
}

const fn default_true() -> bool {
    true
}

/// Trigger characters per editor, written as a plain string (`"< "` = angle + space).
#[derive(Debug, Deserialize, Clone)]
pub struct TriggerConfig {
    #[serde(default = "TriggerConfig::default_markup")]
    pub markup: String,
    #[serde(default = "TriggerConfig::default_style")]
    pub style: String,
    #[serde(default = "TriggerConfig::default_script")]
    pub script: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            markup: Self::default_markup(),
            style: Self::default_style(),
            script: Self::default_script(),
        }
    }
}

impl TriggerConfig {
    fn default_markup() -> String {
        Self::render(EditorKind::Markup)
    }
    fn default_style() -> String {
        Self::render(EditorKind::Style)
    }
    fn default_script() -> String {
        Self::render(EditorKind::Script)
    }

    fn render(kind: EditorKind) -> String {
        kind.default_triggers().iter().map(TriggerChar::as_char).collect()
    }

    fn raw(&self, kind: EditorKind) -> &str {
        match kind {
            EditorKind::Markup => &self.markup,
            EditorKind::Style => &self.style,
            EditorKind::Script => &self.script,
        }
    }

    /// Parse the configured string for `kind`, dropping (and logging) non-trigger chars.
    pub fn resolve(&self, kind: EditorKind) -> TriggerSet {
        let mut accepted = Vec::new();
        for c in self.raw(kind).chars() {
            match TriggerChar::try_from(c) {
                Ok(t) => accepted.push(t),
                Err(err) => warn!(target: "config", editor = kind.label(), %err, "trigger_ignored"),
            }
        }
        TriggerSet::new(accepted)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreviewConfig {
    #[serde(default = "PreviewConfig::default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_true")]
    pub auto_run: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
            auto_run: true,
        }
    }
}

impl PreviewConfig {
    const fn default_debounce_ms() -> u64 {
        1000
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub triggers: TriggerConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub path: Option<PathBuf>,
}

/// Best-effort config path: `livepad.toml` in the working directory, else the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("livepad.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("livepad").join("livepad.toml");
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                path: Some(path),
            })
        }
        Err(err) => {
            warn!(target: "config", path = %path.display(), %err, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn triggers_for(&self, kind: EditorKind) -> TriggerSet {
        self.file.triggers.resolve(kind)
    }

    /// Deferred classification delay, clamped to `MAX_CLASSIFY_DELAY_MS`.
    pub fn classify_delay(&self) -> Duration {
        let raw = self.file.suggest.classify_delay_ms;
        let clamped = raw.min(MAX_CLASSIFY_DELAY_MS);
        if clamped != raw {
            info!(target: "config", raw, clamped, "classify_delay_clamped");
        }
        Duration::from_millis(clamped)
    }

    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.file.preview.debounce_ms)
    }

    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            filter_tags_by_prefix: self.file.suggest.filter_tags_by_prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file.suggest.classify_delay_ms, 10);
        assert!(cfg.file.suggest.highlight_first);
        assert!(cfg.file.suggest.supersede_pending);
        assert!(!cfg.file.suggest.filter_tags_by_prefix);
        assert_eq!(cfg.preview_debounce(), Duration::from_millis(1000));
        assert!(cfg.file.preview.auto_run);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn default_triggers_match_editor_defaults() {
        let cfg = Config::default();
        for kind in EditorKind::ALL {
            assert_eq!(cfg.triggers_for(kind), kind.default_triggers());
        }
        assert_eq!(cfg.file.triggers.markup, "< ");
    }

    #[test]
    fn parses_suggest_and_preview_sections() {
        let tmp = write_config(
            "[suggest]\nclassify_delay_ms = 25\nhighlight_first = false\nfilter_tags_by_prefix = true\n\
             [preview]\ndebounce_ms = 300\nauto_run = false\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.classify_delay(), Duration::from_millis(25));
        assert!(!cfg.file.suggest.highlight_first);
        assert!(cfg.file.suggest.supersede_pending, "unset field keeps default");
        assert!(cfg.classifier_options().filter_tags_by_prefix);
        assert_eq!(cfg.preview_debounce(), Duration::from_millis(300));
        assert!(!cfg.file.preview.auto_run);
        assert_eq!(cfg.path.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn custom_triggers_drop_unknown_chars() {
        let tmp = write_config("[triggers]\nscript = \".:x\"\nmarkup = \"<\"\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let script = cfg.triggers_for(EditorKind::Script);
        assert!(script.contains(TriggerChar::Dot));
        assert!(script.contains(TriggerChar::Colon));
        assert_eq!(script.iter().count(), 2);
        assert!(!cfg.triggers_for(EditorKind::Markup).contains(TriggerChar::Space));
        assert_eq!(
            cfg.triggers_for(EditorKind::Style),
            EditorKind::Style.default_triggers()
        );
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[suggest\nclassify_delay_ms = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.file.suggest.classify_delay_ms, 10);
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = write_config("[suggest]\nclassify_delay_ms = 5000\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let delay = with_default(subscriber, || cfg.classify_delay());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("classify_delay_clamped"));
        assert_eq!(delay, Duration::from_millis(MAX_CLASSIFY_DELAY_MS));
    }
}

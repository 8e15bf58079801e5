/// The realiser: specification tree → text.
///
/// Runs syntax, morphology and orthography in turn and hands the result
/// to an optional formatter. Built via `Realiser::builder()`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::core::factory::NlgFactory;
use crate::core::format::{Formatter, FormatterKind};
use crate::core::lexicon::{Lexicon, LexiconError, MemoryLexicon};
use crate::core::morphology::MorphologyProcessor;
use crate::core::orthography::OrthographyProcessor;
use crate::core::syntax::SyntaxProcessor;
use crate::schema::category::DocumentCategory;
use crate::schema::document::DocumentElement;
use crate::schema::element::Element;

#[derive(Debug, Error)]
pub enum RealiserError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Realiser settings, loadable from RON. Missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealiserConfig {
    pub comma_sep_premodifiers: bool,
    pub comma_sep_cuephrase: bool,
    /// Log a snapshot of the tree after every stage.
    pub debug: bool,
    pub formatter: FormatterKind,
}

impl Default for RealiserConfig {
    fn default() -> Self {
        Self {
            comma_sep_premodifiers: true,
            comma_sep_cuephrase: false,
            debug: false,
            formatter: FormatterKind::Text,
        }
    }
}

impl RealiserConfig {
    pub fn load_from_ron(path: &Path) -> Result<RealiserConfig, RealiserError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<RealiserConfig, RealiserError> {
        Ok(ron::from_str(input)?)
    }
}

/// A pipeline stage, as named in trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Syntax,
    Morphology,
    Orthography,
    Format,
}

/// The tree as it stood after one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub stage: Stage,
    pub tree: String,
}

/// Turns specification trees into realised text.
pub struct Realiser {
    factory: NlgFactory,
    syntax: SyntaxProcessor,
    morphology: MorphologyProcessor,
    orthography: OrthographyProcessor,
    formatter: Option<Box<dyn Formatter>>,
    debug: bool,
}

/// Builder for constructing a `Realiser`.
pub struct RealiserBuilder {
    lexicon_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    /// Directly provided lexicon (otherwise the embedded default).
    lexicon: Option<Arc<dyn Lexicon>>,
    /// Directly provided settings (otherwise the defaults).
    config: Option<RealiserConfig>,
    /// Overrides the formatter named by the settings.
    formatter: Option<Option<Box<dyn Formatter>>>,
    debug: Option<bool>,
}

impl Realiser {
    pub fn builder() -> RealiserBuilder {
        RealiserBuilder {
            lexicon_path: None,
            config_path: None,
            lexicon: None,
            config: None,
            formatter: None,
            debug: None,
        }
    }

    /// A realiser over `lexicon` with default settings.
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self::with_config(lexicon, &RealiserConfig::default())
    }

    pub fn with_config(lexicon: Arc<dyn Lexicon>, config: &RealiserConfig) -> Self {
        let factory = NlgFactory::new(Arc::clone(&lexicon));
        Self {
            syntax: SyntaxProcessor::new(factory.clone()),
            morphology: MorphologyProcessor::new(lexicon),
            orthography: OrthographyProcessor::new()
                .with_comma_sep_premodifiers(config.comma_sep_premodifiers)
                .with_comma_sep_cuephrase(config.comma_sep_cuephrase),
            formatter: config.formatter.build(),
            debug: config.debug,
            factory,
        }
    }

    /// A factory over the same lexicon, for building input trees.
    pub fn factory(&self) -> &NlgFactory {
        &self.factory
    }

    pub fn lexicon(&self) -> &Arc<dyn Lexicon> {
        self.factory.lexicon()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_formatter(&mut self, formatter: Option<Box<dyn Formatter>>) {
        self.formatter = formatter;
    }

    /// Realise a tree. With a formatter the result is canned text holding
    /// the formatted string; without one it is the orthography output.
    pub fn realise(&self, element: &Element) -> Element {
        self.run(element, None)
    }

    pub fn realise_all(&self, elements: &[Element]) -> Vec<Element> {
        elements.iter().map(|element| self.realise(element)).collect()
    }

    /// Realise a tree and return the snapshot taken after each stage.
    pub fn trace(&self, element: &Element) -> (Element, Vec<Snapshot>) {
        let mut snapshots = Vec::new();
        let realised = self.run(element, Some(&mut snapshots));
        (realised, snapshots)
    }

    /// Realise a phrase as a sentence and return its text: "Mary chased
    /// the monkey." Document elements are realised as they are.
    pub fn realise_sentence(&self, element: &Element) -> String {
        let realised = match element {
            Element::Document(_) => self.realise(element),
            other => {
                let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
                sentence.add_component(other.clone());
                self.realise(&Element::Document(sentence))
            }
        };
        realised.realisation().to_string()
    }

    fn run(&self, element: &Element, mut snapshots: Option<&mut Vec<Snapshot>>) -> Element {
        let mut record = |stage: Stage, tree: &Element| {
            if self.debug {
                log::debug!("{:?}:\n{}", stage, tree.print_tree());
            }
            if let Some(snapshots) = snapshots.as_deref_mut() {
                snapshots.push(Snapshot {
                    stage,
                    tree: tree.print_tree(),
                });
            }
        };

        record(Stage::Input, element);
        let Some(realised) = self.syntax.realise(element) else {
            return Element::canned("");
        };
        record(Stage::Syntax, &realised);
        let realised = self.morphology.realise(&realised);
        record(Stage::Morphology, &realised);
        let realised = self.orthography.realise(&realised);
        record(Stage::Orthography, &realised);
        match &self.formatter {
            Some(formatter) => {
                let formatted = Element::canned(formatter.format(&realised));
                record(Stage::Format, &formatted);
                formatted
            }
            None => realised,
        }
    }
}

impl RealiserBuilder {
    /// Load the lexicon from a RON file.
    pub fn lexicon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon_path = Some(path.into());
        self
    }

    /// Load settings from a RON file.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_lexicon(mut self, lexicon: Arc<dyn Lexicon>) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn with_config(mut self, config: RealiserConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this formatter, or none, whatever the settings say.
    pub fn with_formatter(mut self, formatter: Option<Box<dyn Formatter>>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn build(self) -> Result<Realiser, RealiserError> {
        let lexicon: Arc<dyn Lexicon> = match (self.lexicon, &self.lexicon_path) {
            (Some(lexicon), _) => lexicon,
            (None, Some(path)) => Arc::new(MemoryLexicon::load_from_ron(path)?),
            (None, None) => Arc::new(MemoryLexicon::default_lexicon()?),
        };
        let mut config = match (self.config, &self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => RealiserConfig::load_from_ron(path)?,
            (None, None) => RealiserConfig::default(),
        };
        if let Some(debug) = self.debug {
            config.debug = debug;
        }

        let mut realiser = Realiser::with_config(lexicon, &config);
        if let Some(formatter) = self.formatter {
            realiser.formatter = formatter;
        }
        Ok(realiser)
    }
}

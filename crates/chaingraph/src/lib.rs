//! Chaingraph - dependency graphs from `rmod` chain documents.
//!
//! An `rmod` XML document lists named chains of elements that reference
//! each other by label. This crate builds one directed graph per chain,
//! checks its structure, and emits it as Graphviz DOT text plus an image
//! rendered by an external Graphviz command.

pub mod config;
pub mod export;
pub mod structure;

mod error;

pub use chaingraph_parser::{self as parser, DiagnosticError};

pub use error::ChaingraphError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use config::AppConfig;
use export::{dot::DotExporter, render::Renderer};
use structure::Chain;

/// Files written for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    dot: PathBuf,
    image: Option<PathBuf>,
}

impl Artifacts {
    /// The written DOT file.
    pub fn dot(&self) -> &Path {
        &self.dot
    }

    /// The rendered image, `None` when rendering is disabled.
    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }
}

/// Builder for parsing chain documents and emitting their graphs.
///
/// # Examples
///
/// ```rust,no_run
/// use chaingraph::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
///     <rmod>
///         <chain>
///             <name>Demo Chain</name>
///             <element><label>A</label><type>pump</type><child>B</child></element>
///             <element><label>B</label><type>valve</type><parent/></element>
///         </chain>
///     </rmod>
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse and build every chain
/// let chains = builder.parse(source).expect("Failed to parse");
///
/// // Write `Demo_Chain.dot` and render `Demo_Chain.svg`
/// let artifacts = builder.emit_all(&chains, "out").expect("Failed to emit");
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a document and build all of its chains.
    ///
    /// Nothing is returned unless every chain is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ChaingraphError::Diagnostic`] with every parse problem of
    /// the document, or, if it parsed, every structure problem of its chains.
    ///
    /// # Examples
    ///
    /// ```
    /// use chaingraph::DiagramBuilder;
    ///
    /// let source = "<rmod><chain><name>c</name>\
    ///     <element><label>A</label><type>t</type><child>B</child></element>\
    ///     <element><label>B</label><type>t</type><parent/></element>\
    /// </chain></rmod>";
    ///
    /// let chains = DiagramBuilder::default().parse(source).expect("valid document");
    /// assert_eq!(chains[0].root().label(), "A");
    /// ```
    pub fn parse(&self, source: &str) -> Result<Vec<Chain>, ChaingraphError> {
        info!("Parsing document");
        let records = chaingraph_parser::parse(source)
            .map_err(|err| ChaingraphError::new_diagnostic_error(err, source))?;
        debug!(chains_count = records.len(); "Document parsed");
        trace!(records:?; "Parsed records");

        info!("Building chain graphs");
        let chains = structure::build_chains(&records)
            .map_err(|err| ChaingraphError::new_diagnostic_error(err, source))?;
        info!(chains_count = chains.len(); "Chains built");

        Ok(chains)
    }

    /// Render a chain as DOT text.
    pub fn to_dot(&self, chain: &Chain) -> String {
        DotExporter::new(self.config.style()).to_dot(chain)
    }

    /// Write the DOT file of `chain` into `out_dir` and, if enabled, render
    /// its image next to it.
    ///
    /// Both files are named after [`Chain::base_name`].
    ///
    /// # Errors
    ///
    /// Returns [`ChaingraphError::Export`] if the DOT file cannot be written
    /// or the renderer fails. A DOT file written before a render failure is
    /// kept.
    pub fn emit(&self, chain: &Chain, out_dir: impl AsRef<Path>) -> Result<Artifacts, ChaingraphError> {
        let dot = out_dir
            .as_ref()
            .join(format!("{}.dot", chain.base_name()));
        DotExporter::new(self.config.style()).write(chain, &dot)?;
        info!(chain = chain.name(), path:? = dot; "DOT file written");

        let render = self.config.render();
        if !render.enabled() {
            return Ok(Artifacts { dot, image: None });
        }

        let renderer = Renderer::from_config(render);
        let image = renderer.image_path(&dot);
        renderer.render(&dot, &image)?;

        Ok(Artifacts {
            dot,
            image: Some(image),
        })
    }

    /// Emit every chain into `out_dir`, creating the directory if needed.
    ///
    /// Chains are emitted in order; the first failure stops the run.
    ///
    /// # Errors
    ///
    /// Returns [`ChaingraphError::Io`] if the directory cannot be created,
    /// and otherwise the first error of [`DiagramBuilder::emit`].
    pub fn emit_all(
        &self,
        chains: &[Chain],
        out_dir: impl AsRef<Path>,
    ) -> Result<Vec<Artifacts>, ChaingraphError> {
        let out_dir = out_dir.as_ref();
        fs::create_dir_all(out_dir)?;

        chains.iter().map(|chain| self.emit(chain, out_dir)).collect()
    }
}

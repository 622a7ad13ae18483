//! Rendering of [`ChaingraphError`] through miette.
//!
//! Every error is flattened into one or more [`Report`]s. A
//! [`ChaingraphError::Diagnostic`] yields one report per diagnostic, each
//! pointing into the XML source; I/O and export errors yield a single
//! report without a source location.

use std::{error::Error as StdError, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use chaingraph::ChaingraphError;
use chaingraph_parser::error::{Diagnostic, Label};

/// One renderable error.
///
/// Reports are always errors; warnings never reach the CLI's error path.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: Option<String>,
    help: Option<&'a str>,
    labels: Vec<LabeledSpan>,
    src: Option<&'a str>,
    cause: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Report<'a> {
    /// A report for a diagnostic located in `src`.
    pub fn located(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self {
            message: diag.message().to_string(),
            code: diag.code().map(|code| code.to_string()),
            help: diag.help(),
            labels: diag.labels().iter().map(labeled_span).collect(),
            src: Some(src),
            cause: None,
        }
    }

    /// A report for an error that carries no source location.
    pub fn unlocated(err: &'a ChaingraphError) -> Self {
        let code = match err {
            ChaingraphError::Io(_) => Some("chaingraph::io"),
            ChaingraphError::Export(_) => Some("chaingraph::export"),
            ChaingraphError::Diagnostic { .. } => None,
        };
        Self {
            message: err.to_string(),
            code: code.map(str::to_string),
            help: None,
            labels: Vec::new(),
            src: None,
            cause: err.source(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Report<'_> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'b>)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help.map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn labeled_span(label: &Label) -> LabeledSpan {
    let span = label.span();
    let span = SourceSpan::new(span.start().into(), span.len());
    let message = Some(label.message().to_string());
    if label.is_primary() {
        LabeledSpan::new_primary_with_span(message, span)
    } else {
        LabeledSpan::new_with_span(message, span)
    }
}

/// Split a [`ChaingraphError`] into the reports to render, in order.
pub fn reports(err: &ChaingraphError) -> Vec<Report<'_>> {
    match err {
        ChaingraphError::Diagnostic { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Report::located(diag, src))
            .collect(),
        _ => vec![Report::unlocated(err)],
    }
}

//! Notebooks
//!
//! A notebook is an ordered list of cells. Each cell declares the names it
//! reads (`refs`) and the names it defines (`defs`), and may emit an HTML
//! fragment. Rendering runs the cells once, in declaration order, against a
//! fresh set of bindings.
//!
//! # Example
//!
//! ```rust
//! use data_app::frame::{sample, Frame};
//! use data_app::markup::{md, thousands};
//! use data_app::notebook::{CellSpec, Notebook};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let notebook = Notebook::new("Counts")
//!     .cell(CellSpec::new("data").defs(["counts"]).run(|ctx| {
//!         let column = sample::randint(ctx.rng(), 0, 10, 5)?;
//!         ctx.bind("counts", Frame::new().with_column("n", column)?)?;
//!         Ok(None)
//!     }))
//!     .cell(CellSpec::new("total").refs(["counts"]).run(|ctx| {
//!         let total = ctx.frame("counts")?.sum_i64("n")?;
//!         Ok(Some(md(&format!("Total: {}", thousands(total)))))
//!     }));
//!
//! notebook.validate().unwrap();
//! let page = notebook.render(&mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(page.outputs.len(), 1);
//! ```

pub mod error;
pub mod value;

pub use error::{NotebookError, NotebookResult};
pub use value::{Bindings, Value};

pub use crate::markup::AppWidth;

use rand::rngs::StdRng;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use crate::frame::Frame;
use crate::markup::{layout, Html};

/// What a cell body returns: an optional HTML fragment
pub type CellOutput = NotebookResult<Option<Html>>;

type CellBody = dyn Fn(&mut CellContext<'_>) -> CellOutput + Send + Sync;

fn empty_cell(_: &mut CellContext<'_>) -> CellOutput {
    Ok(None)
}

/// One step of a notebook
pub struct CellSpec {
    name: String,
    refs: Vec<String>,
    defs: Vec<String>,
    body: Box<CellBody>,
}

impl CellSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            refs: Vec::new(),
            defs: Vec::new(),
            body: Box::new(empty_cell),
        }
    }

    /// Builder method: names this cell reads
    pub fn refs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.refs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builder method: names this cell defines
    pub fn defs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builder method: the cell body
    pub fn run<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut CellContext<'_>) -> CellOutput + Send + Sync + 'static,
    {
        self.body = Box::new(body);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ref_names(&self) -> &[String] {
        &self.refs
    }

    pub fn def_names(&self) -> &[String] {
        &self.defs
    }
}

impl fmt::Debug for CellSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellSpec")
            .field("name", &self.name)
            .field("refs", &self.refs)
            .field("defs", &self.defs)
            .finish_non_exhaustive()
    }
}

/// A running cell's view of the notebook state
pub struct CellContext<'a> {
    cell: &'a CellSpec,
    bindings: &'a mut Bindings,
    rng: &'a mut StdRng,
}

impl<'a> CellContext<'a> {
    /// Random source shared by all cells of this render
    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    /// Read a declared ref
    pub fn get(&self, name: &str) -> NotebookResult<&Value> {
        if !self.cell.refs.iter().any(|r| r == name) {
            return Err(NotebookError::UndeclaredRef {
                cell: self.cell.name.clone(),
                name: name.to_string(),
            });
        }
        self.bindings
            .get(name)
            .ok_or_else(|| NotebookError::UnresolvedRef {
                cell: self.cell.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn frame(&self, name: &str) -> NotebookResult<&Frame> {
        let value = self.get(name)?;
        value.as_frame().ok_or_else(|| wrong_type(name, "frame", value))
    }

    pub fn float(&self, name: &str) -> NotebookResult<f64> {
        let value = self.get(name)?;
        value.as_float().ok_or_else(|| wrong_type(name, "float", value))
    }

    pub fn int(&self, name: &str) -> NotebookResult<i64> {
        let value = self.get(name)?;
        value.as_int().ok_or_else(|| wrong_type(name, "int", value))
    }

    /// Define a declared name for later cells
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> NotebookResult<()> {
        if !self.cell.defs.iter().any(|d| d == name) {
            return Err(NotebookError::UndeclaredDef {
                cell: self.cell.name.clone(),
                name: name.to_string(),
            });
        }
        self.bindings.insert(name, value.into());
        Ok(())
    }
}

fn wrong_type(name: &str, expected: &'static str, value: &Value) -> NotebookError {
    NotebookError::WrongType {
        name: name.to_string(),
        expected,
        actual: value.type_name(),
    }
}

/// The result of running every cell of a notebook
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub title: String,
    pub width: AppWidth,
    /// Non-empty cell outputs, in cell order
    pub outputs: Vec<Html>,
    /// Everything the cells defined
    pub bindings: Bindings,
}

impl RenderedPage {
    /// Complete HTML document for this page
    pub fn to_html(&self) -> Html {
        layout(&self.title, self.width, &self.outputs)
    }
}

/// An ordered sequence of cells rendered as one page
pub struct Notebook {
    title: String,
    width: AppWidth,
    cells: Vec<CellSpec>,
}

impl Notebook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: AppWidth::default(),
            cells: Vec::new(),
        }
    }

    /// Builder method: page width
    pub fn width(mut self, width: AppWidth) -> Self {
        self.width = width;
        self
    }

    /// Builder method: append a cell
    pub fn cell(mut self, cell: CellSpec) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn app_width(&self) -> AppWidth {
        self.width
    }

    pub fn cells(&self) -> &[CellSpec] {
        &self.cells
    }

    /// Check that every ref is defined by an earlier cell and that no name is
    /// defined twice
    pub fn validate(&self) -> NotebookResult<()> {
        let mut defined: HashMap<&str, &str> = HashMap::new();

        for cell in &self.cells {
            for name in &cell.refs {
                if !defined.contains_key(name.as_str()) {
                    return Err(NotebookError::UnresolvedRef {
                        cell: cell.name.clone(),
                        name: name.clone(),
                    });
                }
            }
            for name in &cell.defs {
                if let Some(previous) = defined.insert(name.as_str(), cell.name.as_str()) {
                    return Err(NotebookError::Redefinition {
                        cell: cell.name.clone(),
                        name: name.clone(),
                        previous: previous.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Run every cell in declaration order
    pub fn render(&self, rng: &mut StdRng) -> NotebookResult<RenderedPage> {
        let started = Instant::now();
        let mut bindings = Bindings::new();
        let mut outputs = Vec::new();

        for cell in &self.cells {
            let cell_started = Instant::now();
            let output = {
                let mut ctx = CellContext {
                    cell,
                    bindings: &mut bindings,
                    rng: &mut *rng,
                };
                (cell.body)(&mut ctx).map_err(|e| NotebookError::CellFailed {
                    cell: cell.name.clone(),
                    source: Box::new(e),
                })?
            };

            if let Some(name) = cell.defs.iter().find(|d| !bindings.contains(d)) {
                return Err(NotebookError::MissingDef {
                    cell: cell.name.clone(),
                    name: name.clone(),
                });
            }

            tracing::trace!(
                notebook = %self.title,
                cell = %cell.name,
                elapsed_us = cell_started.elapsed().as_micros() as u64,
                "Cell finished"
            );

            if let Some(html) = output.filter(|h| !h.is_empty()) {
                outputs.push(html);
            }
        }

        tracing::debug!(
            notebook = %self.title,
            cells = self.cells.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Notebook rendered"
        );

        Ok(RenderedPage {
            title: self.title.clone(),
            width: self.width,
            outputs,
            bindings,
        })
    }
}

impl fmt::Debug for Notebook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notebook")
            .field("title", &self.title)
            .field("width", &self.width)
            .field("cells", &self.cells)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;
    use crate::markup::md;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn counting_notebook() -> Notebook {
        Notebook::new("Counts")
            .cell(CellSpec::new("intro").run(|_| Ok(Some(md("# Counts")))))
            .cell(CellSpec::new("data").defs(["numbers"]).run(|ctx| {
                let frame = Frame::new().with_column("n", Column::Int(vec![1, 2, 3]))?;
                ctx.bind("numbers", frame)?;
                Ok(None)
            }))
            .cell(
                CellSpec::new("total")
                    .refs(["numbers"])
                    .defs(["total"])
                    .run(|ctx| {
                        let total = ctx.frame("numbers")?.sum_i64("n")?;
                        ctx.bind("total", total)?;
                        Ok(Some(md(&format!("Total: {}", total))))
                    }),
            )
    }

    #[test]
    fn test_cells_run_in_order() {
        let notebook = counting_notebook();
        notebook.validate().unwrap();

        let page = notebook.render(&mut rng()).unwrap();
        assert_eq!(page.title, "Counts");
        assert_eq!(page.outputs.len(), 2);
        assert!(page.outputs[0].as_str().contains("<h1>Counts</h1>"));
        assert!(page.outputs[1].as_str().contains("Total: 6"));
        assert_eq!(page.bindings.get("total"), Some(&Value::Int(6)));
        assert_eq!(page.bindings.frame("numbers").unwrap().n_rows(), 3);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let notebook = Notebook::new("Bad")
            .cell(CellSpec::new("early").refs(["late"]))
            .cell(CellSpec::new("later").defs(["late"]));

        assert!(matches!(
            notebook.validate(),
            Err(NotebookError::UnresolvedRef { ref cell, ref name }) if cell == "early" && name == "late"
        ));
    }

    #[test]
    fn test_redefinition_rejected() {
        let notebook = Notebook::new("Bad")
            .cell(CellSpec::new("a").defs(["x"]))
            .cell(CellSpec::new("b").defs(["x"]));

        assert!(matches!(
            notebook.validate(),
            Err(NotebookError::Redefinition { ref previous, .. }) if previous == "a"
        ));
    }

    #[test]
    fn test_undeclared_read_fails() {
        let notebook = Notebook::new("Sneaky")
            .cell(CellSpec::new("a").defs(["x"]).run(|ctx| {
                ctx.bind("x", 1.0)?;
                Ok(None)
            }))
            .cell(CellSpec::new("b").run(|ctx| {
                ctx.float("x")?;
                Ok(None)
            }));
        notebook.validate().unwrap();

        let err = notebook.render(&mut rng()).unwrap_err();
        match err {
            NotebookError::CellFailed { cell, source } => {
                assert_eq!(cell, "b");
                assert!(matches!(*source, NotebookError::UndeclaredRef { .. }));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_undeclared_bind_fails() {
        let notebook = Notebook::new("Sneaky").cell(CellSpec::new("a").run(|ctx| {
            ctx.bind("x", 1.0)?;
            Ok(None)
        }));

        let err = notebook.render(&mut rng()).unwrap_err();
        assert!(matches!(
            err,
            NotebookError::CellFailed { ref source, .. }
                if matches!(**source, NotebookError::UndeclaredDef { .. })
        ));
    }

    #[test]
    fn test_missing_def_fails() {
        let notebook = Notebook::new("Lazy").cell(CellSpec::new("a").defs(["x"]));

        assert!(matches!(
            notebook.render(&mut rng()),
            Err(NotebookError::MissingDef { ref name, .. }) if name == "x"
        ));
    }

    #[test]
    fn test_wrong_type() {
        let notebook = Notebook::new("Typed")
            .cell(CellSpec::new("a").defs(["x"]).run(|ctx| {
                ctx.bind("x", 1.0)?;
                Ok(None)
            }))
            .cell(CellSpec::new("b").refs(["x"]).run(|ctx| {
                ctx.frame("x")?;
                Ok(None)
            }));

        let err = notebook.render(&mut rng()).unwrap_err();
        assert!(err.to_string().contains("'x' is a float, expected a frame"));
    }

    #[test]
    fn test_to_html() {
        let page = counting_notebook().render(&mut rng()).unwrap();
        let html = page.to_html();
        assert!(html.as_str().contains("<title>Counts</title>"));
        assert_eq!(html.as_str().matches("<section class=\"cell\">").count(), 2);
    }
}

//! Declarative, template-parameterised directory layouts.
//!
//! A [`LayoutSpec`] describes the tree an installation is expected to have.
//! Binding it to a root directory produces a [`SpecDir`], which resolves
//! aliases to concrete paths and, in [`Mode::Validate`], confirms that
//! every required node exists on disk.
//!
//! ```
//! use toolstrap::layout::{LayoutSpec, Mode, NodeSpec, SpecDir, TemplateVars};
//!
//! let tree = NodeSpec::dir("tool-{version}")
//!     .child(NodeSpec::dir("bin").child(NodeSpec::file("tool").alias("executable")));
//! let spec = LayoutSpec::new(tree, &["executable"]).unwrap();
//! let vars = TemplateVars::new().with("version", "1.0.0");
//!
//! let dir = SpecDir::bind("/opt/tool-1.0.0", &spec, &vars, Mode::SpecOnly).unwrap();
//! assert_eq!(
//!     dir.path("executable"),
//!     std::path::Path::new("/opt/tool-1.0.0/bin/tool")
//! );
//! ```

pub mod app;
mod template;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use template::TemplateVars;

use crate::error::LayoutError;

/// How a [`SpecDir`] is bound to its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pure path computation; the filesystem is never touched.
    SpecOnly,
    /// Check the root name and the existence of every required node.
    Validate,
}

/// Builder for one node of a layout tree.
///
/// Children keep their declaration order, which is also the order in which
/// validation reports the first missing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    name: String,
    required: bool,
    alias: Option<String>,
    children: Vec<Self>,
}

impl NodeSpec {
    /// A required directory node.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            alias: None,
            children: Vec::new(),
        }
    }

    /// A required leaf node.
    ///
    /// Files and directories are not distinguished during validation; this
    /// constructor only reads better at call sites.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self::dir(name)
    }

    /// Mark this node as optional: its absence is not an error, and its
    /// subtree is not inspected when it is absent.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach an alias used for path lookup.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    template: String,
    required: bool,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// An immutable layout tree stored as an arena of nodes.
///
/// Node `0` is the root.  The alias map is built once by [`LayoutSpec::new`]
/// and never modified afterwards.
#[derive(Debug, Clone)]
pub struct LayoutSpec {
    nodes: Vec<Node>,
    aliases: HashMap<String, usize>,
    /// Aliases in structural (depth-first, declaration) order.
    alias_order: Vec<String>,
}

impl LayoutSpec {
    /// Flatten `tree` into a spec.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpec`] if two nodes share an alias or if
    /// an alias in `required_aliases` is not owned by any node of the tree.
    pub fn new(tree: NodeSpec, required_aliases: &[&str]) -> Result<Self, LayoutError> {
        let mut spec = Self {
            nodes: Vec::new(),
            aliases: HashMap::new(),
            alias_order: Vec::new(),
        };
        spec.insert(tree, None)?;

        for alias in required_aliases {
            if !spec.aliases.contains_key(*alias) {
                return Err(LayoutError::InvalidSpec(format!(
                    "alias '{alias}' is not defined by any node"
                )));
            }
        }
        Ok(spec)
    }

    fn insert(&mut self, node: NodeSpec, parent: Option<usize>) -> Result<usize, LayoutError> {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            template: node.name,
            required: node.required,
            parent,
            children: Vec::with_capacity(node.children.len()),
        });

        if let Some(alias) = node.alias {
            if self.aliases.contains_key(&alias) {
                return Err(LayoutError::InvalidSpec(format!(
                    "alias '{alias}' is defined more than once"
                )));
            }
            self.aliases.insert(alias.clone(), idx);
            self.alias_order.push(alias);
        }

        for child in node.children {
            let child_idx = self.insert(child, Some(idx))?;
            if let Some(n) = self.nodes.get_mut(idx) {
                n.children.push(child_idx);
            }
        }
        Ok(idx)
    }

    /// Name of the root directory after substitution.
    #[must_use]
    pub fn root_name(&self, vars: &TemplateVars) -> String {
        self.nodes
            .first()
            .map(|root| vars.render(&root.template))
            .unwrap_or_default()
    }

    /// Returns `true` if `alias` is owned by a node of this spec.
    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Check `root` against this spec without keeping the bound instance.
    ///
    /// # Errors
    ///
    /// Same as [`SpecDir::bind`] in [`Mode::Validate`].
    pub fn validate(&self, root: impl AsRef<Path>, vars: &TemplateVars) -> Result<(), LayoutError> {
        SpecDir::bind(root, self, vars, Mode::Validate).map(|_| ())
    }

    /// Substituted path segments from just below the root down to `idx`.
    fn segments(&self, idx: usize, vars: &TemplateVars) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            let Some(node) = self.nodes.get(i) else { break };
            if node.parent.is_some() {
                segments.push(vars.render(&node.template));
            }
            current = node.parent;
        }
        segments.reverse();
        segments
    }

    /// Depth-first existence check below node `idx`.
    ///
    /// `abs` is the on-disk path of node `idx`; `rel` is the same path
    /// starting at the root's own name, used in error messages.
    fn check_children(
        &self,
        idx: usize,
        abs: &Path,
        rel: &Path,
        vars: &TemplateVars,
    ) -> Result<(), LayoutError> {
        let Some(node) = self.nodes.get(idx) else {
            return Ok(());
        };
        for &child_idx in &node.children {
            let Some(child) = self.nodes.get(child_idx) else {
                continue;
            };
            let name = vars.render(&child.template);
            let child_abs = abs.join(&name);
            let child_rel = rel.join(&name);

            if !exists(&child_abs)? {
                if child.required {
                    return Err(LayoutError::MissingPath { path: child_rel });
                }
                tracing::debug!("optional path absent: {}", child_abs.display());
                continue;
            }
            self.check_children(child_idx, &child_abs, &child_rel, vars)?;
        }
        Ok(())
    }
}

fn exists(path: &Path) -> Result<bool, LayoutError> {
    path.try_exists().map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A [`LayoutSpec`] bound to a root directory and a set of template values.
///
/// Every alias is resolved once at bind time, so [`SpecDir::path`] is a
/// pure lookup that returns the same path on every call.
#[derive(Debug, Clone)]
pub struct SpecDir {
    root: PathBuf,
    mode: Mode,
    paths: HashMap<String, PathBuf>,
    alias_order: Vec<String>,
}

impl SpecDir {
    /// Bind `spec` to `root`.
    ///
    /// The final component of `root` must equal the substituted root
    /// template in both modes.  In [`Mode::Validate`] the tree is then
    /// walked depth-first, siblings in declaration order, and the first
    /// missing required node aborts the walk.  Absent optional nodes are
    /// skipped together with their subtrees.
    ///
    /// [`Mode::SpecOnly`] does not accept an arbitrary root name either:
    /// binding `testRoot` fails exactly as it does under validation.  To
    /// compute the location of an install that does not exist yet, use
    /// [`SpecDir::under`].
    ///
    /// # Errors
    ///
    /// - [`LayoutError::RootNameMismatch`] if the root name differs.
    /// - [`LayoutError::MissingPath`] if a required node is absent (validate only).
    /// - [`LayoutError::Io`] if a path cannot be inspected (validate only).
    pub fn bind(
        root: impl AsRef<Path>,
        spec: &LayoutSpec,
        vars: &TemplateVars,
        mode: Mode,
    ) -> Result<Self, LayoutError> {
        let root = root.as_ref();
        let expected = spec.root_name(vars);
        let actual = root.file_name().map(|n| n.to_string_lossy());
        if actual.as_deref() != Some(expected.as_str()) {
            return Err(LayoutError::RootNameMismatch {
                root: root.display().to_string(),
                expected,
            });
        }

        if mode == Mode::Validate {
            let rel = PathBuf::from(&expected);
            if !exists(root)? {
                return Err(LayoutError::MissingPath { path: rel });
            }
            spec.check_children(0, root, &rel, vars)?;
            tracing::debug!("layout validated: {}", root.display());
        }

        let paths = spec
            .aliases
            .iter()
            .map(|(alias, &idx)| {
                let path = spec
                    .segments(idx, vars)
                    .iter()
                    .fold(root.to_path_buf(), |acc, seg| acc.join(seg));
                (alias.clone(), path)
            })
            .collect();

        Ok(Self {
            root: root.to_path_buf(),
            mode,
            paths,
            alias_order: spec.alias_order.clone(),
        })
    }

    /// Bind `spec` in [`Mode::SpecOnly`] at `parent/<root name>`.
    ///
    /// Used to compute where a fresh installation should live before it
    /// exists.
    ///
    /// # Errors
    ///
    /// Only fails if the substituted root name is not a single path
    /// component.
    pub fn under(
        parent: impl AsRef<Path>,
        spec: &LayoutSpec,
        vars: &TemplateVars,
    ) -> Result<Self, LayoutError> {
        let root = parent.as_ref().join(spec.root_name(vars));
        Self::bind(root, spec, vars, Mode::SpecOnly)
    }

    /// Path of the node owning `alias`.
    ///
    /// # Panics
    ///
    /// Panics if `alias` is not defined by the bound spec.  The alias set is
    /// fixed when the spec is built, so an unknown alias is a programming
    /// error; use [`SpecDir::try_path`] for aliases taken from user input.
    #[must_use]
    #[allow(clippy::panic)]
    pub fn path(&self, alias: &str) -> &Path {
        self.try_path(alias)
            .unwrap_or_else(|| panic!("unknown layout alias '{alias}'"))
    }

    /// Path of the node owning `alias`, or `None` if the alias is unknown.
    #[must_use]
    pub fn try_path(&self, alias: &str) -> Option<&Path> {
        self.paths.get(alias).map(PathBuf::as_path)
    }

    /// The root this instance was bound to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The mode this instance was bound with.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// All `(alias, path)` pairs in structural order.
    pub fn describe(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.alias_order
            .iter()
            .filter_map(|alias| Some((alias.as_str(), self.try_path(alias)?)))
    }
}

//! Text renderings of a trained tree.
//!
//! - [`to_dot`]: Graphviz digraph with one box per node
//! - [`to_image_dot`]: the same graph styled for the rendered image
//! - [`to_rules`]: indented IF/THEN listing
//! - [`write_report`]: both of the above in one file
//! - [`render_image`]: PNG through the system Graphviz `dot` executable
//!
//! Only the public inspection surface of [`Tree`] is used; traversals keep an
//! explicit stack.

use crate::error::{Result, TreeError};
use crate::tree::{NodeId, Tree, TreeNode};
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

const LEAF_COLOR: &str = "#90EE90";
const SPLIT_COLOR: &str = "#ADD8E6";

fn feature_name(feature_names: &[String], idx: usize, fallback: &str) -> String {
    feature_names
        .get(idx)
        .cloned()
        .unwrap_or_else(|| format!("{fallback} {idx}"))
}

fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Node and edge styling for one flavour of DOT output.
struct DotStyle {
    split_shape: Option<&'static str>,
    leaf_shape: Option<&'static str>,
    true_edge: &'static str,
    false_edge: &'static str,
    unnamed: &'static str,
}

const REPORT_STYLE: DotStyle = DotStyle {
    split_shape: None,
    leaf_shape: None,
    true_edge: "True",
    false_edge: "False",
    unnamed: "Col",
};

const IMAGE_STYLE: DotStyle = DotStyle {
    split_shape: Some("ellipse"),
    leaf_shape: Some("box"),
    true_edge: "True (<=)",
    false_edge: "False (>)",
    unnamed: "Column",
};

/// Renders the tree as a Graphviz digraph.
///
/// Leaves show their predicted class, internal nodes their `<=` test. The
/// left edge of a split is labelled `True`, the right edge `False`. Features
/// without a name in `feature_names` are shown as `Col {idx}`.
///
/// # Examples
///
/// ```
/// use c45tree::prelude::*;
/// use c45tree::export::to_dot;
///
/// let x = Matrix::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
/// let mut clf = C45Classifier::new();
/// clf.fit(&x, &[0, 1]).unwrap();
///
/// let dot = to_dot(clf.tree().unwrap(), &["age".to_string()]);
/// assert!(dot.starts_with("digraph Tree {"));
/// assert!(dot.contains("age\\n<= 0.000?"));
/// ```
#[must_use]
pub fn to_dot(tree: &Tree, feature_names: &[String]) -> String {
    render_dot(tree, feature_names, &REPORT_STYLE)
}

/// Renders the digraph used for the PNG image.
///
/// Same layout as [`to_dot`], but split nodes are ellipses, leaves are
/// boxes, edges read `True (<=)` / `False (>)`, and unnamed features are
/// shown as `Column {idx}`.
#[must_use]
pub fn to_image_dot(tree: &Tree, feature_names: &[String]) -> String {
    render_dot(tree, feature_names, &IMAGE_STYLE)
}

fn render_dot(tree: &Tree, feature_names: &[String], style: &DotStyle) -> String {
    let mut out = String::new();
    out.push_str("digraph Tree {\n");
    out.push_str("node [shape=box, fontname=\"helvetica\"];\n");
    out.push_str("edge [fontname=\"helvetica\"];\n");

    let mut stack: Vec<(NodeId, Option<(NodeId, &str)>)> = vec![(tree.root(), None)];
    while let Some((id, parent)) = stack.pop() {
        let (label, color, shape) = match tree.node(id) {
            TreeNode::Leaf(leaf) => (
                format!("Prediction:\\nClass {}", leaf.label),
                LEAF_COLOR,
                style.leaf_shape,
            ),
            TreeNode::Internal(node) => {
                let name = feature_name(feature_names, node.feature_idx, style.unnamed);
                (
                    format!("{}\\n<= {:.3}?", escape_label(&name), node.threshold),
                    SPLIT_COLOR,
                    style.split_shape,
                )
            }
        };
        let shape = shape.map(|s| format!(", shape=\"{s}\"")).unwrap_or_default();
        let _ = writeln!(
            out,
            "{id} [label=\"{label}\"{shape}, style=\"filled\", fillcolor=\"{color}\"];"
        );
        if let Some((parent_id, edge)) = parent {
            let _ = writeln!(out, "{parent_id} -> {id} [label=\"{}\"];", escape_label(edge));
        }
        if let TreeNode::Internal(node) = tree.node(id) {
            stack.push((node.right, Some((id, style.false_edge))));
            stack.push((node.left, Some((id, style.true_edge))));
        }
    }

    out.push('}');
    out
}

enum RuleStep {
    Visit(NodeId, usize),
    Line(String),
}

/// Renders the tree as nested IF/THEN rules, four spaces per level.
///
/// Features without a name in `feature_names` are shown as `Column {idx}`.
///
/// ```text
/// IF Outlook <= 0.000:
///     THEN Prediction = Class 1
/// IF Outlook > 0.000:
///     THEN Prediction = Class 0
/// ```
#[must_use]
pub fn to_rules(tree: &Tree, feature_names: &[String]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(tree.n_nodes());
    let mut stack = vec![RuleStep::Visit(tree.root(), 0)];

    while let Some(step) = stack.pop() {
        let (id, depth) = match step {
            RuleStep::Line(line) => {
                lines.push(line);
                continue;
            }
            RuleStep::Visit(id, depth) => (id, depth),
        };
        let indent = "    ".repeat(depth);
        match tree.node(id) {
            TreeNode::Leaf(leaf) => {
                lines.push(format!("{indent}THEN Prediction = Class {}", leaf.label));
            }
            TreeNode::Internal(node) => {
                let name = feature_name(feature_names, node.feature_idx, "Column");
                lines.push(format!("{indent}IF {name} <= {:.3}:", node.threshold));
                stack.push(RuleStep::Visit(node.right, depth + 1));
                stack.push(RuleStep::Line(format!(
                    "{indent}IF {name} > {:.3}:",
                    node.threshold
                )));
                stack.push(RuleStep::Visit(node.left, depth + 1));
            }
        }
    }

    lines.join("\n")
}

/// Writes the DOT graph followed by the rule listing to `path`.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the directory or the file cannot be written.
pub fn write_report<P: AsRef<Path>>(tree: &Tree, path: P, feature_names: &[String]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let report = format!(
        "{}\n\n--- RULES RESULT ---\n{}\n",
        to_dot(tree, feature_names),
        to_rules(tree, feature_names)
    );
    fs::write(path, report)?;
    info!(path = %path.display(), "tree report written");
    Ok(())
}

/// Renders the tree to `<output_dir>/<stem>.png` with the Graphviz `dot`
/// executable, returning the image path.
///
/// # Errors
///
/// Returns [`TreeError::Render`] if `dot` is not installed, cannot be fed the
/// graph, exits with a failure or leaves no image behind, and an I/O error if
/// the output directory cannot be created.
pub fn render_image<P: AsRef<Path>>(
    tree: &Tree,
    output_dir: P,
    stem: &str,
    feature_names: &[String],
) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let image_path = output_dir.join(format!("{stem}.png"));

    run_renderer("dot", &to_image_dot(tree, feature_names), &image_path)?;

    info!(path = %image_path.display(), "tree image rendered");
    Ok(image_path)
}

fn run_renderer(program: &str, dot_text: &str, image_path: &Path) -> Result<()> {
    let mut child = Command::new(program)
        .arg("-Tpng")
        .arg("-o")
        .arg(image_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| TreeError::Render {
            message: if e.kind() == std::io::ErrorKind::NotFound {
                format!("Graphviz executable '{program}' not found, install it from https://graphviz.org/download/")
            } else {
                format!("failed to start '{program}': {e}")
            },
        })?;

    // a renderer that exits early closes the pipe; its exit status says more
    let sent = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(dot_text.as_bytes()),
        None => Ok(()),
    };
    let output = child.wait_with_output().map_err(|e| TreeError::Render {
        message: format!("failed to wait for '{program}': {e}"),
    })?;
    if !output.status.success() {
        return Err(TreeError::Render {
            message: format!(
                "'{program}' exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    sent.map_err(|e| TreeError::Render {
        message: format!("failed to send the graph to '{program}': {e}"),
    })?;
    if !image_path.is_file() {
        return Err(TreeError::Render {
            message: format!("'{program}' did not write {}", image_path.display()),
        });
    }
    Ok(())
}

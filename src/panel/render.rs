use std::fmt;

use colored::Colorize;

use crate::panel::PanelState;
use crate::pathtree::PathTree;

/// Spaces of indentation per tree depth level.
const INDENT_WIDTH: usize = 2;

/// One rendered line of the panel.
///
/// A collapsed directory carries its own items inline, joined with
/// `", "`; an expanded one renders them as separate child rows instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    Directory {
        depth: usize,
        name: String,
        inline_items: Option<String>,
    },
    Item {
        depth: usize,
        value: String,
    },
}

impl fmt::Display for PanelRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelRow::Directory {
                depth,
                name,
                inline_items,
            } => {
                let pad = " ".repeat(INDENT_WIDTH * depth);
                write!(f, "{pad}{}", name.blue().bold())?;
                if let Some(items) = inline_items {
                    write!(f, " {}", format!("({items})").dimmed())?;
                }
                Ok(())
            }
            PanelRow::Item { depth, value } => {
                let pad = " ".repeat(INDENT_WIDTH * depth);
                write!(f, "{pad}{value}")
            }
        }
    }
}

/// Walks the tree into display rows: directories first in creation order,
/// then the level's own items one step deeper. Collapsed directories show
/// their items inline and hide their children; `flat` renders everything
/// expanded regardless of state.
pub fn render(tree: &PathTree<String>, state: &PanelState, flat: bool) -> Vec<PanelRow> {
    let mut rows = Vec::new();
    render_level(tree, "", 0, state, flat, &mut rows);
    rows
}

fn render_level(
    node: &PathTree<String>,
    prefix: &str,
    depth: usize,
    state: &PanelState,
    flat: bool,
    rows: &mut Vec<PanelRow>,
) {
    for (name, child) in node.children() {
        let full_path = if prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{prefix}/{name}")
        };

        if flat || state.is_expanded(&full_path) {
            rows.push(PanelRow::Directory {
                depth,
                name: name.to_owned(),
                inline_items: None,
            });
            render_level(child, &full_path, depth + 1, state, flat, rows);
        } else {
            rows.push(PanelRow::Directory {
                depth,
                name: name.to_owned(),
                inline_items: Some(child.items().join(", ")),
            });
        }
    }

    for value in node.items() {
        rows.push(PanelRow::Item {
            depth: depth + 1,
            value: value.clone(),
        });
    }
}

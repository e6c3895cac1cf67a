use crate::areas::repository::Repository;
use crate::artifacts::errors::Result;
use crate::artifacts::objects::commit_id::CommitId;
use chrono::{DateTime, FixedOffset};

/// One commit as drawn in the history graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: CommitId,
    pub parents: Vec<CommitId>,
    pub date: DateTime<FixedOffset>,
    pub message: String,
}

impl Repository {
    /// Every recorded commit, oldest first (ties by id)
    pub fn graph(&self) -> Result<Vec<GraphNode>> {
        self.require_repository()?;

        let mut nodes = self
            .database()
            .list_commits()?
            .into_iter()
            .map(|(id, record)| GraphNode {
                parents: record.parents().to_vec(),
                date: record.date(),
                message: record.short_message().to_string(),
                id,
            })
            .collect::<Vec<_>>();
        nodes.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        Ok(nodes)
    }

    /// Render the history as a Graphviz digraph, child pointing to parent
    pub fn print_graph(&self) -> Result<()> {
        let nodes = self.graph()?;
        let head = self.refs().read_head()?;

        self.emit("digraph wit {")?;
        self.emit("\trankdir=BT;")?;
        for node in &nodes {
            let shape = if Some(&node.id) == head.as_ref() {
                ", style=bold"
            } else {
                ""
            };
            self.emit(format!(
                "\t\"{}\" [label=\"{}\\n{}\"{}];",
                node.id,
                node.id.to_short_id(),
                escape_label(&node.message),
                shape
            ))?;
        }
        for node in &nodes {
            for parent in &node.parents {
                self.emit(format!("\t\"{}\" -> \"{}\";", node.id, parent))?;
            }
        }
        for branch in self.refs().list_branches()? {
            if let Some(target) = branch.target {
                self.emit(format!(
                    "\t\"{}\" [shape=box];\n\t\"{}\" -> \"{}\" [style=dashed];",
                    branch.name, branch.name, target
                ))?;
            }
        }
        self.emit("}")?;

        Ok(())
    }
}

fn escape_label(message: &str) -> String {
    message.replace('\\', "\\\\").replace('"', "\\\"")
}

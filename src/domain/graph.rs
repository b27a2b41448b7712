//! Dependency graph for a task batch
//!
//! Edges point from a task to each task it depends on. References to
//! identifiers outside the batch are dropped. Uses petgraph for storage.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

use super::task::TaskIndex;

/// A closed walk of effective identifiers; the first element is repeated last
pub type Cycle = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Finished,
}

/// A dependency graph over the tasks of one batch
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<String, ()>,

    /// Map from effective identifier to node index
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Builds the graph from an index, adding nodes in index order
    pub fn from_index(index: &TaskIndex<'_>) -> Self {
        let mut graph = Self::default();

        // First pass: add all nodes
        for (id, _) in index.iter() {
            let idx = graph.graph.add_node(id.to_string());
            graph.node_map.insert(id.to_string(), idx);
        }

        // Second pass: add edges, keeping duplicates and self-references
        for (id, task) in index.iter() {
            let from = graph.node_map[id];
            for dep in &task.dependencies {
                if let Some(&to) = graph.node_map.get(dep) {
                    graph.graph.add_edge(from, to, ());
                }
            }
        }

        graph
    }

    /// Outgoing neighbors in insertion order (petgraph lists newest first)
    fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut next: Vec<_> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        next.reverse();
        next
    }

    /// Finds every cycle reachable by depth-first search
    ///
    /// Roots are tried in index order and edges in declaration order. Each
    /// back edge to a node on the current path reports the path from that
    /// node to the current one, closed by repeating the re-entered node.
    /// Finished nodes are never expanded again.
    pub fn detect_cycles(&self) -> Vec<Cycle> {
        let mut marks = vec![Mark::Unvisited; self.graph.node_count()];
        let mut cycles = Vec::new();

        for root in self.graph.node_indices() {
            if marks[root.index()] != Mark::Unvisited {
                continue;
            }

            marks[root.index()] = Mark::OnStack;
            let mut stack = vec![(root, self.successors(root).into_iter())];

            loop {
                let (node, next) = match stack.last_mut() {
                    Some((node, edges)) => (*node, edges.next()),
                    None => break,
                };

                match next {
                    Some(dep) => match marks[dep.index()] {
                        Mark::Unvisited => {
                            marks[dep.index()] = Mark::OnStack;
                            stack.push((dep, self.successors(dep).into_iter()));
                        }
                        Mark::OnStack => {
                            if let Some(start) = stack.iter().position(|(n, _)| *n == dep) {
                                let mut cycle: Cycle = stack[start..]
                                    .iter()
                                    .map(|(n, _)| self.graph[*n].clone())
                                    .collect();
                                cycle.push(self.graph[dep].clone());
                                cycles.push(cycle);
                            }
                        }
                        Mark::Finished => {}
                    },
                    None => {
                        marks[node.index()] = Mark::Finished;
                        stack.pop();
                    }
                }
            }
        }

        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskRecord;

    fn task(id: &str, deps: &[&str]) -> TaskRecord {
        TaskRecord::new(id).with_dependencies(deps.iter().copied())
    }

    fn cycles_of(tasks: &[TaskRecord]) -> Vec<Cycle> {
        let index = TaskIndex::build(tasks);
        DependencyGraph::from_index(&index).detect_cycles()
    }

    #[test]
    fn empty_graph() {
        let index = TaskIndex::build(&[]);
        let graph = DependencyGraph::from_index(&index);
        assert!(graph.detect_cycles().is_empty());
    }

    #[test]
    fn three_node_cycle() {
        let tasks = [task("a", &["b"]), task("b", &["c"]), task("c", &["a"])];
        assert_eq!(cycles_of(&tasks), vec![vec!["a", "b", "c", "a"]]);
    }

    #[test]
    fn acyclic_chain_has_no_cycles() {
        let tasks = [task("a", &["b"]), task("b", &["c"]), task("c", &[])];
        assert!(cycles_of(&tasks).is_empty());
    }

    #[test]
    fn dangling_references_are_dropped() {
        let tasks = [task("a", &["ghost", "b"]), task("b", &[])];
        let index = TaskIndex::build(&tasks);
        let graph = DependencyGraph::from_index(&index);

        assert_eq!(graph.graph.edge_count(), 1);
        let deps: Vec<_> = graph
            .successors(graph.node_map["a"])
            .into_iter()
            .map(|n| graph.graph[n].as_str())
            .collect();
        assert_eq!(deps, vec!["b"]);
        assert!(graph.detect_cycles().is_empty());
    }

    #[test]
    fn self_reference_is_a_cycle() {
        assert_eq!(cycles_of(&[task("a", &["a"])]), vec![vec!["a", "a"]]);
    }

    #[test]
    fn cycle_starts_at_reentry_point() {
        // a -> b -> c -> b
        let tasks = [task("a", &["b"]), task("b", &["c"]), task("c", &["b"])];
        assert_eq!(cycles_of(&tasks), vec![vec!["b", "c", "b"]]);
    }

    #[test]
    fn distinct_cycles_through_one_node_are_all_reported() {
        // b -> a and c -> a, with a -> b and a -> c
        let tasks = [task("a", &["b", "c"]), task("b", &["a"]), task("c", &["a"])];
        assert_eq!(
            cycles_of(&tasks),
            vec![vec!["a", "b", "a"], vec!["a", "c", "a"]]
        );
    }

    #[test]
    fn finished_nodes_are_not_reexpanded() {
        // Two roots reaching the same cycle report it once
        let tasks = [
            task("x", &["b"]),
            task("y", &["b"]),
            task("b", &["c"]),
            task("c", &["b"]),
        ];
        assert_eq!(cycles_of(&tasks), vec![vec!["b", "c", "b"]]);
    }

    #[test]
    fn duplicate_dependencies_repeat_back_edges() {
        let tasks = [task("a", &["b"]), task("b", &["a", "a"])];
        assert_eq!(
            cycles_of(&tasks),
            vec![vec!["a", "b", "a"], vec!["a", "b", "a"]]
        );
    }

    #[test]
    fn roots_follow_batch_order() {
        let tasks = [task("c", &["a"]), task("a", &["b"]), task("b", &["c"])];
        assert_eq!(cycles_of(&tasks), vec![vec!["c", "a", "b", "c"]]);
    }

    #[test]
    fn collisions_use_last_record_edges() {
        let tasks = [task("a", &["b"]), task("b", &["a"]), task("a", &[])];
        assert!(cycles_of(&tasks).is_empty());
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let ids: Vec<String> = (0..20_000).map(|i| format!("t{}", i)).collect();
        let mut tasks: Vec<TaskRecord> = ids
            .windows(2)
            .map(|w| TaskRecord::new(w[0].clone()).with_dependencies([w[1].clone()]))
            .collect();
        tasks.push(TaskRecord::new(ids[ids.len() - 1].clone()).with_dependencies(["t0"]));

        let cycles = cycles_of(&tasks);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 20_001);
    }
}

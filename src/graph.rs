//! Property dependency graph.
//!
//! Provides [`PropertyGraph`], a directed graph of which property reads
//! which. The snapshot uses it to warm its cache in dependency order, and
//! callers can ask which properties a given input affects.

use crate::property::PropertyCode;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use petgraph::Direction;
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// The fixed directed graph of property dependencies.
///
/// Only [`PropertyGraph::standard`] builds one. Edges point from a dependency to its dependent: if Speed reads
/// Strength, the edge is `Strength -> Speed`.
///
/// # Examples
///
/// ```rust
/// use current_properties::graph::PropertyGraph;
/// use current_properties::PropertyCode;
///
/// let graph = PropertyGraph::standard();
/// let order = graph.resolution_order();
///
/// let strength = order.iter().position(|c| *c == PropertyCode::Strength).unwrap();
/// let speed = order.iter().position(|c| *c == PropertyCode::Speed).unwrap();
/// assert!(strength < speed);
/// ```
#[derive(Debug, Clone)]
pub struct PropertyGraph {
    graph: DiGraph<PropertyCode, ()>,
    node_map: HashMap<PropertyCode, NodeIndex>,
}

impl PropertyGraph {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// The dependencies of the snapshot's own formulas.
    ///
    /// Only reads of other properties are edges; collaborator inputs such
    /// as cargo weight or afflictions are not nodes.
    pub fn standard() -> Self {
        use PropertyCode::*;

        let mut graph = Self::new();
        for code in PropertyCode::iter() {
            graph.add_node(code);
        }

        graph.add_edge(Strength, StrengthWithoutLoadMalus);
        graph.add_edge(StrengthOfOffhand, Strength);

        graph.add_edge(Agility, Strength);
        graph.add_edge(Agility, StrengthWithoutLoadMalus);
        graph.add_edge(Agility, Size);
        graph.add_edge(Knack, StrengthWithoutLoadMalus);

        graph.add_edge(Speed, Strength);
        graph.add_edge(Speed, Agility);
        graph.add_edge(Speed, Height);

        graph.add_edge(Senses, Knack);
        graph.add_edge(Senses, WoundBoundary);

        graph.add_edge(Beauty, Agility);
        graph.add_edge(Beauty, Knack);
        graph.add_edge(Beauty, Charisma);

        graph.add_edge(Dangerousness, Strength);
        graph.add_edge(Dangerousness, Will);
        graph.add_edge(Dangerousness, Charisma);

        graph.add_edge(Dignity, Intelligence);
        graph.add_edge(Dignity, Will);
        graph.add_edge(Dignity, Charisma);

        graph
    }

    /// Add a node if it doesn't exist and return its index.
    fn add_node(&mut self, code: PropertyCode) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&code) {
            idx
        } else {
            let idx = self.graph.add_node(code);
            self.node_map.insert(code, idx);
            idx
        }
    }

    /// `dependent` reads `dependency`.
    fn add_edge(&mut self, dependent: PropertyCode, dependency: PropertyCode) {
        let dependent_idx = self.add_node(dependent);
        let dependency_idx = self.add_node(dependency);
        self.graph.update_edge(dependency_idx, dependent_idx, ());
    }

    pub fn contains_node(&self, code: PropertyCode) -> bool {
        self.node_map.contains_key(&code)
    }

    /// Direct dependencies of a property, sorted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use current_properties::graph::PropertyGraph;
    /// use current_properties::PropertyCode;
    ///
    /// let graph = PropertyGraph::standard();
    /// assert_eq!(
    ///     graph.dependencies_of(PropertyCode::Senses),
    ///     vec![PropertyCode::Knack, PropertyCode::WoundBoundary]
    /// );
    /// ```
    pub fn dependencies_of(&self, code: PropertyCode) -> Vec<PropertyCode> {
        self.neighbors(code, Direction::Incoming)
    }

    /// Direct dependents of a property, sorted.
    pub fn dependents_of(&self, code: PropertyCode) -> Vec<PropertyCode> {
        self.neighbors(code, Direction::Outgoing)
    }

    /// Every property whose value is affected, directly or transitively,
    /// by `code`. Does not include `code` itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use current_properties::graph::PropertyGraph;
    /// use current_properties::PropertyCode;
    ///
    /// let affected = PropertyGraph::standard().affected_by(PropertyCode::Charisma);
    /// assert_eq!(
    ///     affected,
    ///     vec![PropertyCode::Beauty, PropertyCode::Dangerousness, PropertyCode::Dignity]
    /// );
    /// ```
    pub fn affected_by(&self, code: PropertyCode) -> Vec<PropertyCode> {
        let Some(&start) = self.node_map.get(&code) else {
            return Vec::new();
        };
        let mut affected = Vec::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            if idx != start {
                affected.push(self.graph[idx]);
            }
        }
        affected.sort();
        affected
    }

    /// Order in which properties can be resolved, dependencies first.
    ///
    /// The standard graph is acyclic; if it ever were not, the order falls
    /// back to declaration order, which lazy resolution still handles.
    pub fn resolution_order(&self) -> Vec<PropertyCode> {
        let sorted = toposort(&self.graph, None);
        debug_assert!(sorted.is_ok(), "property graph must be acyclic");
        match sorted {
            Ok(indices) => indices.into_iter().map(|idx| self.graph[idx]).collect(),
            Err(_) => self.graph.node_indices().map(|idx| self.graph[idx]).collect(),
        }
    }

    fn neighbors(&self, code: PropertyCode, direction: Direction) -> Vec<PropertyCode> {
        let Some(&idx) = self.node_map.get(&code) else {
            return Vec::new();
        };
        let mut codes: Vec<_> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|neighbor| self.graph[neighbor])
            .collect();
        codes.sort();
        codes
    }
}

//! 不動点ドライバ

use crate::entity::{ClassId, NodeId, PropertyId, CLASS_BOTTOM, CLASS_TOP};
use crate::graph::ExistentialNode;
use crate::profiler::RuleProfiler;
use crate::rules::{Derivation, RuleChain};
use crate::status::ClassifierStatus;
use crate::{ElError, Result};
use std::collections::{BTreeSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Observer of a running classification
pub trait ProgressMonitor: Send + Sync + 'static {
    /// Called after every processed fact
    fn step(&self, _processed: usize, _pending: usize) {}

    /// Checked after every processed fact
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Monitor that never cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgressMonitor;

impl ProgressMonitor for NoProgressMonitor {}

/// Monitor backed by a shared flag; clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl ProgressMonitor for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Pending fact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fact {
    Subsumer(NodeId, ClassId),
    Successor(PropertyId, NodeId, NodeId),
}

/// Worklist driver for the completion rules.
///
/// `process` handles one fact per call: every subscribed rule runs on the
/// same status, then the derivations are inserted and the new ones queued.
pub struct CelProcessor {
    status: ClassifierStatus,
    chain: RuleChain,
    queue: VecDeque<Fact>,
    profiler: Option<RuleProfiler>,
    monitor: Arc<dyn ProgressMonitor>,
    processed: usize,
    cancelled: bool,
}

impl CelProcessor {
    /// Seed every class node and queue the initial facts
    pub fn new(
        status: ClassifierStatus,
        chain: RuleChain,
        profile: bool,
        monitor: Arc<dyn ProgressMonitor>,
    ) -> Result<Self> {
        let mut processor = Self {
            status,
            chain,
            queue: VecDeque::new(),
            profiler: profile.then(RuleProfiler::new),
            monitor,
            processed: 0,
            cancelled: false,
        };

        let classes: Vec<ClassId> = processor.status.classes().iter().copied().collect();
        for class in classes {
            if class != CLASS_BOTTOM {
                processor.initialize_node(class)?;
            }
        }
        Ok(processor)
    }

    /// Process one pending fact; returns whether work remains
    pub fn process(&mut self) -> Result<bool> {
        if self.cancelled || self.monitor.is_cancelled() {
            self.cancelled = true;
            return Err(ElError::Cancelled);
        }
        let Some(fact) = self.queue.pop_front() else {
            return Ok(false);
        };

        let mut derivations = Vec::new();
        match fact {
            Fact::Subsumer(node, class) => {
                for rule in &self.chain.s_chain {
                    let start = Instant::now();
                    let before = derivations.len();
                    rule.apply_s(&self.status, node, class, &mut derivations);
                    if let Some(profiler) = self.profiler.as_mut() {
                        profiler.record(rule.name(), derivations.len() - before, start.elapsed());
                    }
                }
            }
            Fact::Successor(property, left, right) => {
                for rule in &self.chain.r_chain {
                    let start = Instant::now();
                    let before = derivations.len();
                    rule.apply_r(&self.status, property, left, right, &mut derivations);
                    if let Some(profiler) = self.profiler.as_mut() {
                        profiler.record(rule.name(), derivations.len() - before, start.elapsed());
                    }
                }
            }
        }

        for derivation in derivations {
            self.apply(derivation)?;
        }
        self.processed += 1;

        self.monitor.step(self.processed, self.queue.len());
        if self.monitor.is_cancelled() {
            self.cancelled = true;
            return Err(ElError::Cancelled);
        }
        Ok(!self.is_ready())
    }

    /// Whether the fixpoint has been reached
    pub fn is_ready(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drive `process` until the fixpoint
    pub fn run(&mut self) -> Result<()> {
        while !self.is_ready() {
            self.process()?;
        }
        Ok(())
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn status(&self) -> &ClassifierStatus {
        &self.status
    }

    pub fn chain(&self) -> &RuleChain {
        &self.chain
    }

    pub fn profiler(&self) -> Option<&RuleProfiler> {
        self.profiler.as_ref()
    }

    /// Final status and profile; fails if the run did not reach its fixpoint
    pub fn finish(self) -> Result<(ClassifierStatus, Option<RuleProfiler>)> {
        if self.cancelled {
            return Err(ElError::Cancelled);
        }
        if !self.is_ready() {
            return Err(ElError::InvalidArgument(format!(
                "classification has {} pending facts",
                self.queue.len()
            )));
        }
        Ok((self.status, self.profiler))
    }

    fn apply(&mut self, derivation: Derivation) -> Result<()> {
        match derivation {
            Derivation::Subsumer { node, class } => self.add_subsumer(node, class),
            Derivation::Successor { property, left, right } => self.add_successor(property, left, right),
            Derivation::Node { property, left, node } => {
                let id = match self.status.node_id(&node) {
                    Some(id) => id,
                    None => {
                        let id = self.status.create_or_get_node_id(&node)?;
                        self.initialize_node(id)?;
                        id
                    }
                };
                self.add_successor(property, left, id)
            }
        }
    }

    fn add_subsumer(&mut self, node: NodeId, class: ClassId) -> Result<()> {
        if self.status.add_new_s_entry(node, class)? {
            self.queue.push_back(Fact::Subsumer(node, class));
        }
        Ok(())
    }

    fn add_successor(&mut self, property: PropertyId, left: NodeId, right: NodeId) -> Result<()> {
        if self.status.add_new_r_entry(property, left, right)? {
            self.queue.push_back(Fact::Successor(property, left, right));
        }
        Ok(())
    }

    /// Seed a node from the nodes it entails, then add its marker successors and reflexive loops
    fn initialize_node(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .status
            .node(id)
            .cloned()
            .unwrap_or_else(|| ExistentialNode::new(id));

        self.add_subsumer(id, CLASS_TOP)?;
        if self.status.is_virtual(id) {
            // 値が含意するノード (基底クラスを含む) の包含者を引き継ぐ
            let inherited: BTreeSet<ClassId> = self
                .status
                .nodes_covered_by(id)
                .into_iter()
                .flat_map(|covered| self.status.subsumers(covered).iter().copied())
                .collect();
            for class in inherited {
                self.add_subsumer(id, class)?;
            }
        } else {
            self.add_subsumer(id, id)?;
        }

        for (property, class) in node.existentials() {
            self.add_successor(property, id, class)?;
        }
        let reflexive: Vec<PropertyId> = self.status.ontology().reflexive_properties().iter().copied().collect();
        for property in reflexive {
            self.add_successor(property, id, id)?;
        }
        Ok(())
    }
}

//! EL++ リーナー

use crate::axiom::NormalizedAxiom;
use crate::entity::{
    ClassId, EntityManager, PropertyId, CLASS_BOTTOM, CLASS_TOP, PROPERTY_BOTTOM, PROPERTY_TOP,
};
use crate::expressivity::Expressivity;
use crate::graph::SubsumerGraph;
use crate::hierarchy::Hierarchy;
use crate::model::Ontology;
use crate::normalizer::Normalizer;
use crate::ontology::ExtendedOntology;
use crate::processor::{CelProcessor, NoProgressMonitor, ProgressMonitor};
use crate::profiler::RuleStats;
use crate::rules::RuleChain;
use crate::saturator::RoleSaturator;
use crate::status::ClassifierStatus;
use crate::{ElError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// 拡張規則 (CR7/CR9, CR8) を常に有効化
    pub activate_extended_rules: bool,
    /// ⊥ 伝播規則を常に有効化
    pub activate_bottom_rules: bool,
    /// 規則ごとの統計を記録
    pub activate_profiler: bool,
    /// CR7 の代わりに CR9 を使う
    pub activate_optimized_rules: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            activate_extended_rules: false,
            activate_bottom_rules: false,
            activate_profiler: false,
            activate_optimized_rules: true,
        }
    }
}

impl ClassifierConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ElError::InvalidArgument(format!("invalid configuration: {}", e)))
    }
}

/// Result of a classification: hierarchies over the original entities
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    classes: Hierarchy,
    properties: Hierarchy,
    expressivity: Expressivity,
    rule_chain: Vec<String>,
    virtual_nodes: usize,
    rule_stats: Option<Vec<RuleStats>>,
}

impl Classification {
    /// Class hierarchy (original classes plus ⊤ and ⊥)
    pub fn classes(&self) -> &Hierarchy {
        &self.classes
    }

    /// Object property hierarchy (original properties plus the top and bottom property)
    pub fn properties(&self) -> &Hierarchy {
        &self.properties
    }

    pub fn expressivity(&self) -> Expressivity {
        self.expressivity
    }

    /// Names of the rules that were active, S-rules first
    pub fn rule_chain(&self) -> &[String] {
        &self.rule_chain
    }

    pub fn virtual_node_count(&self) -> usize {
        self.virtual_nodes
    }

    /// Per-rule statistics when profiling was enabled
    pub fn rule_stats(&self) -> Option<&[RuleStats]> {
        self.rule_stats.as_deref()
    }

    /// Whether the class `sub` is subsumed by `sup`
    pub fn is_subsumed_by(&self, sub: ClassId, sup: ClassId) -> bool {
        self.classes.is_subsumed_by(sub, sup)
    }

    /// Whether ⊤ is unsatisfiable
    pub fn is_inconsistent(&self) -> bool {
        self.classes.is_subsumed_by(CLASS_TOP, CLASS_BOTTOM)
    }

    /// Classes equivalent to ⊥, excluding ⊥ itself
    pub fn unsatisfiable_classes(&self) -> BTreeSet<ClassId> {
        let mut classes = self.classes.equivalents(CLASS_BOTTOM);
        classes.remove(&CLASS_BOTTOM);
        classes
    }
}

/// EL++ classifier
pub struct ElReasoner {
    config: ClassifierConfig,
    monitor: Arc<dyn ProgressMonitor>,
}

impl ElReasoner {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            monitor: Arc::new(NoProgressMonitor),
        }
    }

    /// Use `monitor` for progress reporting and cancellation
    pub fn with_monitor(mut self, monitor: Arc<dyn ProgressMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify `ontology` with a fresh entity manager
    pub fn classify_ontology(&self, ontology: &Ontology) -> Result<Classification> {
        self.classify(ontology, EntityManager::new(ontology.highest_id()))
    }

    /// Classify `ontology`, allocating auxiliary entities from `manager`
    pub fn classify(&self, ontology: &Ontology, mut manager: EntityManager) -> Result<Classification> {
        let start = Instant::now();
        info!(
            "Starting EL classification: {} axioms, {} classes, {} properties",
            ontology.axioms.len(),
            ontology.classes.len(),
            ontology.properties.len()
        );
        if ontology.highest_id() > manager.highest_original_id() {
            return Err(ElError::InvalidArgument(format!(
                "entity manager covers ids up to {} but the ontology uses {}",
                manager.highest_original_id(),
                ontology.highest_id()
            )));
        }

        // 1. 正規化
        let normalized = Normalizer::new(&mut manager).normalize(&ontology.axioms)?;
        let expressivity = Expressivity::detect(&normalized, &manager);

        // 2. ロール階層の飽和
        let saturated = RoleSaturator::new(&mut manager).saturate(&normalized)?;

        // 3. 索引
        let extended = ExtendedOntology::new(&saturated, &manager);
        let chain = self.select_rules(&expressivity);
        debug!(
            "Expressivity {}, S-rules {:?}, R-rules {:?}",
            expressivity,
            chain.s_chain.iter().map(|rule| rule.name()).collect::<Vec<_>>(),
            chain.r_chain.iter().map(|rule| rule.name()).collect::<Vec<_>>()
        );

        // 4. 完備化
        let mut classes: BTreeSet<ClassId> = ontology.classes.clone();
        classes.extend(extended.classes().iter().copied());
        classes.extend(manager.auxiliary_classes());
        let status = ClassifierStatus::new(extended, classes, manager.peek_next_id())?;
        let mut processor = CelProcessor::new(status, chain.clone(), self.config.activate_profiler, Arc::clone(&self.monitor))?;
        processor.run()?;
        let processed = processor.processed();
        let (status, profiler) = processor.finish()?;

        if let Some(profiler) = &profiler {
            profiler.log_summary();
        }

        // 5. 出力
        let classification = Classification {
            classes: Hierarchy::new(class_graph(&status, ontology)),
            properties: Hierarchy::new(property_graph(&saturated, ontology)),
            expressivity,
            rule_chain: chain
                .s_chain
                .iter()
                .chain(chain.r_chain.iter())
                .map(|rule| rule.name().to_string())
                .collect(),
            virtual_nodes: status.virtual_node_count(),
            rule_stats: profiler.map(|profiler| profiler.report()),
        };

        info!(
            "EL classification finished in {:?}: {} facts processed, {} S-entries, {} R-entries, {} virtual nodes",
            start.elapsed(),
            processed,
            status.subsumer_graph().entry_count(),
            status.relation_map().len(),
            classification.virtual_nodes
        );
        Ok(classification)
    }

    /// Rule chain for the configuration, forcing rule groups the ontology needs
    pub fn select_rules(&self, expressivity: &Expressivity) -> RuleChain {
        let extended = self.config.activate_extended_rules || expressivity.requires_extended_rules();
        let bottom = self.config.activate_bottom_rules || expressivity.requires_bottom_rules();
        if extended && !self.config.activate_extended_rules {
            debug!("Extended rules forced by expressivity {}", expressivity);
        }
        if bottom && !self.config.activate_bottom_rules {
            debug!("Bottom rules forced by expressivity {}", expressivity);
        }
        RuleChain::new(extended, bottom, self.config.activate_optimized_rules)
    }
}

impl Default for ElReasoner {
    fn default() -> Self {
        Self::new()
    }
}

/// S restricted to the original classes and ⊤/⊥
fn class_graph(status: &ClassifierStatus, ontology: &Ontology) -> SubsumerGraph {
    let mut keep = ontology.classes.clone();
    keep.insert(CLASS_TOP);
    keep.insert(CLASS_BOTTOM);
    status.subsumer_graph().restrict(&keep)
}

/// Saturated property hierarchy over the original properties
fn property_graph(saturated: &BTreeSet<NormalizedAxiom>, ontology: &Ontology) -> SubsumerGraph {
    let mut graph = SubsumerGraph::new(PROPERTY_BOTTOM, PROPERTY_TOP);
    let original = |property: PropertyId| ontology.properties.contains(&property);
    for property in &ontology.properties {
        graph.add_vertex(*property);
    }
    for axiom in saturated {
        if let NormalizedAxiom::Ri2 { sub_property, super_property } = *axiom {
            if sub_property != super_property && original(sub_property) && original(super_property) {
                graph.add_ancestor(sub_property, super_property);
            }
        }
    }
    graph
}

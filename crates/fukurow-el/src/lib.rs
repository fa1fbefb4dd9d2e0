//! EL++ 分類エンジン
//!
//! このクレートは CEL 完備化アルゴリズムによる包摂分類を提供します:
//! - 公理の正規化 (7 種類の正規形)
//! - ロール階層の飽和
//! - 拡張オントロジーの索引
//! - S/R/V 関係上の完備化規則の不動点計算
//! - クラス・プロパティ階層の出力

pub mod axiom;
pub mod entity;
pub mod expressivity;
pub mod graph;
pub mod hierarchy;
pub mod model;
pub mod normalizer;
pub mod ontology;
pub mod processor;
pub mod profiler;
pub mod reasoner;
pub mod rules;
pub mod saturator;
pub mod status;

pub use axiom::NormalizedAxiom;
pub use entity::{ClassId, EntityManager, IndividualId, NodeId, PropertyId};
pub use expressivity::Expressivity;
pub use graph::{BinaryRelation, ExistentialNode, RelationMap, SubsumerGraph};
pub use hierarchy::Hierarchy;
pub use model::{ClassExpression, ComplexAxiom, Ontology, PropertyExpression};
pub use normalizer::Normalizer;
pub use ontology::ExtendedOntology;
pub use processor::{CancellationFlag, CelProcessor, NoProgressMonitor, ProgressMonitor};
pub use profiler::{RuleProfiler, RuleStats};
pub use reasoner::{Classification, ClassifierConfig, ElReasoner};
pub use saturator::RoleSaturator;
pub use status::ClassifierStatus;

// Error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid axiom: {0}")]
    InvalidAxiom(String),

    #[error("Classification cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ElError>;

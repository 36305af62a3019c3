//! Rule-based humanization for the Notecraft humanizer
//!
//! The pipeline rewrites text in stages (structural, lexical, length
//! balancing), the scorer rates a candidate against its original and the
//! gate decides whether to accept it, retry once or fall back.

pub mod balancer;
pub mod casing;
pub mod fallback;
pub mod gate;
pub mod lexical;
pub mod pipeline;
pub mod rules;
pub mod scorer;
pub mod segmenter;
pub mod structural;


pub use balancer::{Adjustment, Balanced, LengthBalancer};
pub use fallback::basic_contractions;
pub use gate::{AcceptanceGate, GateOutcome};
pub use lexical::{LexicalConfig, LexicalTransformer};
pub use pipeline::{HumanizationPipeline, ProcessingError};
pub use rules::{rule_vocabulary, MatchScope, TransformRule};
pub use scorer::{validate_humanization_quality, QualityScorer};
pub use segmenter::PunctuationSegmenter;
pub use structural::{SentenceTransform, StructuralConfig, StructuralOutcome, StructuralTransformer};

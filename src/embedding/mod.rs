//! Semantic embedding capability
//! The capability interface, cosine similarity, and the Model2Vec backend

pub mod capability;
pub mod model2vec;

pub use capability::{cosine_similarity, EmbeddingCapability};
pub use model2vec::Model2VecEmbedder;

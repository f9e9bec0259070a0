//! Query trees whose terms can score with per-occurrence payloads
//!
//! A parsed query tree is rewritten by [`PayloadQueryRewriter`] so that terms and
//! phrases on payload-bearing fields pull a weight from the payload stored on each
//! matched term occurrence. The weight is decoded by the similarity and folded into
//! the term's score with a [`PayloadFunction`].

#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate maplit;
extern crate byteorder;
extern crate roaring;
extern crate unicode_segmentation;

pub mod term;
pub mod token;
pub mod document;
pub mod payload;
pub mod similarity;
pub mod analysis;
pub mod query;
pub mod store;
pub mod collectors;

pub use term::Term;
pub use token::Token;
pub use document::Document;
pub use payload::PayloadFunction;
pub use similarity::{Similarity, SimilarityModel, PayloadSimilarity};
pub use query::{Query, FieldTerm, BooleanClause, Occur, PayloadTermQuery};
pub use query::payload_rewriter::PayloadQueryRewriter;

//! Encoding, decoding and combining of per-occurrence payloads
//!
//! Payloads are written at index time as a big-endian IEEE-754 single precision
//! float. At scoring time each matched occurrence's payload is decoded into a
//! multiplier, and a [`PayloadFunction`] folds the multipliers seen in one
//! document into a single factor.

use byteorder::{BigEndian, ByteOrder};


/// Encodes a weight the way it is stored on a term occurrence
pub fn encode_float(value: f32) -> Vec<u8> {
    let mut bytes = vec![0; 4];
    BigEndian::write_f32(&mut bytes, value);
    bytes
}


/// Decodes the similarity multiplier for one term occurrence
///
/// An empty payload means the occurrence has no payload, which is neutral (1.0).
/// Only the first four bytes are read. Buffers shorter than that can't have been
/// written by `encode_float` and are treated as absent.
pub fn score_payload(payload: &[u8]) -> f32 {
    if payload.is_empty() {
        return 1.0;
    }

    if payload.len() < 4 {
        debug!("payload too short to decode ({} bytes), treating it as absent", payload.len());
        return 1.0;
    }

    BigEndian::read_f32(payload)
}


/// Combines the payload scores of the occurrences matched in one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadFunction {
    Max,
    Min,
    Average,
}


impl PayloadFunction {
    pub fn name(&self) -> &'static str {
        match *self {
            PayloadFunction::Max => "max",
            PayloadFunction::Min => "min",
            PayloadFunction::Average => "avg",
        }
    }

    /// Returns 1.0 when no payloads were seen
    pub fn doc_score(&self, payload_scores: &[f32]) -> f32 {
        if payload_scores.is_empty() {
            return 1.0;
        }

        match *self {
            PayloadFunction::Max => {
                payload_scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
            }
            PayloadFunction::Min => {
                payload_scores.iter().cloned().fold(f32::INFINITY, f32::min)
            }
            PayloadFunction::Average => {
                let total: f32 = payload_scores.iter().sum();
                total / payload_scores.len() as f32
            }
        }
    }
}

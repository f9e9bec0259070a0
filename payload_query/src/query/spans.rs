//! Finds phrase and near matches within one field's token stream

use crate::term::Term;
use crate::token::Token;


/// Returns the tokens of every match of `terms` within `slop` position moves
///
/// Each match has one token per term, in term order. When `in_order` is false, the
/// terms may appear in any order within the window.
pub fn find_spans<'a>(tokens: &'a [Token], terms: &[&Term], slop: u32, in_order: bool) -> Vec<Vec<&'a Token>> {
    if terms.is_empty() {
        return Vec::new();
    }

    // Occurrences of each term, ordered by position
    let mut occurrences: Vec<Vec<&'a Token>> = Vec::with_capacity(terms.len());
    for term in terms.iter() {
        let mut term_tokens = tokens.iter().filter(|token| &token.term == *term).collect::<Vec<_>>();
        if term_tokens.is_empty() {
            return Vec::new();
        }

        term_tokens.sort_by_key(|token| token.position);
        occurrences.push(term_tokens);
    }

    if in_order {
        ordered_spans(&occurrences, slop)
    } else {
        unordered_spans(&occurrences, slop)
    }
}


#[inline]
fn within_slop(first_position: u32, last_position: u32, num_terms: usize, slop: u32) -> bool {
    let width = last_position.saturating_sub(first_position) as u64;
    width.saturating_sub(num_terms as u64 - 1) <= slop as u64
}


fn ordered_spans<'a>(occurrences: &[Vec<&'a Token>], slop: u32) -> Vec<Vec<&'a Token>> {
    let mut spans = Vec::new();

    'start: for first in occurrences[0].iter() {
        let mut span = vec![*first];
        let mut previous_position = first.position;

        for term_occurrences in occurrences[1..].iter() {
            match term_occurrences.iter().find(|token| token.position > previous_position) {
                Some(token) => {
                    previous_position = token.position;
                    span.push(*token);
                }
                None => {
                    // Later starts can't do any better
                    break 'start;
                }
            }
        }

        if within_slop(first.position, previous_position, occurrences.len(), slop) {
            spans.push(span);
        }
    }

    spans
}


fn unordered_spans<'a>(occurrences: &[Vec<&'a Token>], slop: u32) -> Vec<Vec<&'a Token>> {
    let num_terms = occurrences.len();

    // Every occurrence of every term, tagged with the term it belongs to
    let mut merged = Vec::new();
    for (term_index, term_occurrences) in occurrences.iter().enumerate() {
        for token in term_occurrences.iter() {
            merged.push((token.position, term_index, *token));
        }
    }
    merged.sort_by_key(|&(position, term_index, _)| (position, term_index));

    let mut spans = Vec::new();
    let mut last_matched_start = None;

    for start in 0..merged.len() {
        let (start_position, _, _) = merged[start];
        if last_matched_start == Some(start_position) {
            continue;
        }

        let mut span: Vec<Option<&'a Token>> = vec![None; num_terms];
        let mut used_positions = Vec::with_capacity(num_terms);
        let mut found = 0;
        let mut last_position = start_position;

        for &(position, term_index, token) in merged[start..].iter() {
            if span[term_index].is_some() || used_positions.contains(&position) {
                continue;
            }

            span[term_index] = Some(token);
            used_positions.push(position);
            last_position = position;
            found += 1;

            if found == num_terms {
                break;
            }
        }

        if found == num_terms && within_slop(start_position, last_position, num_terms, slop) {
            spans.push(span.into_iter().flatten().collect());
            last_matched_start = Some(start_position);
        }
    }

    spans
}

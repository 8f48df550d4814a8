//! Exact-identifier matching

use std::collections::HashMap;

use crate::types::{MatchCandidate, TransactionRecord};

/// Pair every bank/internal record combination sharing a business identifier.
///
/// Identifier equality is authoritative: pairs found here are never
/// second-guessed by similarity scoring, and the paired records are removed
/// from the fuzzy scan. Records without an identifier never participate;
/// duplicated identifiers pair combinatorially, which is standard
/// equality-join behavior. Output order follows the bank ledger, then the
/// internal ledger within one identifier.
pub fn match_exact_ids(
    bank: &[TransactionRecord],
    internal: &[TransactionRecord],
) -> Vec<MatchCandidate> {
    let mut internal_by_id: HashMap<&str, Vec<&TransactionRecord>> = HashMap::new();
    for record in internal {
        if let Some(id) = record.id.as_deref() {
            internal_by_id.entry(id).or_default().push(record);
        }
    }

    let mut matches = Vec::new();
    for bank_record in bank {
        if let Some(id) = bank_record.id.as_deref() {
            if let Some(counterparts) = internal_by_id.get(id) {
                for internal_record in counterparts {
                    matches.push(MatchCandidate::exact(
                        bank_record.clone(),
                        (*internal_record).clone(),
                    ));
                }
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchType;

    fn rec(index: usize, id: Option<&str>) -> TransactionRecord {
        match id {
            Some(id) => TransactionRecord::new(index).with_id(id),
            None => TransactionRecord::new(index),
        }
    }

    #[test]
    fn test_matches_equal_identifiers() {
        let bank = vec![rec(0, Some("DOC-1")), rec(1, Some("DOC-2"))];
        let internal = vec![rec(0, Some("DOC-2")), rec(1, Some("DOC-9"))];

        let matches = match_exact_ids(&bank, &internal);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].bank.index, 1);
        assert_eq!(matches[0].internal.index, 0);
        assert_eq!(matches[0].score, 1.0);
        assert_eq!(matches[0].match_type, MatchType::ExactId);
    }

    #[test]
    fn test_null_identifiers_never_pair() {
        let bank = vec![rec(0, None)];
        let internal = vec![rec(0, None)];

        assert!(match_exact_ids(&bank, &internal).is_empty());
    }

    #[test]
    fn test_duplicate_identifiers_pair_combinatorially() {
        let bank = vec![rec(0, Some("DOC-1")), rec(1, Some("DOC-1"))];
        let internal = vec![rec(0, Some("DOC-1")), rec(1, Some("DOC-1"))];

        let matches = match_exact_ids(&bank, &internal);
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn test_order_independence_of_match_set() {
        let bank = vec![rec(0, Some("A")), rec(1, Some("B")), rec(2, Some("C"))];
        let internal = vec![rec(0, Some("C")), rec(1, Some("A"))];

        let forward = match_exact_ids(&bank, &internal);

        let mut bank_reversed = bank.clone();
        bank_reversed.reverse();
        let mut internal_reversed = internal.clone();
        internal_reversed.reverse();
        let reversed = match_exact_ids(&bank_reversed, &internal_reversed);

        let mut forward_pairs: Vec<(usize, usize)> = forward
            .iter()
            .map(|pair| (pair.bank.index, pair.internal.index))
            .collect();
        let mut reversed_pairs: Vec<(usize, usize)> = reversed
            .iter()
            .map(|pair| (pair.bank.index, pair.internal.index))
            .collect();
        forward_pairs.sort_unstable();
        reversed_pairs.sort_unstable();
        assert_eq!(forward_pairs, reversed_pairs);
    }
}

//! Description text similarity scoring

use strsim::sorensen_dice;

/// Score how close two description strings are, in [0.0, 1.0].
///
/// Comparison is case-insensitive Sørensen-Dice bigram overlap, a
/// token-overlap ratio that tolerates word reordering and partial phrases
/// the way bank statement descriptions demand ("TRANSFERENCIA PIX RECEBIDA"
/// vs "PIX RECEBIDO" still clears a 0.5 threshold). The score is symmetric
/// and identical strings score exactly 1.0.
///
/// A missing or blank description on either side scores 0.0: two
/// blank-description rows must never look trivially identical.
pub fn description_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (normalized(a), normalized(b)) {
        (Some(a), Some(b)) => sorensen_dice(&a, &b),
        _ => 0.0,
    }
}

fn normalized(text: Option<&str>) -> Option<String> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

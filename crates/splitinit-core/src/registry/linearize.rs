//! C3 linearization.

use super::ComponentId;

/// Merges parent linearizations into one consistent ordering.
///
/// Each round takes the first head that appears in no other sequence's
/// tail. Returns `None` when no such head exists, i.e. the declared parent
/// orders contradict each other.
pub fn c3_merge(mut sequences: Vec<Vec<ComponentId>>) -> Option<Vec<ComponentId>> {
    let mut result = Vec::new();
    loop {
        sequences.retain(|s| !s.is_empty());
        if sequences.is_empty() {
            return Some(result);
        }

        let candidate = sequences
            .iter()
            .map(|s| s[0])
            .find(|c| sequences.iter().all(|s| !s[1..].contains(c)))?;

        result.push(candidate);
        for sequence in &mut sequences {
            if sequence[0] == candidate {
                sequence.remove(0);
            }
        }
    }
}

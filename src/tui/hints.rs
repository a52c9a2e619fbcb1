// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use crate::model::PartId;

/// `n` distinct labels over `alphabet`, all of the same (minimal) length.
///
/// Equal lengths keep the set prefix-free, so a typed label never waits for a longer one.
pub(crate) fn hint_labels(n: usize, alphabet: &str) -> Vec<String> {
    let alphabet: Vec<char> = alphabet.chars().collect();
    assert!(!alphabet.is_empty(), "hint alphabet must not be empty");

    let mut seen = HashSet::with_capacity(alphabet.len());
    for &ch in &alphabet {
        assert!(seen.insert(ch), "hint alphabet must not contain duplicate characters");
    }

    if n == 0 {
        return Vec::new();
    }

    let k = alphabet.len();
    if k == 1 {
        return (1..=n)
            .map(|len| std::iter::repeat(alphabet[0]).take(len).collect())
            .collect();
    }

    let mut len = 1usize;
    let mut capacity = k;
    while capacity < n {
        len += 1;
        capacity = capacity.saturating_mul(k);
    }

    (0..n)
        .map(|i| {
            let mut x = i;
            let mut chars = vec![alphabet[0]; len];
            for slot in chars.iter_mut().rev() {
                *slot = alphabet[x % k];
                x /= k;
            }
            chars.into_iter().collect()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HintTarget {
    pub(crate) label: String,
    pub(crate) part_id: PartId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HintMatch {
    Exact(PartId),
    Partial,
    Miss,
}

/// Labels one target per part, in ledger order.
pub(crate) fn hint_targets<'a>(
    part_ids: impl IntoIterator<Item = &'a PartId>,
    alphabet: &str,
) -> Vec<HintTarget> {
    let part_ids = part_ids.into_iter().cloned().collect::<Vec<_>>();
    hint_labels(part_ids.len(), alphabet)
        .into_iter()
        .zip(part_ids)
        .map(|(label, part_id)| HintTarget { label, part_id })
        .collect()
}

pub(crate) fn match_hint(targets: &[HintTarget], typed: &str) -> HintMatch {
    if let Some(target) = targets.iter().find(|target| target.label == typed) {
        return HintMatch::Exact(target.part_id.clone());
    }
    if targets.iter().any(|target| target.label.starts_with(typed)) {
        HintMatch::Partial
    } else {
        HintMatch::Miss
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{hint_labels, hint_targets, match_hint, HintMatch};
    use crate::model::PartId;

    #[test]
    fn short_lists_get_single_characters() {
        assert_eq!(hint_labels(3, "abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn longer_lists_share_one_label_length() {
        let labels = hint_labels(4, "abc");
        assert_eq!(labels, vec!["aa", "ab", "ac", "ba"]);
    }

    #[test]
    fn labels_are_unique_and_prefix_free() {
        let labels = hint_labels(30, "ASDFJKLEWCMPGH");
        assert_eq!(labels.len(), 30);
        let unique = labels.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 30);
        assert!(labels.iter().all(|label| label.chars().count() == 2));
    }

    #[test]
    #[should_panic(expected = "hint alphabet must not be empty")]
    fn empty_alphabet_panics() {
        let _ = hint_labels(1, "");
    }

    #[test]
    #[should_panic(expected = "hint alphabet must not contain duplicate characters")]
    fn duplicate_alphabet_panics() {
        let _ = hint_labels(1, "abca");
    }

    #[test]
    fn typed_labels_resolve_to_parts() {
        let ids = ["1", "2", "3", "4"]
            .iter()
            .map(|id| PartId::new(*id).expect("part id"))
            .collect::<Vec<_>>();
        let targets = hint_targets(&ids, "AB");
        assert_eq!(targets[2].label, "BA");

        assert_eq!(match_hint(&targets, "B"), HintMatch::Partial);
        assert_eq!(match_hint(&targets, "BA"), HintMatch::Exact(ids[2].clone()));
        assert_eq!(match_hint(&targets, "C"), HintMatch::Miss);
    }
}

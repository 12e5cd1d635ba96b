use log::debug;

use crate::config_set::ConfigurationSet;

/// Merge sets that differ only in which channel counts they cover.
///
/// For each pair of live sets, earlier first, the later set is absorbed into the earlier one
/// when both have the same rates and formats and agree on the channel map of every channel
/// count they share. Absorbed sets are left in place with no channels.
///
/// This is a single pass over all pairs. A set that only becomes compatible with an earlier
/// one after absorbing a later one is not revisited.
///
/// Returns the number of sets absorbed.
pub fn compact(sets: &mut [ConfigurationSet]) -> usize {
    let mut absorbed = 0;
    for i in 0..sets.len() {
        let (head, tail) = sets.split_at_mut(i + 1);
        let earlier = &mut head[i];
        for later in tail.iter_mut() {
            if !earlier.is_live() || !later.is_live() {
                continue;
            }
            if earlier.compatible_with(later) {
                debug!(
                    "merging channels {:?} into {:?}",
                    later.channels(),
                    earlier.channels()
                );
                earlier.absorb(later);
                absorbed += 1;
            }
        }
    }
    absorbed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::build_sets,
        candidate::Triple,
        channel::{ChannelCount, ChannelSet},
        format::SampleFormat::*,
        test_util::triple,
    };
    use std::collections::BTreeSet;

    fn ch(n: u8) -> ChannelCount {
        ChannelCount::new(n).unwrap()
    }

    fn live(sets: &[ConfigurationSet]) -> Vec<&ConfigurationSet> {
        sets.iter().filter(|s| s.is_live()).collect()
    }

    fn expand(sets: &[ConfigurationSet]) -> BTreeSet<Triple> {
        sets.iter().flat_map(|s| s.triples()).collect()
    }

    #[test]
    fn merges_identical_rates_and_formats() {
        let mut sets = build_sets([
            (triple(2, 44100, S16Le), "FL,FR"),
            (triple(2, 48000, S16Le), "FL,FR"),
            (triple(6, 44100, S16Le), "FL,FR,FC,LFE,RL,RR"),
            (triple(6, 48000, S16Le), "FL,FR,FC,LFE,RL,RR"),
        ])
        .unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(compact(&mut sets), 1);
        let remaining = live(&sets);
        assert_eq!(remaining.len(), 1);
        let set = remaining[0];
        assert_eq!(set.channels(), [ch(2), ch(6)].into_iter().collect::<ChannelSet>());
        assert_eq!(set.channel_map(ch(2)), "FL,FR");
        assert_eq!(set.channel_map(ch(6)), "FL,FR,FC,LFE,RL,RR");
        assert!(!sets[1].is_live());
    }

    #[test]
    fn differing_rates_are_kept_apart() {
        let mut sets = build_sets([
            (triple(2, 44100, S16Le), ""),
            (triple(2, 48000, S16Le), ""),
            (triple(4, 48000, S16Le), ""),
        ])
        .unwrap();
        assert_eq!(compact(&mut sets), 0);
        assert_eq!(live(&sets).len(), 2);
    }

    #[test]
    fn conflicting_shared_label_blocks_merge() {
        let mut sets = vec![
            ConfigurationSet::new(
                ch(2),
                crate::rate::RateSet::single(triple(2, 48000, S16Le).rate),
                crate::format::FormatSet::single(S16Le),
                "FL,FR",
            ),
            ConfigurationSet::new(
                ch(2),
                crate::rate::RateSet::single(triple(2, 48000, S16Le).rate),
                crate::format::FormatSet::single(S16Le),
                "FR,FL",
            ),
        ];
        assert_eq!(compact(&mut sets), 0);
        assert_eq!(live(&sets).len(), 2);
    }

    #[test]
    fn chain_collapses_into_first() {
        let mut sets = build_sets([
            (triple(1, 48000, S16Le), ""),
            (triple(2, 48000, S16Le), ""),
            (triple(4, 48000, S16Le), ""),
            (triple(8, 48000, S16Le), ""),
        ])
        .unwrap();
        assert_eq!(compact(&mut sets), 3);
        let remaining = live(&sets);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].channels().len(), 4);
    }

    #[test]
    fn preserves_triples_and_is_idempotent() {
        let mut found = vec![];
        for channels in [1, 2, 4, 6, 8] {
            for hz in [44100, 48000, 96000] {
                for format in [S16Le, S24Le, S32Le] {
                    if channels == 6 && format == S32Le {
                        continue;
                    }
                    let label = if hz == 96000 && channels == 2 { "FL,FR" } else { "" };
                    found.push((triple(channels, hz, format), label));
                }
            }
        }
        let mut sets = build_sets(found).unwrap();
        let before = expand(&sets);
        let live_before = live(&sets).len();
        compact(&mut sets);
        let once = sets.clone();
        assert!(live(&sets).len() <= live_before);
        assert_eq!(expand(&sets), before);
        assert_eq!(compact(&mut sets), 0);
        assert_eq!(sets, once);
    }
}

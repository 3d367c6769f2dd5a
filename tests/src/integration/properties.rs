//! # Sequence and Agreement Properties
//!
//! Randomized runs over seeded generators, so failures reproduce.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{parameters, Channel};
    use chaincode_lifecycle::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SEEDS: [u64; 4] = [1, 7, 42, 1337];

    fn definition(sequence: i64, rng: &mut StdRng) -> ChaincodeDefinition {
        let version = format!("{}.{}", sequence, rng.gen_range(0..10));
        let policy: Vec<u8> = (0..rng.gen_range(0..8)).map(|_| rng.gen()).collect();
        ChaincodeDefinition::new(sequence, parameters(&version, &policy))
    }

    /// After N commits the sequence is N; a commit at anything but N+1
    /// fails and leaves the committed definition in place.
    #[test]
    fn test_sequence_counts_commits() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let channel = Channel::new(&["Org1"]);
            let commits = rng.gen_range(1..=12);

            let mut last = None;
            for sequence in 1..=commits {
                let def = definition(sequence, &mut rng);
                channel.approve("Org1", "mycc", &def, None).unwrap();
                channel.commit("mycc", &def).unwrap();
                last = Some(def);
            }
            assert_eq!(channel.sequence("mycc"), commits, "seed {seed}");

            let wrong = loop {
                let candidate = rng.gen_range(-3..commits + 6);
                if candidate != commits + 1 {
                    break candidate;
                }
            };
            let keys_before = channel.public.len();
            let result = channel.commit("mycc", &definition(wrong, &mut rng));
            assert!(
                matches!(result, Err(LifecycleError::CommitSequenceMismatch { .. })),
                "seed {seed}: commit at {wrong} after {commits}"
            );
            assert_eq!(channel.public.len(), keys_before);
            assert_eq!(
                channel
                    .lifecycle
                    .query_chaincode_definition("mycc", &channel.public)
                    .ok(),
                last
            );
        }
    }

    /// Approval accepts exactly the committed and the next sequence.
    #[test]
    fn test_approval_window() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let channel = Channel::new(&["Org1", "Org2"]);
            let commits = rng.gen_range(0..6);

            let mut committed = None;
            for sequence in 1..=commits {
                let def = definition(sequence, &mut rng);
                channel.approve("Org1", "mycc", &def, None).unwrap();
                channel.commit("mycc", &def).unwrap();
                committed = Some(def);
            }

            for requested in 0..commits + 4 {
                let mut proposal = definition(requested, &mut rng);
                proposal.endorsement_info.endorsement_plugin = "org2-escc".to_string();
                let result = channel.approve("Org2", "mycc", &proposal, None);
                match requested {
                    0 if commits == 0 => {
                        assert_eq!(result, Err(LifecycleError::ZeroSequence), "seed {seed}")
                    }
                    r if r < commits => assert!(
                        matches!(result, Err(LifecycleError::SequenceSuperseded { .. })),
                        "seed {seed}: {r} below {commits}"
                    ),
                    r if r == commits => assert!(
                        matches!(result, Err(LifecycleError::DefinitionMismatch { .. })),
                        "seed {seed}: {r} with fresh parameters"
                    ),
                    r if r == commits + 1 => assert!(result.is_ok(), "seed {seed}: next {r}"),
                    r => assert!(
                        matches!(result, Err(LifecycleError::SequenceTooHigh { .. })),
                        "seed {seed}: {r} above {commits}"
                    ),
                }
            }

            if let Some(def) = committed {
                channel.approve("Org2", "mycc", &def, None).unwrap();
            }
        }
    }

    /// Agreement has one entry per org, in channel order, true exactly for
    /// the orgs that approved the committed parameters.
    #[test]
    fn test_agreement_aligned_with_orgs() {
        let orgs = ["Org1", "Org2", "Org3", "Org4", "Org5"];
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let channel = Channel::new(&orgs);
            let def = definition(1, &mut rng);
            let mut expected = Vec::new();

            for org in orgs {
                match rng.gen_range(0..3) {
                    0 => expected.push(false),
                    1 => {
                        channel.approve(org, "mycc", &def, None).unwrap();
                        expected.push(true);
                    }
                    _ => {
                        let mut other = def.clone();
                        other.endorsement_info.endorsement_plugin = format!("custom-{org}");
                        channel.approve(org, "mycc", &other, None).unwrap();
                        expected.push(false);
                    }
                }
            }

            let agreement = channel.commit("mycc", &def).unwrap();
            assert_eq!(agreement.len(), orgs.len());
            assert_eq!(agreement, expected, "seed {seed}");
            assert_eq!(channel.sequence("mycc"), 1);
        }
    }

    /// Approving with no package hash keeps the hash of an earlier approval.
    #[test]
    fn test_package_source_survives_hashless_reapproval() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let channel = Channel::new(&["Org1"]);
            let hash: Vec<u8> = (0..32).map(|_| rng.gen()).collect();

            channel
                .approve("Org1", "mycc", &definition(1, &mut rng), Some(hash.as_slice()))
                .unwrap();
            for _ in 0..rng.gen_range(1..4) {
                channel
                    .approve("Org1", "mycc", &definition(1, &mut rng), None)
                    .unwrap();
            }

            let recorded = channel
                .lifecycle
                .query_approved_package_hash("mycc", 1, channel.org("Org1"))
                .unwrap();
            assert_eq!(recorded, Some(hash), "seed {seed}");
        }
    }
}

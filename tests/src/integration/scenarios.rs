//! # End-to-End Scenarios
//!
//! Approve, commit and install flows across organizations of one channel.
//!
//! ## Flows Tested:
//!
//! 1. **First definition**: approve at 1, commit at 1
//! 2. **Upgrade with partial approval**: the definition is written even when
//!    some orgs did not approve
//! 3. **Out-of-order commit**: rejected without touching public state
//! 4. **Conflicting re-approval**: rejected with the mismatching field named
//! 5. **Install then approve**: the approval records the installed hash

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{install_package, parameters, Channel};
    use chaincode_lifecycle::prelude::*;
    use chaincode_lifecycle::serializer::StaticMetadata;
    use ledger_state::RangeableState;

    // =============================================================================
    // APPROVE + COMMIT
    // =============================================================================

    /// Undefined namespace, single org approves and commits sequence 1.
    #[test]
    fn test_first_definition_committed() {
        let channel = Channel::new(&["Org1"]);
        let definition = ChaincodeDefinition::new(1, parameters("1.0", b"policy"));

        channel.approve("Org1", "mycc", &definition, None).unwrap();
        let agreement = channel.commit("mycc", &definition).unwrap();

        assert_eq!(agreement, vec![true]);
        assert_eq!(channel.sequence("mycc"), 1);
        assert_eq!(
            channel
                .lifecycle
                .query_chaincode_definition("mycc", &channel.public)
                .unwrap(),
            definition
        );
    }

    /// Only Org1 approves the upgrade; the commit still lands.
    #[test]
    fn test_upgrade_with_partial_approval() {
        let channel = Channel::new(&["Org1", "Org2"]);
        let first = ChaincodeDefinition::new(1, parameters("1.0", b"policy"));
        channel.approve("Org1", "mycc", &first, None).unwrap();
        channel.commit("mycc", &first).unwrap();

        let second = ChaincodeDefinition::new(2, parameters("2.0", b"policy-v2"));
        channel.approve("Org1", "mycc", &second, None).unwrap();
        let agreement = channel.commit("mycc", &second).unwrap();

        assert_eq!(agreement, vec![true, false]);
        assert_eq!(channel.sequence("mycc"), 2);
        let committed = channel
            .lifecycle
            .query_chaincode_definition("mycc", &channel.public)
            .unwrap();
        assert_eq!(committed.endorsement_info.version, "2.0");
        assert_eq!(committed.validation_info.validation_parameter, b"policy-v2");
    }

    /// Commit that skips a sequence leaves public state as it was.
    #[test]
    fn test_out_of_order_commit_rejected() {
        let channel = Channel::new(&["Org1"]);
        let first = ChaincodeDefinition::new(1, parameters("1.0", b"policy"));
        channel.approve("Org1", "mycc", &first, None).unwrap();
        channel.commit("mycc", &first).unwrap();
        let keys_before = channel.public.len();

        let third = ChaincodeDefinition::new(3, parameters("3.0", b"policy"));
        let result = channel.commit("mycc", &third);

        assert_eq!(
            result,
            Err(LifecycleError::CommitSequenceMismatch {
                requested: 3,
                expected: 2
            })
        );
        assert_eq!(channel.sequence("mycc"), 1);
        assert_eq!(channel.public.len(), keys_before);
        assert_eq!(
            channel
                .lifecycle
                .query_chaincode_definition("mycc", &channel.public)
                .unwrap(),
            first
        );
    }

    /// Re-approving the committed sequence with other parameters fails.
    #[test]
    fn test_conflicting_reapproval_rejected() {
        let channel = Channel::new(&["Org1", "Org2"]);
        let committed = ChaincodeDefinition::new(1, parameters("1.0", b"policy"));
        channel.approve("Org1", "mycc", &committed, None).unwrap();
        channel.commit("mycc", &committed).unwrap();

        let conflicting = ChaincodeDefinition::new(1, parameters("1.0", b"other-policy"));
        let err = channel
            .approve("Org2", "mycc", &conflicting, None)
            .unwrap_err();

        assert!(matches!(
            err,
            LifecycleError::DefinitionMismatch {
                source: ParameterMismatch::ValidationParameter { .. },
                ..
            }
        ));
        assert!(err.to_string().contains("ValidationParameter"));
        assert!(channel.org("Org2").is_empty());

        // The matching parameters are still accepted late
        channel.approve("Org2", "mycc", &committed, None).unwrap();
        assert!(!channel.org("Org2").is_empty());
    }

    /// Re-approval replaces every field of the earlier approval.
    #[test]
    fn test_reapproval_overwrites_previous() {
        let channel = Channel::new(&["Org1"]);
        let draft = ChaincodeDefinition::new(1, parameters("1.0-rc", b"draft"));
        let final_def = ChaincodeDefinition::new(1, parameters("1.0", b"final"));

        channel.approve("Org1", "mycc", &draft, None).unwrap();
        channel.approve("Org1", "mycc", &final_def, None).unwrap();

        let org1 = channel.org("Org1");
        let ready_draft = channel
            .lifecycle
            .check_commit_readiness("mycc", &draft, &channel.public, &[org1])
            .unwrap();
        let ready_final = channel
            .lifecycle
            .check_commit_readiness("mycc", &final_def, &channel.public, &[org1])
            .unwrap();
        assert_eq!(ready_draft, vec![false]);
        assert_eq!(ready_final, vec![true]);
    }

    /// Namespaces of several kinds are all listed.
    #[test]
    fn test_namespace_listing_passes_unknown_types_through() {
        let channel = Channel::new(&["Org1"]);
        for name in ["alpha", "beta"] {
            let definition = ChaincodeDefinition::new(1, parameters("1.0", b"policy"));
            channel.approve("Org1", name, &definition, None).unwrap();
            channel.commit(name, &definition).unwrap();
        }

        let foreign = StaticMetadata {
            datatype: "TokenContract".to_string(),
            fields: vec![],
        };
        channel.public.insert(
            "namespaces/metadata/gamma",
            bincode::serialize(&foreign).unwrap(),
        );

        let namespaces = channel
            .lifecycle
            .query_namespace_definitions(&channel.public)
            .unwrap();
        assert_eq!(
            namespaces.into_iter().collect::<Vec<_>>(),
            vec![
                ("alpha".to_string(), "Chaincode".to_string()),
                ("beta".to_string(), "Chaincode".to_string()),
                ("gamma".to_string(), "TokenContract".to_string()),
            ]
        );

        // Other components see gamma as defined but not a chaincode
        assert!(matches!(
            channel
                .lifecycle
                .resources()
                .chaincode_definition_if_defined("gamma", &channel.public),
            Err(LifecycleError::NotAChaincode { .. })
        ));
    }

    /// A corrupted org record never fails the commit, it just disagrees.
    #[test]
    fn test_corrupt_org_record_counts_as_disagreement() {
        let channel = Channel::new(&["Org1", "Org2"]);
        let definition = ChaincodeDefinition::new(1, parameters("1.0", b"policy"));
        channel.approve("Org1", "mycc", &definition, None).unwrap();
        channel.approve("Org2", "mycc", &definition, None).unwrap();

        channel
            .org("Org2")
            .insert("namespaces/fields/mycc#1/EndorsementInfo", vec![0xde, 0xad]);

        let agreement = channel.commit("mycc", &definition).unwrap();
        assert_eq!(agreement, vec![true, false]);
        assert_eq!(channel.sequence("mycc"), 1);
    }

    // =============================================================================
    // INSTALL + APPROVE
    // =============================================================================

    /// The hash returned by install is what the approval records.
    #[test]
    fn test_install_then_approve_records_hash() {
        let channel = Channel::new(&["Org1"]);
        let hash = channel
            .lifecycle
            .install_chaincode("mycc", "1.0", &install_package("example.com/mycc"))
            .unwrap();
        assert_eq!(
            channel
                .lifecycle
                .query_installed_chaincode("mycc", "1.0")
                .unwrap(),
            hash
        );

        let definition = ChaincodeDefinition::new(1, parameters("1.0", b"policy"));
        channel
            .approve("Org1", "mycc", &definition, Some(hash.as_slice()))
            .unwrap();

        let recorded = channel
            .lifecycle
            .query_approved_package_hash("mycc", 1, channel.org("Org1"))
            .unwrap();
        assert_eq!(recorded.as_deref(), Some(hash.as_slice()));

        // Never stored publicly
        assert!(!channel
            .public
            .get_state_range("chaincode-sources/")
            .unwrap()
            .iter()
            .any(|(key, _)| key.contains("mycc")));
    }

    /// The lifecycle namespace is defined without any commit.
    #[test]
    fn test_lifecycle_namespace_always_defined() {
        let channel = Channel::new(&["Org1"]);
        let definition = channel
            .lifecycle
            .resources()
            .chaincode_definition_if_defined(LIFECYCLE_NAMESPACE, &channel.public)
            .unwrap()
            .unwrap();
        assert_eq!(definition.sequence, 0);
        assert!(!definition.endorsement_info.init_required);
        assert!(channel
            .lifecycle
            .resources()
            .chaincode_definition_if_defined("mycc", &channel.public)
            .unwrap()
            .is_none());
    }

    /// Unknown channel surfaces when building the org list.
    #[test]
    fn test_unknown_channel() {
        let channel = Channel::new(&["Org1"]);
        assert_eq!(
            channel.lifecycle.resources().channel_organizations("elsewhere"),
            Err(LifecycleError::UnknownChannel("elsewhere".to_string()))
        );
    }
}

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;

use fedvote_attempt::{AgreementAttempt, Evidence, Transition, VoteLookup};
use fedvote_common::Phase;
use fedvote_quorum::QuorumSetLookup;

use fedvote_test::{flat, nodes, pk, stmt, PublicKey, QuorumSet, TestContext};

type Attempt = AgreementAttempt<TestContext>;

fn no_peers() -> BTreeMap<PublicKey, QuorumSet> {
    BTreeMap::new()
}

fn attempt() -> Attempt {
    Attempt::new(stmt("statement"))
}

#[test]
fn new_attempt_is_unknown_and_empty() {
    let attempt = attempt();

    assert_eq!(attempt.statement(), &stmt("statement"));
    assert_eq!(attempt.phase(), Phase::Unknown);
    assert!(attempt.voters().is_empty());
    assert!(attempt.accepting_voters().is_empty());
}

#[test]
fn add_vote_tracks_both_kinds() {
    let mut attempt = attempt();
    let quorum_set = flat(1, &["B"]);

    assert!(attempt.add_vote(pk("B"), quorum_set.clone(), false));
    assert!(!attempt.add_vote(pk("B"), quorum_set.clone(), false));
    assert!(attempt.add_vote(pk("B"), quorum_set.clone(), true));
    assert!(attempt.add_vote(pk("C"), quorum_set.clone(), true));

    // A changed quorum set replaces the previous one
    assert!(attempt.add_vote(pk("C"), flat(1, &["D"]), true));

    assert_eq!(attempt.voters(), nodes(&["B", "C"]));
    assert_eq!(attempt.accepting_voters(), nodes(&["B", "C"]));
    assert_eq!(attempt.votes_for().len(), 1);
    assert_eq!(attempt.votes_to_accept().get(&pk("C")), Some(&flat(1, &["D"])));

    assert!(attempt.has_vote_from(&pk("B")));
    assert!(!attempt.has_vote_from(&pk("D")));
}

#[test]
fn accepts_when_accepting_voters_are_v_blocking() {
    let owner = flat(1, &["B"]);

    let mut attempt = attempt();
    attempt.add_vote(pk("B"), flat(2, &["E", "F"]), true);
    attempt.add_vote(pk("C"), flat(2, &["E", "F"]), true);
    attempt.add_vote(pk("D"), flat(2, &["E", "F"]), false);

    let transition = attempt.try_move_to_accept(&owner, &no_peers());

    assert_eq!(
        transition,
        Some(Transition::new(
            Phase::Unknown,
            Phase::Accepted,
            Evidence::VBlocking(nodes(&["B", "C"]))
        ))
    );
    assert_eq!(attempt.phase(), Phase::Accepted);
}

#[test]
fn no_v_blocking_set_and_no_quorum() {
    let owner = flat(2, &["B", "C", "D"]);
    let unreachable = flat(2, &["E", "F"]);

    let mut attempt = attempt();
    attempt.add_vote(pk("B"), unreachable.clone(), true);
    attempt.add_vote(pk("C"), unreachable.clone(), false);
    attempt.add_vote(pk("D"), unreachable, false);

    assert_eq!(attempt.accept_evidence(&owner, &no_peers()), None);
    assert_eq!(attempt.try_move_to_accept(&owner, &no_peers()), None);
    assert_eq!(attempt.phase(), Phase::Unknown);
}

#[test]
fn accepts_when_a_quorum_ratified_the_vote() {
    let owner = flat(2, &["B", "C", "D"]);
    let peer = flat(2, &["B", "C", "D"]);

    let mut attempt = attempt();
    attempt.add_vote(pk("B"), peer.clone(), true);
    attempt.add_vote(pk("C"), peer.clone(), false);
    attempt.add_vote(pk("D"), peer, false);

    let transition = attempt.try_move_to_accept(&owner, &no_peers());

    assert_eq!(
        transition.map(|t| t.evidence),
        Some(Evidence::RatifiedVote(nodes(&["B", "C", "D"])))
    );
    assert_eq!(attempt.phase(), Phase::Accepted);
}

#[test]
fn accept_only_from_unknown() {
    let owner = flat(1, &["B"]);

    let mut attempt = attempt();
    attempt.add_vote(pk("B"), flat(1, &["B"]), true);

    assert!(attempt.try_move_to_accept(&owner, &no_peers()).is_some());
    assert_eq!(attempt.try_move_to_accept(&owner, &no_peers()), None);
    assert_eq!(attempt.phase(), Phase::Accepted);
}

#[test]
fn confirm_requires_accepted_phase() {
    let owner = flat(1, &["B"]);

    let mut attempt = attempt();
    attempt.add_vote(pk("B"), flat(1, &["B"]), true);

    // The accept-votes would ratify, but the node has not accepted yet
    assert!(attempt.confirm_evidence(&owner, &no_peers()).is_some());
    assert_eq!(attempt.try_move_to_confirm(&owner, &no_peers()), None);

    attempt.try_move_to_accept(&owner, &no_peers());

    let transition = attempt.try_move_to_confirm(&owner, &no_peers());
    assert_eq!(
        transition,
        Some(Transition::new(
            Phase::Accepted,
            Phase::Confirmed,
            Evidence::RatifiedAccept(nodes(&["B"]))
        ))
    );
    assert_eq!(attempt.phase(), Phase::Confirmed);

    assert_eq!(attempt.try_move_to_confirm(&owner, &no_peers()), None);
}

#[test]
fn confirm_only_counts_accept_votes() {
    let owner = flat(1, &["B"]);
    let peer = flat(1, &["B"]);

    let mut attempt = attempt();
    attempt.add_vote(pk("B"), peer.clone(), false);
    attempt.add_vote(pk("C"), peer, true);

    let accepted = attempt.try_move_to_accept(&owner, &no_peers());
    assert_eq!(
        accepted.map(|t| t.evidence),
        Some(Evidence::RatifiedVote(nodes(&["B", "C"])))
    );

    assert_eq!(attempt.try_move_to_confirm(&owner, &no_peers()), None);
    assert_eq!(attempt.phase(), Phase::Accepted);
}

#[test]
fn vote_lookup_prefers_accept_votes_then_votes_then_peers() {
    let votes_to_accept = BTreeMap::from([(pk("A"), flat(1, &["X"]))]);
    let votes_for = BTreeMap::from([(pk("A"), flat(1, &["Y"])), (pk("B"), flat(1, &["Y"]))]);
    let peers = BTreeMap::from([
        (pk("A"), flat(1, &["Z"])),
        (pk("B"), flat(1, &["Z"])),
        (pk("C"), flat(1, &["Z"])),
    ]);

    let lookup = VoteLookup::new(&votes_to_accept, &votes_for, &peers);

    assert_eq!(lookup.quorum_set_of(&pk("A")), Some(&flat(1, &["X"])));
    assert_eq!(lookup.quorum_set_of(&pk("B")), Some(&flat(1, &["Y"])));
    assert_eq!(lookup.quorum_set_of(&pk("C")), Some(&flat(1, &["Z"])));
    assert_eq!(lookup.quorum_set_of(&pk("D")), None);
}

//! Claim linearizability under concurrent interviewer access

mod common;

use std::sync::Arc;

use futures::future::join_all;
use hireflow_core::models::Actor;
use hireflow_core::WorkflowError;

use common::{coordinator, pooled};

/// N concurrent claims on one unassigned application resolve to exactly one
/// winner; every loser observes the winner's id.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_claims_have_exactly_one_winner() {
    const CONTENDERS: i64 = 16;

    let coordinator = Arc::new(coordinator());
    let application = pooled(&coordinator).await;

    let attempts = (0..CONTENDERS).map(|n| {
        let coordinator = coordinator.clone();
        let application_id = application.id;
        let interviewer_id = 1000 + n;
        tokio::spawn(async move {
            let outcome = coordinator
                .claim(Actor::interviewer(interviewer_id), application_id)
                .await;
            (interviewer_id, outcome)
        })
    });

    let outcomes: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners: Vec<i64> = outcomes
        .iter()
        .filter(|(_, outcome)| outcome.is_ok())
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(winners.len(), 1, "exactly one claim must succeed");
    let winner = winners[0];

    for (interviewer_id, outcome) in &outcomes {
        match outcome {
            Ok(application) => {
                assert_eq!(application.tech_interviewer_id, Some(winner));
            }
            Err(WorkflowError::AlreadyClaimed {
                application_id,
                held_by,
            }) => {
                assert_eq!(*application_id, application.id);
                assert_eq!(*held_by, winner, "loser {interviewer_id} saw a different holder");
            }
            Err(other) => panic!("unexpected claim outcome: {other:?}"),
        }
    }

    let stored = coordinator
        .get_application(Actor::hr(common::HR_ID), application.id)
        .unwrap();
    assert_eq!(stored.tech_interviewer_id, Some(winner));
    assert!(coordinator.list_pool().is_empty());
}

/// Direct HR assignment races a pool claim: only one of them may set the
/// interviewer, the other must surface the holder
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn assign_races_claim_without_overwrite() {
    let coordinator = Arc::new(coordinator());
    let application = pooled(&coordinator).await;

    let claimer = {
        let coordinator = coordinator.clone();
        let id = application.id;
        tokio::spawn(async move { coordinator.claim(Actor::interviewer(2000), id).await })
    };
    let assigner = {
        let coordinator = coordinator.clone();
        let id = application.id;
        tokio::spawn(async move { coordinator.assign(Actor::hr(common::HR_ID), id, 3000).await })
    };

    let claim_outcome = claimer.await.unwrap();
    let assign_outcome = assigner.await.unwrap();
    assert_ne!(
        claim_outcome.is_ok(),
        assign_outcome.is_ok(),
        "exactly one acquisition must win"
    );

    let stored = coordinator
        .get_application(Actor::hr(common::HR_ID), application.id)
        .unwrap();
    let expected = if claim_outcome.is_ok() { 2000 } else { 3000 };
    assert_eq!(stored.tech_interviewer_id, Some(expected));
}

//! Invariants checked by replaying recorded life-cycle traces

use auto_body_shop_simulator::shop::{TraceEntry, TraceKind};
use auto_body_shop_simulator::simulation::ShopReplication;
use auto_body_shop_simulator::types::{CustomerOutcome, ProcessId, ServiceStage, ShopConfig};
use std::collections::{HashMap, HashSet};

fn traced_day(config: ShopConfig, replication: usize) -> (ShopReplication, Vec<TraceEntry>) {
    let config = ShopConfig { record_trace: true, ..config };
    let mut day = ShopReplication::for_batch(&config, replication).unwrap();
    day.run().unwrap();
    let entries = day.take_trace().into_entries();
    (day, entries)
}

fn per_customer(entries: &[TraceEntry]) -> HashMap<ProcessId, Vec<TraceKind>> {
    let mut kinds: HashMap<ProcessId, Vec<TraceKind>> = HashMap::new();
    for entry in entries {
        kinds.entry(entry.customer).or_default().push(entry.kind);
    }
    kinds
}

/// Test stall occupancy stays within capacity and cost never goes down
#[test]
fn test_stalls_and_cost_stay_consistent() {
    for stalls in [0, 1, 2] {
        let config = ShopConfig { num_stalls: stalls, ..ShopConfig::default() };
        let (_, entries) = traced_day(config, 1);
        assert!(!entries.is_empty());

        for pair in entries.windows(2) {
            assert!(pair[1].time >= pair[0].time, "trace out of time order");
            assert!(pair[1].cost >= pair[0].cost, "operating cost decreased");
        }
        assert!(entries.iter().all(|entry| entry.stalls_in_use <= stalls));
    }
}

/// Test every customer reaches exactly one outcome, then departs
#[test]
fn test_outcomes_are_exclusive_and_exhaustive() {
    let (day, entries) = traced_day(ShopConfig::default(), 2);
    let customers = per_customer(&entries);
    assert_eq!(customers.len() as u64, day.shop().total_customers());

    for (customer, kinds) in &customers {
        let outcomes: Vec<_> =
            kinds.iter().filter(|kind| matches!(kind, TraceKind::Outcome(_))).collect();
        assert_eq!(outcomes.len(), 1, "{} has {} outcomes", customer, outcomes.len());

        assert_eq!(kinds.first(), Some(&TraceKind::Arrived));
        assert_eq!(kinds.iter().filter(|kind| **kind == TraceKind::Departed).count(), 1);
        let outcome_at = kinds.iter().position(|kind| matches!(kind, TraceKind::Outcome(_)));
        let departed_at = kinds.iter().position(|kind| *kind == TraceKind::Departed);
        assert!(outcome_at < departed_at);
    }
}

/// Test stall claims and releases pair up with specialist repairs
#[test]
fn test_stall_claims_match_specialist_repairs() {
    let config = ShopConfig { mechanic_refer_rate: 0.8, num_stalls: 2, ..ShopConfig::default() };
    let (day, entries) = traced_day(config, 4);
    let count = |kind: TraceKind| entries.iter().filter(|entry| entry.kind == kind).count() as u64;

    let specialist_fixes = day.shop().fixed_by(ServiceStage::Specialist);
    assert_eq!(count(TraceKind::StallClaimed), specialist_fixes);
    assert_eq!(count(TraceKind::StallReleased), specialist_fixes);
    assert_eq!(count(TraceKind::SpecialistStarted), specialist_fixes);
    assert!(count(TraceKind::Referred) >= specialist_fixes);

    // Replaying claims and releases ends with every stall free
    let mut occupied: i64 = 0;
    for entry in &entries {
        match entry.kind {
            TraceKind::StallClaimed => occupied += 1,
            TraceKind::StallReleased => occupied -= 1,
            _ => {}
        }
        assert_eq!(occupied, entry.stalls_in_use as i64);
    }
    assert_eq!(occupied, 0);
}

/// Test a threshold of one turns away exactly the arrivals that find someone waiting
#[test]
fn test_balking_matches_replayed_waiting_room() {
    let config = ShopConfig { balk_min: 1, balk_max: 1, ..ShopConfig::default() };
    let mut total_balked = 0;

    for replication in 1..=5 {
        let (day, entries) = traced_day(config.clone(), replication);
        let mut waiting: HashSet<ProcessId> = HashSet::new();
        let mut found_queue: HashMap<ProcessId, bool> = HashMap::new();
        let mut balked: HashSet<ProcessId> = HashSet::new();

        for entry in &entries {
            match entry.kind {
                TraceKind::Arrived => {
                    found_queue.insert(entry.customer, !waiting.is_empty());
                    waiting.insert(entry.customer);
                }
                TraceKind::MechanicStarted => {
                    let was_waiting = waiting.remove(&entry.customer);
                    assert!(was_waiting, "{} started while not waiting", entry.customer);
                }
                TraceKind::Outcome(CustomerOutcome::Balked) => {
                    let was_waiting = waiting.remove(&entry.customer);
                    assert!(was_waiting, "{} balked while not waiting", entry.customer);
                    balked.insert(entry.customer);
                }
                _ => {}
            }
        }

        for (customer, queued) in &found_queue {
            assert_eq!(*queued, balked.contains(customer), "{} balk decision disagrees", customer);
        }
        assert!(waiting.is_empty());
        assert_eq!(balked.len() as u64, day.shop().outcome_count(CustomerOutcome::Balked));
        total_balked += balked.len();
    }
    assert!(total_balked > 0);
}

/// Test every referral is lost at the stall check when there are no stalls
#[test]
fn test_zero_stalls_referrals_are_lost_at_stall() {
    let config = ShopConfig { num_stalls: 0, ..ShopConfig::default() };
    let mut total_referred = 0;

    for replication in 1..=5 {
        let (day, entries) = traced_day(config.clone(), replication);
        let shop = day.shop();
        let customers = per_customer(&entries);

        let referred: Vec<_> = customers
            .iter()
            .filter(|(_, kinds)| kinds.contains(&TraceKind::Referred))
            .collect();
        for (customer, kinds) in &referred {
            let after = kinds.iter().skip_while(|kind| **kind != TraceKind::Referred).nth(1);
            assert_eq!(
                after,
                Some(&TraceKind::Outcome(CustomerOutcome::LostAtStall)),
                "{} was not lost at the stall check",
                customer
            );
        }

        assert_eq!(referred.len() as u64, shop.outcome_count(CustomerOutcome::LostAtStall));
        assert!(entries.iter().all(|entry| entry.kind != TraceKind::StallClaimed));
        // Whoever was neither fixed nor balked was lost at one of the two checks
        let unserved = shop.total_customers()
            - shop.outcome_count(CustomerOutcome::Balked)
            - shop.fixed_by(ServiceStage::Mechanic)
            - shop.fixed_by(ServiceStage::Specialist);
        assert_eq!(
            unserved,
            shop.outcome_count(CustomerOutcome::LostAtStall)
                + shop.outcome_count(CustomerOutcome::LostAfterReferral)
        );
        total_referred += referred.len();
    }
    assert!(total_referred > 0);
}

/// Test an untraced day records nothing
#[test]
fn test_trace_is_off_by_default() {
    let mut day = ShopReplication::for_batch(&ShopConfig::default(), 1).unwrap();
    day.run().unwrap();
    assert!(!day.shop().trace().is_enabled());
    assert!(day.take_trace().entries().is_empty());
}

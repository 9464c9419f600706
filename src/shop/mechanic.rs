//! Mechanic life cycle

use crate::engine::{Context, SchedulerError, SchedulerResult, Suspend};
use crate::shop::{Shop, ShopProcess, TraceKind};
use crate::types::{CustomerOutcome, ProcessId, ServiceStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MechanicPhase {
    OffDuty,
    Ready,
    Repairing { customer: ProcessId },
}

/// Generalist who sees every customer first
///
/// Draws the full-day salary when its life cycle starts, then loops: idle
/// while the waiting room is empty, otherwise repair the head customer and
/// decide between fixing the car and referring it to a specialist.
#[derive(Debug)]
pub struct Mechanic {
    phase: MechanicPhase,
    served: u64,
}

impl Default for Mechanic {
    fn default() -> Self {
        Self::new()
    }
}

impl Mechanic {
    /// Create a mechanic that has not clocked in
    pub fn new() -> Self {
        Self { phase: MechanicPhase::OffDuty, served: 0 }
    }

    /// Customers this mechanic has finished with
    pub fn served(&self) -> u64 {
        self.served
    }

    pub(crate) fn resume(
        &mut self,
        me: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, ShopProcess>,
    ) -> SchedulerResult<Suspend> {
        let now = cx.now();
        match self.phase {
            MechanicPhase::OffDuty => {
                let salary = shop.config().mechanic_salary;
                shop.charge(salary);
            }
            MechanicPhase::Ready => {}
            MechanicPhase::Repairing { customer } => {
                self.complete(customer, shop, cx)?;
            }
        }

        match shop.queues.waiting_for_mechanic.pop_front(now) {
            None => {
                shop.queues.idle_mechanics.push_back(now, me);
                self.phase = MechanicPhase::Ready;
                Ok(Suspend::Passivate)
            }
            Some(customer) => {
                shop.record(now, customer, TraceKind::MechanicStarted);
                self.phase = MechanicPhase::Repairing { customer };
                Ok(Suspend::Hold(shop.variates.mechanic_fix_time()))
            }
        }
    }

    fn complete(
        &mut self,
        customer: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, ShopProcess>,
    ) -> SchedulerResult<()> {
        let now = cx.now();
        let arrival = shop
            .ticket(customer)
            .map(|ticket| ticket.arrival)
            .ok_or_else(|| SchedulerError::fault(customer, "repaired customer has no ticket"))?;

        if shop.variates.referral() {
            let waited = now - arrival;
            if waited > shop.config().referral_patience {
                shop.finish(now, customer, CustomerOutcome::LostAfterReferral)?;
                crate::sim_event!(
                    debug,
                    "referred customer gave up",
                    customer = customer.index(),
                    time = now,
                    waited = waited
                );
            } else {
                shop.refer(now, customer)?;
                shop.queues.waiting_for_specialist.push_back(now, customer);
            }
        } else {
            shop.finish(now, customer, CustomerOutcome::Fixed(ServiceStage::Mechanic))?;
        }

        cx.activate_now(customer)?;
        let commission = shop.config().mechanic_commission;
        shop.charge(commission);
        self.served += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Scheduler;
    use crate::shop::Customer;
    use crate::types::ShopConfig;

    #[test]
    fn test_mechanic_clocks_in_and_goes_idle() {
        let mut shop = Shop::new(ShopConfig::default(), 5).unwrap();
        let mut scheduler = Scheduler::new();
        let mechanic = scheduler.spawn(ShopProcess::Mechanic(Mechanic::new()));
        scheduler.activate(mechanic, 0.0).unwrap();

        scheduler.run(&mut shop, |_, _| false).unwrap();
        assert_eq!(shop.total_cost(), 100.0);
        assert!(shop.queues.idle_mechanics.contains(mechanic));
    }

    #[test]
    fn test_mechanic_fixes_without_referrals() {
        let config = ShopConfig { mechanic_refer_rate: 0.0, ..ShopConfig::default() };
        let mut shop = Shop::new(config, 5).unwrap();
        let mut scheduler = Scheduler::new();
        let mechanic = scheduler.spawn(ShopProcess::Mechanic(Mechanic::new()));
        scheduler.activate(mechanic, 0.0).unwrap();
        let customer = scheduler.spawn(ShopProcess::Customer(Customer::new()));
        scheduler.activate(customer, 1.0).unwrap();

        scheduler.run(&mut shop, |_, _| false).unwrap();
        assert_eq!(shop.fixed_by(ServiceStage::Mechanic), 1);
        assert_eq!(shop.total_cost(), 110.0);
        assert!(shop.is_drained());
        match scheduler.process(mechanic) {
            Some(ShopProcess::Mechanic(m)) => assert_eq!(m.served(), 1),
            other => panic!("unexpected process {:?}", other),
        }
    }

    #[test]
    fn test_repairing_an_unadmitted_customer_faults() {
        let mut shop = Shop::new(ShopConfig::default(), 5).unwrap();
        let mut scheduler = Scheduler::new();
        let mechanic = scheduler.spawn(ShopProcess::Mechanic(Mechanic::new()));
        let stranger = ProcessId::from_index(99);
        shop.queues.waiting_for_mechanic.push_back(0.0, stranger);
        scheduler.activate(mechanic, 0.0).unwrap();

        match scheduler.run(&mut shop, |_, _| false) {
            Err(SchedulerError::ProcessFault { process, reason }) => {
                assert_eq!(process, stranger);
                assert!(reason.contains("ticket"));
            }
            other => panic!("Expected ProcessFault, got {:?}", other),
        }
        assert_eq!(shop.outcome_count(CustomerOutcome::LostAfterReferral), 0);
        assert_eq!(shop.fixed_by(ServiceStage::Mechanic), 0);
    }
}

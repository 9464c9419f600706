//! Customer life cycle
//!
//! A customer arrives, joins the waiting room and either wakes an idle
//! mechanic, balks, or waits. Mechanics and specialists settle its outcome on
//! the shop's ticket; the customer only reads that ticket when it is resumed
//! and decides whether to leave, claim a stall, or wait for a specialist.

use crate::engine::{Context, SchedulerError, SchedulerResult, Suspend};
use crate::shop::{Disposition, Shop, ShopProcess, TraceKind};
use crate::types::{CustomerOutcome, ProcessId, ServiceStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CustomerPhase {
    Arriving,
    AwaitingMechanic,
    AwaitingSpecialist,
}

/// One car and its owner
#[derive(Debug)]
pub struct Customer {
    phase: CustomerPhase,
}

impl Default for Customer {
    fn default() -> Self {
        Self::new()
    }
}

impl Customer {
    /// Create a customer about to arrive
    pub fn new() -> Self {
        Self { phase: CustomerPhase::Arriving }
    }

    pub(crate) fn resume(
        &mut self,
        me: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, ShopProcess>,
    ) -> SchedulerResult<Suspend> {
        match self.phase {
            CustomerPhase::Arriving => self.arrive(me, shop, cx),
            CustomerPhase::AwaitingMechanic => self.after_mechanic(me, shop, cx),
            CustomerPhase::AwaitingSpecialist => Self::after_specialist(me, shop),
        }
    }

    fn arrive(
        &mut self,
        me: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, ShopProcess>,
    ) -> SchedulerResult<Suspend> {
        let now = cx.now();
        shop.admit(now, me);
        shop.queues.waiting_for_mechanic.push_back(now, me);

        if let Some(mechanic) = shop.queues.idle_mechanics.pop_front(now) {
            cx.activate_now(mechanic)?;
        } else {
            // The arriving customer does not count the car it brought itself
            let threshold = shop.variates.balk_threshold() as usize;
            let ahead = shop.queues.waiting_for_mechanic.len() - 1;
            if threshold <= ahead {
                shop.queues.waiting_for_mechanic.remove(now, me);
                shop.finish(now, me, CustomerOutcome::Balked)?;
                shop.depart(now, me)?;
                crate::sim_event!(
                    debug,
                    "customer balked",
                    customer = me.index(),
                    time = now,
                    threshold = threshold,
                    ahead = ahead
                );
                return Ok(Suspend::Terminate);
            }
        }

        self.phase = CustomerPhase::AwaitingMechanic;
        Ok(Suspend::Passivate)
    }

    fn after_mechanic(
        &mut self,
        me: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, ShopProcess>,
    ) -> SchedulerResult<Suspend> {
        let now = cx.now();
        match shop.disposition(me)? {
            Disposition::Finished(_) => {
                shop.depart(now, me)?;
                Ok(Suspend::Terminate)
            }
            Disposition::Referred if shop.stalls.is_full() => {
                shop.queues.waiting_for_specialist.remove(now, me);
                shop.finish(now, me, CustomerOutcome::LostAtStall)?;
                shop.depart(now, me)?;
                crate::sim_event!(debug, "no free stall", customer = me.index(), time = now);
                Ok(Suspend::Terminate)
            }
            Disposition::Referred => {
                if !shop.stalls.claim() {
                    return Err(SchedulerError::fault(me, "stall pool refused a claim below capacity"));
                }
                shop.record(now, me, TraceKind::StallClaimed);
                if let Some(specialist) = shop.queues.idle_specialists.pop_front(now) {
                    cx.activate_now(specialist)?;
                }
                self.phase = CustomerPhase::AwaitingSpecialist;
                Ok(Suspend::Passivate)
            }
            Disposition::AwaitingMechanic => {
                Err(SchedulerError::fault(me, "resumed before a mechanic settled the repair"))
            }
        }
    }

    fn after_specialist(me: ProcessId, shop: &mut Shop) -> SchedulerResult<Suspend> {
        match shop.disposition(me)? {
            Disposition::Finished(CustomerOutcome::Fixed(ServiceStage::Specialist)) => {
                Ok(Suspend::Terminate)
            }
            other => Err(SchedulerError::fault(
                me,
                format!("resumed by a specialist in disposition {:?}", other),
            )),
        }
    }
}

//! Specialist life cycle

use crate::engine::{Context, SchedulerError, SchedulerResult, Suspend};
use crate::shop::{Shop, ShopProcess, TraceKind};
use crate::types::{CustomerOutcome, ProcessId, ServiceStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialistPhase {
    OffDuty,
    Ready,
    Repairing { customer: ProcessId },
}

/// Terminal service stage for referred cars
///
/// Works through customers that already hold a stall. Every car a specialist
/// takes is fixed; completing it also frees the stall and removes the customer
/// from the system.
#[derive(Debug)]
pub struct Specialist {
    phase: SpecialistPhase,
    served: u64,
}

impl Default for Specialist {
    fn default() -> Self {
        Self::new()
    }
}

impl Specialist {
    /// Create a specialist that has not clocked in
    pub fn new() -> Self {
        Self { phase: SpecialistPhase::OffDuty, served: 0 }
    }

    /// Customers this specialist has fixed
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
            SpecialistPhase::OffDuty => {
                let salary = shop.config().specialist_salary;
                shop.charge(salary);
            }
            SpecialistPhase::Ready => {}
            SpecialistPhase::Repairing { customer } => {
                self.complete(me, customer, shop, cx)?;
            }
        }

        match shop.queues.waiting_for_specialist.pop_front(now) {
            None => {
                shop.queues.idle_specialists.push_back(now, me);
                self.phase = SpecialistPhase::Ready;
                Ok(Suspend::Passivate)
            }
            Some(customer) => {
                shop.record(now, customer, TraceKind::SpecialistStarted);
                self.phase = SpecialistPhase::Repairing { customer };
                Ok(Suspend::Hold(shop.variates.specialist_fix_time()))
            }
        }
    }

    fn complete(
        &mut self,
        me: ProcessId,
        customer: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, ShopProcess>,
    ) -> SchedulerResult<()> {
        let now = cx.now();
        shop.finish(now, customer, CustomerOutcome::Fixed(ServiceStage::Specialist))?;
        shop.depart(now, customer)?;
        if !shop.stalls.release() {
            return Err(SchedulerError::fault(me, "released a stall nobody held"));
        }
        shop.record(now, customer, TraceKind::StallReleased);

        cx.activate_now(customer)?;
        let commission = shop.config().specialist_commission;
        shop.charge(commission);
        self.served += 1;
        Ok(())
    }
}

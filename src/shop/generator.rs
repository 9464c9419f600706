//! Arrival generator life cycle

use crate::engine::{Context, SchedulerResult, Suspend};
use crate::shop::{Customer, Shop, ShopProcess};
use crate::types::ProcessId;

/// Creates customers while the shop is open
///
/// Each pass samples a gap from the arrival band the clock is in, holds for
/// it, then spawns one customer and activates it at once. The check against
/// the operating hours happens before the hold, so the last customer may
/// arrive after closing.
#[derive(Debug, Default)]
pub struct Generator {
    holding: bool,
    spawned: u64,
}

impl Generator {
    /// Create a generator that has not started yet
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn resume(
        &mut self,
        _me: ProcessId,
        shop: &mut Shop,
        cx: &mut Context<'_, ShopProcess>,
    ) -> SchedulerResult<Suspend> {
        let now = cx.now();

        if self.holding {
            let customer = cx.spawn(ShopProcess::Customer(Customer::new()));
            cx.activate_now(customer)?;
            self.spawned += 1;
            crate::sim_event!(trace, "customer spawned", customer = customer.index(), time = now);
        }

        if now < shop.config().operation_hours {
            self.holding = true;
            Ok(Suspend::Hold(shop.variates.interarrival(now)))
        } else {
            crate::sim_event!(
                debug,
                "arrival window closed",
                time = now,
                spawned = self.spawned
            );
            Ok(Suspend::Terminate)
        }
    }
}

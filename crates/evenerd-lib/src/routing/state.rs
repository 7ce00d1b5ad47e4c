use crate::cost::FatigueState;
use crate::heap::IndexedMinHeap;
use crate::universe::BodyIndex;

use super::MovementType;

/// Mutable per-solve state shared by the relaxation workers.
///
/// Every buffer is indexed by the dense body index. Writes only happen
/// through [`Frontier::improve`], which keeps the queue and the per-body
/// arrays consistent.
#[derive(Debug)]
pub(crate) struct Frontier {
    pub(crate) queue: IndexedMinHeap<f64>,
    pub(crate) cost: Vec<f64>,
    pub(crate) prev: Vec<Option<BodyIndex>>,
    pub(crate) movement: Vec<MovementType>,
    pub(crate) fatigue: Vec<FatigueState>,
}

impl Frontier {
    pub(crate) fn new(body_count: usize) -> Self {
        Self {
            queue: IndexedMinHeap::with_capacity(body_count),
            cost: vec![f64::INFINITY; body_count],
            prev: vec![None; body_count],
            movement: vec![MovementType::Start; body_count],
            fatigue: vec![FatigueState::default(); body_count],
        }
    }

    /// Queue a body with its initial cost.
    pub(crate) fn enqueue(&mut self, body: BodyIndex, cost: f64) {
        self.cost[body] = cost;
        self.queue.insert(cost, body);
    }

    /// Record a cheaper (or equal) way of reaching `target`.
    pub(crate) fn improve(
        &mut self,
        target: BodyIndex,
        from: BodyIndex,
        cost: f64,
        movement: MovementType,
        fatigue: FatigueState,
    ) {
        self.queue.decrease_raw(cost, target);
        self.cost[target] = cost;
        self.prev[target] = Some(from);
        self.movement[target] = movement;
        self.fatigue[target] = fatigue;
    }
}

//! Allocation: distribute one axis of space among weighted slots.
//!
//! Slots are visited in descending weight order. Each pass hands out
//! shares with a running remainder (cumulative floors), so the sum of
//! shares can never exceed the total. A slot whose share falls below its
//! minimum is dropped and the pass starts over without it. Space left
//! once every remaining slot is satisfied goes to slots still below their
//! maximum, again by weight.

use std::cmp::Reverse;
use tracing::trace;

/// One child's placement constraints along the layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSlot {
    /// Relative share of the extent.
    pub weight: u32,
    /// Smallest extent the child can be drawn in.
    pub min: u16,
    /// Largest extent the child wants, `None` for unbounded.
    pub max: Option<u16>,
}

impl LayoutSlot {
    /// Slot with the default weight of 100 and no bounds.
    pub const fn new() -> Self {
        Self {
            weight: 100,
            min: 0,
            max: None,
        }
    }

    /// Set the weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the minimum extent.
    #[must_use]
    pub const fn with_min(mut self, min: u16) -> Self {
        self.min = min;
        self
    }

    /// Set the maximum extent.
    #[must_use]
    pub const fn with_max(mut self, max: Option<u16>) -> Self {
        self.max = max;
        self
    }

    #[inline]
    fn room(&self, extent: u16) -> u16 {
        self.max.map_or(u16::MAX, |max| max.saturating_sub(extent))
    }
}

impl Default for LayoutSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Placement of one visible slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Index of the slot in the input (declaration order).
    pub index: usize,
    /// Running offset along the axis.
    pub offset: u16,
    /// Allocated extent along the axis.
    pub extent: u16,
}

/// Split `total` cells among `slots`.
///
/// Returns the visible slots in declaration order with their offsets.
/// Dropped slots are simply absent; if every slot is dropped the result
/// is empty.
pub fn allocate(slots: &[LayoutSlot], total: u16) -> Vec<Allocation> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    // sort_by_key is stable: equal weights keep declaration order
    order.sort_by_key(|&i| Reverse(slots[i].weight));

    let mut extents = loop {
        match tentative(slots, &order, total) {
            Ok(extents) => break extents,
            Err(pos) => {
                let index = order.remove(pos);
                trace!(index, min = slots[index].min, total, "layout slot dropped");
            }
        }
    };

    let used: u16 = extents.iter().sum();
    distribute_leftover(slots, &order, &mut extents, total - used);

    let mut placed: Vec<(usize, u16)> = order.into_iter().zip(extents).collect();
    placed.sort_unstable_by_key(|&(index, _)| index);

    let mut offset = 0u16;
    placed
        .into_iter()
        .map(|(index, extent)| {
            let allocation = Allocation {
                index,
                offset,
                extent,
            };
            offset += extent;
            allocation
        })
        .collect()
}

/// Weights of `order`, with an all-zero set treated as equal weights.
fn effective_weights(slots: &[LayoutSlot], order: &[usize]) -> (Vec<u64>, u64) {
    let weights: Vec<u64> = order.iter().map(|&i| u64::from(slots[i].weight)).collect();
    let sum: u64 = weights.iter().sum();
    if sum == 0 {
        (vec![1; order.len()], order.len() as u64)
    } else {
        (weights, sum)
    }
}

/// Cumulative-floor share of `amount` for each weight.
///
/// Share `k` is `floor(amount * W_k / W) - floor(amount * W_{k-1} / W)`
/// where `W_k` is the running weight sum, so the shares add up to
/// exactly `amount`.
fn shares(amount: u16, weights: &[u64], weight_sum: u64) -> impl Iterator<Item = u16> + '_ {
    let amount = u64::from(amount);
    let mut running = 0u64;
    let mut handed = 0u64;
    weights.iter().map(move |&w| {
        running += w;
        let upto = amount * running / weight_sum;
        let share = upto - handed;
        handed = upto;
        // share <= amount <= u16::MAX
        u16::try_from(share).unwrap_or(u16::MAX)
    })
}

/// One pass over the candidates in priority order.
///
/// `Err(pos)` names the position in `order` of the first slot whose
/// share misses its minimum.
fn tentative(slots: &[LayoutSlot], order: &[usize], total: u16) -> Result<Vec<u16>, usize> {
    if order.is_empty() {
        return Ok(Vec::new());
    }
    let (weights, weight_sum) = effective_weights(slots, order);
    let mut remaining = total;
    let mut extents = Vec::with_capacity(order.len());
    for (pos, (&index, share)) in order.iter().zip(shares(total, &weights, weight_sum)).enumerate() {
        let slot = &slots[index];
        let extent = share.min(remaining).min(slot.room(0));
        if extent < slot.min {
            return Err(pos);
        }
        remaining -= extent;
        extents.push(extent);
    }
    Ok(extents)
}

/// Hand `leftover` to slots below their maximum, by weight, until it is
/// used up or nobody can take more.
fn distribute_leftover(slots: &[LayoutSlot], order: &[usize], extents: &mut [u16], mut leftover: u16) {
    while leftover > 0 {
        let open: Vec<usize> = (0..order.len())
            .filter(|&pos| slots[order[pos]].room(extents[pos]) > 0)
            .collect();
        if open.is_empty() {
            break;
        }
        let open_slots: Vec<usize> = open.iter().map(|&pos| order[pos]).collect();
        let (weights, weight_sum) = effective_weights(slots, &open_slots);

        let mut given = 0u16;
        for (&pos, share) in open.iter().zip(shares(leftover, &weights, weight_sum)) {
            let grant = share
                .min(slots[order[pos]].room(extents[pos]))
                .min(leftover - given);
            extents[pos] += grant;
            given += grant;
        }
        if given == 0 {
            break;
        }
        leftover -= given;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slot(weight: u32, min: u16, max: Option<u16>) -> LayoutSlot {
        LayoutSlot { weight, min, max }
    }

    fn extents(allocs: &[Allocation]) -> Vec<u16> {
        allocs.iter().map(|a| a.extent).collect()
    }

    #[test]
    fn test_weighted_split() {
        let slots = [slot(100, 5, None), slot(200, 5, None), slot(300, 5, None)];
        let allocs = allocate(&slots, 30);
        assert_eq!(extents(&allocs), vec![5, 10, 15]);
        assert_eq!(allocs.iter().map(|a| a.offset).collect::<Vec<_>>(), vec![0, 5, 15]);
    }

    #[test]
    fn test_rounding_never_overshoots() {
        let slots = [slot(1, 0, None), slot(1, 0, None), slot(1, 0, None)];
        let allocs = allocate(&slots, 10);
        assert_eq!(extents(&allocs).iter().sum::<u16>(), 10);
        assert!(extents(&allocs).iter().all(|&e| e == 3 || e == 4));
    }

    #[test]
    fn test_unmet_minimum_drops_slot() {
        let slots = [slot(100, 8, None), slot(100, 8, None), slot(100, 8, None)];
        let allocs = allocate(&slots, 20);
        // first share is 6 < 8; the rest split the whole extent
        assert_eq!(allocs.len(), 2);
        assert_eq!(allocs.iter().map(|a| a.index).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(extents(&allocs), vec![10, 10]);
    }

    #[test]
    fn test_lowest_priority_dropped_first() {
        let slots = [slot(300, 6, None), slot(50, 6, None), slot(300, 6, None)];
        let allocs = allocate(&slots, 14);
        assert_eq!(allocs.iter().map(|a| a.index).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_everything_dropped_is_empty() {
        let slots = [slot(100, 10, None), slot(100, 10, None)];
        assert!(allocate(&slots, 5).is_empty());
        assert!(allocate(&[], 80).is_empty());
    }

    #[test]
    fn test_maximum_caps_and_leftover_moves() {
        let slots = [slot(100, 1, Some(3)), slot(100, 1, None)];
        let allocs = allocate(&slots, 20);
        assert_eq!(extents(&allocs), vec![3, 17]);
    }

    #[test]
    fn test_leftover_stays_when_all_capped() {
        let slots = [slot(100, 1, Some(2)), slot(100, 1, Some(4))];
        let allocs = allocate(&slots, 20);
        assert_eq!(extents(&allocs), vec![2, 4]);
        assert_eq!(allocs[1].offset, 2);
    }

    #[test]
    fn test_zero_weights_split_evenly() {
        let slots = [slot(0, 0, None), slot(0, 0, None)];
        assert_eq!(extents(&allocate(&slots, 9)), vec![4, 5]);
    }

    proptest! {
        #[test]
        fn prop_layout_bound(
            raw in prop::collection::vec((0u32..500, 0u16..20, prop::option::of(0u16..60)), 0..8),
            total in 0u16..200,
        ) {
            let slots: Vec<LayoutSlot> = raw
                .iter()
                .map(|&(weight, min, max)| slot(weight, min, max.map(|m| m.max(min))))
                .collect();
            let allocs = allocate(&slots, total);

            let sum: u32 = allocs.iter().map(|a| u32::from(a.extent)).sum();
            prop_assert!(sum <= u32::from(total));

            let mut offset = 0u16;
            let mut last_index = None;
            for a in &allocs {
                let s = &slots[a.index];
                prop_assert!(a.extent >= s.min);
                prop_assert!(s.max.map_or(true, |max| a.extent <= max));
                prop_assert_eq!(a.offset, offset);
                prop_assert!(last_index.map_or(true, |last| a.index > last));
                offset += a.extent;
                last_index = Some(a.index);
            }
        }
    }
}

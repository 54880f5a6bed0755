use crate::animation::tween::Tween;

/// Handle to a tween registered with a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct AnimatorId(pub u64);

#[derive(Debug)]
struct Entry {
    id: AnimatorId,
    tween: Tween,
    removed: bool,
}

/// Frame clock shared by every animated layer of an application.
///
/// The host calls [`Scheduler::advance`] once per rendering frame. Registration order is
/// advancement order. Unregistered entries are tombstoned and swept at the next tick, so
/// removal never shifts entries that are still being visited.
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tween: Tween) -> AnimatorId {
        let id = AnimatorId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            tween,
            removed: false,
        });
        tracing::debug!(id = id.0, "animator registered");
        id
    }

    /// Stop and drop the tween behind `id`. Returns false if it was already gone.
    pub fn unregister(&mut self, id: AnimatorId) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id && !e.removed) else {
            return false;
        };
        entry.tween.stop();
        entry.removed = true;
        tracing::debug!(id = id.0, "animator unregistered");
        true
    }

    pub fn get(&self, id: AnimatorId) -> Option<&Tween> {
        self.entries
            .iter()
            .find(|e| e.id == id && !e.removed)
            .map(|e| &e.tween)
    }

    pub fn get_mut(&mut self, id: AnimatorId) -> Option<&mut Tween> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id && !e.removed)
            .map(|e| &mut e.tween)
    }

    /// Number of live (not unregistered) tweens.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.removed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advance every running tween to `now_ms`, then call `redraw` once per updated tween.
    ///
    /// All tweens are advanced before the first `redraw`, in registration order. Returns the
    /// number of tweens that produced a new step.
    #[tracing::instrument(level = "trace", skip(self, redraw))]
    pub fn advance(&mut self, now_ms: f64, mut redraw: impl FnMut(AnimatorId, f64)) -> usize {
        self.entries.retain(|e| !e.removed);

        let updates: Vec<(AnimatorId, f64)> = self
            .entries
            .iter_mut()
            .filter_map(|e| e.tween.sample(now_ms).map(|step| (e.id, step)))
            .collect();

        for &(id, step) in &updates {
            redraw(id, step);
        }
        updates.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;

use super::easing::Easing;

/// Handle of a scheduled tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

/// What to interpolate and how
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec<K> {
    /// Caller-defined target, echoed back in every event
    pub key: K,
    pub from: f32,
    pub to: f32,
    pub delay: f32,
    pub duration: f32,
    pub easing: Easing,
}

/// Notifications produced by [`Tweener::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenEvent<K> {
    /// The start delay elapsed at `at`
    Started { id: TweenId, key: K, at: f64 },
    /// Sampled value strictly between start and completion
    Updated { id: TweenId, key: K, value: f32 },
    /// Final value, emitted exactly once at `at = start + duration`
    Completed { id: TweenId, key: K, value: f32, at: f64 },
}

#[derive(Debug, Clone)]
struct Task<K> {
    id: TweenId,
    spec: TweenSpec<K>,
    start: f64,
    started: bool,
}

impl<K> Task<K> {
    fn end(&self) -> f64 {
        self.start + f64::from(self.spec.duration)
    }

    fn sample(&self, now: f64) -> f32 {
        let progress = ((now - self.start) / f64::from(self.spec.duration)) as f32;
        let ratio = self.spec.easing.apply(progress);
        self.spec.from + (self.spec.to - self.spec.from) * ratio
    }
}

/// Cooperative scheduler: tasks advance only when the owner ticks it.
///
/// The clock is kept in `f64` so frame-sized steps still register after
/// days of uptime.
#[derive(Debug, Clone)]
pub struct Tweener<K> {
    now: f64,
    next_id: u64,
    tasks: Vec<Task<K>>,
}

impl<K: Copy> Tweener<K> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Scheduler time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule relative to the current time
    pub fn schedule(&mut self, spec: TweenSpec<K>) -> TweenId {
        self.schedule_at(self.now, spec)
    }

    /// Schedule with the delay counted from `origin`, which may lie in the past
    pub fn schedule_at(&mut self, origin: f64, spec: TweenSpec<K>) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;

        self.tasks.push(Task {
            id,
            spec,
            start: origin + f64::from(spec.delay.max(0.0)),
            started: false,
        });

        id
    }

    /// Advance by `delta` seconds.
    ///
    /// Start and update events come first in schedule order, then completions
    /// sorted by completion time with ties broken by schedule order.
    pub fn tick(&mut self, delta: f32) -> Vec<TweenEvent<K>> {
        self.now += f64::from(delta.max(0.0));
        let now = self.now;

        let mut events = Vec::new();
        let mut completed = Vec::new();

        for task in &mut self.tasks {
            if now < task.start {
                continue;
            }

            if !task.started {
                task.started = true;
                events.push(TweenEvent::Started {
                    id: task.id,
                    key: task.spec.key,
                    at: task.start,
                });
            }

            if now >= task.end() {
                completed.push((task.end(), task.id, task.spec.key, task.spec.to));
            } else if now > task.start {
                events.push(TweenEvent::Updated {
                    id: task.id,
                    key: task.spec.key,
                    value: task.sample(now),
                });
            }
        }

        if !completed.is_empty() {
            let finished: Vec<TweenId> = completed.iter().map(|(_, id, _, _)| *id).collect();
            self.tasks.retain(|task| !finished.contains(&task.id));

            completed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            events.extend(completed.into_iter().map(|(at, id, key, value)| {
                TweenEvent::Completed { id, key, value, at }
            }));
        }

        events
    }

    /// True when some task would emit an event on a zero-length tick
    pub fn has_due(&self) -> bool {
        self.tasks
            .iter()
            .any(|task| (!task.started && task.start <= self.now) || task.end() <= self.now)
    }

    /// Number of tasks not yet completed
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Drop every pending task without notifying; returns how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }
}

impl<K: Copy> Default for Tweener<K> {
    fn default() -> Self {
        Self::new()
    }
}

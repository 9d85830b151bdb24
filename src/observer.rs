/// What the search should do after notifying an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Stop before the next node is taken off the frontier.
    Cancel,
}

/// Snapshot handed to a [SearchObserver] after a node has been expanded.
#[derive(Debug)]
pub struct Expansion<'a, N, C> {
    /// The node whose successors were just relaxed.
    pub current: N,
    /// Cost of the best path from the start to `current`.
    pub cost: C,
    /// Successors whose cost improved during this step, with their new cost. They were all
    /// (re)inserted into the frontier.
    pub opened: &'a [(N, C)],
    /// Number of entries left on the frontier, stale ones included.
    pub frontier_len: usize,
}

/// Hook invoked once per expanded node. It only ever sees shared data, so it cannot change
/// the course of the search other than by asking it to stop.
pub trait SearchObserver<N, C> {
    fn on_expand(&mut self, step: &Expansion<'_, N, C>) -> Control;
}

/// Observer for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObserver;

impl<N, C> SearchObserver<N, C> for NoObserver {
    fn on_expand(&mut self, _: &Expansion<'_, N, C>) -> Control {
        Control::Continue
    }
}

/// Observer built from a closure by [from_fn].
#[derive(Clone, Copy, Debug)]
pub struct FnObserver<F>(F);

/// Wraps a closure as a [SearchObserver].
pub fn from_fn<N, C, F>(f: F) -> FnObserver<F>
where
    F: FnMut(&Expansion<'_, N, C>) -> Control,
{
    FnObserver(f)
}

impl<N, C, F> SearchObserver<N, C> for FnObserver<F>
where
    F: FnMut(&Expansion<'_, N, C>) -> Control,
{
    fn on_expand(&mut self, step: &Expansion<'_, N, C>) -> Control {
        (self.0)(step)
    }
}

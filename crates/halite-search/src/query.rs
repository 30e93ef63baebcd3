//! Deferred single-shot radial search jobs.
//!
//! Model construction sets up many searches up front but only pays for the
//! ones whose results are actually consumed. A query therefore starts life
//! idle, can be kicked off in the background, and memoizes its result: no
//! combination of `start`/`run`/`result` calls executes the sampler twice.

use crate::constraint::RadialConstraint;
use crate::error::SearchError;
use crate::lookup::{LatticePoint, SiteLookup};
use crate::sampler::RadialPositionSampler;
use crate::target::LatticeTarget;
use crossbeam_channel::{bounded, Receiver};
use halite_core::{Fractional3D, ToleranceComparer};
use std::cmp::Ordering;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

type Predicate<T> = dyn Fn(&LatticePoint<T>) -> bool + Send + Sync;
type PointOrder<T> = dyn Fn(&LatticePoint<T>, &LatticePoint<T>) -> Ordering + Send + Sync;
type TargetOrder = dyn Fn(&LatticeTarget, &LatticeTarget) -> Ordering + Send + Sync;

enum QueryState<T> {
    NotStarted,
    Running(Receiver<Vec<LatticePoint<T>>>),
    Completed(Vec<LatticePoint<T>>),
}

/// A single-shot deferred radial search.
///
/// The search runs at most once, on the first call that needs it; every
/// later call observes the memoized result. There is no cancellation: a
/// started search always runs to completion. With an order set, the sorted
/// sampler invocation is used, so hits come back in that total order
/// regardless of discovery order.
pub struct RadialPointQuery<L: SiteLookup> {
    lookup: Arc<L>,
    origin: Fractional3D,
    constraint: RadialConstraint,
    predicate: Arc<Predicate<L::Content>>,
    order: Option<Arc<PointOrder<L::Content>>>,
    state: Mutex<QueryState<L::Content>>,
}

impl<L> RadialPointQuery<L>
where
    L: SiteLookup + Send + Sync + 'static,
    L::Content: Clone + Send + 'static,
{
    /// Set up a query that accepts every site in the constraint interval.
    pub fn new(lookup: Arc<L>, origin: Fractional3D, constraint: RadialConstraint) -> Self {
        Self::with_predicate(lookup, origin, constraint, |_| true)
    }

    /// Set up a query with a per-site acceptance predicate.
    pub fn with_predicate(
        lookup: Arc<L>,
        origin: Fractional3D,
        constraint: RadialConstraint,
        predicate: impl Fn(&LatticePoint<L::Content>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            lookup,
            origin,
            constraint,
            predicate: Arc::new(predicate),
            order: None,
            state: Mutex::new(QueryState::NotStarted),
        }
    }

    /// Sort completed hits with the given total order.
    ///
    /// Must be set before the search runs; an order attached afterwards has
    /// nothing left to sort.
    #[must_use]
    pub fn with_order(
        mut self,
        order: impl Fn(&LatticePoint<L::Content>, &LatticePoint<L::Content>) -> Ordering
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.order = Some(Arc::new(order));
        self
    }

    /// The lookup this query searches.
    pub fn lookup(&self) -> &Arc<L> {
        &self.lookup
    }

    /// The origin point of the search.
    pub fn origin(&self) -> &Fractional3D {
        &self.origin
    }

    /// Kick the search off on a background thread.
    ///
    /// No-op when the search is already running or completed.
    pub fn start(&self) {
        let mut state = self.lock_state();
        if !matches!(*state, QueryState::NotStarted) {
            return;
        }
        let (sender, receiver) = bounded(1);
        let lookup = Arc::clone(&self.lookup);
        let predicate = Arc::clone(&self.predicate);
        let order = self.order.clone();
        let origin = self.origin;
        let constraint = self.constraint;
        thread::spawn(move || {
            let hits = match order {
                Some(order) => RadialPositionSampler::search_sorted(
                    &*lookup,
                    &origin,
                    &constraint,
                    |point| predicate(point),
                    |lhs, rhs| order(lhs, rhs),
                ),
                None => RadialPositionSampler::search(&*lookup, &origin, &constraint, |point| {
                    predicate(point)
                }),
            };
            // Capacity 1 and a single send; the receiver may already be gone
            // if the query was dropped, which is fine.
            let _ = sender.send(hits);
        });
        *state = QueryState::Running(receiver);
    }

    /// Start the search in the background and block for its result.
    pub fn run(&self) -> Vec<LatticePoint<L::Content>> {
        self.start();
        self.result()
    }

    /// Run the search on the calling thread if it has not started,
    /// otherwise block on the in-flight or memoized result.
    pub fn run_synchronously(&self) -> Vec<LatticePoint<L::Content>> {
        let mut state = self.lock_state();
        let hits = match std::mem::replace(&mut *state, QueryState::NotStarted) {
            QueryState::NotStarted => self.execute(),
            QueryState::Running(receiver) => Self::receive(receiver),
            QueryState::Completed(hits) => hits,
        };
        *state = QueryState::Completed(hits.clone());
        hits
    }

    /// Block until the result is available, starting the background search
    /// if nothing has run yet.
    pub fn result(&self) -> Vec<LatticePoint<L::Content>> {
        self.start();
        self.run_synchronously()
    }

    /// Non-blocking result check.
    ///
    /// `None` while the search has not finished, has not started, or while
    /// another thread holds the query state.
    pub fn poll(&self) -> Option<Vec<LatticePoint<L::Content>>> {
        let mut state = self.state.try_lock().ok()?;
        match &*state {
            QueryState::Completed(hits) => Some(hits.clone()),
            QueryState::NotStarted => None,
            QueryState::Running(receiver) => {
                let hits = receiver.try_recv().ok()?;
                *state = QueryState::Completed(hits.clone());
                Some(hits)
            }
        }
    }

    fn execute(&self) -> Vec<LatticePoint<L::Content>> {
        match &self.order {
            Some(order) => RadialPositionSampler::search_sorted(
                &*self.lookup,
                &self.origin,
                &self.constraint,
                |point| (self.predicate)(point),
                |lhs, rhs| order(lhs, rhs),
            ),
            None => RadialPositionSampler::search(
                &*self.lookup,
                &self.origin,
                &self.constraint,
                |point| (self.predicate)(point),
            ),
        }
    }

    fn receive(receiver: Receiver<Vec<LatticePoint<L::Content>>>) -> Vec<LatticePoint<L::Content>> {
        match receiver.recv() {
            Ok(hits) => hits,
            Err(_) => panic!("radial search thread exited without delivering a result"),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, QueryState<L::Content>> {
        // A poisoning panic can only come from a caller-supplied closure;
        // the state itself stays valid, so keep going.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A deferred radial search that delivers [`LatticeTarget`] records.
///
/// Wraps a [`RadialPointQuery`]; on completion the raw hits are projected
/// through the lookup's encoder and, when an order is set, sorted once.
pub struct RadialTargetQuery<L: SiteLookup> {
    point_query: RadialPointQuery<L>,
    order: Option<Box<TargetOrder>>,
    projected: Mutex<Option<Vec<LatticeTarget>>>,
}

impl<L> RadialTargetQuery<L>
where
    L: SiteLookup + Send + Sync + 'static,
    L::Content: Clone + Send + 'static,
{
    /// Wrap an existing point query.
    pub fn new(point_query: RadialPointQuery<L>) -> Self {
        Self {
            point_query,
            order: None,
            projected: Mutex::new(None),
        }
    }

    /// Set up a target query over the interval `(0, max_distance]` around
    /// `origin`. The origin site itself is never a target.
    pub fn ranged(
        lookup: Arc<L>,
        origin: Fractional3D,
        max_distance: f64,
        comparer: ToleranceComparer,
    ) -> Result<Self, SearchError> {
        let constraint = RadialConstraint::up_to(max_distance, comparer)?;
        Ok(Self::new(RadialPointQuery::new(lookup, origin, constraint)))
    }

    /// Sort completed targets with the given total order.
    #[must_use]
    pub fn with_order(
        mut self,
        order: impl Fn(&LatticeTarget, &LatticeTarget) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.order = Some(Box::new(order));
        self
    }

    /// Kick the underlying point search off in the background.
    pub fn start(&self) {
        self.point_query.start();
    }

    /// Start in the background and block for the projected targets.
    pub fn run(&self) -> Vec<LatticeTarget> {
        self.start();
        self.result()
    }

    /// Run inline if nothing has started, then project.
    pub fn run_synchronously(&self) -> Vec<LatticeTarget> {
        let hits = self.point_query.run_synchronously();
        self.project(hits)
    }

    /// Block until the projected targets are available.
    pub fn result(&self) -> Vec<LatticeTarget> {
        let hits = self.point_query.result();
        self.project(hits)
    }

    /// Non-blocking check for the projected targets.
    ///
    /// `None` while the underlying search has not finished or while another
    /// thread holds the projection cache; never blocks on either lock.
    pub fn poll(&self) -> Option<Vec<LatticeTarget>> {
        let mut projected = self.projected.try_lock().ok()?;
        if let Some(targets) = projected.as_ref() {
            return Some(targets.clone());
        }
        let hits = self.point_query.poll()?;
        let targets = self.project_hits(hits);
        *projected = Some(targets.clone());
        Some(targets)
    }

    fn project(&self, hits: Vec<LatticePoint<L::Content>>) -> Vec<LatticeTarget> {
        let mut projected = self
            .projected
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(targets) = projected.as_ref() {
            return targets.clone();
        }
        let targets = self.project_hits(hits);
        *projected = Some(targets.clone());
        targets
    }

    fn project_hits(&self, hits: Vec<LatticePoint<L::Content>>) -> Vec<LatticeTarget> {
        let encoder = self.point_query.lookup().encoder();
        let mut targets = LatticeTarget::project(self.point_query.origin(), &hits, encoder);
        if let Some(order) = &self.order {
            targets.sort_by(|lhs, rhs| order(lhs, rhs));
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halite_core::{Cartesian3D, FractionalCoordinateSystem, VectorTransformer};
    use halite_encode::{PositionList, UnitCellVectorEncoder};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::time::Duration;

    struct CountingLookup {
        encoder: UnitCellVectorEncoder,
        served: AtomicUsize,
    }

    impl SiteLookup for CountingLookup {
        type Content = usize;

        fn encoder(&self) -> &UnitCellVectorEncoder {
            &self.encoder
        }

        fn content_at(&self, position_index: usize) -> usize {
            self.served.fetch_add(1, AtomicOrdering::SeqCst);
            position_index
        }
    }

    fn cubic_lookup(a: f64) -> Arc<CountingLookup> {
        let comparer = ToleranceComparer::new(1.0e-6).unwrap();
        let positions =
            PositionList::new(&[Fractional3D::new(0.0, 0.0, 0.0)], comparer).unwrap();
        let system = FractionalCoordinateSystem::new(
            Cartesian3D::new(a, 0.0, 0.0),
            Cartesian3D::new(0.0, a, 0.0),
            Cartesian3D::new(0.0, 0.0, a),
        )
        .unwrap();
        Arc::new(CountingLookup {
            encoder: UnitCellVectorEncoder::new(positions, VectorTransformer::new(system)),
            served: AtomicUsize::new(0),
        })
    }

    fn comparer() -> ToleranceComparer {
        ToleranceComparer::new(1.0e-6).unwrap()
    }

    fn constraint(max: f64) -> RadialConstraint {
        RadialConstraint::up_to(max, comparer()).unwrap()
    }

    #[test]
    fn repeated_invocations_run_the_search_once() {
        let lookup = cubic_lookup(4.0);
        let query = RadialPointQuery::new(
            Arc::clone(&lookup),
            Fractional3D::new(0.0, 0.0, 0.0),
            constraint(4.0),
        );
        query.start();
        query.start();
        let first = query.result();
        let served = lookup.served.load(AtomicOrdering::SeqCst);
        let second = query.result();
        let third = query.run_synchronously();
        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(lookup.served.load(AtomicOrdering::SeqCst), served);
    }

    #[test]
    fn run_synchronously_without_start_stays_inline() {
        let lookup = cubic_lookup(4.0);
        let query = RadialPointQuery::new(
            Arc::clone(&lookup),
            Fractional3D::new(0.0, 0.0, 0.0),
            constraint(4.0),
        );
        let hits = query.run_synchronously();
        assert_eq!(hits.len(), 6);
        // Memoized; a later background start must not rerun.
        let served = lookup.served.load(AtomicOrdering::SeqCst);
        query.start();
        assert_eq!(query.result().len(), 6);
        assert_eq!(lookup.served.load(AtomicOrdering::SeqCst), served);
    }

    #[test]
    fn poll_is_none_before_completion_and_some_after() {
        let lookup = cubic_lookup(4.0);
        let query = RadialPointQuery::new(
            Arc::clone(&lookup),
            Fractional3D::new(0.0, 0.0, 0.0),
            constraint(4.0),
        );
        assert!(query.poll().is_none());
        query.start();
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let hits = loop {
            if let Some(hits) = query.poll() {
                break hits;
            }
            assert!(std::time::Instant::now() < deadline);
            thread::yield_now();
        };
        assert_eq!(hits.len(), 6);
        assert_eq!(query.poll().map(|h| h.len()), Some(6));
    }

    #[test]
    fn background_run_returns_comparer_ordered_points() {
        let lookup = cubic_lookup(4.0);
        let transformer = lookup.encoder().transformer().clone();
        let origin = Fractional3D::new(0.0, 0.0, 0.0);
        let query = RadialPointQuery::new(Arc::clone(&lookup), origin, constraint(5.7))
            .with_order(move |lhs, rhs| {
                let left = transformer.fractional_length(&(lhs.fractional - origin));
                let right = transformer.fractional_length(&(rhs.fractional - origin));
                left.total_cmp(&right).then_with(|| {
                    lhs.fractional
                        .a
                        .total_cmp(&rhs.fractional.a)
                        .then_with(|| lhs.fractional.b.total_cmp(&rhs.fractional.b))
                        .then_with(|| lhs.fractional.c.total_cmp(&rhs.fractional.c))
                })
            });
        query.start();
        let hits = query.result();
        assert_eq!(hits.len(), 18);
        let transformer = lookup.encoder().transformer();
        let lengths: Vec<f64> = hits
            .iter()
            .map(|hit| transformer.fractional_length(&(hit.fractional - origin)))
            .collect();
        assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!((lengths[0] - 4.0).abs() < 1.0e-9);
        assert!((lengths[17] - 32.0_f64.sqrt()).abs() < 1.0e-9);
        // Memoized like the unordered variant.
        assert_eq!(query.result(), hits);
    }

    #[test]
    fn predicate_applies_in_background_runs() {
        let lookup = cubic_lookup(4.0);
        let query = RadialPointQuery::with_predicate(
            lookup,
            Fractional3D::new(0.0, 0.0, 0.0),
            constraint(4.0),
            |point| point.fractional.c > 0.5,
        );
        assert_eq!(query.run().len(), 1);
    }

    #[test]
    fn target_poll_is_none_until_completion_and_projects_once() {
        let lookup = cubic_lookup(4.0);
        let query = RadialTargetQuery::ranged(
            Arc::clone(&lookup),
            Fractional3D::new(0.0, 0.0, 0.0),
            4.0,
            comparer(),
        )
        .unwrap();
        assert!(query.poll().is_none());
        query.start();
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let targets = loop {
            if let Some(targets) = query.poll() {
                break targets;
            }
            assert!(std::time::Instant::now() < deadline);
            thread::yield_now();
        };
        assert_eq!(targets.len(), 6);
        // Later polls serve the cached projection.
        assert_eq!(query.poll(), Some(targets));
    }

    #[test]
    fn target_query_projects_and_orders() {
        let lookup = cubic_lookup(4.0);
        let query = RadialTargetQuery::ranged(
            lookup,
            Fractional3D::new(0.0, 0.0, 0.0),
            5.7,
            comparer(),
        )
        .unwrap()
        .with_order(|lhs, rhs| {
            lhs.distance
                .total_cmp(&rhs.distance)
                .then_with(|| lhs.encoded.cmp(&rhs.encoded))
        });
        let targets = query.run();
        assert_eq!(targets.len(), 18);
        assert_eq!(targets[0].distance_fm(), 400_000);
        assert_eq!(targets[17].distance_fm(), 565_685);
        // Ordered output is memoized exactly like the raw hits.
        assert_eq!(query.result(), targets);
        assert_eq!(query.poll(), Some(targets));
    }
}

//! In-memory [`Database`] used in tests.

use std::{
    cmp, future,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use common::{
    operations::{By, Select},
    page, Page,
};
use tracerr::Traced;

use crate::{
    domain::{Area, House, Order},
    infra::{database, Database},
    read::{
        house::{Full, FullSelector, Summary, TopBooked},
        search::{self, DateRange, Plan},
    },
};

/// In-memory [`Database`] able to simulate an unresponsive server.
#[derive(Debug, Default)]
pub(crate) struct Memory {
    /// Stored [`Area`]s.
    pub(crate) areas: Vec<Area>,

    /// Stored [`House`]s along with their listing data.
    pub(crate) houses: Vec<Summary>,

    /// Stored detail pages of [`House`]s.
    pub(crate) details: Vec<Full>,

    /// Stored [`Order`]s.
    pub(crate) orders: Vec<Order>,

    /// Whether queries never complete.
    pub(crate) stalled: AtomicBool,

    /// Number of started queries.
    pub(crate) queries: AtomicUsize,
}

impl Memory {
    /// Makes queries hang forever.
    pub(crate) fn stall(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    /// Returns the number of started queries.
    pub(crate) fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Counts the query and hangs forever if stalled.
    async fn begin(&self) {
        _ = self.queries.fetch_add(1, Ordering::SeqCst);
        if self.stalled.load(Ordering::SeqCst) {
            future::pending::<()>().await;
        }
    }
}

/// Compares [`House`]s according to the provided [`search::Ordering`].
fn compare(ordering: search::Ordering, a: &House, b: &House) -> cmp::Ordering {
    use search::Ordering as O;

    match ordering {
        O::MostBooked => b.order_count.cmp(&a.order_count),
        O::Cheapest => a.price.cmp(&b.price),
        O::MostExpensive => b.price.cmp(&a.price),
        O::Newest => b.created_at.cmp(&a.created_at),
    }
    .then_with(|| b.id.cmp(&a.id))
}

impl Database<Select<By<Vec<Area>, ()>>> for Memory {
    type Ok = Vec<Area>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Area>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.begin().await;

        let mut areas = self.areas.clone();
        areas.sort_by_key(|a| a.id);
        Ok(areas)
    }
}

impl Database<Select<By<Vec<Summary>, TopBooked>>> for Memory {
    type Ok = Vec<Summary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Summary>, TopBooked>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.begin().await;

        let mut houses = self.houses.clone();
        houses.sort_by(|a, b| {
            compare(search::Ordering::MostBooked, &a.house, &b.house)
        });
        houses.truncate(by.into_inner().limit);
        Ok(houses)
    }
}

impl Database<Select<By<Option<Full>, FullSelector>>> for Memory {
    type Ok = Option<Full>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Full>, FullSelector>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.begin().await;

        let FullSelector { id, comments_limit } = by.into_inner();
        Ok(self.details.iter().find(|f| f.house.id == id).map(|f| {
            let mut full = f.clone();
            full.comments.truncate(comments_limit);
            full
        }))
    }
}

impl Database<Select<By<Page<Summary>, Plan>>> for Memory {
    type Ok = Page<Summary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<Summary>, Plan>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.begin().await;

        let plan = by.into_inner();
        let mut matched = self
            .houses
            .iter()
            .filter(|s| plan.admits(&s.house))
            .cloned()
            .collect::<Vec<_>>();
        matched.sort_by(|a, b| compare(plan.ordering, &a.house, &b.house));

        let total = page::Total::from_count(matched.len() as u64, plan.size);
        let offset = usize::try_from(plan.offset()).unwrap();
        let items = matched
            .into_iter()
            .skip(offset)
            .take(plan.limit() as usize)
            .collect();
        Ok(Page { items, total })
    }
}

impl Database<Select<By<Vec<Order>, DateRange>>> for Memory {
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, DateRange>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.begin().await;

        let range = by.into_inner();
        Ok(self
            .orders
            .iter()
            .filter(|o| range.conflicts_with(o.begin_date, o.end_date))
            .cloned()
            .collect())
    }
}

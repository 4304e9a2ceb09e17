//! [`Order`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Order,
    infra::{
        database::{self, postgres::Connection as _, Postgres},
        Database,
    },
    read::search::DateRange,
};

impl Database<Select<By<Vec<Order>, DateRange>>> for Postgres {
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, DateRange>>,
    ) -> Result<Self::Ok, Self::Err> {
        let range = by.into_inner();
        let (start, end) = (range.start(), range.end());

        const SQL: &str = "\
            SELECT id, house_id, user_id, begin_date, end_date, status, \
                   comment \
            FROM orders \
            WHERE ($1::DATE IS NULL OR begin_date <= $1::DATE) \
              AND ($2::DATE IS NULL OR end_date >= $2::DATE)";
        Ok(self
            .query(SQL, &[&end, &start])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Order {
                id: row.get("id"),
                house_id: row.get("house_id"),
                user_id: row.get("user_id"),
                begin_date: row.get("begin_date"),
                end_date: row.get("end_date"),
                status: row.get("status"),
                comment: row.get("comment"),
            })
            .collect())
    }
}

//! [`House`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    page, Page,
};
use futures::future;
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::{IsolationLevel, Row};
use tracerr::Traced;

use crate::{
    domain::{area, house, order, House, User},
    infra::{
        database::{
            self,
            postgres::{self, connection, Connection as _},
            Postgres,
        },
        Database,
    },
    read::{
        house::{Comment, Full, FullSelector, Summary, TopBooked},
        search::Plan,
    },
};

/// Columns of a [`House`] selected from the `houses` table aliased as `h`.
macro_rules! house_columns {
    () => {
        "h.id, h.user_id, h.area_id, h.title, h.price, h.address, \
         h.room_count, h.acreage, h.unit, h.capacity, h.beds, h.deposit, \
         h.min_days, h.max_days, h.order_count, h.index_image_url, \
         h.created_at"
    };
}

/// Reads a [`House`] out of the provided [`Row`] selected with
/// `house_columns!()`.
fn house_from_row(row: &Row) -> House {
    House {
        id: row.get("id"),
        owner_id: row.get("user_id"),
        area_id: row.get("area_id"),
        title: row.get("title"),
        price: row.get("price"),
        address: row.get("address"),
        room_count: row.get("room_count"),
        acreage: row.get("acreage"),
        unit: row.get("unit"),
        capacity: row.get("capacity"),
        beds: row.get("beds"),
        deposit: row.get("deposit"),
        min_days: row.get("min_days"),
        max_days: row.get("max_days"),
        order_count: row.get("order_count"),
        index_image: row.get("index_image_url"),
        created_at: row.get("created_at"),
    }
}

/// Reads a [`Summary`] out of the provided [`Row`] selected with
/// `house_columns!()`, `area_name` and `owner_avatar` columns.
fn summary_from_row(row: &Row) -> Summary {
    Summary {
        house: house_from_row(row),
        area_name: row.get("area_name"),
        owner_avatar: row.get("owner_avatar"),
    }
}

/// Converts the provided `limit` into a SQL `LIMIT` value.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl Database<Select<By<Vec<Summary>, TopBooked>>> for Postgres {
    type Ok = Vec<Summary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Summary>, TopBooked>>,
    ) -> Result<Self::Ok, Self::Err> {
        let TopBooked { limit } = by.into_inner();
        let limit = sql_limit(limit);

        const SQL: &str = concat!(
            "SELECT ",
            house_columns!(),
            ", a.name AS area_name, u.avatar_url AS owner_avatar \
             FROM houses AS h \
             INNER JOIN areas AS a ON a.id = h.area_id \
             INNER JOIN users AS u ON u.id = h.user_id \
             ORDER BY h.order_count DESC, h.id DESC \
             LIMIT $1::INT8",
        );
        Ok(self
            .query(SQL, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(summary_from_row)
            .collect())
    }
}

impl Database<Select<By<Option<Full>, FullSelector>>> for Postgres {
    type Ok = Option<Full>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Full>, FullSelector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let FullSelector { id, comments_limit } = by.into_inner();

        const HOUSE_SQL: &str = concat!(
            "SELECT ",
            house_columns!(),
            ", u.name AS owner_name, u.avatar_url AS owner_avatar \
             FROM houses AS h \
             INNER JOIN users AS u ON u.id = h.user_id \
             WHERE h.id = $1::INT4",
        );
        let Some(row) = self
            .query_opt(HOUSE_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };
        let house = house_from_row(&row);
        let owner = User {
            id: house.owner_id,
            name: row.get("owner_name"),
            avatar: row.get("owner_avatar"),
        };

        const IMAGES_SQL: &str = "\
            SELECT url \
            FROM house_images \
            WHERE house_id = $1::INT4 \
            ORDER BY id";
        const FACILITIES_SQL: &str = "\
            SELECT facility_id \
            FROM house_facilities \
            WHERE house_id = $1::INT4 \
            ORDER BY facility_id";
        const COMMENTS_SQL: &str = "\
            SELECT u.name AS user_name, o.comment, \
                   (o.updated_at AT TIME ZONE 'UTC')::DATE AS created_at \
            FROM orders AS o \
            INNER JOIN users AS u ON u.id = o.user_id \
            WHERE o.house_id = $1::INT4 \
              AND o.status = $2::INT2 \
              AND o.comment IS NOT NULL \
            ORDER BY o.updated_at DESC, o.id DESC \
            LIMIT $3::INT8";
        let status = order::Status::Complete;
        let limit = sql_limit(comments_limit);
        let (images, facilities, comments) = future::try_join3(
            self.query(IMAGES_SQL, &[&id]),
            self.query(FACILITIES_SQL, &[&id]),
            self.query(COMMENTS_SQL, &[&id, &status, &limit]),
        )
        .await
        .map_err(tracerr::wrap!())?;

        Ok(Some(Full {
            house,
            owner,
            images: images.iter().map(|r| r.get("url")).collect(),
            facilities: facilities
                .iter()
                .map(|r| r.get("facility_id"))
                .collect(),
            comments: comments
                .iter()
                .map(|r| Comment {
                    user_name: r.get("user_name"),
                    content: r.get("comment"),
                    created_at: r.get("created_at"),
                })
                .collect(),
        }))
    }
}

impl Database<Select<By<Page<Summary>, Plan>>> for Postgres {
    type Ok = Page<Summary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<Summary>, Plan>>,
    ) -> Result<Self::Ok, Self::Err> {
        let plan = by.into_inner();
        // Slice, so it is encoded as an `INT4[]`.
        let excluded: &[house::Id] = &plan.excluded;
        let limit = i64::from(plan.limit());
        let offset = i64::try_from(plan.offset()).unwrap_or(i64::MAX);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let filter = render_filter(plan.area.as_ref(), &excluded, &mut ps);

        let count_sql = format!(
            "SELECT COUNT(*) AS total \
             FROM houses AS h \
             WHERE true {filter}",
        );
        let count_ps = ps.clone();

        ps.push(&limit);
        let limit_idx = ps.len();
        ps.push(&offset);
        let offset_idx = ps.len();
        let page_sql = format!(
            "SELECT {columns}, \
                    a.name AS area_name, u.avatar_url AS owner_avatar \
             FROM houses AS h \
             INNER JOIN areas AS a ON a.id = h.area_id \
             INNER JOIN users AS u ON u.id = h.user_id \
             WHERE true {filter} \
             ORDER BY {ordering} \
             LIMIT ${limit_idx}::INT8 \
             OFFSET ${offset_idx}::INT8",
            columns = house_columns!(),
            ordering = plan.ordering.sql(),
        );

        let mut client = connection::client(self)
            .await
            .map_err(tracerr::wrap!())?;
        // The count and the page must observe the same snapshot.
        let tx = client
            .build_transaction()
            .isolation_level(IsolationLevel::RepeatableRead)
            .read_only(true)
            .start()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        let (count, rows) = future::try_join(
            tx.query_one(count_sql.as_str(), &count_ps),
            tx.query(page_sql.as_str(), &ps),
        )
        .await
        .map_err(tracerr::wrap!())?;
        tx.commit()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;

        let total = count.get::<_, i64>("total");
        Ok(Page {
            items: rows.iter().map(summary_from_row).collect(),
            total: page::Total::from_count(
                u64::try_from(total).unwrap_or_default(),
                plan.size,
            ),
        })
    }
}

/// Renders the search predicate matching the provided `area` and skipping the
/// `excluded` [`House`]s, pushing its parameters into `ps`.
///
/// Criteria that are absent render nothing.
fn render_filter<'p>(
    area: Option<&'p area::Id>,
    excluded: &'p &'p [house::Id],
    ps: &mut Vec<&'p (dyn ToSql + Sync)>,
) -> String {
    let area = area.map(|id| {
        ps.push(id);
        format!("AND h.area_id = ${}::INT4", ps.len())
    });
    let excluded = (!excluded.is_empty()).then(|| {
        ps.push(excluded);
        format!("AND h.id <> ALL(${}::INT4[])", ps.len())
    });
    area.into_iter().chain(excluded).join(" ")
}

//! Shared fixtures of [`Query`] tests.
//!
//! [`Query`]: super::Query

use std::time::Duration;

use common::{page, Date, DateTime};

use crate::{
    domain::{area, order, Area, House, Image, Order},
    infra::{cache, database},
    read::house::Summary,
    Config, Service, Ttls,
};

/// [`Service`] over in-memory infrastructure.
pub(crate) type TestService =
    Service<database::memory::Memory, cache::memory::Memory>;

/// TTL of every cached value in tests.
pub(crate) const TTL_SECS: u64 = 7200;

/// Image URL prefix in tests.
pub(crate) const IMAGES: &str = "https://img.test/";

pub(crate) fn config() -> Config {
    let ttl = cache::Ttl::new(Duration::from_secs(TTL_SECS)).unwrap();
    Config {
        ttl: Ttls {
            areas: ttl,
            home_page: ttl,
            house: ttl,
            search: ttl,
        },
        home_page_houses: 5,
        page_size: page::Size::new(2).unwrap(),
        comments_limit: 30,
        image_url_prefix: IMAGES.into(),
        store_timeout: Duration::from_millis(50),
        cache_timeout: Duration::from_millis(20),
    }
}

pub(crate) fn service(db: database::memory::Memory) -> TestService {
    Service::new(config(), db, cache::memory::Memory::default())
}

pub(crate) fn date(s: &str) -> Date {
    s.parse().unwrap()
}

pub(crate) fn area(id: i32, name: &str) -> Area {
    Area {
        id: id.into(),
        name: area::Name::from(name.to_owned()),
    }
}

/// [`House`] with an index image, listed `id` days after the Unix epoch.
pub(crate) fn house(id: i32, area: i32, price: i32, order_count: i32) -> House {
    House {
        id: id.into(),
        owner_id: 1.into(),
        area_id: area.into(),
        title: format!("House #{id}").into(),
        price: price.into(),
        address: format!("{id} Main st.").into(),
        room_count: 2,
        acreage: 60,
        unit: "2+1".into(),
        capacity: 4,
        beds: "2 double".into(),
        deposit: 10_000.into(),
        min_days: 1,
        max_days: 0,
        order_count,
        index_image: Some(Image::from(format!("house-{id}.png"))),
        created_at: DateTime::from_unix_timestamp(i64::from(id) * 86_400)
            .unwrap()
            .coerce(),
    }
}

pub(crate) fn summary(house: House) -> Summary {
    Summary {
        house,
        area_name: area::Name::from("Chaoyang".to_owned()),
        owner_avatar: None,
    }
}

pub(crate) fn booking(house: i32, begin: &str, end: &str) -> Order {
    Order {
        id: house.into(),
        house_id: house.into(),
        user_id: 2.into(),
        begin_date: date(begin),
        end_date: date(end),
        status: order::Status::Paid,
        comment: None,
    }
}

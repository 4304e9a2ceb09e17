//! [`House`]-related read definitions.

use common::Date;
use serde::Serialize;

use crate::{
    domain::{
        area,
        house::{self, FacilityId},
        order, user, House, Image, User,
    },
    read::Payload,
};

/// [`House`] along with the data its listing card shows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    /// Listed [`House`].
    pub house: House,

    /// Name of the [`Area`] the [`House`] is located in.
    ///
    /// [`Area`]: crate::domain::Area
    pub area_name: area::Name,

    /// Avatar of the [`House`] owner, if any.
    pub owner_avatar: Option<Image>,
}

/// [`House`] along with everything its detail page shows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Full {
    /// Listed [`House`].
    pub house: House,

    /// Owner of the [`House`].
    pub owner: User,

    /// All uploaded [`Image`]s of the [`House`].
    pub images: Vec<Image>,

    /// Facilities the [`House`] provides.
    pub facilities: Vec<FacilityId>,

    /// Latest guest [`Comment`]s, newest first.
    pub comments: Vec<Comment>,
}

/// Guest comment left on a completed booking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    /// Name of the guest.
    pub user_name: user::Name,

    /// Comment text.
    pub content: order::Comment,

    /// [`Date`] the comment was left.
    pub created_at: Date,
}

/// Selector of the most booked [`House`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TopBooked {
    /// Maximum number of [`House`]s to select.
    pub limit: usize,
}

/// Selector of a [`Full`] [`House`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FullSelector {
    /// ID of the [`House`] to select.
    pub id: house::Id,

    /// Maximum number of [`Comment`]s to select.
    pub comments_limit: usize,
}

/// Listing card of a [`House`].
#[derive(Clone, Debug, Serialize)]
#[expect(missing_docs, reason = "self-descriptive wire fields")]
pub struct Basic {
    pub house_id: house::Id,
    pub title: house::Title,
    pub price: house::Price,
    pub area_name: area::Name,
    pub img_url: String,
    pub room_count: i32,
    pub order_count: i32,
    pub address: house::Address,
    pub user_avatar: String,
    pub ctime: Date,
}

impl Basic {
    /// Renders the provided [`Summary`], resolving image URLs under the
    /// `image_prefix`.
    #[must_use]
    pub fn new(summary: &Summary, image_prefix: &str) -> Self {
        let Summary {
            house,
            area_name,
            owner_avatar,
        } = summary;

        Self {
            house_id: house.id,
            title: house.title.clone(),
            price: house.price,
            area_name: area_name.clone(),
            img_url: url_or_empty(house.index_image.as_ref(), image_prefix),
            room_count: house.room_count,
            order_count: house.order_count,
            address: house.address.clone(),
            user_avatar: url_or_empty(owner_avatar.as_ref(), image_prefix),
            ctime: house.created_at.date(),
        }
    }
}

/// Detail page of a [`House`].
#[derive(Clone, Debug, Serialize)]
#[expect(missing_docs, reason = "self-descriptive wire fields")]
pub struct Detail {
    pub hid: house::Id,
    pub user_id: user::Id,
    pub user_name: user::Name,
    pub user_avatar: String,
    pub title: house::Title,
    pub price: house::Price,
    pub address: house::Address,
    pub room_count: i32,
    pub acreage: i32,
    pub unit: String,
    pub capacity: i32,
    pub beds: String,
    pub deposit: house::Price,
    pub min_days: i32,
    pub max_days: i32,
    pub img_urls: Vec<String>,
    pub facilities: Vec<FacilityId>,
    pub comments: Vec<CommentItem>,
}

impl Detail {
    /// Renders the provided [`Full`] [`House`], resolving image URLs under
    /// the `image_prefix`.
    #[must_use]
    pub fn new(full: Full, image_prefix: &str) -> Self {
        let Full {
            house,
            owner,
            images,
            facilities,
            comments,
        } = full;

        Self {
            hid: house.id,
            user_id: owner.id,
            user_name: owner.name,
            user_avatar: url_or_empty(owner.avatar.as_ref(), image_prefix),
            title: house.title,
            price: house.price,
            address: house.address,
            room_count: house.room_count,
            acreage: house.acreage,
            unit: house.unit,
            capacity: house.capacity,
            beds: house.beds,
            deposit: house.deposit,
            min_days: house.min_days,
            max_days: house.max_days,
            img_urls: images.iter().map(|i| i.url(image_prefix)).collect(),
            facilities,
            comments: comments.into_iter().map(CommentItem::from).collect(),
        }
    }
}

/// Rendered [`Comment`].
#[derive(Clone, Debug, Serialize)]
#[expect(missing_docs, reason = "self-descriptive wire fields")]
pub struct CommentItem {
    pub user_name: user::Name,
    pub content: String,
    pub ctime: Date,
}

impl From<Comment> for CommentItem {
    fn from(comment: Comment) -> Self {
        Self {
            user_name: comment.user_name,
            content: comment.content.to_string(),
            ctime: comment.created_at,
        }
    }
}

/// Home page highlights, serialized as `{"houses": [...]}`.
#[derive(Clone, Debug, Serialize)]
pub struct Highlights {
    /// Serialized list of [`Basic`] cards.
    pub houses: Payload,
}

/// [`Detail`] page as seen by a viewer.
#[derive(Clone, Debug, Serialize)]
pub struct DetailView {
    /// ID of the [`User`] viewing the page, if identified.
    pub user_id: Option<user::Id>,

    /// Serialized [`Detail`] page.
    pub house: Payload,
}

/// Resolves the URL of an optional [`Image`], or returns an empty string.
fn url_or_empty(image: Option<&Image>, prefix: &str) -> String {
    image.map(|i| i.url(prefix)).unwrap_or_default()
}

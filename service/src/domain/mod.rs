//! Domain definitions.

pub mod area;
pub mod house;
mod image;
pub mod order;
pub mod user;

pub use self::{
    area::Area, house::House, image::Image, order::Order, user::User,
};

mod common;
mod reservation;

pub use self::{common::*, reservation::*};

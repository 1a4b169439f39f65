use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct HotelName(String);

impl HotelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

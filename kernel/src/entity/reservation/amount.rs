use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BaseStayAmount(f64);

impl BaseStayAmount {
    pub fn new(amount: impl Into<f64>) -> Self {
        Self(amount.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct TaxAmount(f64);

impl TaxAmount {
    pub fn new(amount: impl Into<f64>) -> Self {
        Self(amount.into())
    }
}

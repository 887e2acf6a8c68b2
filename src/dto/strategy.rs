use std::fmt;

use serde::{Deserialize, Serialize};

use super::ordered_map::OrderedMap;

/// A parameter default as advertised by `GET /api/strategies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(u64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    pub name: String,
    pub explanation: String,
    #[serde(default)]
    pub params: OrderedMap<ParamValue>,
}

/// Strategy key -> descriptor, in declaration order.
pub type StrategyCatalog = OrderedMap<StrategyDescriptor>;

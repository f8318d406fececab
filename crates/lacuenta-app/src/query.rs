// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Date, PrimitiveDateTime};

use crate::model::{Pagination, format_day, format_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascend,
    Descend,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascend => "ascend",
            Self::Descend => "descend",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ascend" => Some(Self::Ascend),
            "descend" => Some(Self::Descend),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn encode(&self) -> String {
        format!("{}_{}", self.field, self.direction.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Day(Date),
    Time(PrimitiveDateTime),
    DayRange(Date, Date),
}

impl QueryValue {
    pub fn encode(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Day(value) => format_day(*value),
            Self::Time(value) => format_time(*value),
            Self::DayRange(start, end) => format!("{},{}", format_day(*start), format_day(*end)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

// Pagination passthrough, then the stored query-form values, then
// active column filters (comma-joined), then the sorter. Later entries
// win on key collision.
pub fn query_params(
    pagination: Option<&Pagination>,
    form_values: &BTreeMap<String, QueryValue>,
    filters: &BTreeMap<String, Vec<String>>,
    sorter: Option<&SortSpec>,
) -> QueryParams {
    let mut params = QueryParams::new();

    if let Some(pagination) = pagination {
        if let Some(current) = pagination.current {
            params.insert("page", current.to_string());
        }
        if let Some(size) = pagination.page_size {
            params.insert("size", size.to_string());
        }
    }

    for (key, value) in form_values {
        params.insert(key.clone(), value.encode());
    }

    for (key, values) in filters {
        params.insert(key.clone(), values.join(","));
    }

    if let Some(sorter) = sorter {
        params.insert("sorter", sorter.encode());
    }

    params
}

#[cfg(test)]
mod tests {
    use super::{QueryValue, SortDirection, SortSpec, query_params};
    use crate::model::{Pagination, parse_day, parse_time};
    use std::collections::BTreeMap;

    #[test]
    fn sorter_encodes_field_and_order() {
        let spec = SortSpec {
            field: "time".to_owned(),
            direction: SortDirection::Descend,
        };
        assert_eq!(spec.encode(), "time_descend");
        assert_eq!(SortDirection::parse("ascend"), Some(SortDirection::Ascend));
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn query_values_encode_wire_layouts() {
        let day = parse_day("2026-08-01").expect("day parses");
        let end = parse_day("2026-08-06").expect("day parses");
        let at = parse_time("2026-08-01 09:00:00").expect("time parses");

        assert_eq!(QueryValue::Day(day).encode(), "2026-08-01");
        assert_eq!(QueryValue::Time(at).encode(), "2026-08-01 09:00:00");
        assert_eq!(
            QueryValue::DayRange(day, end).encode(),
            "2026-08-01,2026-08-06"
        );
        assert_eq!(QueryValue::Text("Casey".to_owned()).encode(), "Casey");
    }

    #[test]
    fn table_change_builds_the_full_payload() {
        let pagination = Pagination {
            current: Some(2),
            page_size: Some(10),
            ..Pagination::default()
        };
        let mut form_values = BTreeMap::new();
        form_values.insert("user".to_owned(), QueryValue::Text("Casey".to_owned()));
        let mut filters = BTreeMap::new();
        filters.insert("status".to_owned(), vec!["0".to_owned(), "1".to_owned()]);
        let sorter = SortSpec {
            field: "time".to_owned(),
            direction: SortDirection::Ascend,
        };

        let params = query_params(Some(&pagination), &form_values, &filters, Some(&sorter));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("size"), Some("10"));
        assert_eq!(params.get("user"), Some("Casey"));
        assert_eq!(params.get("status"), Some("0,1"));
        assert_eq!(params.get("sorter"), Some("time_ascend"));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn empty_inputs_build_an_empty_payload() {
        let params = query_params(None, &BTreeMap::new(), &BTreeMap::new(), None);
        assert!(params.is_empty());
    }
}

// src/backend/query.rs
//
// Filter / sort / limit description passed through to the backend.
// Rendered as PostgREST query parameters; evaluated directly by the
// in-memory backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison applied by a [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    ILike,
    Is,
    In,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Like => "like",
            Operator::ILike => "ilike",
            Operator::Is => "is",
            Operator::In => "in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub op: Operator,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Eq, value)
    }

    pub fn neq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Neq, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Gt, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Gte, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Lt, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Lte, value)
    }

    pub fn is_in<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self::new(column, Operator::In, Value::Array(values))
    }

    /// PostgREST parameter pair, e.g. `("is_featured", "eq.true")`
    pub fn to_param(&self) -> (String, String) {
        let rendered = match (&self.op, &self.value) {
            (Operator::In, Value::Array(items)) => {
                let items: Vec<String> = items.iter().map(render_list_item).collect();
                format!("({})", items.join(","))
            }
            (_, value) => render_scalar(value),
        };
        (self.column.clone(), format!("{}.{}", self.op.as_str(), rendered))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }

    fn render(&self) -> String {
        match self.direction {
            Direction::Asc => format!("{}.asc", self.column),
            Direction::Desc => format!("{}.desc", self.column),
        }
    }
}

/// A read against one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub select: String,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            select: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// All query parameters in the order PostgREST documents them
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), compact_select(&self.select))];
        params.extend(self.filters.iter().map(Filter::to_param));

        if !self.order.is_empty() {
            let order: Vec<String> = self.order.iter().map(Order::render).collect();
            params.push(("order".to_string(), order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Filter parameters only, for writes that target rows by predicate
pub fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters.iter().map(Filter::to_param).collect()
}

/// Select clauses may be written over several lines; PostgREST wants them
/// without whitespace.
fn compact_select(select: &str) -> String {
    select.chars().filter(|c| !c.is_whitespace()).collect()
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_list_item(value: &Value) -> String {
    let raw = render_scalar(value);
    if raw.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", raw.replace('"', "\\\""))
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn param(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_default_query_selects_everything() {
        assert_eq!(Query::new().to_params(), vec![param("select", "*")]);
    }

    #[test]
    fn test_featured_sermons_query() {
        let query = Query::new()
            .filter(Filter::eq("is_featured", true))
            .order(Order::desc("sermon_date"))
            .limit(3);

        assert_eq!(
            query.to_params(),
            vec![
                param("select", "*"),
                param("is_featured", "eq.true"),
                param("order", "sermon_date.desc"),
                param("limit", "3"),
            ]
        );
    }

    #[test]
    fn test_multiple_orders_are_joined() {
        let query = Query::new()
            .order(Order::asc("event_date"))
            .order(Order::desc("created_at"));
        assert!(query
            .to_params()
            .contains(&param("order", "event_date.asc,created_at.desc")));
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(Filter::gte("event_date", "2024-06-01").to_param(), param("event_date", "gte.2024-06-01"));
        assert_eq!(Filter::lt("amount", 50).to_param(), param("amount", "lt.50"));
        assert_eq!(Filter::new("deleted_at", Operator::Is, json!(null)).to_param(), param("deleted_at", "is.null"));
    }

    #[test]
    fn test_in_list_quotes_reserved_characters() {
        let filter = Filter::is_in("status", ["pending", "on hold", "a,b"]);
        assert_eq!(
            filter.to_param(),
            param("status", "in.(pending,\"on hold\",\"a,b\")")
        );
    }

    #[test]
    fn test_embedded_select_is_compacted() {
        let query = Query::new().select(
            "*,\n  responded_by_profile:profiles!appointments_responded_by_fkey(email)\n",
        );
        assert_eq!(
            query.to_params()[0],
            param(
                "select",
                "*,responded_by_profile:profiles!appointments_responded_by_fkey(email)"
            )
        );
    }
}

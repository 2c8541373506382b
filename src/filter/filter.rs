use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterCondition, FilterOrderInfo, SqlResult};
use crate::types::is_identifier;

/// SQL builder for single-table reads. Values are always bound as parameters;
/// identifiers are validated before they are quoted into the statement.
pub struct Filter {
    table_name: String,
    select_columns: Vec<String>,
    conditions: Vec<FilterCondition>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        Self::validate_table_name(&table_name)?;
        Ok(Self {
            table_name,
            select_columns: vec![],
            conditions: vec![],
            order_data: vec![],
            limit: None,
            offset: None,
        })
    }

    pub fn select(&mut self, columns: &[&str]) -> Result<&mut Self, FilterError> {
        for column in columns {
            FilterWhere::validate_column(column)?;
        }
        self.select_columns = columns.iter().map(|c| c.to_string()).collect();
        Ok(self)
    }

    pub fn where_eq(&mut self, column: impl Into<String>, data: Value) -> Result<&mut Self, FilterError> {
        let column = column.into();
        FilterWhere::validate_column(&column)?;
        self.conditions.push(FilterCondition { column, data });
        Ok(self)
    }

    pub fn order(&mut self, info: FilterOrderInfo) -> Result<&mut Self, FilterError> {
        FilterOrder::validate(&info)?;
        self.order_data.push(info);
        Ok(self)
    }

    pub fn limit(&mut self, limit: u64, offset: Option<u64>) -> Result<&mut Self, FilterError> {
        if limit == 0 {
            return Err(FilterError::InvalidLimit("Limit must be positive".to_string()));
        }
        self.limit = Some(limit);
        self.offset = offset;
        Ok(self)
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0)?;
        let query = [
            format!("SELECT {}", self.build_select_clause()),
            format!("FROM \"{}\"", self.table_name),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            FilterOrder::generate(&self.order_data),
            self.build_limit_clause(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        Ok(SqlResult { query, params })
    }

    /// Same predicates as `to_sql`, without ordering or pagination.
    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0)?;
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table_name)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table_name, where_clause)
        };
        Ok(SqlResult { query, params })
    }

    fn validate_table_name(name: &str) -> Result<(), FilterError> {
        if name.is_empty() {
            return Err(FilterError::InvalidTableName("Table name cannot be empty".to_string()));
        }
        if !is_identifier(name) {
            return Err(FilterError::InvalidTableName(format!("Invalid table name format: {}", name)));
        }
        Ok(())
    }

    fn build_select_clause(&self) -> String {
        if self.select_columns.is_empty() {
            "*".to_string()
        } else {
            self.select_columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
        }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) if o > 0 => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), _) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{OrderTarget, SortDirection};
    use serde_json::json;

    #[test]
    fn builds_parameterised_select() {
        let mut filter = Filter::new("projects").unwrap();
        filter
            .select(&["id", "slug"])
            .unwrap()
            .where_eq("site_id", json!(4))
            .unwrap()
            .where_eq("status", json!("published"))
            .unwrap()
            .order(FilterOrderInfo {
                target: OrderTarget::Column("created_at".to_string()),
                sort: SortDirection::Asc,
            })
            .unwrap()
            .limit(2, Some(2))
            .unwrap();

        let sql = filter.to_sql().unwrap();
        assert_eq!(
            sql.query,
            "SELECT \"id\", \"slug\" FROM \"projects\" WHERE \"site_id\" = $1 AND \"status\" = $2 \
             ORDER BY \"created_at\" ASC NULLS FIRST LIMIT 2 OFFSET 2"
        );
        assert_eq!(sql.params, vec![json!(4), json!("published")]);
    }

    #[test]
    fn count_sql_shares_predicates() {
        let mut filter = Filter::new("pages").unwrap();
        filter.where_eq("site_id", json!(1)).unwrap().limit(10, None).unwrap();
        let sql = filter.to_count_sql().unwrap();
        assert_eq!(sql.query, "SELECT COUNT(*) AS count FROM \"pages\" WHERE \"site_id\" = $1");
        assert_eq!(sql.params, vec![json!(1)]);
    }

    #[test]
    fn orders_on_json_keys() {
        let mut filter = Filter::new("projects").unwrap();
        filter
            .order(FilterOrderInfo {
                target: OrderTarget::JsonField { column: "fields".to_string(), key: "year".to_string() },
                sort: SortDirection::Desc,
            })
            .unwrap();
        assert_eq!(
            filter.to_sql().unwrap().query,
            "SELECT * FROM \"projects\" ORDER BY \"fields\" -> 'year' DESC NULLS LAST"
        );
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        assert!(matches!(Filter::new("sites; --"), Err(FilterError::InvalidTableName(_))));

        let mut filter = Filter::new("projects").unwrap();
        assert!(matches!(filter.where_eq("slug' OR 1=1", json!("x")), Err(FilterError::InvalidColumn(_))));
        assert!(matches!(
            filter.order(FilterOrderInfo {
                target: OrderTarget::JsonField { column: "fields".to_string(), key: "x'--".to_string() },
                sort: SortDirection::Asc,
            }),
            Err(FilterError::InvalidColumn(_))
        ));
        assert!(matches!(filter.limit(0, None), Err(FilterError::InvalidLimit(_))));
    }

    #[test]
    fn null_condition_renders_is_null() {
        let mut filter = Filter::new("pages").unwrap();
        filter.where_eq("slug", Value::Null).unwrap();
        let sql = filter.to_sql().unwrap();
        assert_eq!(sql.query, "SELECT * FROM \"pages\" WHERE \"slug\" IS NULL");
        assert!(sql.params.is_empty());
    }
}
